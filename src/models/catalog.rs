use serde::Serialize;

use super::service::Service;

#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub price_inr: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub service: Service,
    pub title: &'static str,
    pub route: &'static str,
    pub summary: &'static str,
    pub styles: Vec<StyleInfo>,
}

impl ServiceInfo {
    pub fn for_service(service: Service) -> Self {
        let (title, route, summary, details): (_, _, _, [(&'static str, u32); 3]) = match service {
            Service::Saree => (
                "Saree Pre-plating",
                "/services/saree-pre-plating",
                "Professional saree pre-pleating service for hassle-free draping. Perfect for brides and special occasions.",
                [
                    ("Classic pleating style perfect for formal occasions", 600),
                    ("Contemporary pleating with a modern twist", 800),
                    ("Elaborate pleating designed for wedding ceremonies", 1000),
                ],
            ),
            Service::Mehandi => (
                "Mehandi Designs",
                "/services/mehandi",
                "Intricate and beautiful mehendi designs for weddings and festive celebrations.",
                [
                    ("Intricate full-hand designs for the bride", 5999),
                    ("Modern patterns with floral motifs", 2999),
                    ("Blend of traditional and modern designs", 3999),
                ],
            ),
            Service::Aari => (
                "Aari Designing",
                "/services/aari",
                "Exquisite embroidery work specializing in bridal wear and custom outfits.",
                [
                    ("Luxurious embroidery for wedding attire", 15999),
                    ("Classic patterns for ethnic wear", 8999),
                    ("Modern designs for fusion wear", 12999),
                ],
            ),
        };

        // Style names come from the service so the catalog and the booking
        // form never disagree.
        let styles = service
            .styles()
            .iter()
            .zip(details)
            .map(|(name, (description, price_inr))| StyleInfo {
                name: *name,
                description,
                price_inr,
            })
            .collect();

        Self {
            service,
            title,
            route,
            summary,
            styles,
        }
    }

    pub fn all() -> Vec<Self> {
        Service::ALL.into_iter().map(Self::for_service).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_form_styles() {
        for info in ServiceInfo::all() {
            let names: Vec<&str> = info.styles.iter().map(|s| s.name).collect();
            assert_eq!(names, info.service.styles());
        }
    }

    #[test]
    fn test_catalog_order_and_routes() {
        let all = ServiceInfo::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].route, "/services/saree-pre-plating");
        assert_eq!(all[1].service, Service::Mehandi);
        assert_eq!(all[2].title, "Aari Designing");
    }

    #[test]
    fn test_prices() {
        let aari = ServiceInfo::for_service(Service::Aari);
        assert_eq!(aari.styles[0].price_inr, 15999);
        let saree = ServiceInfo::for_service(Service::Saree);
        assert_eq!(saree.styles[2].price_inr, 1000);
    }
}
