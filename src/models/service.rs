use serde::{Deserialize, Serialize};

/// Hourly appointment slots offered on the booking form, in display order.
pub const TIME_SLOTS: [&str; 9] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Saree,
    Mehandi,
    Aari,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Saree, Service::Mehandi, Service::Aari];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Saree => "saree",
            Service::Mehandi => "mehandi",
            Service::Aari => "aari",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "saree" => Some(Service::Saree),
            "mehandi" => Some(Service::Mehandi),
            "aari" => Some(Service::Aari),
            _ => None,
        }
    }

    /// Style choices for this service. The order is what the form shows.
    pub fn styles(&self) -> &'static [&'static str] {
        match self {
            Service::Saree => &["Traditional Pleating", "Modern Fusion", "Bridal Special"],
            Service::Mehandi => &["Bridal Mehandi", "Arabic Design", "Indo-Arabic Fusion"],
            Service::Aari => &["Bridal Aari Work", "Traditional Design", "Contemporary Style"],
        }
    }

    pub fn offers_style(&self, style: &str) -> bool {
        self.styles().contains(&style)
    }
}

pub fn is_time_slot(s: &str) -> bool {
    TIME_SLOTS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mehandi_styles_in_order() {
        for _ in 0..3 {
            assert_eq!(
                Service::Mehandi.styles(),
                &["Bridal Mehandi", "Arabic Design", "Indo-Arabic Fusion"]
            );
        }
    }

    #[test]
    fn test_every_service_has_three_styles() {
        for service in Service::ALL {
            assert_eq!(service.styles().len(), 3);
        }
    }

    #[test]
    fn test_from_str_roundtrips_as_str() {
        for service in Service::ALL {
            assert_eq!(Service::from_str(service.as_str()), Some(service));
        }
        assert_eq!(Service::from_str(" AARI "), Some(Service::Aari));
        assert_eq!(Service::from_str("facial"), None);
    }

    #[test]
    fn test_offers_style() {
        assert!(Service::Saree.offers_style("Modern Fusion"));
        assert!(!Service::Saree.offers_style("Arabic Design"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Service::Mehandi).unwrap();
        assert_eq!(json, "\"mehandi\"");
        let parsed: Service = serde_json::from_str("\"aari\"").unwrap();
        assert_eq!(parsed, Service::Aari);
    }

    #[test]
    fn test_time_slots() {
        assert_eq!(TIME_SLOTS.first(), Some(&"09:00 AM"));
        assert_eq!(TIME_SLOTS.last(), Some(&"05:00 PM"));
        assert!(is_time_slot("10:00 AM"));
        assert!(!is_time_slot("10:30 AM"));
        assert!(!is_time_slot(""));
    }
}
