use axum::extract::Path;
use axum::Json;

use crate::errors::AppError;
use crate::models::{Service, ServiceInfo};

// GET /api/services
pub async fn list_services() -> Json<Vec<ServiceInfo>> {
    Json(ServiceInfo::all())
}

// GET /api/services/:service
pub async fn get_service(Path(slug): Path<String>) -> Result<Json<ServiceInfo>, AppError> {
    let service = Service::from_str(&slug)
        .ok_or_else(|| AppError::NotFound(format!("service {slug}")))?;
    Ok(Json(ServiceInfo::for_service(service)))
}
