use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{LoginForm, RegisterForm};
use crate::services::validation::{validate_login, validate_registration};

/// Where the client should navigate once the form is accepted.
#[derive(Serialize)]
pub struct Redirect {
    pub redirect: &'static str,
}

// POST /api/account/login
pub async fn login(Json(form): Json<LoginForm>) -> Result<Json<Redirect>, AppError> {
    let errors = validate_login(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    tracing::info!("login form accepted");
    Ok(Json(Redirect { redirect: "/" }))
}

// POST /api/account/register
pub async fn register(Json(form): Json<RegisterForm>) -> Result<Json<Redirect>, AppError> {
    let errors = validate_registration(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    tracing::info!("registration form accepted");
    Ok(Json(Redirect { redirect: "/login" }))
}
