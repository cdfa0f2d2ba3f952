use std::env;
use std::time::Duration;

use crate::services::intake::IntakeSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// `mock` or `http`.
    pub acceptance_mode: String,
    pub acceptance_url: String,
    pub acceptance_token: String,
    pub mock_latency_ms: u64,
    pub success_display_secs: u64,
    pub strict_style_check: bool,
    /// Booking sessions untouched for this long are dropped.
    pub session_idle_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            acceptance_mode: env::var("ACCEPTANCE_MODE")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|_| "mock".to_string()),
            acceptance_url: env::var("ACCEPTANCE_URL").unwrap_or_default(),
            acceptance_token: env::var("ACCEPTANCE_TOKEN").unwrap_or_default(),
            mock_latency_ms: env::var("MOCK_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            success_display_secs: env::var("SUCCESS_DISPLAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            strict_style_check: env::var("STRICT_STYLE_CHECK")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            session_idle_secs: env::var("SESSION_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
        }
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn intake_settings(&self) -> IntakeSettings {
        IntakeSettings {
            success_display: Duration::from_secs(self.success_display_secs),
            strict_styles: self.strict_style_check,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
