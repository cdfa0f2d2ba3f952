use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::sessions::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
}
