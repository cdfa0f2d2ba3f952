use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use drapinghub::config::AppConfig;
use drapinghub::handlers;
use drapinghub::services::acceptance::http::HttpAcceptance;
use drapinghub::services::acceptance::mock::MockAcceptance;
use drapinghub::services::acceptance::BookingAcceptance;
use drapinghub::services::sessions::SessionStore;
use drapinghub::state::AppState;

const SWEEP_EVERY: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let acceptance: Arc<dyn BookingAcceptance> = match config.acceptance_mode.as_str() {
        "http" => {
            anyhow::ensure!(
                !config.acceptance_url.is_empty(),
                "ACCEPTANCE_URL must be set when ACCEPTANCE_MODE=http"
            );
            tracing::info!("using HTTP booking acceptance (url: {})", config.acceptance_url);
            Arc::new(HttpAcceptance::new(
                config.acceptance_url.clone(),
                config.acceptance_token.clone(),
            ))
        }
        "mock" => {
            tracing::info!(
                "using mock booking acceptance (latency: {}ms)",
                config.mock_latency_ms
            );
            Arc::new(MockAcceptance::new(Duration::from_millis(config.mock_latency_ms)))
        }
        other => anyhow::bail!("unknown ACCEPTANCE_MODE: {other}"),
    };

    let (status_tx, _) = broadcast::channel(256);

    let sessions = Arc::new(SessionStore::new(
        acceptance,
        status_tx,
        config.intake_settings(),
    ));
    let idle = config.session_idle();
    sessions.spawn_sweeper(idle, SWEEP_EVERY.min(idle));
    tracing::info!("booking sessions expire after {}s idle", config.session_idle_secs);

    let state = Arc::new(AppState {
        sessions,
        config: config.clone(),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
