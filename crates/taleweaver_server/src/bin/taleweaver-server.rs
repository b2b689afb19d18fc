//! Taleweaver story server.
//!
//! Reads configuration from the environment (and `.env`), then serves the
//! story API until Ctrl-C or SIGTERM.

use std::sync::Arc;
use taleweaver_core::{init_observability, init_tracing, shutdown_observability};
use taleweaver_models::GeminiClient;
use taleweaver_narrative::{StoryStore, StoryTeller};
use taleweaver_server::{ServerConfig, cors_layer, create_router, shutdown_signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_observability("taleweaver-server", 60) {
        warn!(error = %e, "Metrics export disabled");
    }

    let driver = GeminiClient::new(config.gemini_config()?)?;
    info!(model = %config.model(), "Gemini client ready");

    let teller = Arc::new(StoryTeller::new(
        driver,
        StoryStore::new(*config.max_sessions()),
    ));
    let cors = cors_layer(config.allowed_origins())?;
    let app = create_router(teller, cors);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(address = %listener.local_addr()?, "Taleweaver server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    shutdown_observability();
    Ok(())
}
