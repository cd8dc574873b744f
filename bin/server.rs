// SWIFT Code Registry - Web Server
// Startup import, then the REST API with Axum

use anyhow::{Context, Result};
use swift_registry::api::build_router;
use swift_registry::{open_database, Config, SwiftService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swift_registry=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    info!(?config, "starting SWIFT code service");

    let conn = open_database(&config.database_path).with_context(|| {
        format!("Failed to open database {}", config.database_path.display())
    })?;
    let service = SwiftService::new(conn);

    // Import finishes before the listener is bound. Missing columns abort startup.
    service.preload(&config.data_file).with_context(|| {
        format!("Failed to import dataset {}", config.data_file.display())
    })?;
    info!(total = service.count()?, "record store ready");

    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
