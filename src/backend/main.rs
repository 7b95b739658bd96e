mod routes;

use card_benefits::config::AppConfig;
use card_benefits::{Catalog, Result, telemetry};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let cards = catalog.len();

    let app = routes::router(AppState::new(catalog))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, cards, "card benefit backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
