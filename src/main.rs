use quickflip_server::booter::Booter;
use quickflip_server::server::build_router;
use quickflip_server::server::types::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let app_state = AppState::from_env()?;
    let state = Arc::new(app_state);
    let router = build_router(state);

    let booter = Booter::new(None).await?;
    tracing::info!("Listening on port {}", booter.port);
    booter.start(router).await?;

    Ok(())
}
