use socialsave::api::server::{ApiServer, ApiServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "socialsave=info,socials_parser=info,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ApiServerConfig::from_env_or_default();
    let server = ApiServer::new(config);

    let cancel_token = server.cancel_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown signal received");
                cancel_token.cancel();
            }
            Err(e) => tracing::error!("failed to listen for shutdown signal: {}", e),
        }
    });

    server.run().await?;

    Ok(())
}
