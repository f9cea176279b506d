//! The `/api` proxy that injects the Last.fm API key.

use lastfm_explorer::config::ConfigBuilder;
use lastfm_explorer::server;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    info!("Building proxy config ...");
    let config = ConfigBuilder::new().build_proxy()?;
    server::serve(config).await?;

    Ok(())
}
