use clap::{Parser, Subcommand};
use log::info;
use lastfm_explorer::clients::ProxyClient;
use lastfm_explorer::clients::errors::Result;
use lastfm_explorer::config::{ConfigBuilder, PROXY_URL_VAR};
use lastfm_explorer::explorer::Explorer;
use lastfm_explorer::regions::RegionState;
use lastfm_explorer::view::render;

#[derive(Parser)]
#[command(name = "lastfm-explorer")]
#[command(version, about = "Browse Last.fm artists and albums through the API proxy", long_about = None)]
struct Cli {
    /// Proxy endpoint to query
    #[arg(long, global = true, env = PROXY_URL_VAR)]
    proxy_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an artist's biography and top albums
    Artist { name: String },
    /// Show an album's details and tracklist
    Album { artist: String, album: String },
}

/// Parse arguments, load one panel and print it.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(url) = cli.proxy_url {
        builder = builder.proxy_url(url);
    }
    let config = builder.build_client()?;
    info!("Using proxy at {}", config.proxy_url);
    let explorer = Explorer::new(ProxyClient::new(config.proxy_url, config.timeout)?);

    match &cli.command {
        Commands::Artist { name } => {
            let output = match explorer.show_artist(name).await {
                RegionState::Ready(view) => render::artist_panel(&view),
                RegionState::Failed(reason) => render::failure("artist", &reason),
                RegionState::Empty | RegionState::Loading => String::new(),
            };
            print!("{output}");
        }
        Commands::Album { artist, album } => {
            let output = match explorer.show_album(artist, album).await {
                RegionState::Ready(view) => render::album_panel(&view),
                RegionState::Failed(reason) => render::failure("album", &reason),
                RegionState::Empty | RegionState::Loading => String::new(),
            };
            print!("{output}");
        }
    }
    Ok(())
}
