mod browser;
mod http;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reel_media::config::Config;
use reel_media::listing::ListingMode;
use reel_media::media::MediaList;
use reel_media::{platform, scan};
use std::path::PathBuf;
use tracing::info;

/// TraceLayer emits request spans at DEBUG under `tower_http`.
const DEFAULT_LOG_FILTER: &str = "info,reel=debug,reel_media=debug,tower_http=debug";

/// Serve a directory of clips and images to the browser in shuffled order.
#[derive(Parser, Debug)]
#[command(name = "reel", version)]
struct Args {
    /// Directory to scan for media files
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Listing behaviour of /api/videos: "random" or "paged"
    #[arg(long, value_name = "MODE")]
    mode: Option<ListingMode>,

    /// Seed for the startup shuffle and random picks
    #[arg(long)]
    seed: Option<u64>,

    /// Do not open a browser window on startup
    #[arg(long)]
    no_browser: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line values win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.dir {
            config.library.dir = dir.clone();
        }
        if let Some(mode) = self.mode {
            config.listing.mode = mode;
        }
        if let Some(seed) = self.seed {
            config.listing.seed = Some(seed);
        }
        if self.no_browser {
            config.server.open_browser = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter)
        .init();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;
    info!("Config loaded from: {:?}", config_path);
    args.apply(&mut config);

    let mut rng = match config.listing.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let files = scan::scan_dir(&config.library.dir, &config.library.extensions)?;
    let media = MediaList::shuffled(files, &mut rng);
    info!("Serving media from: {:?}", config.library.dir);
    info!(
        "Loaded {} media files in randomized order (mode={})",
        media.len(),
        config.listing.mode
    );

    let state = http::HttpState::new(
        media,
        rng,
        config.listing.mode,
        config.listing.default_limit,
    );
    let app = http::router(state, &config.library.dir);

    let listener = http::bind(&config.server.bind_address, config.server.port).await?;
    let url = platform::local_url(config.server.port);
    info!("Serving on {}", url);

    if config.server.open_browser {
        browser::launch(url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
