//! postboard - Entry Point

use clap::Parser;
use postboard::client::{HttpPostService, MemoryPostService, PostService};
use postboard::dispatch::Dispatcher;
use postboard::model::AppError;
use postboard::navigation::Location;
use postboard::state::AppState;
use postboard::view::{ColorConfig, Palette};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Number of sample posts served by `--demo`.
const DEMO_POST_COUNT: u64 = 137;

/// postboard - terminal client for a blog API
#[derive(Parser, Debug)]
#[command(name = "postboard")]
#[command(version)]
#[command(about = "Browse, search and edit the posts of a blog API from the terminal")]
pub struct Args {
    /// Base URL of the blog API (e.g. http://localhost:3000/api/v1)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Start on a specific page of the post list (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Start with a search term applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Quiet period after the last keystroke before a search is issued
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Serve sample posts from memory instead of contacting the API
    #[arg(long)]
    pub demo: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

/// Location the list screen opens on.
fn initial_location(page: Option<u32>, search: Option<&str>) -> Location {
    let mut location = Location::new("/posts");
    if let Some(page) = page.filter(|page| *page > 1) {
        location.set_param("page", page.to_string());
    }
    if let Some(term) = search.filter(|term| !term.is_empty()) {
        location.set_param("search", term);
    }
    location
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = postboard::config::load_config_with_precedence(args.config.clone())?;
        let merged = postboard::config::merge_config(config_file);
        let with_env = postboard::config::apply_env_overrides(merged);
        postboard::config::apply_cli_overrides(with_env, args.api_url.clone(), args.debounce_ms)
    };

    postboard::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        demo = args.demo,
        "Configuration loaded and resolved"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let service: Arc<dyn PostService> = if args.demo {
        Arc::new(MemoryPostService::demo(DEMO_POST_COUNT))
    } else {
        Arc::new(HttpPostService::new(&config.api_url, config.request_timeout)?)
    };

    let (dispatcher, events) = Dispatcher::new(service, runtime.handle().clone());
    let app_state = AppState::new(
        initial_location(args.page, args.search.as_deref()),
        config.debounce,
    );
    let palette = Palette::new(ColorConfig::from_env_and_args(args.no_color));

    postboard::view::run(app_state, dispatcher, events, palette)?;

    // In-flight requests are abandoned on quit.
    runtime.shutdown_timeout(Duration::from_millis(250));
    Ok(())
}
