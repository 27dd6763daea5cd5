use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zoomfeed::application::FeedService;
use zoomfeed::application::sample_articles::sample_articles;
use zoomfeed::domain::entities::ImageLoadedEvent;
use zoomfeed::infrastructure::{
    AppConfig, CliArgs, HttpImageFetcher, ImageLoader, ImageLoaderConfig, MemoryImageCache,
    StorageManager, UiQueue, ui_queue,
};
use zoomfeed::presentation::App;
use zoomfeed::presentation::widgets::ImageManager;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_loader(config: &AppConfig) -> Result<(ImageLoader, UiQueue<ImageLoadedEvent>)> {
    let cache = Arc::new(MemoryImageCache::with_capacity(config.images.cache_capacity));
    let fetcher = Arc::new(HttpImageFetcher::new(config.images.timeout())?);
    let (handle, queue) = ui_queue();

    let loader_config = ImageLoaderConfig {
        single_flight: config.images.single_flight,
        max_decode_width: config.images.max_decode_width,
    };

    Ok((ImageLoader::new(loader_config, cache, fetcher, handle), queue))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = zoomfeed::VERSION, "Starting {}", zoomfeed::NAME);

    let (loader, queue) = create_loader(&config)?;
    let feed = FeedService::new(sample_articles(Utc::now()));

    let mut terminal = ratatui::init();
    let images = ImageManager::new();

    let app = App::new(&config, feed, loader, queue, images);
    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
