use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use revfeed::application::{
    FeedConfig, FeedEvent, FeedHandle, FeedPhase, FeedSnapshot, ReviewsFeed,
};
use revfeed::domain::ports::{BlobCachePort, FetcherPort, ReviewsProviderPort};
use revfeed::infrastructure::{
    AppConfig, CliArgs, DiskBlobCache, FixtureReviewsProvider, HttpFetcher, ImagePipeline,
    MemoryBlobCache, StorageManager, TieredBlobCache,
};

/// Synthetic row height used to fake scroll geometry in the headless drive.
const ROW_HEIGHT: f64 = 120.0;

/// Synthetic viewport height for the same purpose.
const VIEWPORT_HEIGHT: f64 = 800.0;

/// How long the demo waits before giving up on a quiet feed.
const DEMO_DEADLINE: Duration = Duration::from_secs(120);

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

async fn create_feed(
    config: &AppConfig,
) -> Result<(FeedHandle, mpsc::UnboundedReceiver<FeedEvent>)> {
    let memory = MemoryBlobCache::new(config.photos.memory_cache_entries);
    let disk = match &config.photos.cache_dir {
        Some(dir) => DiskBlobCache::new(dir.clone()).await?,
        None => DiskBlobCache::default_location().await?,
    };
    let cache: Arc<dyn BlobCachePort> = Arc::new(TieredBlobCache::new(memory, disk));

    let fetcher: Arc<dyn FetcherPort> = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.photos.fetch_timeout_secs,
    ))?);
    let pipeline = ImagePipeline::new(cache, fetcher, config.photos.max_concurrent_fetches);

    let latency = Duration::from_millis(config.provider.latency_ms);
    let provider: Arc<dyn ReviewsProviderPort> = match &config.provider.fixture_path {
        Some(path) => Arc::new(FixtureReviewsProvider::from_path(
            path.clone(),
            config.feed.page_size,
            latency,
        )),
        None => Arc::new(FixtureReviewsProvider::bundled(
            config.feed.page_size,
            latency,
        )),
    };

    let feed_config = FeedConfig {
        page_size: config.feed.page_size,
        screens_to_preload: config.feed.screens_to_preload,
    };
    let (machine, handle, events) = ReviewsFeed::new(provider, pipeline, &feed_config);
    machine.spawn();

    Ok((handle, events))
}

/// Drives the feed to exhaustion: loads every page, waits for photos to
/// settle, and returns the final snapshot.
async fn drive_to_completion(
    handle: &FeedHandle,
    events: &mut mpsc::UnboundedReceiver<FeedEvent>,
) -> Option<FeedSnapshot> {
    let deadline = tokio::time::Instant::now() + DEMO_DEADLINE;
    let mut latest = None;

    handle.load_initial();

    loop {
        let event = tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                info!("Demo deadline reached before the feed settled");
                return latest;
            }
            event = events.recv() => {
                match event {
                    Some(event) => event,
                    None => return latest,
                }
            }
        };

        let FeedEvent::Snapshot(snapshot) = event else {
            continue;
        };

        let done = match snapshot.phase {
            FeedPhase::Idle if snapshot.can_load_more => {
                // Pretend the user flung the list to the bottom.
                #[allow(clippy::cast_precision_loss)]
                let content = ROW_HEIGHT * snapshot.len() as f64;
                handle.scroll_ended(content, VIEWPORT_HEIGHT, content - VIEWPORT_HEIGHT);
                false
            }
            FeedPhase::Idle => snapshot.items.iter().all(|item| item.photos_settled()),
            FeedPhase::Error => true,
            _ => false,
        };

        latest = Some(snapshot);
        if done {
            return latest;
        }
    }
}

fn print_summary(snapshot: &FeedSnapshot, timestamp_format: &str) {
    for item in &snapshot.items {
        let resolved = item.photos.iter().filter(|p| p.is_success()).count();
        let photos = if item.photos.is_empty() {
            String::new()
        } else {
            format!("  [{resolved}/{} photos]", item.photos.len())
        };
        println!(
            "{}  {}  {}{}",
            item.review.rating.stars(),
            item.review.author(),
            item.review.created.format(timestamp_format),
            photos
        );
    }
    if let Some(footer) = &snapshot.footer_text {
        println!("--- {footer} ---");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;
    info!(version = revfeed::VERSION, "Starting revfeed");

    let (handle, mut events) = create_feed(&config).await?;

    match drive_to_completion(&handle, &mut events).await {
        Some(snapshot) if snapshot.phase == FeedPhase::Error => {
            println!(
                "feed ended in an error state after {} items",
                snapshot.len()
            );
        }
        Some(snapshot) => print_summary(&snapshot, &config.ui.timestamp_format),
        None => println!("feed stopped before producing a snapshot"),
    }

    Ok(())
}
