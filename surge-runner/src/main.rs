//! Surge Runner
//!
//! Drives a group of indefinitely-running order tasks against a promotion
//! service API.
//!
//! Architecture:
//! - Configuration: CLI arguments (env-overridable) validated before start
//! - Catalog: remote endpoint or local snapshot, filtered to available services
//! - Scheduler: one polling task per service, supervised as a group
//! - Presenter: structured task events rendered on the console
//!
//! Startup resolves the media id once, builds the shared execution
//! context, then every task polls independently until the process is
//! interrupted or one of them faults.

mod catalog;
mod config;
mod presenter;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use surge_client::{ApiSettings, OrderSubmitter, PromoClient};
use surge_core::domain::context::ExecutionContext;

use crate::config::Config;
use crate::presenter::Presenter;
use crate::scheduler::TaskGroup;

#[derive(Parser)]
#[command(name = "surge")]
#[command(about = "Concurrent recurring-order runner for a promotion service", long_about = None)]
struct Cli {
    /// Base URL of the promotion API endpoint
    #[arg(
        long,
        env = "SURGE_API_URL",
        default_value = "http://localhost:8080/api"
    )]
    api_url: String,

    /// Site URL the API expects as referer/origin
    #[arg(long, env = "SURGE_SITE_URL", default_value = "http://localhost:8080")]
    site_url: String,

    /// Profile link targeted by follower-style services
    #[arg(long, env = "SURGE_PROFILE_LINK")]
    profile_link: String,

    /// Media link targeted by every other service
    #[arg(long, env = "SURGE_MEDIA_LINK")]
    media_link: String,

    /// Path to a local catalog snapshot (skips the catalog endpoint)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surge_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config {
        api_url: cli.api_url,
        site_url: cli.site_url,
        profile_link: cli.profile_link.trim().to_string(),
        media_link: cli.media_link.trim().to_string(),
        catalog_file: cli.catalog,
    };
    config.validate()?;

    info!("Starting Surge Runner (endpoint {})", config.api_url);

    let client = Arc::new(
        PromoClient::new(ApiSettings::new(
            config.api_url.clone(),
            config.site_url.clone(),
        ))
        .context("failed to build API client")?,
    );

    // Catalog: local snapshot when given, remote endpoint otherwise
    let services = match &config.catalog_file {
        Some(path) => catalog::load_catalog_file(path)?,
        None => client
            .fetch_catalog()
            .await
            .context("failed to fetch the service catalog")?,
    };

    let descriptors = catalog::available_tasks(&services);
    if descriptors.is_empty() {
        anyhow::bail!("no services are currently available");
    }

    info!("Catalog lists {} available service(s)", descriptors.len());
    presenter::print_service_listing(&services, &descriptors);

    // One-time lookup before any task starts
    let media_id = client
        .resolve_media_id(&config.media_link)
        .await
        .context("failed to resolve the media id")?;
    info!("Resolved media id: {}", media_id);

    let ctx = Arc::new(ExecutionContext {
        profile_link: config.profile_link.clone(),
        media_link: config.media_link.clone(),
        media_id,
    });

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let presenter = Presenter::new(&descriptors).spawn(events_rx);

    let submitter: Arc<dyn OrderSubmitter> = client;
    let mut group = TaskGroup::start(descriptors, ctx, submitter, events_tx);

    info!(
        "Started {} polling task(s); press Ctrl+C to stop",
        group.len()
    );

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("Failed to listen for interrupt: {}", e);
            }
            info!("Interrupt received, stopping tasks");
            Ok(())
        }
        result = group.wait_any() => result,
    };

    group.stop().await;

    // Every sender is gone once the group has unwound, so the presenter
    // drains the channel and exits on its own.
    let _ = presenter.await;

    info!("All tasks stopped");
    outcome
}
