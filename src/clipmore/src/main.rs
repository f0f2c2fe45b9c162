//! ClipMore — public campaign analytics dashboard, terminal edition.
//!
//! Thin presentation layer over the dashboard core: loads a campaign
//! through the data-access API, then renders the resulting ViewModel as
//! text. All orchestration lives in `clipmore-dashboard`.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clipmore_api_client::{CampaignApi, MockCampaignApi};
use clipmore_core::format::{format_count, format_date_range};
use clipmore_core::types::{Metric, TimeRange};
use clipmore_core::AppConfig;
use clipmore_dashboard::{displayable_clips, project, CampaignDataLoader, ViewModel};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "clipmore")]
#[command(about = "Public campaign analytics dashboard")]
#[command(version)]
struct Cli {
    /// Campaign id to load. Omit to render the demo dashboard.
    campaign_id: Option<String>,

    /// Fallback deadline in milliseconds (overrides config)
    #[arg(long, env = "CLIPMORE__FALLBACK_MS")]
    fallback_ms: Option<u64>,

    /// Initial chart window in days (overrides config)
    #[arg(long, env = "CLIPMORE__TIME_RANGE_DAYS")]
    days: Option<u16>,

    /// Simulate a backend that rejects campaign lookups
    #[arg(long, default_value_t = false)]
    fail: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipmore=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(ms) = cli.fallback_ms {
        config.fallback_ms = ms;
    }
    if let Some(days) = cli.days {
        config.time_range_days = days;
    }
    if cli.fail {
        config.api.fail_campaigns = true;
    }

    info!(
        fallback_ms = config.fallback_ms,
        days = config.time_range_days,
        "ClipMore dashboard starting"
    );

    let mut api = MockCampaignApi::new()
        .with_latency(Duration::from_millis(config.api.mock_latency_ms));
    if config.api.fail_campaigns {
        api = api.failing();
    }
    let api: Arc<dyn CampaignApi> = Arc::new(api);

    let loader = CampaignDataLoader::with_fallback(
        api,
        Duration::from_millis(config.fallback_ms),
        TimeRange::days(config.time_range_days),
    );
    let mut rx = loader.subscribe();

    loader.start(cli.campaign_id.as_deref());

    // Wait for the load attempt to settle, whichever outcome wins.
    loop {
        let settled = !rx.borrow().loading;
        if settled {
            break;
        }
        rx.changed().await?;
    }
    render(&loader.snapshot());

    Ok(())
}

fn render(vm: &ViewModel) {
    if let Some(notice) = &vm.notice {
        println!("[i] {notice}");
    }
    if let Some(error) = &vm.error {
        println!("[!] {error}");
    }

    let Some(campaign) = &vm.campaign else {
        println!("Campaign not available.");
        return;
    };

    println!();
    println!("{} [{}]", campaign.name, campaign.status.label());
    println!("{}", format_date_range(campaign.start_date, campaign.end_date));
    println!("{}", campaign.description);
    println!();
    println!(
        "views {:>8}   likes {:>8}   comments {:>8}   clips {:>4}",
        format_count(campaign.total_views),
        format_count(campaign.total_likes),
        format_count(campaign.total_comments),
        campaign.clip_count,
    );

    println!();
    for metric in Metric::ALL {
        let points = project(vm.history.as_ref(), metric);
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => println!(
                "{:<20} {} points, {} .. {}",
                metric.label(),
                points.len(),
                first.date,
                last.date,
            ),
            _ => println!("{:<20} no data", metric.label()),
        }
    }

    println!();
    println!("Top performing clips ({}d window):", vm.time_range.as_days());
    for clip in displayable_clips(&vm.clips).iter().take(5) {
        println!(
            "  {:<10} views {:>8}  likes {:>8}  {}",
            clip.id,
            format_count(clip.views),
            format_count(clip.likes),
            clip.url,
        );
    }
}
