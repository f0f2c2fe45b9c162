//! Synthetic placeholder data used when real data is missing, slow, or
//! erroring. Values are random within fixed bounds; identity fields are
//! deterministic. Nothing here touches the network.

use chrono::{Duration as ChronoDuration, Utc};
use clipmore_core::types::{
    Campaign, CampaignStatus, CampaignViewHistory, Clip, ClipModeration, TimeRange, APPROVED,
};
use rand::Rng;

use crate::viewmodel::{DataSource, ViewModel};

/// Campaign id used when the page was opened without one.
pub const DEMO_CAMPAIGN_ID: &str = "demo-123";

/// Number of clips in a generated carousel.
pub const DEMO_CLIP_COUNT: usize = 12;

/// Notice surfaced whenever placeholder data replaces real data.
pub const DEMO_NOTICE: &str = "Using placeholder data for demonstration";

pub struct DemoDataGenerator;

impl DemoDataGenerator {
    pub fn campaign(id: Option<&str>) -> Campaign {
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(29);
        Campaign {
            id: id.unwrap_or(DEMO_CAMPAIGN_ID).to_string(),
            name: "Neon Circuit Campaign".to_string(),
            description: "Official music promotion campaign for the Neon Circuit release cycle."
                .to_string(),
            start_date: start,
            end_date: end,
            status: CampaignStatus::Completed,
            total_views: 10_000_000,
            total_likes: 1_200_000,
            total_comments: 350_000,
            clip_count: 27,
            server_url: Some("https://discord.gg/neoncircuit".to_string()),
            image_url: Some("https://cdn.clipmore.app/mockimage/artist/1.jpg".to_string()),
        }
    }

    /// Generated clips are always eligible: both the top-level status and
    /// the nested moderation record are approved.
    pub fn clips() -> Vec<Clip> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        (0..DEMO_CLIP_COUNT)
            .map(|i| Clip {
                id: format!("clip-{i}"),
                url: format!("https://tiktok.com/@user/video/{i}"),
                thumbnail_url: format!("https://cdn.clipmore.app/mockimage/clip/{}.jpg", i + 1),
                views: rng.gen_range(100_000..1_100_000),
                likes: rng.gen_range(10_000..210_000),
                comments: rng.gen_range(5_000..55_000),
                status: APPROVED.to_string(),
                created_at: now - ChronoDuration::days(i as i64),
                moderation: Some(ClipModeration {
                    status: APPROVED.to_string(),
                }),
            })
            .collect()
    }

    /// History spanning `[today - range, today]` inclusive, one sample per
    /// calendar day.
    pub fn history(range: TimeRange) -> CampaignViewHistory {
        let mut rng = rand::thread_rng();
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(range.as_days() as i64);

        let mut history = CampaignViewHistory::default();
        let mut date = start;
        while date <= end {
            history.dates.push(date);
            history.views.push(rng.gen_range(100_000..600_000));
            history.likes.push(rng.gen_range(10_000..110_000));
            history.comments.push(rng.gen_range(5_000..35_000));
            date += ChronoDuration::days(1);
        }
        history
    }

    /// A complete, settled snapshot built entirely from placeholder data.
    pub fn view_model(id: Option<&str>, range: TimeRange) -> ViewModel {
        let mut clips = Self::clips();
        clips.sort_by(|a, b| b.views.cmp(&a.views));

        ViewModel {
            campaign: Some(Self::campaign(id)),
            clips,
            history: Some(Self::history(range)),
            time_range: range,
            loading: false,
            chart_loading: false,
            error: None,
            notice: Some(DEMO_NOTICE.to_string()),
            source: DataSource::Demo,
        }
    }
}
