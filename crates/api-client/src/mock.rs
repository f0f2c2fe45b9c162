//! In-memory `CampaignApi` implementation with configurable latency and
//! failure injection. Stands in for the real backend in the CLI demo and
//! in the loader tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use clipmore_core::types::{
    Campaign, CampaignStatus, CampaignViewHistory, Clip, ClipModeration, APPROVED,
};
use clipmore_core::{DashboardError, DashboardResult};
use rand::Rng;

use crate::client::CampaignApi;

#[derive(Debug, Clone, Default)]
pub struct MockCampaignApi {
    latency: Duration,
    fail_campaigns: bool,
    fail_history: bool,
}

impl MockCampaignApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a slow backend; every call sleeps this long before
    /// responding.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Every `get_campaign` call fails, as if the campaign were private
    /// or deleted.
    pub fn failing(mut self) -> Self {
        self.fail_campaigns = true;
        self
    }

    /// Only history calls fail; campaign and clip lookups keep working.
    pub fn with_history_failures(mut self) -> Self {
        self.fail_history = true;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn sample_campaign(id: &str) -> Campaign {
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(29);
        Campaign {
            id: id.to_string(),
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

    fn sample_clips() -> Vec<Clip> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        (0..12)
            .map(|i| Clip {
                id: format!("clip-{i}"),
                url: format!("https://tiktok.com/@user/video/{i}"),
                thumbnail_url: format!("https://cdn.clipmore.app/mockimage/clip/{}.jpg", i + 1),
                views: rng.gen_range(100_000..1_100_000),
                likes: rng.gen_range(10_000..210_000),
                comments: rng.gen_range(5_000..55_000),
                status: APPROVED.to_string(),
                created_at: now - ChronoDuration::days(i),
                moderation: Some(ClipModeration {
                    status: APPROVED.to_string(),
                }),
            })
            .collect()
    }

    fn sample_history(days: u16) -> CampaignViewHistory {
        let mut rng = rand::thread_rng();
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(days as i64);

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
}

#[async_trait]
impl CampaignApi for MockCampaignApi {
    async fn get_campaign(&self, id: &str) -> DashboardResult<Campaign> {
        self.simulate_latency().await;
        if self.fail_campaigns {
            return Err(DashboardError::CampaignNotFound(id.to_string()));
        }
        Ok(Self::sample_campaign(id))
    }

    async fn get_clips_by_campaign(&self, _id: &str) -> DashboardResult<Vec<Clip>> {
        self.simulate_latency().await;
        Ok(Self::sample_clips())
    }

    async fn get_campaign_view_history(
        &self,
        id: &str,
        days: u16,
    ) -> DashboardResult<CampaignViewHistory> {
        self.simulate_latency().await;
        if self.fail_history {
            return Err(DashboardError::Api(format!(
                "history unavailable for campaign {id}"
            )));
        }
        Ok(Self::sample_history(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_campaign_lookup_succeeds() {
        let api = MockCampaignApi::new();
        let campaign = api.get_campaign("cmp-42").await.unwrap();
        assert_eq!(campaign.id, "cmp-42");
        assert_eq!(campaign.clip_count, 27);
    }

    #[tokio::test]
    async fn test_failing_mode_rejects_campaigns() {
        let api = MockCampaignApi::new().failing();
        let err = api.get_campaign("cmp-42").await.unwrap_err();
        assert!(matches!(err, DashboardError::CampaignNotFound(_)));
        // Clips are served by a different upstream and keep working.
        assert_eq!(api.get_clips_by_campaign("cmp-42").await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_history_matches_requested_window() {
        let api = MockCampaignApi::new();
        let history = api.get_campaign_view_history("cmp-42", 7).await.unwrap();
        // Inclusive bounds: 7 days back plus today.
        assert_eq!(history.len(), 8);
        assert!(history.is_consistent());
    }

    #[tokio::test]
    async fn test_history_failure_mode() {
        let api = MockCampaignApi::new().with_history_failures();
        assert!(api.get_campaign("cmp-42").await.is_ok());
        assert!(api.get_campaign_view_history("cmp-42", 30).await.is_err());
    }
}
