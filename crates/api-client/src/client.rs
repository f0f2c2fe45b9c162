use async_trait::async_trait;
use clipmore_core::types::{Campaign, CampaignViewHistory, Clip};
use clipmore_core::DashboardResult;

/// Read-only data access for the public dashboard. The dashboard never
/// mutates anything upstream; it only fetches and renders.
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// Fetch a campaign by its external id. Fails when the id is unknown
    /// or the campaign is not publicly visible.
    async fn get_campaign(&self, id: &str) -> DashboardResult<Campaign>;

    /// Fetch all clips submitted to a campaign. May be empty.
    async fn get_clips_by_campaign(&self, id: &str) -> DashboardResult<Vec<Clip>>;

    /// Fetch daily metric history covering the trailing `days` window.
    async fn get_campaign_view_history(
        &self,
        id: &str,
        days: u16,
    ) -> DashboardResult<CampaignViewHistory>;
}
