use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Moderation decision string used by both eligibility fields on [`Clip`].
pub const APPROVED: &str = "APPROVED";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
        }
    }
}

/// A marketing campaign as served by the public API. Immutable for the
/// lifetime of a load attempt; replaced wholesale on reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CampaignStatus,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub clip_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipModeration {
    pub status: String,
}

/// A user-submitted clip. Eligibility is signalled redundantly by the
/// top-level `status` and the optional nested moderation record; the two
/// come from different upstream producers and either one approving is
/// sufficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "ClipModeration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub moderation: Option<ClipModeration>,
}

/// Daily metric history as four parallel sequences. `dates[i]` is the
/// calendar day for the i-th sample of every metric sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignViewHistory {
    pub dates: Vec<NaiveDate>,
    pub views: Vec<u64>,
    pub likes: Vec<u64>,
    pub comments: Vec<u64>,
}

impl CampaignViewHistory {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All four sequences have identical length and `dates` is non-decreasing.
    pub fn is_consistent(&self) -> bool {
        let n = self.dates.len();
        self.views.len() == n
            && self.likes.len() == n
            && self.comments.len() == n
            && self.dates.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Reporting window for chart history, in days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TimeRange(u16);

impl TimeRange {
    pub const WEEK: TimeRange = TimeRange(7);
    pub const MONTH: TimeRange = TimeRange(30);
    pub const QUARTER: TimeRange = TimeRange(90);

    /// Selector presets offered by the chart widgets.
    pub const PRESETS: [TimeRange; 3] = [Self::WEEK, Self::MONTH, Self::QUARTER];

    pub fn days(days: u16) -> Self {
        TimeRange(days)
    }

    pub fn as_days(&self) -> u16 {
        self.0
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::MONTH
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Views,
    Likes,
    Comments,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Views, Metric::Likes, Metric::Comments];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Views => "Views Over Time",
            Metric::Likes => "Likes Over Time",
            Metric::Comments => "Comments Over Time",
        }
    }
}

/// One sample handed to the chart widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: u64,
}
