use clipmore_core::types::{Campaign, CampaignViewHistory, Clip, TimeRange};
use serde::Serialize;

/// Where the currently rendered dataset came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

/// The single reconciled snapshot the presentation layer renders from.
/// Published whole over a watch channel; renderers never see a partially
/// updated state.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub campaign: Option<Campaign>,
    pub clips: Vec<Clip>,
    pub history: Option<CampaignViewHistory>,
    pub time_range: TimeRange,
    /// Page-level flag: true from the start of a load attempt until the
    /// attempt settles (success, fallback, or error).
    pub loading: bool,
    /// Chart-local flag for time-range refetches; independent of `loading`.
    pub chart_loading: bool,
    /// Blocking error banner text, if the initial fetch sequence failed.
    pub error: Option<String>,
    /// Transient informational notice, e.g. when placeholder data is shown.
    pub notice: Option<String>,
    pub source: DataSource,
}

impl ViewModel {
    /// Empty snapshot for a freshly mounted page.
    pub fn initial(time_range: TimeRange) -> Self {
        Self {
            campaign: None,
            clips: Vec::new(),
            history: None,
            time_range,
            loading: false,
            chart_loading: false,
            error: None,
            notice: None,
            source: DataSource::Live,
        }
    }
}
