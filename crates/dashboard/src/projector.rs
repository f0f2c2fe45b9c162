//! Time-series projection from history records to chart point sequences.

use clipmore_core::types::{CampaignViewHistory, ChartPoint, Metric};

/// Zip the history's date axis with the requested metric sequence. An
/// absent history projects to an empty sequence; the chart widget drives
/// its empty state from that, not from an error.
pub fn project(history: Option<&CampaignViewHistory>, metric: Metric) -> Vec<ChartPoint> {
    let Some(history) = history else {
        return Vec::new();
    };

    let series = match metric {
        Metric::Views => &history.views,
        Metric::Likes => &history.likes,
        Metric::Comments => &history.comments,
    };

    history
        .dates
        .iter()
        .zip(series.iter())
        .map(|(date, value)| ChartPoint {
            date: *date,
            value: *value,
        })
        .collect()
}
