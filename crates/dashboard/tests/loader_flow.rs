//! End-to-end loader scenarios: the fetch/fallback race, stale-response
//! discarding, and the chart refetch protocol. Time is paused, so the
//! timer races run deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clipmore_api_client::{CampaignApi, MockCampaignApi};
use clipmore_core::types::{Campaign, CampaignViewHistory, Clip, TimeRange};
use clipmore_core::{DashboardError, DashboardResult};
use clipmore_dashboard::loader::LOAD_ERROR;
use clipmore_dashboard::{CampaignDataLoader, DataSource, ViewModel};
use tokio::sync::watch;

const FALLBACK: Duration = Duration::from_millis(3000);

fn loader_with(api: Arc<dyn CampaignApi>) -> CampaignDataLoader {
    CampaignDataLoader::with_fallback(api, FALLBACK, TimeRange::default())
}

async fn wait_settled(rx: &mut watch::Receiver<ViewModel>) -> ViewModel {
    loop {
        let vm = rx.borrow().clone();
        if !vm.loading {
            return vm;
        }
        rx.changed().await.expect("loader dropped");
    }
}

async fn wait_chart_idle(rx: &mut watch::Receiver<ViewModel>) -> ViewModel {
    loop {
        let vm = rx.borrow().clone();
        if !vm.chart_loading {
            return vm;
        }
        rx.changed().await.expect("loader dropped");
    }
}

#[tokio::test(start_paused = true)]
async fn fast_fetch_beats_fallback_timer() {
    // Three sequential calls at 150ms each finish well inside the 3000ms
    // deadline.
    let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_millis(150)));
    let loader = loader_with(api);
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-fast"));
    assert!(rx.borrow().loading);

    let vm = wait_settled(&mut rx).await;
    assert_eq!(vm.source, DataSource::Live);
    assert!(vm.notice.is_none());
    assert!(vm.error.is_none());
    assert_eq!(vm.campaign.as_ref().unwrap().id, "cmp-fast");
    assert!(vm.history.is_some());

    // The aborted timer never fires; the snapshot stays live.
    tokio::time::sleep(Duration::from_secs(10)).await;
    let vm = loader.snapshot();
    assert_eq!(vm.source, DataSource::Live);
    assert!(vm.notice.is_none());
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_falls_back_and_late_result_is_discarded() {
    // 1200ms per call: campaign at 1200ms, clips at 2400ms, history at
    // 3600ms. The timer wins at 3000ms; the full sequence lands at 3600ms
    // for the same attempt and must be ignored.
    let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_millis(1200)));
    let loader = loader_with(api);
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-slow"));

    let vm = wait_settled(&mut rx).await;
    assert_eq!(vm.source, DataSource::Demo);
    assert!(vm.notice.is_some());
    assert!(vm.error.is_none());
    assert!(!vm.loading);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let vm = loader.snapshot();
    assert_eq!(vm.source, DataSource::Demo, "late live result overwrote demo data");
    assert!(vm.notice.is_some());
}

#[tokio::test(start_paused = true)]
async fn fetch_error_falls_back_before_the_timer() {
    let api = Arc::new(
        MockCampaignApi::new()
            .with_latency(Duration::from_millis(100))
            .failing(),
    );
    let loader = loader_with(api);
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-gone"));
    let vm = wait_settled(&mut rx).await;

    // Error surfaced immediately, page still renderable from placeholders.
    assert_eq!(vm.error.as_deref(), Some(LOAD_ERROR));
    assert_eq!(vm.source, DataSource::Demo);
    assert!(vm.campaign.is_some());
    assert!(!vm.clips.is_empty());
    assert!(vm.history.is_some());

    // The fallback timer was aborted along with the attempt.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(loader.snapshot().error.as_deref(), Some(LOAD_ERROR));
}

#[tokio::test(start_paused = true)]
async fn clips_are_sorted_descending_by_views() {
    let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_millis(50)));
    let loader = loader_with(api);
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-sort"));
    let vm = wait_settled(&mut rx).await;

    assert_eq!(vm.clips.len(), 12);
    assert!(vm.clips.windows(2).all(|w| w[0].views >= w[1].views));
}

#[tokio::test(start_paused = true)]
async fn rapid_range_changes_apply_only_the_latest() {
    let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_millis(200)));
    let loader = loader_with(api);
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-range"));
    wait_settled(&mut rx).await;

    // 30 -> 7, then immediately 7 -> 90. The 7-day response resolves
    // after the 90-day request was issued and must be discarded.
    loader.select_time_range(TimeRange::WEEK);
    loader.select_time_range(TimeRange::QUARTER);

    let vm = wait_chart_idle(&mut rx).await;
    assert_eq!(vm.time_range, TimeRange::QUARTER);
    assert_eq!(vm.history.as_ref().unwrap().len(), 91);

    // Nothing pending may rewrite the chart afterwards.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(loader.snapshot().history.unwrap().len(), 91);
}

/// History succeeds once (the initial load) and fails on every refetch.
struct FlakyHistoryApi {
    inner: MockCampaignApi,
    history_calls: AtomicUsize,
}

impl FlakyHistoryApi {
    fn new() -> Self {
        Self {
            inner: MockCampaignApi::new().with_latency(Duration::from_millis(50)),
            history_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CampaignApi for FlakyHistoryApi {
    async fn get_campaign(&self, id: &str) -> DashboardResult<Campaign> {
        self.inner.get_campaign(id).await
    }

    async fn get_clips_by_campaign(&self, id: &str) -> DashboardResult<Vec<Clip>> {
        self.inner.get_clips_by_campaign(id).await
    }

    async fn get_campaign_view_history(
        &self,
        id: &str,
        days: u16,
    ) -> DashboardResult<CampaignViewHistory> {
        if self.history_calls.fetch_add(1, Ordering::SeqCst) > 0 {
            return Err(DashboardError::Api("history backend flapping".to_string()));
        }
        self.inner.get_campaign_view_history(id, days).await
    }
}

#[tokio::test(start_paused = true)]
async fn chart_refresh_failure_keeps_previous_history() {
    let loader = loader_with(Arc::new(FlakyHistoryApi::new()));
    let mut rx = loader.subscribe();

    loader.start(Some("cmp-flaky"));
    let vm = wait_settled(&mut rx).await;
    let initial_len = vm.history.as_ref().unwrap().len();
    assert_eq!(initial_len, 31);

    loader.select_time_range(TimeRange::WEEK);
    let vm = wait_chart_idle(&mut rx).await;

    // Best-effort refinement: stale chart data, no page-level error, no
    // demo fallback.
    assert_eq!(vm.history.as_ref().unwrap().len(), initial_len);
    assert!(vm.error.is_none());
    assert_eq!(vm.source, DataSource::Live);
}

#[tokio::test(start_paused = true)]
async fn restart_invalidates_previous_attempt() {
    let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_millis(1200)));
    let loader = loader_with(api);

    loader.start(Some("cmp-old"));
    // Remount without an id while the first attempt is still in flight.
    loader.start(None);

    let vm = loader.snapshot();
    assert_eq!(vm.source, DataSource::Demo);
    assert!(!vm.loading);

    // Neither the old timer nor the old fetch may disturb the new page.
    tokio::time::sleep(Duration::from_secs(10)).await;
    let vm = loader.snapshot();
    assert_eq!(vm.source, DataSource::Demo);
    assert!(vm.error.is_none());
}
