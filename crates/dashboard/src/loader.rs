//! Campaign data-loading orchestration: the ordered fetch sequence, the
//! fallback timer it races against, and the stale-response guards that
//! keep late arrivals from corrupting an already-settled snapshot.

use std::sync::Arc;
use std::time::Duration;

use clipmore_api_client::CampaignApi;
use clipmore_core::types::TimeRange;
use clipmore_core::DashboardResult;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::demo::DemoDataGenerator;
use crate::time_range::TimeRangeController;
use crate::viewmodel::{DataSource, ViewModel};

/// How long the initial load may run before placeholder data takes over.
pub const DEFAULT_FALLBACK: Duration = Duration::from_millis(3000);

/// Error banner shown when the initial fetch sequence fails.
pub const LOAD_ERROR: &str =
    "Unable to load campaign information. The campaign may be private or no longer exist.";

/// Drives one campaign dashboard: owns the ViewModel, runs load attempts,
/// and applies time-range refetches. All mutation goes through here; the
/// presentation layer only observes snapshots.
pub struct CampaignDataLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    api: Arc<dyn CampaignApi>,
    fallback_after: Duration,
    state: Mutex<LoaderState>,
    vm_tx: watch::Sender<ViewModel>,
}

struct LoaderState {
    vm: ViewModel,
    campaign_id: Option<String>,
    /// Generation counter for load attempts. Results tagged with an older
    /// attempt are discarded; this, not timer cancellation, is what makes
    /// the success/timer/error race safe.
    attempt: u64,
    /// Whether the current attempt has reached a terminal outcome.
    settled: bool,
    ranges: TimeRangeController,
    fallback_timer: Option<JoinHandle<()>>,
}

impl CampaignDataLoader {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        Self::with_fallback(api, DEFAULT_FALLBACK, TimeRange::default())
    }

    pub fn with_fallback(
        api: Arc<dyn CampaignApi>,
        fallback_after: Duration,
        initial_range: TimeRange,
    ) -> Self {
        let vm = ViewModel::initial(initial_range);
        let (vm_tx, _) = watch::channel(vm.clone());
        Self {
            inner: Arc::new(LoaderInner {
                api,
                fallback_after,
                state: Mutex::new(LoaderState {
                    vm,
                    campaign_id: None,
                    attempt: 0,
                    settled: false,
                    ranges: TimeRangeController::new(initial_range),
                    fallback_timer: None,
                }),
                vm_tx,
            }),
        }
    }

    /// Observe ViewModel snapshots. Each received value is one consistent
    /// state; renderers should render from a single borrow per pass.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.inner.vm_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ViewModel {
        self.inner.vm_tx.borrow().clone()
    }

    /// Begin a load attempt. Without an id the snapshot is populated from
    /// placeholder data before this returns; no network path is attempted
    /// and `loading` never becomes true.
    ///
    /// With an id, a loading snapshot is published synchronously, then the
    /// fetch sequence (campaign, clips, history) and the fallback timer
    /// race in background tasks. Calling `start` again invalidates any
    /// outcome still in flight from the previous attempt.
    ///
    /// Must be called within a tokio runtime when an id is given.
    pub fn start(&self, campaign_id: Option<&str>) {
        let mut state = self.inner.state.lock();
        state.attempt += 1;
        let attempt = state.attempt;
        state.settled = false;
        if let Some(timer) = state.fallback_timer.take() {
            timer.abort();
        }
        state.campaign_id = campaign_id.map(str::to_owned);

        let range = state.ranges.current();

        let Some(id) = campaign_id else {
            state.vm = DemoDataGenerator::view_model(None, range);
            state.settled = true;
            info!("No campaign id supplied, rendering placeholder data");
            self.inner.publish(&state);
            return;
        };

        state.vm = ViewModel::initial(range);
        state.vm.loading = true;
        self.inner.publish(&state);

        info!(campaign_id = %id, attempt, "Starting campaign load");

        let timer_inner = self.inner.clone();
        state.fallback_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timer_inner.fallback_after).await;
            timer_inner.fallback_to_demo(attempt);
        }));
        drop(state);

        let fetch_inner = self.inner.clone();
        let id = id.to_owned();
        tokio::spawn(async move {
            if let Err(e) = fetch_inner.fetch_sequence(attempt, &id).await {
                error!(campaign_id = %id, error = %e, "Campaign fetch sequence failed");
                fetch_inner.fail_to_demo(attempt, LOAD_ERROR);
            }
        });
    }

    /// Switch the reporting window and refetch history for it. The page
    /// keeps rendering; only the chart-local loading flag is raised. A
    /// failed refetch leaves the previous history in place and is logged,
    /// never surfaced as a page error.
    pub fn select_time_range(&self, range: TimeRange) {
        let (attempt, token, id) = {
            let mut state = self.inner.state.lock();
            let token = state.ranges.begin(range);
            state.vm.time_range = range;
            state.vm.chart_loading = true;
            self.inner.publish(&state);
            (state.attempt, token, state.campaign_id.clone())
        };

        let Some(id) = id else {
            // Demo-only page: regenerate placeholder history locally.
            let mut state = self.inner.state.lock();
            if state.attempt == attempt && state.ranges.is_current(token) {
                state.vm.history = Some(DemoDataGenerator::history(range));
                state.vm.chart_loading = false;
                self.inner.publish(&state);
            }
            return;
        };

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let result = inner
                .api
                .get_campaign_view_history(&id, range.as_days())
                .await;

            let mut state = inner.state.lock();
            if state.attempt != attempt {
                debug!(days = range.as_days(), "Discarding history for a stale load attempt");
                return;
            }
            if !state.ranges.is_current(token) {
                debug!(days = range.as_days(), "Discarding superseded history response");
                return;
            }

            match result {
                Ok(history) => {
                    state.vm.history = Some(history);
                    state.vm.chart_loading = false;
                    inner.publish(&state);
                }
                Err(e) => {
                    warn!(
                        campaign_id = %id,
                        days = range.as_days(),
                        error = %e,
                        "Failed to refresh campaign history, keeping previous data"
                    );
                    state.vm.chart_loading = false;
                    inner.publish(&state);
                }
            }
        });
    }

    /// Unmount: abort the fallback timer and invalidate the current
    /// attempt so any outstanding result is ignored.
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        state.attempt += 1;
        state.settled = true;
        if let Some(timer) = state.fallback_timer.take() {
            timer.abort();
        }
    }
}

impl LoaderInner {
    fn publish(&self, state: &LoaderState) {
        self.vm_tx.send_replace(state.vm.clone());
    }

    /// The ordered fetch sequence: campaign, clips, then history for the
    /// currently selected range. Applied as one atomic snapshot update on
    /// success. Errors propagate to the caller, which falls back to
    /// placeholder data.
    async fn fetch_sequence(&self, attempt: u64, id: &str) -> DashboardResult<()> {
        let campaign = self.api.get_campaign(id).await?;
        let mut clips = self.api.get_clips_by_campaign(id).await?;
        clips.sort_by(|a, b| b.views.cmp(&a.views));

        // The initial history fetch goes through the same request
        // sequencing as user-driven range changes, so a selection made
        // while the page is still loading wins over this fetch.
        let (range, token) = {
            let mut state = self.state.lock();
            if state.attempt != attempt || state.settled {
                debug!(campaign_id = %id, attempt, "Load attempt superseded mid-sequence");
                return Ok(());
            }
            let range = state.ranges.current();
            (range, state.ranges.begin(range))
        };

        let history = self
            .api
            .get_campaign_view_history(id, range.as_days())
            .await?;

        let mut state = self.state.lock();
        if state.attempt != attempt || state.settled {
            debug!(
                campaign_id = %id,
                attempt,
                "Discarding late fetch result for a settled attempt"
            );
            return Ok(());
        }
        if let Some(timer) = state.fallback_timer.take() {
            timer.abort();
        }
        state.settled = true;
        state.vm.campaign = Some(campaign);
        state.vm.clips = clips;
        if state.ranges.is_current(token) {
            state.vm.history = Some(history);
            state.vm.chart_loading = false;
        }
        state.vm.time_range = state.ranges.current();
        state.vm.loading = false;
        state.vm.error = None;
        state.vm.notice = None;
        state.vm.source = DataSource::Live;
        info!(campaign_id = %id, attempt, "Campaign load complete");
        self.publish(&state);
        Ok(())
    }

    /// Fallback timer outcome: the fetch sequence is still running past
    /// the deadline, so the whole snapshot is replaced with placeholder
    /// data and an informational notice. Not an error.
    fn fallback_to_demo(&self, attempt: u64) {
        let mut state = self.state.lock();
        if state.attempt != attempt || state.settled {
            return;
        }
        state.settled = true;
        state.fallback_timer = None;
        let range = state.ranges.current();
        let id = state.campaign_id.clone();
        state.vm = DemoDataGenerator::view_model(id.as_deref(), range);
        info!(attempt, "Upstream slow, switching to placeholder data");
        self.publish(&state);
    }

    /// Fetch error outcome: surface the error banner immediately and fill
    /// whatever is still missing from placeholder data, so the page is
    /// never empty. Content that already arrived is preserved.
    fn fail_to_demo(&self, attempt: u64, message: &str) {
        let mut state = self.state.lock();
        if state.attempt != attempt || state.settled {
            return;
        }
        if let Some(timer) = state.fallback_timer.take() {
            timer.abort();
        }
        state.settled = true;
        let range = state.ranges.current();
        let id = state.campaign_id.clone();

        if state.vm.campaign.is_none() {
            state.vm.campaign = Some(DemoDataGenerator::campaign(id.as_deref()));
            state.vm.source = DataSource::Demo;
        }
        if state.vm.clips.is_empty() {
            let mut clips = DemoDataGenerator::clips();
            clips.sort_by(|a, b| b.views.cmp(&a.views));
            state.vm.clips = clips;
        }
        if state.vm.history.is_none() {
            state.vm.history = Some(DemoDataGenerator::history(range));
        }
        state.vm.error = Some(message.to_string());
        state.vm.notice = Some(crate::demo::DEMO_NOTICE.to_string());
        state.vm.loading = false;
        state.vm.chart_loading = false;
        self.publish(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DEMO_CAMPAIGN_ID;
    use clipmore_api_client::MockCampaignApi;

    #[tokio::test]
    async fn test_no_id_populates_demo_synchronously() {
        let api = Arc::new(MockCampaignApi::new());
        let loader = CampaignDataLoader::new(api);

        loader.start(None);

        // Already settled; no loading flicker ever published.
        let vm = loader.snapshot();
        assert!(!vm.loading);
        assert_eq!(vm.source, DataSource::Demo);
        assert_eq!(vm.campaign.unwrap().id, DEMO_CAMPAIGN_ID);
        assert_eq!(vm.clips.len(), 12);
        assert!(vm.history.is_some());
        assert!(vm.error.is_none());
    }

    #[tokio::test]
    async fn test_demo_page_range_change_regenerates_history() {
        let api = Arc::new(MockCampaignApi::new());
        let loader = CampaignDataLoader::new(api);
        loader.start(None);

        loader.select_time_range(TimeRange::WEEK);

        let vm = loader.snapshot();
        assert!(!vm.chart_loading);
        assert_eq!(vm.time_range, TimeRange::WEEK);
        assert_eq!(vm.history.unwrap().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_fallback() {
        let api = Arc::new(MockCampaignApi::new().with_latency(Duration::from_secs(60)));
        let loader = CampaignDataLoader::with_fallback(
            api,
            Duration::from_millis(3000),
            TimeRange::default(),
        );

        loader.start(Some("cmp-1"));
        loader.shutdown();

        tokio::time::sleep(Duration::from_secs(10)).await;

        // Neither the timer nor the fetch may touch the snapshot of an
        // unmounted page.
        let vm = loader.snapshot();
        assert!(vm.campaign.is_none());
        assert!(vm.notice.is_none());
    }
}
