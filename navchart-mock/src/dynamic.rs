use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use navchart_core::{FundId, MetricKind, NavchartError, RawPoint, SeriesSource};

/// Instruction for how a call should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(NavchartError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<(FundId, MetricKind), MockBehavior<Vec<RawPoint>>>,
    requests: Vec<(FundId, MetricKind)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockController {
    /// Set the behavior of `series` calls for one fund and metric.
    pub async fn set_behavior(
        &self,
        fund: FundId,
        metric: MetricKind,
        behavior: MockBehavior<Vec<RawPoint>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert((fund, metric), behavior);
    }

    /// Make both metrics of `fund` return the given points.
    pub async fn set_series(&self, fund: &FundId, nav: Vec<RawPoint>, yield_pct: Vec<RawPoint>) {
        let mut guard = self.state.lock().await;
        guard
            .rules
            .insert((fund.clone(), MetricKind::Nav), MockBehavior::Return(nav));
        guard.rules.insert(
            (fund.clone(), MetricKind::Yield),
            MockBehavior::Return(yield_pct),
        );
    }

    /// Number of `series` calls so far, including hanging ones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of the request log in call order.
    pub async fn requests(&self) -> Vec<(FundId, MetricKind)> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// A fund/metric pair without a rule answers with an empty series.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn SeriesSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            calls: Arc::clone(&calls),
        };
        let me = Arc::new(Self { name, state, calls });
        (me as Arc<dyn SeriesSource>, controller)
    }
}

#[async_trait]
impl SeriesSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn series(
        &self,
        fund: &FundId,
        metric: MetricKind,
    ) -> Result<Vec<RawPoint>, NavchartError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // snapshot the rule without holding the lock across the hang
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push((fund.clone(), metric));
            guard.rules.get(&(fund.clone(), metric)).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(points)) => Ok(points),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Ok(Vec::new()),
        }
    }
}
