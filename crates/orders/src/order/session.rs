//! The presentation-facing view session.
//!
//! Owns the lifecycle around the aggregator: the `Pending | NotFound | Ready`
//! state machine, the map-requested switch, and the staleness guard that
//! keeps a slow in-flight load from overwriting the result of a newer one.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error};

use velocart_core::OrderId;

use super::aggregator::OrderAggregator;
use super::tracking::TrackingRoute;
use super::view::OrderDetailView;

/// The only states the presentation layer ever observes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// No result yet. Also the terminal state after a root transport fault;
    /// a fresh `load` is the retry path.
    #[default]
    Pending,
    /// The identifier resolves to no order record.
    NotFound,
    /// The assembled view.
    Ready(OrderDetailView),
}

struct SessionInner {
    aggregator: OrderAggregator,
    state: Mutex<SessionState>,
    generation: AtomicU64,
}

#[derive(Default)]
struct SessionState {
    load: LoadState,
    map_requested: bool,
}

/// One order-detail view's session.
///
/// Cheaply cloneable; clones share state, so a consumer can hold one handle
/// for loading and another for rendering.
#[derive(Clone)]
pub struct OrderSession {
    inner: Arc<SessionInner>,
}

impl OrderSession {
    /// Create a session over an aggregator.
    #[must_use]
    pub fn new(aggregator: OrderAggregator) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                aggregator,
                state: Mutex::new(SessionState::default()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// The current presentation state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// Load (or reload) the view for `id`.
    ///
    /// Resets the state to `Pending` and clears the tracking switch, runs the
    /// aggregation, then commits the outcome only if no newer `load` started
    /// in the meantime. A root transport fault is logged and leaves the state
    /// `Pending`.
    pub async fn load(&self, id: &OrderId) {
        let my_generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock();
            state.load = LoadState::Pending;
            state.map_requested = false;
        }

        let outcome = self.inner.aggregator.load(id).await;

        if self.inner.generation.load(Ordering::SeqCst) != my_generation {
            debug!(order_id = %id, "discarding superseded load result");
            return;
        }
        let mut state = self.lock();
        match outcome {
            Ok(Some(view)) => state.load = LoadState::Ready(view),
            Ok(None) => state.load = LoadState::NotFound,
            Err(fault) => {
                // The state stays Pending; a fresh load retries.
                error!(order_id = %id, %fault, "order load failed");
            }
        }
    }

    /// Whether a tracking route could currently be shown.
    #[must_use]
    pub fn tracking_offerable(&self) -> bool {
        match &self.lock().load {
            LoadState::Ready(view) => TrackingRoute::for_view(view).is_some(),
            _ => false,
        }
    }

    /// Flip the map-requested switch on, if a route is offerable.
    ///
    /// Returns whether the switch is now on.
    pub fn request_tracking(&self) -> bool {
        let mut state = self.lock();
        let offerable = match &state.load {
            LoadState::Ready(view) => TrackingRoute::for_view(view).is_some(),
            _ => false,
        };
        if offerable {
            state.map_requested = true;
        }
        state.map_requested
    }

    /// The route to hand the map widget: present only when the user asked
    /// for tracking and a route is still offerable.
    #[must_use]
    pub fn tracking_route(&self) -> Option<TrackingRoute> {
        let state = self.lock();
        if !state.map_requested {
            return None;
        }
        match &state.load {
            LoadState::Ready(view) => TrackingRoute::for_view(view),
            _ => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        match self.inner.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
