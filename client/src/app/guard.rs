//! Loading flag bookkeeping.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::app::events::{AppEvent, EventBus};
use crate::app::state::AppState;

/// Counts one action as in flight for as long as it lives.
///
/// The counter is decremented in `Drop`, so the loading flag also clears when
/// the action returns early or unwinds.
pub(crate) struct LoadingGuard {
    state: Arc<RwLock<AppState>>,
    events: EventBus,
}

impl LoadingGuard {
    pub(crate) fn new(state: Arc<RwLock<AppState>>, events: EventBus) -> Self {
        let started = {
            let mut state = state.write();
            state.in_flight += 1;
            state.in_flight == 1
        };
        if started {
            events.emit(AppEvent::Loading(true));
        }
        Self { state, events }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let settled = {
            let mut state = self.state.write();
            state.in_flight = state.in_flight.saturating_sub(1);
            state.in_flight == 0
        };
        if settled {
            self.events.emit(AppEvent::Loading(false));
        }
    }
}
