pub mod action;
pub mod state;
pub mod summary;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::DispatchError;
pub use action::Action;
pub use state::{reduce, TouristState};

/// Source of the `now` timestamp fed into transitions.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Owns the session state. All mutation goes through [`TouristStore::dispatch`].
pub struct TouristStore {
    state: TouristState,
    clock: Box<dyn Clock>,
}

impl TouristStore {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_state(TouristState::default(), clock)
    }

    pub fn with_state(state: TouristState, clock: Box<dyn Clock>) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &TouristState {
        &self.state
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn dispatch(&mut self, action: Action) {
        let now = self.clock.now();
        debug!("Dispatching {}", action.tag());
        let prior = std::mem::take(&mut self.state);
        self.state = reduce(prior, action, now);
    }

    /// Parses and applies a JSON action. Nothing is applied on error.
    pub fn dispatch_json(&mut self, raw: &str) -> Result<(), DispatchError> {
        let action = Action::from_json(raw)?;
        self.dispatch(action);
        Ok(())
    }
}

impl Default for TouristStore {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ManualClock;
    use super::*;
    use crate::models::coordinate::Coordinate;
    use crate::models::tourist::Tourist;

    #[test]
    fn test_dispatch_uses_injected_clock() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let mut store = TouristStore::new(Box::new(clock.clone()));

        let c = Coordinate::new(26.1445, 91.7362).unwrap();
        store.dispatch(Action::SetCurrentTourist(
            Tourist::enroll("t1", "John Doe", c, 200.0, start).unwrap(),
        ));

        clock.advance(chrono::Duration::seconds(10));
        store.dispatch(Action::UpdateLocation(Coordinate::new(26.15, 91.74).unwrap()));

        assert_eq!(
            store.state().current_tourist.as_ref().unwrap().last_seen,
            start + chrono::Duration::seconds(10)
        );
    }

    #[test]
    fn test_rejected_json_leaves_state_untouched() {
        let mut store = TouristStore::default();
        let before = store.state().clone();

        assert!(store.dispatch_json(r#"{"type": "RESET"}"#).is_err());
        assert!(store.dispatch_json(r#"{"type": "ADD_ALERT", "payload": {}}"#).is_err());
        assert_eq!(store.state(), &before);

        store.dispatch_json(r#"{"type": "TOGGLE_TRACKING"}"#).unwrap();
        assert!(store.state().is_tracking);
    }
}
