use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::models::alert::Alert;
use crate::models::coordinate::Coordinate;
use crate::models::message::InboundEvent;
use crate::models::tourist::Tourist;
use crate::monitor::GeofenceMonitor;
use crate::store::{Action, TouristState, TouristStore};

/// Who to enroll when the first fix arrives and no tourist is set yet.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub tourist_id: String,
    pub name: String,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event changed state without raising an alert.
    Applied,
    /// An alert was appended; carries its id.
    Alerted(String),
    /// A sample arrived while tracking was off and was dropped.
    Discarded,
    /// Nothing to act on (no current tourist).
    Ignored,
}

/// Owns the store and runs every inbound event through it, one at a time.
pub struct EventProcessor {
    store: TouristStore,
    monitor: GeofenceMonitor,
    enrollment: Option<Enrollment>,
}

impl EventProcessor {
    pub fn new(store: TouristStore, monitor: GeofenceMonitor, enrollment: Option<Enrollment>) -> Self {
        Self {
            store,
            monitor,
            enrollment,
        }
    }

    pub fn state(&self) -> &TouristState {
        self.store.state()
    }

    pub fn handle(&mut self, event: InboundEvent) -> Outcome {
        match event {
            InboundEvent::Sample(coordinate) => self.handle_sample(coordinate),
            InboundEvent::Action(action) => {
                info!("Applying action {}", action.tag());
                self.store.dispatch(action);
                Outcome::Applied
            }
            InboundEvent::Trigger { kind, message } => {
                let Some(tourist) = self.store.state().current_tourist.as_ref() else {
                    info!("Ignored {} trigger: no current tourist", kind.as_str());
                    return Outcome::Ignored;
                };
                let message = message.unwrap_or_else(|| kind.default_message().to_string());
                let alert = Alert::new(
                    tourist.id.clone(),
                    kind,
                    message,
                    kind.default_severity(),
                    self.store.now(),
                );
                info!("Raising {} alert {} for {}", kind.as_str(), alert.id(), alert.tourist_id());
                self.push_alert(alert)
            }
        }
    }

    fn handle_sample(&mut self, coordinate: Coordinate) -> Outcome {
        if self.store.state().current_tourist.is_none() {
            let Some(enrollment) = &self.enrollment else {
                debug!("Sample {} ignored: no current tourist", coordinate);
                return Outcome::Ignored;
            };
            match Tourist::enroll(
                enrollment.tourist_id.clone(),
                enrollment.name.clone(),
                coordinate,
                enrollment.radius_meters,
                self.store.now(),
            ) {
                Ok(tourist) => {
                    info!(
                        "Enrolled tourist {} with {:.0}m geofence at {}",
                        tourist.id, enrollment.radius_meters, coordinate
                    );
                    self.store.dispatch(Action::SetCurrentTourist(tourist));
                }
                Err(e) => {
                    warn!("Cannot enroll tourist: {}", e);
                    return Outcome::Ignored;
                }
            }
        }

        if !self.store.state().is_tracking {
            debug!("Tracking off, discarding sample {}", coordinate);
            return Outcome::Discarded;
        }

        self.store.dispatch(Action::UpdateLocation(coordinate));

        let now = self.store.now();
        match self.monitor.evaluate(self.store.state(), &coordinate, now) {
            Some(alert) => self.push_alert(alert),
            None => Outcome::Applied,
        }
    }

    fn push_alert(&mut self, alert: Alert) -> Outcome {
        let id = alert.id().to_string();
        self.store.dispatch(Action::AddAlert(alert));
        Outcome::Alerted(id)
    }

    /// Drains `events` until every sender is gone, publishing a snapshot after
    /// each event. Returns the processor so the caller can inspect final state.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<InboundEvent>,
        snapshots: watch::Sender<Arc<TouristState>>,
    ) -> Self {
        info!("Event processor started");
        let mut processed: u64 = 0;

        while let Some(event) = events.recv().await {
            let outcome = self.handle(event);
            processed += 1;
            debug!("Event #{} -> {:?}", processed, outcome);

            // No receivers left is fine; the store is still authoritative.
            let _ = snapshots.send(Arc::new(self.store.state().clone()));
        }

        info!("Event queue closed after {} events", processed);
        self
    }
}
