use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::geo;
use crate::models::alert::{Alert, AlertKind};
use crate::models::coordinate::Coordinate;
use crate::store::TouristState;

/// Decides whether a location sample puts the active tourist outside their
/// geofence.
///
/// Every qualifying sample produces its own breach alert unless a cooldown
/// is configured. With a cooldown, a second breach for the same tourist is
/// dropped until the window since the last emitted breach has passed.
#[derive(Debug, Default)]
pub struct GeofenceMonitor {
    cooldown: Option<Duration>,
    last_breach: HashMap<String, DateTime<Utc>>,
}

impl GeofenceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero or negative cooldown disables suppression.
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown: (cooldown > Duration::zero()).then_some(cooldown),
            last_breach: HashMap::new(),
        }
    }

    pub fn evaluate(
        &mut self,
        state: &TouristState,
        sample: &Coordinate,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        if !state.is_tracking || !state.geofence_enabled {
            return None;
        }
        let tourist = state.current_tourist.as_ref()?;

        let fence = &tourist.geofence;
        let distance = geo::distance_meters(sample, fence.center());
        if distance <= fence.radius() {
            debug!(
                "Tourist {} inside geofence ({:.1}m of {:.0}m)",
                tourist.id,
                distance,
                fence.radius()
            );
            return None;
        }

        if let (Some(cooldown), Some(last)) = (self.cooldown, self.last_breach.get(&tourist.id)) {
            if now - *last < cooldown {
                debug!("Breach for {} suppressed by cooldown", tourist.id);
                return None;
            }
        }

        warn!(
            "Geofence breach: tourist {} is {:.1}m from center (radius {:.0}m)",
            tourist.id,
            distance,
            fence.radius()
        );
        self.last_breach.insert(tourist.id.clone(), now);
        Some(Alert::of_kind(tourist.id.clone(), AlertKind::GeofenceBreach, now))
    }
}
