use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ModelError;
use crate::geo;
use crate::models::coordinate::Coordinate;
use crate::models::message::InboundEvent;
use crate::store::TouristState;

/// A straight-line walk from `start`, one step per tick.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    pub start: Coordinate,
    pub step_meters: f64,
    pub heading_deg: f64,
    pub interval: Duration,
    /// 0 walks forever.
    pub max_samples: u64,
}

impl WalkPlan {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            start: Coordinate::new(config.sim_start_lat, config.sim_start_lng)?,
            step_meters: config.sim_step_meters,
            heading_deg: config.sim_heading_deg,
            interval: Duration::from_millis(config.sim_interval_ms),
            max_samples: config.sim_max_samples,
        })
    }

    /// Fails when the plan's step or heading cannot produce a valid fix.
    pub fn position_at(&self, step: u64) -> Result<Coordinate, ModelError> {
        let distance = self.step_meters * step as f64;
        let heading = self.heading_deg.to_radians();
        geo::offset_meters(&self.start, distance * heading.cos(), distance * heading.sin())
    }
}

/// Emits simulated fixes until the plan is exhausted or the queue closes.
///
/// While the store reports tracking off (after a tourist exists) the walk is
/// paused rather than queued, so nothing stale is replayed on resume.
pub async fn start_simulator(
    plan: WalkPlan,
    events: mpsc::Sender<InboundEvent>,
    snapshots: watch::Receiver<Arc<TouristState>>,
) -> anyhow::Result<()> {
    info!(
        "Simulating walk from {} heading {:.0}° at {:.0}m per {:?}",
        plan.start, plan.heading_deg, plan.step_meters, plan.interval
    );

    let mut ticker = tokio::time::interval(plan.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut step: u64 = 0;

    loop {
        if plan.max_samples > 0 && step >= plan.max_samples {
            info!("Simulator finished after {} samples", step);
            return Ok(());
        }

        ticker.tick().await;

        let paused = {
            let snapshot = snapshots.borrow();
            !snapshot.is_tracking && snapshot.current_tourist.is_some()
        };
        if paused {
            debug!("Tracking off, simulator idle");
            continue;
        }

        let position = match plan.position_at(step) {
            Ok(position) => position,
            Err(e) => {
                warn!("Simulator stopped at sample #{}: {}", step, e);
                return Ok(());
            }
        };
        if events.send(InboundEvent::Sample(position)).await.is_err() {
            info!("Event queue closed, stopping simulator");
            return Ok(());
        }
        debug!("Simulated sample #{} at {}", step, position);
        step += 1;
    }
}
