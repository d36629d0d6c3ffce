use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use tourist_safety_monitor::config::{AppConfig, SourceKind};
use tourist_safety_monitor::models::digital_id::DigitalId;
use tourist_safety_monitor::models::language::Language;
use tourist_safety_monitor::models::tourist::demo_roster;
use tourist_safety_monitor::monitor::GeofenceMonitor;
use tourist_safety_monitor::processor::{Enrollment, EventProcessor};
use tourist_safety_monitor::simulator::{self, WalkPlan};
use tourist_safety_monitor::stdin;
use tourist_safety_monitor::store::summary::{DashboardSummary, MapView};
use tourist_safety_monitor::store::{Action, TouristStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Tourist Safety Monitor ({:?} source)...", config.location_source);

    // Initial session state
    let mut store = TouristStore::default();
    store.dispatch(Action::SetLanguage(Language::from_code(config.default_language)));
    if !config.geofence_enabled {
        store.dispatch(Action::ToggleGeofence);
    }
    if config.tracking_on_start {
        store.dispatch(Action::ToggleTracking);
    }
    if config.seed_demo_roster {
        let roster = demo_roster(store.now());
        info!("Seeding admin roster with {} demo tourists", roster.len());
        store.dispatch(Action::SetTourists(roster));
    }

    debug!("Digital ID QR payload: {}", DigitalId::demo().qr_payload()?);

    let cooldown = chrono::Duration::from_std(std::time::Duration::from_secs(
        config.geofence_breach_cooldown_secs,
    ))?;
    let monitor = GeofenceMonitor::with_cooldown(cooldown);
    let enrollment = Enrollment {
        tourist_id: config.tourist_id.clone(),
        name: config.tourist_name.clone(),
        radius_meters: config.geofence_radius_meters,
    };
    let processor = EventProcessor::new(store, monitor, Some(enrollment));

    let (events_tx, events_rx) = mpsc::channel(config.event_queue_capacity);
    let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(processor.state().clone()));

    // Start the location source
    let mut source = match config.location_source {
        SourceKind::Simulated => {
            let plan = WalkPlan::from_config(&config)?;
            tokio::spawn(simulator::start_simulator(plan, events_tx, snapshot_rx.clone()))
        }
        SourceKind::Stdin => tokio::spawn(stdin::start_stdin_source(events_tx)),
    };

    let processor_task = tokio::spawn(processor.run(events_rx, snapshot_tx));

    tokio::select! {
        result = &mut source => {
            match result {
                Ok(Ok(())) => info!("Location source finished"),
                Ok(Err(e)) => warn!("Location source failed: {}", e),
                Err(e) => warn!("Location source task panicked: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            source.abort();
        }
    }

    // Dropping the source closes the queue; the processor drains what is left.
    let processor = processor_task.await?;
    let state = processor.state();

    let summary = DashboardSummary::from_state(state);
    info!(
        "Session ended: {} alerts ({} high, {} medium, {} low), {} tourists on roster",
        summary.total_alerts,
        summary.high_alerts,
        summary.medium_alerts,
        summary.low_alerts,
        summary.active_tourists
    );
    if let Some(tourist) = &state.current_tourist {
        info!(
            "Tourist {} last seen at {} ({})",
            tourist.id,
            tourist.coordinates,
            tourist.last_seen.to_rfc3339()
        );
    }
    debug!("Map view: {}", serde_json::to_string(&MapView::from_state(state))?);

    Ok(())
}
