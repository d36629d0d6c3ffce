use anyhow::{bail, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::models::language::LanguageCode;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Simulated,
    Stdin,
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "sim" => Ok(Self::Simulated),
            "stdin" => Ok(Self::Stdin),
            other => bail!("LOCATION_SOURCE must be 'simulated' or 'stdin' (got '{}')", other),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub location_source: SourceKind,
    pub event_queue_capacity: usize,
    pub tourist_id: String,
    pub tourist_name: String,
    pub geofence_radius_meters: f64,
    pub geofence_enabled: bool,
    pub tracking_on_start: bool,
    pub geofence_breach_cooldown_secs: u64,
    pub default_language: LanguageCode,
    pub seed_demo_roster: bool,
    pub sim_start_lat: f64,
    pub sim_start_lng: f64,
    pub sim_interval_ms: u64,
    pub sim_step_meters: f64,
    pub sim_heading_deg: f64,
    pub sim_max_samples: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let log_level = string_or("LOG_LEVEL", "info");
        let location_source = string_or("LOCATION_SOURCE", "simulated").parse::<SourceKind>()?;
        let event_queue_capacity = parse_or(&lookup, "EVENT_QUEUE_CAPACITY", 100usize);
        let tourist_id = string_or("TOURIST_ID", "tourist_main");
        let tourist_name = string_or("TOURIST_NAME", "John Doe");
        let geofence_radius_meters = parse_or(&lookup, "GEOFENCE_RADIUS_METERS", 200.0);
        let geofence_enabled = parse_bool_or(&lookup, "GEOFENCE_ENABLED", true);
        let tracking_on_start = parse_bool_or(&lookup, "TRACKING_ON_START", true);
        let geofence_breach_cooldown_secs = parse_or(&lookup, "GEOFENCE_BREACH_COOLDOWN_SECS", 0u64);
        let default_language = string_or("DEFAULT_LANGUAGE", "en")
            .parse::<LanguageCode>()
            .map_err(anyhow::Error::msg)?;
        let seed_demo_roster = parse_bool_or(&lookup, "SEED_DEMO_ROSTER", true);
        let sim_start_lat = parse_or(&lookup, "SIM_START_LAT", 26.1445);
        let sim_start_lng = parse_or(&lookup, "SIM_START_LNG", 91.7362);
        let sim_interval_ms = parse_or(&lookup, "SIM_INTERVAL_MS", 1000u64);
        let sim_step_meters = parse_or(&lookup, "SIM_STEP_METERS", 40.0);
        let sim_heading_deg = parse_or(&lookup, "SIM_HEADING_DEG", 45.0);
        let sim_max_samples = parse_or(&lookup, "SIM_MAX_SAMPLES", 20u64);

        let config = Self {
            log_level,
            location_source,
            event_queue_capacity,
            tourist_id,
            tourist_name,
            geofence_radius_meters,
            geofence_enabled,
            tracking_on_start,
            geofence_breach_cooldown_secs,
            default_language,
            seed_demo_roster,
            sim_start_lat,
            sim_start_lng,
            sim_interval_ms,
            sim_step_meters,
            sim_heading_deg,
            sim_max_samples,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.geofence_radius_meters.is_finite() || self.geofence_radius_meters <= 0.0 {
            bail!(
                "GEOFENCE_RADIUS_METERS must be positive (got {})",
                self.geofence_radius_meters
            );
        }
        if self.event_queue_capacity == 0 {
            bail!("EVENT_QUEUE_CAPACITY must be at least 1");
        }
        if self.sim_interval_ms == 0 {
            bail!("SIM_INTERVAL_MS must be at least 1");
        }
        if !(-90.0..=90.0).contains(&self.sim_start_lat)
            || !(-180.0..=180.0).contains(&self.sim_start_lng)
        {
            bail!(
                "SIM_START_LAT/SIM_START_LNG out of range ({}, {})",
                self.sim_start_lat,
                self.sim_start_lng
            );
        }
        if !self.sim_step_meters.is_finite() || !self.sim_heading_deg.is_finite() {
            bail!(
                "SIM_STEP_METERS and SIM_HEADING_DEG must be finite (got {}, {})",
                self.sim_step_meters,
                self.sim_heading_deg
            );
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
