use std::path::PathBuf;

use clap::Args;
use cometwatch_core::{
    classify_str, evaluate_opt, format, CountdownPhase, CountdownState, IntensityTier,
    ProximityCategory, TelemetrySnapshot, TrackerConfig,
};
use serde::Serialize;

#[derive(Args)]
pub struct StatusArgs {
    /// Read the telemetry snapshot from this JSON file instead of using the
    /// built-in fallback record
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Evaluate at this instant instead of the current time
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    designation: Option<String>,
    name: Option<String>,
    status: Option<String>,
    source: Option<String>,
    countdown: CountdownView,
    proximity: ProximityView,
    last_updated: String,
    next_update: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CountdownView {
    label: String,
    target: Option<String>,
    state: CountdownState,
    display: Option<String>,
    headline: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProximityView {
    distance: String,
    category: ProximityCategory,
    label: &'static str,
    intensity: IntensityTier,
}

/// Compose the countdown banner the way the tracker pill renders it.
fn headline(label: &str, state: CountdownState) -> String {
    match state {
        CountdownState::Active { phase: CountdownPhase::Upcoming, delta } => {
            format!("{label}: {}", format::format_delta(&delta))
        }
        CountdownState::Active { phase: CountdownPhase::Elapsed, .. } => {
            format!("{label} reached")
        }
        CountdownState::Unset | CountdownState::Invalid => "Date not set".to_string(),
    }
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = match &args.snapshot {
        Some(path) => TelemetrySnapshot::from_file(path)?,
        None => TelemetrySnapshot::placeholder(),
    };
    let config = TrackerConfig::load_or_default();
    let now = super::resolve_now(args.now.as_deref())?;

    let target = config.resolve_target(Some(&snapshot));
    let state = evaluate_opt(target.as_ref(), now);
    let category = classify_str(snapshot.distance_from_earth());

    let label = config.countdown.label.clone();
    let view = StatusView {
        designation: snapshot.designation.clone(),
        name: snapshot.name.clone(),
        status: snapshot.status.clone(),
        source: snapshot.source.clone(),
        countdown: CountdownView {
            headline: headline(&label, state),
            label,
            target: target.map(|t| t.as_str().to_string()),
            state,
            display: state.delta().map(|delta| format::format_delta(&delta)),
        },
        proximity: ProximityView {
            distance: snapshot.distance_or_placeholder().to_string(),
            category,
            label: category.label(),
            intensity: category.intensity(),
        },
        last_updated: format::format_timestamp_opt(snapshot.last_updated.as_deref()),
        next_update: format::format_timestamp_opt(snapshot.next_update.as_deref()),
    };

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
