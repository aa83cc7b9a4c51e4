pub mod classify;
pub mod config;
pub mod countdown;
pub mod status;
pub mod watch;

use chrono::{DateTime, Utc};
use cometwatch_core::TimeTarget;

/// Resolve the `--now` override, defaulting to the current instant.
pub fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => TimeTarget::new(raw)
            .parse()
            .ok_or_else(|| format!("'{raw}' is not a valid timestamp").into()),
        None => Ok(Utc::now()),
    }
}
