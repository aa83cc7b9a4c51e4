use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownState;
use crate::error::CoreError;

/// Every observable transition in the driver produces an Event.
/// Consumers poll the event stream; the pure evaluation core emits nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TickerStarted {
        tick_interval_ms: u64,
        refresh_interval_ms: u64,
        at: DateTime<Utc>,
    },
    /// Fresh countdown evaluation for this tick.
    CountdownTick {
        state: CountdownState,
        at: DateTime<Utc>,
    },
    /// The countdown target changed; the next tick evaluates against it.
    TargetChanged {
        target: Option<String>,
        at: DateTime<Utc>,
    },
    /// A telemetry refresh is due, either on cadence or manually requested.
    /// Fetching is the consumer's job; the countdown clock is not touched.
    RefreshDue {
        manual: bool,
        at: DateTime<Utc>,
    },
    TickerStopped {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Serialize for line-oriented streaming output.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(CoreError::from)
    }
}
