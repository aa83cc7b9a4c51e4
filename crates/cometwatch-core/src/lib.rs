//! # Cometwatch Core Library
//!
//! This library provides the temporal-state logic for the Cometwatch comet
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any richer frontend being a
//! thin display layer over the same core library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A pure evaluation of `(target, now)` that a driver
//!   invokes at a fixed cadence; state is always re-derived, never ticked down
//! - **Proximity Bands**: Step-function classification of the object's
//!   distance into display emphasis categories
//! - **Driver**: A cancellable tokio loop that owns the tick and refresh
//!   cadences and publishes state via channels
//! - **Storage**: TOML-based configuration with a fallback chain for the
//!   countdown target
//!
//! ## Key Components
//!
//! - [`evaluate`]: Countdown evaluation at a given instant
//! - [`classify`]: Distance band classification
//! - [`Ticker`]: Scoped tick loop with deterministic teardown
//! - [`TrackerConfig`]: Tracker configuration management
//! - [`TelemetrySnapshot`]: Read-only model of the telemetry feed

pub mod countdown;
pub mod proximity;
pub mod format;
pub mod telemetry;
pub mod config;
pub mod events;
pub mod driver;
pub mod error;

pub use countdown::{
    evaluate, evaluate_opt, CountdownPhase, CountdownState, DeltaBreakdown, TimeTarget,
};
pub use proximity::{classify, classify_str, IntensityTier, ProximityCategory};
pub use telemetry::TelemetrySnapshot;
pub use config::TrackerConfig;
pub use events::Event;
pub use driver::{Ticker, TickerSettings};
pub use error::{ConfigError, CoreError, TelemetryError};
