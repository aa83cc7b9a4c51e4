//! Tick driver for the countdown engine.
//!
//! The engine is pure; this module owns the cadence. A [`Ticker`] is a scoped
//! acquisition of the evaluation loop: spawning returns a handle, stopping
//! (or dropping) the handle cancels the loop, and [`Ticker::stop`] does not
//! return until the task has wound down. After `stop` resolves, no further
//! tick or event is delivered anywhere.
//!
//! The telemetry refresh prompt runs on its own interval inside the same
//! loop. It only ever emits [`Event::RefreshDue`]; it cannot delay or reset
//! the countdown cadence, and fetching new telemetry is the consumer's job.

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::countdown::{self, CountdownState, TimeTarget};
use crate::events::Event;

/// Cadence settings for a [`Ticker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSettings {
    /// Countdown evaluation cadence. The reference ticks once per second.
    pub tick_interval: Duration,
    /// Cadence of refresh prompts, independent of ticking.
    pub refresh_interval: Duration,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            refresh_interval: Duration::from_secs(15 * 60),
        }
    }
}

impl TickerSettings {
    /// Build settings from configuration, clamping zero cadences to the
    /// smallest legal interval.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.countdown.tick_interval_ms.max(1)),
            refresh_interval: Duration::from_secs(
                config.telemetry.refresh_interval_min.max(1) * 60,
            ),
        }
    }
}

/// Handle to a running tick loop.
///
/// Dropping the handle cancels the loop; `stop` additionally waits for it to
/// finish, which makes teardown deterministic in tests and on shutdown.
pub struct Ticker {
    target_tx: watch::Sender<Option<TimeTarget>>,
    state_rx: watch::Receiver<CountdownState>,
    refresh_tx: mpsc::UnboundedSender<()>,
    events_tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the evaluation loop with `target` as the initial countdown
    /// target. Events are pushed into `events_tx`; the latest state is also
    /// kept in a watch channel for consumers that only want the current value.
    pub fn spawn(
        settings: TickerSettings,
        target: Option<TimeTarget>,
        events_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let initial = countdown::evaluate_opt(target.as_ref(), Utc::now());
        let (target_tx, target_rx) = watch::channel(target);
        let (state_tx, state_rx) = watch::channel(initial);
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run_loop(
            settings,
            target_rx,
            state_tx,
            refresh_rx,
            events_tx.clone(),
            cancel.clone(),
        ));

        Self {
            target_tx,
            state_rx,
            refresh_tx,
            events_tx,
            cancel,
            task: Some(task),
        }
    }

    /// Replace the countdown target. Applied by the next tick; the current
    /// tick is not re-run.
    pub fn set_target(&self, target: Option<TimeTarget>) {
        let raw = target.as_ref().map(|t| t.as_str().to_string());
        self.target_tx.send_replace(target);
        let _ = self.events_tx.send(Event::TargetChanged { target: raw, at: Utc::now() });
    }

    /// Latest evaluated countdown state.
    pub fn state(&self) -> CountdownState {
        *self.state_rx.borrow()
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_rx.clone()
    }

    /// Ask for a telemetry refresh now, outside the regular cadence. The
    /// countdown clock is unaffected.
    pub fn request_refresh(&self) {
        let _ = self.refresh_tx.send(());
    }

    /// Cancel the loop and wait for it to finish. Once this returns, no
    /// further event is delivered.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // A dropped handle must not leave a timer running in the background.
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_loop(
    settings: TickerSettings,
    target_rx: watch::Receiver<Option<TimeTarget>>,
    state_tx: watch::Sender<CountdownState>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    events_tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) {
    let mut ticks = interval(settings.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut refreshes = interval(settings.refresh_interval);
    refreshes.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval fires immediately; swallow the first refresh tick so the
    // cadence starts one full period out.
    refreshes.tick().await;

    debug!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        refresh_ms = settings.refresh_interval.as_millis() as u64,
        "ticker started"
    );
    let _ = events_tx.send(Event::TickerStarted {
        tick_interval_ms: settings.tick_interval.as_millis() as u64,
        refresh_interval_ms: settings.refresh_interval.as_millis() as u64,
        at: Utc::now(),
    });

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticks.tick() => {
                let state = countdown::evaluate_opt(target_rx.borrow().as_ref(), Utc::now());
                state_tx.send_replace(state);
                let _ = events_tx.send(Event::CountdownTick { state, at: Utc::now() });
            }
            _ = refreshes.tick() => {
                let _ = events_tx.send(Event::RefreshDue { manual: false, at: Utc::now() });
            }
            Some(()) = refresh_rx.recv() => {
                let _ = events_tx.send(Event::RefreshDue { manual: true, at: Utc::now() });
            }
        }
    }

    let _ = events_tx.send(Event::TickerStopped { at: Utc::now() });
    debug!("ticker stopped");
}
