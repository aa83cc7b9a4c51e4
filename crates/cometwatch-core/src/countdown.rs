//! Countdown engine.
//!
//! The countdown is a pure function of `(target, now)`. It does not use
//! internal threads or keep running totals - a driver re-invokes [`evaluate`]
//! at a fixed cadence (see [`crate::driver`]) and publishes the result.
//! Because every state is derived fresh from absolute instants, the countdown
//! cannot drift and missed evaluations cost nothing but staleness.
//!
//! ## States
//!
//! ```text
//! no target      -> Unset
//! bad timestamp  -> Invalid
//! good timestamp -> Active { Upcoming | Elapsed, delta }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let target = TimeTarget::new("2025-10-29T11:35:00Z");
//! match evaluate(&target, Utc::now()) {
//!     CountdownState::Active { phase, delta } => { /* render */ }
//!     _ => { /* "Date not set" */ }
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seconds per day, hour and minute used for the delta breakdown. Days are
/// plain 24-hour blocks; no month or year normalization.
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// An absolute instant used as the countdown's reference point.
///
/// Wraps the raw timestamp string exactly as the telemetry feed or the
/// configuration supplied it. The string is re-parsed on every evaluation
/// rather than parsed once up front, so a malformed target simply yields
/// [`CountdownState::Invalid`] until a better value replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeTarget(String);

impl TimeTarget {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw timestamp string as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the target into a concrete UTC instant.
    ///
    /// Accepts RFC 3339 (offsets allowed) plus the naive forms the feed has
    /// been observed to deliver, all interpreted as UTC:
    /// `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM[:SS]` and a bare
    /// `YYYY-MM-DD` (midnight).
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        const NAIVE_FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
        ];
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

impl From<&str> for TimeTarget {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<DateTime<Utc>> for TimeTarget {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339())
    }
}

impl std::fmt::Display for TimeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the target the current instant is on.
///
/// The instant where `now` equals the target (to the second) counts as
/// `Upcoming`: the boundary belongs to the future branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownPhase {
    /// Target lies ahead; the delta is time remaining.
    Upcoming,
    /// Target has passed; the delta is time since the event.
    Elapsed,
}

impl CountdownPhase {
    /// Signed direction of the delta: `+1` while upcoming, `-1` once elapsed.
    pub fn sign(self) -> i8 {
        match self {
            CountdownPhase::Upcoming => 1,
            CountdownPhase::Elapsed => -1,
        }
    }
}

/// Absolute delta decomposed for clock-style display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaBreakdown {
    pub days: u64,
    /// 0..=23
    pub hours: u8,
    /// 0..=59
    pub minutes: u8,
    /// 0..=59
    pub seconds: u8,
}

impl DeltaBreakdown {
    /// Decompose a whole-second magnitude.
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: ((total % SECS_PER_DAY) / SECS_PER_HOUR) as u8,
            minutes: ((total % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
            seconds: (total % SECS_PER_MINUTE) as u8,
        }
    }

    /// Recombine the fields into the total magnitude in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + u64::from(self.hours) * SECS_PER_HOUR
            + u64::from(self.minutes) * SECS_PER_MINUTE
            + u64::from(self.seconds)
    }
}

/// Derived countdown state.
///
/// Recomputed fresh on every evaluation, never cached or incremented.
/// `Unset` and `Invalid` are ordinary states, not errors: consumers render a
/// placeholder for them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CountdownState {
    /// No target was supplied at all.
    Unset,
    /// A target was supplied but did not parse as a timestamp.
    Invalid,
    /// A usable target; delta to `now` at seconds granularity.
    Active {
        phase: CountdownPhase,
        delta: DeltaBreakdown,
    },
}

impl CountdownState {
    /// True only for `Active`. Callers branch here before reading the delta;
    /// there is no partially-valid state.
    pub fn is_valid(&self) -> bool {
        matches!(self, CountdownState::Active { .. })
    }

    /// Signed direction of the delta, when valid.
    pub fn sign(&self) -> Option<i8> {
        self.phase().map(CountdownPhase::sign)
    }

    pub fn phase(&self) -> Option<CountdownPhase> {
        match self {
            CountdownState::Active { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    pub fn delta(&self) -> Option<DeltaBreakdown> {
        match self {
            CountdownState::Active { delta, .. } => Some(*delta),
            _ => None,
        }
    }
}

/// Evaluate the countdown for `target` at the instant `now`.
///
/// Pure: identical inputs always yield identical results. The epoch delta is
/// truncated to whole seconds before the phase is derived, so a target within
/// the same second as `now` reads as `Upcoming` with a zero delta.
pub fn evaluate(target: &TimeTarget, now: DateTime<Utc>) -> CountdownState {
    let Some(target_at) = target.parse() else {
        return CountdownState::Invalid;
    };
    let delta_secs = target_at.signed_duration_since(now).num_seconds();
    let phase = if delta_secs >= 0 {
        CountdownPhase::Upcoming
    } else {
        CountdownPhase::Elapsed
    };
    CountdownState::Active {
        phase,
        delta: DeltaBreakdown::from_seconds(delta_secs.unsigned_abs()),
    }
}

/// Like [`evaluate`], with "no target configured" as a first-class input.
pub fn evaluate_opt(target: Option<&TimeTarget>, now: DateTime<Utc>) -> CountdownState {
    match target {
        Some(target) => evaluate(target, now),
        None => CountdownState::Unset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let target = TimeTarget::new("2025-10-29T13:35:00+02:00");
        assert_eq!(target.parse().unwrap(), at(2025, 10, 29, 11, 35, 0));
    }

    #[test]
    fn parses_naive_forms_as_utc() {
        let cases = [
            ("2025-10-29T11:35:00", at(2025, 10, 29, 11, 35, 0)),
            ("2025-10-29 11:35:00", at(2025, 10, 29, 11, 35, 0)),
            ("2025-10-29 11:35", at(2025, 10, 29, 11, 35, 0)),
            ("2025-10-29", at(2025, 10, 29, 0, 0, 0)),
            ("  2025-10-29T11:35:00Z  ", at(2025, 10, 29, 11, 35, 0)),
        ];
        for (raw, expected) in cases {
            assert_eq!(TimeTarget::new(raw).parse(), Some(expected), "input {raw:?}");
        }
    }

    #[test]
    fn rejects_garbage_timestamps() {
        for raw in ["", "   ", "soon", "29/10/2025", "2025-13-40T99:99:99Z"] {
            assert_eq!(TimeTarget::new(raw).parse(), None, "input {raw:?}");
        }
    }

    #[test]
    fn unparsable_target_is_invalid_not_error() {
        let state = evaluate(&TimeTarget::new("not a date"), at(2025, 9, 5, 12, 0, 0));
        assert_eq!(state, CountdownState::Invalid);
        assert!(!state.is_valid());
        assert_eq!(state.sign(), None);
    }

    #[test]
    fn missing_target_is_unset() {
        let state = evaluate_opt(None, at(2025, 9, 5, 12, 0, 0));
        assert_eq!(state, CountdownState::Unset);
        assert!(!state.is_valid());
    }

    #[test]
    fn breaks_down_one_day_one_hour_one_minute_one_second() {
        // 90_061 s = 1d + 1h + 1m + 1s
        let now = at(2025, 9, 5, 12, 0, 0);
        let target = TimeTarget::from(now + Duration::from_secs(90_061));
        let state = evaluate(&target, now);
        assert_eq!(
            state,
            CountdownState::Active {
                phase: CountdownPhase::Upcoming,
                delta: DeltaBreakdown { days: 1, hours: 1, minutes: 1, seconds: 1 },
            }
        );
        assert_eq!(state.sign(), Some(1));
    }

    #[test]
    fn past_target_reads_elapsed_with_positive_delta() {
        let now = at(2025, 9, 5, 12, 0, 0);
        let target = TimeTarget::from(now - Duration::from_secs(5));
        let state = evaluate(&target, now);
        assert_eq!(
            state,
            CountdownState::Active {
                phase: CountdownPhase::Elapsed,
                delta: DeltaBreakdown { days: 0, hours: 0, minutes: 0, seconds: 5 },
            }
        );
        assert_eq!(state.sign(), Some(-1));
    }

    #[test]
    fn exact_now_counts_as_upcoming_zero() {
        let now = at(2025, 10, 29, 11, 35, 0);
        let state = evaluate(&TimeTarget::from(now), now);
        assert_eq!(state.phase(), Some(CountdownPhase::Upcoming));
        assert_eq!(state.delta().unwrap().total_seconds(), 0);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let now = at(2025, 9, 5, 12, 0, 0);
        let target = TimeTarget::new("2025-10-29T11:35:00Z");
        assert_eq!(evaluate(&target, now), evaluate(&target, now));
    }

    #[test]
    fn far_future_target_does_not_overflow() {
        let now = at(2025, 9, 5, 12, 0, 0);
        let target = TimeTarget::new("2500-01-01T00:00:00Z");
        let state = evaluate(&target, now);
        let delta = state.delta().unwrap();
        assert!(delta.days > 170_000);
        assert_eq!(state.phase(), Some(CountdownPhase::Upcoming));
    }

    proptest! {
        #[test]
        fn breakdown_reconstructs_epoch_delta(delta_secs in -10_000_000_000i64..10_000_000_000i64) {
            let now = at(2025, 9, 5, 12, 0, 0);
            let target_at = now + chrono::Duration::seconds(delta_secs);
            let state = evaluate(&TimeTarget::from(target_at), now);
            let CountdownState::Active { phase, delta } = state else {
                panic!("expected active state");
            };
            prop_assert_eq!(delta.total_seconds(), delta_secs.unsigned_abs());
            prop_assert_eq!(phase.sign(), if delta_secs >= 0 { 1 } else { -1 });
            prop_assert!(delta.hours < 24);
            prop_assert!(delta.minutes < 60);
            prop_assert!(delta.seconds < 60);
        }

        #[test]
        fn breakdown_roundtrips(total in 0u64..2_000_000_000u64) {
            let delta = DeltaBreakdown::from_seconds(total);
            prop_assert_eq!(delta.total_seconds(), total);
        }
    }
}
