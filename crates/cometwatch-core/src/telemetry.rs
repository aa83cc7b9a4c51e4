//! Telemetry snapshot model.
//!
//! A snapshot is produced by an external provider (the reference feed backs
//! onto JPL Horizons) and consumed read-only: this subsystem pulls the
//! geocentric distance and the closest-approach timestamp out of it and
//! derives display state. The feed is stringly-typed and unreliable, so every
//! leaf is optional and a partial record still decodes; unknown fields such
//! as the provider's `rawData` blob are ignored.

use serde::{Deserialize, Serialize};

use crate::countdown::TimeTarget;
use crate::error::TelemetryError;

/// Cosmetic display placeholder used when the feed supplies no distance.
/// Never fed back into classification as a real measurement.
pub const PLACEHOLDER_DISTANCE_AU: &str = "4.20000000";

/// Sky position block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Position {
    pub right_ascension: Option<String>,
    pub declination: Option<String>,
    /// Geocentric distance in AU, as the feed delivers it.
    pub distance: Option<String>,
    pub heliocentric_distance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Velocity {
    pub radial_velocity: Option<String>,
    pub tangential_velocity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrbitalElements {
    pub eccentricity: Option<String>,
    pub inclination: Option<String>,
    pub perihelion: Option<String>,
    pub aphelion: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalData {
    pub magnitude: Option<String>,
    pub coma: Option<String>,
    pub tail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visibility {
    pub constellation: Option<String>,
    pub best_viewing_time: Option<String>,
    pub moon_phase: Option<String>,
}

/// A dated orbital event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproachEvent {
    pub timestamp: Option<String>,
}

/// Event block; only the closest approach drives the countdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTimes {
    pub closest_approach: Option<ApproachEvent>,
}

/// One full telemetry record for the tracked object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetrySnapshot {
    pub id: Option<String>,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub last_updated: Option<String>,
    pub position: Position,
    pub velocity: Velocity,
    pub orbital: OrbitalElements,
    pub physical: PhysicalData,
    pub status: Option<String>,
    pub next_update: Option<String>,
    pub visibility: Visibility,
    pub source: Option<String>,
    pub events: EventTimes,
}

impl TelemetrySnapshot {
    /// Decode a snapshot from provider JSON.
    pub fn from_json(json: &str) -> Result<Self, TelemetryError> {
        serde_json::from_str(json).map_err(|e| TelemetryError::DecodeFailed(e.to_string()))
    }

    /// Read and decode a snapshot file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, TelemetryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| TelemetryError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    /// Geocentric distance as delivered, if present.
    pub fn distance_from_earth(&self) -> Option<&str> {
        self.position.distance.as_deref()
    }

    /// Distance string for display, with the cosmetic placeholder when the
    /// feed carried none.
    pub fn distance_or_placeholder(&self) -> &str {
        self.distance_from_earth().unwrap_or(PLACEHOLDER_DISTANCE_AU)
    }

    /// Closest-approach timestamp from the event block, if present.
    pub fn closest_approach(&self) -> Option<TimeTarget> {
        self.events
            .closest_approach
            .as_ref()
            .and_then(|event| event.timestamp.as_deref())
            .map(TimeTarget::new)
    }

    /// The static record the reference feed serves when the provider is
    /// unreachable. Carries no update times and no approach event, so the
    /// countdown falls through to the configured fallback target.
    pub fn placeholder() -> Self {
        Self {
            id: Some("3i_atlas".into()),
            name: Some("3i/Atlas".into()),
            designation: Some("C/2025 A1".into()),
            last_updated: None,
            position: Position {
                right_ascension: Some("280.500000".into()),
                declination: Some("15.200000".into()),
                distance: Some(PLACEHOLDER_DISTANCE_AU.into()),
                heliocentric_distance: Some("5.80000000".into()),
            },
            velocity: Velocity {
                radial_velocity: Some("12.500".into()),
                tangential_velocity: Some("8.900".into()),
            },
            orbital: OrbitalElements {
                eccentricity: Some("0.9985".into()),
                inclination: Some("89.2\u{b0}".into()),
                perihelion: Some("1.15 AU".into()),
                aphelion: Some("~2000 AU".into()),
                period: Some("Long-period comet".into()),
            },
            physical: PhysicalData {
                magnitude: Some("9.2".into()),
                coma: Some("125000 km".into()),
                tail: Some("6500000 km".into()),
            },
            status: Some("Data unavailable".into()),
            next_update: None,
            visibility: Visibility {
                constellation: Some("Draco".into()),
                best_viewing_time: Some("Pre-dawn hours".into()),
                moon_phase: Some("Waning Crescent".into()),
            },
            source: Some("Fallback Data".into()),
            events: EventTimes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_JSON: &str = r#"{
        "id": "3i_atlas",
        "name": "3i/Atlas",
        "designation": "C/2025 A1",
        "lastUpdated": "2025-09-05T11:45:00",
        "position": {
            "rightAscension": "281.123456",
            "declination": "15.654321",
            "distance": "3.14159265",
            "heliocentricDistance": "5.10000000"
        },
        "velocity": {
            "radialVelocity": "12.500",
            "tangentialVelocity": "8.900"
        },
        "orbital": {
            "eccentricity": "0.9985",
            "inclination": "89.2°",
            "perihelion": "1.15 AU",
            "aphelion": "~2000 AU",
            "period": "Long-period comet"
        },
        "physical": {
            "magnitude": "9.2",
            "coma": "125000 km",
            "tail": "6500000 km"
        },
        "status": "Active tracking",
        "nextUpdate": "2025-09-05T12:00:00",
        "visibility": {
            "constellation": "Draco",
            "bestViewingTime": "Pre-dawn hours",
            "moonPhase": "Waning Crescent"
        },
        "source": "JPL Horizons",
        "events": {
            "closestApproach": { "timestamp": "2025-10-29T11:35:00Z" }
        },
        "rawData": "$$SOE ... $$EOE"
    }"#;

    #[test]
    fn decodes_full_feed_record() {
        let snapshot = TelemetrySnapshot::from_json(FEED_JSON).unwrap();
        assert_eq!(snapshot.designation.as_deref(), Some("C/2025 A1"));
        assert_eq!(snapshot.distance_from_earth(), Some("3.14159265"));
        assert_eq!(snapshot.source.as_deref(), Some("JPL Horizons"));
        assert_eq!(
            snapshot.closest_approach().unwrap().as_str(),
            "2025-10-29T11:35:00Z"
        );
    }

    #[test]
    fn unknown_provider_fields_are_ignored() {
        // rawData carries the provider's raw text; it must not break decoding.
        let snapshot = TelemetrySnapshot::from_json(FEED_JSON).unwrap();
        assert_eq!(snapshot.name.as_deref(), Some("3i/Atlas"));
    }

    #[test]
    fn partial_record_still_decodes() {
        let snapshot =
            TelemetrySnapshot::from_json(r#"{"position": {"distance": "0.50000000"}}"#).unwrap();
        assert_eq!(snapshot.distance_from_earth(), Some("0.50000000"));
        assert_eq!(snapshot.designation, None);
        assert_eq!(snapshot.closest_approach(), None);
    }

    #[test]
    fn empty_record_decodes_to_default() {
        let snapshot = TelemetrySnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, TelemetrySnapshot::default());
        assert_eq!(snapshot.distance_from_earth(), None);
        assert_eq!(snapshot.distance_or_placeholder(), PLACEHOLDER_DISTANCE_AU);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = TelemetrySnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, TelemetryError::DecodeFailed(_)));
    }

    #[test]
    fn reads_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, FEED_JSON).unwrap();

        let snapshot = TelemetrySnapshot::from_file(&path).unwrap();
        assert_eq!(snapshot.distance_from_earth(), Some("3.14159265"));

        let err = TelemetrySnapshot::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TelemetryError::ReadFailed { .. }));
    }

    #[test]
    fn placeholder_matches_reference_fallback() {
        let snapshot = TelemetrySnapshot::placeholder();
        assert_eq!(snapshot.distance_from_earth(), Some("4.20000000"));
        assert_eq!(snapshot.status.as_deref(), Some("Data unavailable"));
        assert_eq!(snapshot.source.as_deref(), Some("Fallback Data"));
        assert_eq!(snapshot.visibility.constellation.as_deref(), Some("Draco"));
        // No approach event: the countdown must fall back to configuration.
        assert_eq!(snapshot.closest_approach(), None);
    }

    #[test]
    fn snapshot_roundtrips_camel_case() {
        let snapshot = TelemetrySnapshot::placeholder();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"heliocentricDistance\""));
        assert!(json.contains("\"bestViewingTime\""));
        let back = TelemetrySnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
