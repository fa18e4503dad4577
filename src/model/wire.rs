//! Serde shapes of the telemetry data-service responses.
//!
//! Field names follow the service contract exactly; conversion into validated
//! model types happens in [`crate::model::session`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::{ReplayError, ReplayResult};
use crate::foundation::format::format_lap_time;

/// Reference track outline as parallel coordinate arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackDoc {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Corner marker: a point on the outline plus where its label goes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerDoc {
    /// Corner number, possibly with a letter suffix (`"10A"`).
    #[serde(deserialize_with = "number_or_string")]
    pub number: String,
    pub track_x: f64,
    pub track_y: f64,
    pub text_x: f64,
    pub text_y: f64,
}

/// One driver's recorded lap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverDoc {
    pub code: String,
    /// `RRGGBB` or `#RRGGBB`.
    pub color: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Seconds, non-decreasing.
    pub t: Vec<f64>,
}

/// A position response: shared track and corners plus one or more drivers.
///
/// Single-driver responses carry `driver`; multi-driver responses carry
/// `drivers`. Both may be present, in which case `driver` comes first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionBundle {
    pub track: TrackDoc,
    #[serde(default)]
    pub corners: Vec<CornerDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<DriverDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers: Vec<DriverDoc>,
}

impl PositionBundle {
    /// All drivers carried by this bundle, in response order.
    pub fn driver_docs(&self) -> impl Iterator<Item = &DriverDoc> {
        self.driver.iter().chain(self.drivers.iter())
    }

    pub fn from_reader(r: impl Read) -> ReplayResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReplayError::serde(format!("parse position bundle: {e}")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BundleDocument {
    Many(Vec<PositionBundle>),
    One(PositionBundle),
}

/// Read a JSON file holding either one bundle or an array of bundles.
pub fn read_bundles(path: impl AsRef<Path>) -> ReplayResult<Vec<PositionBundle>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        ReplayError::data_unavailable(format!("open bundle JSON '{}': {e}", path.display()))
    })?;
    parse_bundles(BufReader::new(f))
        .map_err(|e| ReplayError::serde(format!("'{}': {e}", path.display())))
}

pub fn parse_bundles(r: impl Read) -> ReplayResult<Vec<PositionBundle>> {
    let doc: BundleDocument =
        serde_json::from_reader(r).map_err(|e| ReplayError::serde(e.to_string()))?;
    Ok(match doc {
        BundleDocument::Many(v) => v,
        BundleDocument::One(b) => vec![b],
    })
}

/// Driver entry of a session's driver list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub code: String,
    pub team: String,
    pub team_color: String,
}

impl DriverInfo {
    pub fn label(&self) -> String {
        format!("{} — {}", self.code, self.team)
    }
}

/// Lap entry of a driver's lap list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LapInfo {
    pub lap_number: u32,
    #[serde(default)]
    pub lap_time_ms: Option<u64>,
    #[serde(default)]
    pub compound: Option<String>,
}

impl LapInfo {
    /// `Lap 12 — 1:23.456 (SOFT)`, with `?` for anything unknown.
    pub fn label(&self) -> String {
        let compound = self
            .compound
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("?");
        format!(
            "Lap {} — {} ({compound})",
            self.lap_number,
            format_lap_time(self.lap_time_ms)
        )
    }
}

pub fn read_laps(r: impl Read) -> ReplayResult<Vec<LapInfo>> {
    serde_json::from_reader(r).map_err(|e| ReplayError::serde(format!("parse lap list: {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

fn number_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match NumberOrString::deserialize(d)? {
        NumberOrString::Int(n) => n.to_string(),
        NumberOrString::Float(f) => f.to_string(),
        NumberOrString::Str(s) => s,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/model/wire.rs"]
mod tests;
