use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::foundation::error::{ReplayError, ReplayResult};
use crate::model::session::VisualizationSession;
use crate::model::wire::PositionBundle;

/// Identifies a recorded session: `(year, event, session)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKey {
    pub year: String,
    pub event: String,
    /// Session code such as `R`, `Q`, `FP1`.
    pub session: String,
}

/// One driver/lap pick for comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LapSelection {
    pub driver: String,
    pub lap: u32,
}

impl std::str::FromStr for LapSelection {
    type Err = ReplayError;

    /// Parse `CODE:LAP`, e.g. `VER:40`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (driver, lap) = s
            .split_once(':')
            .ok_or_else(|| ReplayError::validation(format!("expected CODE:LAP, got '{s}'")))?;
        let driver = driver.trim();
        if driver.is_empty() {
            return Err(ReplayError::validation(format!("empty driver code in '{s}'")));
        }
        let lap = lap
            .trim()
            .parse::<u32>()
            .map_err(|e| ReplayError::validation(format!("invalid lap in '{s}': {e}")))?;
        Ok(Self {
            driver: driver.to_owned(),
            lap,
        })
    }
}

/// Source of position bundles. Network transport lives behind this trait.
pub trait DataService {
    fn position(&self, key: &SessionKey, pick: &LapSelection) -> ReplayResult<PositionBundle>;
}

/// Serves bundles from `<root>/<year>/<event>/<session>/<driver>/<lap>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirService {
    root: PathBuf,
}

impl JsonDirService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn bundle_path(&self, key: &SessionKey, pick: &LapSelection) -> PathBuf {
        self.root
            .join(&key.year)
            .join(&key.event)
            .join(&key.session)
            .join(&pick.driver)
            .join(format!("{}.json", pick.lap))
    }
}

impl DataService for JsonDirService {
    fn position(&self, key: &SessionKey, pick: &LapSelection) -> ReplayResult<PositionBundle> {
        let path = self.bundle_path(key, pick);
        let f = File::open(&path).map_err(|e| {
            ReplayError::data_unavailable(format!(
                "no data for {} lap {} ('{}'): {e}",
                pick.driver,
                pick.lap,
                path.display()
            ))
        })?;
        PositionBundle::from_reader(BufReader::new(f))
    }
}

/// Fetch every selection and assemble a fresh session from the responses.
///
/// Any failed fetch aborts the load; the caller keeps its previous session.
#[tracing::instrument(skip(service))]
pub fn load_session(
    service: &dyn DataService,
    key: &SessionKey,
    picks: &[LapSelection],
) -> ReplayResult<VisualizationSession> {
    if picks.is_empty() {
        return Err(ReplayError::data_unavailable("no driver selected"));
    }
    let bundles = picks
        .iter()
        .map(|pick| service.position(key, pick))
        .collect::<ReplayResult<Vec<_>>>()?;
    VisualizationSession::from_bundles(&bundles)
}

#[cfg(test)]
#[path = "../../tests/unit/model/service.rs"]
mod tests;
