use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ReplayError, ReplayResult};

/// Durable key → value mapping holding rotation angles as decimal strings.
pub trait RotationStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> ReplayResult<()>;
}

/// Persistence key for a circuit: `rotation_{year}_{event}`.
pub fn rotation_key(year: &str, event: &str) -> String {
    format!("rotation_{year}_{event}")
}

/// Process-local store, for tests and one-shot renders.
#[derive(Clone, Debug, Default)]
pub struct MemoryRotationStore {
    values: HashMap<String, String>,
}

impl MemoryRotationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RotationStore for MemoryRotationStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> ReplayResult<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`.
#[derive(Clone, Debug)]
pub struct JsonFileRotationStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileRotationStore {
    /// `<config dir>/lapreplay/rotation.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lapreplay").join("rotation.json"))
    }

    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// An unreadable file (permissions, bad UTF-8) is an error; a file with
    /// invalid JSON is treated as empty with a warning and is replaced on the
    /// next `set`.
    pub fn open(path: impl Into<PathBuf>) -> ReplayResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring corrupt rotation store: {e}");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(ReplayError::store(format!(
                    "read '{}': {e}",
                    path.display()
                )));
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> ReplayResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ReplayError::store(format!("create '{}': {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| ReplayError::serde(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| ReplayError::store(format!("write '{}': {e}", self.path.display())))
    }
}

impl RotationStore for JsonFileRotationStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> ReplayResult<()> {
        self.values.insert(key.to_owned(), value);
        self.save()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/store.rs"]
mod tests;
