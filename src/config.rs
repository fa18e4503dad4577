use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::rotation::store::JsonFileRotationStore;

pub const ENV_FONT: &str = "LAPREPLAY_FONT";
pub const ENV_ROTATION_STORE: &str = "LAPREPLAY_ROTATION_STORE";
pub const ENV_FPS: &str = "LAPREPLAY_FPS";

/// Settings for rendering and exporting replays.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    pub width: u32,
    pub height: u32,
    /// Frame rate of the offline timer.
    pub fps: f64,
    pub speed: f64,
    pub font_path: Option<PathBuf>,
    pub rotation_store: Option<PathBuf>,
    pub show_progress_bar: bool,
    /// Upper bound on frames produced by one export.
    pub max_frames: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 60.0,
            speed: 1.0,
            font_path: None,
            rotation_store: None,
            show_progress_bar: true,
            max_frames: 100_000,
        }
    }
}

impl ReplayConfig {
    pub fn from_path(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            ReplayError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `LAPREPLAY_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> ReplayResult<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ReplayResult<()> {
        if let Some(v) = lookup(ENV_FONT).filter(|v| !v.is_empty()) {
            self.font_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_ROTATION_STORE).filter(|v| !v.is_empty()) {
            self.rotation_store = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_FPS) {
            self.fps = v
                .trim()
                .parse()
                .map_err(|_| ReplayError::validation(format!("{ENV_FPS} is not a number: '{v}'")))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> ReplayResult<()> {
        Canvas::new(self.width, self.height)?;
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ReplayError::validation(format!(
                "fps must be finite and > 0, got {}",
                self.fps
            )));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ReplayError::validation(format!(
                "speed must be finite and > 0, got {}",
                self.speed
            )));
        }
        if self.max_frames == 0 {
            return Err(ReplayError::validation("max_frames must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> ReplayResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Configured rotation store path, falling back to the per-user config dir.
    pub fn rotation_store_path(&self) -> Option<PathBuf> {
        self.rotation_store
            .clone()
            .or_else(JsonFileRotationStore::default_path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
