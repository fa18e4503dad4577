use std::f64::consts::PI;

use crate::foundation::error::ReplayResult;
use crate::rotation::store::{RotationStore, rotation_key};

/// Angle added or removed by one press of the rotate controls.
pub const ROTATION_STEP: f64 = PI / 24.0;

/// Scene rotation for the current circuit, persisted through a [`RotationStore`].
///
/// Without a loaded key the angle still changes but nothing is persisted.
#[derive(Debug)]
pub struct RotationControl<S> {
    store: S,
    key: Option<String>,
    angle: f64,
}

impl<S: RotationStore> RotationControl<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: None,
            angle: 0.0,
        }
    }

    /// Switch to the circuit `(year, event)` and read its stored angle.
    /// Missing or unparsable values load as `0`.
    pub fn load(&mut self, year: &str, event: &str) -> f64 {
        let key = rotation_key(year, event);
        self.angle = match self.store.get(&key) {
            None => 0.0,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    tracing::warn!(%key, value = %raw, "unparsable stored rotation, using 0");
                    0.0
                }
            },
        };
        self.key = Some(key);
        self.angle
    }

    /// Forget the current circuit: angle back to `0`, later changes stay unsaved.
    pub fn detach(&mut self) {
        self.key = None;
        self.angle = 0.0;
    }

    /// Add `delta` and persist. A failed write keeps the previous angle.
    pub fn rotate(&mut self, delta: f64) -> ReplayResult<f64> {
        self.set_angle(self.angle + delta)?;
        Ok(self.angle)
    }

    pub fn reset(&mut self) -> ReplayResult<()> {
        self.set_angle(0.0)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn set_angle(&mut self, angle: f64) -> ReplayResult<()> {
        if let Some(key) = &self.key {
            self.store.set(key, angle.to_string())?;
        }
        self.angle = angle;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/control.rs"]
mod tests;
