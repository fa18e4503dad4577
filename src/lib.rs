//! Lapreplay replays recorded lap telemetry as a synchronized animation over a
//! track outline.
//!
//! The public API is context-oriented:
//!
//! - Assemble a [`VisualizationSession`] from data-service bundles
//! - Hand it to a [`Replay`], which owns playback, rotation and surface size
//! - Drive the replay with host ticks and [`Replay::draw`] frames, or export a
//!   whole playback into a [`FrameSink`]
#![forbid(unsafe_code)]

/// Configuration file and environment overrides.
pub mod config;
/// Frame sinks for exported playback.
pub mod encode;
pub mod foundation;
/// Raw-to-screen fitting.
pub mod geometry;
/// Telemetry data model and data-service contract.
pub mod model;
/// Frame lookup, clock and host timers.
pub mod playback;
/// Scene composition and rasterization.
pub mod render;
/// Replay context and offline export.
pub mod replay;
/// Per-circuit rotation preference.
pub mod rotation;

pub use crate::config::ReplayConfig;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ReplayError, ReplayResult};
pub use crate::foundation::format::format_lap_time;
pub use crate::geometry::transform::{FIT_PADDING, ScreenTransform, fit_transform};
pub use crate::model::service::{
    DataService, JsonDirService, LapSelection, SessionKey, load_session,
};
pub use crate::model::session::VisualizationSession;
pub use crate::model::trace::{CornerAnnotation, Trace, TrackOutline};
pub use crate::model::wire::{
    DriverInfo, LapInfo, PositionBundle, parse_bundles, read_bundles, read_laps,
};
pub use crate::playback::clock::{PlaybackClock, PlaybackState, SPEED_PRESETS, TickOutcome};
pub use crate::playback::frame::frame_for_time;
pub use crate::playback::timer::{FixedRateTimer, FrameTimer, WallClockTimer};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::scene::{DrawOp, Scene, SceneRenderer, SceneStyle};
pub use crate::replay::{Circuit, ExportStats, Replay, export_playback};
pub use crate::rotation::control::{ROTATION_STEP, RotationControl};
pub use crate::rotation::store::{
    JsonFileRotationStore, MemoryRotationStore, RotationStore, rotation_key,
};
