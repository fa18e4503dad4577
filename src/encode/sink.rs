use std::path::PathBuf;

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    /// Host frame rate the export was driven at.
    pub fps: f64,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReplayResult<()>;
    /// `time` is the playback time (seconds) the frame shows.
    fn push_frame(&mut self, idx: FrameIndex, time: f64, frame: &FrameRGBA) -> ReplayResult<()>;
    fn end(&mut self) -> ReplayResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, f64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, f64, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReplayResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, time: f64, frame: &FrameRGBA) -> ReplayResult<()> {
        self.frames.push((idx, time, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReplayResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReplayResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReplayError::render(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _time: f64, frame: &FrameRGBA) -> ReplayResult<()> {
        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReplayResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode one frame as PNG at `path`.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> ReplayResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReplayError::render(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ReplayError::render(format!("write png '{}': {e}", path.display())))
}
