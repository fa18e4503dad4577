use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::playback::clock::TickOutcome;
use crate::playback::timer::FrameTimer;
use crate::render::backend::RenderBackend;
use crate::replay::Replay;
use crate::rotation::store::RotationStore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportStats {
    pub frames: u64,
    /// `false` when `max_frames` stopped the export before the end.
    pub finished: bool,
    pub end_time: f64,
}

/// Play `replay` from its current position, rendering one frame per timer
/// tick into `sink` until playback finishes or `max_frames` frames exist.
///
/// `fps` is only reported to the sink; pacing comes from `timer`.
#[tracing::instrument(skip(replay, backend, timer, sink))]
pub fn export_playback<S: RotationStore>(
    replay: &mut Replay<S>,
    backend: &mut dyn RenderBackend,
    timer: &mut dyn FrameTimer,
    sink: &mut dyn FrameSink,
    fps: f64,
    max_frames: u64,
) -> ReplayResult<ExportStats> {
    if !replay.has_session() {
        return Err(ReplayError::data_unavailable("nothing to export: no session loaded"));
    }
    if max_frames == 0 {
        return Err(ReplayError::validation("max_frames must be > 0"));
    }

    sink.begin(SinkConfig {
        canvas: replay.canvas(),
        fps,
    })?;
    replay.play();

    let streamed = stream_frames(replay, backend, timer, sink, max_frames);
    replay.pause();
    let ended = sink.end();
    let (frames, finished) = streamed?;
    ended?;

    if !finished {
        tracing::warn!(frames, max_frames, "export stopped before the end of playback");
    }
    let stats = ExportStats {
        frames,
        finished,
        end_time: replay.clock().current_time(),
    };
    tracing::info!(frames, end_time = stats.end_time, "export done");
    Ok(stats)
}

/// Tick, draw and push until the clock stops or `max_frames` is reached.
/// Returns the frame count and whether playback reached its end.
fn stream_frames<S: RotationStore>(
    replay: &mut Replay<S>,
    backend: &mut dyn RenderBackend,
    timer: &mut dyn FrameTimer,
    sink: &mut dyn FrameSink,
    max_frames: u64,
) -> ReplayResult<(u64, bool)> {
    let mut frames = 0u64;
    while frames < max_frames {
        let outcome = replay.tick(timer.next_frame_ms());
        let Some(scene) = replay.draw() else {
            break;
        };
        let frame = backend.render_scene(&scene)?;
        sink.push_frame(FrameIndex(frames), replay.clock().current_time(), &frame)?;
        frames += 1;
        if outcome != TickOutcome::Continue {
            return Ok((frames, outcome == TickOutcome::Finished));
        }
    }
    Ok((frames, false))
}

#[cfg(test)]
#[path = "../../tests/unit/replay/export.rs"]
mod tests;
