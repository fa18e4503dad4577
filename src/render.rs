pub mod backend;
pub mod cpu;
pub mod scene;
pub mod text;

pub use backend::{FrameRGBA, RenderBackend};
pub use cpu::{CpuBackend, CpuBackendOpts};
pub use scene::{DrawOp, Marker, Scene, SceneRenderer, SceneStyle, TextAlign};
