pub mod control;
pub mod store;

pub use control::{ROTATION_STEP, RotationControl};
pub use store::{JsonFileRotationStore, MemoryRotationStore, RotationStore, rotation_key};
