pub mod transform;

pub use transform::{FIT_PADDING, ScreenTransform, fit_transform, rotate_point};
