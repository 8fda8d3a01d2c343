pub mod cull;

pub use cull::camera_bounds;
