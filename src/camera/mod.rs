//! Fixed perspective camera looking down -Z at the scene.

/// Core camera struct and its GPU-facing matrices.
pub mod core;

pub use self::core::Camera;
