//! First-person camera with free yaw, restricted pitch and no roll.

/// Roaming camera state and the rotation/translation operations on it.
pub mod roam;
/// GPU uniform snapshot of a camera.
pub mod uniform;

pub use roam::{CameraError, PitchLimits, RoamCamera};
pub use uniform::CameraUniform;
