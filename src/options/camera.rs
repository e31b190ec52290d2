use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Pitch limits and reference axis of the roaming camera.
pub struct CameraOptions {
    /// Lowest pitch as a fraction of a full turn (-0.25 is straight down).
    #[schemars(title = "Min Pitch", range(max = 0.0), extend("step" = 0.005))]
    pub min_pitch_ratio: f32,
    /// Highest pitch as a fraction of a full turn (0.25 is straight up).
    #[schemars(title = "Max Pitch", range(min = 0.0, max = 0.25), extend("step" = 0.005))]
    pub max_pitch_ratio: f32,
    /// World up direction; yaw turns about it and roll is measured
    /// against it.
    #[schemars(skip)]
    pub up_axis: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            min_pitch_ratio: -0.25,
            max_pitch_ratio: 0.25,
            up_axis: [0.0, 1.0, 0.0],
        }
    }
}
