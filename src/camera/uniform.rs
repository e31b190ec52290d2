use glam::Mat4;

use super::RoamCamera;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block holding a camera's view and world transforms.
pub struct CameraUniform {
    /// World-to-camera matrix.
    pub view: [[f32; 4]; 4],
    /// Camera-to-world matrix.
    pub camera: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Yaw in degrees.
    pub yaw: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Pitch in degrees.
    pub pitch: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform for a camera at the origin looking down -Z.
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            camera: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            yaw: 0.0,
            forward: [0.0, 0.0, -1.0],
            pitch: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update(&mut self, camera: &RoamCamera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.camera = camera.matrix().to_cols_array_2d();
        self.position = camera.position().to_array();
        self.forward = camera.forward().to_array();
        self.yaw = camera.yaw();
        self.pitch = camera.pitch();
    }
}

impl From<&RoamCamera> for CameraUniform {
    fn from(camera: &RoamCamera) -> Self {
        let mut uniform = Self::new();
        uniform.update(camera);
        uniform
    }
}
