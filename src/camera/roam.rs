use std::fmt;

use glam::{Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Below this squared length a direction is treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Errors produced when configuring a [`RoamCamera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// Pitch bounds are not finite, are reversed, or go past straight up or
    /// straight down.
    InvalidPitchLimits {
        /// Requested lower bound, as a fraction of a full turn.
        min_ratio: f32,
        /// Requested upper bound, as a fraction of a full turn.
        max_ratio: f32,
    },
    /// The up axis has no usable direction.
    DegenerateUpAxis(Vec3),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPitchLimits {
                min_ratio,
                max_ratio,
            } => write!(
                f,
                "invalid pitch limits [{min_ratio}, {max_ratio}] \
                 (expected -0.25 <= min <= max <= 0.25)"
            ),
            Self::DegenerateUpAxis(up) => {
                write!(f, "up axis {up} has no direction")
            }
        }
    }
}

impl std::error::Error for CameraError {}

/// Inclusive pitch range, stored as fractions of a full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchLimits {
    min_ratio: f32,
    max_ratio: f32,
}

impl PitchLimits {
    /// Straight down to straight up.
    pub const VERTICAL: Self = Self {
        min_ratio: -0.25,
        max_ratio: 0.25,
    };

    /// Range from `min_ratio` to `max_ratio` of a full turn, e.g. `-0.25`
    /// is -90°.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidPitchLimits`] unless both bounds are
    /// finite and `-0.25 <= min_ratio <= max_ratio <= 0.25`. A pitch past
    /// ±90° would flip the camera upside down.
    pub fn new(min_ratio: f32, max_ratio: f32) -> Result<Self, CameraError> {
        let valid = min_ratio.is_finite()
            && max_ratio.is_finite()
            && -0.25 <= min_ratio
            && min_ratio <= max_ratio
            && max_ratio <= 0.25;
        if valid {
            Ok(Self {
                min_ratio,
                max_ratio,
            })
        } else {
            Err(CameraError::InvalidPitchLimits {
                min_ratio,
                max_ratio,
            })
        }
    }

    /// Lower bound in degrees.
    #[must_use]
    pub fn min_degrees(self) -> f32 {
        self.min_ratio * 360.0
    }

    /// Upper bound in degrees.
    #[must_use]
    pub fn max_degrees(self) -> f32 {
        self.max_ratio * 360.0
    }

    /// Clamp a pitch angle in degrees into the range.
    #[must_use]
    pub fn clamp(self, pitch_deg: f32) -> f32 {
        pitch_deg.clamp(self.min_degrees(), self.max_degrees())
    }
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self::VERTICAL
    }
}

/// First-person camera that roams freely, never rolls, and restricts pitch.
///
/// The state is a single camera-to-world transform: `x_axis` is right,
/// `y_axis` is up, `z_axis` points backwards (the camera looks down its
/// local -Z) and `w_axis` is the position. Every rotation rebuilds the basis
/// from yaw about the fixed up axis and the clamped pitch, so roll can never
/// accumulate.
#[derive(Debug, Clone, PartialEq)]
pub struct RoamCamera {
    matrix: Mat4,
    limits: PitchLimits,
    up: Vec3,
    // Right and forward directions at zero yaw and pitch.
    base_right: Vec3,
    base_forward: Vec3,
}

impl Default for RoamCamera {
    fn default() -> Self {
        Self::with_frame(PitchLimits::VERTICAL, Vec3::Y)
    }
}

impl RoamCamera {
    /// Camera at the origin with zero yaw and pitch.
    ///
    /// At zero yaw the camera faces -Z projected onto the plane
    /// perpendicular to `up` (any perpendicular direction if `up` is
    /// parallel to Z).
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::DegenerateUpAxis`] if `up` is zero or not
    /// finite.
    pub fn new(limits: PitchLimits, up: Vec3) -> Result<Self, CameraError> {
        let up = up
            .try_normalize()
            .ok_or(CameraError::DegenerateUpAxis(up))?;
        Ok(Self::with_frame(limits, up))
    }

    /// Camera configured from [`CameraOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if the configured limits or up axis are
    /// invalid.
    pub fn from_options(options: &CameraOptions) -> Result<Self, CameraError> {
        let limits =
            PitchLimits::new(options.min_pitch_ratio, options.max_pitch_ratio)?;
        Self::new(limits, Vec3::from_array(options.up_axis))
    }

    fn with_frame(limits: PitchLimits, up: Vec3) -> Self {
        let base_forward = (Vec3::NEG_Z - up * up.dot(Vec3::NEG_Z))
            .try_normalize()
            .unwrap_or_else(|| up.any_orthonormal_vector());
        let mut camera = Self {
            matrix: Mat4::IDENTITY,
            limits,
            up,
            base_right: base_forward.cross(up),
            base_forward,
        };
        camera.orient(0.0, 0.0, Vec3::ZERO);
        camera
    }

    /// Place the camera at `eye` looking towards `center`.
    ///
    /// Pitch is clamped, so the camera may not face `center` exactly. When
    /// `center` lies straight along the up axis the current yaw is kept; when
    /// it equals `eye` only the position changes.
    pub fn look_at(&mut self, eye: Vec3, center: Vec3) {
        let Some(forward) = (center - eye).try_normalize() else {
            self.matrix.w_axis = eye.extend(1.0);
            return;
        };

        let horizontal = forward - self.up * forward.dot(self.up);
        let yaw = if horizontal.length_squared() > DEGENERATE_EPSILON {
            (-horizontal.dot(self.base_right))
                .atan2(horizontal.dot(self.base_forward))
                .to_degrees()
        } else {
            self.yaw()
        };
        let pitch = forward.dot(self.up).atan2(horizontal.length()).to_degrees();

        self.orient(yaw, pitch, eye);
    }

    /// Move along the camera's right axis.
    pub fn translate_right(&mut self, amount: f32) {
        self.translate(amount, self.right());
    }

    /// Move along the camera's viewing direction.
    pub fn translate_forward(&mut self, amount: f32) {
        self.translate(amount, self.forward());
    }

    /// Move along the camera's own up axis, which tilts with pitch.
    pub fn translate_up(&mut self, amount: f32) {
        self.translate(amount, self.up());
    }

    /// Move by `amount * direction`, with `direction` in world space.
    pub fn translate(&mut self, amount: f32, direction: Vec3) {
        self.matrix.w_axis += (direction * amount).extend(0.0);
    }

    /// Set the absolute yaw in degrees, keeping pitch.
    pub fn set_yaw(&mut self, yaw_deg: f32) {
        self.orient(yaw_deg, self.pitch(), self.position());
    }

    /// Set the absolute pitch in degrees, keeping yaw. Clamped to the
    /// camera's [`PitchLimits`].
    pub fn set_pitch(&mut self, pitch_deg: f32) {
        self.orient(self.yaw(), pitch_deg, self.position());
    }

    /// Accepted for parity with rolling cameras; this camera never rolls.
    #[allow(clippy::unused_self)]
    pub fn set_roll(&mut self, _roll_deg: f32) {}

    /// Turn left (positive) or right about the up axis.
    pub fn rotate_yaw(&mut self, amount_deg: f32) {
        self.orient(self.yaw() + amount_deg, self.pitch(), self.position());
    }

    /// Tilt up (positive) or down. The result is clamped.
    pub fn rotate_pitch(&mut self, amount_deg: f32) {
        self.orient(self.yaw(), self.pitch() + amount_deg, self.position());
    }

    /// Accepted for parity with rolling cameras; this camera never rolls.
    #[allow(clippy::unused_self)]
    pub fn rotate_roll(&mut self, _amount_deg: f32) {}

    /// Yaw in degrees, in `(-180, 180]`.
    ///
    /// Read from the right axis, which stays horizontal, so it is exact even
    /// at ±90° pitch.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        let right = self.right();
        right
            .dot(self.base_forward)
            .atan2(right.dot(self.base_right))
            .to_degrees()
    }

    /// Pitch in degrees, always within the camera's [`PitchLimits`].
    #[must_use]
    pub fn pitch(&self) -> f32 {
        let forward = self.forward();
        let horizontal = self.up.cross(self.right());
        let pitch = forward
            .dot(self.up)
            .atan2(forward.dot(horizontal))
            .to_degrees();
        self.limits.clamp(pitch)
    }

    /// Always `0.0`: roll is not part of this camera's rotation.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn roll(&self) -> f32 {
        0.0
    }

    /// Yaw, pitch and roll in degrees.
    #[must_use]
    pub fn yaw_pitch_roll(&self) -> (f32, f32, f32) {
        (self.yaw(), self.pitch(), self.roll())
    }

    /// Snapshot of the camera-to-world transform.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// World-to-camera transform, for use as a view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.matrix.inverse()
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Unit right axis.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.matrix.x_axis.truncate()
    }

    /// Unit up axis of the camera (tilted by pitch).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.matrix.y_axis.truncate()
    }

    /// Unit viewing direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        -self.matrix.z_axis.truncate()
    }

    /// The fixed world up axis that defines yaw and forbids roll.
    #[must_use]
    pub fn up_axis(&self) -> Vec3 {
        self.up
    }

    /// Configured pitch range.
    #[must_use]
    pub fn limits(&self) -> PitchLimits {
        self.limits
    }

    /// Rebuild the basis from yaw and clamped pitch.
    fn orient(&mut self, yaw_deg: f32, pitch_deg: f32, position: Vec3) {
        let pitch_deg = self.limits.clamp(pitch_deg);
        let rotation = Quat::from_axis_angle(self.up, yaw_deg.to_radians())
            * Quat::from_axis_angle(self.base_right, pitch_deg.to_radians());

        let right = rotation * self.base_right;
        let up = rotation * self.up;
        let back = -(rotation * self.base_forward);

        self.matrix = Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            back.extend(0.0),
            position.extend(1.0),
        );
    }
}
