//! Controller configuration components.
//!
//! All values are numeric constants fixed at construction; there is no
//! runtime reconfiguration surface. Defaults are tuned for a humanoid of
//! roughly capsule height 1.8 and carry over from a well-trodden third-person
//! setup. Malformed values (e.g. a negative grounded radius) are a
//! configuration-time contract violation the controller does not detect.

use bevy::prelude::*;

/// Movement, jump, and grounding configuration for one character.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct LocomotionConfig {
    // === Movement ===
    /// Move speed of the character in m/s.
    pub move_speed: f32,

    /// How fast the character turns to face movement direction (seconds,
    /// roughly 0.0 to 0.3).
    pub rotation_smooth_time: f32,

    /// Acceleration and deceleration rate for the speed blend.
    pub speed_change_rate: f32,

    // === Jump & gravity ===
    /// The height the character can jump, in meters.
    pub jump_height: f32,

    /// The character uses its own gravity value, not the engine default.
    /// Negative, in m/s^2.
    pub gravity: f32,

    /// Maximum downward speed magnitude gravity integration will produce.
    pub terminal_velocity: f32,

    /// Time required to pass before being able to jump again. Set to 0.0 to
    /// instantly jump again.
    pub jump_timeout: f32,

    /// Time required to pass before entering the fall state. Useful for
    /// walking down stairs.
    pub fall_timeout: f32,

    // === Grounding ===
    /// Vertical offset of the grounded probe sphere below the character
    /// origin. Useful for rough ground.
    pub grounded_offset: f32,

    /// Radius of the grounded probe. Should match the collider radius.
    pub grounded_radius: f32,

    /// Bitmask of collision layers the character treats as ground.
    pub ground_layers: u32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.335,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            jump_height: 1.2,
            gravity: -15.0,
            terminal_velocity: 53.0,
            jump_timeout: 0.50,
            fall_timeout: 0.15,
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            ground_layers: 1,
        }
    }
}

impl LocomotionConfig {
    /// Initial upward velocity that reaches `jump_height` at the apex under
    /// this configuration's gravity: `sqrt(h * -2 * g)`.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    /// Builder: set move speed.
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set rotation smoothing time.
    pub fn with_rotation_smooth_time(mut self, time: f32) -> Self {
        self.rotation_smooth_time = time;
        self
    }

    /// Builder: set speed change rate.
    pub fn with_speed_change_rate(mut self, rate: f32) -> Self {
        self.speed_change_rate = rate;
        self
    }

    /// Builder: set jump height and gravity together.
    pub fn with_jump(mut self, height: f32, gravity: f32) -> Self {
        self.jump_height = height;
        self.gravity = gravity;
        self
    }

    /// Builder: set the jump re-arm timeout.
    pub fn with_jump_timeout(mut self, timeout: f32) -> Self {
        self.jump_timeout = timeout;
        self
    }

    /// Builder: set the fall-state entry timeout.
    pub fn with_fall_timeout(mut self, timeout: f32) -> Self {
        self.fall_timeout = timeout;
        self
    }

    /// Builder: set the grounded probe geometry.
    pub fn with_grounded_probe(mut self, offset: f32, radius: f32) -> Self {
        self.grounded_offset = offset;
        self.grounded_radius = radius;
        self
    }

    /// Builder: set the ground layer mask.
    pub fn with_ground_layers(mut self, layers: u32) -> Self {
        self.ground_layers = layers;
        self
    }
}

/// Camera rig configuration for one character.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct CameraRigConfig {
    /// How far in degrees the camera can look up.
    pub top_clamp: f32,

    /// How far in degrees the camera can look down.
    pub bottom_clamp: f32,

    /// Additional degrees to override the camera pitch. Useful for fine
    /// tuning camera position when locked.
    pub camera_angle_override: f32,

    /// For locking the camera position on all axes.
    pub lock_camera_position: bool,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            camera_angle_override: 0.0,
            lock_camera_position: false,
        }
    }
}

impl CameraRigConfig {
    /// Builder: set the pitch clamp range.
    pub fn with_pitch_clamp(mut self, bottom: f32, top: f32) -> Self {
        self.bottom_clamp = bottom;
        self.top_clamp = top;
        self
    }

    /// Builder: set the pitch override in degrees.
    pub fn with_angle_override(mut self, degrees: f32) -> Self {
        self.camera_angle_override = degrees;
        self
    }

    /// Builder: lock or unlock the camera.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.lock_camera_position = locked;
        self
    }
}
