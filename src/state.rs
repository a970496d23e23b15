//! Controller state: per-character scalars and ECS state markers.
//!
//! [`LocomotionState`] holds everything the tick pipeline carries between
//! frames: the grounded/airborne phase, the integrated vertical velocity,
//! speed and rotation smoothing state, the two countdown timers, and the
//! accumulated camera angles. The phase-dependent update rules live here as
//! methods so they can be exercised directly, with any `dt`, outside a
//! running app.

use bevy::prelude::*;

use crate::config::{CameraRigConfig, LocomotionConfig};
use crate::math;

/// Velocity the grounded clamp settles on, keeping the character pressed
/// against the ground for the next probe without unbounded downward drift.
const GROUNDED_SETTLE_VELOCITY: f32 = -2.0;

/// Band around the target speed inside which the blend snaps exactly.
const SPEED_SNAP_BAND: f32 = 0.1;

/// Squared look magnitude below which camera input is ignored.
const LOOK_THRESHOLD: f32 = 0.01;

/// The two phases of the grounded/airborne state machine.
///
/// Transitions are implicit: the grounded probe result each tick decides the
/// phase, there are no explicit transition events.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundPhase {
    /// Feet within tolerance of a standable surface.
    #[default]
    Grounded,
    /// No ground contact reported by the probe.
    Airborne,
}

/// Marker component present while the character is grounded.
///
/// Synced from [`LocomotionState::phase`] each tick; mutually exclusive with
/// [`Airborne`]. Marker components keep grounded-state queries cheap for
/// gameplay systems outside this crate.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component present while the character is airborne.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Animation bool emissions produced by one vertical-integration step.
///
/// `None` means the parameter is left untouched this tick: while airborne the
/// jump flag keeps whatever value it had, and the free-fall flag only flips
/// once the fall timeout expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalEvents {
    /// New value for the `Jump` parameter, if it should be written.
    pub jump: Option<bool>,
    /// New value for the `FreeFall` parameter, if it should be written.
    pub free_fall: Option<bool>,
}

/// Result of one speed-blend step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBlend {
    /// Speed the character is asked to reach this tick.
    pub target_speed: f32,
    /// Input magnitude: move-vector length in analog mode, otherwise 1.
    pub input_magnitude: f32,
}

/// Per-character controller state, advanced once per simulation tick.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Current phase of the grounded/airborne machine.
    pub phase: GroundPhase,
    /// Gravity-integrated vertical velocity in m/s.
    pub vertical_velocity: f32,
    /// Smoothed locomotion speed applied to displacement.
    pub current_speed: f32,
    /// Smoothed speed used only for animation blending; never snaps.
    pub animation_blend: f32,
    /// Yaw the character is turning toward, in degrees.
    pub target_yaw_degrees: f32,
    /// Angular velocity state for the critically-damped yaw spring.
    pub yaw_velocity: f32,
    /// Countdown until another jump is allowed. Stops below zero.
    pub jump_timeout_remaining: f32,
    /// Countdown until the airborne state counts as free fall.
    pub fall_timeout_remaining: f32,
    /// Accumulated camera yaw in degrees, folded into `[-360, 360]`.
    pub camera_yaw: f32,
    /// Accumulated camera pitch in degrees, clamped to the configured range.
    pub camera_pitch: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self::new(&LocomotionConfig::default())
    }
}

impl LocomotionState {
    /// State at controller activation: grounded, at rest, timers armed with
    /// the configured timeout constants.
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            phase: GroundPhase::Grounded,
            vertical_velocity: 0.0,
            current_speed: 0.0,
            animation_blend: 0.0,
            target_yaw_degrees: 0.0,
            yaw_velocity: 0.0,
            jump_timeout_remaining: config.jump_timeout,
            fall_timeout_remaining: config.fall_timeout,
            camera_yaw: 0.0,
            camera_pitch: 0.0,
        }
    }

    /// Whether the last grounded probe reported contact.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.phase == GroundPhase::Grounded
    }

    /// Latch the probe result into the phase. Returns true on a transition.
    pub fn latch_grounded(&mut self, grounded: bool) -> bool {
        let next = if grounded {
            GroundPhase::Grounded
        } else {
            GroundPhase::Airborne
        };
        let changed = next != self.phase;
        self.phase = next;
        changed
    }

    /// Step B: jump intent, timers, and gravity integration.
    ///
    /// Runs exactly once per tick regardless of phase. While grounded the
    /// fall timeout re-arms every tick (not just on entry) and a negative
    /// vertical velocity settles at -2 so the character stays pressed against
    /// the ground; while airborne the jump timeout re-arms every tick and the
    /// fall timeout counts down, flagging free fall one tick after it crosses
    /// zero. Gravity integrates only while the velocity is below the
    /// terminal constant.
    pub fn integrate_vertical(
        &mut self,
        config: &LocomotionConfig,
        jump_requested: bool,
        dt: f32,
    ) -> VerticalEvents {
        let mut events = VerticalEvents::default();

        match self.phase {
            GroundPhase::Grounded => {
                self.fall_timeout_remaining = config.fall_timeout;
                events.jump = Some(false);
                events.free_fall = Some(false);

                if self.vertical_velocity < 0.0 {
                    self.vertical_velocity = GROUNDED_SETTLE_VELOCITY;
                }

                if jump_requested && self.jump_timeout_remaining <= 0.0 {
                    self.vertical_velocity = config.jump_velocity();
                    events.jump = Some(true);
                }

                if self.jump_timeout_remaining >= 0.0 {
                    self.jump_timeout_remaining -= dt;
                }
            }
            GroundPhase::Airborne => {
                self.jump_timeout_remaining = config.jump_timeout;

                if self.fall_timeout_remaining >= 0.0 {
                    self.fall_timeout_remaining -= dt;
                } else {
                    events.free_fall = Some(true);
                }
            }
        }

        if self.vertical_velocity < config.terminal_velocity {
            self.vertical_velocity += config.gravity * dt;
        }

        events
    }

    /// Step C (speed): blend `current_speed` and `animation_blend` toward the
    /// target speed.
    ///
    /// Outside a small band around the target, the speed approaches
    /// exponentially (curved rather than linear) and is rounded to three
    /// decimals to suppress asymptotic drift; inside the band it snaps exact.
    /// The animation blend uses the same rate but never snaps.
    pub fn blend_speed(
        &mut self,
        config: &LocomotionConfig,
        current_horizontal_speed: f32,
        move_input: Vec2,
        analog: bool,
        dt: f32,
    ) -> SpeedBlend {
        let target_speed = if move_input == Vec2::ZERO {
            0.0
        } else {
            config.move_speed
        };
        let input_magnitude = if analog { move_input.length() } else { 1.0 };

        if current_horizontal_speed < target_speed - SPEED_SNAP_BAND
            || current_horizontal_speed > target_speed + SPEED_SNAP_BAND
        {
            self.current_speed = math::lerp(
                current_horizontal_speed,
                target_speed * input_magnitude,
                dt * config.speed_change_rate,
            );
            self.current_speed = math::round_to_millis(self.current_speed);
        } else {
            self.current_speed = target_speed;
        }

        self.animation_blend = math::lerp(
            self.animation_blend,
            target_speed,
            dt * config.speed_change_rate,
        );

        SpeedBlend {
            target_speed,
            input_magnitude,
        }
    }

    /// Step C (rotation): turn toward the camera-relative input heading.
    ///
    /// With a nonzero move vector, the target yaw is the input direction's
    /// angle plus the camera yaw, and the character's yaw is critically
    /// damped toward it; returns the new facing in degrees. With zero input,
    /// the target yaw holds its last value and the facing is unchanged.
    pub fn turn_toward(
        &mut self,
        config: &LocomotionConfig,
        move_input: Vec2,
        current_yaw_degrees: f32,
        dt: f32,
    ) -> Option<f32> {
        if move_input == Vec2::ZERO {
            return None;
        }

        let direction = Vec3::new(move_input.x, 0.0, move_input.y).normalize_or_zero();
        self.target_yaw_degrees = direction.x.atan2(direction.z).to_degrees() + self.camera_yaw;

        Some(math::smooth_damp_angle(
            current_yaw_degrees,
            self.target_yaw_degrees,
            &mut self.yaw_velocity,
            config.rotation_smooth_time,
            dt,
        ))
    }

    /// Unit vector of the heading the character is moving along.
    ///
    /// Derived from the target yaw, so with zero input the character keeps
    /// drifting along its last faced direction at the decaying speed.
    #[inline]
    pub fn heading(&self) -> Vec3 {
        Quat::from_rotation_y(self.target_yaw_degrees.to_radians()) * Vec3::Z
    }

    /// Step D: accumulate and clamp the camera angles.
    ///
    /// Look input below the threshold, or a locked camera, leaves the angles
    /// untouched. Yaw folds back by one period beyond plus or minus 360;
    /// pitch is a true clamp into the configured range.
    pub fn rotate_camera(&mut self, camera: &CameraRigConfig, look: Vec2, dt: f32) {
        if look.length_squared() >= LOOK_THRESHOLD && !camera.lock_camera_position {
            self.camera_yaw += look.x * dt;
            self.camera_pitch += look.y * dt;
        }

        self.camera_yaw = math::clamp_angle(self.camera_yaw, f32::MIN, f32::MAX);
        self.camera_pitch =
            math::clamp_angle(self.camera_pitch, camera.bottom_clamp, camera.top_clamp);
    }

    /// Orientation for the camera follow target: pitch plus override, then
    /// yaw, roll always zero.
    pub fn camera_orientation(&self, camera: &CameraRigConfig) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.camera_yaw.to_radians(),
            (self.camera_pitch + camera.camera_angle_override).to_radians(),
            0.0,
        )
    }

    /// Debug-draw color for the grounded probe sphere: translucent green when
    /// grounded, translucent red when airborne.
    pub fn probe_gizmo_color(&self) -> [f32; 4] {
        if self.grounded() {
            [0.0, 1.0, 0.0, 0.35]
        } else {
            [1.0, 0.0, 0.0, 0.35]
        }
    }
}
