//! Core controller systems.
//!
//! The per-tick pipeline runs in fixed order: ground probe latch, jump and
//! gravity integration, movement, state-marker sync, and (after the main
//! tick) camera rotation. Systems that call into the physics backend take
//! `&mut World` and are generic over the backend; the rest are ordinary
//! parameterized systems.

use bevy::log::debug;
use bevy::prelude::*;

use crate::animation::{AnimationParam, AnimatorLink};
use crate::backend::{GroundProbe, LocomotionPhysicsBackend};
use crate::camera::CameraFollowTarget;
use crate::config::{CameraRigConfig, LocomotionConfig};
use crate::input::{InputSource, InputState};
use crate::state::{Airborne, GroundPhase, Grounded, LocomotionState};

/// Fallback timestep when the fixed clock has not advanced (tests, manual
/// schedule runs).
const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Effective tick delta in seconds.
pub(crate) fn fixed_delta(time: Option<&Time<Fixed>>) -> f32 {
    time.map(|t| t.delta_secs())
        .filter(|&dt| dt > 0.0)
        .unwrap_or(DEFAULT_TIMESTEP)
}

/// Step A: latch the backend's grounded probe into the controller state.
///
/// The probe result overwrites the phase every tick; the `Grounded`
/// animation bool is emitted unconditionally.
pub fn latch_ground_probe(
    mut q_characters: Query<(
        Entity,
        &GroundProbe,
        &mut LocomotionState,
        Option<&mut AnimatorLink>,
    )>,
) {
    for (entity, probe, mut state, mut animator) in &mut q_characters {
        if state.latch_grounded(probe.overlapping) {
            debug!(
                "locomotion {entity}: {}",
                if state.grounded() { "landed" } else { "airborne" }
            );
        }

        if let Some(animator) = animator.as_mut() {
            animator
                .0
                .set_bool(AnimationParam::Grounded, probe.overlapping);
        }
    }
}

/// Step B: jump intent, countdown timers, and gravity integration.
pub fn integrate_jump_and_gravity(
    time: Option<Res<Time<Fixed>>>,
    mut q_characters: Query<(
        &InputState,
        &LocomotionConfig,
        &mut LocomotionState,
        Option<&mut AnimatorLink>,
    )>,
) {
    let dt = fixed_delta(time.as_deref());

    for (input, config, mut state, mut animator) in &mut q_characters {
        let events = state.integrate_vertical(config, input.is_jumping(), dt);

        if let Some(animator) = animator.as_mut() {
            if let Some(jump) = events.jump {
                animator.0.set_bool(AnimationParam::Jump, jump);
            }
            if let Some(free_fall) = events.free_fall {
                animator.0.set_bool(AnimationParam::FreeFall, free_fall);
            }
        }
    }
}

/// Step C: speed blending, rotation smoothing, and the combined displacement.
///
/// Horizontal locomotion and vertical fall/jump go through a single
/// collision-aware move per tick. Emits the `Speed` and `MotionSpeed`
/// animation floats.
pub fn apply_move<B: LocomotionPhysicsBackend>(world: &mut World) {
    let dt = fixed_delta(world.get_resource::<Time<Fixed>>());

    let characters: Vec<(Entity, LocomotionConfig, InputState)> = world
        .query::<(Entity, &LocomotionConfig, &InputState, &LocomotionState)>()
        .iter(world)
        .map(|(entity, config, input, _)| (entity, *config, input.clone()))
        .collect();

    for (entity, config, input) in characters {
        let velocity = B::velocity(world, entity);
        let horizontal_speed = Vec3::new(velocity.x, 0.0, velocity.z).length();
        let current_yaw = world
            .get::<Transform>(entity)
            .map(|t| t.rotation.to_euler(EulerRot::YXZ).0.to_degrees())
            .unwrap_or(0.0);

        let Some(mut state) = world.get_mut::<LocomotionState>(entity) else {
            continue;
        };
        let blend = state.blend_speed(
            &config,
            horizontal_speed,
            input.movement(),
            input.is_analog(),
            dt,
        );
        let new_yaw = state.turn_toward(&config, input.movement(), current_yaw, dt);
        let heading = state.heading();
        let speed = state.current_speed;
        let vertical_velocity = state.vertical_velocity;
        let animation_blend = state.animation_blend;

        if let Some(yaw) = new_yaw {
            if let Some(mut transform) = world.get_mut::<Transform>(entity) {
                transform.rotation = Quat::from_rotation_y(yaw.to_radians());
            }
        }

        let displacement =
            heading.normalize_or_zero() * (speed * dt) + Vec3::new(0.0, vertical_velocity, 0.0) * dt;
        B::move_with_collision(world, entity, displacement);

        if let Some(mut animator) = world.get_mut::<AnimatorLink>(entity) {
            animator.0.set_float(AnimationParam::Speed, animation_blend);
            animator
                .0
                .set_float(AnimationParam::MotionSpeed, blend.input_magnitude);
        }
    }
}

/// Sync the `Grounded`/`Airborne` marker components from the phase.
pub fn sync_state_markers(
    mut commands: Commands,
    q_characters: Query<(Entity, &LocomotionState, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, state, has_grounded, has_airborne) in &q_characters {
        match state.phase {
            GroundPhase::Grounded if !has_grounded => {
                commands.entity(entity).insert(Grounded).remove::<Airborne>();
            }
            GroundPhase::Airborne if !has_airborne => {
                commands.entity(entity).insert(Airborne).remove::<Grounded>();
            }
            _ => {}
        }
    }
}

/// Step D: camera rotation, run after the main tick.
///
/// Reads the freshest look input, accumulates and clamps the camera angles,
/// and orients the follow-target transform (roll always zero). Characters
/// without a follow target still accumulate angles.
pub fn rotate_camera_rig(
    time: Option<Res<Time<Fixed>>>,
    mut q_characters: Query<(
        &InputState,
        &CameraRigConfig,
        &mut LocomotionState,
        Option<&CameraFollowTarget>,
    )>,
    mut q_targets: Query<&mut Transform, Without<LocomotionState>>,
) {
    let dt = fixed_delta(time.as_deref());

    for (input, camera, mut state, follow_target) in &mut q_characters {
        state.rotate_camera(camera, input.look(), dt);

        if let Some(target) = follow_target {
            if let Ok(mut transform) = q_targets.get_mut(target.entity()) {
                transform.rotation = state.camera_orientation(camera);
            }
        }
    }
}
