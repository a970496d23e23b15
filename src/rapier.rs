//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D. Enable with
//! the `rapier3d` feature.
//!
//! The character is a kinematic body driven through Rapier's
//! `KinematicCharacterController`: the locomotion pipeline hands it one
//! combined displacement per tick, Rapier resolves collisions, and the
//! resolved translation comes back through
//! `KinematicCharacterControllerOutput`. The grounded probe is a ball
//! intersection query against the configured ground layers, with sensor
//! (trigger) colliders excluded.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::{GroundProbe, LocomotionPhysicsBackend};
use crate::config::LocomotionConfig;
use crate::systems::fixed_delta;
use crate::LocomotionSet;

/// Rapier3D physics backend for the locomotion controller.
pub struct Rapier3dBackend;

impl LocomotionPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn velocity(world: &World, entity: Entity) -> Vec3 {
        let dt = fixed_delta(world.get_resource::<Time<Fixed>>());
        world
            .get::<KinematicCharacterControllerOutput>(entity)
            .map(|output| output.effective_translation / dt)
            .unwrap_or(Vec3::ZERO)
    }

    fn position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }

    fn move_with_collision(world: &mut World, entity: Entity, displacement: Vec3) {
        if let Some(mut controller) = world.get_mut::<KinematicCharacterController>(entity) {
            controller.translation = Some(displacement);
        }
    }
}

/// Plugin that sets up Rapier3D-specific systems for the controller.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            rapier_ground_probe.in_set(LocomotionSet::Sensors),
        );
    }
}

/// Grounded sphere-overlap probe.
///
/// Tests a ball of the configured radius, centered at the character position
/// minus the configured vertical offset, against the ground layer mask.
/// Sensor colliders are ignored, as is the character's own body.
fn rapier_ground_probe(
    rapier_context: ReadRapierContext,
    mut q_characters: Query<(Entity, &GlobalTransform, &LocomotionConfig, &mut GroundProbe)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, mut probe) in &mut q_characters {
        let center = transform.translation() - Vec3::new(0.0, config.grounded_offset, 0.0);
        let shape = bevy_rapier3d::parry::shape::Ball::new(config.grounded_radius);
        let filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(entity)
            .groups(CollisionGroups::new(
                Group::all(),
                Group::from_bits_truncate(config.ground_layers),
            ));

        let mut overlapping = false;
        context.intersect_shape(center, Quat::IDENTITY, &shape, filter, |_| {
            overlapping = true;
            false
        });
        probe.overlapping = overlapping;
    }
}

/// Physics components for a Rapier-driven character, spawned alongside
/// [`LocomotionCharacterBundle`](crate::LocomotionCharacterBundle).
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub controller: KinematicCharacterController,
}

impl Rapier3dCharacterBundle {
    /// A kinematic capsule character. `half_height` is the half-length of
    /// the capsule segment, matching `Collider::capsule_y`.
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            collider: Collider::capsule_y(half_height, radius),
            controller: KinematicCharacterController::default(),
        }
    }
}

impl Default for Rapier3dCharacterBundle {
    fn default() -> Self {
        // Roughly humanoid: 1.8 total height, 0.28 radius.
        Self::capsule(0.62, 0.28)
    }
}
