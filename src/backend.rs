//! Physics backend abstraction.
//!
//! This module defines the trait that physics hosts must implement to work
//! with the locomotion controller. The controller needs only three
//! primitives from its host: a sphere-overlap test for grounding, a
//! collision-resolving move, and the last resolved velocity.
//!
//! The overlap test runs as a backend-registered sensor system (physics
//! engines expose their query pipelines as system parameters, not through
//! `&World`); its result lands in the [`GroundProbe`] component that Step A
//! of the pipeline latches.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the locomotion
/// controller. For an example implementation see the `rapier` module's
/// `Rapier3dBackend` (behind the `rapier3d` feature).
pub trait LocomotionPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    ///
    /// The plugin must register a sensor system in
    /// [`LocomotionSet::Sensors`](crate::LocomotionSet::Sensors) that
    /// performs the grounded sphere-overlap query (center at the character
    /// position minus the configured offset, configured radius, ground
    /// layers only, trigger colliders ignored) and writes the result into
    /// the entity's [`GroundProbe`].
    fn plugin() -> impl Plugin;

    /// Last resolved velocity of the character, as produced by the previous
    /// collision-aware move.
    fn velocity(world: &World, entity: Entity) -> Vec3;

    /// Current world position of the character.
    fn position(world: &World, entity: Entity) -> Vec3;

    /// Displace the character, resolving collisions.
    ///
    /// Called exactly once per tick per character with the combined
    /// horizontal and vertical displacement. Must be deterministic given
    /// identical displacement and world state.
    fn move_with_collision(world: &mut World, entity: Entity, displacement: Vec3);
}

/// Result of the backend's grounded sphere-overlap query.
///
/// Overwritten every tick by the backend's sensor system and latched into
/// [`LocomotionState`](crate::state::LocomotionState) by Step A. Starts
/// grounded, matching the controller's activation state.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct GroundProbe {
    /// Whether the probe sphere overlapped any ground collider.
    pub overlapping: bool,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self { overlapping: true }
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_probe_defaults_to_grounded() {
        assert!(GroundProbe::default().overlapping);
    }
}
