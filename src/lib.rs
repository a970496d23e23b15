//! # `third_person_locomotion`
//!
//! A third-person character locomotion controller with physics backend
//! abstraction.
//!
//! This crate converts normalized directional/look input into grounded
//! movement, jumping, gravity integration, camera orientation, and animation
//! parameter output for a humanoid character moving over arbitrary terrain:
//! - Grounded/airborne state machine with jump and fall timeouts
//! - Gravity integration with a terminal-velocity gate
//! - Exponential speed blending and critically-damped turn smoothing that
//!   stay stable across variable frame time
//! - Camera-relative movement and an orbit-style yaw/pitch follow target
//! - Pluggable input adapters (keyboard+mouse, touch, action bindings)
//! - Abstracted physics backend (Rapier3D included behind `rapier3d`)
//!
//! ## Architecture
//!
//! Two components advance once per simulation tick, in order:
//! 1. [`input::InputState`] - the per-character input snapshot written by a
//!    device adapter and read synchronously by the controller.
//! 2. [`state::LocomotionState`] - the state machine consuming the snapshot
//!    and the physics primitives, producing position/rotation, a camera-rig
//!    orientation, and named animation parameters.
//!
//! The physics host supplies three primitives through
//! [`backend::LocomotionPhysicsBackend`]: a grounded sphere-overlap probe, a
//! collision-resolving move, and the last resolved velocity. Rendering,
//! animation playback, and device polling stay outside the crate.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use third_person_locomotion::prelude::*;
//!
//! # struct MyBackend;
//! # impl LocomotionPhysicsBackend for MyBackend {
//! #     fn plugin() -> impl Plugin { NoOpBackendPlugin }
//! #     fn velocity(_: &World, _: Entity) -> Vec3 { Vec3::ZERO }
//! #     fn position(_: &World, _: Entity) -> Vec3 { Vec3::ZERO }
//! #     fn move_with_collision(_: &mut World, _: Entity, _: Vec3) {}
//! # }
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(LocomotionControllerPlugin::<MyBackend>::default())
//!     .run();
//! ```

use bevy::prelude::*;

use crate::backend::GroundProbe;
use crate::config::{CameraRigConfig, LocomotionConfig};
use crate::input::InputState;
use crate::state::LocomotionState;

pub mod adapters;
pub mod animation;
pub mod backend;
pub mod camera;
pub mod config;
pub mod input;
pub mod math;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::adapters::{
        ActionBindingAdapter, InputActionEvent, InputAdapterKind, KeyboardMouseAdapter,
        TouchLookAdapter, TouchPhase, TouchSample, VirtualControlsAdapter,
    };
    pub use crate::animation::{AnimationParam, AnimationSink, AnimatorLink, RecordingSink};
    pub use crate::backend::{GroundProbe, LocomotionPhysicsBackend, NoOpBackendPlugin};
    pub use crate::camera::CameraFollowTarget;
    pub use crate::config::{CameraRigConfig, LocomotionConfig};
    pub use crate::input::{InputSource, InputState};
    pub use crate::state::{Airborne, GroundPhase, Grounded, LocomotionState};
    pub use crate::{LocomotionCharacterBundle, LocomotionControllerPlugin, LocomotionSet};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle};
}

/// Ordering of the per-tick pipeline within `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Backend sensor systems (the grounded sphere-overlap probe).
    Sensors,
    /// Steps A-C: probe latch, jump/gravity integration, movement.
    Locomotion,
    /// Marker-component sync after the state has settled.
    StateSync,
}

/// Everything a controlled character needs besides its transform, collider,
/// and backend-specific physics components.
#[derive(Bundle)]
pub struct LocomotionCharacterBundle {
    pub config: LocomotionConfig,
    pub camera_config: CameraRigConfig,
    pub input: InputState,
    pub state: LocomotionState,
    pub probe: GroundProbe,
}

impl LocomotionCharacterBundle {
    /// Build a character from its locomotion configuration; timers start
    /// armed with the configured timeout constants.
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            state: LocomotionState::new(&config),
            config,
            camera_config: CameraRigConfig::default(),
            input: InputState::new(),
            probe: GroundProbe::default(),
        }
    }

    /// Builder: set the camera rig configuration.
    pub fn with_camera(mut self, camera_config: CameraRigConfig) -> Self {
        self.camera_config = camera_config;
        self
    }

    /// Builder: enable analog movement on the input snapshot.
    pub fn with_analog_movement(mut self) -> Self {
        self.input = self.input.with_analog(true);
        self
    }
}

impl Default for LocomotionCharacterBundle {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

/// Main plugin for the locomotion controller.
///
/// Generic over a physics backend `B` which provides the actual physics
/// operations (ground probing, collision-aware movement).
///
/// Steps A-C run chained in `FixedUpdate` after the backend's sensor
/// systems; Step D (camera) runs in `FixedPostUpdate` so it reads the
/// freshest look input while character motion reads it pre-update, avoiding
/// feedback inside the same tick.
pub struct LocomotionControllerPlugin<B: backend::LocomotionPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::LocomotionPhysicsBackend> Default for LocomotionControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::LocomotionPhysicsBackend> Plugin for LocomotionControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::LocomotionConfig>();
        app.register_type::<config::CameraRigConfig>();
        app.register_type::<input::InputState>();
        app.register_type::<state::LocomotionState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<backend::GroundProbe>();
        app.register_type::<camera::CameraFollowTarget>();

        app.init_resource::<adapters::InputAdapterKind>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        app.configure_sets(
            FixedUpdate,
            (
                LocomotionSet::Sensors,
                LocomotionSet::Locomotion,
                LocomotionSet::StateSync,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::latch_ground_probe,
                systems::integrate_jump_and_gravity,
                systems::apply_move::<B>,
            )
                .chain()
                .in_set(LocomotionSet::Locomotion),
        );

        app.add_systems(
            FixedUpdate,
            systems::sync_state_markers.in_set(LocomotionSet::StateSync),
        );

        // Camera runs after the main tick, on post-integration input.
        app.add_systems(FixedPostUpdate, systems::rotate_camera_rig);
    }
}
