//! Camera follow-target link.
//!
//! The controller does not render anything; it only orients a follow-target
//! transform that an external camera rig (orbit camera, cinematic follow
//! system) tracks. The accumulated yaw/pitch live in
//! [`LocomotionState`](crate::state::LocomotionState) so Step C can express
//! movement relative to the camera facing.

use bevy::prelude::*;

/// Links a character to the transform its camera rig follows.
///
/// The camera system writes the orientation quaternion (pitch plus override,
/// yaw, zero roll) to this entity's `Transform` after the main tick. A
/// character without this component still accumulates camera angles, it just
/// orients no transform.
#[derive(Component, Reflect, Debug, Clone, Copy)]
pub struct CameraFollowTarget(pub Entity);

impl CameraFollowTarget {
    /// The follow-target entity.
    #[inline]
    pub fn entity(&self) -> Entity {
        self.0
    }
}
