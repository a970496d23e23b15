//! Per-character input snapshot.
//!
//! [`InputState`] is the mutable snapshot the controller reads each tick:
//! a 2D move vector, a 2D look delta, a level-triggered jump flag, and the
//! analog-movement mode. Device adapters (see [`crate::adapters`]) overwrite
//! it every tick; the controller reads it synchronously in the same tick.
//!
//! Each character owns its own `InputState` component. There is no shared
//! singleton; writes are last-writer-wins within a tick and no arbitration
//! between concurrently active adapters is attempted.

use bevy::prelude::*;

/// The input capability adapters write through and the controller reads.
///
/// Adapters are generic over this trait so they can drive any input snapshot,
/// not just the ECS component.
pub trait InputSource {
    /// Overwrite the directional movement intent. Axes are expected in
    /// `[-1, 1]`; no validation is performed.
    fn set_move(&mut self, movement: Vec2);

    /// Overwrite this tick's accumulated look displacement. Unbounded.
    fn set_look(&mut self, look: Vec2);

    /// Overwrite the jump intent (level-triggered).
    fn set_jump(&mut self, jumping: bool);

    /// The current movement intent.
    fn movement(&self) -> Vec2;

    /// The current look displacement.
    fn look(&self) -> Vec2;

    /// Whether jump is currently requested.
    fn is_jumping(&self) -> bool;

    /// Whether move-vector magnitude scales target speed continuously.
    /// When false, only direction matters and magnitude is treated as 1.
    fn is_analog(&self) -> bool;
}

/// Input snapshot component, one per controlled character.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct InputState {
    move_input: Vec2,
    look_input: Vec2,
    jump_held: bool,
    analog_movement: bool,
}

impl InputState {
    /// Create an empty snapshot with digital movement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty snapshot with analog movement enabled.
    pub fn analog() -> Self {
        Self {
            analog_movement: true,
            ..Self::default()
        }
    }

    /// Builder: set the analog-movement mode.
    pub fn with_analog(mut self, analog: bool) -> Self {
        self.analog_movement = analog;
        self
    }

    /// Enable or disable analog movement at runtime.
    pub fn set_analog(&mut self, analog: bool) {
        self.analog_movement = analog;
    }
}

impl InputSource for InputState {
    fn set_move(&mut self, movement: Vec2) {
        self.move_input = movement;
    }

    fn set_look(&mut self, look: Vec2) {
        self.look_input = look;
    }

    fn set_jump(&mut self, jumping: bool) {
        self.jump_held = jumping;
    }

    fn movement(&self) -> Vec2 {
        self.move_input
    }

    fn look(&self) -> Vec2 {
        self.look_input
    }

    fn is_jumping(&self) -> bool {
        self.jump_held
    }

    fn is_analog(&self) -> bool {
        self.analog_movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_starts_neutral() {
        let input = InputState::new();
        assert_eq!(input.movement(), Vec2::ZERO);
        assert_eq!(input.look(), Vec2::ZERO);
        assert!(!input.is_jumping());
        assert!(!input.is_analog());
    }

    #[test]
    fn writes_are_last_writer_wins() {
        let mut input = InputState::new();
        input.set_move(Vec2::new(0.3, 0.7));
        input.set_move(Vec2::new(-1.0, 0.0));
        assert_eq!(input.movement(), Vec2::new(-1.0, 0.0));

        input.set_jump(true);
        input.set_jump(false);
        assert!(!input.is_jumping());
    }

    #[test]
    fn analog_mode_round_trips() {
        let input = InputState::analog();
        assert!(input.is_analog());
        let input = InputState::new().with_analog(true);
        assert!(input.is_analog());
    }
}
