//! Device input adapters.
//!
//! Adapters translate normalized device samples into an [`InputSource`]
//! snapshot. Device enumeration and raw polling stay outside this crate: the
//! host samples its platform layer each tick and feeds one adapter, selected
//! at startup via [`InputAdapterKind`]. Only one adapter is expected to drive
//! a given snapshot per tick.

use bevy::prelude::*;

use crate::input::InputSource;

/// Which adapter the host drives for this build, selected at startup.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Resource)]
pub enum InputAdapterKind {
    /// Desktop keyboard axes plus mouse look.
    #[default]
    KeyboardMouse,
    /// Touchscreen look with on-screen virtual controls for move/jump.
    Touch,
    /// Event-driven action bindings (gamepad or rebindable input systems).
    ActionBindings,
}

/// Keyboard + mouse adapter.
///
/// Move axes pass through untouched; mouse deltas are scaled by sensitivity
/// with the vertical axis inverted so pushing the mouse forward looks up.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct KeyboardMouseAdapter {
    /// Scale applied to raw mouse deltas.
    pub mouse_sensitivity: f32,
}

impl Default for KeyboardMouseAdapter {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 200.0,
        }
    }
}

impl KeyboardMouseAdapter {
    /// Feed one tick of keyboard/mouse samples into the snapshot.
    pub fn apply<S: InputSource>(
        &self,
        input: &mut S,
        move_axes: Vec2,
        mouse_delta: Vec2,
        jump_held: bool,
    ) {
        input.set_look(Vec2::new(mouse_delta.x, -mouse_delta.y) * self.mouse_sensitivity);
        input.set_move(move_axes);
        input.set_jump(jump_held);
    }
}

/// Lifecycle phase of a touch point within the current tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// Whether the touch is still on the screen.
    pub fn is_active(self) -> bool {
        matches!(self, TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary)
    }
}

/// One active touch point as sampled by the host this tick.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct TouchSample {
    /// Stable identifier for the touch across its lifetime.
    pub id: u64,
    /// Phase this tick.
    pub phase: TouchPhase,
    /// Screen-space movement since the previous tick.
    pub delta: Vec2,
    /// Whether the touch is over an interactive UI element.
    pub over_ui: bool,
}

/// Touchscreen look adapter with a sticky first-touch policy.
///
/// The first touch that began this tick and is not over UI becomes the look
/// touch; its identifier stays latched until that touch leaves the screen,
/// even if other touches begin in the meantime. Once it ends, look deltas are
/// zero until a new qualifying touch begins. The stickiness keeps camera
/// control stable while a second finger works the virtual joystick.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct TouchLookAdapter {
    /// Scale applied to touch deltas.
    pub sensitivity: f32,
    look_touch: Option<u64>,
}

impl Default for TouchLookAdapter {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl TouchLookAdapter {
    /// Create an adapter with the given touch sensitivity.
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            look_touch: None,
        }
    }

    /// The currently latched look touch, if any.
    pub fn look_touch(&self) -> Option<u64> {
        self.look_touch
    }

    /// Feed one tick of touch samples into the snapshot.
    ///
    /// Move and jump are driven separately (virtual controls); this only
    /// writes the look vector.
    pub fn apply<S: InputSource>(&mut self, input: &mut S, touches: &[TouchSample]) {
        input.set_look(Vec2::ZERO);

        if touches.is_empty() {
            self.look_touch = None;
            return;
        }

        // Release the latch once the latched touch is no longer active.
        if let Some(id) = self.look_touch {
            let still_active = touches.iter().any(|t| t.id == id && t.phase.is_active());
            if !still_active {
                self.look_touch = None;
            }
        }

        // Latch the first touch that began this tick outside of UI.
        if self.look_touch.is_none() {
            self.look_touch = touches
                .iter()
                .find(|t| t.phase == TouchPhase::Began && !t.over_ui)
                .map(|t| t.id);
        }

        if let Some(id) = self.look_touch {
            if let Some(touch) = touches.iter().find(|t| t.id == id) {
                input.set_look(Vec2::new(touch.delta.x, -touch.delta.y) * self.sensitivity);
            }
        }
    }
}

/// Event mirror of rebindable action callbacks.
#[derive(Event, Reflect, Debug, Clone, Copy, PartialEq)]
pub enum InputActionEvent {
    /// Directional movement action value.
    Move(Vec2),
    /// Jump action state.
    Jump(bool),
}

/// Adapter for event-driven action bindings.
#[derive(Reflect, Debug, Clone, Copy, Default)]
pub struct ActionBindingAdapter;

impl ActionBindingAdapter {
    /// Apply a single action event to the snapshot.
    pub fn apply_event<S: InputSource>(&self, input: &mut S, event: &InputActionEvent) {
        match *event {
            InputActionEvent::Move(movement) => input.set_move(movement),
            InputActionEvent::Jump(jumping) => input.set_jump(jumping),
        }
    }
}

/// Pass-through for on-screen virtual controls (joystick and jump button).
#[derive(Reflect, Debug, Clone, Copy, Default)]
pub struct VirtualControlsAdapter;

impl VirtualControlsAdapter {
    /// Forward the virtual joystick vector.
    pub fn virtual_move<S: InputSource>(&self, input: &mut S, movement: Vec2) {
        input.set_move(movement);
    }

    /// Forward the virtual jump button state.
    pub fn virtual_jump<S: InputSource>(&self, input: &mut S, jumping: bool) {
        input.set_jump(jumping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    fn touch(id: u64, phase: TouchPhase, delta: Vec2) -> TouchSample {
        TouchSample {
            id,
            phase,
            delta,
            over_ui: false,
        }
    }

    #[test]
    fn keyboard_mouse_scales_and_inverts_look() {
        let adapter = KeyboardMouseAdapter {
            mouse_sensitivity: 2.0,
        };
        let mut input = InputState::new();
        adapter.apply(&mut input, Vec2::new(0.0, 1.0), Vec2::new(3.0, 4.0), true);

        assert_eq!(input.look(), Vec2::new(6.0, -8.0));
        assert_eq!(input.movement(), Vec2::new(0.0, 1.0));
        assert!(input.is_jumping());
    }

    #[test]
    fn touch_look_latches_first_qualifying_touch() {
        let mut adapter = TouchLookAdapter::new(1.0);
        let mut input = InputState::new();

        adapter.apply(
            &mut input,
            &[
                TouchSample {
                    id: 1,
                    phase: TouchPhase::Began,
                    delta: Vec2::ZERO,
                    over_ui: true,
                },
                touch(2, TouchPhase::Began, Vec2::new(5.0, 2.0)),
            ],
        );

        assert_eq!(adapter.look_touch(), Some(2));
        assert_eq!(input.look(), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn touch_look_is_sticky_against_newer_touches() {
        let mut adapter = TouchLookAdapter::new(1.0);
        let mut input = InputState::new();

        adapter.apply(&mut input, &[touch(1, TouchPhase::Began, Vec2::ZERO)]);
        assert_eq!(adapter.look_touch(), Some(1));

        // A second touch beginning while the first is active does not steal
        // the latch.
        adapter.apply(
            &mut input,
            &[
                touch(1, TouchPhase::Moved, Vec2::new(1.0, 0.0)),
                touch(2, TouchPhase::Began, Vec2::new(9.0, 9.0)),
            ],
        );
        assert_eq!(adapter.look_touch(), Some(1));
        assert_eq!(input.look(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn touch_look_releases_when_touch_ends() {
        let mut adapter = TouchLookAdapter::new(1.0);
        let mut input = InputState::new();

        adapter.apply(&mut input, &[touch(1, TouchPhase::Began, Vec2::ZERO)]);
        adapter.apply(
            &mut input,
            &[
                touch(1, TouchPhase::Ended, Vec2::new(4.0, 0.0)),
                touch(2, TouchPhase::Stationary, Vec2::new(7.0, 0.0)),
            ],
        );

        // The latch drops; touch 2 never began this tick, so look is zero.
        assert_eq!(adapter.look_touch(), None);
        assert_eq!(input.look(), Vec2::ZERO);
    }

    #[test]
    fn touch_look_zeroes_with_no_touches() {
        let mut adapter = TouchLookAdapter::new(1.0);
        let mut input = InputState::new();
        input.set_look(Vec2::new(3.0, 3.0));

        adapter.apply(&mut input, &[]);
        assert_eq!(input.look(), Vec2::ZERO);
        assert_eq!(adapter.look_touch(), None);
    }

    #[test]
    fn action_events_write_move_and_jump() {
        let adapter = ActionBindingAdapter;
        let mut input = InputState::new();

        adapter.apply_event(&mut input, &InputActionEvent::Move(Vec2::new(0.5, -0.5)));
        adapter.apply_event(&mut input, &InputActionEvent::Jump(true));

        assert_eq!(input.movement(), Vec2::new(0.5, -0.5));
        assert!(input.is_jumping());
    }

    #[test]
    fn virtual_controls_pass_through() {
        let adapter = VirtualControlsAdapter;
        let mut input = InputState::new();

        adapter.virtual_move(&mut input, Vec2::new(0.0, 1.0));
        adapter.virtual_jump(&mut input, true);

        assert_eq!(input.movement(), Vec2::new(0.0, 1.0));
        assert!(input.is_jumping());
    }
}
