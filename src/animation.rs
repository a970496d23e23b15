//! Animation parameter output.
//!
//! The controller publishes a small fixed set of named float/bool parameters
//! for an external animation-blending sink. The sink is optional: a character
//! without an [`AnimatorLink`] simply skips every emission.

use bevy::prelude::*;

/// The named parameters exported to the animation sink.
///
/// The set is fixed and small, so the string-to-id lookup is a static table
/// rather than a runtime hash map: [`AnimationParam::id`] is computed once at
/// compile time from the parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationParam {
    /// Smoothed locomotion speed blend (float).
    Speed,
    /// Whether the grounded probe reported contact (bool).
    Grounded,
    /// Set true on the tick a jump launches, false while grounded (bool).
    Jump,
    /// Set true once the fall timeout expires while airborne (bool).
    FreeFall,
    /// Input magnitude scaling the motion playback rate (float).
    MotionSpeed,
}

impl AnimationParam {
    /// All parameters in emission order.
    pub const ALL: [AnimationParam; 5] = [
        AnimationParam::Speed,
        AnimationParam::Grounded,
        AnimationParam::Jump,
        AnimationParam::FreeFall,
        AnimationParam::MotionSpeed,
    ];

    /// The parameter name as the animation system knows it.
    pub const fn name(self) -> &'static str {
        match self {
            AnimationParam::Speed => "Speed",
            AnimationParam::Grounded => "Grounded",
            AnimationParam::Jump => "Jump",
            AnimationParam::FreeFall => "FreeFall",
            AnimationParam::MotionSpeed => "MotionSpeed",
        }
    }

    /// Stable integer id for the parameter name (FNV-1a).
    pub const fn id(self) -> u32 {
        fnv1a(self.name())
    }
}

/// FNV-1a hash over the parameter name, evaluated at compile time.
const fn fnv1a(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 0x811c_9dc5;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(0x0100_0193);
        i += 1;
    }
    hash
}

/// Consumer of animation parameters.
///
/// Implemented by whatever drives animation playback. The controller calls
/// these once per tick per emitted parameter; implementations should be cheap.
pub trait AnimationSink: Send + Sync + 'static {
    /// Publish a float parameter.
    fn set_float(&mut self, param: AnimationParam, value: f32);

    /// Publish a bool parameter.
    fn set_bool(&mut self, param: AnimationParam, value: bool);
}

/// Optional component linking a character to its animation sink.
///
/// Absent link is a valid configuration: every emission becomes a no-op.
#[derive(Component)]
pub struct AnimatorLink(pub Box<dyn AnimationSink>);

impl AnimatorLink {
    /// Wrap a sink in a link component.
    pub fn new(sink: impl AnimationSink) -> Self {
        Self(Box::new(sink))
    }
}

/// Last-written parameter values, shared behind the handle of a
/// [`RecordingSink`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedParams {
    pub speed: f32,
    pub motion_speed: f32,
    pub grounded: bool,
    pub jump: bool,
    pub free_fall: bool,
}

/// Sink that records the latest value of each parameter.
///
/// Useful for tests and for hosts that poll parameters instead of receiving
/// pushes. Clone the handle before boxing the sink into an [`AnimatorLink`].
#[derive(Default)]
pub struct RecordingSink {
    values: std::sync::Arc<std::sync::Mutex<RecordedParams>>,
}

impl RecordingSink {
    /// Shared handle to the recorded values.
    pub fn handle(&self) -> std::sync::Arc<std::sync::Mutex<RecordedParams>> {
        self.values.clone()
    }
}

impl AnimationSink for RecordingSink {
    fn set_float(&mut self, param: AnimationParam, value: f32) {
        let mut values = self.values.lock().unwrap();
        match param {
            AnimationParam::Speed => values.speed = value,
            AnimationParam::MotionSpeed => values.motion_speed = value,
            _ => {}
        }
    }

    fn set_bool(&mut self, param: AnimationParam, value: bool) {
        let mut values = self.values.lock().unwrap();
        match param {
            AnimationParam::Grounded => values.grounded = value,
            AnimationParam::Jump => values.jump = value,
            AnimationParam::FreeFall => values.free_fall = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_ids_are_distinct_and_stable() {
        let ids: Vec<u32> = AnimationParam::ALL.iter().map(|p| p.id()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // The id is a pure function of the name.
        assert_eq!(AnimationParam::Speed.id(), fnv1a("Speed"));
    }

    #[test]
    fn recording_sink_stores_latest_values() {
        let mut sink = RecordingSink::default();
        let handle = sink.handle();

        sink.set_float(AnimationParam::Speed, 5.335);
        sink.set_bool(AnimationParam::Grounded, true);
        sink.set_bool(AnimationParam::Grounded, false);

        let values = handle.lock().unwrap();
        assert_eq!(values.speed, 5.335);
        assert!(!values.grounded);
    }
}
