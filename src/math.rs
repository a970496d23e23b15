//! Scalar smoothing and angle helpers.
//!
//! The controller blends speeds with clamped lerps and turns the character
//! with a critically-damped angular spring. Angles are in degrees throughout,
//! matching the configuration surface.

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Round to three decimal places.
///
/// Used to suppress asymptotic micro-drift in the exponential speed approach.
#[inline]
pub fn round_to_millis(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Shortest signed difference between two angles in degrees, in `(-180, 180]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Fold an angle back by one period when it leaves `[-360, 360]`, then clamp.
///
/// The fold keeps an accumulated yaw finite without strictly normalizing it;
/// the clamp bounds are a true clamp (used for camera pitch).
#[inline]
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Critically-damped spring toward a target value.
///
/// `velocity` is the interpolation state carried between ticks. `smooth_time`
/// is roughly the time to reach the target; smaller is snappier. Returns the
/// new current value. A zero `dt` leaves both the value and the velocity
/// unchanged.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    // Stable exponential approximation for the damped spring integration.
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let original_target = target;
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Prevent overshooting the target.
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = (output - original_target) / dt;
    }

    output
}

/// Critically-damped spring between two angles in degrees.
///
/// Takes the short way around the circle, so damping from 350 toward 10
/// passes through 360 rather than unwinding through 180.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
    }

    #[test]
    fn round_to_millis_truncates_drift() {
        assert_eq!(round_to_millis(5.33499972), 5.335);
        assert_eq!(round_to_millis(0.0004), 0.0);
    }

    #[test]
    fn delta_angle_takes_short_way() {
        assert_eq!(delta_angle(350.0, 10.0), 20.0);
        assert_eq!(delta_angle(10.0, 350.0), -20.0);
        assert_eq!(delta_angle(0.0, 180.0), 180.0);
    }

    #[test]
    fn clamp_angle_folds_one_period() {
        assert_eq!(clamp_angle(400.0, f32::MIN, f32::MAX), 40.0);
        assert_eq!(clamp_angle(-400.0, f32::MIN, f32::MAX), -40.0);
        // Folding is a single period, not a full normalization.
        assert_eq!(clamp_angle(200.0, f32::MIN, f32::MAX), 200.0);
    }

    #[test]
    fn clamp_angle_clamps_pitch_range() {
        assert_eq!(clamp_angle(85.0, -30.0, 70.0), 70.0);
        assert_eq!(clamp_angle(-45.0, -30.0, 70.0), -30.0);
        assert_eq!(clamp_angle(15.0, -30.0, 70.0), 15.0);
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut velocity = 0.0;
        let mut current = 0.0;
        for _ in 0..300 {
            current = smooth_damp(current, 90.0, &mut velocity, 0.12, 1.0 / 60.0);
            assert!(current <= 90.0);
        }
        assert!((current - 90.0).abs() < 0.01);
    }

    #[test]
    fn smooth_damp_zero_dt_is_identity() {
        let mut velocity = 3.0;
        let out = smooth_damp(10.0, 90.0, &mut velocity, 0.12, 0.0);
        assert_eq!(out, 10.0);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn smooth_damp_angle_wraps() {
        let mut velocity = 0.0;
        let mut current = 350.0;
        for _ in 0..300 {
            current = smooth_damp_angle(current, 10.0, &mut velocity, 0.12, 1.0 / 60.0);
        }
        // Converges upward through 360, not back down through 180.
        assert!((delta_angle(current, 10.0)).abs() < 0.01);
        assert!(current > 350.0);
    }
}
