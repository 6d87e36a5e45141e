//! Constant-acceleration kinematics for the piecewise phases
//!
//! Every phase has one constant acceleration, so each step is solved in
//! closed form. [`advance`] also finds the instant inside a step at which a
//! decelerating body reaches zero velocity and stops it there, instead of
//! letting it reverse or clamping only at the end of the step.

use super::params::{MOTION_EPSILON, SPEED_OF_LIGHT};

/// Outcome of advancing one constant-acceleration interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub velocity: f64, // velocity at the end of the interval (0 when stopped)
    pub displacement: f64, // signed distance covered
    pub elapsed: f64, // time actually spent moving, <= requested dt
    pub stopped: bool, // velocity crossed zero inside the interval
}

/// Time until velocity `v` reaches zero under acceleration `a`
/// `None` when `a` does not oppose `v` or is effectively zero
pub fn stopping_time(v: f64, a: f64) -> Option<f64> {
    if a.abs() <= MOTION_EPSILON || v.abs() <= MOTION_EPSILON || v * a >= 0.0 {
        return None;
    }
    Some(-v / a)
}

/// Advance velocity `v` under constant `a` for `dt`
///
/// If the velocity would cross zero at some `t_s` in (0, dt], the body
/// covers exactly the stopping distance `v t_s + a t_s^2 / 2` and ends at
/// rest. Otherwise the plain update `v + a dt`, `v dt + a dt^2 / 2` applies.
pub fn advance(v: f64, a: f64, dt: f64) -> Advance {
    if let Some(t_stop) = stopping_time(v, a) {
        if t_stop > 0.0 && t_stop <= dt {
            return Advance {
                velocity: 0.0,
                displacement: v * t_stop + 0.5 * a * t_stop * t_stop,
                elapsed: t_stop,
                stopped: true,
            };
        }
    }

    Advance {
        velocity: v + a * dt,
        displacement: v * dt + 0.5 * a * dt * dt,
        elapsed: dt,
        stopped: false,
    }
}

/// Speed after covering distance `s` (>= 0) starting at `speed` (>= 0)
/// under acceleration `a` along the direction of travel
/// v^2 = u^2 + 2 a s, floored at zero
pub fn speed_after_distance(speed: f64, a: f64, s: f64) -> f64 {
    (speed * speed + 2.0 * a * s).max(0.0).sqrt()
}

/// Clamp a speed into [0, c]. NaN maps to 0
pub fn clamp_speed(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, SPEED_OF_LIGHT)
}

/// Replace a non-finite value with `fallback`
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// `true` when `dt` is usable as a step
pub fn valid_dt(dt: f64) -> bool {
    dt.is_finite() && dt > 0.0
}
