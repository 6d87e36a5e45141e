//! Physical constants, tolerances and the runtime run configuration
//!
//! `SimulationConfig` holds the already-validated settings of one run:
//! - incline angle (radians) and length,
//! - horizontal run length (descent) or initial distance to the base (ascent),
//! - initial speed and the two friction coefficients

/// Gravitational acceleration, m/s^2
pub const G: f64 = 9.81;

/// Speed of light, m/s. Hard ceiling for every reported speed
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Body radius, m. The body centre sits one radius above the surface
pub const BODY_RADIUS: f64 = 0.2;

/// Frame step of the animation driver, s
pub const DEFAULT_DT: f64 = 0.05;

/// A speed at or below this counts as stopped
pub const VELOCITY_EPSILON: f64 = 1e-6;

/// A position within this of a boundary (incline base or top) has reached it
pub const BOUNDARY_EPSILON: f64 = 1e-6;

/// Signed velocities, accelerations and distances at or below this are exactly zero
pub const MOTION_EPSILON: f64 = 1e-9;

/// Extra horizontal extent drawn past the starting point of the ascent body, m.
/// Display only, has no effect on the motion
pub const APPROACH_DISPLAY_MARGIN: f64 = 5.0;

/// Angles closer than this to vertical draw the incline as a vertical line, rad
pub const VERTICAL_ANGLE_TOLERANCE: f64 = 0.01;

/// Number of points in each display polyline
pub const POLYLINE_POINTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub angle: f64, // incline angle, radians in [0, pi/2]
    pub length: f64, // incline length L
    pub horizontal_length: f64, // descent: horizontal run, ascent: initial distance to the base
    pub v0: f64, // initial speed magnitude
    pub friction_incline: f64, // kinetic friction coefficient on the incline
    pub friction_horizontal: f64, // kinetic friction coefficient on the horizontal
}

impl SimulationConfig {
    /// Build a config with the angle given in degrees
    pub fn from_degrees(
        angle_deg: f64,
        length: f64,
        horizontal_length: f64,
        v0: f64,
        friction_incline: f64,
        friction_horizontal: f64,
    ) -> Self {
        Self {
            angle: angle_deg.to_radians(),
            length,
            horizontal_length,
            v0,
            friction_incline,
            friction_horizontal,
        }
    }

    /// Horizontal extent of the incline, L cos(angle)
    pub fn incline_run(&self) -> f64 {
        self.length * self.angle.cos()
    }

    /// Height of the incline top, L sin(angle)
    pub fn incline_height(&self) -> f64 {
        self.length * self.angle.sin()
    }
}

impl Default for SimulationConfig {
    /// 30 degrees, 10 m incline, 10 m horizontal, at rest, friction 0.1 on both
    fn default() -> Self {
        Self::from_degrees(30.0, 10.0, 10.0, 0.0, 0.1, 0.1)
    }
}
