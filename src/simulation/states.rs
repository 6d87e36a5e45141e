//! Core state types shared by both steppers
//!
//! - `DescentPhase` / `AscentPhase` the motion regimes of each variant
//! - `Snapshot` what a single `step` reports back to the caller
//! - `Trace` the append-only (time, speed) history
//!
//! Velocities are signed inside the steppers. Everything that leaves a
//! stepper as "speed" is the absolute value.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentPhase {
    OnIncline,
    OnHorizontal,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AscentPhase {
    Approach,
    OnIncline,
    Finished,
}

/// Result of one `step` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub time: f64, // global elapsed time after the step
    pub velocity: f64, // signed internal velocity
    pub speed: f64, // reported speed, |velocity|
    pub position: NVec2, // body centre
}

impl Snapshot {
    pub fn new(time: f64, velocity: f64, position: NVec2) -> Self {
        Self {
            time,
            velocity,
            speed: velocity.abs(),
            position,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Time/speed samples, one pair per step plus the initial entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    time_points: Vec<f64>,
    velocity_points: Vec<f64>,
}

impl Trace {
    /// A trace holding only the (0, speed) entry
    pub fn starting_at(speed: f64) -> Self {
        Self {
            time_points: vec![0.0],
            velocity_points: vec![speed],
        }
    }

    pub fn push(&mut self, time: f64, speed: f64) {
        self.time_points.push(time);
        self.velocity_points.push(speed);
    }

    pub fn time_points(&self) -> &[f64] {
        &self.time_points
    }

    pub fn velocity_points(&self) -> &[f64] {
        &self.velocity_points
    }

    /// Time of the newest sample, 0 for an empty trace
    pub fn last_time(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_points
            .iter()
            .copied()
            .zip(self.velocity_points.iter().copied())
    }

    /// Largest recorded speed
    pub fn peak_speed(&self) -> f64 {
        self.velocity_points.iter().copied().fold(0.0, f64::max)
    }
}
