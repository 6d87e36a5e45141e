//! Runtime engine settings and the stepping interface
//!
//! `Engine` selects the variant and the frame cadence used when building
//! and driving a `Scenario`. `Simulation` is the capability set every
//! variant provides to a display layer.

use crate::configuration::config::VariantConfig;

use super::params::SimulationConfig;
use super::states::{NVec2, Snapshot, Trace};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    pub variant: VariantConfig, // roll_down or roll_up
    pub dt: f64, // frame step, seconds
    pub max_steps: usize, // driver bound for one run
}

/// What a display/animation layer may do with a running simulation
///
/// `step` after `is_finished` keeps advancing time and appends samples of
/// the frozen final speed, so a caller can poll without checking first.
pub trait Simulation {
    /// Reinitialize state and geometry, trace back to its single entry
    fn reset(&mut self);

    /// Advance by `dt` seconds. A non-positive or non-finite `dt` changes nothing
    fn step(&mut self, dt: f64) -> Snapshot;

    fn is_finished(&self) -> bool;

    /// Body centre
    fn position(&self) -> NVec2;

    /// Signed internal velocity
    fn velocity(&self) -> f64;

    /// Global elapsed time
    fn time(&self) -> f64;

    fn plane_coordinates(&self) -> &[NVec2];

    fn horizontal_coordinates(&self) -> &[NVec2];

    fn trace(&self) -> &Trace;

    fn config(&self) -> &SimulationConfig;

    /// Reported speed, |velocity|
    fn speed(&self) -> f64 {
        self.velocity().abs()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.time(), self.velocity(), self.position())
    }
}
