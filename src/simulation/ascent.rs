//! Body approaching the incline along the horizontal and rolling up it
//!
//! `Approach -> OnIncline -> Finished`. The incline base sits at the origin
//! and the body starts `horizontal_length` to its right, moving left. Both
//! phases stop the body at the exact instant its velocity reaches zero
//! inside a step. A body that stops on the incline is not slid back down.

use tracing::{debug, trace};

use super::engine::Simulation;
use super::forces::{ascent_incline_acceleration, horizontal_acceleration};
use super::geometry::{ascent_layout, ascent_peak, Layout};
use super::integrator::{advance, clamp_speed, finite_or, speed_after_distance, valid_dt};
use super::params::{
    SimulationConfig, BODY_RADIUS, BOUNDARY_EPSILON, MOTION_EPSILON, VELOCITY_EPSILON,
};
use super::states::{AscentPhase, NVec2, Snapshot, Trace};

// incline base
const BASE_X: f64 = 0.0;
const BASE_Y: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct AscentSimulation {
    config: SimulationConfig,
    layout: Layout,
    peak: NVec2,
    approach_decel: f64, // friction deceleration magnitude on the horizontal
    incline_accel: f64, // along the incline, uphill positive (never > 0)
    phase: AscentPhase,
    time: f64,
    velocity: f64, // < 0 approaching (toward -x), > 0 climbing
    approach_x: f64, // horizontal position while approaching, BASE_X once on the incline
    incline_distance: f64, // travelled up the incline, [0, L]
    segment_time: f64, // time spent moving in the current phase
    speed_at_base: Option<f64>, // horizontal speed on reaching the base
    trace: Trace,
}

impl AscentSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        let mut sim = Self {
            config,
            layout: ascent_layout(&config),
            peak: ascent_peak(&config),
            approach_decel: 0.0,
            incline_accel: 0.0,
            phase: AscentPhase::Approach,
            time: 0.0,
            velocity: 0.0,
            approach_x: config.horizontal_length,
            incline_distance: 0.0,
            segment_time: 0.0,
            speed_at_base: None,
            trace: Trace::default(),
        };
        sim.reset();
        sim
    }

    pub fn phase(&self) -> AscentPhase {
        self.phase
    }

    /// `true` once the body has reached the incline base
    pub fn reached_incline(&self) -> bool {
        self.speed_at_base.is_some()
    }

    pub fn speed_at_base(&self) -> Option<f64> {
        self.speed_at_base
    }

    pub fn incline_distance(&self) -> f64 {
        self.incline_distance
    }

    pub fn segment_time(&self) -> f64 {
        self.segment_time
    }

    pub fn peak(&self) -> NVec2 {
        self.peak
    }

    fn finish(&mut self, reason: &'static str) {
        if self.velocity.abs() <= VELOCITY_EPSILON {
            self.velocity = 0.0;
        }
        self.phase = AscentPhase::Finished;
        debug!(
            reason,
            time = self.time,
            velocity = self.velocity,
            incline_distance = self.incline_distance,
            "ascent finished"
        );
    }

    /// Enter the incline with a horizontal speed `v_base` at the base
    fn enter_incline(&mut self, v_base: f64) {
        self.speed_at_base = Some(v_base);
        self.approach_x = BASE_X;
        self.incline_distance = 0.0;
        self.segment_time = 0.0;
        self.velocity = clamp_speed(v_base * self.config.angle.cos());
        self.phase = AscentPhase::OnIncline;
        debug!(v_base, v_incline = self.velocity, "reached incline base");
        if self.velocity <= VELOCITY_EPSILON {
            self.finish("no speed left at base");
        }
    }

    fn step_approach(&mut self, dt: f64) {
        // friction only resists motion toward the base, it never pushes
        let a = if self.velocity < -MOTION_EPSILON {
            self.approach_decel
        } else {
            0.0
        };
        let adv = advance(self.velocity, a, dt);
        let x_new = self.approach_x + adv.displacement;

        if x_new <= BASE_X + BOUNDARY_EPSILON {
            let to_base = (self.approach_x - BASE_X).max(0.0);
            let v_base = clamp_speed(speed_after_distance(self.velocity.abs(), -a, to_base));
            self.segment_time += adv.elapsed;
            self.enter_incline(v_base);
            return;
        }

        self.approach_x = x_new;
        self.segment_time += adv.elapsed;
        if adv.stopped || adv.velocity >= -MOTION_EPSILON {
            self.velocity = 0.0;
            self.finish("stopped before incline");
        } else {
            self.velocity = adv.velocity;
        }
    }

    fn step_incline(&mut self, dt: f64) {
        if self.velocity <= VELOCITY_EPSILON {
            self.finish("stopped on incline");
            return;
        }

        let a = self.incline_accel;
        let adv = advance(self.velocity, a, dt);
        let remaining = self.config.length - self.incline_distance;
        self.segment_time += adv.elapsed;

        if adv.displacement >= remaining - BOUNDARY_EPSILON {
            self.velocity = clamp_speed(speed_after_distance(self.velocity, a, remaining.max(0.0)));
            self.incline_distance = self.config.length;
            self.finish("reached top of incline");
            return;
        }

        self.incline_distance += adv.displacement.max(0.0);
        self.velocity = clamp_speed(adv.velocity);
        if adv.stopped || self.velocity <= VELOCITY_EPSILON {
            self.finish("stopped on incline");
        }
    }
}

impl Simulation for AscentSimulation {
    fn reset(&mut self) {
        let cfg = self.config;
        self.layout = ascent_layout(&cfg);
        self.peak = ascent_peak(&cfg);
        self.approach_decel = -finite_or(horizontal_acceleration(&cfg), 0.0);
        self.incline_accel = finite_or(ascent_incline_acceleration(&cfg), 0.0);
        self.phase = AscentPhase::Approach;
        self.time = 0.0;
        self.approach_x = cfg.horizontal_length;
        self.incline_distance = 0.0;
        self.segment_time = 0.0;
        self.speed_at_base = None;

        let v0 = clamp_speed(cfg.v0.abs());
        self.velocity = if v0 > MOTION_EPSILON && cfg.horizontal_length > MOTION_EPSILON {
            -v0
        } else {
            0.0
        };

        if cfg.horizontal_length <= BOUNDARY_EPSILON {
            // already at the base: skip the approach
            self.approach_x = BASE_X;
            let v_base = if v0 > MOTION_EPSILON { v0 } else { 0.0 };
            self.speed_at_base = Some(v_base);
            self.phase = AscentPhase::OnIncline;
            self.velocity = clamp_speed(v_base * cfg.angle.cos());
            if self.velocity <= VELOCITY_EPSILON {
                self.finish("no speed at base");
            }
        } else if self.velocity == 0.0 {
            self.finish("at rest before incline");
        }

        self.trace = Trace::starting_at(self.velocity.abs());
    }

    fn step(&mut self, dt: f64) -> Snapshot {
        if !valid_dt(dt) {
            return self.snapshot();
        }

        match self.phase {
            AscentPhase::Approach => self.step_approach(dt),
            AscentPhase::OnIncline => self.step_incline(dt),
            AscentPhase::Finished => {}
        }

        self.time += dt;
        self.trace.push(self.time, self.velocity.abs());
        let snapshot = self.snapshot();
        trace!(t = snapshot.time, v = snapshot.velocity, x = snapshot.x(), y = snapshot.y(), "ascent step");
        snapshot
    }

    fn is_finished(&self) -> bool {
        self.phase == AscentPhase::Finished
    }

    fn position(&self) -> NVec2 {
        if !self.reached_incline() {
            return NVec2::new(self.approach_x, BASE_Y + BODY_RADIUS);
        }
        let angle = self.config.angle;
        let x = (BASE_X - self.incline_distance * angle.cos()).max(self.peak.x);
        let y = BASE_Y + self.incline_distance * angle.sin() + BODY_RADIUS;
        NVec2::new(x, y)
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn plane_coordinates(&self) -> &[NVec2] {
        &self.layout.plane
    }

    fn horizontal_coordinates(&self) -> &[NVec2] {
        &self.layout.horizontal
    }

    fn trace(&self) -> &Trace {
        &self.trace
    }

    fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
