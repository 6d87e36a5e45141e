//! Body sliding down the incline and out along the horizontal run
//!
//! `OnIncline -> OnHorizontal -> Finished`. The incline phase integrates
//! step by step; the horizontal phase is evaluated in closed form from the
//! speed it started with and the time spent on it.

use tracing::{debug, trace};

use super::engine::Simulation;
use super::forces::{descent_incline_acceleration, horizontal_acceleration};
use super::geometry::{descent_layout, Layout};
use super::integrator::{advance, clamp_speed, finite_or, speed_after_distance, valid_dt};
use super::params::{SimulationConfig, BODY_RADIUS, VELOCITY_EPSILON};
use super::states::{DescentPhase, NVec2, Snapshot, Trace};

#[derive(Debug, Clone)]
pub struct DescentSimulation {
    config: SimulationConfig,
    layout: Layout,
    incline_accel: f64, // along the incline, downhill positive
    horizontal_accel: f64, // along the horizontal, direction of travel positive
    phase: DescentPhase,
    time: f64,
    velocity: f64, // >= 0, direction given by the phase
    incline_distance: f64, // travelled along the incline, [0, L]
    horizontal_distance: f64, // travelled past the junction, [0, horizontal_length]
    segment_time: f64, // time on the horizontal
    horizontal_v0: f64, // speed the horizontal phase started with
    speed_at_junction: Option<f64>, // along-incline speed at the junction
    trace: Trace,
}

impl DescentSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        let mut sim = Self {
            config,
            layout: descent_layout(&config),
            incline_accel: 0.0,
            horizontal_accel: 0.0,
            phase: DescentPhase::OnIncline,
            time: 0.0,
            velocity: 0.0,
            incline_distance: 0.0,
            horizontal_distance: 0.0,
            segment_time: 0.0,
            horizontal_v0: 0.0,
            speed_at_junction: None,
            trace: Trace::default(),
        };
        sim.reset();
        sim
    }

    pub fn phase(&self) -> DescentPhase {
        self.phase
    }

    pub fn speed_at_junction(&self) -> Option<f64> {
        self.speed_at_junction
    }

    pub fn horizontal_start_velocity(&self) -> f64 {
        self.horizontal_v0
    }

    pub fn incline_distance(&self) -> f64 {
        self.incline_distance
    }

    pub fn horizontal_distance(&self) -> f64 {
        self.horizontal_distance
    }

    /// Junction of incline and horizontal, on the surface
    pub fn junction(&self) -> NVec2 {
        NVec2::new(self.config.incline_run(), 0.0)
    }

    fn finish(&mut self, reason: &'static str) {
        self.phase = DescentPhase::Finished;
        debug!(
            reason,
            time = self.time,
            velocity = self.velocity,
            horizontal_distance = self.horizontal_distance,
            "descent finished"
        );
    }

    fn step_incline(&mut self, dt: f64) {
        let mut a = self.incline_accel;
        // a stopped body is held by friction and never slides back
        if a < 0.0 && self.velocity == 0.0 {
            a = 0.0;
        }
        if self.velocity <= 0.0 && a <= 0.0 {
            self.velocity = 0.0;
            self.finish("stalled on incline");
            return;
        }

        let adv = advance(self.velocity, a, dt);
        let remaining = self.config.length - self.incline_distance;

        if adv.displacement >= remaining {
            let v_junction = clamp_speed(speed_after_distance(self.velocity, a, remaining.max(0.0)));
            self.speed_at_junction = Some(v_junction);
            self.horizontal_v0 = clamp_speed(v_junction * self.config.angle.cos());
            self.velocity = self.horizontal_v0;
            self.incline_distance = self.config.length;
            self.horizontal_distance = 0.0;
            self.segment_time = 0.0;
            self.phase = DescentPhase::OnHorizontal;
            debug!(
                time = self.time + dt,
                v_junction,
                v_horizontal = self.horizontal_v0,
                "reached horizontal"
            );
            if self.horizontal_v0 <= VELOCITY_EPSILON {
                self.velocity = 0.0;
                self.finish("no horizontal speed");
            }
            return;
        }

        self.incline_distance += adv.displacement.max(0.0);
        self.velocity = clamp_speed(adv.velocity);
        if adv.stopped {
            self.velocity = 0.0;
            self.finish("stalled on incline");
        }
    }

    fn step_horizontal(&mut self, dt: f64) {
        self.segment_time += dt;
        let adv = advance(self.horizontal_v0, self.horizontal_accel, self.segment_time);
        let run = self.config.horizontal_length;
        let s = adv.displacement.max(0.0);

        if s >= run {
            self.horizontal_distance = run;
            self.velocity = clamp_speed(speed_after_distance(
                self.horizontal_v0,
                self.horizontal_accel,
                run,
            ));
            self.finish("end of horizontal run");
            return;
        }

        self.horizontal_distance = s;
        self.velocity = clamp_speed(adv.velocity);
        if adv.stopped || self.velocity <= VELOCITY_EPSILON {
            self.velocity = 0.0;
            self.finish("stopped on horizontal");
        }
    }
}

impl Simulation for DescentSimulation {
    fn reset(&mut self) {
        self.layout = descent_layout(&self.config);
        self.incline_accel = finite_or(descent_incline_acceleration(&self.config), 0.0);
        self.horizontal_accel = finite_or(horizontal_acceleration(&self.config), 0.0);
        self.phase = DescentPhase::OnIncline;
        self.time = 0.0;
        self.velocity = clamp_speed(self.config.v0);
        self.incline_distance = 0.0;
        self.horizontal_distance = 0.0;
        self.segment_time = 0.0;
        self.horizontal_v0 = 0.0;
        self.speed_at_junction = None;
        self.trace = Trace::starting_at(self.velocity);
    }

    fn step(&mut self, dt: f64) -> Snapshot {
        if !valid_dt(dt) {
            return self.snapshot();
        }

        match self.phase {
            DescentPhase::OnIncline => self.step_incline(dt),
            DescentPhase::OnHorizontal => self.step_horizontal(dt),
            DescentPhase::Finished => {}
        }

        self.time += dt;
        self.trace.push(self.time, self.velocity.abs());
        let snapshot = self.snapshot();
        trace!(t = snapshot.time, v = snapshot.velocity, x = snapshot.x(), y = snapshot.y(), "descent step");
        snapshot
    }

    fn is_finished(&self) -> bool {
        self.phase == DescentPhase::Finished
    }

    fn position(&self) -> NVec2 {
        let cfg = &self.config;
        if self.incline_distance < cfg.length {
            let along = NVec2::new(cfg.angle.cos(), -cfg.angle.sin());
            NVec2::new(0.0, cfg.incline_height() + BODY_RADIUS) + along * self.incline_distance
        } else {
            self.junction() + NVec2::new(self.horizontal_distance, BODY_RADIUS)
        }
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
