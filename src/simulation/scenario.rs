//! Build runnable scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - run parameters (`SimulationConfig`, angle in radians)
//! - the chosen stepper (`Model`), already reset to t = 0
//!
//! `Scenario::run` is the animation loop of a display layer without the
//! display: it steps at the engine's fixed `dt` until the stepper reports
//! finished and notifies a [`StepObserver`] along the way.

use tracing::{info, warn};

use crate::configuration::config::{ConfigError, ScenarioConfig, VariantConfig};
use crate::simulation::ascent::AscentSimulation;
use crate::simulation::descent::DescentSimulation;
use crate::simulation::engine::{Engine, Simulation};
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{NVec2, Snapshot, Trace};

/// One of the two steppers, picked once at construction
#[derive(Debug, Clone)]
pub enum Model {
    Descent(DescentSimulation),
    Ascent(AscentSimulation),
}

impl Model {
    pub fn new(variant: VariantConfig, config: SimulationConfig) -> Self {
        match variant {
            VariantConfig::RollDown => Model::Descent(DescentSimulation::new(config)),
            VariantConfig::RollUp => Model::Ascent(AscentSimulation::new(config)),
        }
    }

    pub fn variant(&self) -> VariantConfig {
        match self {
            Model::Descent(_) => VariantConfig::RollDown,
            Model::Ascent(_) => VariantConfig::RollUp,
        }
    }

    fn inner(&self) -> &dyn Simulation {
        match self {
            Model::Descent(sim) => sim as &dyn Simulation,
            Model::Ascent(sim) => sim,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Simulation {
        match self {
            Model::Descent(sim) => sim as &mut dyn Simulation,
            Model::Ascent(sim) => sim,
        }
    }
}

impl Simulation for Model {
    fn reset(&mut self) {
        self.inner_mut().reset();
    }

    fn step(&mut self, dt: f64) -> Snapshot {
        self.inner_mut().step(dt)
    }

    fn is_finished(&self) -> bool {
        self.inner().is_finished()
    }

    fn position(&self) -> NVec2 {
        self.inner().position()
    }

    fn velocity(&self) -> f64 {
        self.inner().velocity()
    }

    fn time(&self) -> f64 {
        self.inner().time()
    }

    fn plane_coordinates(&self) -> &[NVec2] {
        self.inner().plane_coordinates()
    }

    fn horizontal_coordinates(&self) -> &[NVec2] {
        self.inner().horizontal_coordinates()
    }

    fn trace(&self) -> &Trace {
        self.inner().trace()
    }

    fn config(&self) -> &SimulationConfig {
        self.inner().config()
    }
}

/// Notified by [`Scenario::run`] as the run progresses
pub trait StepObserver {
    fn on_step(&mut self, snapshot: &Snapshot);

    fn on_finished(&mut self, _trace: &Trace) {}
}

impl<F> StepObserver for F
where
    F: FnMut(&Snapshot),
{
    fn on_step(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Outcome of driving a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub finished: bool,
    pub last: Snapshot,
}

/// A fully-initialized scenario ready to be driven
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: SimulationConfig,
    pub simulation: Model,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig, degrees -> radians
        let p_cfg = cfg.parameters;
        let parameters = SimulationConfig::from_degrees(
            p_cfg.angle,
            p_cfg.length,
            p_cfg.horizontal_length,
            p_cfg.v0,
            p_cfg.friction_incline,
            p_cfg.friction_horizontal,
        );

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            variant: e_cfg.variant,
            dt: e_cfg.dt,
            max_steps: e_cfg.max_steps,
        };

        let simulation = Model::new(engine.variant, parameters);

        Ok(Self {
            engine,
            parameters,
            simulation,
        })
    }

    /// Reset the stepper and drive it at `engine.dt` until it finishes or
    /// `engine.max_steps` is reached
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> RunSummary {
        self.simulation.reset();
        let dt = self.engine.dt;
        let mut steps = 0;

        while !self.simulation.is_finished() && steps < self.engine.max_steps {
            let snapshot = self.simulation.step(dt);
            observer.on_step(&snapshot);
            steps += 1;
        }

        let finished = self.simulation.is_finished();
        let last = self.simulation.snapshot();
        if finished {
            observer.on_finished(self.simulation.trace());
            info!(
                variant = %self.engine.variant,
                steps,
                time = last.time,
                speed = last.speed,
                x = last.x(),
                y = last.y(),
                "run finished"
            );
        } else {
            warn!(variant = %self.engine.variant, steps, "step limit reached before the run finished");
        }

        RunSummary {
            steps,
            finished,
            last,
        }
    }
}
