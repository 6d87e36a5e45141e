pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{AscentPhase, DescentPhase, NVec2, Snapshot, Trace};
pub use simulation::params::{SimulationConfig, G, SPEED_OF_LIGHT, BODY_RADIUS, DEFAULT_DT};
pub use simulation::engine::{Engine, Simulation};
pub use simulation::descent::DescentSimulation;
pub use simulation::ascent::AscentSimulation;
pub use simulation::scenario::{Model, RunSummary, Scenario, StepObserver};

pub use configuration::config::{ConfigError, EngineConfig, ParametersConfig, ScenarioConfig, VariantConfig};

pub use benchmark::benchmark::{bench_friction_curve, bench_steppers};
