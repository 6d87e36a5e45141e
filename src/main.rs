use incline::{Scenario, ScenarioConfig, Simulation, Snapshot, StepObserver, Trace};
use incline::{bench_friction_curve, bench_steppers};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Run an incline scenario headless and print its speed trace")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "roll_down.yaml")]
    file_name: String,

    /// Scenario file anywhere on disk, overrides `--file-name`
    #[arg(long)]
    path: Option<PathBuf>,

    /// Print every (t, v) sample
    #[arg(long)]
    trace: bool,

    /// Run the stepping benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

/// Prints samples as they arrive when `--trace` is set
struct TracePrinter {
    enabled: bool,
}

impl StepObserver for TracePrinter {
    fn on_step(&mut self, snapshot: &Snapshot) {
        if self.enabled {
            println!(
                "{:8.3} {:10.4} {:9.4} {:9.4}",
                snapshot.time,
                snapshot.speed,
                snapshot.x(),
                snapshot.y()
            );
        }
    }

    fn on_finished(&mut self, trace: &Trace) {
        tracing::debug!(samples = trace.len(), "trace complete");
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = match &args.path {
        Some(path) => path.clone(),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join(&args.file_name),
    };
    let yaml = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_str(&yaml)
        .with_context(|| format!("invalid scenario {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), ?scenario_cfg, "loaded scenario");

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_steppers();
        bench_friction_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.trace {
        println!("{:>8} {:>10} {:>9} {:>9}", "t", "v", "x", "y");
    }
    let mut printer = TracePrinter { enabled: args.trace };
    let summary = scenario.run(&mut printer);

    if !summary.finished {
        bail!(
            "{} did not finish within {} steps",
            scenario.engine.variant,
            scenario.engine.max_steps
        );
    }

    let trace = scenario.simulation.trace();
    println!("variant:     {}", scenario.engine.variant);
    println!("steps:       {}", summary.steps);
    println!("time:        {:.3} s", summary.last.time);
    println!("final speed: {:.4} m/s", summary.last.speed);
    println!("peak speed:  {:.4} m/s", trace.peak_speed());
    println!("position:    ({:.4}, {:.4}) m", summary.last.x(), summary.last.y());
    println!("at rest:     {}", scenario.simulation.speed() == 0.0);

    Ok(())
}
