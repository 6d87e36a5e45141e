use std::time::Instant;

use crate::configuration::config::VariantConfig;
use crate::simulation::engine::Simulation;
use crate::simulation::params::SimulationConfig;
use crate::simulation::scenario::Model;

/// Step `model` until it finishes or `max_steps` is reached, returning the step count
fn drain(model: &mut Model, dt: f64, max_steps: usize) -> usize {
    let mut steps = 0;
    while !model.is_finished() && steps < max_steps {
        model.step(dt);
        steps += 1;
    }
    steps
}

/// Time complete runs of both variants for a range of frame steps
/// Smaller dt means more steps per run, so this shows per-step cost
pub fn bench_steppers() {
    let dts = [0.05, 0.01, 0.001, 0.0001];
    let runs = 20; // full runs per variant and dt

    // Long shallow layout so the small dt runs take a while
    let descent_cfg = SimulationConfig::from_degrees(20.0, 50.0, 200.0, 1.0, 0.05, 0.02);
    let ascent_cfg = SimulationConfig::from_degrees(20.0, 50.0, 200.0, 40.0, 0.05, 0.02);

    for dt in dts {
        let mut descent = Model::new(VariantConfig::RollDown, descent_cfg);
        let mut ascent = Model::new(VariantConfig::RollUp, ascent_cfg);

        // Warm up
        drain(&mut descent, dt, usize::MAX);
        drain(&mut ascent, dt, usize::MAX);

        let t0 = Instant::now();
        let mut descent_steps = 0;
        for _ in 0..runs {
            descent.reset();
            descent_steps += drain(&mut descent, dt, usize::MAX);
        }
        let descent_ns = t0.elapsed().as_secs_f64() * 1e9 / descent_steps.max(1) as f64;

        let t1 = Instant::now();
        let mut ascent_steps = 0;
        for _ in 0..runs {
            ascent.reset();
            ascent_steps += drain(&mut ascent, dt, usize::MAX);
        }
        let ascent_ns = t1.elapsed().as_secs_f64() * 1e9 / ascent_steps.max(1) as f64;

        println!(
            "dt = {:8.5} s, roll_down = {:7} steps {:6.1} ns/step, roll_up = {:7} steps {:6.1} ns/step",
            dt,
            descent_steps / runs,
            descent_ns,
            ascent_steps / runs,
            ascent_ns
        );
    }
}

/// CSV of the descent speed trace for a few friction values
/// Paste output directly into a spreadsheet to graph
pub fn bench_friction_curve() {
    println!("friction,steps,final_time,peak_speed");

    for mu in (0..=10).map(|i| i as f64 * 0.05) {
        let cfg = SimulationConfig::from_degrees(30.0, 10.0, 10.0, 0.0, mu, mu);
        let mut model = Model::new(VariantConfig::RollDown, cfg);
        let steps = drain(&mut model, 0.05, 1_000_000);
        let trace = model.trace();
        println!("{:.2},{},{:.3},{:.4}", mu, steps, trace.last_time(), trace.peak_speed());
    }
}
