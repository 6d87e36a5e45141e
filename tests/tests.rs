use incline::{AscentPhase, AscentSimulation, DescentPhase, DescentSimulation, Simulation};
use incline::{Model, Scenario, ScenarioConfig, SimulationConfig, Snapshot, VariantConfig};
use incline::{BODY_RADIUS, G, SPEED_OF_LIGHT};

use approx::assert_relative_eq;

use std::path::PathBuf;

/// 30 degrees, 10 m incline, friction 0.1 on both segments
pub fn reference_config(horizontal_length: f64, v0: f64) -> SimulationConfig {
    SimulationConfig::from_degrees(30.0, 10.0, horizontal_length, v0, 0.1, 0.1)
}

/// Step until finished, return the number of steps taken
pub fn run_to_end<S: Simulation + ?Sized>(sim: &mut S, dt: f64) -> usize {
    let mut steps = 0;
    while !sim.is_finished() {
        sim.step(dt);
        steps += 1;
        assert!(steps < 1_000_000, "run did not finish");
    }
    steps
}

/// Speed after sliding `s` from rest down the reference incline
pub fn reference_incline_speed(s: f64) -> f64 {
    let a = G * 30f64.to_radians().sin() - 0.1 * G * 30f64.to_radians().cos();
    (2.0 * s * a).sqrt()
}

// ==================================================================================
// Descent tests
// ==================================================================================

#[test]
fn descent_reaches_base_near_nine_metres_per_second() {
    let mut sim = DescentSimulation::new(reference_config(10.0, 0.0));
    run_to_end(&mut sim, 0.05);

    let v_junction = sim.speed_at_junction().expect("body should reach the horizontal");
    assert_relative_eq!(v_junction, reference_incline_speed(10.0), epsilon = 1e-9);
    assert!((v_junction - 9.0).abs() < 0.05, "v at base = {v_junction}");
}

#[test]
fn descent_converts_speed_at_junction_once() {
    let mut sim = DescentSimulation::new(reference_config(10.0, 0.0));
    let mut flips = 0;
    let mut previous = sim.phase();

    while !sim.is_finished() {
        sim.step(0.05);
        if previous == DescentPhase::OnIncline && sim.phase() != DescentPhase::OnIncline {
            flips += 1;
            let v_junction = sim.speed_at_junction().unwrap();
            let expected = (v_junction * 30f64.to_radians().cos()).clamp(0.0, SPEED_OF_LIGHT);
            assert_relative_eq!(sim.velocity(), expected, epsilon = 1e-12);
            assert_relative_eq!(sim.position().x, sim.config().incline_run(), epsilon = 1e-12);
            assert_relative_eq!(sim.position().y, BODY_RADIUS, epsilon = 1e-12);
        }
        previous = sim.phase();
    }

    assert_eq!(flips, 1);
}

#[test]
fn descent_reference_run_reaches_end_of_horizontal() {
    // stopping distance on the horizontal is ~31 m, longer than the 10 m run
    let mut sim = DescentSimulation::new(reference_config(10.0, 0.0));
    run_to_end(&mut sim, 0.05);

    let v0h = sim.horizontal_start_velocity();
    let end_x = sim.config().incline_run() + 10.0;
    assert_relative_eq!(sim.position().x, end_x, epsilon = 1e-12);
    assert_relative_eq!(
        sim.velocity(),
        (v0h * v0h - 2.0 * 0.1 * G * 10.0).sqrt(),
        epsilon = 1e-9
    );
}

#[test]
fn descent_friction_stops_before_end_of_long_run() {
    let mut sim = DescentSimulation::new(reference_config(50.0, 0.0));
    run_to_end(&mut sim, 0.05);

    let v0h = sim.horizontal_start_velocity();
    let rest = v0h * v0h / (2.0 * 0.1 * G);
    assert!(rest < 50.0);
    assert_eq!(sim.velocity(), 0.0);
    assert_relative_eq!(sim.horizontal_distance(), rest, epsilon = 1e-9);
    assert_relative_eq!(sim.position().x, sim.config().incline_run() + rest, epsilon = 1e-9);
}

#[test]
fn descent_initial_speed_is_first_sample() {
    let sim = DescentSimulation::new(reference_config(10.0, 2.5));
    assert_eq!(sim.trace().time_points(), &[0.0]);
    assert_eq!(sim.trace().velocity_points(), &[2.5]);
}

#[test]
fn descent_vertical_incline_finishes_at_junction() {
    // falls 3 m in ~0.78 s, then cos(90) leaves no horizontal speed
    let cfg = SimulationConfig::from_degrees(90.0, 3.0, 2.0, 0.0, 0.1, 0.1);
    let mut sim = DescentSimulation::new(cfg);
    let steps = run_to_end(&mut sim, 0.05);

    assert_eq!(steps, 16);
    assert_eq!(sim.phase(), DescentPhase::Finished);
    assert_eq!(sim.velocity(), 0.0);
    assert_eq!(sim.horizontal_distance(), 0.0);
    let v_junction = sim.speed_at_junction().expect("body should reach the junction");
    assert_relative_eq!(v_junction, (2.0 * G * 3.0).sqrt(), epsilon = 1e-9);
    assert_relative_eq!(sim.position().x, sim.junction().x, epsilon = 1e-12);
    assert_relative_eq!(sim.position().x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(sim.position().y, BODY_RADIUS, epsilon = 1e-12);
}

// ==================================================================================
// Ascent tests
// ==================================================================================

#[test]
fn ascent_reference_reaches_base_and_climbs() {
    let mut sim = AscentSimulation::new(reference_config(5.0, 5.0));
    while sim.phase() == AscentPhase::Approach {
        sim.step(0.05);
    }

    let v_base = sim.speed_at_base().expect("body should reach the base");
    let expected_base = (25.0 - 2.0 * 0.1 * G * 5.0f64).sqrt();
    assert_relative_eq!(v_base, expected_base, epsilon = 1e-9);
    assert!((v_base - 3.9).abs() < 0.01, "v at base = {v_base}");

    assert_eq!(sim.phase(), AscentPhase::OnIncline);
    let converted = v_base * 30f64.to_radians().cos();
    assert_relative_eq!(sim.velocity(), converted, epsilon = 1e-12);
    assert!((converted - 3.38).abs() < 0.01);
}

#[test]
fn ascent_reference_stops_partway_up() {
    let mut sim = AscentSimulation::new(reference_config(5.0, 5.0));
    run_to_end(&mut sim, 0.05);

    let v_incline = sim.speed_at_base().unwrap() * 30f64.to_radians().cos();
    let decel = G * 30f64.to_radians().sin() + 0.1 * G * 30f64.to_radians().cos();
    let rest = v_incline * v_incline / (2.0 * decel);

    assert!(rest < 10.0);
    assert_eq!(sim.velocity(), 0.0);
    assert_relative_eq!(sim.incline_distance(), rest, epsilon = 1e-9);
    assert_relative_eq!(sim.position().x, -rest * 30f64.to_radians().cos(), epsilon = 1e-9);
    assert_relative_eq!(
        sim.position().y,
        rest * 30f64.to_radians().sin() + BODY_RADIUS,
        epsilon = 1e-9
    );
}

#[test]
fn ascent_at_base_at_rest_is_finished_without_steps() {
    let sim = AscentSimulation::new(reference_config(0.0, 0.0));
    assert!(sim.is_finished());
    assert_eq!(sim.trace().samples().collect::<Vec<_>>(), vec![(0.0, 0.0)]);
}

#[test]
fn ascent_vertical_incline_finishes_at_base_after_approach() {
    // reaches the base after ~0.417 s, then cos(90) leaves no speed to climb
    let cfg = SimulationConfig::from_degrees(90.0, 3.0, 2.0, 5.0, 0.1, 0.1);
    let mut sim = AscentSimulation::new(cfg);
    assert_eq!(sim.phase(), AscentPhase::Approach);
    let steps = run_to_end(&mut sim, 0.05);

    assert_eq!(steps, 9);
    assert_eq!(sim.phase(), AscentPhase::Finished);
    assert_eq!(sim.velocity(), 0.0);
    assert_eq!(sim.incline_distance(), 0.0);
    let v_base = sim.speed_at_base().expect("body should reach the base");
    assert_relative_eq!(v_base, (25.0 - 4.0 * 0.1 * G).sqrt(), epsilon = 1e-9);
    assert_eq!(sim.position().x, 0.0);
    assert_relative_eq!(sim.position().y, BODY_RADIUS, epsilon = 1e-12);
}

#[test]
fn ascent_exact_stop_inside_large_step() {
    // starts at the base moving up at 4 cos(30) m/s, one 1 s step overshoots the stop
    let mut sim = AscentSimulation::new(reference_config(0.0, 4.0));
    let v = sim.velocity();
    let decel = G * 30f64.to_radians().sin() + 0.1 * G * 30f64.to_radians().cos();
    let dt = 1.0;
    assert!(v / decel < dt);

    sim.step(dt);

    let stop = sim.incline_distance();
    let closed_form = v * v / (2.0 * decel);
    assert!(sim.is_finished());
    assert_relative_eq!(stop, closed_form, epsilon = 1e-12);
    // strictly between the start and the no-stop Euler end point
    assert!(stop > 0.0 && stop < v * dt);
    // never short of the constant-acceleration parabola
    assert!(stop >= v * dt - 0.5 * decel * dt * dt);
    assert_relative_eq!(sim.segment_time(), v / decel, epsilon = 1e-12);
}

#[test]
fn ascent_reaches_top_of_short_incline() {
    let cfg = SimulationConfig::from_degrees(10.0, 1.0, 2.0, 8.0, 0.0, 0.0);
    let mut sim = AscentSimulation::new(cfg);
    run_to_end(&mut sim, 0.05);

    assert_eq!(sim.incline_distance(), 1.0);
    assert!(sim.velocity() > 0.0);
    assert_relative_eq!(sim.position().x, sim.peak().x, epsilon = 1e-12);
    assert_relative_eq!(sim.position().y, sim.peak().y + BODY_RADIUS, epsilon = 1e-12);
}

#[test]
fn ascent_polling_after_finish_freezes_speed() {
    let mut sim = AscentSimulation::new(reference_config(5.0, 5.0));
    let steps = run_to_end(&mut sim, 0.05);
    let frozen = sim.snapshot();

    for i in 1..=5 {
        let snap = sim.step(0.05);
        assert!(sim.is_finished());
        assert_eq!(snap.speed, frozen.speed);
        assert_eq!(snap.position, frozen.position);
        assert_relative_eq!(snap.time, frozen.time + 0.05 * i as f64, epsilon = 1e-9);
    }
    assert_eq!(sim.trace().len(), steps + 6);
}

#[test]
fn ascent_velocity_sign_follows_phase() {
    let mut sim = AscentSimulation::new(reference_config(5.0, 5.0));
    while !sim.is_finished() {
        let snap = sim.step(0.05);
        match sim.phase() {
            AscentPhase::Approach => assert!(snap.velocity < 0.0),
            _ => assert!(snap.velocity >= 0.0),
        }
        assert_eq!(snap.speed, snap.velocity.abs());
    }
}

// ==================================================================================
// Shared interface tests
// ==================================================================================

#[test]
fn trace_grows_one_sample_per_step() {
    let mut sims: Vec<Box<dyn Simulation>> = vec![
        Box::new(DescentSimulation::new(reference_config(10.0, 1.0))),
        Box::new(AscentSimulation::new(reference_config(5.0, 5.0))),
    ];

    for sim in sims.iter_mut() {
        for n in 1..=200 {
            sim.step(0.05);
            assert_eq!(sim.trace().len(), n + 1);
        }
        let times = sim.trace().time_points();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert!(sim.is_finished());
    }
}

#[test]
fn reset_restores_initial_state() {
    let mut sim = Model::new(VariantConfig::RollUp, reference_config(5.0, 5.0));
    let start = sim.snapshot();
    run_to_end(&mut sim, 0.05);
    sim.reset();

    assert!(!sim.is_finished());
    assert_eq!(sim.snapshot(), start);
    assert_eq!(sim.trace().samples().collect::<Vec<_>>(), vec![(0.0, 5.0)]);
}

#[test]
fn invalid_dt_is_a_no_op() {
    let mut sim = DescentSimulation::new(reference_config(10.0, 1.0));
    let before = sim.snapshot();
    for dt in [0.0, -0.05, f64::NAN, f64::INFINITY] {
        assert_eq!(sim.step(dt), before);
    }
    assert_eq!(sim.trace().len(), 1);
}

#[test]
fn model_matches_direct_stepper() {
    let cfg = reference_config(10.0, 0.0);
    let mut direct = DescentSimulation::new(cfg);
    let mut model = Model::new(VariantConfig::RollDown, cfg);

    while !direct.is_finished() {
        let a: Snapshot = direct.step(0.05);
        let b: Snapshot = model.step(0.05);
        assert_eq!(a, b);
    }
    assert!(model.is_finished());
    assert_eq!(direct.trace(), model.trace());
}

#[test]
fn display_geometry_is_exposed() {
    let down = Model::new(VariantConfig::RollDown, reference_config(10.0, 0.0));
    let up = Model::new(VariantConfig::RollUp, reference_config(5.0, 5.0));

    for sim in [&down, &up] {
        assert_eq!(sim.plane_coordinates().len(), 100);
        assert_eq!(sim.horizontal_coordinates().len(), 100);
    }
    // ascent incline runs from the peak down to the base at the origin
    let plane = up.plane_coordinates();
    assert_relative_eq!(plane[99].x, 0.0);
    assert_relative_eq!(plane[0].y, 5.0, epsilon = 1e-12);
}

// ==================================================================================
// Scenario files
// ==================================================================================

fn load(name: &str) -> ScenarioConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name);
    let yaml = std::fs::read_to_string(path).unwrap();
    ScenarioConfig::from_yaml_str(&yaml).unwrap()
}

#[test]
fn shipped_scenarios_run_to_completion() {
    for name in ["roll_down.yaml", "roll_up.yaml", "roll_up_at_base.yaml"] {
        let mut scenario = Scenario::build_scenario(load(name)).unwrap();
        let summary = scenario.run(&mut |_: &Snapshot| {});
        assert!(summary.finished, "{name} did not finish");
        assert!(summary.last.x().is_finite() && summary.last.y().is_finite());
    }
}

#[test]
fn roll_up_scenario_is_reference_case() {
    let cfg = load("roll_up.yaml");
    assert_eq!(cfg.engine.variant, VariantConfig::RollUp);
    assert_eq!(cfg.parameters.horizontal_length, 5.0);
    assert_eq!(cfg.parameters.v0, 5.0);
}
