//! Integration tests for the FDTD wave solver
//!
//! These tests drive whole solver runs and check physical invariants:
//! boundedness, causality of the wavefront, envelope monotonicity and the
//! double-slit barrier layout.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wave_sim_core::grid::GridGeometry;
use wave_sim_core::solver::{
    Alignment, FieldData, FixedEdges, PulseSource, SlitGeometry, WaveSolver,
};
use wave_sim_core::SolverError;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 156x77 grid from a 0.2m x 0.1m domain at the reference dt and speed
fn reference_grid() -> GridGeometry {
    GridGeometry::from_domain(0.2, 0.1, 0.001, 0.9).unwrap()
}

/// Solver with the double-slit barrier, pulse source and vertical screen
fn double_slit_solver(pulse: PulseSource) -> WaveSolver {
    let grid = reference_grid();
    let mut solver = WaveSolver::new(grid);
    solver.seed_pulse(&pulse);
    solver.set_boundary_injector(pulse);
    let slit = SlitGeometry {
        thickness: 0.02,
        separation: 0.15,
        aperture: 0.1,
        ..SlitGeometry::default()
    };
    solver
        .set_obstacle(slit.mask(grid.x_nodes(), grid.y_nodes()))
        .unwrap();
    solver
        .configure_screen(0.8, 0.7, 0.5, Alignment::Vertical)
        .unwrap();
    solver
}

#[test]
fn test_bounded_source_keeps_field_finite() {
    let amplitude = 0.05;
    let mut solver = double_slit_solver(PulseSource::new(amplitude, 45.0, -1.0));
    assert_eq!(solver.grid().x_nodes(), 156);
    assert_eq!(solver.grid().y_nodes(), 77);

    for step in 0..400 {
        solver.step(step).unwrap();
    }

    let field = solver.current();
    assert!(field.first_non_finite().is_none());
    assert!(
        field.max_abs() < 20.0 * amplitude,
        "field grew to {}",
        field.max_abs()
    );
}

#[test]
fn test_zero_input_is_fixed_point() {
    let mut solver = WaveSolver::new(reference_grid());
    solver.set_boundary_injector(FixedEdges);

    for step in 0..50 {
        solver.step(step).unwrap();
    }

    assert!(solver.current().data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_wavefront_stays_within_causal_disk() {
    // speed * dt / dx = 0.7 per axis, Courant number 0.99
    let grid = GridGeometry::new(61, 61, 0.01, 0.01, 0.007, 1.0).unwrap();
    let source_y = 30;
    let mut solver = WaveSolver::new(grid);
    solver.set_boundary_injector(move |step: usize, field: &mut FieldData, _grid: &GridGeometry| {
        let (width, height) = field.shape();
        field.fill_column(0, 0.0);
        field.fill_column(width - 1, 0.0);
        for x in 0..width {
            field.set(x, 0, 0.0);
            field.set(x, height - 1, 0.0);
        }
        if step == 0 {
            field.set(0, source_y, 1.0);
        }
    });

    let steps = 24;
    for step in 0..steps {
        solver.step(step).unwrap();
    }

    // Physical travel distance in cells
    let radius = grid.speed() * grid.dt() * steps as f64 / grid.dx();
    let allowed = radius + 4.0;

    let field = solver.current();
    let significant = 1e-3 * field.max_abs();
    assert!(significant > 0.0, "source never entered the grid");

    let mut reached = 0.0_f64;
    for y in 0..61 {
        for x in 0..61 {
            let value = field.get(x, y);
            if value == 0.0 {
                continue;
            }
            // Manhattan bound of the explicit stencil holds for every nonzero node
            assert!(x + y.abs_diff(source_y) < steps);

            if value.abs() <= significant {
                continue;
            }
            let distance = ((x * x) as f64 + (y as f64 - source_y as f64).powi(2)).sqrt();
            assert!(
                distance <= allowed,
                "node ({x}, {y}) is {distance:.1} cells from the source, beyond {allowed:.1}"
            );
            reached = reached.max(distance);
        }
    }
    assert!(
        reached >= radius - 4.0,
        "wavefront only reached {reached:.1} of {radius:.1} cells"
    );
}

#[test]
fn test_envelope_is_monotone() {
    let mut solver = double_slit_solver(PulseSource::new(0.05, 45.0, 0.05));
    let mut previous = solver.screen_envelope().unwrap();

    for step in 0..300 {
        solver.step(step).unwrap();
        let envelope = solver.screen_envelope().unwrap();
        assert_eq!(envelope.len(), previous.len());
        for (now, before) in envelope.iter().zip(&previous) {
            assert!(now >= before, "envelope decreased at step {step}");
        }
        previous = envelope;
    }

    assert!(previous.iter().any(|&v| v > 0.0), "wave never reached the screen");
}

#[test]
fn test_setting_mask_twice_is_idempotent() {
    let grid = reference_grid();
    let mut solver = WaveSolver::new(grid);
    let mask = SlitGeometry::default().mask(grid.x_nodes(), grid.y_nodes());

    solver.set_obstacle(mask.clone()).unwrap();
    let obstacle = solver.obstacle().clone();
    let display: Vec<bool> = solver.display_mask().data.iter().map(|v| v.is_nan()).collect();

    solver.set_obstacle(mask).unwrap();
    assert_eq!(solver.obstacle(), &obstacle);
    let again: Vec<bool> = solver.display_mask().data.iter().map(|v| v.is_nan()).collect();
    assert_eq!(display, again);
    assert!(solver
        .display_mask()
        .data
        .iter()
        .all(|v| v.is_nan() || *v == 1.0));
}

#[test]
fn test_double_slit_mask_has_two_openings() {
    let (x_nodes, y_nodes) = (200, 160);
    let slit = SlitGeometry {
        x_position: 0.4,
        y_position: 0.5,
        separation: 0.1,
        thickness: 0.05,
        aperture: 0.05,
    };
    let bounds = slit.bounds(x_nodes, y_nodes);
    let mask = slit.mask(x_nodes, y_nodes);
    assert!(bounds.right > bounds.left);

    for x in 0..x_nodes {
        let column: Vec<f64> = (0..y_nodes).map(|y| mask.get(x, y)).collect();
        if x < bounds.left || x >= bounds.right {
            assert!(column.iter().all(|&v| v == 1.0), "column {x} is not clear");
            continue;
        }

        // Count contiguous open runs
        let mut runs = 0;
        let mut open = false;
        for &v in &column {
            assert!(v == 0.0 || v == 1.0);
            if v == 1.0 && !open {
                runs += 1;
            }
            open = v == 1.0;
        }
        assert_eq!(runs, 2, "column {x} has {runs} openings");
        assert!(column[bounds.upper_far..bounds.upper_near].iter().all(|&v| v == 1.0));
        assert!(column[bounds.lower_near..bounds.lower_far].iter().all(|&v| v == 1.0));
    }
}

#[test]
fn test_screen_sample_matches_field_slice() {
    let grid = GridGeometry::new(40, 30, 0.01, 0.01, 0.005, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for alignment in [Alignment::Vertical, Alignment::Horizontal] {
        let mut solver = WaveSolver::new(grid);
        solver.configure_screen(0.6, 0.5, 0.6, alignment).unwrap();

        let values: Vec<f64> = (0..grid.node_count())
            .map(|_| rng.random_range(-1.0..1.0))
            .collect();
        solver.history_mut().1.data.clone_from(&values);

        let sample = solver.screen_sample().unwrap();
        let screen = solver.screen().unwrap();
        assert_eq!(sample.len(), screen.node_count());

        let expected: Vec<f64> = screen
            .nodes()
            .map(|(x, y)| values[y * grid.x_nodes() + x])
            .collect();
        assert_eq!(sample, expected);
    }
}

#[test]
fn test_screen_length_and_centre() {
    let grid = GridGeometry::new(40, 30, 0.01, 0.01, 0.005, 1.0).unwrap();
    let mut solver = WaveSolver::new(grid);
    solver
        .configure_screen(0.6, 0.3, 0.6, Alignment::Vertical)
        .unwrap();

    let screen = solver.screen().unwrap();
    // trunc(0.3 * 39) = 11, trunc(0.6 * 29) = 17, trunc(0.6 * 30) = 18
    assert_eq!(screen.centre(), (11, 17));
    assert_eq!(screen.node_count(), 18);
    assert_eq!(screen.span(), 8..26);
}

#[test]
fn test_probe_and_step_errors_surface() {
    let mut solver = WaveSolver::new(reference_grid());
    assert!(matches!(solver.step(0), Err(SolverError::Configuration(_))));
    assert!(matches!(solver.screen_sample(), Err(SolverError::NotConfigured)));
    assert!(matches!(
        solver.set_obstacle(FieldData::new(3, 3)),
        Err(SolverError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_display_view_between_steps_does_not_perturb_run() {
    let pulse = PulseSource::new(0.05, 45.0, 0.1);
    let mut observed = double_slit_solver(pulse);
    let mut untouched = double_slit_solver(pulse);

    for step in 0..120 {
        observed.step(step).unwrap();
        untouched.step(step).unwrap();
        let view = observed.current_field_view();
        assert!(view.data.iter().any(|v| v.is_nan()));
    }

    assert_eq!(observed.current(), untouched.current());
    let (x, y) = observed.screen().unwrap().centre();
    assert_relative_eq!(
        observed.current().get(x, y),
        untouched.current().get(x, y)
    );
}
