//! Helper functions for integration tests

use advect_rs::physics::{Grid1D, InitialCondition1D, ScalarField};
use advect_rs::schemes::Scheme;
use advect_rs::solver::{SimulationConfig, TimeStep};

/// Periodic, pure-convection run at unit velocity on `[0, 1]`
pub fn periodic_config(
    cells: usize,
    scheme: Scheme,
    courant: f64,
    steps: usize,
    snapshot_interval: usize,
) -> SimulationConfig {
    let grid = Grid1D::new(cells, 1.0).expect("valid grid");
    SimulationConfig::new(grid, 1.0)
        .with_scheme(scheme)
        .with_time_step(TimeStep::Courant(courant))
        .with_steps(steps, snapshot_interval)
}

/// Borrow a 1D field's values
pub fn line(field: &ScalarField) -> &[f64] {
    assert!(field.is_line(), "expected a 1D field, got {field}");
    field.as_slice()
}

/// Exact solution of pure periodic convection of the sine profile
pub fn exact_sine(grid: &Grid1D, velocity: f64, time: f64) -> ScalarField {
    InitialCondition1D::custom(move |x, length| {
        let shifted = (x - velocity * time).rem_euclid(length);
        InitialCondition1D::Sine.evaluate(shifted, length)
    })
    .sample(grid)
}

/// Number of cells strictly between `low` and `high`
///
/// Counts every smeared front in the profile.
pub fn front_width(field: &ScalarField, low: f64, high: f64) -> usize {
    field.iter().filter(|&&x| x > low && x < high).count()
}

/// Assert every value lies in `[low - tolerance, high + tolerance]`
pub fn assert_bounded(field: &ScalarField, low: f64, high: f64, tolerance: f64, message: &str) {
    for (i, &x) in field.iter().enumerate() {
        assert!(
            x >= low - tolerance && x <= high + tolerance,
            "{}: cell {} = {} outside [{}, {}]",
            message, i, x, low, high
        );
    }
}
