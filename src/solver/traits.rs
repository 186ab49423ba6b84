//! Solver trait and run configuration
//!
//! A run is fully described by a configuration plus an initial field:
//!
//! - [`SimulationConfig`]: 1D grid, scalar velocity, diffusion, scheme, edges
//! - [`SimulationConfig2D`]: 2D grid, per-cell velocity, diffusion, scheme, edges
//!
//! Configurations are plain serde data built once by the caller and read-only
//! during the run. `validate()` rejects every precondition violation before a
//! single step is taken.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};
use crate::physics::{Grid1D, Grid2D, ScalarField};
use crate::schemes::Scheme;
use crate::solver::boundary::{BoundarySpec1D, BoundarySpec2D, VelocityField2D};
use crate::solver::driver::RunOutcome;
use crate::solver::stability::{max_stable_step, max_stable_step_2d};

// =================================================================================================
// Solver trait
// =================================================================================================

/// An explicit time-marching solver
///
/// Divergence is reported through the returned outcome's status; `Err` is
/// reserved for configurations rejected before the run starts.
pub trait Solver {
    type Config;

    fn run(&self, config: &Self::Config, initial: ScalarField) -> Result<RunOutcome>;

    fn name(&self) -> &str;
}

// =================================================================================================
// Time step
// =================================================================================================

/// How the step size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeStep {
    /// Explicit `dt`
    Fixed(f64),
    /// Largest stable `dt` for this Courant number
    Courant(f64),
}

impl TimeStep {
    fn validate(&self) -> Result<()> {
        let value = match *self {
            TimeStep::Fixed(dt) => dt,
            TimeStep::Courant(c) => c,
        };
        if !(value.is_finite() && value > 0.0) {
            return Err(TransportError::InvalidTimeStep(value));
        }
        Ok(())
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        TimeStep::Courant(0.5)
    }
}

fn validate_run_length(steps: usize, snapshot_interval: usize) -> Result<()> {
    if steps == 0 {
        return Err(TransportError::ZeroSteps);
    }
    if snapshot_interval == 0 {
        return Err(TransportError::ZeroSnapshotInterval);
    }
    Ok(())
}

fn validate_diffusion(diffusion: f64) -> Result<()> {
    if !(diffusion.is_finite() && diffusion >= 0.0) {
        return Err(TransportError::InvalidDiffusion(diffusion));
    }
    Ok(())
}

// =================================================================================================
// 1D configuration
// =================================================================================================

/// One 1D run
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::Grid1D;
/// use advect_rs::schemes::Scheme;
/// use advect_rs::solver::{SimulationConfig, TimeStep};
///
/// let config = SimulationConfig::new(Grid1D::new(100, 1.0).unwrap(), 1.0)
///     .with_scheme(Scheme::TvdVanLeer)
///     .with_time_step(TimeStep::Courant(0.5))
///     .with_steps(100, 10);
///
/// assert!(config.validate().is_ok());
/// assert!((config.resolve_time_step() - 0.005).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub grid: Grid1D,
    pub velocity: f64,
    #[serde(default)]
    pub diffusion: f64,
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default)]
    pub boundaries: BoundarySpec1D,
    #[serde(default)]
    pub time_step: TimeStep,
    pub steps: usize,
    pub snapshot_interval: usize,
}

impl SimulationConfig {
    /// Pure upwind convection on a periodic domain, Courant 0.5, one step
    pub fn new(grid: Grid1D, velocity: f64) -> Self {
        Self {
            grid,
            velocity,
            diffusion: 0.0,
            scheme: Scheme::default(),
            boundaries: BoundarySpec1D::default(),
            time_step: TimeStep::default(),
            steps: 1,
            snapshot_interval: 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.velocity.is_finite() {
            return Err(TransportError::InvalidVelocity(self.velocity));
        }
        validate_diffusion(self.diffusion)?;
        self.boundaries.validate()?;
        self.time_step.validate()?;
        validate_run_length(self.steps, self.snapshot_interval)
    }

    /// Step size for this run
    pub fn resolve_time_step(&self) -> f64 {
        match self.time_step {
            TimeStep::Fixed(dt) => dt,
            TimeStep::Courant(c) => {
                max_stable_step(self.grid.cell_width(), self.velocity, c, self.diffusion)
            }
        }
    }
}

// =================================================================================================
// 2D configuration
// =================================================================================================

/// Smallest grid with an interior cell
const MIN_CELLS_2D: usize = 3;

/// One 2D run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig2D {
    pub grid: Grid2D,
    pub velocity: VelocityField2D,
    #[serde(default)]
    pub diffusion: f64,
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default)]
    pub boundaries: BoundarySpec2D,
    #[serde(default)]
    pub time_step: TimeStep,
    pub steps: usize,
    pub snapshot_interval: usize,
}

impl SimulationConfig2D {
    /// Upwind convection with zero-gradient edges, Courant 0.5, one step
    pub fn new(grid: Grid2D, velocity: VelocityField2D) -> Self {
        Self {
            grid,
            velocity,
            diffusion: 0.0,
            scheme: Scheme::default(),
            boundaries: BoundarySpec2D::default(),
            time_step: TimeStep::default(),
            steps: 1,
            snapshot_interval: 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (nx, ny) = self.grid.shape();
        for (axis, cells) in [("x", nx), ("y", ny)] {
            if cells < MIN_CELLS_2D {
                return Err(TransportError::InvalidCellCount { axis, cells, minimum: MIN_CELLS_2D });
            }
        }

        if !matches!(self.scheme, Scheme::Upwind | Scheme::Central) {
            return Err(TransportError::UnsupportedScheme2D(self.scheme.name().to_string()));
        }

        let (vx, vy) = self.velocity.shape();
        if (vx, vy) != (nx, ny) {
            return Err(TransportError::ShapeMismatch { expected: vec![nx, ny], found: vec![vx, vy] });
        }
        if let Some(value) = self.velocity.first_non_finite() {
            return Err(TransportError::InvalidVelocity(value));
        }

        validate_diffusion(self.diffusion)?;
        self.boundaries.validate()?;
        self.time_step.validate()?;
        validate_run_length(self.steps, self.snapshot_interval)
    }

    /// Step size for this run, limited by the fastest velocity components
    pub fn resolve_time_step(&self) -> f64 {
        match self.time_step {
            TimeStep::Fixed(dt) => dt,
            TimeStep::Courant(c) => {
                let (dx, dy) = self.grid.cell_widths();
                let (u_max, v_max) = self
                    .velocity
                    .clone()
                    .with_wall_boundaries(&self.boundaries)
                    .max_components();
                max_stable_step_2d(dx, dy, u_max, v_max, c, self.diffusion)
            }
        }
    }
}

// =================================================================================================
// Shared builders
// =================================================================================================

macro_rules! config_builders {
    ($config:ty, $boundaries:ty) => {
        impl $config {
            pub fn with_diffusion(mut self, diffusion: f64) -> Self {
                self.diffusion = diffusion;
                self
            }

            pub fn with_scheme(mut self, scheme: Scheme) -> Self {
                self.scheme = scheme;
                self
            }

            pub fn with_boundaries(mut self, boundaries: $boundaries) -> Self {
                self.boundaries = boundaries;
                self
            }

            pub fn with_time_step(mut self, time_step: TimeStep) -> Self {
                self.time_step = time_step;
                self
            }

            /// Run `steps` steps, recording every `snapshot_interval`
            pub fn with_steps(mut self, steps: usize, snapshot_interval: usize) -> Self {
                self.steps = steps;
                self.snapshot_interval = snapshot_interval;
                self
            }
        }
    };
}

config_builders!(SimulationConfig, BoundarySpec1D);
config_builders!(SimulationConfig2D, BoundarySpec2D);

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::boundary::Boundary1D;

    fn config_1d() -> SimulationConfig {
        SimulationConfig::new(Grid1D::new(50, 1.0).unwrap(), 1.0).with_steps(10, 2)
    }

    fn config_2d() -> SimulationConfig2D {
        let grid = Grid2D::new(10, 10, 1.0, 1.0).unwrap();
        let velocity = VelocityField2D::uniform(&grid, 1.0, 0.5);
        SimulationConfig2D::new(grid, velocity).with_steps(5, 1)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config_1d().validate().is_ok());
        assert!(config_2d().validate().is_ok());
    }

    #[test]
    fn test_builders_set_the_same_fields_in_1d_and_2d() {
        let one = config_1d()
            .with_diffusion(0.01)
            .with_scheme(Scheme::Central)
            .with_boundaries(BoundarySpec1D::zero_gradient())
            .with_time_step(TimeStep::Fixed(1e-3))
            .with_steps(7, 3);
        assert_eq!(one.diffusion, 0.01);
        assert_eq!(one.scheme, Scheme::Central);
        assert_eq!(one.boundaries, BoundarySpec1D::zero_gradient());
        assert_eq!(one.time_step, TimeStep::Fixed(1e-3));
        assert_eq!((one.steps, one.snapshot_interval), (7, 3));

        let two = config_2d()
            .with_diffusion(0.01)
            .with_scheme(Scheme::Central)
            .with_boundaries(BoundarySpec2D::lid_driven_cavity(1.0))
            .with_time_step(TimeStep::Fixed(1e-3))
            .with_steps(7, 3);
        assert_eq!(two.diffusion, 0.01);
        assert_eq!(two.scheme, Scheme::Central);
        assert_eq!(two.boundaries, BoundarySpec2D::lid_driven_cavity(1.0));
        assert_eq!(two.time_step, TimeStep::Fixed(1e-3));
        assert_eq!((two.steps, two.snapshot_interval), (7, 3));
    }

    #[test]
    fn test_rejects_bad_time_steps() {
        for time_step in [TimeStep::Fixed(0.0), TimeStep::Fixed(-1e-3), TimeStep::Courant(f64::NAN)] {
            let config = config_1d().with_time_step(time_step);
            assert!(matches!(config.validate(), Err(TransportError::InvalidTimeStep(_))));
        }
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert_eq!(config_1d().with_steps(0, 1).validate(), Err(TransportError::ZeroSteps));
        assert_eq!(config_1d().with_steps(10, 0).validate(), Err(TransportError::ZeroSnapshotInterval));
    }

    #[test]
    fn test_rejects_bad_physics() {
        assert_eq!(
            config_1d().with_diffusion(-0.1).validate(),
            Err(TransportError::InvalidDiffusion(-0.1))
        );

        let mut config = config_1d();
        config.velocity = f64::INFINITY;
        assert!(matches!(config.validate(), Err(TransportError::InvalidVelocity(_))));

        let config = config_1d()
            .with_boundaries(BoundarySpec1D::new(Boundary1D::ZeroGradient, Boundary1D::Periodic));
        assert_eq!(config.validate(), Err(TransportError::UnpairedPeriodicBoundary));
    }

    #[test]
    fn test_courant_resolution_includes_diffusion() {
        let convective = config_1d().resolve_time_step();
        let limited = config_1d().with_diffusion(1.0).resolve_time_step();

        assert!((convective - 0.01).abs() < 1e-15);
        assert!((limited - 0.4 * 0.02 * 0.02 / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_fixed_step_is_used_verbatim() {
        let config = config_1d().with_time_step(TimeStep::Fixed(1e-4));
        assert_eq!(config.resolve_time_step(), 1e-4);
    }

    #[test]
    fn test_2d_rejects_tvd_schemes() {
        let config = config_2d().with_scheme(Scheme::TvdSuperbee);
        assert_eq!(
            config.validate(),
            Err(TransportError::UnsupportedScheme2D("tvd-superbee".to_string()))
        );
        assert!(config_2d().with_scheme(Scheme::Central).validate().is_ok());
    }

    #[test]
    fn test_2d_needs_an_interior() {
        let grid = Grid2D::new(10, 2, 1.0, 1.0).unwrap();
        let velocity = VelocityField2D::uniform(&grid, 1.0, 0.0);
        let config = SimulationConfig2D::new(grid, velocity);

        assert_eq!(
            config.validate(),
            Err(TransportError::InvalidCellCount { axis: "y", cells: 2, minimum: 3 })
        );
    }

    #[test]
    fn test_2d_velocity_must_match_grid() {
        let mut config = config_2d();
        let other = Grid2D::new(5, 10, 1.0, 1.0).unwrap();
        config.velocity = VelocityField2D::uniform(&other, 1.0, 0.0);

        assert!(matches!(config.validate(), Err(TransportError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_2d_courant_step() {
        // 1/0.1 + 0.5/0.1 = 15 per unit time
        let dt = config_2d().resolve_time_step();
        assert!((dt - 0.5 / 15.0).abs() < 1e-12);
    }
}
