//! Explicit finite-difference step in 2D
//!
//! Interior cells only; the one-cell frame is patched afterwards by the
//! edge treatments. For interior cell `(i, j)`:
//!
//! ```text
//! conv = u·∂φ/∂x + v·∂φ/∂y
//! diff = Γ·(δxx φ / dx² + δyy φ / dy²)
//! φ_new = φ + dt·(diff − conv)
//! ```
//!
//! The derivatives are one-sided against the local velocity for Upwind and
//! symmetric for Central. Limited schemes have no 2D form here and are
//! rejected when the configuration is validated.

use std::sync::Arc;

use nalgebra::DMatrix;

use crate::error::Result;
use crate::physics::{ScalarField, StepUpdate};
use crate::schemes::Scheme;
use crate::solver::boundary::{apply_boundary_2d, BoundarySpec2D, VelocityField2D};
use crate::solver::driver::{RunOutcome, TimeLoop};
use crate::solver::traits::{SimulationConfig2D, Solver};
use crate::solver::map_cells;

/// Configured 2D convection-diffusion step
#[derive(Debug, Clone)]
pub struct Transport2D {
    velocity: VelocityField2D,
    diffusion: f64,
    dx: f64,
    dy: f64,
    scheme: Scheme,
    boundaries: BoundarySpec2D,
}

impl Transport2D {
    /// Stepper for `config`, wall velocities imposed on the edges and
    /// averaged into the cells beside them
    pub fn from_config(config: &SimulationConfig2D) -> Self {
        let (dx, dy) = config.grid.cell_widths();
        Self {
            velocity: config
                .velocity
                .clone()
                .with_wall_boundaries(&config.boundaries)
                .with_near_wall_blending(&config.boundaries),
            diffusion: config.diffusion,
            dx,
            dy,
            scheme: config.scheme,
            boundaries: config.boundaries,
        }
    }

    /// Velocity the step actually uses
    pub fn velocity(&self) -> &VelocityField2D {
        &self.velocity
    }

    /// One explicit step over the interior, then the edge patch
    pub fn step(&self, field: &DMatrix<f64>, dt: f64) -> DMatrix<f64> {
        let (nx, ny) = field.shape();
        if nx < 3 || ny < 3 {
            return field.clone();
        }

        let (u, v) = (self.velocity.u(), self.velocity.v());
        let (dx, dy) = (self.dx, self.dy);
        let gamma = self.diffusion;
        let central = self.scheme == Scheme::Central;

        let values = map_cells(nx * ny, |k| {
            let (i, j) = (k % nx, k / nx);
            let phi = field[(i, j)];
            if i == 0 || j == 0 || i == nx - 1 || j == ny - 1 {
                return phi;
            }

            let (west, east) = (field[(i - 1, j)], field[(i + 1, j)]);
            let (south, north) = (field[(i, j - 1)], field[(i, j + 1)]);
            let (uc, vc) = (u[(i, j)], v[(i, j)]);

            let (ddx, ddy) = if central {
                ((east - west) / (2.0 * dx), (north - south) / (2.0 * dy))
            } else {
                (
                    if uc >= 0.0 { (phi - west) / dx } else { (east - phi) / dx },
                    if vc >= 0.0 { (phi - south) / dy } else { (north - phi) / dy },
                )
            };
            let convection = uc * ddx + vc * ddy;

            let diffusion = gamma
                * ((east - 2.0 * phi + west) / (dx * dx) + (north - 2.0 * phi + south) / (dy * dy));

            phi + dt * (diffusion - convection)
        });

        apply_boundary_2d(DMatrix::from_vec(nx, ny, values), field, &self.boundaries)
    }
}

impl StepUpdate for Transport2D {
    fn advance(&self, field: &ScalarField, dt: f64) -> ScalarField {
        match field {
            ScalarField::Plane(values) => ScalarField::Plane(self.step(values, dt)),
            // The solver checks the shape before the run starts
            ScalarField::Line(_) => field.clone(),
        }
    }

    fn name(&self) -> &str {
        self.scheme.name()
    }
}

/// Forward Euler solver for the 2D convection-diffusion equation
#[derive(Clone, Default)]
pub struct ExplicitSolver2D {
    step_update: Option<Arc<dyn StepUpdate>>,
}

impl ExplicitSolver2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the whole step
    pub fn with_step_update<S>(mut self, step_update: S) -> Self
    where
        S: StepUpdate + 'static,
    {
        self.step_update = Some(Arc::new(step_update));
        self
    }
}

impl Solver for ExplicitSolver2D {
    type Config = SimulationConfig2D;

    fn run(&self, config: &SimulationConfig2D, initial: ScalarField) -> Result<RunOutcome> {
        // ====== Step 1: Validation ======

        config.validate()?;
        let (nx, ny) = config.grid.shape();
        initial.expect_shape(&[nx, ny])?;

        // ====== Step 2: Setup ======

        let dt = config.resolve_time_step();
        let builtin = Transport2D::from_config(config);
        let stepper: &dyn StepUpdate = match &self.step_update {
            Some(custom) => custom.as_ref(),
            None => &builtin,
        };

        // ====== Step 3: Time integration ======

        let time_loop = TimeLoop::new(stepper, initial, dt, config.steps, config.snapshot_interval)?
            .with_metadata("solver", self.name())
            .with_metadata("scheme", stepper.name())
            .with_metadata("dt", &dt.to_string())
            .with_metadata("steps", &config.steps.to_string())
            .with_metadata("cells", &config.grid.cells().to_string());

        Ok(time_loop.finish())
    }

    fn name(&self) -> &str {
        "Explicit Euler 2D"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
