//! Explicit finite-volume step in 1D
//!
//! # Algorithm
//!
//! For each of the `N + 1` faces, face `f` sitting between cells `f - 1`
//! and `f`:
//!
//! ```text
//! Fc[f] = u · φ_face(f)                 convective flux
//! Fd[f] = (Γ/dx) · (φ[f] − φ[f − 1])    diffusive flux
//! ```
//!
//! then every cell is updated from its two faces
//!
//! ```text
//! φP_new = φP − (dt/dx)(Fc[i+1] − Fc[i]) + (dt/dx)(Fd[i+1] − Fd[i])
//! ```
//!
//! and the boundary cells are patched. Each face is evaluated once and
//! shared by its two cells, so on a periodic domain the fluxes telescope and
//! the total is conserved to round-off.
//!
//! # Periodic domains
//!
//! The field is padded with two ghost cells per side copied from the opposite
//! end, enough for the widest (TVD) stencil. Face lookups then run on the
//! padded array with shifted indices, and the clamped lookup of the scheme
//! never triggers.

use std::borrow::Cow;
use std::sync::Arc;

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::{DiffusiveFlux, FaceInterpolation, ScalarField, StepUpdate};
use crate::schemes::CentralDiffusion;
use crate::solver::boundary::{apply_boundary_1d, BoundarySpec1D};
use crate::solver::driver::{RunOutcome, TimeLoop};
use crate::solver::traits::{SimulationConfig, Solver};
use crate::solver::map_cells;

/// Ghost cells per side of a periodic extension
const GHOSTS: usize = 2;

// =================================================================================================
// Stepper
// =================================================================================================

/// Configured 1D convection-diffusion step
#[derive(Clone)]
pub struct Transport1D {
    velocity: f64,
    diffusion: f64,
    dx: f64,
    boundaries: BoundarySpec1D,
    interpolation: Arc<dyn FaceInterpolation>,
    diffusive_flux: Arc<dyn DiffusiveFlux>,
}

impl Transport1D {
    /// Stepper for `config`, using its scheme and central diffusion
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            velocity: config.velocity,
            diffusion: config.diffusion,
            dx: config.grid.cell_width(),
            boundaries: config.boundaries,
            interpolation: Arc::new(config.scheme),
            diffusive_flux: Arc::new(CentralDiffusion),
        }
    }

    /// Replace the face interpolation
    pub fn with_interpolation(mut self, interpolation: Arc<dyn FaceInterpolation>) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the diffusive flux
    pub fn with_diffusive_flux(mut self, diffusive_flux: Arc<dyn DiffusiveFlux>) -> Self {
        self.diffusive_flux = diffusive_flux;
        self
    }

    /// Pure convection step, diffusion ignored
    pub fn convection_step(&self, field: &DVector<f64>, dt: f64) -> DVector<f64> {
        self.step(field, dt, false)
    }

    /// Convection-diffusion step
    pub fn convection_diffusion_step(&self, field: &DVector<f64>, dt: f64) -> DVector<f64> {
        self.step(field, dt, true)
    }

    fn step(&self, field: &DVector<f64>, dt: f64, with_diffusion: bool) -> DVector<f64> {
        let n = field.len();
        if n == 0 {
            return field.clone();
        }

        // ====== Face lookup array ======

        let (values, offset): (Cow<'_, [f64]>, isize) = if self.boundaries.is_periodic() {
            (Cow::Owned(periodic_extension(field.as_slice())), GHOSTS as isize)
        } else {
            (Cow::Borrowed(field.as_slice()), 0)
        };

        // ====== Face fluxes ======

        let u = self.velocity;
        let convective: Vec<f64> = (0..=n)
            .map(|face| {
                let left = face as isize - 1 + offset;
                u * self.interpolation.face_value(&values, left, u)
            })
            .collect();

        let diffusive: Option<Vec<f64>> = (with_diffusion && self.diffusion > 0.0).then(|| {
            (0..=n)
                .map(|face| {
                    let left = face as isize - 1 + offset;
                    self.diffusive_flux.flux(&values, left, self.diffusion, self.dx)
                })
                .collect()
        });

        // ====== Cell update ======

        let ratio = dt / self.dx;
        let updated = map_cells(n, |i| {
            let mut value = field[i] - ratio * (convective[i + 1] - convective[i]);
            if let Some(diffusive) = &diffusive {
                value += ratio * (diffusive[i + 1] - diffusive[i]);
            }
            value
        });

        apply_boundary_1d(DVector::from_vec(updated), &self.boundaries)
    }
}

/// `values` with `GHOSTS` cells wrapped onto each end
fn periodic_extension(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    (0..n + 2 * GHOSTS)
        .map(|k| values[(k + n * GHOSTS - GHOSTS) % n])
        .collect()
}

impl StepUpdate for Transport1D {
    fn advance(&self, field: &ScalarField, dt: f64) -> ScalarField {
        match field {
            ScalarField::Line(values) => ScalarField::Line(self.convection_diffusion_step(values, dt)),
            // The solver checks the shape before the run starts
            ScalarField::Plane(_) => field.clone(),
        }
    }

    fn name(&self) -> &str {
        self.interpolation.name()
    }
}

// =================================================================================================
// Solver
// =================================================================================================

/// Forward Euler solver for the 1D convection-diffusion equation
///
/// Each hook defaults to the built-in implementation selected by the
/// configuration; a substitute replaces it for every run of this solver.
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::{Grid1D, InitialCondition1D};
/// use advect_rs::solver::{ExplicitSolver1D, SimulationConfig, Solver};
///
/// let grid = Grid1D::new(100, 1.0).unwrap();
/// let initial = InitialCondition1D::step(0.2).sample(&grid);
/// let config = SimulationConfig::new(grid, 1.0).with_steps(100, 10);
///
/// let outcome = ExplicitSolver1D::new().run(&config, initial).unwrap();
/// assert!(outcome.is_completed());
/// assert_eq!(outcome.snapshots.len(), 11);
/// ```
#[derive(Clone, Default)]
pub struct ExplicitSolver1D {
    interpolation: Option<Arc<dyn FaceInterpolation>>,
    diffusive_flux: Option<Arc<dyn DiffusiveFlux>>,
    step_update: Option<Arc<dyn StepUpdate>>,
}

impl ExplicitSolver1D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute face interpolation
    pub fn with_interpolation<I>(mut self, interpolation: I) -> Self
    where
        I: FaceInterpolation + 'static,
    {
        self.interpolation = Some(Arc::new(interpolation));
        self
    }

    /// Substitute diffusive flux
    pub fn with_diffusive_flux<D>(mut self, diffusive_flux: D) -> Self
    where
        D: DiffusiveFlux + 'static,
    {
        self.diffusive_flux = Some(Arc::new(diffusive_flux));
        self
    }

    /// Substitute the whole step; interpolation and flux hooks are then unused
    pub fn with_step_update<S>(mut self, step_update: S) -> Self
    where
        S: StepUpdate + 'static,
    {
        self.step_update = Some(Arc::new(step_update));
        self
    }

    /// Stepper this solver would use for `config`
    pub fn stepper(&self, config: &SimulationConfig) -> Transport1D {
        let mut stepper = Transport1D::from_config(config);
        if let Some(interpolation) = &self.interpolation {
            stepper = stepper.with_interpolation(Arc::clone(interpolation));
        }
        if let Some(diffusive_flux) = &self.diffusive_flux {
            stepper = stepper.with_diffusive_flux(Arc::clone(diffusive_flux));
        }
        stepper
    }
}

impl Solver for ExplicitSolver1D {
    type Config = SimulationConfig;

    fn run(&self, config: &SimulationConfig, initial: ScalarField) -> Result<RunOutcome> {
        // ====== Step 1: Validation ======

        config.validate()?;
        initial.expect_shape(&[config.grid.cells()])?;

        // ====== Step 2: Setup ======

        let dt = config.resolve_time_step();
        let builtin = self.stepper(config);
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
        "Explicit Euler 1D"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
