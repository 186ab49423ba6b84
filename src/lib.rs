//! advect-rs: Structured-grid convection-diffusion core
//!
//! Explicit finite-volume and finite-difference solvers for the scalar
//! transport equation
//!
//! ```text
//! ∂φ/∂t + u·∇φ = Γ·∇²φ
//! ```
//!
//! on uniform 1D and 2D grids, written for teaching: every scheme, limiter
//! and stability bound is small enough to read in one sitting.
//!
//! # Architecture
//!
//! advect-rs is built on two core principles:
//!
//! 1. **Separation of discretisation and time marching**
//!    - Schemes define face values and stencils (what a step computes)
//!    - Solvers drive steps, snapshots and divergence checks (how a run proceeds)
//!
//! 2. **Pure, substitutable pieces**
//!    - A step reads one field and returns a new one
//!    - Face interpolation, diffusive flux and the whole step are traits with
//!      closure implementations, so any of them can be swapped out
//!
//! # Quick Start
//!
//! ```rust
//! use advect_rs::prelude::*;
//!
//! # fn main() -> advect_rs::error::Result<()> {
//! // 1. Grid and initial profile
//! let grid = Grid1D::new(100, 1.0)?;
//! let initial = InitialCondition1D::step(0.2).sample(&grid);
//!
//! // 2. Configuration: unit velocity, Courant number 0.5, 100 steps
//! let config = SimulationConfig::new(grid, 1.0)
//!     .with_scheme(Scheme::Upwind)
//!     .with_time_step(TimeStep::Courant(0.5))
//!     .with_steps(100, 25);
//!
//! // 3. Run
//! let outcome = ExplicitSolver1D::new().run(&config, initial)?;
//!
//! // 4. Inspect
//! assert!(outcome.is_completed());
//! assert_eq!(outcome.snapshots.len(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grids, fields, initial conditions and extension traits
//! - [`schemes`]: face interpolation, limiters, stencils
//! - [`solver`]: boundaries, stability, time loop, explicit solvers
//! - [`diagnostics`]: norms, mass, validity checks
//! - [`error`]: the crate error type

pub mod diagnostics;
pub mod error;
pub mod physics;
pub mod schemes;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use advect_rs::prelude::*;
    //! ```
    pub use crate::error::TransportError;
    pub use crate::physics::{
        Grid1D, Grid2D, InitialCondition1D, InitialCondition2D, ScalarField, StepUpdate,
    };
    pub use crate::schemes::{Limiter, Scheme};
    pub use crate::solver::{
        Boundary1D, Boundary2D, BoundarySpec1D, BoundarySpec2D, ExplicitSolver1D,
        ExplicitSolver2D, RunOutcome, RunStatus, SimulationConfig, SimulationConfig2D, Solver,
        TimeStep, VelocityField2D,
    };
}
