//! Explicit time-marching methods
//!
//! Concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! - **[`ExplicitSolver1D`]**: finite-volume forward Euler on a 1D grid, any
//!   [`Scheme`](crate::schemes::Scheme), periodic or patched boundaries
//!   - Stepper: [`Transport1D`]
//!   - Hooks: face interpolation, diffusive flux, whole step
//!
//! - **[`ExplicitSolver2D`]**: finite-difference forward Euler on the interior
//!   of a 2D grid, Upwind or Central
//!   - Stepper: [`Transport2D`]
//!   - Hooks: whole step
//!
//! Each stepper is a pure function of the previous field: it reads one field
//! and allocates the next, so independent runs share nothing and can execute
//! side by side.

pub mod euler1d;
pub mod euler2d;

pub use euler1d::{ExplicitSolver1D, Transport1D};
pub use euler2d::{ExplicitSolver2D, Transport2D};
