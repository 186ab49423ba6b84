//! Grids, fields and initial conditions
//!
//! Everything a run is built from before any numerics happen:
//!
//! - **Grid**: immutable uniform 1D/2D cell-centred meshes
//! - **Field**: dense `f64` values, one per cell
//! - **Initial conditions**: closed sets of analytic profiles
//! - **Hooks**: the pure-function contracts the solvers are assembled from
//!
//! # Example
//!
//! ```rust
//! use advect_rs::physics::{Grid1D, InitialCondition1D};
//!
//! let grid = Grid1D::new(100, 1.0).unwrap();
//! let field = InitialCondition1D::Sine.sample(&grid);
//!
//! assert_eq!(field.len(), 100);
//! ```

pub mod field;
pub mod grid;
pub mod initial;
pub mod traits;

pub use field::ScalarField;
pub use grid::{Grid1D, Grid1DSpec, Grid2D, Grid2DSpec};
pub use initial::{init_field_1d, init_field_2d, InitialCondition1D, InitialCondition2D};
pub use traits::{DiffusiveFlux, FaceInterpolation, StepUpdate};
