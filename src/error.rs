//! Error types
//!
//! Every failure the core can report is a precondition violation caught at
//! construction or configuration time. Numerical divergence is not an error:
//! it is a terminal run state ([`RunStatus::Diverged`](crate::solver::RunStatus)).

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TransportError>;

/// Precondition violations rejected before a run starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// A grid axis with zero cells
    #[error("grid axis `{axis}` must have at least {minimum} cell(s), got {cells}")]
    InvalidCellCount {
        axis: &'static str,
        cells: usize,
        minimum: usize,
    },

    /// A domain length that is zero, negative or not finite
    #[error("domain length along `{axis}` must be positive and finite, got {length}")]
    InvalidDomainLength { axis: &'static str, length: f64 },

    /// Scheme tag outside the closed set
    #[error("unknown interpolation scheme `{0}` (expected upwind, central, tvd-minmod, tvd-vanleer or tvd-superbee)")]
    UnknownScheme(String),

    /// Initial-condition tag outside the closed set
    #[error("unknown initial condition `{0}`")]
    UnknownInitialCondition(String),

    /// Scheme the 2D explicit step has no discretisation for
    #[error("scheme `{0}` is not available for the 2D step (use upwind or central)")]
    UnsupportedScheme2D(String),

    /// Non-positive or non-finite time step, or Courant number
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// A run needs at least one step
    #[error("step count must be greater than 0")]
    ZeroSteps,

    /// Snapshots are taken every `interval` steps, so zero is meaningless
    #[error("snapshot interval must be greater than 0")]
    ZeroSnapshotInterval,

    /// Negative or non-finite diffusion coefficient
    #[error("diffusion coefficient must be non-negative and finite, got {0}")]
    InvalidDiffusion(f64),

    /// Non-finite velocity component
    #[error("velocity must be finite, got {0}")]
    InvalidVelocity(f64),

    /// Non-finite value imposed by a fixed boundary
    #[error("fixed boundary value must be finite, got {0}")]
    InvalidBoundaryValue(f64),

    /// Exactly one edge of a 1D domain is periodic
    #[error("periodic boundaries must be set on both edges")]
    UnpairedPeriodicBoundary,

    /// Two fields, or a field and its grid, disagree in shape
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}
