//! Time integration
//!
//! # Module Organization
//!
//! - **`traits`**: the [`Solver`] trait and the run configurations
//!   [`SimulationConfig`] / [`SimulationConfig2D`], with [`TimeStep`]
//! - **`boundary`**: 1D and 2D edge treatments, wall velocities
//! - **`stability`**: explicit step limits, Courant and Péclet numbers
//! - **`driver`**: the stepwise [`TimeLoop`], snapshots and [`RunOutcome`]
//! - **`methods`**: [`ExplicitSolver1D`] and [`ExplicitSolver2D`]
//!
//! # Quick Start
//!
//! ```rust
//! use advect_rs::physics::{Grid1D, InitialCondition1D};
//! use advect_rs::schemes::Scheme;
//! use advect_rs::solver::{ExplicitSolver1D, SimulationConfig, Solver, TimeStep};
//!
//! let grid = Grid1D::new(200, 1.0).unwrap();
//! let initial = InitialCondition1D::gaussian(0.3, 0.05).sample(&grid);
//!
//! let config = SimulationConfig::new(grid, 1.0)
//!     .with_scheme(Scheme::TvdSuperbee)
//!     .with_time_step(TimeStep::Courant(0.4))
//!     .with_steps(200, 50);
//!
//! let outcome = ExplicitSolver1D::new().run(&config, initial).unwrap();
//! assert!(outcome.is_completed());
//! assert_eq!(outcome.snapshots.len(), 5);
//! ```
//!
//! # Errors versus divergence
//!
//! `run` returns `Err` only for configurations rejected up front. A run that
//! blows up is a successful call whose outcome status is
//! [`RunStatus::Diverged`].

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod driver;
mod methods;
mod stability;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Cell updates inside one explicit step are independent: every cell reads the
// previous field only. Whether to hand them to Rayon is an execution concern
// decided here, once, for both steppers.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a lock on every step. Relaxed ordering
// is sufficient: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of cells above which a step runs in parallel
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Steps over fewer cells than this run sequentially; larger ones use Rayon,
/// but only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use advect_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use advect_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Test builds only.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

/// Evaluate `f` for every cell index `0..len`
///
/// Runs on the Rayon pool when `len` exceeds [`parallel_threshold()`] and the
/// `parallel` feature is on. Order of the output is the index order either way.
pub(crate) fn map_cells<F>(len: usize, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if len > parallel_threshold() {
        use rayon::prelude::*;
        return (0..len).into_par_iter().map(f).collect();
    }

    (0..len).map(f).collect()
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::{
    apply_boundary_1d, apply_boundary_2d, Boundary1D, Boundary2D, BoundarySpec1D, BoundarySpec2D,
    Edge, VelocityField2D,
};
pub use driver::{RunOutcome, RunState, RunStatus, Snapshot, SnapshotSequence, TimeLoop};
pub use methods::{ExplicitSolver1D, ExplicitSolver2D, Transport1D, Transport2D};
pub use stability::{
    courant_number, max_stable_step, max_stable_step_2d, peclet_number, DIFFUSION_SAFETY,
    VELOCITY_EPSILON,
};
pub use traits::{SimulationConfig, SimulationConfig2D, Solver, TimeStep};

// =================================================================================================
// Tests
// =================================================================================================
