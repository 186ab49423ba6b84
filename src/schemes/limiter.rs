//! Flux limiters for the TVD family
//!
//! A limiter `ψ(r)` of the gradient ratio `r` blends first-order upwinding
//! (`ψ = 0`, near discontinuities) with a second-order face value (`ψ = 1`,
//! in smooth regions). All three stay inside the Sweby region, so the limited
//! scheme never creates new extrema for Courant numbers up to 0.5.

use serde::{Deserialize, Serialize};

/// Denominators smaller than this are treated as a flat region
pub const FLAT_GRADIENT_TOLERANCE: f64 = 1e-30;

/// TVD limiter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limiter {
    /// Most dissipative: `max(0, min(1, r))`
    Minmod,
    /// Smooth: `2r / (1 + r)` for `r > 0`
    VanLeer,
    /// Most compressive: `max(0, min(2r, 1), min(r, 2))`
    Superbee,
}

impl Limiter {
    /// Limiter value `ψ(r)`
    ///
    /// ```rust
    /// use advect_rs::schemes::Limiter;
    ///
    /// assert_eq!(Limiter::Minmod.psi(0.5), 0.5);
    /// assert_eq!(Limiter::VanLeer.psi(1.0), 1.0);
    /// assert_eq!(Limiter::Superbee.psi(0.5), 1.0);
    /// assert_eq!(Limiter::Superbee.psi(-1.0), 0.0);
    /// ```
    #[inline]
    pub fn psi(&self, r: f64) -> f64 {
        match self {
            Limiter::Minmod => r.min(1.0).max(0.0),
            Limiter::VanLeer => {
                if r > 0.0 { 2.0 * r / (1.0 + r) } else { 0.0 }
            }
            Limiter::Superbee => {
                if r > 0.0 {
                    (2.0 * r).min(1.0).max(r.min(2.0)).max(0.0)
                } else {
                    0.0
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Limiter::Minmod => "minmod",
            Limiter::VanLeer => "vanleer",
            Limiter::Superbee => "superbee",
        }
    }
}

/// Gradient ratio `r = (φ_U − φ_UU) / (φ_D − φ_U)`
///
/// Returns `1.0` when `|φ_D − φ_U|` is below [`FLAT_GRADIENT_TOLERANCE`].
#[inline]
pub fn gradient_ratio(upstream: f64, upwind: f64, downwind: f64) -> f64 {
    let denominator = downwind - upwind;
    if denominator.abs() < FLAT_GRADIENT_TOLERANCE {
        1.0
    } else {
        (upwind - upstream) / denominator
    }
}
