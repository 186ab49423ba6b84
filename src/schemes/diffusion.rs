//! Face-centred diffusive flux
//!
//! `F_diff = (Γ / dx) · (φ_right − φ_left)`, with the same clamped lookup as
//! the face interpolation, so the faces outside the domain carry zero flux.

use crate::physics::DiffusiveFlux;
use crate::schemes::cell;

/// Diffusive flux through the face between `left` and `left + 1`
///
/// ```rust
/// use advect_rs::schemes::diffusive_flux;
///
/// let field = [0.0, 1.0, 3.0];
/// assert_eq!(diffusive_flux(&field, 1, 0.5, 0.25), 4.0);
/// // Outside the domain both lookups clamp to the same cell
/// assert_eq!(diffusive_flux(&field, 2, 0.5, 0.25), 0.0);
/// ```
#[inline]
pub fn diffusive_flux(field: &[f64], left: isize, diffusion: f64, dx: f64) -> f64 {
    (diffusion / dx) * (cell(field, left + 1) - cell(field, left))
}

/// Second-order central-difference diffusion, the built-in [`DiffusiveFlux`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CentralDiffusion;

impl DiffusiveFlux for CentralDiffusion {
    fn flux(&self, field: &[f64], left: isize, diffusion: f64, dx: f64) -> f64 {
        diffusive_flux(field, left, diffusion, dx)
    }

    fn name(&self) -> &str {
        "central-diffusion"
    }
}
