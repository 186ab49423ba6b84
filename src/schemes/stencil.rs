//! Explicit update stencils, for display and verification
//!
//! For the linear schemes one explicit step at an interior cell reads
//!
//! ```text
//! φP_new = aW·φW + aP·φP + aE·φE
//! ```
//!
//! With `C = u·dt/dx`:
//!
//! | Scheme           | aW      | aP       | aE       |
//! |------------------|---------|----------|----------|
//! | Upwind, u ≥ 0    | C       | 1 − C    | 0        |
//! | Upwind, u < 0    | 0       | 1 − \|C\| | \|C\|    |
//! | Central          | C/2     | 1        | −C/2     |
//! | Diffusion        | d       | −2d      | d        |
//!
//! where `d = Γ·dt/dx²` and the diffusion row is an increment to be
//! [combined](Stencil::combine) with a convection row. TVD coefficients depend
//! on the local solution and have no fixed form.

use serde::{Deserialize, Serialize};

use crate::schemes::Scheme;

/// Coefficients of one explicit update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Stencil {
    Fixed { west: f64, centre: f64, east: f64 },

    /// Nonlinear in the local solution (limited schemes)
    StateDependent,
}

impl Stencil {
    /// Fixed coefficients `(aW, aP, aE)`, if any
    pub fn coefficients(&self) -> Option<(f64, f64, f64)> {
        match *self {
            Stencil::Fixed { west, centre, east } => Some((west, centre, east)),
            Stencil::StateDependent => None,
        }
    }

    /// Sum of two stencils; state dependence is contagious
    pub fn combine(&self, other: &Stencil) -> Stencil {
        match (self.coefficients(), other.coefficients()) {
            (Some((w1, c1, e1)), Some((w2, c2, e2))) => Stencil::Fixed {
                west: w1 + w2,
                centre: c1 + c2,
                east: e1 + e2,
            },
            _ => Stencil::StateDependent,
        }
    }

    /// Evaluate the update for one cell and its neighbours
    pub fn apply(&self, west: f64, centre: f64, east: f64) -> Option<f64> {
        self.coefficients()
            .map(|(aw, ap, ae)| aw * west + ap * centre + ae * east)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Stencil::Fixed { .. })
    }
}

/// Convection update stencil for `scheme`
///
/// ```rust
/// use advect_rs::schemes::{convection_stencil, Scheme};
///
/// let stencil = convection_stencil(Scheme::Upwind, 1.0, 0.25, 0.125);
/// assert_eq!(stencil.coefficients(), Some((0.5, 0.5, 0.0)));
///
/// assert!(!convection_stencil(Scheme::TvdMinmod, 1.0, 0.25, 0.125).is_fixed());
/// ```
pub fn convection_stencil(scheme: Scheme, u: f64, dx: f64, dt: f64) -> Stencil {
    let courant = u * dt / dx;

    match scheme {
        Scheme::Upwind if u >= 0.0 => Stencil::Fixed {
            west: courant,
            centre: 1.0 - courant,
            east: 0.0,
        },
        Scheme::Upwind => Stencil::Fixed {
            west: 0.0,
            centre: 1.0 + courant,
            east: -courant,
        },
        Scheme::Central => Stencil::Fixed {
            west: 0.5 * courant,
            centre: 1.0,
            east: -0.5 * courant,
        },
        Scheme::TvdMinmod | Scheme::TvdVanLeer | Scheme::TvdSuperbee => Stencil::StateDependent,
    }
}

/// Diffusion increment stencil `(d, −2d, d)`, `d = Γ·dt/dx²`
pub fn diffusion_stencil(diffusion: f64, dx: f64, dt: f64) -> Stencil {
    let d = diffusion * dt / (dx * dx);
    Stencil::Fixed { west: d, centre: -2.0 * d, east: d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upwind_negative_velocity() {
        let stencil = convection_stencil(Scheme::Upwind, -2.0, 0.1, 0.01);
        let (w, p, e) = stencil.coefficients().unwrap();

        assert_eq!(w, 0.0);
        assert!((p - 0.8).abs() < 1e-15);
        assert!((e - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_central_is_antisymmetric() {
        let (w, p, e) = convection_stencil(Scheme::Central, 1.0, 0.1, 0.02)
            .coefficients()
            .unwrap();

        assert!((w - 0.1).abs() < 1e-15);
        assert_eq!(p, 1.0);
        assert!((e + 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_linear_stencils_preserve_constants() {
        for scheme in [Scheme::Upwind, Scheme::Central] {
            for u in [-1.5, 0.0, 1.5] {
                let stencil = convection_stencil(scheme, u, 0.1, 0.03)
                    .combine(&diffusion_stencil(0.01, 0.1, 0.03));
                let (w, p, e) = stencil.coefficients().unwrap();
                assert!((w + p + e - 1.0).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_diffusion_stencil_sums_to_zero() {
        let (w, p, e) = diffusion_stencil(0.5, 0.1, 0.001).coefficients().unwrap();
        assert!((w - 0.05).abs() < 1e-15);
        assert!((p + 0.1).abs() < 1e-15);
        assert_eq!(w, e);
    }

    #[test]
    fn test_state_dependence_is_contagious() {
        let tvd = convection_stencil(Scheme::TvdSuperbee, 1.0, 0.1, 0.05);
        let combined = tvd.combine(&diffusion_stencil(0.1, 0.1, 0.05));

        assert_eq!(combined, Stencil::StateDependent);
        assert_eq!(combined.apply(1.0, 2.0, 3.0), None);
    }

    #[test]
    fn test_apply() {
        let stencil = Stencil::Fixed { west: 0.25, centre: 0.5, east: 0.25 };
        assert_eq!(stencil.apply(4.0, 8.0, 0.0), Some(5.0));
    }
}
