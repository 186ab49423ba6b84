//! Extension hooks
//!
//! The explicit solvers are assembled from three pure functions with fixed
//! numeric contracts. The built-in schemes implement them, and any closure
//! with the matching signature does too, so a presentation layer can swap in
//! its own formula without touching the time loop.
//!
//! | Hook                  | Signature                                   |
//! |-----------------------|---------------------------------------------|
//! | [`FaceInterpolation`] | `(field, left, u) -> φ_face`                |
//! | [`DiffusiveFlux`]     | `(field, left, Γ, dx) -> F_diff`            |
//! | [`StepUpdate`]        | `(field, dt) -> field`                      |
//!
//! `left` is the index of the cell on the left of the face; it is signed so
//! the face left of cell 0 is `-1`. Lookups clamp to the field bounds.
//!
//! # Example
//!
//! ```rust
//! use advect_rs::physics::FaceInterpolation;
//!
//! // Downwind interpolation, a classic unstable choice
//! let downwind = |field: &[f64], left: isize, u: f64| {
//!     let last = field.len() as isize - 1;
//!     let i = if u >= 0.0 { left + 1 } else { left };
//!     field[i.clamp(0, last) as usize]
//! };
//!
//! assert_eq!(downwind.face_value(&[1.0, 2.0], 0, 1.0), 2.0);
//! assert_eq!(downwind.name(), "custom");
//! ```

use crate::physics::ScalarField;

// =================================================================================================
// Face interpolation
// =================================================================================================

/// Face value of the transported quantity
pub trait FaceInterpolation: Send + Sync {
    /// Value at the face between cells `left` and `left + 1`, for face velocity `u`
    fn face_value(&self, field: &[f64], left: isize, u: f64) -> f64;

    /// Display name
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> FaceInterpolation for F
where
    F: Fn(&[f64], isize, f64) -> f64 + Send + Sync,
{
    fn face_value(&self, field: &[f64], left: isize, u: f64) -> f64 {
        self(field, left, u)
    }
}

// =================================================================================================
// Diffusive flux
// =================================================================================================

/// Face-centred diffusive flux
pub trait DiffusiveFlux: Send + Sync {
    /// Flux through the face between cells `left` and `left + 1`
    fn flux(&self, field: &[f64], left: isize, diffusion: f64, dx: f64) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> DiffusiveFlux for F
where
    F: Fn(&[f64], isize, f64, f64) -> f64 + Send + Sync,
{
    fn flux(&self, field: &[f64], left: isize, diffusion: f64, dx: f64) -> f64 {
        self(field, left, diffusion, dx)
    }
}

// =================================================================================================
// Step update
// =================================================================================================

/// One explicit step, previous field in, fresh field out
///
/// Implementations must not retain or alias the input: the time loop hands
/// the returned field to the next step and to the snapshot sequence.
pub trait StepUpdate: Send + Sync {
    fn advance(&self, field: &ScalarField, dt: f64) -> ScalarField;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> StepUpdate for F
where
    F: Fn(&ScalarField, f64) -> ScalarField + Send + Sync,
{
    fn advance(&self, field: &ScalarField, dt: f64) -> ScalarField {
        self(field, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_as_diffusive_flux() {
        let flux = |field: &[f64], left: isize, gamma: f64, dx: f64| {
            let i = left as usize;
            gamma / dx * (field[i + 1] - field[i])
        };

        assert_eq!(flux.flux(&[1.0, 3.0], 0, 0.5, 0.25), 4.0);
        assert_eq!(DiffusiveFlux::name(&flux), "custom");
    }

    #[test]
    fn test_closure_as_step_update() {
        let decay = |field: &ScalarField, dt: f64| {
            ScalarField::from_vec(field.iter().map(|v| v * (1.0 - dt)).collect())
        };
        let input = ScalarField::from_vec(vec![2.0, 4.0]);
        let output = decay.advance(&input, 0.5);

        assert_eq!(output.as_slice(), &[1.0, 2.0]);
        assert_eq!(input.as_slice(), &[2.0, 4.0]);
    }

    #[test]
    fn test_hooks_are_object_safe() {
        let hook: Box<dyn FaceInterpolation> =
            Box::new(|field: &[f64], left: isize, _u: f64| field[left as usize]);
        assert_eq!(hook.face_value(&[5.0, 6.0], 1, 1.0), 6.0);
    }
}
