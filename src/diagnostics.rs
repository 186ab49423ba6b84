//! Field diagnostics
//!
//! Pure functions over one or two fields. Norms compare same-shaped fields and
//! fail on a shape mismatch; everything else is total.
//!
//! | Function          | Meaning                                       |
//! |-------------------|-----------------------------------------------|
//! | [`l2_norm`]       | root-mean-square difference                   |
//! | [`linf_norm`]     | maximum absolute difference                   |
//! | [`total_mass`]    | Riemann sum `Σ φ · cell measure`              |
//! | [`field_is_valid`]| no NaN, no infinity                           |
//! | [`field_max`]     | largest value                                 |
//! | [`field_min`]     | smallest value                                |
//! | [`max_magnitude`] | largest absolute value                        |
//! | [`total_variation`] | `Σ |φ[i+1] − φ[i]|` along a 1D profile      |

use crate::error::Result;
use crate::physics::ScalarField;

fn same_shape(a: &ScalarField, b: &ScalarField) -> Result<()> {
    a.expect_shape(&b.shape())
}

/// Root-mean-square difference between two fields
///
/// ```rust
/// use advect_rs::diagnostics::l2_norm;
/// use advect_rs::physics::ScalarField;
///
/// let a = ScalarField::from_vec(vec![1.0, 1.0, 1.0, 1.0]);
/// let b = ScalarField::from_vec(vec![0.0, 2.0, 0.0, 2.0]);
/// assert_eq!(l2_norm(&a, &b).unwrap(), 1.0);
/// ```
pub fn l2_norm(a: &ScalarField, b: &ScalarField) -> Result<f64> {
    same_shape(a, b)?;
    if a.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
    Ok((sum / a.len() as f64).sqrt())
}

/// Maximum absolute difference between two fields
pub fn linf_norm(a: &ScalarField, b: &ScalarField) -> Result<f64> {
    same_shape(a, b)?;
    Ok(a.iter().zip(b.iter()).fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs())))
}

/// Integral of the field: sum of values times `cell_measure`
///
/// `cell_measure` is the cell width in 1D and the cell area in 2D.
pub fn total_mass(field: &ScalarField, cell_measure: f64) -> f64 {
    field.iter().sum::<f64>() * cell_measure
}

/// No NaN and no infinity anywhere
pub fn field_is_valid(field: &ScalarField) -> bool {
    field.iter().all(|x| x.is_finite())
}

/// Fold that lets a NaN through instead of skipping it like `f64::max` does
fn fold_nan_aware(
    values: impl Iterator<Item = f64>,
    init: f64,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    values.fold(init, |acc, x| if acc.is_nan() || x.is_nan() { f64::NAN } else { pick(acc, x) })
}

/// Largest value, `-inf` for an empty field, NaN once any cell is NaN
pub fn field_max(field: &ScalarField) -> f64 {
    fold_nan_aware(field.iter().copied(), f64::NEG_INFINITY, f64::max)
}

/// Smallest value, `+inf` for an empty field, NaN once any cell is NaN
pub fn field_min(field: &ScalarField) -> f64 {
    fold_nan_aware(field.iter().copied(), f64::INFINITY, f64::min)
}

/// Largest absolute value, NaN once any cell is NaN
pub fn max_magnitude(field: &ScalarField) -> f64 {
    fold_nan_aware(field.iter().map(|x| x.abs()), 0.0, f64::max)
}

/// Total variation of a profile, `Σ |φ[i+1] − φ[i]|` in storage order
///
/// Only meaningful for 1D fields; a plane is walked as its flat slice.
pub fn total_variation(field: &ScalarField) -> f64 {
    field.as_slice().windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum()
}
