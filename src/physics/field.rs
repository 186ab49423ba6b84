//! Scalar fields
//!
//! A field is a dense array of `f64`, one value per cell. It has no identity
//! beyond its values: initial conditions produce one, every solver step reads
//! one and returns a freshly allocated one.
//!
//! # Storage
//!
//! - **Line**: 1D profile, `DVector<f64>` of length `N`
//! - **Plane**: 2D field, `DMatrix<f64>` of shape `(nx, ny)`
//!
//! nalgebra matrices are column-major, so the flat slice of a `(nx, ny)` plane
//! is row-major with the first axis varying fastest: cell `(i, j)` sits at
//! `i + j * nx`.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TransportError};

/// Scalar field over a 1D or 2D grid
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::ScalarField;
///
/// let line = ScalarField::from_vec(vec![0.0, 1.0, 0.5]);
/// assert!(line.is_line());
/// assert_eq!(line.shape(), vec![3]);
///
/// let plane = ScalarField::uniform_plane(4, 3, 1.0);
/// assert_eq!(plane.shape(), vec![4, 3]);
/// assert_eq!(plane.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarField {
    /// 1D profile
    Line(DVector<f64>),

    /// 2D field indexed `[(i, j)]`, `i` along x
    Plane(DMatrix<f64>),
}

impl ScalarField {
    // ======================================= constructors =======================================

    /// Create a 1D field from values
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Line(DVector::from_vec(values))
    }

    /// Create a 2D field from a DMatrix of shape `(nx, ny)`
    pub fn from_matrix(values: DMatrix<f64>) -> Self {
        Self::Plane(values)
    }

    /// Create a 2D field from flat row-major values (first axis fastest)
    pub fn from_row_major(nx: usize, ny: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != nx * ny {
            return Err(TransportError::ShapeMismatch {
                expected: vec![nx, ny],
                found: vec![values.len()],
            });
        }
        Ok(Self::Plane(DMatrix::from_vec(nx, ny, values)))
    }

    /// Create a uniform 1D field
    pub fn uniform_line(cells: usize, value: f64) -> Self {
        Self::Line(DVector::from_element(cells, value))
    }

    /// Create a uniform 2D field
    pub fn uniform_plane(nx: usize, ny: usize, value: f64) -> Self {
        Self::Plane(DMatrix::from_element(nx, ny, value))
    }

    // ========================================== Queries ==========================================

    /// Check field is 1D
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    /// Spatial dimension: 1 or 2
    pub fn ndim(&self) -> usize {
        match self {
            ScalarField::Line(_) => 1,
            ScalarField::Plane(_) => 2,
        }
    }

    /// Shape as a vector: `[N]` or `[nx, ny]`
    pub fn shape(&self) -> Vec<usize> {
        match self {
            ScalarField::Line(v) => vec![v.len()],
            ScalarField::Plane(m) => vec![m.nrows(), m.ncols()],
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat view of the values, row-major for planes
    pub fn as_slice(&self) -> &[f64] {
        match self {
            ScalarField::Line(v) => v.as_slice(),
            ScalarField::Plane(m) => m.as_slice(),
        }
    }

    /// Iterate over all values in storage order
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.as_slice().iter()
    }

    /// Require a specific shape
    pub fn expect_shape(&self, expected: &[usize]) -> Result<()> {
        let found = self.shape();
        if found != expected {
            return Err(TransportError::ShapeMismatch { expected: expected.to_vec(), found });
        }
        Ok(())
    }

    // ======================================== Extractions ========================================

    /// Try to extract as a 1D profile
    pub fn try_as_line(&self) -> Option<&DVector<f64>> {
        match self {
            ScalarField::Line(v) => Some(v),
            _ => None,
        }
    }

    /// Try to extract as a 2D field
    pub fn try_as_plane(&self) -> Option<&DMatrix<f64>> {
        match self {
            ScalarField::Plane(m) => Some(m),
            _ => None,
        }
    }

    /// Consume into flat values
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            ScalarField::Line(v) => v.as_slice().to_vec(),
            ScalarField::Plane(m) => m.as_slice().to_vec(),
        }
    }
}

// ======================== Display ============================

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarField::Line(v) => write!(f, "Line [{}]", v.len()),
            ScalarField::Plane(m) => write!(f, "Plane [{} * {}]", m.nrows(), m.ncols()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line() {
        let field = ScalarField::uniform_line(100, 1.0);
        assert!(field.is_line());
        assert_eq!(field.ndim(), 1);
        assert_eq!(field.len(), 100);
        assert!(field.try_as_plane().is_none());
    }

    #[test]
    fn test_plane_is_row_major() {
        let field = ScalarField::from_row_major(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let plane = field.try_as_plane().unwrap();

        // (i, j) -> i + j * nx
        assert_eq!(plane[(0, 0)], 0.0);
        assert_eq!(plane[(2, 0)], 2.0);
        assert_eq!(plane[(0, 1)], 3.0);
        assert_eq!(plane[(1, 1)], 4.0);
        assert_eq!(field.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_row_major_rejects_wrong_length() {
        let result = ScalarField::from_row_major(3, 3, vec![0.0; 8]);
        assert!(matches!(result, Err(TransportError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_expect_shape() {
        let field = ScalarField::uniform_plane(4, 5, 0.0);
        assert!(field.expect_shape(&[4, 5]).is_ok());
        assert_eq!(
            field.expect_shape(&[20]).unwrap_err(),
            TransportError::ShapeMismatch { expected: vec![20], found: vec![4, 5] }
        );
    }

    #[test]
    fn test_into_vec_keeps_order() {
        let field = ScalarField::from_vec(vec![3.0, 1.0, 2.0]);
        assert_eq!(field.into_vec(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarField::uniform_line(7, 0.0).to_string(), "Line [7]");
        assert_eq!(ScalarField::uniform_plane(2, 3, 0.0).to_string(), "Plane [2 * 3]");
    }
}
