//! Analytic initial conditions
//!
//! Closed sets of generators that fill a [`ScalarField`] from cell-centre
//! coordinates. Every generator is a total function of position; positional
//! parameters are fractions of the domain length.
//!
//! # 1D generators
//!
//! | Tag        | Profile                                                   |
//! |------------|-----------------------------------------------------------|
//! | `step`     | 1 left of `pos·L`, 0 at and right of it                   |
//! | `gaussian` | `exp(-0.5·((x - center·L) / (sigma·L))²)`                 |
//! | `sine`     | `sin(2πx/L)`                                              |
//! | `triangle` | peak 1 at `L/2`, linear ramp to 0 over a half-width `0.2L` |
//!
//! # 2D generators
//!
//! | Tag             | Profile                                                  |
//! |-----------------|----------------------------------------------------------|
//! | `gaussian-blob` | `exp(-0.5·(((x - cx·Lx)/(σ·Lx))² + ((y - cy·Ly)/(σ·Ly))²))` |
//! | `step-x`        | 1 left of `pos·Lx`, 0 at and right of it                 |
//! | `diagonal`      | 1 where `y/Ly > x/Lx`, else 0                            |
//!
//! # Example
//!
//! ```rust
//! use advect_rs::physics::{Grid1D, InitialCondition1D};
//!
//! let grid = Grid1D::new(10, 1.0).unwrap();
//! let field = InitialCondition1D::step(0.3).sample(&grid);
//!
//! assert_eq!(field.as_slice()[0], 1.0);
//! assert_eq!(field.as_slice()[9], 0.0);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::error::TransportError;
use crate::physics::{Grid1D, Grid2D, ScalarField};

/// Half-width of the triangle profile, as a fraction of the domain length
const TRIANGLE_HALF_WIDTH: f64 = 0.2;

// =================================================================================================
// 1D
// =================================================================================================

/// Initial profile over a 1D domain
#[derive(Clone)]
pub enum InitialCondition1D {
    /// Unit step ending at `pos·L`
    Step { pos: f64 },

    /// Gaussian bump centred at `center·L` with width `sigma·L`
    Gaussian { center: f64, sigma: f64 },

    /// One period of `sin(2πx/L)`
    Sine,

    /// Unit triangle centred at mid-domain
    Triangle,

    /// User profile `f(x, L)`
    Custom(Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>),
}

impl InitialCondition1D {
    /// Unit step at `pos·L`
    pub fn step(pos: f64) -> Self {
        Self::Step { pos }
    }

    /// Gaussian at `center·L` with width `sigma·L`
    pub fn gaussian(center: f64, sigma: f64) -> Self {
        Self::Gaussian { center, sigma }
    }

    /// User-defined profile of `(x, L)`
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Tag name, `"custom"` for user profiles
    pub fn name(&self) -> &'static str {
        match self {
            Self::Step { .. } => "step",
            Self::Gaussian { .. } => "gaussian",
            Self::Sine => "sine",
            Self::Triangle => "triangle",
            Self::Custom(_) => "custom",
        }
    }

    /// Profile value at position `x` in a domain of length `length`
    pub fn evaluate(&self, x: f64, length: f64) -> f64 {
        match self {
            Self::Step { pos } => {
                if x < pos * length { 1.0 } else { 0.0 }
            }
            Self::Gaussian { center, sigma } => {
                let z = (x - center * length) / (sigma * length);
                (-0.5 * z * z).exp()
            }
            Self::Sine => (2.0 * PI * x / length).sin(),
            Self::Triangle => {
                let half_width = TRIANGLE_HALF_WIDTH * length;
                (1.0 - (x - 0.5 * length).abs() / half_width).max(0.0)
            }
            Self::Custom(f) => f(x, length),
        }
    }

    /// Fill a field on the grid's cell centres
    pub fn sample(&self, grid: &Grid1D) -> ScalarField {
        init_field_1d(grid.centers(), grid.length(), self)
    }
}

/// Evaluate `ic` at each cell centre
pub fn init_field_1d(centers: &[f64], length: f64, ic: &InitialCondition1D) -> ScalarField {
    let values = centers.iter().map(|&x| ic.evaluate(x, length));
    ScalarField::Line(DVector::from_iterator(centers.len(), values))
}

impl Default for InitialCondition1D {
    fn default() -> Self {
        Self::step(0.3)
    }
}

// ==================== Manual Debug Implementation ====================
//
// `Custom` holds a closure, which has no Debug.

impl fmt::Debug for InitialCondition1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step { pos } => f.debug_struct("Step").field("pos", pos).finish(),
            Self::Gaussian { center, sigma } => f
                .debug_struct("Gaussian")
                .field("center", center)
                .field("sigma", sigma)
                .finish(),
            Self::Sine => f.write_str("Sine"),
            Self::Triangle => f.write_str("Triangle"),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

/// Parses a tag with default parameters
impl FromStr for InitialCondition1D {
    type Err = TransportError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "step" => Ok(Self::step(0.3)),
            "gaussian" => Ok(Self::gaussian(0.5, 0.05)),
            "sine" => Ok(Self::Sine),
            "triangle" => Ok(Self::Triangle),
            _ => Err(TransportError::UnknownInitialCondition(tag.to_string())),
        }
    }
}

// =================================================================================================
// 2D
// =================================================================================================

/// Initial field over a 2D domain
#[derive(Clone)]
pub enum InitialCondition2D {
    /// Gaussian blob centred at `(cx·Lx, cy·Ly)`, width `sigma` per axis
    GaussianBlob { cx: f64, cy: f64, sigma: f64 },

    /// Unit step in x ending at `pos·Lx`, uniform in y
    StepX { pos: f64 },

    /// 1 above the domain diagonal, 0 below
    Diagonal,

    /// User field `f(x, y, Lx, Ly)`
    Custom(Arc<dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync>),
}

impl InitialCondition2D {
    pub fn gaussian_blob(cx: f64, cy: f64, sigma: f64) -> Self {
        Self::GaussianBlob { cx, cy, sigma }
    }

    pub fn step_x(pos: f64) -> Self {
        Self::StepX { pos }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GaussianBlob { .. } => "gaussian-blob",
            Self::StepX { .. } => "step-x",
            Self::Diagonal => "diagonal",
            Self::Custom(_) => "custom",
        }
    }

    /// Field value at `(x, y)` in a `lx × ly` domain
    pub fn evaluate(&self, x: f64, y: f64, lx: f64, ly: f64) -> f64 {
        match self {
            Self::GaussianBlob { cx, cy, sigma } => {
                let zx = (x - cx * lx) / (sigma * lx);
                let zy = (y - cy * ly) / (sigma * ly);
                (-0.5 * (zx * zx + zy * zy)).exp()
            }
            Self::StepX { pos } => {
                if x < pos * lx { 1.0 } else { 0.0 }
            }
            Self::Diagonal => {
                if y / ly > x / lx { 1.0 } else { 0.0 }
            }
            Self::Custom(f) => f(x, y, lx, ly),
        }
    }

    /// Fill a field on the grid's cell centres
    pub fn sample(&self, grid: &Grid2D) -> ScalarField {
        init_field_2d(grid, self)
    }
}

/// Evaluate `ic` at each cell centre of `grid`
pub fn init_field_2d(grid: &Grid2D, ic: &InitialCondition2D) -> ScalarField {
    let (nx, ny) = grid.shape();
    let (lx, ly) = (grid.x().length(), grid.y().length());
    let (xs, ys) = (grid.x().centers(), grid.y().centers());

    ScalarField::Plane(DMatrix::from_fn(nx, ny, |i, j| ic.evaluate(xs[i], ys[j], lx, ly)))
}

impl Default for InitialCondition2D {
    fn default() -> Self {
        Self::gaussian_blob(0.5, 0.5, 0.1)
    }
}

impl fmt::Debug for InitialCondition2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GaussianBlob { cx, cy, sigma } => f
                .debug_struct("GaussianBlob")
                .field("cx", cx)
                .field("cy", cy)
                .field("sigma", sigma)
                .finish(),
            Self::StepX { pos } => f.debug_struct("StepX").field("pos", pos).finish(),
            Self::Diagonal => f.write_str("Diagonal"),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

impl FromStr for InitialCondition2D {
    type Err = TransportError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "gaussian-blob" | "blob" => Ok(Self::default()),
            "step-x" => Ok(Self::step_x(0.3)),
            "diagonal" => Ok(Self::Diagonal),
            _ => Err(TransportError::UnknownInitialCondition(tag.to_string())),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_boundary_belongs_to_right_side() {
        let ic = InitialCondition1D::step(0.5);
        assert_eq!(ic.evaluate(0.4999, 1.0), 1.0);
        assert_eq!(ic.evaluate(0.5, 1.0), 0.0);
        assert_eq!(ic.evaluate(0.9, 1.0), 0.0);
    }

    #[test]
    fn test_step_scales_with_length() {
        let ic = InitialCondition1D::step(0.3);
        assert_eq!(ic.evaluate(0.5, 2.0), 1.0);
        assert_eq!(ic.evaluate(0.7, 2.0), 0.0);
    }

    #[test]
    fn test_gaussian_peak_and_width() {
        let ic = InitialCondition1D::gaussian(0.5, 0.05);
        assert!((ic.evaluate(0.5, 1.0) - 1.0).abs() < 1e-15);

        // One sigma away
        let expected = (-0.5f64).exp();
        assert!((ic.evaluate(0.55, 1.0) - expected).abs() < 1e-12);
        assert!((ic.evaluate(0.45, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sine_period() {
        let ic = InitialCondition1D::Sine;
        assert!(ic.evaluate(0.0, 2.0).abs() < 1e-15);
        assert!((ic.evaluate(0.5, 2.0) - 1.0).abs() < 1e-12);
        assert!((ic.evaluate(1.5, 2.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_shape() {
        let ic = InitialCondition1D::Triangle;
        assert!((ic.evaluate(0.5, 1.0) - 1.0).abs() < 1e-15);
        assert!((ic.evaluate(0.6, 1.0) - 0.5).abs() < 1e-12);
        assert!((ic.evaluate(0.4, 1.0) - 0.5).abs() < 1e-12);
        assert_eq!(ic.evaluate(0.75, 1.0), 0.0);
        assert_eq!(ic.evaluate(0.1, 1.0), 0.0);
    }

    #[test]
    fn test_sample_on_grid_centres() {
        let grid = Grid1D::new(4, 1.0).unwrap();
        let field = InitialCondition1D::step(0.5).sample(&grid);

        assert_eq!(field.as_slice(), &[1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_custom_profile() {
        let grid = Grid1D::new(3, 3.0).unwrap();
        let ic = InitialCondition1D::custom(|x, l| x / l);
        let field = ic.sample(&grid);

        assert!((field.as_slice()[1] - 0.5).abs() < 1e-15);
        assert_eq!(ic.name(), "custom");
        assert!(format!("{:?}", ic.clone()).contains("user-defined"));
    }

    #[test]
    fn test_parse_1d_tags() {
        assert!(matches!("step".parse::<InitialCondition1D>(), Ok(InitialCondition1D::Step { pos }) if pos == 0.3));
        assert!(matches!("Sine".parse::<InitialCondition1D>(), Ok(InitialCondition1D::Sine)));
        assert_eq!(
            "square".parse::<InitialCondition1D>().unwrap_err(),
            TransportError::UnknownInitialCondition("square".to_string())
        );
    }

    #[test]
    fn test_blob_peak_at_centre() {
        let ic = InitialCondition2D::default();
        assert!((ic.evaluate(0.5, 1.0, 1.0, 2.0) - 1.0).abs() < 1e-15);
        assert!(ic.evaluate(0.0, 0.0, 1.0, 2.0) < 1e-5);
    }

    #[test]
    fn test_diagonal_field_layout() {
        let grid = Grid2D::new(3, 3, 1.0, 1.0).unwrap();
        let field = InitialCondition2D::Diagonal.sample(&grid);
        let plane = field.try_as_plane().unwrap();

        // Strictly above the diagonal only
        assert_eq!(plane[(0, 2)], 1.0);
        assert_eq!(plane[(1, 1)], 0.0);
        assert_eq!(plane[(2, 0)], 0.0);
    }

    #[test]
    fn test_step_x_uniform_in_y() {
        let grid = Grid2D::new(10, 4, 1.0, 1.0).unwrap();
        let field = InitialCondition2D::step_x(0.3).sample(&grid);
        let plane = field.try_as_plane().unwrap();

        for j in 0..4 {
            assert_eq!(plane[(2, j)], 1.0);
            assert_eq!(plane[(3, j)], 0.0);
        }
    }

    #[test]
    fn test_parse_2d_tags() {
        assert!(matches!("diagonal".parse::<InitialCondition2D>(), Ok(InitialCondition2D::Diagonal)));
        assert!(matches!("step-x".parse::<InitialCondition2D>(), Ok(InitialCondition2D::StepX { .. })));
        assert!("step".parse::<InitialCondition2D>().is_err());
    }
}
