//! Edge treatments
//!
//! # 1D
//!
//! | Variant        | Effect on the boundary cell after a sweep      |
//! |----------------|------------------------------------------------|
//! | `Periodic`     | none, periodicity lives in the flux assembly   |
//! | `Fixed(v)`     | overwritten with `v`                           |
//! | `ZeroGradient` | copies the adjacent interior cell              |
//!
//! # 2D
//!
//! Walls act on the velocity field, scalars act on the transported field:
//!
//! | Variant        | Velocity on the edge                | Scalar frame after a sweep         |
//! |----------------|-------------------------------------|------------------------------------|
//! | `Fixed(v)`     | unchanged                           | overwritten with `v`               |
//! | `ZeroGradient` | unchanged                           | copies the updated interior cell   |
//! | `NoSlip`       | both components zero                | keeps the previous value           |
//! | `Lid(s)`       | tangential `s`, normal zero         | keeps the previous value           |
//!
//! Edges are applied left, right, bottom, top; corners take the last edge.
//!
//! Every function here takes a field by value and hands it back patched.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};
use crate::physics::Grid2D;

// =================================================================================================
// 1D
// =================================================================================================

/// Treatment of one end of a 1D domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary1D {
    Periodic,
    Fixed(f64),
    ZeroGradient,
}

/// Both ends of a 1D domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec1D {
    pub left: Boundary1D,
    pub right: Boundary1D,
}

impl BoundarySpec1D {
    pub fn new(left: Boundary1D, right: Boundary1D) -> Self {
        Self { left, right }
    }

    pub fn periodic() -> Self {
        Self::new(Boundary1D::Periodic, Boundary1D::Periodic)
    }

    pub fn fixed(left: f64, right: f64) -> Self {
        Self::new(Boundary1D::Fixed(left), Boundary1D::Fixed(right))
    }

    pub fn zero_gradient() -> Self {
        Self::new(Boundary1D::ZeroGradient, Boundary1D::ZeroGradient)
    }

    /// Both ends periodic
    pub fn is_periodic(&self) -> bool {
        self.left == Boundary1D::Periodic && self.right == Boundary1D::Periodic
    }

    /// Reject a lone periodic end and non-finite fixed values
    pub fn validate(&self) -> Result<()> {
        let left_periodic = self.left == Boundary1D::Periodic;
        let right_periodic = self.right == Boundary1D::Periodic;
        if left_periodic != right_periodic {
            return Err(TransportError::UnpairedPeriodicBoundary);
        }
        for edge in [self.left, self.right] {
            if let Boundary1D::Fixed(value) = edge
                && !value.is_finite()
            {
                return Err(TransportError::InvalidBoundaryValue(value));
            }
        }
        Ok(())
    }
}

impl Default for BoundarySpec1D {
    fn default() -> Self {
        Self::periodic()
    }
}

/// Patch the two boundary cells of a 1D field
///
/// ```rust
/// use advect_rs::solver::{apply_boundary_1d, BoundarySpec1D, Boundary1D};
/// use nalgebra::DVector;
///
/// let spec = BoundarySpec1D::new(Boundary1D::Fixed(1.0), Boundary1D::ZeroGradient);
/// let field = apply_boundary_1d(DVector::from_vec(vec![0.0, 0.5, 0.7, 0.9]), &spec);
///
/// assert_eq!(field.as_slice(), &[1.0, 0.5, 0.7, 0.7]);
/// ```
pub fn apply_boundary_1d(mut field: DVector<f64>, spec: &BoundarySpec1D) -> DVector<f64> {
    let n = field.len();
    if n == 0 {
        return field;
    }

    match spec.left {
        Boundary1D::Fixed(value) => field[0] = value,
        Boundary1D::ZeroGradient if n > 1 => field[0] = field[1],
        _ => {}
    }
    match spec.right {
        Boundary1D::Fixed(value) => field[n - 1] = value,
        Boundary1D::ZeroGradient if n > 1 => field[n - 1] = field[n - 2],
        _ => {}
    }

    field
}

// =================================================================================================
// 2D
// =================================================================================================

/// Treatment of one edge of a 2D domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary2D {
    /// Scalar held at a value
    Fixed(f64),
    /// Scalar copied from the interior
    ZeroGradient,
    /// Stationary wall
    NoSlip,
    /// Wall sliding along itself at the given speed
    Lid(f64),
}

impl Boundary2D {
    fn is_wall(&self) -> bool {
        matches!(self, Boundary2D::NoSlip | Boundary2D::Lid(_))
    }
}

/// The four edges of a 2D domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec2D {
    /// `i = 0`
    pub left: Boundary2D,
    /// `i = nx - 1`
    pub right: Boundary2D,
    /// `j = 0`
    pub bottom: Boundary2D,
    /// `j = ny - 1`
    pub top: Boundary2D,
}

impl BoundarySpec2D {
    pub fn new(left: Boundary2D, right: Boundary2D, bottom: Boundary2D, top: Boundary2D) -> Self {
        Self { left, right, bottom, top }
    }

    /// Same treatment on every edge
    pub fn uniform(edge: Boundary2D) -> Self {
        Self::new(edge, edge, edge, edge)
    }

    /// Closed box whose top wall slides at `speed`
    pub fn lid_driven_cavity(speed: f64) -> Self {
        Self::new(Boundary2D::NoSlip, Boundary2D::NoSlip, Boundary2D::NoSlip, Boundary2D::Lid(speed))
    }

    /// Edges in application order
    pub fn edges(&self) -> [(Edge, Boundary2D); 4] {
        [
            (Edge::Left, self.left),
            (Edge::Right, self.right),
            (Edge::Bottom, self.bottom),
            (Edge::Top, self.top),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (_, edge) in self.edges() {
            match edge {
                Boundary2D::Fixed(value) if !value.is_finite() => {
                    return Err(TransportError::InvalidBoundaryValue(value));
                }
                Boundary2D::Lid(speed) if !speed.is_finite() => {
                    return Err(TransportError::InvalidVelocity(speed));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for BoundarySpec2D {
    fn default() -> Self {
        Self::uniform(Boundary2D::ZeroGradient)
    }
}

/// Edge of a 2D domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

/// Per-cell velocity components over a 2D grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityField2D {
    u: DMatrix<f64>,
    v: DMatrix<f64>,
}

impl VelocityField2D {
    /// Components must share a shape
    pub fn new(u: DMatrix<f64>, v: DMatrix<f64>) -> Result<Self> {
        if u.shape() != v.shape() {
            return Err(TransportError::ShapeMismatch {
                expected: vec![u.nrows(), u.ncols()],
                found: vec![v.nrows(), v.ncols()],
            });
        }
        Ok(Self { u, v })
    }

    /// Same velocity in every cell of `grid`
    pub fn uniform(grid: &Grid2D, u: f64, v: f64) -> Self {
        let (nx, ny) = grid.shape();
        Self {
            u: DMatrix::from_element(nx, ny, u),
            v: DMatrix::from_element(nx, ny, v),
        }
    }

    pub fn u(&self) -> &DMatrix<f64> {
        &self.u
    }

    pub fn v(&self) -> &DMatrix<f64> {
        &self.v
    }

    pub fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }

    /// Largest `|u|` and `|v|` over the field
    pub fn max_components(&self) -> (f64, f64) {
        let max_abs = |m: &DMatrix<f64>| m.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        (max_abs(&self.u), max_abs(&self.v))
    }

    /// First non-finite component, if any
    pub(crate) fn first_non_finite(&self) -> Option<f64> {
        self.u.iter().chain(self.v.iter()).copied().find(|x| !x.is_finite())
    }

    /// Impose wall velocities on the edges
    ///
    /// ```rust
    /// use advect_rs::physics::Grid2D;
    /// use advect_rs::solver::{BoundarySpec2D, VelocityField2D};
    ///
    /// let grid = Grid2D::new(4, 4, 1.0, 1.0).unwrap();
    /// let velocity = VelocityField2D::uniform(&grid, 0.3, 0.3)
    ///     .with_wall_boundaries(&BoundarySpec2D::lid_driven_cavity(1.0));
    ///
    /// assert_eq!(velocity.u()[(1, 3)], 1.0);
    /// assert_eq!(velocity.v()[(1, 3)], 0.0);
    /// assert_eq!(velocity.u()[(0, 1)], 0.0);
    /// assert_eq!(velocity.u()[(1, 1)], 0.3);
    /// ```
    pub fn with_wall_boundaries(mut self, spec: &BoundarySpec2D) -> Self {
        let (nx, ny) = self.shape();
        if nx == 0 || ny == 0 {
            return self;
        }

        for (edge, treatment) in spec.edges() {
            let (tangential, normal) = match treatment {
                Boundary2D::NoSlip => (0.0, 0.0),
                Boundary2D::Lid(speed) => (speed, 0.0),
                Boundary2D::Fixed(_) | Boundary2D::ZeroGradient => continue,
            };

            match edge {
                // Vertical edges: v is tangential
                Edge::Left | Edge::Right => {
                    let i = if edge == Edge::Left { 0 } else { nx - 1 };
                    self.u.row_mut(i).fill(normal);
                    self.v.row_mut(i).fill(tangential);
                }
                // Horizontal edges: u is tangential
                Edge::Bottom | Edge::Top => {
                    let j = if edge == Edge::Bottom { 0 } else { ny - 1 };
                    self.u.column_mut(j).fill(tangential);
                    self.v.column_mut(j).fill(normal);
                }
            }
        }

        self
    }

    /// Average each wall's velocity into the interior line beside it
    ///
    /// Interior cells read only their own velocity, so this is how a moving
    /// wall reaches the scalar transport. Apply after
    /// [`with_wall_boundaries`](Self::with_wall_boundaries); edges are taken
    /// in the order left, right, bottom, top.
    ///
    /// ```rust
    /// use advect_rs::physics::Grid2D;
    /// use advect_rs::solver::{BoundarySpec2D, VelocityField2D};
    ///
    /// let grid = Grid2D::new(5, 5, 1.0, 1.0).unwrap();
    /// let spec = BoundarySpec2D::lid_driven_cavity(2.0);
    /// let velocity = VelocityField2D::uniform(&grid, 0.0, 0.0)
    ///     .with_wall_boundaries(&spec)
    ///     .with_near_wall_blending(&spec);
    ///
    /// assert_eq!(velocity.u()[(2, 3)], 1.0);
    /// assert_eq!(velocity.u()[(2, 2)], 0.0);
    /// ```
    pub fn with_near_wall_blending(mut self, spec: &BoundarySpec2D) -> Self {
        let (nx, ny) = self.shape();
        if nx < 3 || ny < 3 {
            return self;
        }

        for (edge, treatment) in spec.edges() {
            if !treatment.is_wall() {
                continue;
            }

            // (wall cell, interior neighbour) pairs along the edge
            let pairs: Vec<((usize, usize), (usize, usize))> = match edge {
                Edge::Left => (1..ny - 1).map(|j| ((0, j), (1, j))).collect(),
                Edge::Right => (1..ny - 1).map(|j| ((nx - 1, j), (nx - 2, j))).collect(),
                Edge::Bottom => (1..nx - 1).map(|i| ((i, 0), (i, 1))).collect(),
                Edge::Top => (1..nx - 1).map(|i| ((i, ny - 1), (i, ny - 2))).collect(),
            };
            for (wall, inner) in pairs {
                self.u[inner] = 0.5 * (self.u[inner] + self.u[wall]);
                self.v[inner] = 0.5 * (self.v[inner] + self.v[wall]);
            }
        }

        self
    }
}

/// Patch the one-cell frame of a 2D field after an interior sweep
///
/// Edges are applied left, right, bottom, top, so a corner ends up with the
/// value of the last edge written. Wall edges write back the frame of
/// `previous`, the field the sweep started from.
pub fn apply_boundary_2d(
    mut field: DMatrix<f64>,
    previous: &DMatrix<f64>,
    spec: &BoundarySpec2D,
) -> DMatrix<f64> {
    let (nx, ny) = field.shape();
    if nx < 2 || ny < 2 || previous.shape() != (nx, ny) {
        return field;
    }

    for (edge, treatment) in spec.edges() {
        match edge {
            Edge::Left | Edge::Right => {
                let (i, inner) = if edge == Edge::Left { (0, 1) } else { (nx - 1, nx - 2) };
                for j in 0..ny {
                    field[(i, j)] = match treatment {
                        Boundary2D::Fixed(value) => value,
                        Boundary2D::ZeroGradient => field[(inner, j)],
                        Boundary2D::NoSlip | Boundary2D::Lid(_) => previous[(i, j)],
                    };
                }
            }
            Edge::Bottom | Edge::Top => {
                let (j, inner) = if edge == Edge::Bottom { (0, 1) } else { (ny - 1, ny - 2) };
                for i in 0..nx {
                    field[(i, j)] = match treatment {
                        Boundary2D::Fixed(value) => value,
                        Boundary2D::ZeroGradient => field[(i, inner)],
                        Boundary2D::NoSlip | Boundary2D::Lid(_) => previous[(i, j)],
                    };
                }
            }
        }
    }

    field
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_is_a_no_op() {
        let field = DVector::from_vec(vec![0.1, 0.2, 0.3]);
        let patched = apply_boundary_1d(field.clone(), &BoundarySpec1D::periodic());
        assert_eq!(patched, field);
    }

    #[test]
    fn test_fixed_and_zero_gradient_1d() {
        let field = DVector::from_vec(vec![5.0, 1.0, 2.0, 9.0]);

        let fixed = apply_boundary_1d(field.clone(), &BoundarySpec1D::fixed(0.0, 1.0));
        assert_eq!(fixed.as_slice(), &[0.0, 1.0, 2.0, 1.0]);

        let copied = apply_boundary_1d(field, &BoundarySpec1D::zero_gradient());
        assert_eq!(copied.as_slice(), &[1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_single_cell_zero_gradient_untouched() {
        let field = DVector::from_vec(vec![3.0]);
        let patched = apply_boundary_1d(field, &BoundarySpec1D::zero_gradient());
        assert_eq!(patched[0], 3.0);
    }

    #[test]
    fn test_unpaired_periodic_rejected() {
        let spec = BoundarySpec1D::new(Boundary1D::Periodic, Boundary1D::Fixed(0.0));
        assert_eq!(spec.validate(), Err(TransportError::UnpairedPeriodicBoundary));
        assert!(BoundarySpec1D::periodic().validate().is_ok());
        assert!(BoundarySpec1D::fixed(1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_non_finite_fixed_rejected() {
        let spec = BoundarySpec1D::fixed(f64::NAN, 0.0);
        assert!(matches!(spec.validate(), Err(TransportError::InvalidBoundaryValue(_))));
    }

    #[test]
    fn test_no_slip_walls_zero_velocity() {
        let grid = Grid2D::new(5, 4, 1.0, 1.0).unwrap();
        let velocity = VelocityField2D::uniform(&grid, 1.0, -0.5)
            .with_wall_boundaries(&BoundarySpec2D::uniform(Boundary2D::NoSlip));

        for j in 0..4 {
            assert_eq!(velocity.u()[(0, j)], 0.0);
            assert_eq!(velocity.v()[(4, j)], 0.0);
        }
        for i in 0..5 {
            assert_eq!(velocity.u()[(i, 0)], 0.0);
            assert_eq!(velocity.v()[(i, 3)], 0.0);
        }
        assert_eq!(velocity.u()[(2, 2)], 1.0);
        assert_eq!(velocity.v()[(2, 2)], -0.5);
    }

    #[test]
    fn test_lid_on_vertical_edge_drives_v() {
        let grid = Grid2D::new(4, 4, 1.0, 1.0).unwrap();
        let spec = BoundarySpec2D::new(
            Boundary2D::Lid(2.0),
            Boundary2D::ZeroGradient,
            Boundary2D::ZeroGradient,
            Boundary2D::ZeroGradient,
        );
        let velocity = VelocityField2D::uniform(&grid, 1.0, 1.0).with_wall_boundaries(&spec);

        assert_eq!(velocity.u()[(0, 2)], 0.0);
        assert_eq!(velocity.v()[(0, 2)], 2.0);
        assert_eq!(velocity.u()[(3, 2)], 1.0);
    }

    #[test]
    fn test_scalar_frame_per_edge() {
        let field = DMatrix::from_fn(4, 4, |i, j| (i + 10 * j) as f64);
        let spec = BoundarySpec2D::new(
            Boundary2D::Fixed(-1.0),
            Boundary2D::ZeroGradient,
            Boundary2D::NoSlip,
            Boundary2D::Lid(1.0),
        );
        let patched = apply_boundary_2d(field.clone(), &field, &spec);

        // Bottom and top are walls and keep their values, including corners
        assert_eq!(patched.column(0), field.column(0));
        assert_eq!(patched.column(3), field.column(3));
        // Left fixed, right copies the interior neighbour
        assert_eq!(patched[(0, 1)], -1.0);
        assert_eq!(patched[(3, 2)], field[(2, 2)]);
        // Interior untouched
        assert_eq!(patched[(1, 1)], field[(1, 1)]);
    }

    #[test]
    fn test_walls_restore_corners_written_by_earlier_edges() {
        let previous = DMatrix::from_fn(4, 4, |i, j| (i + 10 * j) as f64);
        let swept = previous.map(|x| x + 100.0);
        let spec = BoundarySpec2D::new(
            Boundary2D::Fixed(-1.0),
            Boundary2D::ZeroGradient,
            Boundary2D::NoSlip,
            Boundary2D::Lid(1.0),
        );
        let patched = apply_boundary_2d(swept.clone(), &previous, &spec);

        // Bottom and top come last and hold the pre-sweep frame, corners included
        assert_eq!(patched.column(0), previous.column(0));
        assert_eq!(patched.column(3), previous.column(3));
        assert_eq!(patched[(0, 1)], -1.0);
        assert_eq!(patched[(0, 2)], -1.0);
        assert_eq!(patched[(3, 1)], swept[(2, 1)]);
        assert_eq!(patched[(1, 2)], swept[(1, 2)]);
    }

    #[test]
    fn test_near_wall_blending_only_touches_wall_neighbours() {
        let grid = Grid2D::new(6, 6, 1.0, 1.0).unwrap();
        let spec = BoundarySpec2D::new(
            Boundary2D::ZeroGradient,
            Boundary2D::ZeroGradient,
            Boundary2D::ZeroGradient,
            Boundary2D::Lid(4.0),
        );
        let velocity = VelocityField2D::uniform(&grid, 1.0, 1.0)
            .with_wall_boundaries(&spec)
            .with_near_wall_blending(&spec);

        for i in 1..5 {
            assert_eq!(velocity.u()[(i, 4)], 2.5);
            assert_eq!(velocity.v()[(i, 4)], 0.5);
            assert_eq!(velocity.u()[(i, 3)], 1.0);
            assert_eq!(velocity.u()[(i, 1)], 1.0);
        }
        assert_eq!(velocity.u()[(0, 4)], 1.0);
        assert_eq!(velocity.u()[(2, 5)], 4.0);
    }

    #[test]
    fn test_corners_take_last_edge() {
        let field = DMatrix::zeros(3, 3);
        let spec = BoundarySpec2D::new(
            Boundary2D::Fixed(1.0),
            Boundary2D::Fixed(2.0),
            Boundary2D::Fixed(3.0),
            Boundary2D::Fixed(4.0),
        );
        let patched = apply_boundary_2d(field.clone(), &field, &spec);

        assert_eq!(patched[(0, 0)], 3.0);
        assert_eq!(patched[(2, 2)], 4.0);
        assert_eq!(patched[(0, 1)], 1.0);
        assert_eq!(patched[(2, 1)], 2.0);
    }

    #[test]
    fn test_velocity_components_must_share_shape() {
        let result = VelocityField2D::new(DMatrix::zeros(3, 3), DMatrix::zeros(3, 4));
        assert!(matches!(result, Err(TransportError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_serde_tags() {
        let spec = BoundarySpec1D::new(Boundary1D::Fixed(1.0), Boundary1D::ZeroGradient);
        let json = serde_json::to_string(&spec).unwrap();

        assert_eq!(json, r#"{"left":{"fixed":1.0},"right":"zero-gradient"}"#);
        assert_eq!(serde_json::from_str::<BoundarySpec1D>(&json).unwrap(), spec);
    }
}
