//! Uniform cell-centred meshes
//!
//! # Layout
//!
//! A 1D domain `[0, L]` is split into `N` cells of width `dx = L / N`:
//!
//! ```text
//!  face 0    face 1    face 2          face N
//!    |---------|---------|--- ... ---|
//!    0   x_0   dx  x_1  2dx         L
//! ```
//!
//! Faces run from `0` to `L` inclusive (`N + 1` of them), cell centres sit half
//! a cell width inside each face pair. A 2D grid is a pair of independent 1D
//! axes combined row-major, the first axis varying fastest.
//!
//! Grids are immutable once built and carry their own invariants, so
//! (de)serialisation goes through the defining parameters and re-validates.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};

// =================================================================================================
// 1D Grid
// =================================================================================================

/// Defining parameters of a [`Grid1D`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid1DSpec {
    /// Number of cells
    pub cells: usize,
    /// Domain length
    pub length: f64,
}

/// Uniform 1D cell-centred grid
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::Grid1D;
///
/// let grid = Grid1D::new(4, 1.0).unwrap();
/// assert_eq!(grid.cell_width(), 0.25);
/// assert_eq!(grid.faces(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(grid.centers()[0], 0.125);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Grid1DSpec", into = "Grid1DSpec")]
pub struct Grid1D {
    cells: usize,
    length: f64,
    cell_width: f64,
    faces: Vec<f64>,
    centers: Vec<f64>,
}

impl Grid1D {
    /// Build a grid of `cells` cells over `[0, length]`
    ///
    /// # Errors
    ///
    /// Rejects `cells == 0` and non-positive or non-finite lengths.
    pub fn new(cells: usize, length: f64) -> Result<Self> {
        Self::along("x", cells, length)
    }

    fn along(axis: &'static str, cells: usize, length: f64) -> Result<Self> {
        if cells == 0 {
            return Err(TransportError::InvalidCellCount { axis, cells, minimum: 1 });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(TransportError::InvalidDomainLength { axis, length });
        }

        let cell_width = length / cells as f64;

        // Computed from the index, not by accumulation, so the last face is exactly L
        let faces = (0..=cells)
            .map(|i| if i == cells { length } else { i as f64 * cell_width })
            .collect();
        let centers = (0..cells)
            .map(|i| (i as f64 + 0.5) * cell_width)
            .collect();

        Ok(Self { cells, length, cell_width, faces, centers })
    }

    /// Number of cells
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Domain length
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Cell width `dx = L / N`
    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Face coordinates, `N + 1` values from `0` to `L`
    pub fn faces(&self) -> &[f64] {
        &self.faces
    }

    /// Cell-centre coordinates, `N` values
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }
}

impl TryFrom<Grid1DSpec> for Grid1D {
    type Error = TransportError;

    fn try_from(spec: Grid1DSpec) -> Result<Self> {
        Self::new(spec.cells, spec.length)
    }
}

impl From<Grid1D> for Grid1DSpec {
    fn from(grid: Grid1D) -> Self {
        Self { cells: grid.cells, length: grid.length }
    }
}

// =================================================================================================
// 2D Grid
// =================================================================================================

/// Defining parameters of a [`Grid2D`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid2DSpec {
    pub nx: usize,
    pub ny: usize,
    pub lx: f64,
    pub ly: f64,
}

/// Uniform 2D cell-centred grid, two independent 1D axes
///
/// Cell `(i, j)` is stored at flat index `i + j * nx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Grid2DSpec", into = "Grid2DSpec")]
pub struct Grid2D {
    x: Grid1D,
    y: Grid1D,
}

impl Grid2D {
    /// Build an `nx × ny` grid over `[0, lx] × [0, ly]`
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self> {
        Ok(Self {
            x: Grid1D::along("x", nx, lx)?,
            y: Grid1D::along("y", ny, ly)?,
        })
    }

    /// First axis
    pub fn x(&self) -> &Grid1D {
        &self.x
    }

    /// Second axis
    pub fn y(&self) -> &Grid1D {
        &self.y
    }

    /// Cells along each axis, `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.x.cells(), self.y.cells())
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.x.cells() * self.y.cells()
    }

    /// Cell widths `(dx, dy)`
    pub fn cell_widths(&self) -> (f64, f64) {
        (self.x.cell_width(), self.y.cell_width())
    }

    /// Area of one cell, `dx * dy`
    pub fn cell_area(&self) -> f64 {
        self.x.cell_width() * self.y.cell_width()
    }

    /// Flat row-major index of cell `(i, j)`
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.x.cells()
    }

    /// Centre of cell `(i, j)`
    pub fn center(&self, i: usize, j: usize) -> (f64, f64) {
        (self.x.centers()[i], self.y.centers()[j])
    }
}

impl TryFrom<Grid2DSpec> for Grid2D {
    type Error = TransportError;

    fn try_from(spec: Grid2DSpec) -> Result<Self> {
        Self::new(spec.nx, spec.ny, spec.lx, spec.ly)
    }
}

impl From<Grid2D> for Grid2DSpec {
    fn from(grid: Grid2D) -> Self {
        Self {
            nx: grid.x.cells(),
            ny: grid.y.cells(),
            lx: grid.x.length(),
            ly: grid.y.length(),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
