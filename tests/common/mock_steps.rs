//! Mock step updates for testing the time loop through the public API
//!
//! These replace the whole step, so they exercise snapshot recording and
//! divergence handling without depending on any scheme's numerics.

use std::sync::atomic::{AtomicUsize, Ordering};

use advect_rs::physics::{ScalarField, StepUpdate};

// =================================================================================================
// Frozen
// =================================================================================================

/// Returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Frozen;

impl StepUpdate for Frozen {
    fn advance(&self, field: &ScalarField, _dt: f64) -> ScalarField {
        field.clone()
    }

    fn name(&self) -> &str {
        "frozen"
    }
}

// =================================================================================================
// BlowUp
// =================================================================================================

/// Multiplies every value by a constant factor each step
///
/// With a factor of `1e100` a unit field overflows to infinity on step 4.
#[derive(Debug, Clone, Copy)]
pub struct BlowUp {
    pub factor: f64,
}

impl BlowUp {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl StepUpdate for BlowUp {
    fn advance(&self, field: &ScalarField, _dt: f64) -> ScalarField {
        match field {
            ScalarField::Line(values) => ScalarField::Line(values * self.factor),
            ScalarField::Plane(values) => ScalarField::Plane(values * self.factor),
        }
    }

    fn name(&self) -> &str {
        "blow-up"
    }
}

// =================================================================================================
// NanAfter
// =================================================================================================

/// Leaves the field alone for `healthy` steps, then writes a NaN into cell 0
#[derive(Debug)]
pub struct NanAfter {
    healthy: usize,
    calls: AtomicUsize,
}

impl NanAfter {
    pub fn new(healthy: usize) -> Self {
        Self { healthy, calls: AtomicUsize::new(0) }
    }
}

impl StepUpdate for NanAfter {
    fn advance(&self, field: &ScalarField, _dt: f64) -> ScalarField {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.healthy {
            return field.clone();
        }

        let mut values = field.as_slice().to_vec();
        values[0] = f64::NAN;
        match field {
            ScalarField::Line(_) => ScalarField::from_vec(values),
            ScalarField::Plane(plane) => {
                let (nx, ny) = plane.shape();
                ScalarField::from_matrix(nalgebra::DMatrix::from_vec(nx, ny, values))
            }
        }
    }

    fn name(&self) -> &str {
        "nan-after"
    }
}
