//! Explicit stability limits and dimensionless numbers
//!
//! These are queries: nothing here enforces a limit. A Courant time step
//! ([`TimeStep::Courant`](crate::solver::TimeStep)) resolves through
//! [`max_stable_step`] before a run starts.
//!
//! # Limits
//!
//! ```text
//! dt_conv = C · dx / max(|u|, ε)
//! dt_diff = 0.4 · dx² / (2Γ)           (only when Γ > 0)
//! dt      = min(dt_conv, dt_diff)
//! ```
//!
//! The factor 0.4 keeps the diffusion number `Γ·dt/dx²` at 0.2, well inside
//! the explicit limit of 0.5.

/// Floor on `|u|` so a still fluid does not divide by zero
pub const VELOCITY_EPSILON: f64 = 1e-12;

/// Safety factor on the explicit diffusion limit
pub const DIFFUSION_SAFETY: f64 = 0.4;

/// Largest stable explicit step in 1D
///
/// # Example
///
/// ```rust
/// use advect_rs::solver::max_stable_step;
///
/// // Convection only
/// assert!((max_stable_step(0.01, 1.0, 0.5, 0.0) - 0.005).abs() < 1e-15);
///
/// // Diffusion dominates: 0.4 * 1e-4 / 2 = 2e-5
/// assert!((max_stable_step(0.01, 1.0, 0.5, 1.0) - 2e-5).abs() < 1e-15);
/// ```
pub fn max_stable_step(dx: f64, velocity: f64, courant: f64, diffusion: f64) -> f64 {
    let convective = courant * dx / velocity.abs().max(VELOCITY_EPSILON);

    if diffusion > 0.0 {
        let diffusive = DIFFUSION_SAFETY * dx * dx / (2.0 * diffusion);
        convective.min(diffusive)
    } else {
        convective
    }
}

/// Largest stable explicit step in 2D
///
/// Convective limit `C / (|u|/dx + |v|/dy)`, diffusive limit
/// `0.4 / (2Γ(1/dx² + 1/dy²))`.
pub fn max_stable_step_2d(dx: f64, dy: f64, u: f64, v: f64, courant: f64, diffusion: f64) -> f64 {
    let rate = (u.abs() / dx + v.abs() / dy).max(VELOCITY_EPSILON);
    let convective = courant / rate;

    if diffusion > 0.0 {
        let diffusive = DIFFUSION_SAFETY / (2.0 * diffusion * (1.0 / (dx * dx) + 1.0 / (dy * dy)));
        convective.min(diffusive)
    } else {
        convective
    }
}

/// Courant number `|u|·dt/dx`
#[inline]
pub fn courant_number(velocity: f64, dt: f64, dx: f64) -> f64 {
    velocity.abs() * dt / dx
}

/// Cell Péclet number `|u|·dx/Γ`, infinite for pure convection
#[inline]
pub fn peclet_number(velocity: f64, dx: f64, diffusion: f64) -> f64 {
    if diffusion == 0.0 {
        f64::INFINITY
    } else {
        velocity.abs() * dx / diffusion
    }
}
