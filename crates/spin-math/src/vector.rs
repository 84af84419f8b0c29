//! Axis and triad utilities.
//!
//! Axis vectors arrive from configuration already normalized; these
//! utilities validate and never renormalize. A non-unit or non-orthogonal
//! axis is a configuration error surfaced to the caller.

use spin_types::error::{SpinError, SpinResult};

/// Tolerance for unit-norm and orthogonality checks.
pub const AXIS_TOL: f64 = 1e-8;

pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

pub fn is_unit(a: [f64; 3]) -> bool {
    (norm(a) - 1.0).abs() < AXIS_TOL
}

pub fn is_orthogonal(a: [f64; 3], b: [f64; 3]) -> bool {
    dot(a, b).abs() < AXIS_TOL
}

/// Default uniaxial/rotational triad: ku = z, kr = x, kl = y.
pub fn default_triad() -> [[f64; 3]; 3] {
    [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
}

/// Default cubic axes along the coordinate axes.
pub fn default_cubic_axes() -> [[f64; 3]; 3] {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

/// Default biaxial pair, rotated 45 degrees in the x-y plane.
pub fn default_biaxial_pair() -> [[f64; 3]; 2] {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    [[s, s, 0.0], [s, -s, 0.0]]
}

/// Validate that a named axis is unit norm.
pub fn validate_unit(name: &str, a: [f64; 3]) -> SpinResult<()> {
    if !a.iter().all(|v| v.is_finite()) {
        return Err(SpinError::Config(format!("axis {name} is not finite")));
    }
    if !is_unit(a) {
        return Err(SpinError::Config(format!(
            "axis {name} is not unit norm (|{name}| = {})",
            norm(a)
        )));
    }
    Ok(())
}

/// Validate that three named axes form an orthonormal triad.
pub fn validate_triad(name: &str, a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> SpinResult<()> {
    validate_unit(name, a)?;
    validate_unit(name, b)?;
    validate_unit(name, c)?;
    if !is_orthogonal(a, b) || !is_orthogonal(b, c) || !is_orthogonal(a, c) {
        return Err(SpinError::Config(format!(
            "axes of {name} are not mutually orthogonal"
        )));
    }
    Ok(())
}

/// Direction cosine clamped into [-1, 1].
///
/// Dot products of near-unit vectors can land marginally outside the valid
/// domain from floating-point rounding; the clamp keeps NaN out of the
/// power formulas downstream.
#[inline]
pub fn direction_cosine(s: [f64; 3], axis: [f64; 3]) -> f64 {
    dot(s, axis).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_triad_orthonormal() {
        let [ku, kr, kl] = default_triad();
        validate_triad("default", ku, kr, kl).unwrap();
        // Right-handed: kr x kl = ku
        let c = cross(kr, kl);
        for i in 0..3 {
            assert!((c[i] - ku[i]).abs() < 1e-15);
        }
    }

    #[test]
    fn test_default_cubic_axes_orthonormal() {
        let [a, b, c] = default_cubic_axes();
        validate_triad("cubic", a, b, c).unwrap();
    }

    #[test]
    fn test_default_biaxial_pair() {
        let [u1, u2] = default_biaxial_pair();
        assert!(is_unit(u1));
        assert!(is_unit(u2));
        assert!(is_orthogonal(u1, u2));
    }

    #[test]
    fn test_non_unit_axis_rejected() {
        let result = validate_unit("ku", [0.0, 0.0, 2.0]);
        assert!(matches!(result, Err(SpinError::Config(_))));
    }

    #[test]
    fn test_non_orthogonal_triad_rejected() {
        let result = validate_triad(
            "t",
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
        );
        assert!(matches!(result, Err(SpinError::Config(_))));
    }

    #[test]
    fn test_direction_cosine_clamped() {
        // A marginally over-unit spin must not escape [-1, 1].
        let s = [0.0, 0.0, 1.0 + 1e-12];
        let c = direction_cosine(s, [0.0, 0.0, 1.0]);
        assert!(c <= 1.0);
        assert!(c >= -1.0);
    }
}
