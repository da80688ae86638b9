//! Float helpers that route to `std` when available and to `libm` otherwise.

use core::f32::consts::{PI, TAU};

#[cfg(feature = "std")]
pub(crate) fn sqrt(value: f32) -> f32 {
    value.sqrt()
}

#[cfg(not(feature = "std"))]
pub(crate) fn sqrt(value: f32) -> f32 {
    libm::sqrtf(value)
}

#[cfg(feature = "std")]
pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    y.atan2(x)
}

#[cfg(not(feature = "std"))]
pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    libm::atan2f(y, x)
}

#[cfg(feature = "std")]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    angle.sin_cos()
}

#[cfg(not(feature = "std"))]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    (libm::sinf(angle), libm::cosf(angle))
}

#[cfg(feature = "std")]
pub(crate) fn abs(value: f32) -> f32 {
    value.abs()
}

#[cfg(not(feature = "std"))]
pub(crate) fn abs(value: f32) -> f32 {
    libm::fabsf(value)
}

#[cfg(feature = "std")]
fn rem_euclid(value: f32, modulus: f32) -> f32 {
    value.rem_euclid(modulus)
}

#[cfg(not(feature = "std"))]
fn rem_euclid(value: f32, modulus: f32) -> f32 {
    let r = libm::fmodf(value, modulus);
    if r < 0.0 {
        r + modulus
    } else {
        r
    }
}

/// Map an angle in radians onto (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    PI - rem_euclid(PI - angle, TAU)
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        for step in -40..=40 {
            let angle = step as f32 * 0.37;
            let wrapped = wrap_angle(angle);
            assert!(wrapped > -PI - 1e-5 && wrapped <= PI + 1e-5, "{angle} -> {wrapped}");
            let (s1, c1) = sin_cos(angle);
            let (s2, c2) = sin_cos(wrapped);
            assert!((s1 - s2).abs() < 1e-4 && (c1 - c2).abs() < 1e-4);
        }
    }

    #[test]
    fn test_wrap_angle_keeps_pi() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-6);
        assert_eq!(degrees_to_radians(0.0), 0.0);
    }
}
