// ABOUTME: Geometric primitives for trajectory analysis
// ABOUTME: Euclidean distance, polyline length, segment bearing, and angle normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

//! Pure geometric functions over 3D points.
//!
//! Bearings are horizontal-plane headings: altitude is deliberately ignored so
//! turn analysis models horizontal maneuvering, while distances remain full 3D.

use std::f64::consts::PI;

use kestrel_core::models::Point3;

/// Euclidean distance between two points (meters)
#[must_use]
pub fn distance3d(a: Point3, b: Point3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
}

/// Total length of the polyline through `points`; 0 for one point or fewer
#[must_use]
pub fn path_length(points: &[Point3]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance3d(pair[0], pair[1]))
        .sum()
}

/// Horizontal-plane heading of the segment a -> b (radians).
///
/// Altitude is ignored: turn geometry is a 2D analysis.
#[must_use]
pub fn bearing(a: Point3, b: Point3) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Normalize an angle into `(-pi, pi]` by repeated +/- 2pi adjustment.
///
/// Non-finite input maps to 0 so degenerate geometry can never push NaN into a
/// report.
#[must_use]
pub fn wrap_angle(theta: f64) -> f64 {
    if !theta.is_finite() {
        return 0.0;
    }
    let mut wrapped = theta;
    while wrapped > PI {
        wrapped -= 2.0 * PI;
    }
    while wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_handles_multiples_of_two_pi() {
        for k in -3_i32..=3 {
            let theta = 2.0 * PI * f64::from(k);
            let wrapped = wrap_angle(theta);
            assert!(wrapped > -PI && wrapped <= PI);
            assert!(wrapped.abs() < 1e-9);
        }
    }

    #[test]
    fn wrap_angle_keeps_pi_inclusive() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn path_length_of_single_point_is_zero() {
        assert_eq!(path_length(&[Point3::new(1.0, 1.0, 1.0)]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn distance_is_three_dimensional() {
        let d = distance3d(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 2.0));
        assert!((d - 3.0).abs() < 1e-12);
    }
}
