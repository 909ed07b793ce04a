//! Finite rotation helpers
//!
//! The exponential map switches to truncated Taylor series for small angles.
//! Both thresholds matter: below them the closed-form coefficients lose all
//! significant digits to cancellation.

use super::{Mat3, Vec2, Vec3};

/// Angle below which `sin θ / θ` is replaced by its Taylor series
const SINC_THRESHOLD: f64 = 5.0e-3;

/// Angle below which `(1 - cos θ) / θ²` is replaced by its Taylor series
const COSC_THRESHOLD: f64 = 0.1;

/// Skew-symmetric matrix such that `skew(a) * b == a × b`
#[rustfmt::skip]
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

fn sinc(theta: f64) -> f64 {
    if theta > SINC_THRESHOLD {
        theta.sin() / theta
    } else {
        let t2 = theta * theta;
        1.0 - t2 / 6.0 + t2 * t2 / 120.0 - t2 * t2 * t2 / 5040.0
    }
}

fn cosc(theta: f64) -> f64 {
    if theta > COSC_THRESHOLD {
        (1.0 - theta.cos()) / (theta * theta)
    } else {
        let t2 = theta * theta;
        0.5 - t2 / 24.0 + t2 * t2 / 720.0 - t2 * t2 * t2 / 40320.0
    }
}

/// Rotation matrix of a rotation vector (Rodrigues' formula)
///
/// ```text
/// R = cos θ I + (sin θ / θ) skew(θv) + ((1 - cos θ) / θ²) θv ⊗ θv
/// ```
pub fn exp_map(theta_v: &Vec3) -> Mat3 {
    let theta = theta_v.norm();
    Mat3::identity() * theta.cos()
        + skew(theta_v) * sinc(theta)
        + (theta_v * theta_v.transpose()) * cosc(theta)
}

/// Rotate a planar vector counter-clockwise by `angle`
pub fn rotate_planar(v: &Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Smallest rotation taking unit vector `from` onto unit vector `to`
///
/// Antiparallel vectors have no unique minimal rotation; a half turn about
/// `fallback_axis` is used instead.
pub fn minimal_rotation(from: &Vec3, to: &Vec3, fallback_axis: &Vec3) -> Mat3 {
    let v = from.cross(to);
    let c = from.dot(to);
    if 1.0 + c < 1e-12 {
        return exp_map(&(fallback_axis.normalize() * std::f64::consts::PI));
    }
    let k = skew(&v);
    Mat3::identity() + k + (k * k) / (1.0 + c)
}
