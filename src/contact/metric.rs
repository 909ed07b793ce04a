//! Surface basis and metric of a spatial beam at the projection point
//!
//! The contact surface is the tube of radius `r` around the centerline,
//! parametrized by the curve parameter `ξ` and the angle `ψ` around the
//! axis. Its tangent plane at the contact point is spanned by
//!
//! ```text
//! g1 = x_c' + ρ2 c2' + ρ3 c3'
//! g2 = -ρ3 c2 + ρ2 c3
//! ```
//!
//! with `ρ2 = r (n · c2)` and `ρ3 = r (n · c3)`.

use serde::{Deserialize, Serialize};

use super::projection::Projection;
use crate::error::{FEAError, FEAResult};
use crate::math::{exp_map, invert_2x2, minimal_rotation, Mat2, Mat3, Vec3};

/// Local frame interpolated between the two end frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedFrame {
    /// Columns `c1` (unit tangent), `c2`, `c3`
    pub qc: Mat3,
    /// Twist angle at the projection point relative to the start frame
    pub chi: f64,
    /// Twist rate `dχ/dξ`
    pub chi_rate: f64,
}

/// Tangent-plane basis and metric tensors at the contact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetric {
    pub g1: Vec3,
    pub g2: Vec3,
    /// Covariant metric `g_ij = g_i · g_j`
    pub covariant: Mat2,
    /// Contravariant metric, the inverse of the covariant one
    pub contravariant: Mat2,
    pub rho2: f64,
    pub rho3: f64,
    pub frame: InterpolatedFrame,
}

impl SurfaceMetric {
    /// Contravariant basis vectors `g^1`, `g^2`
    pub fn dual_basis(&self) -> [Vec3; 2] {
        let m = &self.contravariant;
        [
            self.g1 * m[(0, 0)] + self.g2 * m[(0, 1)],
            self.g1 * m[(1, 0)] + self.g2 * m[(1, 1)],
        ]
    }
}

/// Interpolate the cross-section frame at `xi`
///
/// Each end frame is carried onto the unit tangent by the smallest rotation,
/// after which the two frames differ only by a twist about the tangent. That
/// twist is distributed linearly along the segment.
pub fn interpolate_frame(xi: f64, qa: &Mat3, qb: &Mat3, tangent: &Vec3) -> InterpolatedFrame {
    let a1: Vec3 = qa.column(0).into_owned();
    let b1: Vec3 = qb.column(0).into_owned();
    let pa = minimal_rotation(&a1, tangent, &qa.column(1).into_owned()) * qa;
    let pb = minimal_rotation(&b1, tangent, &qb.column(1).into_owned()) * qb;

    let pa2: Vec3 = pa.column(1).into_owned();
    let pb2: Vec3 = pb.column(1).into_owned();
    let chi_ab = pa2.cross(&pb2).dot(tangent).atan2(pa2.dot(&pb2));
    let chi = xi * chi_ab;

    InterpolatedFrame {
        qc: exp_map(&(tangent * chi)) * pa,
        chi,
        chi_rate: chi_ab,
    }
}

/// Build the surface basis and metric at a projection point
///
/// `radius` offsets the contact surface from the centerline. For a beam with
/// zero radius the angular coordinate is measured at unit radius so that the
/// metric stays invertible.
pub fn build_metric(
    projection: &Projection<3>,
    normal: &Vec3,
    qa: &Mat3,
    qb: &Mat3,
    radius: f64,
) -> FEAResult<SurfaceMetric> {
    let t = projection.tangent;
    let frame = interpolate_frame(projection.xi, qa, qb, &t);
    let c2: Vec3 = frame.qc.column(1).into_owned();
    let c3: Vec3 = frame.qc.column(2).into_owned();

    // Derivatives of the unit tangent and of the transported section axes
    let speed = projection.d1.norm();
    let dt = (projection.d2 - t * projection.d2.dot(&t)) / speed;
    let dc2 = -t * dt.dot(&c2) + c3 * frame.chi_rate;
    let dc3 = -t * dt.dot(&c3) - c2 * frame.chi_rate;

    let rho2 = radius * normal.dot(&c2);
    let rho3 = radius * normal.dot(&c3);
    let arc = if radius > 0.0 { radius } else { 1.0 };

    let g1 = projection.d1 + dc2 * rho2 + dc3 * rho3;
    let g2 = (c3 * normal.dot(&c2) - c2 * normal.dot(&c3)) * arc;

    let covariant = Mat2::new(g1.dot(&g1), g1.dot(&g2), g2.dot(&g1), g2.dot(&g2));
    let contravariant = invert_2x2(&covariant).ok_or_else(|| FEAError::DegenerateMetric(covariant.determinant()))?;

    Ok(SurfaceMetric {
        g1,
        g2,
        covariant,
        contravariant,
        rho2,
        rho3,
        frame,
    })
}
