//! Closest-point projection of a node onto a cubic Hermite beam centerline

use log::warn;
use nalgebra::SVector;

use crate::math::HermiteBasis;

/// Centerline of a beam segment interpolated from its end points and tangents
///
/// ```text
/// x_c(ξ) = H1 x_a + H2 L t_a + H3 x_b + H4 L t_b
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteSegment<const D: usize> {
    pub xa: SVector<f64, D>,
    pub xb: SVector<f64, D>,
    /// Unit tangent at the start node
    pub ta: SVector<f64, D>,
    /// Unit tangent at the end node
    pub tb: SVector<f64, D>,
    /// Chord length scaling the end tangents
    pub length: f64,
}

/// Outcome of a closest-point projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection<const D: usize> {
    pub xi: f64,
    /// Unit vector from the curve to the target, `None` when the target lies
    /// on the centerline
    pub normal: Option<SVector<f64, D>>,
    /// Unit tangent of the curve at `xi`
    pub tangent: SVector<f64, D>,
    pub point: SVector<f64, D>,
    /// First derivative of the centerline with respect to `xi`
    pub d1: SVector<f64, D>,
    /// Second derivative of the centerline with respect to `xi`
    pub d2: SVector<f64, D>,
    pub basis: HermiteBasis,
    pub iterations: usize,
    /// Orthogonality residual scaled by the chord length
    pub residual: f64,
    pub converged: bool,
}

impl<const D: usize> HermiteSegment<D> {
    pub fn new(
        xa: SVector<f64, D>,
        xb: SVector<f64, D>,
        ta: SVector<f64, D>,
        tb: SVector<f64, D>,
    ) -> Self {
        let length = (xb - xa).norm();
        Self { xa, xb, ta, tb, length }
    }

    fn combine(&self, w: &[f64; 4]) -> SVector<f64, D> {
        self.xa * w[0] + self.ta * (w[1] * self.length) + self.xb * w[2] + self.tb * (w[3] * self.length)
    }

    pub fn point(&self, basis: &HermiteBasis) -> SVector<f64, D> {
        self.combine(&basis.h)
    }

    pub fn derivative(&self, basis: &HermiteBasis) -> SVector<f64, D> {
        self.combine(&basis.dh)
    }

    pub fn second_derivative(&self, basis: &HermiteBasis) -> SVector<f64, D> {
        self.combine(&basis.ddh)
    }

    /// Starting guess from projecting the target onto the chord
    pub fn chord_parameter(&self, target: &SVector<f64, D>) -> f64 {
        let chord = self.xb - self.xa;
        (target - self.xa).dot(&chord) / (self.length * self.length)
    }

    /// Newton iteration for the parameter where `target - x_c` is orthogonal
    /// to the curve tangent
    ///
    /// Stops once `|R / L| <= tol` or after `max_iter` steps. Hitting the cap
    /// is not an error: the last iterate is returned with `converged = false`.
    pub fn project(
        &self,
        xi_guess: f64,
        target: &SVector<f64, D>,
        tol: f64,
        max_iter: usize,
    ) -> Projection<D> {
        let mut xi = xi_guess;
        let mut basis = HermiteBasis::at(xi);
        let mut d = target - self.point(&basis);
        let mut d1 = self.derivative(&basis);
        let mut residual = d.dot(&d1);
        let mut iterations = 0;
        let mut converged = (residual / self.length).abs() <= tol;

        while !converged && iterations < max_iter {
            let d2 = self.second_derivative(&basis);
            let slope = d.dot(&d2) - d1.dot(&d1);
            if slope.abs() < f64::EPSILON * self.length * self.length {
                break;
            }
            xi -= residual / slope;
            iterations += 1;

            basis = HermiteBasis::at(xi);
            d = target - self.point(&basis);
            d1 = self.derivative(&basis);
            residual = d.dot(&d1);
            converged = (residual / self.length).abs() <= tol;
        }

        if !converged {
            warn!(
                "closest point projection stopped at xi = {xi:.6} after {iterations} iterations (|R/L| = {:.3e})",
                (residual / self.length).abs()
            );
        }

        let point = self.point(&basis);
        let offset = target - point;
        let distance = offset.norm();
        let normal = if distance > 1e-14 * self.length {
            Some(offset / distance)
        } else {
            None
        };

        Projection {
            xi,
            normal,
            tangent: d1.normalize(),
            point,
            d1,
            d2: self.second_derivative(&basis),
            basis,
            iterations,
            residual: residual / self.length,
            converged,
        }
    }
}
