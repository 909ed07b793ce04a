//! Mathematical utilities for contact calculations

pub mod hermite;
pub mod rotation;

use nalgebra::{DMatrix, DVector, Matrix2, Matrix3, SMatrix, SVector, Vector2, Vector3};

pub use hermite::HermiteBasis;
pub use rotation::{exp_map, minimal_rotation, rotate_planar, skew};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;

/// 10x10 matrix for the planar contact element
pub type Mat10 = SMatrix<f64, 10, 10>;
/// 10-element vector for planar contact forces/displacements
pub type Vec10 = SVector<f64, 10>;
/// 18x18 matrix for the spatial contact element
pub type Mat18 = SMatrix<f64, 18, 18>;
/// 18-element vector for spatial contact forces/displacements
pub type Vec18 = SVector<f64, 18>;

/// Invert a 2x2 matrix with the closed-form adjugate formula
///
/// Returns `None` when the determinant is zero relative to the size of the
/// diagonal entries.
pub fn invert_2x2(m: &Mat2) -> Option<Mat2> {
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
    let scale = (m[(0, 0)] * m[(1, 1)]).abs().max(f64::MIN_POSITIVE);
    if det.abs() <= 1e-14 * scale {
        return None;
    }
    Some(Mat2::new(
        m[(1, 1)] / det,
        -m[(0, 1)] / det,
        -m[(1, 0)] / det,
        m[(0, 0)] / det,
    ))
}

/// Solve a dense linear system, `None` if the matrix is singular
pub fn solve_linear_system(k: &Mat, p: &Vec) -> Option<Vec> {
    k.clone().lu().solve(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invert_2x2() {
        let m = Mat2::new(4.0, 1.0, 2.0, 3.0);
        let inv = invert_2x2(&m).unwrap();
        let eye = m * inv;
        assert_relative_eq!(eye, Mat2::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_invert_2x2_singular() {
        let m = Mat2::new(1.0, 2.0, 2.0, 4.0);
        assert!(invert_2x2(&m).is_none());
    }

    #[test]
    fn test_solve_linear_system() {
        let k = Mat::from_row_slice(2, 2, &[0.0, -1.0, -1.0, 0.0]);
        let p = Vec::from_vec(vec![3.0, 2.0]);
        let d = solve_linear_system(&k, &p).unwrap();
        assert_relative_eq!(d[0], -2.0, epsilon = 1e-12);
        assert_relative_eq!(d[1], -3.0, epsilon = 1e-12);
    }
}
