//! Cubic Hermite shape functions on the unit interval

use serde::{Deserialize, Serialize};

/// Values and derivatives of the four cubic Hermite functions at `xi`
///
/// Ordering is `[H1, H2, H3, H4]`: position at the start, tangent at the
/// start, position at the end, tangent at the end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HermiteBasis {
    pub xi: f64,
    pub h: [f64; 4],
    pub dh: [f64; 4],
    pub ddh: [f64; 4],
}

impl HermiteBasis {
    /// Evaluate the basis at `xi`
    pub fn at(xi: f64) -> Self {
        let x2 = xi * xi;
        let x3 = x2 * xi;
        Self {
            xi,
            h: [
                1.0 - 3.0 * x2 + 2.0 * x3,
                xi - 2.0 * x2 + x3,
                3.0 * x2 - 2.0 * x3,
                x3 - x2,
            ],
            dh: [
                -6.0 * xi + 6.0 * x2,
                1.0 - 4.0 * xi + 3.0 * x2,
                6.0 * xi - 6.0 * x2,
                3.0 * x2 - 2.0 * xi,
            ],
            ddh: [
                -6.0 + 12.0 * xi,
                -4.0 + 6.0 * xi,
                6.0 - 12.0 * xi,
                6.0 * xi - 2.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_end_values() {
        let b0 = HermiteBasis::at(0.0);
        assert_eq!(b0.h, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(b0.dh, [0.0, 1.0, 0.0, 0.0]);

        let b1 = HermiteBasis::at(1.0);
        assert_relative_eq!(b1.h[2], 1.0);
        assert_relative_eq!(b1.dh[3], 1.0);
        assert_relative_eq!(b1.h[0], 0.0);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let xi = 0.37;
        let eps = 1e-6;
        let b = HermiteBasis::at(xi);
        let bp = HermiteBasis::at(xi + eps);
        let bm = HermiteBasis::at(xi - eps);
        for i in 0..4 {
            assert_relative_eq!(b.dh[i], (bp.h[i] - bm.h[i]) / (2.0 * eps), epsilon = 1e-8);
            assert_relative_eq!(b.ddh[i], (bp.dh[i] - bm.dh[i]) / (2.0 * eps), epsilon = 1e-8);
        }
    }
}
