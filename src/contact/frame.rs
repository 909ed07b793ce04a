//! Material frames carried by the beam end nodes

use serde::{Deserialize, Serialize};

use crate::channel::FieldStream;
use crate::error::FEAResult;
use crate::math::{exp_map, rotate_planar, Mat3, Vec2, Vec3};

/// Orthonormal frame of a spatial beam end node
///
/// Columns are the beam axis followed by the two cross-section axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamEndFrame {
    initial: Mat3,
    committed: Mat3,
    trial: Mat3,
}

impl BeamEndFrame {
    pub fn new(initial: Mat3) -> Self {
        Self {
            initial,
            committed: initial,
            trial: initial,
        }
    }

    /// Advance the frame by an incremental rotation vector
    ///
    /// The increment is measured from the last committed rotation, so
    /// repeated calls within one step do not accumulate.
    pub fn advance(&mut self, increment: &Vec3) -> &Mat3 {
        self.trial = exp_map(increment) * self.committed;
        &self.trial
    }

    pub fn frame(&self) -> &Mat3 {
        &self.trial
    }

    /// Unit beam axis at this node
    pub fn tangent(&self) -> Vec3 {
        self.trial.column(0).into_owned()
    }

    pub fn commit(&mut self) {
        self.committed = self.trial;
    }

    pub fn revert_to_last_commit(&mut self) {
        self.trial = self.committed;
    }

    pub fn revert_to_start(&mut self) {
        self.committed = self.initial;
        self.trial = self.initial;
    }

    pub fn send_self(&self, stream: &mut FieldStream) {
        stream.push_smatrix(&self.initial);
        stream.push_smatrix(&self.committed);
        stream.push_smatrix(&self.trial);
    }

    pub fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        *self = Self {
            initial: stream.pull_smatrix()?,
            committed: stream.pull_smatrix()?,
            trial: stream.pull_smatrix()?,
        };
        Ok(())
    }
}

/// Unit tangent of a planar beam end node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarEndFrame {
    initial: Vec2,
    committed: Vec2,
    trial: Vec2,
}

impl PlanarEndFrame {
    pub fn new(initial: Vec2) -> Self {
        Self {
            initial,
            committed: initial,
            trial: initial,
        }
    }

    /// Rotate the committed tangent by the in-plane rotation increment
    pub fn advance(&mut self, increment: f64) -> &Vec2 {
        self.trial = rotate_planar(&self.committed, increment);
        &self.trial
    }

    pub fn tangent(&self) -> Vec2 {
        self.trial
    }

    pub fn commit(&mut self) {
        self.committed = self.trial;
    }

    pub fn revert_to_last_commit(&mut self) {
        self.trial = self.committed;
    }

    pub fn revert_to_start(&mut self) {
        self.committed = self.initial;
        self.trial = self.initial;
    }

    pub fn send_self(&self, stream: &mut FieldStream) {
        stream.push_smatrix(&self.initial);
        stream.push_smatrix(&self.committed);
        stream.push_smatrix(&self.trial);
    }

    pub fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        *self = Self {
            initial: stream.pull_smatrix()?,
            committed: stream.pull_smatrix()?,
            trial: stream.pull_smatrix()?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_frame_stays_orthonormal() {
        let mut frame = BeamEndFrame::new(Mat3::identity());
        let increments = [
            Vec3::new(0.3, -0.1, 0.7),
            Vec3::new(1e-5, 2e-6, -3e-6),
            Vec3::new(-0.04, 0.09, 0.01),
            Vec3::new(2.1, 0.4, -1.2),
        ];
        for dv in increments.iter().cycle().take(200) {
            frame.advance(dv);
            frame.commit();
        }
        let q = frame.frame();
        assert_relative_eq!(q.transpose() * q, Mat3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_advance_is_relative_to_commit() {
        let mut frame = BeamEndFrame::new(Mat3::identity());
        let dv = Vec3::new(0.0, 0.0, PI / 2.0);
        frame.advance(&dv);
        frame.advance(&dv);
        assert_relative_eq!(frame.tangent(), Vec3::y(), epsilon = 1e-12);

        frame.commit();
        frame.advance(&dv);
        assert_relative_eq!(frame.tangent(), -Vec3::x(), epsilon = 1e-12);

        frame.revert_to_last_commit();
        assert_relative_eq!(frame.tangent(), Vec3::y(), epsilon = 1e-12);

        frame.revert_to_start();
        assert_relative_eq!(frame.tangent(), Vec3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_planar_frame() {
        let mut frame = PlanarEndFrame::new(Vec2::new(1.0, 0.0));
        frame.advance(PI / 4.0);
        frame.commit();
        frame.advance(PI / 4.0);
        assert_relative_eq!(frame.tangent(), Vec2::new(0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(frame.tangent().norm(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_truncated_stream_leaves_frame_unchanged() {
        let mut frame = BeamEndFrame::new(Mat3::identity());
        frame.advance(&Vec3::new(0.1, 0.2, 0.3));
        let before = frame.clone();

        let mut stream = FieldStream::new();
        stream.push_smatrix(&Mat3::zeros());
        stream.push_smatrix(&Mat3::zeros());
        assert!(frame.recv_self(&mut stream).is_err());
        assert_eq!(frame, before);
    }
}
