//! Node - a point with degrees of freedom and a displacement history

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::math::{Vec2, Vec3};

/// A node with `ndf` degrees of freedom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node tag
    pub tag: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Number of degrees of freedom
    pub ndf: usize,

    trial_disp: Vec<f64>,
    committed_disp: Vec<f64>,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(tag: usize, x: f64, y: f64, z: f64, ndf: usize) -> Self {
        Self {
            tag,
            x,
            y,
            z,
            ndf,
            trial_disp: vec![0.0; ndf],
            committed_disp: vec![0.0; ndf],
        }
    }

    /// Create a planar node (z = 0)
    pub fn planar(tag: usize, x: f64, y: f64, ndf: usize) -> Self {
        Self::new(tag, x, y, 0.0, ndf)
    }

    pub fn coords_3d(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn coords_2d(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn trial_displacement(&self) -> &[f64] {
        &self.trial_disp
    }

    pub fn committed_displacement(&self) -> &[f64] {
        &self.committed_disp
    }

    /// Set the trial displacement, one value per DOF
    pub fn set_trial_displacement(&mut self, disp: &[f64]) -> FEAResult<()> {
        if disp.len() != self.ndf {
            return Err(FEAError::InvalidInput(format!(
                "node {} has {} DOFs, got {} displacement values",
                self.tag,
                self.ndf,
                disp.len()
            )));
        }
        self.trial_disp.copy_from_slice(disp);
        Ok(())
    }

    pub fn commit(&mut self) {
        self.committed_disp.copy_from_slice(&self.trial_disp);
    }

    pub fn revert_to_last_commit(&mut self) {
        self.trial_disp.copy_from_slice(&self.committed_disp);
    }

    pub fn revert_to_start(&mut self) {
        self.trial_disp.fill(0.0);
        self.committed_disp.fill(0.0);
    }
}

/// Concatenate the trial displacements of element nodes in order
pub fn gather_displacements(nodes: &[&Node]) -> Vec<f64> {
    nodes
        .iter()
        .flat_map(|n| n.trial_displacement().iter().copied())
        .collect()
}

/// Check that nodes carry the expected number of DOFs
pub(crate) fn check_dofs(element: &str, nodes: &[&Node], expected: &[usize]) -> FEAResult<()> {
    for (node, &ndf) in nodes.iter().zip(expected) {
        if node.ndf != ndf {
            return Err(FEAError::InvalidInput(format!(
                "{element} expects {ndf} DOFs at node {}, found {}",
                node.tag, node.ndf
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(1, 1.0, 2.0, 3.0, 6);
        assert_eq!(node.coords_3d(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.trial_displacement().len(), 6);
    }

    #[test]
    fn test_planar_node_lies_in_plane() {
        let node = Node::planar(2, 3.0, 4.0, 3);
        assert_eq!(node.coords_2d(), Vec2::new(3.0, 4.0));
        assert_eq!(node.coords_3d().z, 0.0);
    }

    #[test]
    fn test_displacement_history() {
        let mut node = Node::planar(1, 0.0, 0.0, 2);
        assert!(node.set_trial_displacement(&[1.0]).is_err());
        node.set_trial_displacement(&[1.0, 2.0]).unwrap();
        node.commit();
        node.set_trial_displacement(&[3.0, 4.0]).unwrap();
        node.revert_to_last_commit();
        assert_eq!(node.trial_displacement(), &[1.0, 2.0]);
        node.revert_to_start();
        assert_eq!(node.committed_displacement(), &[0.0, 0.0]);
    }

    #[test]
    fn test_gather() {
        let mut a = Node::planar(1, 0.0, 0.0, 2);
        let b = Node::planar(2, 1.0, 0.0, 1);
        a.set_trial_displacement(&[0.5, -0.5]).unwrap();
        assert_eq!(gather_displacements(&[&a, &b]), vec![0.5, -0.5, 0.0]);
    }
}
