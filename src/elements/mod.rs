//! Contact elements and the node/transform inputs they are built from

mod beam_contact_2d;
mod beam_contact_3d;
mod node;
mod transform;

pub use beam_contact_2d::BeamContact2D;
pub use beam_contact_3d::BeamContact3D;
pub use node::{gather_displacements, Node};
pub use transform::{CoordTransform, Orientation};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::channel::{mismatch, FieldStream};
use crate::contact::ContactState;
use crate::error::{FEAError, FEAResult};
use crate::results::{ContactSummary, ResponseType};

/// Interface between an element and the analysis that drives it
///
/// `update` sets the trial state from the element displacement vector,
/// `commit_state` makes it durable. Stiffness and force are evaluated from
/// the current trial state on every call.
pub trait Element {
    fn tag(&self) -> usize;
    fn num_dof(&self) -> usize;
    /// Tags of the connected nodes in DOF order
    fn node_tags(&self) -> [usize; 4];
    fn update(&mut self, disp: &[f64]) -> FEAResult<()>;
    fn commit_state(&mut self);
    fn revert_to_last_commit(&mut self);
    fn revert_to_start(&mut self);
    fn tangent_stiffness(&self) -> DMatrix<f64>;
    fn resisting_force(&self) -> DVector<f64>;
    fn response(&self, response: ResponseType) -> DVector<f64>;
    fn update_parameter(&mut self, id: i32, value: f64) -> FEAResult<()>;
    fn send_self(&self, stream: &mut FieldStream);
    fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()>;
}

/// A beam contact element of either dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContactElement {
    Planar(BeamContact2D),
    Spatial(BeamContact3D),
}

macro_rules! dispatch {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            ContactElement::Planar($e) => $body,
            ContactElement::Spatial($e) => $body,
        }
    };
}

impl ContactElement {
    pub fn state(&self) -> ContactState {
        dispatch!(self, e => e.state())
    }

    pub fn summary(&self) -> ContactSummary {
        dispatch!(self, e => e.summary())
    }

    pub fn as_planar(&self) -> Option<&BeamContact2D> {
        match self {
            Self::Planar(e) => Some(e),
            Self::Spatial(_) => None,
        }
    }

    pub fn as_spatial(&self) -> Option<&BeamContact3D> {
        match self {
            Self::Spatial(e) => Some(e),
            Self::Planar(_) => None,
        }
    }
}

impl From<BeamContact2D> for ContactElement {
    fn from(e: BeamContact2D) -> Self {
        Self::Planar(e)
    }
}

impl From<BeamContact3D> for ContactElement {
    fn from(e: BeamContact3D) -> Self {
        Self::Spatial(e)
    }
}

impl Element for ContactElement {
    fn tag(&self) -> usize {
        dispatch!(self, e => e.tag())
    }

    fn num_dof(&self) -> usize {
        dispatch!(self, e => e.num_dof())
    }

    fn node_tags(&self) -> [usize; 4] {
        dispatch!(self, e => e.node_tags())
    }

    fn update(&mut self, disp: &[f64]) -> FEAResult<()> {
        dispatch!(self, e => Element::update(e, disp))
    }

    fn commit_state(&mut self) {
        dispatch!(self, e => Element::commit_state(e))
    }

    fn revert_to_last_commit(&mut self) {
        dispatch!(self, e => Element::revert_to_last_commit(e))
    }

    fn revert_to_start(&mut self) {
        dispatch!(self, e => Element::revert_to_start(e))
    }

    fn tangent_stiffness(&self) -> DMatrix<f64> {
        dispatch!(self, e => e.tangent_stiffness())
    }

    fn resisting_force(&self) -> DVector<f64> {
        dispatch!(self, e => e.resisting_force())
    }

    fn response(&self, response: ResponseType) -> DVector<f64> {
        dispatch!(self, e => e.response(response))
    }

    fn update_parameter(&mut self, id: i32, value: f64) -> FEAResult<()> {
        dispatch!(self, e => Element::update_parameter(e, id, value))
    }

    fn send_self(&self, stream: &mut FieldStream) {
        match self {
            Self::Planar(e) => {
                stream.push_index(2);
                Element::send_self(e, stream);
            }
            Self::Spatial(e) => {
                stream.push_index(3);
                Element::send_self(e, stream);
            }
        }
    }

    fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        let position = stream.position();
        let dim = stream.pull_index()?;
        match (self, dim) {
            (Self::Planar(e), 2) => Element::recv_self(e, stream),
            (Self::Spatial(e), 3) => Element::recv_self(e, stream),
            (e, dim) => {
                let expected = if e.as_planar().is_some() { 2 } else { 3 };
                Err(mismatch(
                    position,
                    format!("expected a {expected}-D contact element, found {dim}-D"),
                ))
            }
        }
    }
}

/// Reject a displacement vector of the wrong length
pub(crate) fn check_disp_len(tag: usize, disp: &[f64], expected: usize) -> FEAResult<()> {
    if disp.len() != expected {
        return Err(FEAError::InvalidInput(format!(
            "element {tag} expects {expected} displacement values, got {}",
            disp.len()
        )));
    }
    Ok(())
}
