//! Beam Contact - beam-to-node frictional contact elements in Rust
//!
//! This library couples a beam segment to a node of another body through a
//! Lagrange multiplier constraint, supporting:
//! - Closest-point projection onto cubic Hermite beam centerlines
//! - End-node frames updated with the exponential map
//! - Curvilinear surface metrics for slip on 3-D beams of finite radius
//! - Coulomb friction with cohesion and tensile cut-off (return mapping)
//! - Planar (10 DOF) and spatial (18 DOF) elements with consistent tangents
//!
//! ## Example
//! ```rust
//! use beam_contact::prelude::*;
//!
//! // Beam a-b, secondary node resting on the surface, Lagrange node
//! let nodes = [
//!     Node::planar(1, 0.0, 0.0, 3),
//!     Node::planar(2, 1.0, 0.0, 3),
//!     Node::planar(3, 0.5, 0.05, 2),
//!     Node::planar(4, 0.5, 0.05, 2),
//! ];
//! let material = ContactMaterial2D::new(FrictionParams::coulomb(0.3, 1.0e3)).unwrap();
//! let mut element =
//!     BeamContact2D::new(1, nodes.each_ref(), material, ContactSettings::planar(0.1)).unwrap();
//!
//! // Press with a multiplier of 10 and slide the secondary node
//! let mut disp = [0.0; 10];
//! disp[6] = 0.05;
//! disp[8] = 10.0;
//! element.update(&disp).unwrap();
//! element.commit_state();
//!
//! assert_eq!(element.state(), ContactState::InContact);
//! assert!((element.tangential_force() - 3.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod channel;
pub mod contact;
pub mod elements;
pub mod error;
pub mod materials;
pub mod math;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{ContactSettings, NewtonDriver, SolverOptions};
    pub use crate::channel::FieldStream;
    pub use crate::contact::{ContactState, ContactStateFlags};
    pub use crate::elements::{
        BeamContact2D, BeamContact3D, ContactElement, CoordTransform, Element, Node,
    };
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::materials::{ContactMaterial2D, ContactMaterial3D, FrictionParams};
    pub use crate::results::{ContactSummary, ResponseType};
}
