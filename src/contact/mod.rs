//! Beam-to-node contact geometry: frame transport, projection, surface
//! metric and contact status

pub mod frame;
pub mod metric;
pub mod projection;
pub mod state;

pub use frame::{BeamEndFrame, PlanarEndFrame};
pub use metric::{build_metric, interpolate_frame, InterpolatedFrame, SurfaceMetric};
pub use projection::{HermiteSegment, Projection};
pub use state::{ContactState, ContactStateFlags};
