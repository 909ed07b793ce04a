//! Contact element settings and driver options

mod driver;

pub use driver::NewtonDriver;

use serde::{Deserialize, Serialize};

use crate::channel::FieldStream;
use crate::error::{FEAError, FEAResult};

/// Construction-time settings of a beam contact element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactSettings {
    /// Offset of the contact surface from the beam centerline
    pub radius: f64,
    /// Gap below which the surfaces count as touching
    pub gap_tolerance: f64,
    /// Release margin on the normal multiplier beyond the tensile strength
    pub force_tolerance: f64,
    /// Start the analysis with the constraint active
    pub initially_in_contact: bool,
    /// Newton iteration cap of the closest-point projection
    pub max_projection_iterations: usize,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            radius: 0.0,
            gap_tolerance: 1e-10,
            force_tolerance: 1e-10,
            initially_in_contact: true,
            max_projection_iterations: 50,
        }
    }
}

impl ContactSettings {
    /// Settings for a planar beam of the given section width
    pub fn planar(width: f64) -> Self {
        Self {
            radius: width / 2.0,
            ..Self::default()
        }
    }

    /// Settings for a spatial beam of the given section radius
    pub fn spatial(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Set gap tolerance
    pub fn with_gap_tolerance(mut self, tol: f64) -> Self {
        self.gap_tolerance = tol;
        self
    }

    /// Set force tolerance
    pub fn with_force_tolerance(mut self, tol: f64) -> Self {
        self.force_tolerance = tol;
        self
    }

    /// Start released instead of in contact
    pub fn initially_released(mut self) -> Self {
        self.initially_in_contact = false;
        self
    }

    /// Set the projection iteration cap
    pub fn with_max_projection_iterations(mut self, max_iter: usize) -> Self {
        self.max_projection_iterations = max_iter;
        self
    }

    pub fn validate(&self) -> FEAResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(FEAError::InvalidInput(format!("radius must be non-negative, got {}", self.radius)));
        }
        if !(self.gap_tolerance > 0.0) || !(self.force_tolerance >= 0.0) {
            return Err(FEAError::InvalidInput(format!(
                "tolerances must be positive (gap {}, force {})",
                self.gap_tolerance, self.force_tolerance
            )));
        }
        if self.max_projection_iterations == 0 {
            return Err(FEAError::InvalidInput("projection needs at least one iteration".to_string()));
        }
        Ok(())
    }

    pub(crate) fn send_self(&self, stream: &mut FieldStream) {
        stream.push_scalar(self.radius);
        stream.push_scalar(self.gap_tolerance);
        stream.push_scalar(self.force_tolerance);
        stream.push_flag(self.initially_in_contact);
        stream.push_index(self.max_projection_iterations);
    }

    pub(crate) fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        let settings = Self {
            radius: stream.pull_scalar()?,
            gap_tolerance: stream.pull_scalar()?,
            force_tolerance: stream.pull_scalar()?,
            initially_in_contact: stream.pull_flag()?,
            max_projection_iterations: stream.pull_index()?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Options of the Newton driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Maximum Newton iterations per step
    pub max_iterations: usize,
    /// Convergence tolerance on the increment and residual norms
    pub tolerance: f64,
    /// Log every iteration at debug level
    pub log: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            tolerance: 1e-9,
            log: false,
        }
    }
}

impl SolverOptions {
    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }
}
