//! Contact material parameters and frictional constitutive laws

mod frictional;

pub use frictional::{ContactStress, ContactTangent, FrictionalContact};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::channel::FieldStream;
use crate::error::{FEAError, FEAResult};

/// Planar contact law: one slip component
pub type ContactMaterial2D = FrictionalContact<1>;
/// Spatial contact law: two curvilinear slip components
pub type ContactMaterial3D = FrictionalContact<2>;

/// Parameter ids accepted by `update_parameter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialParameter {
    /// Non-zero enables friction, zero switches it off
    FrictionState = 1,
    FrictionCoefficient = 2,
    ShearStiffness = 3,
    Cohesion = 4,
    TensileStrength = 5,
}

impl TryFrom<i32> for MaterialParameter {
    type Error = FEAError;

    fn try_from(id: i32) -> FEAResult<Self> {
        match id {
            1 => Ok(Self::FrictionState),
            2 => Ok(Self::FrictionCoefficient),
            3 => Ok(Self::ShearStiffness),
            4 => Ok(Self::Cohesion),
            5 => Ok(Self::TensileStrength),
            _ => Err(FEAError::UnknownParameter(id)),
        }
    }
}

/// Coulomb friction parameters with cohesion and tensile cut-off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionParams {
    /// Friction coefficient μ
    pub friction_coefficient: f64,
    /// Elastic tangential stiffness before sliding
    pub shear_stiffness: f64,
    /// Cohesive intercept of the friction cone
    pub cohesion: f64,
    /// Normal tension the contact carries before it separates
    pub tensile_strength: f64,
}

impl FrictionParams {
    pub fn new(friction_coefficient: f64, shear_stiffness: f64, cohesion: f64, tensile_strength: f64) -> Self {
        Self {
            friction_coefficient,
            shear_stiffness,
            cohesion,
            tensile_strength,
        }
    }

    /// Cohesionless Coulomb friction
    pub fn coulomb(friction_coefficient: f64, shear_stiffness: f64) -> Self {
        Self::new(friction_coefficient, shear_stiffness, 0.0, 0.0)
    }

    /// Parameters with friction switched off, keeping the shear stiffness
    pub fn frictionless(&self) -> Self {
        Self::new(0.0, self.shear_stiffness, 0.0, 0.0)
    }

    /// Check signs and magnitudes
    pub fn validate(&self) -> FEAResult<()> {
        let values = [
            ("friction coefficient", self.friction_coefficient),
            ("cohesion", self.cohesion),
            ("tensile strength", self.tensile_strength),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(FEAError::InvalidMaterial(format!("{name} must be non-negative, got {value}")));
            }
        }
        if !self.shear_stiffness.is_finite() || self.shear_stiffness <= 0.0 {
            return Err(FEAError::InvalidMaterial(format!(
                "shear stiffness must be positive, got {}",
                self.shear_stiffness
            )));
        }
        Ok(())
    }

    /// Keep the tensile cut-off inside the cone apex: `f_t <= c / μ`
    pub fn clamp_tensile_strength(&mut self) {
        if self.friction_coefficient > 0.0 {
            let apex = self.cohesion / self.friction_coefficient;
            if self.tensile_strength > apex {
                warn!(
                    "tensile strength {} exceeds cohesion / friction coefficient; clamped to {apex}",
                    self.tensile_strength
                );
                self.tensile_strength = apex;
            }
        }
    }

    pub(crate) fn send_self(&self, stream: &mut FieldStream) {
        stream.push_scalar(self.friction_coefficient);
        stream.push_scalar(self.shear_stiffness);
        stream.push_scalar(self.cohesion);
        stream.push_scalar(self.tensile_strength);
    }

    pub(crate) fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        Ok(Self {
            friction_coefficient: stream.pull_scalar()?,
            shear_stiffness: stream.pull_scalar()?,
            cohesion: stream.pull_scalar()?,
            tensile_strength: stream.pull_scalar()?,
        })
    }
}
