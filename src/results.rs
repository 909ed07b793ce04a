//! Response queries of contact elements

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::contact::ContactState;
use crate::error::FEAError;

/// Named element responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// Force on the secondary node
    Force,
    /// Friction force vector in global coordinates
    FrictionForce,
    /// Normal multiplier followed by the tangential force components
    ForceScalar,
    /// Forces and moments on the beam end nodes
    PrimaryReaction,
    /// Slip since the last committed step
    Slip,
}

impl FromStr for ResponseType {
    type Err = FEAError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "force" | "forces" => Ok(Self::Force),
            "frictionforce" | "frictionforces" => Ok(Self::FrictionForce),
            "forcescalar" | "forcescalars" => Ok(Self::ForceScalar),
            "masterforce" | "masterforces" | "masterreaction" | "masterreactions" | "primaryreaction"
            | "primaryreactions" => Ok(Self::PrimaryReaction),
            "slip" => Ok(Self::Slip),
            _ => Err(FEAError::UnknownResponse(s.to_string())),
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Force => "force",
            Self::FrictionForce => "frictionforce",
            Self::ForceScalar => "forcescalar",
            Self::PrimaryReaction => "primaryreaction",
            Self::Slip => "slip",
        };
        f.write_str(name)
    }
}

/// Snapshot of the contact quantities of one element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSummary {
    pub tag: usize,
    pub state: ContactState,
    pub xi: f64,
    pub gap: f64,
    /// Normal contact force (Lagrange multiplier)
    pub normal_force: f64,
    /// Magnitude of the friction force
    pub friction_force: f64,
    pub in_slip: bool,
    pub projection_converged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_names() {
        assert_eq!("forces".parse::<ResponseType>().unwrap(), ResponseType::Force);
        assert_eq!("FrictionForce".parse::<ResponseType>().unwrap(), ResponseType::FrictionForce);
        assert_eq!("masterreaction".parse::<ResponseType>().unwrap(), ResponseType::PrimaryReaction);
        assert_eq!("slip".parse::<ResponseType>().unwrap(), ResponseType::Slip);
        assert!(matches!("stress".parse::<ResponseType>(), Err(FEAError::UnknownResponse(_))));
    }

    #[test]
    fn test_display_round_trip() {
        for r in [
            ResponseType::Force,
            ResponseType::FrictionForce,
            ResponseType::ForceScalar,
            ResponseType::PrimaryReaction,
            ResponseType::Slip,
        ] {
            assert_eq!(r.to_string().parse::<ResponseType>().unwrap(), r);
        }
    }
}
