//! Coulomb friction with cohesion and tensile cut-off (return mapping)
//!
//! Strain is the triple (gap, slip increment, normal force). The normal force
//! is the contact multiplier and passes straight through; the tangential force
//! comes from an elastic predictor on the accumulated elastic slip followed
//! by a radial return onto the friction cone
//!
//! ```text
//! f = ‖t_s‖ - μ t_n - c <= 0
//! ```
//!
//! Slip components are contravariant and tangential forces covariant, so both
//! norms are taken with the surface metric. In the planar law the metric is
//! the 1x1 identity.

use log::debug;
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

use super::{FrictionParams, MaterialParameter};
use crate::channel::FieldStream;
use crate::error::{FEAError, FEAResult};

/// Contact forces returned by the law
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactStress<const D: usize> {
    pub normal: f64,
    /// Covariant tangential force components
    pub tangential: SVector<f64, D>,
}

/// Consistent tangent of the law
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactTangent<const D: usize> {
    /// `∂t_n/∂λ`
    pub normal: f64,
    /// `∂t_s/∂slip`
    pub shear: SMatrix<f64, D, D>,
    /// `∂t_s/∂λ`
    pub coupling: SVector<f64, D>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct SlipState<const D: usize> {
    elastic_slip: SVector<f64, D>,
    slide_direction: SVector<f64, D>,
    slip_increment: SVector<f64, D>,
    tangential: SVector<f64, D>,
    gap: f64,
    normal_force: f64,
    gamma: f64,
    trial_slip_norm: f64,
    in_slip: bool,
}

impl<const D: usize> Default for SlipState<D> {
    fn default() -> Self {
        Self {
            elastic_slip: SVector::zeros(),
            slide_direction: SVector::zeros(),
            slip_increment: SVector::zeros(),
            tangential: SVector::zeros(),
            gap: 0.0,
            normal_force: 0.0,
            gamma: 0.0,
            trial_slip_norm: 0.0,
            in_slip: false,
        }
    }
}

impl<const D: usize> SlipState<D> {
    fn send_self(&self, stream: &mut FieldStream) {
        stream.push_smatrix(&self.elastic_slip);
        stream.push_smatrix(&self.slide_direction);
        stream.push_smatrix(&self.slip_increment);
        stream.push_smatrix(&self.tangential);
        stream.push_scalar(self.gap);
        stream.push_scalar(self.normal_force);
        stream.push_scalar(self.gamma);
        stream.push_scalar(self.trial_slip_norm);
        stream.push_flag(self.in_slip);
    }

    fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        Ok(Self {
            elastic_slip: stream.pull_smatrix()?,
            slide_direction: stream.pull_smatrix()?,
            slip_increment: stream.pull_smatrix()?,
            tangential: stream.pull_smatrix()?,
            gap: stream.pull_scalar()?,
            normal_force: stream.pull_scalar()?,
            gamma: stream.pull_scalar()?,
            trial_slip_norm: stream.pull_scalar()?,
            in_slip: stream.pull_flag()?,
        })
    }
}

/// Frictional contact law with `D` tangential slip components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionalContact<const D: usize> {
    nominal: FrictionParams,
    friction_enabled: bool,
    metric: SMatrix<f64, D, D>,
    metric_inv: SMatrix<f64, D, D>,
    committed: SlipState<D>,
    trial: SlipState<D>,
}

impl<const D: usize> FrictionalContact<D> {
    /// Fraction of the plastic multiplier applied by the spatial return,
    /// leaving the corrected force a hair outside the exact cone surface
    const PLASTIC_SCALE: f64 = if D == 1 { 1.0 } else { 0.999999999999 };

    pub fn new(params: FrictionParams) -> FEAResult<Self> {
        params.validate()?;
        let mut nominal = params;
        nominal.clamp_tensile_strength();
        Ok(Self {
            nominal,
            friction_enabled: true,
            metric: SMatrix::identity(),
            metric_inv: SMatrix::identity(),
            committed: SlipState::default(),
            trial: SlipState::default(),
        })
    }

    /// Nominal parameters, independent of the friction toggle
    pub fn params(&self) -> &FrictionParams {
        &self.nominal
    }

    /// Parameters used for evaluation: zero friction while friction is off
    pub fn active_params(&self) -> FrictionParams {
        if self.friction_enabled {
            self.nominal
        } else {
            self.nominal.frictionless()
        }
    }

    pub fn is_friction_enabled(&self) -> bool {
        self.friction_enabled
    }

    pub fn tensile_strength(&self) -> f64 {
        self.active_params().tensile_strength
    }

    pub fn in_slip(&self) -> bool {
        self.trial.in_slip
    }

    pub fn elastic_slip(&self) -> &SVector<f64, D> {
        &self.trial.elastic_slip
    }

    pub fn committed_elastic_slip(&self) -> &SVector<f64, D> {
        &self.committed.elastic_slip
    }

    pub fn slide_direction(&self) -> &SVector<f64, D> {
        &self.trial.slide_direction
    }

    pub fn metric(&self) -> (&SMatrix<f64, D, D>, &SMatrix<f64, D, D>) {
        (&self.metric, &self.metric_inv)
    }

    /// Surface metric used to measure slip and tangential force
    pub fn set_metric(&mut self, covariant: SMatrix<f64, D, D>, contravariant: SMatrix<f64, D, D>) {
        self.metric = covariant;
        self.metric_inv = contravariant;
    }

    /// Metric norm of a contravariant slip vector
    fn slip_norm(&self, s: &SVector<f64, D>) -> f64 {
        s.dot(&(self.metric * s)).max(0.0).sqrt()
    }

    /// Metric norm of a covariant force vector
    fn force_norm(&self, t: &SVector<f64, D>) -> f64 {
        t.dot(&(self.metric_inv * t)).max(0.0).sqrt()
    }

    /// Elastic predictor and plastic corrector for the given trial strain
    ///
    /// Evaluation only depends on the committed state, so repeated calls with
    /// the same arguments give the same result.
    pub fn set_trial_strain(&mut self, gap: f64, slip: &SVector<f64, D>, normal_force: f64) -> ContactStress<D> {
        let p = self.active_params();
        let k = p.shear_stiffness;

        let mut trial = SlipState {
            gap,
            normal_force,
            slip_increment: *slip,
            ..SlipState::default()
        };

        if normal_force > -p.tensile_strength {
            let s_trial = self.committed.elastic_slip + slip;
            let t_trial = self.metric * s_trial * k;
            let s_norm = self.slip_norm(&s_trial);
            let f_trial = self.force_norm(&t_trial) - p.friction_coefficient * normal_force - p.cohesion;
            trial.trial_slip_norm = s_norm;

            if f_trial > 0.0 && s_norm > f64::EPSILON {
                let gamma = f_trial / k * Self::PLASTIC_SCALE;
                let r = s_trial / s_norm;
                trial.elastic_slip = s_trial - r * gamma;
                trial.slide_direction = r;
                trial.gamma = gamma;
                trial.in_slip = true;
            } else {
                trial.elastic_slip = s_trial;
            }
            trial.tangential = self.metric * trial.elastic_slip * k;
        }

        self.trial = trial;
        self.stress()
    }

    pub fn stress(&self) -> ContactStress<D> {
        ContactStress {
            normal: self.trial.normal_force,
            tangential: self.trial.tangential,
        }
    }

    /// Tangent of the last evaluated trial state
    ///
    /// Separated: everything zero. Sliding: the metric projected away from
    /// the slide direction, scaled by the return factor, plus the friction
    /// coupling to the normal force. Sticking: the full shear stiffness.
    pub fn tangent(&self) -> ContactTangent<D> {
        let p = self.active_params();
        let k = p.shear_stiffness;
        let g = self.metric;

        if self.trial.normal_force < -p.tensile_strength {
            ContactTangent {
                normal: 0.0,
                shear: SMatrix::zeros(),
                coupling: SVector::zeros(),
            }
        } else if self.trial.in_slip {
            let gr = g * self.trial.slide_direction;
            let factor = k * (1.0 - self.trial.gamma / self.trial.trial_slip_norm);
            ContactTangent {
                normal: 1.0,
                shear: (g - gr * gr.transpose()) * factor,
                coupling: gr * p.friction_coefficient,
            }
        } else {
            ContactTangent {
                normal: 1.0,
                shear: g * k,
                coupling: SVector::zeros(),
            }
        }
    }

    pub fn commit_state(&mut self) {
        self.committed = self.trial;
    }

    pub fn revert_to_last_commit(&mut self) {
        self.trial = self.committed;
    }

    pub fn revert_to_start(&mut self) {
        self.committed = SlipState::default();
        self.trial = SlipState::default();
    }

    /// Change a parameter by id, see [`MaterialParameter`]
    pub fn update_parameter(&mut self, id: i32, value: f64) -> FEAResult<()> {
        let parameter = MaterialParameter::try_from(id)?;
        if parameter == MaterialParameter::FrictionState {
            self.friction_enabled = value != 0.0;
            debug!("friction {}", if self.friction_enabled { "enabled" } else { "disabled" });
            return Ok(());
        }

        let mut updated = self.nominal;
        match parameter {
            MaterialParameter::FrictionCoefficient => updated.friction_coefficient = value,
            MaterialParameter::ShearStiffness => updated.shear_stiffness = value,
            MaterialParameter::Cohesion => updated.cohesion = value,
            MaterialParameter::TensileStrength => updated.tensile_strength = value,
            MaterialParameter::FrictionState => unreachable!(),
        }
        updated.validate()?;
        updated.clamp_tensile_strength();
        self.nominal = updated;
        Ok(())
    }

    pub fn send_self(&self, stream: &mut FieldStream) {
        self.nominal.send_self(stream);
        stream.push_flag(self.friction_enabled);
        stream.push_smatrix(&self.metric);
        stream.push_smatrix(&self.metric_inv);
        self.committed.send_self(stream);
        self.trial.send_self(stream);
    }

    pub fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        let nominal = FrictionParams::recv_self(stream)?;
        nominal
            .validate()
            .map_err(|e| FEAError::InvalidMaterial(format!("received parameters rejected: {e}")))?;
        *self = Self {
            nominal,
            friction_enabled: stream.pull_flag()?,
            metric: stream.pull_smatrix()?,
            metric_inv: stream.pull_smatrix()?,
            committed: SlipState::recv_self(stream)?,
            trial: SlipState::recv_self(stream)?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ContactMaterial2D, ContactMaterial3D};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Vector1, Vector2};

    fn planar() -> ContactMaterial2D {
        ContactMaterial2D::new(FrictionParams::new(0.5, 1000.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_sticking() {
        let mut mat = planar();
        let stress = mat.set_trial_strain(0.0, &Vector1::new(1e-3), 10.0);
        // |t| = 1 < μ t_n = 5
        assert!(!mat.in_slip());
        assert_relative_eq!(stress.tangential[0], 1.0, epsilon = 1e-12);
        let tangent = mat.tangent();
        assert_relative_eq!(tangent.shear[(0, 0)], 1000.0);
        assert_relative_eq!(tangent.coupling[0], 0.0);
        assert_relative_eq!(tangent.normal, 1.0);
    }

    #[test]
    fn test_sliding_returns_to_cone() {
        let mut mat = planar();
        let stress = mat.set_trial_strain(0.0, &Vector1::new(-0.02), 10.0);
        assert!(mat.in_slip());
        assert_relative_eq!(stress.tangential[0], -5.0, epsilon = 1e-12);
        assert_relative_eq!(mat.slide_direction()[0], -1.0);
        let tangent = mat.tangent();
        assert_relative_eq!(tangent.shear[(0, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(tangent.coupling[0], -0.5);
    }

    #[test]
    fn test_separation_clears_memory() {
        let mut mat = ContactMaterial2D::new(FrictionParams::new(0.5, 1000.0, 1.0, 1.0)).unwrap();
        mat.set_trial_strain(0.0, &Vector1::new(1e-4), 10.0);
        mat.commit_state();
        let stress = mat.set_trial_strain(0.1, &Vector1::new(1e-4), -3.0);
        assert_eq!(stress.tangential[0], 0.0);
        assert_eq!(mat.elastic_slip()[0], 0.0);
        let tangent = mat.tangent();
        assert_eq!(tangent.normal, 0.0);
        assert_eq!(tangent.shear[(0, 0)], 0.0);
    }

    #[test]
    fn test_trial_strain_is_idempotent() {
        let mut mat = planar();
        mat.set_trial_strain(0.0, &Vector1::new(4e-3), 10.0);
        mat.commit_state();
        let first = mat.set_trial_strain(0.0, &Vector1::new(5e-3), 10.0);
        let first_tangent = mat.tangent();
        let second = mat.set_trial_strain(0.0, &Vector1::new(5e-3), 10.0);
        assert_eq!(first, second);
        assert_eq!(first_tangent, mat.tangent());
    }

    #[test]
    fn test_commit_and_revert() {
        let mut mat = planar();
        mat.set_trial_strain(0.0, &Vector1::new(2e-3), 10.0);
        mat.commit_state();
        let committed = mat.stress();

        mat.set_trial_strain(0.0, &Vector1::new(-1e-3), 10.0);
        assert_relative_eq!(mat.elastic_slip()[0], 1e-3, epsilon = 1e-15);
        mat.revert_to_last_commit();
        assert_eq!(mat.stress(), committed);
        assert_relative_eq!(mat.elastic_slip()[0], 2e-3, epsilon = 1e-15);

        mat.revert_to_start();
        assert_eq!(mat.committed_elastic_slip()[0], 0.0);
        assert_eq!(mat.stress().tangential[0], 0.0);
    }

    #[test]
    fn test_friction_toggle_keeps_nominal_values() {
        let mut mat = planar();
        mat.update_parameter(1, 0.0).unwrap();
        assert!(!mat.is_friction_enabled());
        let stress = mat.set_trial_strain(0.0, &Vector1::new(1e-3), 10.0);
        assert_relative_eq!(stress.tangential[0], 0.0, epsilon = 1e-12);
        assert_eq!(mat.params().friction_coefficient, 0.5);

        mat.update_parameter(1, 1.0).unwrap();
        let stress = mat.set_trial_strain(0.0, &Vector1::new(1e-3), 10.0);
        assert_relative_eq!(stress.tangential[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_update_parameter_validation() {
        let mut mat = planar();
        mat.update_parameter(2, 0.8).unwrap();
        assert_eq!(mat.params().friction_coefficient, 0.8);
        assert!(mat.update_parameter(3, -1.0).is_err());
        assert_eq!(mat.params().shear_stiffness, 1000.0);
        assert!(matches!(mat.update_parameter(42, 1.0), Err(FEAError::UnknownParameter(42))));

        mat.update_parameter(4, 2.0).unwrap();
        mat.update_parameter(5, 100.0).unwrap();
        assert_relative_eq!(mat.params().tensile_strength, 2.0 / 0.8);
    }

    #[test]
    fn test_spatial_cone_with_metric() {
        let mut mat = ContactMaterial3D::new(FrictionParams::new(0.3, 500.0, 0.2, 0.0)).unwrap();
        let g = Matrix2::new(4.0, 0.5, 0.5, 0.09);
        mat.set_metric(g, g.try_inverse().unwrap());

        let stress = mat.set_trial_strain(0.0, &Vector2::new(0.01, -0.2), 20.0);
        assert!(mat.in_slip());
        let t = stress.tangential;
        let norm = t.dot(&(g.try_inverse().unwrap() * t)).sqrt();
        assert!(norm <= 0.3 * 20.0 + 0.2 + 1e-9);
        assert_relative_eq!(norm, 0.3 * 20.0 + 0.2, epsilon = 1e-8);
    }

    #[test]
    fn test_spatial_sliding_tangent_matches_finite_differences() {
        let mut mat = ContactMaterial3D::new(FrictionParams::new(0.4, 800.0, 0.0, 0.0)).unwrap();
        let g = Matrix2::new(2.5, 0.3, 0.3, 0.6);
        mat.set_metric(g, g.try_inverse().unwrap());

        let slip = Vector2::new(0.03, 0.02);
        let lambda = 5.0;
        mat.set_trial_strain(0.0, &slip, lambda);
        assert!(mat.in_slip());
        let tangent = mat.tangent();

        let h = 1e-7;
        for j in 0..2 {
            let mut plus = slip;
            plus[j] += h;
            let mut minus = slip;
            minus[j] -= h;
            let tp = mat.set_trial_strain(0.0, &plus, lambda).tangential;
            let tm = mat.set_trial_strain(0.0, &minus, lambda).tangential;
            let column = (tp - tm) / (2.0 * h);
            for i in 0..2 {
                assert_relative_eq!(tangent.shear[(i, j)], column[i], epsilon = 1e-4);
            }
        }

        let tp = mat.set_trial_strain(0.0, &slip, lambda + h).tangential;
        let tm = mat.set_trial_strain(0.0, &slip, lambda - h).tangential;
        let column = (tp - tm) / (2.0 * h);
        for i in 0..2 {
            assert_relative_eq!(tangent.coupling[i], column[i], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_truncated_stream_leaves_law_unchanged() {
        let mut mat = ContactMaterial2D::new(FrictionParams::coulomb(0.3, 1e3)).unwrap();
        mat.set_trial_strain(0.0, &nalgebra::Vector1::new(0.001), 10.0);
        mat.commit_state();
        let before = mat.clone();

        let mut stream = FieldStream::new();
        FrictionParams::coulomb(0.8, 5.0).send_self(&mut stream);
        stream.push_flag(false);
        assert!(mat.recv_self(&mut stream).is_err());
        assert_eq!(mat, before);
    }
}
