//! Planar beam-to-node contact element
//!
//! Couples a 2-D beam segment with end nodes `a`, `b` (`ux uy rz`) to a
//! secondary node `s` (`ux uy`). The normal constraint is enforced by the
//! multiplier stored in the first DOF of a Lagrange node `l`.
//!
//! ```text
//! DOF   0  1  2 | 3  4  5 | 6  7 | 8  9
//! node  a       | b       | s    | l
//! ```

use log::debug;
use nalgebra::{DMatrix, DVector, Vector1};
use serde::{Deserialize, Serialize};

use super::node::{check_dofs, gather_displacements, Node};
use super::{check_disp_len, Element};
use crate::analysis::ContactSettings;
use crate::channel::FieldStream;
use crate::contact::{ContactState, ContactStateFlags, HermiteSegment, PlanarEndFrame, Projection};
use crate::error::{FEAError, FEAResult};
use crate::materials::ContactMaterial2D;
use crate::math::{HermiteBasis, Mat10, Vec10, Vec2};
use crate::results::{ContactSummary, ResponseType};

const NUM_DOF: usize = 10;
const SECONDARY: usize = 6;
const LAMBDA: usize = 8;
const NODE_DOFS: [usize; 4] = [3, 3, 2, 2];

/// Contact point quantities of one configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Kinematics {
    xi: f64,
    length: f64,
    normal: Vec2,
    tangent: Vec2,
    gap: f64,
    slip: f64,
    lambda: f64,
    converged: bool,
}

impl Kinematics {
    fn locate(projection: &Projection<2>, target: &Vec2, previous_normal: &Vec2, length: f64, radius: f64) -> Self {
        let normal = projection.normal.unwrap_or(*previous_normal);
        Self {
            xi: projection.xi,
            length,
            normal,
            tangent: projection.tangent,
            gap: normal.dot(&(target - projection.point)) - radius,
            slip: 0.0,
            lambda: 0.0,
            converged: projection.converged,
        }
    }

    fn send_self(&self, stream: &mut FieldStream) {
        stream.push_scalar(self.xi);
        stream.push_scalar(self.length);
        stream.push_smatrix(&self.normal);
        stream.push_smatrix(&self.tangent);
        stream.push_scalar(self.gap);
        stream.push_scalar(self.slip);
        stream.push_scalar(self.lambda);
        stream.push_flag(self.converged);
    }

    fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        Ok(Self {
            xi: stream.pull_scalar()?,
            length: stream.pull_scalar()?,
            normal: stream.pull_smatrix()?,
            tangent: stream.pull_smatrix()?,
            gap: stream.pull_scalar()?,
            slip: stream.pull_scalar()?,
            lambda: stream.pull_scalar()?,
            converged: stream.pull_flag()?,
        })
    }
}

/// Planar beam contact element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamContact2D {
    tag: usize,
    node_tags: [usize; 4],
    settings: ContactSettings,
    /// Initial coordinates of `a`, `b` and `s`
    coords: [Vec2; 3],
    frames: [PlanarEndFrame; 2],
    material: ContactMaterial2D,
    flags: ContactStateFlags,
    committed: Kinematics,
    trial: Kinematics,
    committed_disp: Vec10,
    trial_disp: Vec10,
}

fn left_normal(t: &Vec2) -> Vec2 {
    Vec2::new(-t.y, t.x)
}

fn set2(v: &mut Vec10, at: usize, w: &Vec2) {
    v[at] = w.x;
    v[at + 1] = w.y;
}

impl BeamContact2D {
    /// Create an element from nodes `[a, b, s, l]`
    ///
    /// The end tangents start along the chord from `a` to `b`.
    pub fn new(
        tag: usize,
        nodes: [&Node; 4],
        material: ContactMaterial2D,
        settings: ContactSettings,
    ) -> FEAResult<Self> {
        settings.validate()?;
        check_dofs("BeamContact2D", &nodes, &NODE_DOFS)?;

        let coords = [nodes[0].coords_2d(), nodes[1].coords_2d(), nodes[2].coords_2d()];
        let chord = coords[1] - coords[0];
        let length = chord.norm();
        if length < 1e-12 {
            return Err(FEAError::InvalidGeometry(format!(
                "element {tag}: beam nodes {} and {} coincide",
                nodes[0].tag, nodes[1].tag
            )));
        }
        let t0 = chord / length;

        let initial = Self::initial_kinematics(&coords, &t0, &settings);
        let element = Self {
            tag,
            node_tags: nodes.map(|n| n.tag),
            settings,
            coords,
            frames: [PlanarEndFrame::new(t0), PlanarEndFrame::new(t0)],
            material,
            flags: ContactStateFlags::seeded(settings.initially_in_contact),
            committed: initial,
            trial: initial,
            committed_disp: Vec10::zeros(),
            trial_disp: Vec10::zeros(),
        };
        debug!(
            "BeamContact2D {tag}: xi = {:.4}, gap = {:.3e}, {:?}",
            initial.xi,
            initial.gap,
            element.state()
        );
        Ok(element)
    }

    fn initial_kinematics(coords: &[Vec2; 3], t0: &Vec2, settings: &ContactSettings) -> Kinematics {
        let [xa, xb, xs] = coords;
        let segment = HermiteSegment::new(*xa, *xb, *t0, *t0);
        let projection = segment.project(
            segment.chord_parameter(xs),
            xs,
            settings.gap_tolerance,
            settings.max_projection_iterations,
        );
        let fallback = left_normal(&projection.tangent);
        Kinematics::locate(&projection, xs, &fallback, segment.length, settings.radius)
    }

    /// Update from the current trial displacements of the element nodes
    pub fn update_from_nodes(&mut self, nodes: [&Node; 4]) -> FEAResult<()> {
        if nodes.map(|n| n.tag) != self.node_tags {
            return Err(FEAError::InvalidInput(format!(
                "element {} is connected to nodes {:?}",
                self.tag, self.node_tags
            )));
        }
        Element::update(self, &gather_displacements(&nodes))
    }

    pub fn state(&self) -> ContactState {
        self.flags.state()
    }

    pub fn flags(&self) -> &ContactStateFlags {
        &self.flags
    }

    pub fn in_contact(&self) -> bool {
        self.flags.in_contact
    }

    pub fn xi(&self) -> f64 {
        self.trial.xi
    }

    pub fn gap(&self) -> f64 {
        self.trial.gap
    }

    pub fn normal(&self) -> &Vec2 {
        &self.trial.normal
    }

    pub fn lambda(&self) -> f64 {
        self.trial.lambda
    }

    /// Slip since the last committed state
    pub fn slip(&self) -> f64 {
        self.trial.slip
    }

    pub fn projection_converged(&self) -> bool {
        self.trial.converged
    }

    pub fn material(&self) -> &ContactMaterial2D {
        &self.material
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    /// Gap and slip sensitivities `(Bn, Bs)` at the trial configuration
    ///
    /// Rotations of the end nodes move the curve through the end tangents
    /// and carry the contact point around the centerline at the radius.
    pub fn sensitivities(&self) -> (Vec10, Vec10) {
        let k = &self.trial;
        let [h1, h2, h3, h4] = HermiteBasis::at(k.xi).h;
        let ta = self.frames[0].tangent();
        let tb = self.frames[1].tangent();
        let n = k.normal;
        let c1 = k.tangent;
        let l = k.length;
        let r = self.settings.radius;

        let mut bn = Vec10::zeros();
        set2(&mut bn, 0, &(n * -h1));
        bn[2] = -h2 * l * ta.perp(&n);
        set2(&mut bn, 3, &(n * -h3));
        bn[5] = -h4 * l * tb.perp(&n);
        set2(&mut bn, SECONDARY, &n);

        let mut bs = Vec10::zeros();
        set2(&mut bs, 0, &(c1 * -h1));
        bs[2] = -h2 * l * ta.perp(&c1) - (1.0 - k.xi) * r * n.perp(&c1);
        set2(&mut bs, 3, &(c1 * -h3));
        bs[5] = -h4 * l * tb.perp(&c1) - k.xi * r * n.perp(&c1);
        set2(&mut bs, SECONDARY, &c1);

        (bn, bs)
    }

    /// Tangential contact force, zero while out of contact
    pub fn tangential_force(&self) -> f64 {
        if self.flags.in_contact {
            self.material.stress().tangential[0]
        } else {
            0.0
        }
    }

    /// Friction force on the secondary node in global coordinates
    pub fn friction_force(&self) -> Vec2 {
        self.trial.tangent * self.tangential_force()
    }

    /// Tangent stiffness at the trial state
    pub fn stiffness(&self) -> Mat10 {
        let mut k = Mat10::zeros();
        if self.flags.in_contact {
            let (bn, bs) = self.sensitivities();
            let tangent = self.material.tangent();
            k += bs * bs.transpose() * tangent.shear[(0, 0)];
            for i in 0..LAMBDA {
                k[(i, LAMBDA)] = -bn[i] + bs[i] * tangent.coupling[0];
                k[(LAMBDA, i)] = -bn[i];
            }
        } else {
            k[(LAMBDA, LAMBDA)] = 1.0;
        }
        k[(LAMBDA + 1, LAMBDA + 1)] = 1.0;
        k
    }

    /// Resisting force at the trial state
    pub fn force(&self) -> Vec10 {
        let mut r = Vec10::zeros();
        if self.flags.in_contact {
            let (bn, bs) = self.sensitivities();
            r = bs * self.material.stress().tangential[0] - bn * self.trial.lambda;
            r[LAMBDA] = -self.trial.gap;
        } else {
            r[LAMBDA] = self.trial.lambda;
        }
        r[LAMBDA + 1] = self.trial_disp[LAMBDA + 1];
        r
    }

    pub fn summary(&self) -> ContactSummary {
        ContactSummary {
            tag: self.tag,
            state: self.state(),
            xi: self.trial.xi,
            gap: self.trial.gap,
            normal_force: self.trial.lambda,
            friction_force: self.tangential_force().abs(),
            in_slip: self.flags.in_contact && self.material.in_slip(),
            projection_converged: self.trial.converged,
        }
    }
}

impl Element for BeamContact2D {
    fn tag(&self) -> usize {
        self.tag
    }

    fn num_dof(&self) -> usize {
        NUM_DOF
    }

    fn node_tags(&self) -> [usize; 4] {
        self.node_tags
    }

    fn update(&mut self, disp: &[f64]) -> FEAResult<()> {
        check_disp_len(self.tag, disp, NUM_DOF)?;
        self.trial_disp = Vec10::from_column_slice(disp);
        let u = self.trial_disp;
        let du = u - self.committed_disp;

        let ta = *self.frames[0].advance(du[2]);
        let tb = *self.frames[1].advance(du[5]);
        let [xa0, xb0, xs0] = self.coords;
        let xa = xa0 + Vec2::new(u[0], u[1]);
        let xb = xb0 + Vec2::new(u[3], u[4]);
        let xs = xs0 + Vec2::new(u[SECONDARY], u[SECONDARY + 1]);

        let segment = HermiteSegment::new(xa, xb, ta, tb);
        let projection = segment.project(
            self.committed.xi,
            &xs,
            self.settings.gap_tolerance,
            self.settings.max_projection_iterations,
        );
        self.trial = Kinematics::locate(&projection, &xs, &self.committed.normal, segment.length, self.settings.radius);
        self.trial.lambda = u[LAMBDA];
        if self.flags.in_contact {
            let (_, bs) = self.sensitivities();
            self.trial.slip = bs.dot(&du);
        }

        self.flags.request_release(
            self.trial.lambda,
            self.material.tensile_strength(),
            self.settings.force_tolerance,
        );
        self.material
            .set_trial_strain(self.trial.gap, &Vector1::new(self.trial.slip), self.trial.lambda);
        Ok(())
    }

    fn commit_state(&mut self) {
        let previous = self.flags.state();
        self.flags
            .evaluate(self.trial.xi, self.trial.gap, self.settings.gap_tolerance);
        let state = self.flags.state();
        if state != previous {
            debug!(
                "BeamContact2D {}: {previous:?} -> {state:?} (xi = {:.4}, gap = {:.3e}, lambda = {:.3e})",
                self.tag, self.trial.xi, self.trial.gap, self.trial.lambda
            );
        }

        for frame in &mut self.frames {
            frame.commit();
        }
        self.material.commit_state();
        self.committed = self.trial;
        self.committed_disp = self.trial_disp;
    }

    fn revert_to_last_commit(&mut self) {
        for frame in &mut self.frames {
            frame.revert_to_last_commit();
        }
        self.material.revert_to_last_commit();
        self.trial = self.committed;
        self.trial_disp = self.committed_disp;
        self.flags.request_release(
            self.committed.lambda,
            self.material.tensile_strength(),
            self.settings.force_tolerance,
        );
    }

    fn revert_to_start(&mut self) {
        for frame in &mut self.frames {
            frame.revert_to_start();
        }
        self.material.revert_to_start();
        self.flags = ContactStateFlags::seeded(self.settings.initially_in_contact);
        let initial = Self::initial_kinematics(&self.coords, &self.frames[0].tangent(), &self.settings);
        self.committed = initial;
        self.trial = initial;
        self.committed_disp = Vec10::zeros();
        self.trial_disp = Vec10::zeros();
    }

    fn tangent_stiffness(&self) -> DMatrix<f64> {
        DMatrix::from_column_slice(NUM_DOF, NUM_DOF, self.stiffness().as_slice())
    }

    fn resisting_force(&self) -> DVector<f64> {
        DVector::from_column_slice(self.force().as_slice())
    }

    fn response(&self, response: ResponseType) -> DVector<f64> {
        match response {
            ResponseType::Force => {
                let r = self.force();
                DVector::from_column_slice(&r.as_slice()[SECONDARY..LAMBDA])
            }
            ResponseType::FrictionForce => DVector::from_column_slice(self.friction_force().as_slice()),
            ResponseType::ForceScalar => DVector::from_vec(vec![self.trial.lambda, self.tangential_force()]),
            ResponseType::PrimaryReaction => {
                let r = self.force();
                DVector::from_column_slice(&r.as_slice()[..SECONDARY])
            }
            ResponseType::Slip => DVector::from_vec(vec![self.trial.slip]),
        }
    }

    fn update_parameter(&mut self, id: i32, value: f64) -> FEAResult<()> {
        self.material.update_parameter(id, value)
    }

    fn send_self(&self, stream: &mut FieldStream) {
        stream.push_index(self.tag);
        for tag in self.node_tags {
            stream.push_index(tag);
        }
        self.settings.send_self(stream);
        for x in &self.coords {
            stream.push_smatrix(x);
        }
        for frame in &self.frames {
            frame.send_self(stream);
        }
        self.material.send_self(stream);
        self.flags.send_self(stream);
        self.committed.send_self(stream);
        self.trial.send_self(stream);
        stream.push_smatrix(&self.committed_disp);
        stream.push_smatrix(&self.trial_disp);
    }

    /// Decodes the whole element before replacing it, so a failed
    /// receive leaves `self` untouched
    fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        let tag = stream.pull_index()?;
        let mut node_tags = [0; 4];
        for node in &mut node_tags {
            *node = stream.pull_index()?;
        }
        let settings = ContactSettings::recv_self(stream)?;
        let mut coords = self.coords;
        for x in &mut coords {
            *x = stream.pull_smatrix()?;
        }
        let mut frames = self.frames.clone();
        for frame in &mut frames {
            frame.recv_self(stream)?;
        }
        let mut material = self.material.clone();
        material.recv_self(stream)?;
        let mut flags = self.flags;
        flags.recv_self(stream)?;

        *self = Self {
            tag,
            node_tags,
            settings,
            coords,
            frames,
            material,
            flags,
            committed: Kinematics::recv_self(stream)?,
            trial: Kinematics::recv_self(stream)?,
            committed_disp: stream.pull_smatrix()?,
            trial_disp: stream.pull_smatrix()?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::FrictionParams;
    use approx::assert_relative_eq;

    fn nodes(xs: f64, ys: f64) -> [Node; 4] {
        [
            Node::planar(1, 0.0, 0.0, 3),
            Node::planar(2, 1.0, 0.0, 3),
            Node::planar(3, xs, ys, 2),
            Node::planar(4, xs, ys, 2),
        ]
    }

    fn element(xs: f64, ys: f64, params: FrictionParams, settings: ContactSettings) -> BeamContact2D {
        let n = nodes(xs, ys);
        let material = ContactMaterial2D::new(params).unwrap();
        BeamContact2D::new(1, n.each_ref(), material, settings).unwrap()
    }

    fn pressed(params: FrictionParams) -> BeamContact2D {
        // Section width 0.1 puts the surface at y = 0.05
        element(0.5, 0.05, params, ContactSettings::planar(0.1))
    }

    #[test]
    fn test_straight_beam_projection() {
        let e = element(0.5, 0.1, FrictionParams::coulomb(0.3, 1e3), ContactSettings::planar(0.0));
        assert_relative_eq!(e.xi(), 0.5, epsilon = 1e-10);
        assert_relative_eq!(e.gap(), 0.1, epsilon = 1e-10);
        assert_relative_eq!(*e.normal(), Vec2::new(0.0, 1.0), epsilon = 1e-10);
        assert!(e.projection_converged());
    }

    #[test]
    fn test_wrong_node_dofs() {
        let mut n = nodes(0.5, 0.1);
        n[2] = Node::planar(3, 0.5, 0.1, 3);
        let material = ContactMaterial2D::new(FrictionParams::coulomb(0.3, 1e3)).unwrap();
        assert!(BeamContact2D::new(1, n.each_ref(), material, ContactSettings::default()).is_err());
    }

    #[test]
    fn test_complementarity() {
        let mut e = element(
            0.5,
            0.1,
            FrictionParams::coulomb(0.3, 1e3),
            ContactSettings::planar(0.0).initially_released(),
        );
        let mut disp = [0.0; NUM_DOF];
        disp[LAMBDA] = 0.7;
        e.update(&disp).unwrap();
        assert!(!e.in_contact());
        assert_relative_eq!(e.force()[LAMBDA], 0.7);
        assert_relative_eq!(e.stiffness()[(LAMBDA, LAMBDA)], 1.0);
        assert_relative_eq!(e.force().rows(0, LAMBDA).norm(), 0.0);

        let mut e = pressed(FrictionParams::coulomb(0.3, 1e3));
        disp[SECONDARY + 1] = -0.01;
        e.update(&disp).unwrap();
        assert!(e.in_contact());
        assert_relative_eq!(e.force()[LAMBDA], -e.gap());
        assert_relative_eq!(e.force()[LAMBDA], 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_unused_multiplier_is_driven_to_zero() {
        let mut e = pressed(FrictionParams::coulomb(0.3, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[LAMBDA + 1] = 0.25;
        e.update(&disp).unwrap();
        assert_relative_eq!(e.force()[LAMBDA + 1], 0.25);
        assert_relative_eq!(e.stiffness()[(LAMBDA + 1, LAMBDA + 1)], 1.0);
    }

    #[test]
    fn test_release_on_tension() {
        let params = FrictionParams::new(0.5, 1e3, 1.0, 1.0);
        let mut e = pressed(params);
        let mut disp = [0.0; NUM_DOF];
        disp[LAMBDA] = -2.0;
        e.update(&disp).unwrap();
        assert_eq!(e.state(), ContactState::PendingRelease);
        e.commit_state();
        assert!(!e.in_contact());
        assert_eq!(e.state(), ContactState::Released);
    }

    #[test]
    fn test_sticking_stiffness() {
        let mut e = pressed(FrictionParams::coulomb(0.5, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[SECONDARY] = 1e-4;
        disp[LAMBDA] = 10.0;
        e.update(&disp).unwrap();
        assert!(!e.material().in_slip());
        assert_relative_eq!(e.slip(), 1e-4, epsilon = 1e-14);
        assert_relative_eq!(e.stiffness()[(SECONDARY, SECONDARY)], 1e3, epsilon = 1e-9);
        assert_relative_eq!(e.force()[SECONDARY], 0.1, epsilon = 1e-10);
    }

    #[test]
    fn test_gap_sensitivity_matches_finite_differences() {
        let mut e = element(0.4, 0.08, FrictionParams::coulomb(0.3, 1e3), ContactSettings::planar(0.02));
        let base = [0.0; NUM_DOF];
        e.update(&base).unwrap();
        let (bn, _) = e.sensitivities();

        let h = 1e-6;
        for j in 0..LAMBDA {
            let mut plus = base;
            plus[j] += h;
            e.update(&plus).unwrap();
            let gp = e.gap();
            let mut minus = base;
            minus[j] -= h;
            e.update(&minus).unwrap();
            let gm = e.gap();
            assert_relative_eq!(bn[j], (gp - gm) / (2.0 * h), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rotation_of_end_node_slips_surface() {
        let mut e = pressed(FrictionParams::coulomb(0.5, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[2] = 1e-4;
        e.update(&disp).unwrap();
        // The surface above the axis moves backwards under a positive rotation
        assert_relative_eq!(e.slip(), 0.5 * 0.05 * 1e-4, max_relative = 1e-2);
    }

    #[test]
    fn test_commit_and_revert() {
        let mut e = pressed(FrictionParams::coulomb(0.3, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[SECONDARY] = 0.02;
        disp[LAMBDA] = 5.0;
        e.update(&disp).unwrap();
        e.commit_state();
        let force = e.force();
        let stiffness = e.stiffness();

        disp[SECONDARY] = 0.05;
        disp[2] = 0.01;
        e.update(&disp).unwrap();
        assert!(e.force() != force);
        e.revert_to_last_commit();
        assert_eq!(e.force(), force);
        assert_eq!(e.stiffness(), stiffness);

        e.revert_to_start();
        assert_eq!(e.force(), Vec10::zeros());
        assert_eq!(e.state(), ContactState::InContact);
    }

    #[test]
    fn test_stream_round_trip() {
        let mut e = pressed(FrictionParams::coulomb(0.3, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[SECONDARY] = 0.03;
        disp[LAMBDA] = 4.0;
        e.update(&disp).unwrap();

        let mut stream = FieldStream::new();
        Element::send_self(&e, &mut stream);
        let bytes = stream.to_bytes().unwrap();
        let mut received = FieldStream::from_bytes(&bytes).unwrap();

        let mut copy = element(0.2, 0.3, FrictionParams::coulomb(0.1, 1.0), ContactSettings::default());
        Element::recv_self(&mut copy, &mut received).unwrap();
        assert_relative_eq!(copy.force(), e.force(), epsilon = 1e-12);
        assert_relative_eq!(copy.stiffness(), e.stiffness(), epsilon = 1e-9);
        assert_eq!(copy.state(), e.state());
    }

    #[test]
    fn test_truncated_stream_leaves_element_unchanged() {
        let mut e = element(0.5, 0.1, FrictionParams::coulomb(0.3, 1e3), ContactSettings::planar(0.0));
        let force = e.force();

        // Header and settings of another element, then nothing
        let mut stream = FieldStream::new();
        stream.push_index(7);
        for tag in [11, 12, 13, 14] {
            stream.push_index(tag);
        }
        ContactSettings::planar(0.6).send_self(&mut stream);

        let result = Element::recv_self(&mut e, &mut stream);
        assert!(matches!(result, Err(FEAError::Channel { .. })));
        assert_eq!(e.tag(), 1);
        assert_eq!(e.node_tags(), [1, 2, 3, 4]);
        assert_relative_eq!(e.settings().radius, 0.0);
        assert_relative_eq!(e.force(), force);
    }

    #[test]
    fn test_responses() {
        let mut e = pressed(FrictionParams::coulomb(0.3, 1e3));
        let mut disp = [0.0; NUM_DOF];
        disp[SECONDARY] = 0.05;
        disp[LAMBDA] = 10.0;
        e.update(&disp).unwrap();
        assert!(e.material().in_slip());

        let scalars = e.response(ResponseType::ForceScalar);
        assert_relative_eq!(scalars[0], 10.0);
        assert_relative_eq!(scalars[1], 3.0, epsilon = 1e-10);
        let friction = e.response(ResponseType::FrictionForce);
        assert_relative_eq!(friction[0], 3.0, epsilon = 1e-10);
        let force = e.response(ResponseType::Force);
        assert_relative_eq!(force[1], -10.0, epsilon = 1e-10);
        assert_eq!(e.response(ResponseType::PrimaryReaction).len(), 6);
        assert_relative_eq!(e.response(ResponseType::Slip)[0], 0.05, epsilon = 1e-12);
        assert!(e.summary().in_slip);
    }
}
