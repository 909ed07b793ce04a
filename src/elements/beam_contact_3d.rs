//! Spatial beam-to-node contact element
//!
//! Couples a 3-D beam segment with end nodes `a`, `b` (`ux uy uz rx ry rz`)
//! to a secondary node `s` (`ux uy uz`). The beam surface is a tube of the
//! given radius around the centerline; slip is measured in the curvilinear
//! coordinates of that surface at the projection point.
//!
//! ```text
//! DOF   0 .. 5 | 6 .. 11 | 12 13 14 | 15 16 17
//! node  a      | b       | s        | l
//! ```

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::node::{check_dofs, gather_displacements, Node};
use super::transform::CoordTransform;
use super::{check_disp_len, Element};
use crate::analysis::ContactSettings;
use crate::channel::FieldStream;
use crate::contact::{build_metric, BeamEndFrame, ContactState, ContactStateFlags, HermiteSegment, Projection};
use crate::error::{FEAError, FEAResult};
use crate::materials::ContactMaterial3D;
use crate::math::{HermiteBasis, Mat18, Mat2, Mat3, Vec18, Vec2, Vec3};
use crate::results::{ContactSummary, ResponseType};

const NUM_DOF: usize = 18;
const NODE_B: usize = 6;
const SECONDARY: usize = 12;
const LAMBDA: usize = 15;
const NODE_DOFS: [usize; 4] = [6, 6, 3, 3];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Kinematics {
    xi: f64,
    length: f64,
    normal: Vec3,
    gap: f64,
    slip: Vec2,
    lambda: f64,
    converged: bool,
    /// Contravariant surface basis `g^1`, `g^2`
    dual_basis: [Vec3; 2],
    covariant: Mat2,
    contravariant: Mat2,
}

impl Kinematics {
    fn send_self(&self, stream: &mut FieldStream) {
        stream.push_scalar(self.xi);
        stream.push_scalar(self.length);
        stream.push_smatrix(&self.normal);
        stream.push_scalar(self.gap);
        stream.push_smatrix(&self.slip);
        stream.push_scalar(self.lambda);
        stream.push_flag(self.converged);
        for g in &self.dual_basis {
            stream.push_smatrix(g);
        }
        stream.push_smatrix(&self.covariant);
        stream.push_smatrix(&self.contravariant);
    }

    fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        Ok(Self {
            xi: stream.pull_scalar()?,
            length: stream.pull_scalar()?,
            normal: stream.pull_smatrix()?,
            gap: stream.pull_scalar()?,
            slip: stream.pull_smatrix()?,
            lambda: stream.pull_scalar()?,
            converged: stream.pull_flag()?,
            dual_basis: [stream.pull_smatrix()?, stream.pull_smatrix()?],
            covariant: stream.pull_smatrix()?,
            contravariant: stream.pull_smatrix()?,
        })
    }
}

/// Spatial beam contact element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamContact3D {
    tag: usize,
    node_tags: [usize; 4],
    settings: ContactSettings,
    transform: CoordTransform,
    /// Initial coordinates of `a`, `b` and `s`
    coords: [Vec3; 3],
    frames: [BeamEndFrame; 2],
    material: ContactMaterial3D,
    flags: ContactStateFlags,
    committed: Kinematics,
    trial: Kinematics,
    committed_disp: Vec18,
    trial_disp: Vec18,
}

fn vec3(v: &Vec18, at: usize) -> Vec3 {
    Vec3::new(v[at], v[at + 1], v[at + 2])
}

fn set3(v: &mut Vec18, at: usize, w: &Vec3) {
    v[at] = w.x;
    v[at + 1] = w.y;
    v[at + 2] = w.z;
}

impl BeamContact3D {
    /// Create an element from nodes `[a, b, s, l]`
    ///
    /// Both end frames start from the local axes given by `transform`.
    pub fn new(
        tag: usize,
        nodes: [&Node; 4],
        transform: CoordTransform,
        material: ContactMaterial3D,
        settings: ContactSettings,
    ) -> FEAResult<Self> {
        settings.validate()?;
        check_dofs("BeamContact3D", &nodes, &NODE_DOFS)?;

        let coords = [nodes[0].coords_3d(), nodes[1].coords_3d(), nodes[2].coords_3d()];
        let q0 = transform.local_axes(&coords[0], &coords[1])?;
        let initial = Self::initial_kinematics(&coords, &q0, &settings)
            .map_err(|e| FEAError::InvalidGeometry(format!("element {tag}: {e}")))?;

        let mut material = material;
        material.set_metric(initial.covariant, initial.contravariant);

        let element = Self {
            tag,
            node_tags: nodes.map(|n| n.tag),
            settings,
            transform,
            coords,
            frames: [BeamEndFrame::new(q0), BeamEndFrame::new(q0)],
            material,
            flags: ContactStateFlags::seeded(settings.initially_in_contact),
            committed: initial,
            trial: initial,
            committed_disp: Vec18::zeros(),
            trial_disp: Vec18::zeros(),
        };
        debug!(
            "BeamContact3D {tag}: xi = {:.4}, gap = {:.3e}, {:?}",
            initial.xi,
            initial.gap,
            element.state()
        );
        Ok(element)
    }

    fn initial_kinematics(coords: &[Vec3; 3], q0: &Mat3, settings: &ContactSettings) -> FEAResult<Kinematics> {
        let [xa, xb, xs] = coords;
        let t0: Vec3 = q0.column(0).into_owned();
        let segment = HermiteSegment::new(*xa, *xb, t0, t0);
        let projection = segment.project(
            segment.chord_parameter(xs),
            xs,
            settings.gap_tolerance,
            settings.max_projection_iterations,
        );
        let fallback: Vec3 = q0.column(1).into_owned();
        let normal = projection.normal.unwrap_or(fallback);
        let metric = build_metric(&projection, &normal, q0, q0, settings.radius)?;
        Ok(Kinematics {
            xi: projection.xi,
            length: segment.length,
            normal,
            gap: normal.dot(&(xs - projection.point)) - settings.radius,
            slip: Vec2::zeros(),
            lambda: 0.0,
            converged: projection.converged,
            dual_basis: metric.dual_basis(),
            covariant: metric.covariant,
            contravariant: metric.contravariant,
        })
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

    /// Contact point, normal and surface metric at the trial configuration
    ///
    /// A degenerate metric keeps the committed metric in the material and
    /// drops the slip coupling for this configuration.
    fn locate(&self, projection: &Projection<3>, target: &Vec3, qa: &Mat3, qb: &Mat3, length: f64) -> Kinematics {
        let normal = projection.normal.unwrap_or(self.committed.normal);
        let mut kinematics = Kinematics {
            xi: projection.xi,
            length,
            normal,
            gap: normal.dot(&(target - projection.point)) - self.settings.radius,
            slip: Vec2::zeros(),
            lambda: 0.0,
            converged: projection.converged,
            dual_basis: [Vec3::zeros(); 2],
            covariant: self.committed.covariant,
            contravariant: self.committed.contravariant,
        };
        match build_metric(projection, &normal, qa, qb, self.settings.radius) {
            Ok(metric) => {
                kinematics.dual_basis = metric.dual_basis();
                kinematics.covariant = metric.covariant;
                kinematics.contravariant = metric.contravariant;
            }
            Err(e) => warn!("BeamContact3D {}: {e}, slip is not measured at xi = {:.6}", self.tag, projection.xi),
        }
        kinematics
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

    pub fn normal(&self) -> &Vec3 {
        &self.trial.normal
    }

    pub fn lambda(&self) -> f64 {
        self.trial.lambda
    }

    /// Contravariant slip components since the last committed state
    pub fn slip(&self) -> &Vec2 {
        &self.trial.slip
    }

    pub fn projection_converged(&self) -> bool {
        self.trial.converged
    }

    /// Contravariant surface basis at the trial contact point
    pub fn dual_basis(&self) -> &[Vec3; 2] {
        &self.trial.dual_basis
    }

    /// Current frames of the two beam end nodes
    pub fn end_frames(&self) -> [&Mat3; 2] {
        [self.frames[0].frame(), self.frames[1].frame()]
    }

    pub fn material(&self) -> &ContactMaterial3D {
        &self.material
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    pub fn transform(&self) -> &CoordTransform {
        &self.transform
    }

    /// Gap sensitivity `Bn` at the trial configuration
    pub fn normal_sensitivity(&self) -> Vec18 {
        let k = &self.trial;
        let [h1, h2, h3, h4] = HermiteBasis::at(k.xi).h;
        let ta = self.frames[0].tangent();
        let tb = self.frames[1].tangent();
        let n = k.normal;
        let l = k.length;

        let mut bn = Vec18::zeros();
        set3(&mut bn, 0, &(n * -h1));
        set3(&mut bn, 3, &(ta.cross(&n) * (-h2 * l)));
        set3(&mut bn, NODE_B, &(n * -h3));
        set3(&mut bn, NODE_B + 3, &(tb.cross(&n) * (-h4 * l)));
        set3(&mut bn, SECONDARY, &n);
        bn
    }

    /// Slip sensitivities `Bs`, one row per contravariant slip component
    ///
    /// The radial offset `r n` turns with the rotation interpolated linearly
    /// between the end nodes.
    pub fn slip_sensitivity(&self) -> [Vec18; 2] {
        let k = &self.trial;
        let [h1, h2, h3, h4] = HermiteBasis::at(k.xi).h;
        let ta = self.frames[0].tangent();
        let tb = self.frames[1].tangent();
        let offset = k.normal * self.settings.radius;
        let l = k.length;

        k.dual_basis.map(|g| {
            let mut row = Vec18::zeros();
            set3(&mut row, 0, &(g * -h1));
            set3(
                &mut row,
                3,
                &(ta.cross(&g) * (-h2 * l) - offset.cross(&g) * (1.0 - k.xi)),
            );
            set3(&mut row, NODE_B, &(g * -h3));
            set3(&mut row, NODE_B + 3, &(tb.cross(&g) * (-h4 * l) - offset.cross(&g) * k.xi));
            set3(&mut row, SECONDARY, &g);
            row
        })
    }

    /// Covariant tangential force components, zero while out of contact
    pub fn tangential_force(&self) -> Vec2 {
        if self.flags.in_contact {
            self.material.stress().tangential
        } else {
            Vec2::zeros()
        }
    }

    /// Friction force on the secondary node in global coordinates
    pub fn friction_force(&self) -> Vec3 {
        let t = self.tangential_force();
        let [g1, g2] = &self.trial.dual_basis;
        g1 * t[0] + g2 * t[1]
    }

    /// Tangent stiffness at the trial state
    pub fn stiffness(&self) -> Mat18 {
        let mut k = Mat18::zeros();
        if self.flags.in_contact {
            let bn = self.normal_sensitivity();
            let bs = self.slip_sensitivity();
            let tangent = self.material.tangent();
            let mut column = -bn;
            for a in 0..2 {
                column += bs[a] * tangent.coupling[a];
                for b in 0..2 {
                    k += bs[a] * bs[b].transpose() * tangent.shear[(a, b)];
                }
            }
            for i in 0..LAMBDA {
                k[(i, LAMBDA)] = column[i];
                k[(LAMBDA, i)] = -bn[i];
            }
        } else {
            k[(LAMBDA, LAMBDA)] = 1.0;
        }
        for i in LAMBDA + 1..NUM_DOF {
            k[(i, i)] = 1.0;
        }
        k
    }

    /// Resisting force at the trial state
    pub fn force(&self) -> Vec18 {
        let mut r = Vec18::zeros();
        if self.flags.in_contact {
            let t = self.material.stress().tangential;
            let [bs1, bs2] = self.slip_sensitivity();
            r = bs1 * t[0] + bs2 * t[1] - self.normal_sensitivity() * self.trial.lambda;
            r[LAMBDA] = -self.trial.gap;
        } else {
            r[LAMBDA] = self.trial.lambda;
        }
        for i in LAMBDA + 1..NUM_DOF {
            r[i] = self.trial_disp[i];
        }
        r
    }

    pub fn summary(&self) -> ContactSummary {
        ContactSummary {
            tag: self.tag,
            state: self.state(),
            xi: self.trial.xi,
            gap: self.trial.gap,
            normal_force: self.trial.lambda,
            friction_force: self.friction_force().norm(),
            in_slip: self.flags.in_contact && self.material.in_slip(),
            projection_converged: self.trial.converged,
        }
    }
}

impl Element for BeamContact3D {
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
        self.trial_disp = Vec18::from_column_slice(disp);
        let u = self.trial_disp;
        let du = u - self.committed_disp;

        let qa = *self.frames[0].advance(&vec3(&du, 3));
        let qb = *self.frames[1].advance(&vec3(&du, NODE_B + 3));
        let [xa0, xb0, xs0] = self.coords;
        let xa = xa0 + vec3(&u, 0);
        let xb = xb0 + vec3(&u, NODE_B);
        let xs = xs0 + vec3(&u, SECONDARY);

        let segment = HermiteSegment::new(xa, xb, qa.column(0).into_owned(), qb.column(0).into_owned());
        let projection = segment.project(
            self.committed.xi,
            &xs,
            self.settings.gap_tolerance,
            self.settings.max_projection_iterations,
        );
        self.trial = self.locate(&projection, &xs, &qa, &qb, segment.length);
        self.trial.lambda = u[LAMBDA];
        if self.flags.in_contact {
            let [bs1, bs2] = self.slip_sensitivity();
            self.trial.slip = Vec2::new(bs1.dot(&du), bs2.dot(&du));
        }

        self.flags.request_release(
            self.trial.lambda,
            self.material.tensile_strength(),
            self.settings.force_tolerance,
        );
        self.material
            .set_metric(self.trial.covariant, self.trial.contravariant);
        self.material
            .set_trial_strain(self.trial.gap, &self.trial.slip, self.trial.lambda);
        Ok(())
    }

    fn commit_state(&mut self) {
        let previous = self.flags.state();
        self.flags
            .evaluate(self.trial.xi, self.trial.gap, self.settings.gap_tolerance);
        let state = self.flags.state();
        if state != previous {
            debug!(
                "BeamContact3D {}: {previous:?} -> {state:?} (xi = {:.4}, gap = {:.3e}, lambda = {:.3e})",
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
        self.material
            .set_metric(self.committed.covariant, self.committed.contravariant);
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
        match Self::initial_kinematics(&self.coords, self.frames[0].frame(), &self.settings) {
            Ok(initial) => {
                self.committed = initial;
                self.trial = initial;
            }
            Err(e) => warn!("BeamContact3D {}: {e} while resetting", self.tag),
        }
        self.material
            .set_metric(self.committed.covariant, self.committed.contravariant);
        self.committed_disp = Vec18::zeros();
        self.trial_disp = Vec18::zeros();
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
            ResponseType::ForceScalar => {
                let t = self.tangential_force();
                DVector::from_vec(vec![self.trial.lambda, t[0], t[1]])
            }
            ResponseType::PrimaryReaction => {
                let r = self.force();
                DVector::from_column_slice(&r.as_slice()[..SECONDARY])
            }
            ResponseType::Slip => DVector::from_column_slice(self.trial.slip.as_slice()),
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
        self.transform.send_self(stream);
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

    fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        let tag = stream.pull_index()?;
        let mut node_tags = [0; 4];
        for node in &mut node_tags {
            *node = stream.pull_index()?;
        }
        let settings = ContactSettings::recv_self(stream)?;
        let transform = CoordTransform::recv_self(stream)?;
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
            transform,
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
