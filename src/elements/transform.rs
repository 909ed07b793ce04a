//! Coordinate transformation - initial local axes of a spatial beam

use serde::{Deserialize, Serialize};

use crate::channel::FieldStream;
use crate::error::{FEAError, FEAResult};
use crate::math::{Mat3, Vec3};

/// How the local y/z axes of a beam are oriented
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    /// Local xz plane contains the given vector
    VecXZ([f64; 3]),
    /// Default orientation rotated about the beam axis (radians)
    ///
    /// Vertical members get y in the global XY plane and z along global Z;
    /// horizontal members get y along global Y; inclined members get a
    /// horizontal z axis.
    Roll(f64),
}

/// Initial local basis of a beam axis, copied into each element that uses it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordTransform {
    pub tag: usize,
    pub orientation: Orientation,
}

impl CoordTransform {
    /// Transformation whose local xz plane contains `vec_xz`
    pub fn new(tag: usize, vec_xz: [f64; 3]) -> Self {
        Self {
            tag,
            orientation: Orientation::VecXZ(vec_xz),
        }
    }

    /// Default orientation with a roll about the beam axis
    pub fn with_roll(tag: usize, rotation: f64) -> Self {
        Self {
            tag,
            orientation: Orientation::Roll(rotation),
        }
    }

    /// Local axes of the beam from `i_node` to `j_node`
    ///
    /// Returns the rotation whose columns are the local x (along the beam),
    /// y and z axes in global coordinates.
    pub fn local_axes(&self, i_node: &Vec3, j_node: &Vec3) -> FEAResult<Mat3> {
        let axis = j_node - i_node;
        let length = axis.norm();
        if length < 1e-10 {
            return Err(FEAError::InvalidGeometry(format!(
                "transformation {}: beam has zero length",
                self.tag
            )));
        }
        let x = axis / length;

        let (y, z) = match self.orientation {
            Orientation::VecXZ(v) => {
                let v = Vec3::from(v);
                let y = v.cross(&x);
                let y_len = y.norm();
                if y_len < 1e-10 * v.norm().max(1.0) {
                    return Err(FEAError::InvalidGeometry(format!(
                        "transformation {}: vecxz is parallel to the beam axis",
                        self.tag
                    )));
                }
                let y = y / y_len;
                (y, x.cross(&y))
            }
            Orientation::Roll(rotation) => {
                let (y, z) = default_axes(&x);
                if rotation.abs() > 1e-10 {
                    let (s, c) = rotation.sin_cos();
                    (y * c + z * s, z * c - y * s)
                } else {
                    (y, z)
                }
            }
        };

        Ok(Mat3::from_columns(&[x, y, z]))
    }

    pub(crate) fn send_self(&self, stream: &mut FieldStream) {
        stream.push_index(self.tag);
        match self.orientation {
            Orientation::VecXZ(v) => {
                stream.push_flag(true);
                stream.push_vector(&v);
            }
            Orientation::Roll(rotation) => {
                stream.push_flag(false);
                stream.push_scalar(rotation);
            }
        }
    }

    pub(crate) fn recv_self(stream: &mut FieldStream) -> FEAResult<Self> {
        let tag = stream.pull_index()?;
        let orientation = if stream.pull_flag()? {
            let v = stream.pull_vector(3)?;
            Orientation::VecXZ([v[0], v[1], v[2]])
        } else {
            Orientation::Roll(stream.pull_scalar()?)
        };
        Ok(Self { tag, orientation })
    }
}

fn default_axes(x: &Vec3) -> (Vec3, Vec3) {
    if x.x.abs() < 1e-10 && x.z.abs() < 1e-10 {
        // Vertical member: y in XY plane, z parallel to global Z
        if x.y > 0.0 {
            (-Vec3::x(), Vec3::z())
        } else {
            (Vec3::x(), Vec3::z())
        }
    } else if x.y.abs() < 1e-10 {
        // Horizontal member: y = global Y, z = x cross y
        let y = Vec3::y();
        (y, x.cross(&y).normalize())
    } else {
        // Inclined member: z horizontal, perpendicular to x
        let proj = Vec3::new(x.x, 0.0, x.z);
        let z = if x.y > 0.0 { proj.cross(x) } else { x.cross(&proj) }.normalize();
        (z.cross(x).normalize(), z)
    }
}
