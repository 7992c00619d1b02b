//! Reference whole-body model: a serial floating-base chain.
//!
//! [`ChainModel`] implements [`WholeBodyModel`] for a single serial chain
//! described by a [`ModelConfig`] joint table. Kinematics compose each
//! joint's static origin with its axis motion; dynamics use a point-mass
//! composite (each link's mass concentrated at its frame origin), which
//! keeps the mass matrix symmetric positive semi-definite by construction.
//! Bias forces cover the gravity term only.
//!
//! Frame names are `"base"` plus one child frame per joint, named after
//! the joint.

use nalgebra::{
    DMatrix, Isometry3, Matrix3, Translation3, UnitQuaternion, UnitVector3, Vector3,
};

use marionette_core::{JointConfig, ModelConfig};

use crate::error::ModelError;
use crate::model::{BASE_DOF, POSE_DIM, WholeBodyModel};

/// Gravitational acceleration in the base frame, m/s^2.
const GRAVITY: Vector3<f64> = Vector3::new(0.0, 0.0, -9.81);

// ---------------------------------------------------------------------------
// ChainJoint
// ---------------------------------------------------------------------------

/// One actuated joint resolved from its [`JointConfig`].
#[derive(Debug, Clone)]
struct ChainJoint {
    name: String,
    /// Static transform from the parent frame to this joint frame.
    origin: Isometry3<f64>,
    /// Joint axis in the joint's local frame.
    axis: UnitVector3<f64>,
    prismatic: bool,
    lower: f64,
    upper: f64,
    /// Mass of the child link, concentrated at the child frame origin.
    mass: f64,
}

impl ChainJoint {
    fn from_config(config: &JointConfig) -> Self {
        let axis = Vector3::new(config.axis[0], config.axis[1], config.axis[2]);
        Self {
            name: config.name.clone(),
            origin: origin_isometry(config.origin_xyz, config.origin_rpy),
            axis: UnitVector3::new_normalize(axis),
            prismatic: config.prismatic,
            lower: config.lower,
            upper: config.upper,
            mass: config.mass,
        }
    }
}

// ---------------------------------------------------------------------------
// ChainModel
// ---------------------------------------------------------------------------

/// Serial floating-base chain implementing the whole-body query interface.
pub struct ChainModel {
    name: String,
    base_mass: f64,
    joints: Vec<ChainJoint>,
    /// Parameters the model was last initialised from; `initialise(None)`
    /// refreshes from these.
    config: ModelConfig,
}

impl ChainModel {
    /// Build a chain model from a validated configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        config
            .validate()
            .map_err(|e| ModelError::InitialisationFailed(e.to_string()))?;
        Ok(Self {
            name: config.name.clone(),
            base_mass: config.base_mass,
            joints: config.joints.iter().map(ChainJoint::from_config).collect(),
            config: config.clone(),
        })
    }

    /// Resolve a frame name: `None` is the base frame, `Some(i)` the child
    /// frame of joint `i`.
    fn frame_index(&self, name: &str) -> Result<Option<usize>, ModelError> {
        if name == "base" {
            return Ok(None);
        }
        self.joints
            .iter()
            .position(|j| j.name == name)
            .map(Some)
            .ok_or_else(|| ModelError::UnknownFrame(name.to_owned()))
    }

    fn check_len(&self, what: &'static str, expected: usize, got: usize) -> Result<(), ModelError> {
        if got == expected {
            Ok(())
        } else {
            Err(ModelError::ShapeMismatch {
                what,
                expected,
                got,
            })
        }
    }

    /// Walk the chain at configuration `q`, collecting each joint's origin
    /// and axis in the base frame (before that joint's own motion) and the
    /// pose reached after each joint.
    fn joint_frames(&self, q: &[f64]) -> (Vec<Vector3<f64>>, Vec<Vector3<f64>>, Vec<Isometry3<f64>>) {
        let n = self.joints.len();
        let mut origins = Vec::with_capacity(n);
        let mut axes = Vec::with_capacity(n);
        let mut poses = Vec::with_capacity(n);

        let mut transform = Isometry3::identity();
        for (joint, &position) in self.joints.iter().zip(q.iter()) {
            transform *= joint.origin;
            origins.push(transform.translation.vector);
            axes.push(transform.rotation * joint.axis.into_inner());
            transform *= joint_motion(&joint.axis, joint.prismatic, position);
            poses.push(transform);
        }
        (origins, axes, poses)
    }

    /// Pose of a frame in the base frame.
    fn frame_pose(&self, frame: Option<usize>, q: &[f64]) -> Isometry3<f64> {
        match frame {
            None => Isometry3::identity(),
            Some(k) => {
                let (_, _, poses) = self.joint_frames(q);
                poses[k]
            }
        }
    }

    /// Geometric Jacobian of a frame, `6 x (6 + dof)`, linear rows first.
    ///
    /// Column layout: 3 base translation columns, 3 base rotation columns,
    /// then one column per joint (zero for joints past the target frame).
    fn frame_jacobian(&self, frame: Option<usize>, q: &[f64]) -> DMatrix<f64> {
        let dof = self.joints.len();
        let (origins, axes, poses) = self.joint_frames(q);
        let p = match frame {
            None => Vector3::zeros(),
            Some(k) => poses[k].translation.vector,
        };

        let mut j = DMatrix::zeros(BASE_DOF, BASE_DOF + dof);

        // Base translation: v = v_base.
        for a in 0..3 {
            j[(a, a)] = 1.0;
        }
        // Base rotation: v = omega x p, omega passes through.
        for a in 0..3 {
            let e = unit_axis(a);
            let lin = e.cross(&p);
            for r in 0..3 {
                j[(r, 3 + a)] = lin[r];
            }
            j[(3 + a, 3 + a)] = 1.0;
        }
        // Joint columns up to and including the target frame's joint.
        let last = match frame {
            None => 0,
            Some(k) => k + 1,
        };
        for i in 0..last {
            let col = BASE_DOF + i;
            if self.joints[i].prismatic {
                for r in 0..3 {
                    j[(r, col)] = axes[i][r];
                }
            } else {
                let lin = axes[i].cross(&(p - origins[i]));
                for r in 0..3 {
                    j[(r, col)] = lin[r];
                    j[(3 + r, col)] = axes[i][r];
                }
            }
        }
        j
    }
}

impl WholeBodyModel for ChainModel {
    fn dof(&self) -> usize {
        self.joints.len()
    }

    fn has_frame(&self, name: &str) -> bool {
        self.frame_index(name).is_ok()
    }

    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> Result<(), ModelError> {
        let dof = self.joints.len();
        self.check_len("lower limit buffer", dof, lower.len())?;
        self.check_len("upper limit buffer", dof, upper.len())?;
        for (i, joint) in self.joints.iter().enumerate() {
            lower[i] = joint.lower;
            upper[i] = joint.upper;
        }
        Ok(())
    }

    fn jacobian(&self, frame: &str, q: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        let dof = self.joints.len();
        let frame = self.frame_index(frame)?;
        self.check_len("joint configuration", dof, q.len())?;
        self.check_len("jacobian buffer", BASE_DOF * (BASE_DOF + dof), out.len())?;

        let j = self.frame_jacobian(frame, q);
        let cols = BASE_DOF + dof;
        for r in 0..BASE_DOF {
            for c in 0..cols {
                out[r * cols + c] = j[(r, c)];
            }
        }
        Ok(())
    }

    fn mass_matrix(&self, q: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        let dof = self.joints.len();
        let n = BASE_DOF + dof;
        self.check_len("joint configuration", dof, q.len())?;
        self.check_len("mass matrix buffer", n * n, out.len())?;

        // Point-mass composite: M = sum_i m_i J_v_i^T J_v_i, with the base
        // link's mass at the base origin. Each term is a Gram matrix, so
        // the sum is symmetric PSD by construction.
        let mut m = DMatrix::zeros(n, n);
        for a in 0..3 {
            m[(a, a)] = self.base_mass;
        }
        for (i, joint) in self.joints.iter().enumerate() {
            if joint.mass == 0.0 {
                continue;
            }
            let j = self.frame_jacobian(Some(i), q);
            let jv = j.rows(0, 3);
            m += joint.mass * jv.transpose() * jv;
        }
        for r in 0..n {
            for c in 0..n {
                out[r * n + c] = m[(r, c)];
            }
        }
        Ok(())
    }

    fn forward_kinematics(
        &self,
        frame: &str,
        q: &[f64],
        out: &mut [f64],
    ) -> Result<(), ModelError> {
        let frame = self.frame_index(frame)?;
        self.check_len("joint configuration", self.joints.len(), q.len())?;
        self.check_len("pose buffer", POSE_DIM, out.len())?;

        let pose = self.frame_pose(frame, q);
        let t = pose.translation.vector;
        let rot = pose.rotation;
        out[0] = t.x;
        out[1] = t.y;
        out[2] = t.z;
        out[3] = rot.w;
        out[4] = rot.i;
        out[5] = rot.j;
        out[6] = rot.k;
        Ok(())
    }

    fn bias_forces(&self, q: &[f64], dq: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        let dof = self.joints.len();
        let n = BASE_DOF + dof;
        self.check_len("joint configuration", dof, q.len())?;
        self.check_len("joint velocity", dof, dq.len())?;
        self.check_len("bias force buffer", n, out.len())?;

        // Gravity term only: h = -sum_i m_i J_v_i^T g. The base link's
        // point mass contributes through the identity translation block.
        out.fill(0.0);
        for a in 0..3 {
            out[a] = -self.base_mass * GRAVITY[a];
        }
        for (i, joint) in self.joints.iter().enumerate() {
            if joint.mass == 0.0 {
                continue;
            }
            let j = self.frame_jacobian(Some(i), q);
            let weight = joint.mass * GRAVITY;
            for c in 0..n {
                let jv_col = Vector3::new(j[(0, c)], j[(1, c)], j[(2, c)]);
                out[c] -= jv_col.dot(&weight);
            }
        }
        Ok(())
    }

    fn initialise(&mut self, config: Option<&ModelConfig>) -> Result<(), ModelError> {
        let config = match config {
            Some(c) => c.clone(),
            None => self.config.clone(),
        };
        let rebuilt = Self::from_config(&config)?;
        *self = rebuilt;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert an origin (xyz + rpy) to an isometry.
fn origin_isometry(xyz: [f64; 3], rpy: [f64; 3]) -> Isometry3<f64> {
    let translation = Translation3::new(xyz[0], xyz[1], xyz[2]);
    let rotation =
        UnitQuaternion::from_matrix(&rotation_matrix_from_rpy(rpy[0], rpy[1], rpy[2]));
    Isometry3::from_parts(translation, rotation)
}

/// Build a rotation matrix from roll-pitch-yaw (extrinsic ZYX).
fn rotation_matrix_from_rpy(roll: f64, pitch: f64, yaw: f64) -> Matrix3<f64> {
    let (sr, cr) = roll.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();

    Matrix3::new(
        cy * cp,
        cy * sp * sr - sy * cr,
        cy * sp * cr + sy * sr,
        sy * cp,
        sy * sp * sr + cy * cr,
        sy * sp * cr - cy * sr,
        -sp,
        cp * sr,
        cp * cr,
    )
}

/// Transform of a single joint at a given position.
fn joint_motion(axis: &UnitVector3<f64>, prismatic: bool, position: f64) -> Isometry3<f64> {
    if prismatic {
        Isometry3::from_parts(
            Translation3::from(axis.into_inner() * position),
            UnitQuaternion::identity(),
        )
    } else {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(axis, position),
        )
    }
}

const fn unit_axis(a: usize) -> Vector3<f64> {
    match a {
        0 => Vector3::new(1.0, 0.0, 0.0),
        1 => Vector3::new(0.0, 1.0, 0.0),
        _ => Vector3::new(0.0, 0.0, 1.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
