//! Math utilities and types
//!
//! Provides the vector, quaternion and transform types used by the scene
//! model and the proxy builder.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform from all three components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.to_matrix().transform_point(point)
    }

    /// Apply this transform to a vector
    pub fn transform_vector(&self, vector: &Vec3) -> Vec3 {
        self.to_matrix().transform_vector(vector)
    }

    /// Map a world-space point into this transform's local frame
    pub fn inverse_transform_point(&self, point: &Point3) -> Point3 {
        let unrotated = self.rotation.inverse() * (point.coords - self.position);
        Point3::from(unrotated.component_div(&self.scale))
    }

    /// Combine this transform with another
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Self {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position.component_mul(&inv_scale));

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Rotation expressed as XYZ Euler angles
    pub fn euler(&self) -> EulerXyz {
        EulerXyz::from_rotation(&self.rotation)
    }
}

/// Euler angles in radians, applied X first, then Y, then Z
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerXyz {
    /// Rotation about X
    pub x: f32,
    /// Rotation about Y
    pub y: f32,
    /// Rotation about Z
    pub z: f32,
}

impl EulerXyz {
    /// Create from the three angles
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Decompose a rotation into XYZ Euler angles
    pub fn from_rotation(rotation: &Quat) -> Self {
        let (x, y, z) = rotation.euler_angles();
        Self { x, y, z }
    }

    /// Rebuild the rotation these angles describe
    pub fn to_rotation(self) -> Quat {
        Quat::from_euler_angles(self.x, self.y, self.z)
    }

    /// Angles as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for EulerXyz {
    fn from(angles: [f32; 3]) -> Self {
        Self::new(angles[0], angles[1], angles[2])
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    use super::{constants::HALF_PI, Quat, Vec3};

    /// Quarter turn about the X axis
    pub fn quarter_turn_x() -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), HALF_PI)
    }

    /// Quarter turn about the Y axis
    pub fn quarter_turn_y() -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI)
    }

    /// Component-wise absolute value
    pub fn abs(v: &Vec3) -> Vec3 {
        v.map(f32::abs)
    }
}
