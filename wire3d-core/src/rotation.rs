/// Rotation matrices and accumulated rotation state
use nalgebra::{Matrix3, Point3};
use std::f32::consts::TAU;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Advance all three angles by `step`, wrapping each into [0, 2π)
    pub fn advance(&mut self, step: f32) {
        self.rotate(step, step, step);
        self.x = self.x.rem_euclid(TAU);
        self.y = self.y.rem_euclid(TAU);
        self.z = self.z.rem_euclid(TAU);
    }

    /// Combined rotation matrix: X first, then Y, then Z
    pub fn matrix(&self) -> Matrix3<f32> {
        rotation_z(self.z) * rotation_y(self.y) * rotation_x(self.x)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

#[rustfmt::skip]
pub fn rotation_x(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

#[rustfmt::skip]
pub fn rotation_y(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

#[rustfmt::skip]
pub fn rotation_z(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Rotate every point about the origin, applying X, then Y, then Z.
///
/// The order matters: rotations do not commute, so swapping it changes
/// the tumbling motion.
pub fn compose_rotation(points: &[Point3<f32>], ax: f32, ay: f32, az: f32) -> Vec<Point3<f32>> {
    let rotation = RotationState::new(ax, ay, az).matrix();
    points.iter().map(|p| Point3::from(rotation * p.coords)).collect()
}
