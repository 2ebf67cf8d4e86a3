/// Per-frame vertex transformation
use nalgebra::Point3;

use crate::projection::{Camera, ProjectionMode};
use crate::rotation::RotationState;

/// Where rotation pivots and whether the camera offset is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    /// Rotate about the shape center, then subtract the camera position
    CameraRelative,
    /// Rotate about the world origin with no camera
    OriginPivot,
}

impl From<ProjectionMode> for TransformMode {
    fn from(mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Perspective => TransformMode::CameraRelative,
            ProjectionMode::Orthographic => TransformMode::OriginPivot,
        }
    }
}

/// Snapshot of everything needed to transform a mesh for one frame.
///
/// Always starts from the mesh's original vertices; nothing is written
/// back, so repeated calls with the same snapshot give the same output.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub mode: TransformMode,
    pub rotation: RotationState,
    pub camera: Camera,
}

impl Transform {
    pub fn new(mode: TransformMode, rotation: RotationState, camera: Camera) -> Self {
        Self {
            mode,
            rotation,
            camera,
        }
    }

    pub fn apply(&self, vertices: &[Point3<f32>], center: &Point3<f32>) -> Vec<Point3<f32>> {
        let rotation = self.rotation.matrix();
        match self.mode {
            TransformMode::CameraRelative => vertices
                .iter()
                .map(|v| {
                    let world = center + rotation * (v - center);
                    Point3::from(world - self.camera.position)
                })
                .collect(),
            TransformMode::OriginPivot => vertices
                .iter()
                .map(|v| Point3::from(rotation * v.coords))
                .collect(),
        }
    }
}
