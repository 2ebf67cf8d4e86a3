/// Wire3D Core Library - wireframe geometry, transforms and projection
///
/// Procedural meshes for the cube, sphere and pyramid primitives, per-frame
/// rotation, perspective and orthographic projection, and a frame loop that
/// drives any display surface implementing `DisplaySurface`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod rotation;
pub mod scene;
pub mod shape;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::{CubeConfig, PyramidConfig, SceneConfig, SphereConfig};
pub use error::{Error, Result};
pub use geometry::{Edge, Mesh};
pub use projection::{
    Camera, OrthographicProjector, PerspectiveProjector, ProjectionMode, Projector, RenderContext,
};
pub use rotation::{compose_rotation, rotation_x, rotation_y, rotation_z, RotationState};
pub use scene::{FrameLoop, FrameStats, Scene};
pub use shape::{ScreenAnchor, Shape, ShapeKind};
pub use surface::{Color, DisplaySurface, InputEvents, InputSource, MovementKey};
pub use transform::{Transform, TransformMode};
