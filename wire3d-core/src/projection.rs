/// Camera, render context and projection strategies
use nalgebra::{Point2, Point3, Vector3};

/// Depth below which perspective projection clamps `z`
pub const MIN_DEPTH: f32 = 1.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Rotate about each shape's center, subtract the camera, divide by depth
    #[default]
    Perspective,
    /// Rotate about the world origin and drop `z`
    Orthographic,
}

/// Movable viewpoint used by perspective mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// Move the camera by a delta; no bounds are enforced
    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.position += delta;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, -500.0))
    }
}

/// Screen dimensions passed to every projection call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Screen center, halving each dimension with integer division
    pub fn center(&self) -> Point2<f32> {
        Point2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Maps 3D points to 2D screen points.
///
/// `origin` is the screen position that the 3D origin lands on. Output keeps
/// the input order so edge indices still apply.
pub trait Projector {
    fn project(&self, point: &Point3<f32>, origin: &Point2<f32>) -> Point2<f32>;

    fn mode(&self) -> ProjectionMode;

    fn project_all(&self, points: &[Point3<f32>], origin: &Point2<f32>) -> Vec<Point2<f32>> {
        points.iter().map(|p| self.project(p, origin)).collect()
    }
}

/// Perspective divide with a fixed scale factor.
///
/// Depth is clamped to [`MIN_DEPTH`] instead of culling, so points at or
/// behind the camera still produce finite (if distorted) output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjector {
    pub scale: f32,
}

impl PerspectiveProjector {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for PerspectiveProjector {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl Projector for PerspectiveProjector {
    fn project(&self, point: &Point3<f32>, origin: &Point2<f32>) -> Point2<f32> {
        let z = point.z.max(MIN_DEPTH);
        Point2::new(
            point.x / z * self.scale + origin.x,
            point.y / z * self.scale + origin.y,
        )
    }

    fn mode(&self) -> ProjectionMode {
        ProjectionMode::Perspective
    }
}

/// Drops the depth coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrthographicProjector;

impl Projector for OrthographicProjector {
    fn project(&self, point: &Point3<f32>, origin: &Point2<f32>) -> Point2<f32> {
        Point2::new(point.x + origin.x, point.y + origin.y)
    }

    fn mode(&self) -> ProjectionMode {
        ProjectionMode::Orthographic
    }
}

/// Build the projector for a mode
pub fn projector_for(mode: ProjectionMode, perspective_scale: f32) -> Box<dyn Projector> {
    match mode {
        ProjectionMode::Perspective => Box::new(PerspectiveProjector::new(perspective_scale)),
        ProjectionMode::Orthographic => Box::new(OrthographicProjector),
    }
}
