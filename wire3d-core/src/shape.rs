/// Wireframe shapes: a generated mesh plus its placement
use log::debug;
use nalgebra::{Point2, Point3};

use crate::error::Result;
use crate::geometry::Mesh;
use crate::projection::{Projector, RenderContext};
use crate::surface::{Color, DisplaySurface};
use crate::transform::Transform;

/// Primitive to generate, with its size parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Cube { size: f32 },
    Sphere { radius: f32, latitude: usize, longitude: usize },
    Pyramid { size: f32 },
}

impl ShapeKind {
    pub fn generate_mesh(&self, center: Point3<f32>) -> Result<Mesh> {
        match *self {
            ShapeKind::Cube { size } => Mesh::cube(size, center),
            ShapeKind::Sphere {
                radius,
                latitude,
                longitude,
            } => Mesh::sphere(radius, center, latitude, longitude),
            ShapeKind::Pyramid { size } => Mesh::pyramid(size, center),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Cube { .. } => "cube",
            ShapeKind::Sphere { .. } => "sphere",
            ShapeKind::Pyramid { .. } => "pyramid",
        }
    }
}

/// How projected points are placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAnchor {
    /// Add the screen center after projection
    Centered,
    /// Screen offset is already part of the vertices
    Baked,
}

#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    center: Point3<f32>,
    anchor: ScreenAnchor,
    mesh: Mesh,
}

impl Shape {
    pub fn new(kind: ShapeKind, center: Point3<f32>) -> Result<Self> {
        let mesh = kind.generate_mesh(center)?;
        debug!(
            "built {} at {center}: {} vertices, {} edges",
            kind.name(),
            mesh.vertex_count(),
            mesh.edge_count()
        );
        Ok(Self {
            kind,
            center,
            anchor: ScreenAnchor::Centered,
            mesh,
        })
    }

    /// Build a shape whose vertices already include the screen offset
    pub fn baked(kind: ShapeKind, center: Point3<f32>, screen_offset: Point2<f32>) -> Result<Self> {
        let shifted = Point3::new(center.x + screen_offset.x, center.y + screen_offset.y, center.z);
        let mut shape = Self::new(kind, shifted)?;
        shape.anchor = ScreenAnchor::Baked;
        Ok(shape)
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub fn anchor(&self) -> ScreenAnchor {
        self.anchor
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Transform and project every vertex, keeping vertex order
    pub fn project(
        &self,
        transform: &Transform,
        projector: &dyn Projector,
        context: &RenderContext,
    ) -> Vec<Point2<f32>> {
        let transformed = transform.apply(self.mesh.vertices(), &self.center);
        let origin = match self.anchor {
            ScreenAnchor::Centered => context.center(),
            ScreenAnchor::Baked => Point2::origin(),
        };
        projector.project_all(&transformed, &origin)
    }

    /// Draw one line per edge
    pub fn draw<S: DisplaySurface + ?Sized>(
        &self,
        surface: &mut S,
        transform: &Transform,
        projector: &dyn Projector,
        context: &RenderContext,
        color: Color,
    ) -> Result<()> {
        let points = self.project(transform, projector, context);
        for &(a, b) in self.mesh.edges() {
            surface.draw_line(points[a], points[b], color)?;
        }
        Ok(())
    }
}
