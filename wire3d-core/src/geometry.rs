/// Wireframe meshes and the procedural primitive generators
use nalgebra::Point3;
use std::f32::consts::{PI, TAU};
use std::mem::size_of;

use crate::error::{ensure_positive, Error, Result};

/// Pair of vertex indices drawn as one line segment
pub type Edge = (usize, usize);

/// A wireframe mesh: vertex positions plus the edges connecting them.
///
/// Topology is fixed at construction. Every edge index is checked against
/// the vertex list, so renderers can index without bounds errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f32>>, edges: Vec<Edge>) -> Result<Self> {
        let count = vertices.len();
        if let Some(&(a, b)) = edges.iter().find(|&&(a, b)| a >= count || b >= count) {
            return Err(Error::EdgeOutOfRange(a, b, count));
        }
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Axis-aligned cube with 8 corners and 12 edges
    pub fn cube(size: f32, center: Point3<f32>) -> Result<Self> {
        ensure_positive("size", size)?;
        ensure_finite_center(&center)?;
        let h = size / 2.0;
        let (cx, cy, cz) = (center.x, center.y, center.z);

        let vertices = vec![
            Point3::new(cx - h, cy - h, cz - h),
            Point3::new(cx + h, cy - h, cz - h),
            Point3::new(cx + h, cy + h, cz - h),
            Point3::new(cx - h, cy + h, cz - h),
            Point3::new(cx - h, cy - h, cz + h),
            Point3::new(cx + h, cy - h, cz + h),
            Point3::new(cx + h, cy + h, cz + h),
            Point3::new(cx - h, cy + h, cz + h),
        ];

        let mut edges = Vec::with_capacity(12);
        for i in 0..4 {
            edges.push((i, (i + 1) % 4)); // base
            edges.push((i + 4, (i + 1) % 4 + 4)); // top
            edges.push((i, i + 4)); // vertical
        }

        Self::new(vertices, edges)
    }

    /// UV sphere stored ring-major: `(latitude + 1) * longitude` vertices.
    ///
    /// The pole rings collapse to one point repeated `longitude` times. They
    /// are kept as-is so edge indices follow the `ring * longitude + j` layout.
    pub fn sphere(
        radius: f32,
        center: Point3<f32>,
        latitude: usize,
        longitude: usize,
    ) -> Result<Self> {
        ensure_positive("radius", radius)?;
        ensure_finite_center(&center)?;
        if latitude == 0 {
            return Err(Error::invalid("latitude", "subdivision count must be at least 1"));
        }
        if longitude == 0 {
            return Err(Error::invalid("longitude", "subdivision count must be at least 1"));
        }

        let (vertex_count, edge_count) = sphere_counts(latitude, longitude).ok_or_else(|| {
            Error::invalid(
                "latitude",
                format!("{latitude}x{longitude} subdivisions exceed the addressable mesh size"),
            )
        })?;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..=latitude {
            let theta = PI * i as f32 / latitude as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for j in 0..longitude {
                let phi = TAU * j as f32 / longitude as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();
                vertices.push(Point3::new(
                    center.x + radius * sin_theta * cos_phi,
                    center.y + radius * sin_theta * sin_phi,
                    center.z + radius * cos_theta,
                ));
            }
        }

        let mut edges = Vec::with_capacity(edge_count);
        for i in 0..latitude {
            for j in 0..longitude {
                let next_j = (j + 1) % longitude;
                edges.push((i * longitude + j, i * longitude + next_j));
                edges.push((i * longitude + j, (i + 1) * longitude + j));
            }
        }

        Self::new(vertices, edges)
    }

    /// Square pyramid: apex first, then the four base corners
    pub fn pyramid(size: f32, center: Point3<f32>) -> Result<Self> {
        ensure_positive("size", size)?;
        ensure_finite_center(&center)?;
        let h = size / 2.0;
        let (cx, cy, cz) = (center.x, center.y, center.z);

        let vertices = vec![
            Point3::new(cx, cy, cz + h),
            Point3::new(cx - h, cy - h, cz - h),
            Point3::new(cx + h, cy - h, cz - h),
            Point3::new(cx + h, cy + h, cz - h),
            Point3::new(cx - h, cy + h, cz - h),
        ];

        let mut edges = Vec::with_capacity(8);
        for i in 1..5 {
            edges.push((0, i));
        }
        for i in 1..5 {
            edges.push((i, (i % 4) + 1));
        }

        Self::new(vertices, edges)
    }
}

/// Vertex and edge counts for a sphere, or `None` if either buffer would
/// not fit in memory addressable by a `Vec`
fn sphere_counts(latitude: usize, longitude: usize) -> Option<(usize, usize)> {
    let vertices = latitude.checked_add(1)?.checked_mul(longitude)?;
    let edges = latitude.checked_mul(longitude)?.checked_mul(2)?;
    let max_bytes = isize::MAX as usize;
    if vertices.checked_mul(size_of::<Point3<f32>>())? > max_bytes
        || edges.checked_mul(size_of::<Edge>())? > max_bytes
    {
        return None;
    }
    Some((vertices, edges))
}

fn ensure_finite_center(center: &Point3<f32>) -> Result<()> {
    if center.coords.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(Error::invalid("center", format!("expected finite coordinates, got {center}")))
    }
}
