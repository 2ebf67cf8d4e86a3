/// Construction-time scene configuration
use nalgebra::Point3;

use crate::error::{ensure_positive, Error, Result};
use crate::projection::ProjectionMode;
use crate::surface::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeConfig {
    pub size: f32,
    pub center: Point3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereConfig {
    pub radius: f32,
    pub center: Point3<f32>,
    pub latitude: usize,
    pub longitude: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidConfig {
    pub size: f32,
    pub center: Point3<f32>,
}

/// Everything needed to build a scene; not changed once the loop starts
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub projection: ProjectionMode,
    pub perspective_scale: f32,
    /// Radians added to each rotation angle per frame
    pub rotation_step: f32,
    /// Units the camera moves per frame per held key
    pub camera_step: f32,
    pub camera_start: Point3<f32>,
    pub cube: CubeConfig,
    pub sphere: SphereConfig,
    pub pyramid: PyramidConfig,
    pub foreground: Color,
    pub background: Color,
}

impl SceneConfig {
    /// Check the parameters the mesh generators do not cover
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(
                "window size",
                format!("{}x{} has a zero dimension", self.width, self.height),
            ));
        }
        if self.fps == 0 {
            return Err(Error::invalid("fps", "target frame rate must be at least 1"));
        }
        ensure_positive("perspective_scale", self.perspective_scale)?;
        if !self.rotation_step.is_finite() {
            return Err(Error::invalid("rotation_step", "must be finite"));
        }
        if !self.camera_step.is_finite() {
            return Err(Error::invalid("camera_step", "must be finite"));
        }
        if !self.camera_start.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::invalid("camera_start", "must be finite"));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60,
            projection: ProjectionMode::Perspective,
            perspective_scale: 500.0,
            rotation_step: 0.01,
            camera_step: 5.0,
            camera_start: Point3::new(0.0, 0.0, -500.0),
            cube: CubeConfig {
                size: 200.0,
                center: Point3::origin(),
            },
            sphere: SphereConfig {
                radius: 100.0,
                center: Point3::origin(),
                latitude: 10,
                longitude: 20,
            },
            pyramid: PyramidConfig {
                size: 200.0,
                center: Point3::origin(),
            },
            foreground: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = SceneConfig {
            height: 0,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SceneConfig {
            fps: 0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "fps", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_scale_and_steps() {
        let config = SceneConfig {
            perspective_scale: 0.0,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SceneConfig {
            rotation_step: f32::NAN,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
