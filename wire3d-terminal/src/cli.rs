/// Command-line interface configuration
use clap::{Parser, ValueEnum};
use wire3d_core::{ProjectionMode, SceneConfig};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Movable camera, depth divide
    Perspective,
    /// Fixed view, depth dropped
    Orthographic,
}

impl From<Projection> for ProjectionMode {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::Perspective => ProjectionMode::Perspective,
            Projection::Orthographic => ProjectionMode::Orthographic,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "wire3d-terminal")]
#[command(about = "Rotating wireframe cube, sphere and pyramid in the terminal", long_about = None)]
pub struct Cli {
    /// Projection strategy
    #[arg(long, value_enum, default_value_t = Projection::Perspective)]
    pub projection: Projection,

    /// Logical surface width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Logical surface height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Exit after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Perspective scale factor
    #[arg(long, default_value_t = 500.0)]
    pub scale: f32,

    /// Sphere latitude rings
    #[arg(long, default_value_t = 10)]
    pub latitude: usize,

    /// Sphere longitude segments
    #[arg(long, default_value_t = 20)]
    pub longitude: usize,

    /// Hide the FPS and controls line
    #[arg(long = "no-status", default_value = "false")]
    pub no_status: bool,
}

impl Cli {
    pub fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
            projection: self.projection.into(),
            perspective_scale: self.scale,
            ..SceneConfig::default()
        };
        config.sphere.latitude = self.latitude;
        config.sphere.longitude = self.longitude;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene_config() {
        let cli = Cli::parse_from(["wire3d-terminal"]);
        assert_eq!(cli.scene_config(), SceneConfig::default());
        assert_eq!(cli.frames, None);
        assert!(!cli.no_status);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "wire3d-terminal",
            "--projection",
            "orthographic",
            "--latitude",
            "6",
            "--frames",
            "120",
            "--no-status",
        ]);
        let config = cli.scene_config();
        assert_eq!(config.projection, ProjectionMode::Orthographic);
        assert_eq!(config.sphere.latitude, 6);
        assert_eq!(config.sphere.longitude, 20);
        assert_eq!(cli.frames, Some(120));
        assert!(cli.no_status);
    }
}
