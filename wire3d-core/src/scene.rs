/// Scene state and the fixed-rate frame loop
use log::{debug, info, trace};
use nalgebra::{Point2, Vector3};
use std::time::{Duration, Instant};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::projection::{projector_for, Camera, ProjectionMode, Projector, RenderContext};
use crate::rotation::RotationState;
use crate::shape::{Shape, ShapeKind};
use crate::surface::{Color, DisplaySurface, InputSource, MovementKey};
use crate::transform::{Transform, TransformMode};

/// Shapes plus the rotation and camera state they are drawn with
pub struct Scene {
    shapes: Vec<Shape>,
    rotation: RotationState,
    camera: Camera,
    mode: TransformMode,
    projector: Box<dyn Projector>,
    context: RenderContext,
    rotation_step: f32,
    camera_step: f32,
    foreground: Color,
    background: Color,
}

impl Scene {
    /// Validate the config and build every mesh up front
    pub fn new(config: &SceneConfig, context: RenderContext) -> Result<Self> {
        config.validate()?;

        let cube = ShapeKind::Cube {
            size: config.cube.size,
        };
        let sphere = ShapeKind::Sphere {
            radius: config.sphere.radius,
            latitude: config.sphere.latitude,
            longitude: config.sphere.longitude,
        };
        let pyramid = ShapeKind::Pyramid {
            size: config.pyramid.size,
        };

        // Orthographic mode places the sphere in screen space at construction
        let sphere = match config.projection {
            ProjectionMode::Perspective => Shape::new(sphere, config.sphere.center)?,
            ProjectionMode::Orthographic => {
                Shape::baked(sphere, config.sphere.center, context.center())?
            }
        };
        let shapes = vec![
            Shape::new(cube, config.cube.center)?,
            sphere,
            Shape::new(pyramid, config.pyramid.center)?,
        ];

        debug!(
            "scene ready: {:?} projection, {}x{} surface",
            config.projection, context.width, context.height
        );

        Ok(Self {
            shapes,
            rotation: RotationState::zero(),
            camera: Camera::new(config.camera_start),
            mode: TransformMode::from(config.projection),
            projector: projector_for(config.projection, config.perspective_scale),
            context,
            rotation_step: config.rotation_step,
            camera_step: config.camera_step,
            foreground: config.foreground,
            background: config.background,
        })
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn context(&self) -> RenderContext {
        self.context
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.mode, self.rotation, self.camera)
    }

    /// Apply held movement keys, then advance the rotation by one step
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &I) {
        if self.mode == TransformMode::CameraRelative {
            let step = self.camera_step;
            for key in MovementKey::ALL {
                if input.is_key_pressed(key) {
                    self.camera.translate(movement_delta(key, step));
                }
            }
        }
        self.rotation.advance(self.rotation_step);
    }

    /// Project every shape's vertices for the current state
    pub fn project(&self) -> Vec<Vec<Point2<f32>>> {
        let transform = self.transform();
        self.shapes
            .iter()
            .map(|shape| shape.project(&transform, self.projector.as_ref(), &self.context))
            .collect()
    }

    /// Clear, draw cube, sphere and pyramid in order, then present
    pub fn render<S: DisplaySurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        surface.clear(self.background)?;
        let transform = self.transform();
        for shape in &self.shapes {
            shape.draw(
                &mut *surface,
                &transform,
                self.projector.as_ref(),
                &self.context,
                self.foreground,
            )?;
        }
        surface.present()
    }
}

fn movement_delta(key: MovementKey, step: f32) -> Vector3<f32> {
    match key {
        MovementKey::Forward => Vector3::new(0.0, 0.0, step),
        MovementKey::Back => Vector3::new(0.0, 0.0, -step),
        MovementKey::Left => Vector3::new(-step, 0.0, 0.0),
        MovementKey::Right => Vector3::new(step, 0.0, 0.0),
        MovementKey::Up => Vector3::new(0.0, -step, 0.0),
        MovementKey::Down => Vector3::new(0.0, step, 0.0),
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub elapsed: Duration,
}

/// Single-threaded loop: input, update, render, sleep
pub struct FrameLoop {
    target_frame_time: Duration,
    max_frames: Option<u64>,
}

impl FrameLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            target_frame_time: Duration::from_secs(1) / fps.max(1),
            max_frames: None,
        }
    }

    /// Stop after this many frames even without a quit request
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    pub fn run<S, I>(&self, scene: &mut Scene, surface: &mut S, input: &mut I) -> Result<FrameStats>
    where
        S: DisplaySurface + ?Sized,
        I: InputSource + ?Sized,
    {
        let started = Instant::now();
        let mut frames = 0u64;

        while self.max_frames.map_or(true, |max| frames < max) {
            let frame_start = Instant::now();

            if input.poll_events()?.quit {
                info!("quit requested after {frames} frames");
                break;
            }

            scene.update(&*input);
            scene.render(&mut *surface)?;
            frames += 1;

            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            } else {
                trace!("frame {frames} overran target by {:?}", elapsed - self.target_frame_time);
            }
        }

        Ok(FrameStats {
            frames,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::surface::InputEvents;
    use nalgebra::Point3;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingSurface {
        lines: Vec<(Point2<f32>, Point2<f32>)>,
        clears: usize,
        presents: usize,
        fail_present: bool,
    }

    impl DisplaySurface for RecordingSurface {
        fn clear(&mut self, _color: Color) -> Result<()> {
            self.clears += 1;
            self.lines.clear();
            Ok(())
        }

        fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, _color: Color) -> Result<()> {
            self.lines.push((from, to));
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            if self.fail_present {
                return Err(Error::Surface("lost".to_string()));
            }
            self.presents += 1;
            Ok(())
        }

        fn size(&self) -> (u32, u32) {
            (800, 600)
        }
    }

    /// Holds a fixed key set and quits once `quit_after` polls have happened
    struct ScriptedInput {
        held: HashSet<MovementKey>,
        polls: u64,
        quit_after: Option<u64>,
    }

    impl ScriptedInput {
        fn new(held: &[MovementKey], quit_after: Option<u64>) -> Self {
            Self {
                held: held.iter().copied().collect(),
                polls: 0,
                quit_after,
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_events(&mut self) -> Result<InputEvents> {
            let quit = self.quit_after.is_some_and(|n| self.polls >= n);
            self.polls += 1;
            Ok(InputEvents { quit })
        }

        fn is_key_pressed(&self, key: MovementKey) -> bool {
            self.held.contains(&key)
        }
    }

    fn default_scene() -> Scene {
        Scene::new(&SceneConfig::default(), RenderContext::new(800, 600)).unwrap()
    }

    #[test]
    fn test_scene_draw_order_and_edge_count() {
        let scene = default_scene();
        let names: Vec<_> = scene.shapes().iter().map(|s| s.kind().name()).collect();
        assert_eq!(names, vec!["cube", "sphere", "pyramid"]);

        let mut surface = RecordingSurface::default();
        scene.render(&mut surface).unwrap();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.presents, 1);
        assert_eq!(surface.lines.len(), 12 + 400 + 8);
    }

    #[test]
    fn test_camera_moves_with_keys() {
        let mut scene = default_scene();
        let held = [MovementKey::Forward, MovementKey::Right, MovementKey::Up];
        let input = ScriptedInput::new(&held, None);
        scene.update(&input);
        scene.update(&input);
        assert_eq!(scene.camera().position, Point3::new(10.0, -10.0, -490.0));

        let input = ScriptedInput::new(&[MovementKey::Forward, MovementKey::Back], None);
        scene.update(&input);
        assert_eq!(scene.camera().position, Point3::new(10.0, -10.0, -490.0));
    }

    #[test]
    fn test_orthographic_ignores_keys() {
        let config = SceneConfig {
            projection: ProjectionMode::Orthographic,
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(&config, RenderContext::new(800, 600)).unwrap();
        let input = ScriptedInput::new(&MovementKey::ALL, None);
        scene.update(&input);
        assert_eq!(scene.camera().position, config.camera_start);
        assert!((scene.rotation().x - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_advances_each_update() {
        let mut scene = default_scene();
        let input = ScriptedInput::new(&[], None);
        for _ in 0..3 {
            scene.update(&input);
        }
        let rotation = scene.rotation();
        assert!((rotation.x - 0.03).abs() < 1e-6);
        assert!((rotation.y - 0.03).abs() < 1e-6);
        assert!((rotation.z - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let mut scene = default_scene();
        scene.update(&ScriptedInput::new(&[MovementKey::Left], None));
        assert_eq!(scene.project(), scene.project());
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = SceneConfig::default();
        config.sphere.longitude = 0;
        assert!(Scene::new(&config, RenderContext::new(800, 600)).is_err());
    }

    #[test]
    fn test_frame_loop_stops_on_quit() {
        let mut scene = default_scene();
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput::new(&[], Some(3));
        let stats = FrameLoop::new(1000)
            .run(&mut scene, &mut surface, &mut input)
            .unwrap();
        assert_eq!(stats.frames, 3);
        assert_eq!(surface.presents, 3);
    }

    #[test]
    fn test_frame_loop_max_frames() {
        let mut scene = default_scene();
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput::new(&[], None);
        let frame_loop = FrameLoop::new(500).with_max_frames(4);
        assert_eq!(frame_loop.target_frame_time(), Duration::from_millis(2));
        let stats = frame_loop.run(&mut scene, &mut surface, &mut input).unwrap();
        assert_eq!(stats.frames, 4);
        assert!(stats.elapsed >= Duration::from_millis(6));
    }

    #[test]
    fn test_surface_failure_aborts_loop() {
        let mut scene = default_scene();
        let mut surface = RecordingSurface {
            fail_present: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::new(&[], None);
        let result = FrameLoop::new(1000)
            .with_max_frames(10)
            .run(&mut scene, &mut surface, &mut input);
        assert!(matches!(result, Err(Error::Surface(_))));
    }
}
