/// Terminal front-end: crossterm display surface, keyboard input and app setup
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self},
};
use log::{info, warn};
use std::io::{self, stdout};
use wire3d_core::{DisplaySurface, FrameLoop, FrameStats, RenderContext, Result, Scene, SceneConfig};

pub mod cli;
pub mod input;
pub mod renderer;

pub use cli::Cli;
pub use input::TerminalInput;
pub use renderer::TerminalSurface;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    config: SceneConfig,
    max_frames: Option<u64>,
    show_status: bool,
}

impl TerminalApp {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            max_frames: None,
            show_status: true,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config: cli.scene_config(),
            max_frames: cli.frames,
            show_status: !cli.no_status,
        }
    }

    pub fn run(&mut self) -> Result<FrameStats> {
        let (cols, rows) = terminal::size()?;
        let (width, height) = (self.config.width, self.config.height);
        let surface = TerminalSurface::new(stdout(), cols, rows, width, height)?
            .with_status_line(self.show_status);
        let (width, height) = surface.size();

        // Build meshes before touching the terminal so bad parameters print normally
        let mut scene = Scene::new(&self.config, RenderContext::new(width, height))?;
        info!("rendering {width}x{height} logical pixels on a {cols}x{rows} terminal");

        terminal::enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        let result = enter_screen(enhanced)
            .and_then(|()| self.main_loop(&mut scene, surface, enhanced));

        // Cleanup
        let mut steps: Vec<TeardownStep> = Vec::new();
        if enhanced {
            steps.push((
                "pop keyboard flags",
                Box::new(|| execute!(stdout(), PopKeyboardEnhancementFlags)),
            ));
        }
        steps.push(("disable raw mode", Box::new(terminal::disable_raw_mode)));
        steps.push((
            "leave alternate screen",
            Box::new(|| execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)),
        ));
        let restored = run_teardown(steps);

        let stats = result?;
        restored?;
        Ok(stats)
    }

    fn main_loop<W: std::io::Write>(
        &self,
        scene: &mut Scene,
        mut surface: TerminalSurface<W>,
        enhanced: bool,
    ) -> Result<FrameStats> {
        let mut input = TerminalInput::new(enhanced);
        let mut frame_loop = FrameLoop::new(self.config.fps);
        if let Some(max) = self.max_frames {
            frame_loop = frame_loop.with_max_frames(max);
        }
        frame_loop.run(scene, &mut surface, &mut input)
    }
}

type TeardownStep = (&'static str, Box<dyn FnOnce() -> io::Result<()>>);

fn enter_screen(enhanced: bool) -> Result<()> {
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    if enhanced {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!("terminal does not report key releases; movement keys act per key event");
    }
    Ok(())
}

/// Run every step even after a failure; returns the first error
fn run_teardown(steps: Vec<TeardownStep>) -> Result<()> {
    let mut first_error = None;
    for (name, step) in steps {
        if let Err(err) = step() {
            warn!("terminal teardown step `{name}` failed: {err}");
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wire3d_core::Error;

    fn step(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, ok: bool) -> TeardownStep {
        let log = Rc::clone(log);
        let action: Box<dyn FnOnce() -> io::Result<()>> = Box::new(move || {
            log.borrow_mut().push(name);
            if ok {
                Ok(())
            } else {
                Err(io::Error::new(io::ErrorKind::Other, name))
            }
        });
        (name, action)
    }

    #[test]
    fn test_teardown_continues_after_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            step("pop", &log, false),
            step("raw", &log, true),
            step("screen", &log, false),
        ];
        let result = run_teardown(steps);
        assert_eq!(*log.borrow(), vec!["pop", "raw", "screen"]);
        match result {
            Err(Error::Io(err)) => assert_eq!(err.to_string(), "pop"),
            other => panic!("expected the first teardown error, got {other:?}"),
        }
    }

    #[test]
    fn test_teardown_ok_when_all_steps_succeed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![step("raw", &log, true), step("screen", &log, true)];
        assert!(run_teardown(steps).is_ok());
        assert_eq!(log.borrow().len(), 2);
    }
}
