/// Wire3D Terminal Demo - Rotating cube, sphere and pyramid
///
/// Controls:
///   - W/S: Move camera forward/back
///   - A/D: Move camera left/right
///   - Up/Down: Move camera up/down
///   - Q/ESC: Quit

use clap::Parser;
use log::info;
use wire3d_terminal::{Cli, TerminalApp};

fn main() -> wire3d_core::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    info!("starting with {:?}", cli);

    let mut app = TerminalApp::from_cli(&cli);
    let stats = app.run()?;

    info!(
        "rendered {} frames in {:.2?} ({:.1} fps)",
        stats.frames,
        stats.elapsed,
        stats.frames as f64 / stats.elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("Thank you for using Wire3D Terminal Renderer!");
    Ok(())
}
