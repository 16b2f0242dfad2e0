//! orbview terminal demo.
//!
//! Renders a procedural primitive as colored ASCII art.
//! Controls:
//!   - Left drag / Arrow Keys: Orbit
//!   - Right drag: Pan
//!   - Mouse wheel: Zoom
//!   - Q/E: Roll
//!   - 1-5: Cube, pyramid, sphere, cylinder, cone
//!   - Tab: Cycle shading model
//!   - Esc / Ctrl-C: Quit

use clap::Parser;
use orbview_core::{RenderLoop, SceneState, ShadingModel, Shape, ViewerConfig};
use orbview_terminal::TerminalApp;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "orbview-terminal")]
#[command(about = "Orbit, pan and zoom around procedural primitives in the terminal")]
struct Args {
    /// Shape descriptor, e.g. "cube", "sphere(0.5, 30, 30)", "cone(0.5, 1, 32)"
    #[arg(short, long, default_value = "cube")]
    shape: Shape,

    /// Shading model: flat-color, vertex-color, diffuse-specular, point-light
    #[arg(long, default_value = "diffuse-specular")]
    shading: ShadingModel,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Write logs to this file (the terminal itself is busy rendering)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,

    /// Let the wheel zoom without limits
    #[arg(long)]
    no_zoom_clamp: bool,

    /// Disable Q/E roll
    #[arg(long)]
    no_roll: bool,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(File::create(path)?))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = ViewerConfig::default();
    config.controls = config.controls.with_roll(!args.no_roll);
    if args.no_zoom_clamp {
        config.controls = config.controls.with_zoom_range(None);
    }

    let mut scene = SceneState::new(args.shape, config)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?
        .with_shading(args.shading);
    tracing::info!(shape = ?args.shape, shading = %args.shading, "starting");

    let mut render_loop = RenderLoop::new().with_frame_limit(args.frames);
    let mut app = TerminalApp::new(render_loop.stop_signal())?;
    let frames = app.run(&mut scene, &mut render_loop)?;

    tracing::info!(frames, "stopped");
    println!("Thank you for using orbview!");
    Ok(())
}
