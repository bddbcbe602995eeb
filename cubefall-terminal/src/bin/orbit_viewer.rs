/// Cubefall Terminal Demo - Orbit Viewer
///
/// Steps a procedural pyramid around the world axes.
/// Controls:
///   - Up/Down: Rotate about X
///   - Left/Right: Rotate about Y
///   - PageUp/PageDown: Rotate about Z
///   - W/S, A/D, Q/E: Translate along Y, X and Z
///   - ESC: Quit
use clap::Parser;
use crossterm::terminal;

use cubefall_terminal::cli::{init_logging, load_config, Args};
use cubefall_terminal::{AppError, OrbitViewerDemo, TerminalApp};

fn main() -> Result<(), AppError> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        log::warn!("--seed has no effect on the orbit viewer");
    }

    println!("Cubefall Orbit Viewer - Loading...");

    let (cols, rows) = terminal::size()?;
    let demo = OrbitViewerDemo::new(&config, cols, rows)?;

    println!("Starting orbit viewer (press ESC to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(demo)?;
    app.run()?;

    println!("Thank you for using Cubefall!");
    Ok(())
}
