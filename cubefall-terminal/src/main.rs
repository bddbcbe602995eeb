/// Cubefall Terminal Demo - Falling Cubes
///
/// Cubes drop from a volume in front of the camera, spinning as they fall.
/// Controls:
///   - WASD: Move the camera along its facing
///   - Mouse: Look around while the pointer is captured
///   - ESC: Release the pointer, left click captures it again
///   - Q: Quit
use clap::Parser;
use crossterm::terminal;

use cubefall_terminal::cli::{init_logging, load_config, Args};
use cubefall_terminal::{AppError, FallingCubesDemo, TerminalApp};

fn main() -> Result<(), AppError> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    println!("Cubefall Terminal Renderer - Loading...");

    let (cols, rows) = terminal::size()?;
    let demo = FallingCubesDemo::new(&config, args.seed, cols, rows)?;

    println!("Starting falling cubes (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(demo)?;
    app.run()?;

    println!(
        "{} cubes fell. Thank you for using Cubefall!",
        app.demo().cubes().total_spawned()
    );
    Ok(())
}
