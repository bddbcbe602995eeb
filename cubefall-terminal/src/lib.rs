/// Terminal frame driver for the cubefall demos
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use cubefall_core::Scene;

pub mod cli;
pub mod error;
pub mod falling;
pub mod orbit_view;
pub mod renderer;

pub use error::AppError;
pub use falling::FallingCubesDemo;
pub use orbit_view::OrbitViewerDemo;
pub use renderer::AsciiRenderer;

/// Whether the frame loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive demo driven by [`TerminalApp`]
pub trait Demo {
    /// Route one input event to the demo's controllers
    fn handle_event(&mut self, event: &Event) -> Flow;

    /// Advance simulation state by `elapsed` seconds
    fn update(&mut self, _elapsed: f32) {}

    fn scene(&self) -> &Scene;

    /// HUD text drawn over the first row
    fn status(&self, fps: f32) -> String;

    /// Demos that read pointer motion enable mouse capture
    fn captures_mouse(&self) -> bool {
        false
    }

    fn cursor_visible(&self) -> bool {
        false
    }
}

/// Terminal aspect ratio, accounting for cells roughly twice as tall as wide
pub fn cell_aspect(cols: u16, rows: u16) -> f32 {
    cols as f32 / (rows.max(1) as f32 * 2.0)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp<D: Demo> {
    demo: D,
    renderer: AsciiRenderer,
    running: bool,
    cursor_shown: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl<D: Demo> TerminalApp<D> {
    pub fn new(demo: D) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            demo,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            cursor_shown: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        if self.demo.captures_mouse() {
            execute!(stdout(), EnableMouseCapture)?;
        }

        let result = self.main_loop();

        // Cleanup
        if self.demo.captures_mouse() {
            execute!(stdout(), DisableMouseCapture)?;
        }
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input(&event::read()?);
            }

            // Update
            let elapsed = frame_start.duration_since(previous).as_secs_f32();
            previous = frame_start;
            self.demo.update(elapsed);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self, event: &Event) {
        if let Event::Resize(width, height) = event {
            log::debug!("terminal resized to {}x{}", width, height);
            self.renderer.resize(*width as usize, *height as usize);
        }
        if self.demo.handle_event(event) == Flow::Quit {
            self.running = false;
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.demo.scene().render(&mut self.renderer);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        let show_cursor = self.demo.cursor_visible();
        if show_cursor != self.cursor_shown {
            if show_cursor {
                queue!(stdout, cursor::Show)?;
            } else {
                queue!(stdout, cursor::Hide)?;
            }
            self.cursor_shown = show_cursor;
        }

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.demo.status(self.fps)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
