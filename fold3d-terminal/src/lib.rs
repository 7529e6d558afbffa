/// Terminal frontend for the 3D book widget.
///
/// Hosts the render loop: raw mode, mouse capture, frame pacing, and the
/// status line. Pointer and key events are mapped onto the core driver;
/// the driver owns the hinge state and the scene transforms.
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::info;

use fold3d_core::{build_book, BookDimensions, BookDriver, BookMaterials, Camera, Scene};

pub mod renderer;

pub use renderer::CellRenderer;

const TARGET_FPS: u64 = 30;

/// Main application struct for the terminal book
pub struct TerminalApp {
    scene: Scene,
    driver: BookDriver,
    camera: Camera,
    renderer: CellRenderer,
    columns: u16,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(dims: BookDimensions, materials: BookMaterials) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut scene = Scene::new();
        let graph = build_book(&mut scene, dims, materials);
        let driver = BookDriver::new(&mut scene, graph);

        Ok(Self {
            scene,
            driver,
            camera: Camera::new(width as u32, height as u32),
            renderer: CellRenderer::new(width as usize, height as usize),
            columns: width,
            running: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        self.driver.cancel();
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update: one easing step plus idle sway, then stop if cancelled
            if !self.driver.tick(&mut self.scene, self.started.elapsed()) {
                self.running = false;
                break;
            }

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

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("quit requested");
                    self.driver.cancel();
                    self.running = false;
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.driver.toggle();
                }
                _ => {}
            },
            Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.driver.pointer_down(column as f32);
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.driver
                        .pointer_move(&mut self.scene, column as f32, self.columns as f32);
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    self.driver.pointer_up();
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.columns = width;
                self.camera.aspect = width as f32 / height as f32;
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_scene(&self.scene, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Status line overlay
        let hinge = self.driver.hinge();
        let state = if hinge.is_dragging() {
            "dragging"
        } else if hinge.is_open() {
            "open"
        } else {
            "closed"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Fold3D | FPS: {:.1} | {} | angle {:.2} rad | drag or Space to open, Q quits",
                self.fps,
                state,
                hinge.current_angle()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
