/// Interactive terminal viewer for wireframe meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{debug, info};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{render_mesh, Mesh};

pub mod canvas;
pub mod orbit;

pub use canvas::TerminalCanvas;
pub use orbit::OrbitState;

/// Camera limits chosen by the hosting binary.
#[derive(Clone, Copy, Debug)]
pub struct ViewSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    mesh: Mesh,
    orbit: OrbitState,
    view: ViewSettings,
    canvas: TerminalCanvas,
    spinning: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, view: ViewSettings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let orbit = match mesh.bounding_box() {
            Some(aabb) => OrbitState::framing(aabb.center(), aabb.half_extent().norm(), view.fov),
            None => OrbitState::new(Point3::origin(), 5.0),
        };
        info!(
            "viewer ready: {} triangles in a {}x{} cell grid",
            mesh.triangles.len(),
            width,
            height
        );

        Ok(Self {
            mesh,
            orbit,
            view,
            canvas: TerminalCanvas::new(width as usize, height as usize),
            spinning: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        info!("viewer stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

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
                debug!("fps {:.1}", self.fps);
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    self.orbit.rotate(0.0, 0.1);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.orbit.rotate(0.0, -0.1);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.orbit.rotate(-0.1, 0.0);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.orbit.rotate(0.1, 0.0);
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.orbit.zoom(0.9);
                }
                KeyCode::Char('-') => {
                    self.orbit.zoom(1.1);
                }
                KeyCode::Char(' ') => {
                    self.spinning = !self.spinning;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow orbit for demo effect
        if self.spinning {
            self.orbit.rotate(0.02, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let camera = self.orbit.camera(
            self.view.fov,
            self.view.near,
            self.view.far,
            self.canvas.width() as u32,
            self.canvas.height() as u32,
        );

        self.canvas.clear();
        render_mesh(&camera, &self.mesh, &mut self.canvas);

        // Output to terminal
        let mut stdout = stdout();
        self.canvas.present(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | FPS: {:.1} | {} triangles | WASD/Arrows=Orbit +/-=Zoom Space=Spin Q=Quit",
                self.fps,
                self.mesh.triangles.len()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
