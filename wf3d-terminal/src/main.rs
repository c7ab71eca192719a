/// WF3D Terminal Viewer
///
/// Loads an STL file (binary or ASCII) and renders it as an orbiting
/// wireframe in the terminal. Without a file argument a built-in cube
/// is shown instead.
///
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - +/-: Zoom
///   - Space: Toggle auto-spin
///   - Q/ESC: Quit
use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use wf3d_core::{parse_stl, Mesh};
use wf3d_terminal::{TerminalApp, ViewSettings};

#[derive(Parser, Debug)]
#[command(name = "wf3d-terminal")]
#[command(about = "Render STL meshes as wireframes in the terminal")]
struct Args {
    /// STL file to display. Defaults to a built-in cube.
    #[arg(value_name = "FILE")]
    mesh: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Near plane distance
    #[arg(long, default_value_t = 0.1)]
    near: f32,

    /// Far plane distance
    #[arg(long, default_value_t = 100.0)]
    far: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(
        args.fov > 0.0 && args.fov < 180.0,
        "--fov must be between 0 and 180 degrees"
    );
    ensure!(args.near > 0.0, "--near must be positive");
    ensure!(args.far > args.near, "--far must be greater than --near");

    let mesh = match &args.mesh {
        Some(path) => {
            let data =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            let mesh =
                parse_stl(&data).with_context(|| format!("failed to parse {}", path.display()))?;
            ensure!(
                !mesh.triangles.is_empty(),
                "{} contains no triangles",
                path.display()
            );
            info!(
                "loaded {} triangles from {}",
                mesh.triangles.len(),
                path.display()
            );
            mesh
        }
        None => Mesh::cube(2.0),
    };

    let view = ViewSettings {
        fov: args.fov,
        near: args.near,
        far: args.far,
    };

    let mut app = TerminalApp::new(mesh, view)?;
    app.run()?;
    Ok(())
}
