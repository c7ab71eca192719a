/// Example: render a single wireframe frame without raw mode
///
/// Usage: cargo run --example headless -- [path/to/file.stl]
///
/// Projects one frame into a plain text grid and prints it, which is
/// handy for piping output or sanity-checking a mesh over ssh.
use anyhow::{Context, Result};
use nalgebra::{Point3, Vector3};
use std::env;
use std::fs;
use wf3d_core::{parse_stl, render_mesh, Camera, DrawSurface, Mesh, Rgba};

const WIDTH: usize = 100;
const HEIGHT: usize = 40;

struct TextGrid {
    cells: Vec<char>,
}

impl TextGrid {
    fn new() -> Self {
        Self {
            cells: vec![' '; WIDTH * HEIGHT],
        }
    }
}

impl DrawSurface for TextGrid {
    fn set_draw_color(&mut self, _color: Rgba) {}

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        self.cells[y as usize * WIDTH + x as usize] = '#';
    }
}

fn main() -> Result<()> {
    let mesh = match env::args().nth(1) {
        Some(path) => {
            let data = fs::read(&path).with_context(|| format!("failed to read {}", path))?;
            parse_stl(&data).with_context(|| format!("failed to parse {}", path))?
        }
        None => Mesh::cube(2.0),
    };

    let (target, distance) = match mesh.bounding_box() {
        Some(aabb) => {
            let radius = aabb.half_extent().norm();
            let distance = if radius > 0.0 { radius * 2.5 } else { 5.0 };
            (aabb.center(), distance)
        }
        None => (Point3::origin(), 5.0),
    };
    let eye = target + Vector3::new(0.6, 0.5, 0.8).normalize() * distance;

    let camera = Camera::new(
        eye,
        target,
        Vector3::y(),
        60.0,
        0.1,
        100.0,
        WIDTH as u32,
        HEIGHT as u32,
    );

    let mut grid = TextGrid::new();
    render_mesh(&camera, &mesh, &mut grid);

    for row in grid.cells.chunks(WIDTH) {
        println!("{}", row.iter().collect::<String>());
    }
    Ok(())
}
