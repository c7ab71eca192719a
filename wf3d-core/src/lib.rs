/// WF3D Core Library - Wireframe projection and rasterization
///
/// This library provides the stateless core of a wireframe 3D viewer:
/// the camera transform chain with per-point visibility, viewport line
/// clipping, incremental line rasterization, the scene driver tying them
/// together, and STL mesh loading.

pub mod clip;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod stl;

// Re-export commonly used types
pub use clip::{ClipRect, OutCode};
pub use geometry::{Aabb, Mesh, Triangle};
pub use projection::Camera;
pub use raster::{draw_line, DrawSurface, Rgba};
pub use scene::{render_mesh, render_scene};
pub use stl::{parse_stl, StlError};
