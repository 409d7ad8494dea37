//! Rendering module
//!
//! The scene is described against the `DrawSurface` trait; `VertexBatch`
//! turns it into triangles and `RenderState` puts them on a WebGPU canvas.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;

pub use batch::{Vertex, VertexBatch};
pub use pipeline::RenderState;
pub use scene::draw_scene;
pub use surface::DrawSurface;
