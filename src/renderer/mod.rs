//! WebGPU rendering module
//!
//! Flat-colored quads for the sky and pipes. The bird sprite and the HUD are
//! DOM elements layered over the canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
