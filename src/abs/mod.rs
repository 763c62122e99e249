//! The pieces every exercise repeats: window and context setup, shader
//! compilation and linking, vertex array ownership and textures.

pub mod app;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use app::*;
pub use shader::*;
pub use texture::*;
pub use vertex::*;
