mod camera;
mod component;
mod handle;
mod render;
mod state;

pub use component::ForceGraphCanvas;
pub use handle::ForceGraphHandle;
