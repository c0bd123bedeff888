//! Turning query rows into something the canvas can draw.

mod fetch;
mod model;
mod transform;

pub use fetch::{ALL_RELATIONSHIPS, fetch_graph};
pub use model::{ColorMap, GraphLink, GraphModel, GraphNode, HUE_STEP, LoadedGraph};
pub use transform::transform;
