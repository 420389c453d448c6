//! Force-directed topology canvas.
//!
//! Mesh nodes are laid out by a spring simulation whose rest lengths follow
//! link weight. Links are drawn as flowing dashed arrows labelled with their
//! percentage. The view can be panned and zoomed, nodes can be dragged and
//! pinned, and hovering a node fades everything not attached to it.
//!
//! # Example
//!
//! ```ignore
//! use meshmesh_admin::components::force_graph::{ForceGraphCanvas, GraphData};
//!
//! let data = RwSignal::new(GraphData::default());
//! view! { <ForceGraphCanvas data=data height=650.0 /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};
