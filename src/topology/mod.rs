//! Topology graph assembly.
//!
//! Turns the backend's node and link collections for one network variant into
//! the [`GraphData`](crate::components::force_graph::GraphData) consumed by the
//! force graph canvas.

pub mod assembler;
pub mod color;
pub mod view_model;

pub use assembler::{FetchKind, FetchRequest, GraphAssembler, NetworkVariant};
pub use color::{NodeColor, derive_color};
pub use view_model::{build_view_model, link_distance, link_label};
