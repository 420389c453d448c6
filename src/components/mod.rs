//! Reusable UI components.

pub mod force_graph;
pub mod layout;
pub mod notify;
