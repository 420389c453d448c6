//! Routed pages.

pub mod auto_links;
pub mod auto_nodes;
pub mod dashboard;
pub mod esphome;
pub mod links;
pub mod nodes;
pub mod not_found;
pub mod show_graph;
mod shared;
