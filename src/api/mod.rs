//! Backend data access.
//!
//! The backend exposes one REST collection per [`Resource`] plus a couple of
//! command endpoints. [`RestClient`] wraps them; records are validated into
//! the typed shapes in [`records`] at this boundary.

mod client;
mod error;
pub mod query;
pub mod records;
mod resource;

pub use client::RestClient;
pub use error::ApiError;
pub use query::{ListPage, ListParams, Sort};
pub use records::{DevType, EsphomeRecord, NetworkLink, NetworkNode, NodeDetails};
pub use resource::Resource;
