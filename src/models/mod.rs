//! Data models for the org chart backend.
//!
//! Raw records keep the snake_case shape of the source JSON; derived models
//! are serialized in camelCase for the rendering layer.

mod datastore;
mod employee;
mod raw;

pub use datastore::*;
pub use employee::*;
pub use raw::*;
