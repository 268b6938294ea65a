//! # Business Logic Services
//!
//! ## Available Services
//!
//! - **Registry** (`registry`) - The list/add/remove operations and the recent window
//! - **Store** (`store`) - Datastore seam and its PostgreSQL implementation

pub mod registry;
pub mod store;
