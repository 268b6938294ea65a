//! # HTTP Request Handlers
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application liveness
//! - **Indicators** (`indicators`) - List, add and remove indicator updates

mod health_check;
mod indicators;

pub use health_check::*;
pub use indicators::*;
