pub mod basic_auth;

pub use basic_auth::{BasicCredentials, basic_auth_middleware, parse_basic_header};
