//! # Application Constants
//!
//! This module defines the defaults and fixed response messages used
//! throughout the indicator update service.

use std::time::Duration;

/// Length of the trailing window used when listing recently updated
/// indicators. A row dated exactly this many days ago is still inside.
pub const RECENT_WINDOW: time::Duration = time::Duration::days(30);

/// Route prefix the deployed service is mounted under.
pub const DEFAULT_API_PREFIX: &str = "/tracking-progress/v1";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8013";

/// Origins allowed to call the API from a browser unless `ALLOWED_ORIGINS`
/// overrides them.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://127.0.0.1:8080",
    "http://localhost:8013",
    "http://localhost",
    "http://intranet.dvrpc.org",
    "http://staging.dvrpc.org",
    "https://dvrpc.org",
    "https://www.dvrpc.org",
];

/// Maximum number of pooled database connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a pooled connection before failing
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str = "success";
pub const NOT_FOUND_MESSAGE: &str = "No indicator with that name found; not deleted.";
pub const INSERT_MISMATCH_MESSAGE: &str = "Error inserting indicator, contact developer.";
pub const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";
pub const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object with a string `name`";
pub const EMPTY_NAME_MESSAGE: &str = "Indicator name must not be empty";
