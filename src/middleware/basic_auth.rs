//! # Basic Authentication Middleware
//!
//! Guards the write endpoints. The caller must present HTTP Basic credentials
//! matching the configured username and password; anything else is rejected
//! with `401 Unauthorized` and a `WWW-Authenticate: Basic` challenge before
//! the handler runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, trace, warn};

use crate::error::{AppError, AppResult};
use crate::models::AppState;
use crate::utils::constant::BAD_CREDENTIALS_MESSAGE;

/// The username and password accepted on write endpoints.
#[derive(Debug)]
pub struct BasicCredentials {
    username: SecretString,
    password: SecretString,
}

impl BasicCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username: SecretString::from(username),
            password: SecretString::from(password),
        }
    }

    /// Compares both values in constant time. The inputs are hashed first so
    /// the comparison does not leak their lengths either.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let expected_username = digest(self.username.expose_secret());
        let expected_password = digest(self.password.expose_secret());
        let username_ok = digest(username).as_slice().ct_eq(expected_username.as_slice());
        let password_ok = digest(password).as_slice().ct_eq(expected_password.as_slice());

        (username_ok & password_ok).into()
    }
}

fn digest(value: &str) -> Vec<u8> {
    Sha256::digest(value.as_bytes()).to_vec()
}

/// Splits an `Authorization` header value of the form `Basic <base64>` into
/// its username and password. Returns `None` for any other scheme or a
/// malformed payload.
pub fn parse_basic_header(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_owned(), password.to_owned()))
}

/// Authentication middleware for the write routes
///
/// # Returns
///
/// - **Success**: Continues to the next handler
/// - **Failure**: `401 Unauthorized` for a missing, malformed or wrong
///   `Authorization` header
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
    )
)]
pub async fn basic_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    trace!("Processing basic authentication middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing Authorization header");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS_MESSAGE));
    };

    let Some((username, password)) = parse_basic_header(auth_header) else {
        warn!("Invalid Authorization header format");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS_MESSAGE));
    };

    if !state.credentials.verify(&username, &password) {
        warn!("Incorrect basic credentials");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS_MESSAGE));
    }

    debug!("Authentication successful");
    Ok(next.run(req).await)
}
