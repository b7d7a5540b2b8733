//! The guest-facing pages
//!
//! A welcome page and its PDF download, both addressed by guest name and
//! creation timestamp

use axum::http::StatusCode;

pub use document::document;
pub use welcome::welcome;

mod document;
mod welcome;

/// Utility function for mapping any error into a `500 Internal Server Error`
/// response.
fn internal_error<E>(err: E) -> (StatusCode, String)
where
    E: std::error::Error,
{
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
