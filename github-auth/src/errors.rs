//! Unified error types for the `github-auth` crate.
//!
//! Every failure a [`KeysClient`](crate::KeysClient) can surface is one variant
//! of the closed [`Error`] enum, so callers branch on the kind instead of
//! inspecting messages. Lower layers (`reqwest`, URL parsing) are mapped into
//! [`TransportError`] and [`BuildError`] first.

use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`ReqwestTransport`](crate::ReqwestTransport).
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- Transport Error ---

/// A failure of the transport itself, distinct from any HTTP status.
///
/// Connection refusals, DNS failures, TLS errors and timeouts all land here.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection-level failure reported by a custom transport.
    #[error("Connection failed: {0}")]
    Connection(String),
}

// --- The Main Operational Error Enum ---

/// The crate’s top-level error type.
///
/// - [`Error::UsernameRequired`]: the client was configured without a username
/// - [`Error::UserDoesNotExist`]: GitHub answered `404` for the user
/// - [`Error::Unavailable`]: GitHub could not be reached
/// - [`Error::UnexpectedResponse`]: GitHub answered with something else
///
/// [`Error::InvalidUsername`], [`Error::InvalidApiUrl`] and [`Error::Build`]
/// only occur while building a client.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable username was supplied when building the client.
    #[error("A username is required")]
    UsernameRequired,

    /// The username is `.` or `..`, which would name a different URL path.
    #[error("`{username}` is not a valid GitHub username")]
    InvalidUsername {
        /// The username as supplied.
        username: String,
    },

    /// The named user does not exist on GitHub.
    #[error("GitHub user `{username}` does not exist")]
    UserDoesNotExist {
        /// The (URL-escaped) username that was looked up.
        username: String,
    },

    /// GitHub could not be reached.
    #[error("GitHub is unavailable: {0}")]
    Unavailable(#[from] TransportError),

    /// GitHub responded, but not with a status or body this client understands.
    #[error("Unexpected response from GitHub: {status} - {message}")]
    UnexpectedResponse {
        /// The HTTP status code returned by the server.
        status: u16,
        /// The response body, a decoder message, or the canonical status reason.
        message: String,
    },

    /// The configured API base URL could not be parsed.
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    /// The default transport could not be constructed.
    #[error("Transport build failed: {0}")]
    Build(#[from] BuildError),
}

impl Error {
    /// Returns true if the same call might succeed by simply retrying it later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

/// A specialized `Result` type for `github-auth` operations.
pub type Result<T> = std::result::Result<T, Error>;
