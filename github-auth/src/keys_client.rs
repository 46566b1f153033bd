use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, trace};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::{
    errors::{Error, Result},
    global::global_transport,
    key::Key,
    transport::{HttpTransport, TransportResponse},
};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// `User-Agent` sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("github_auth", "-", env!("CARGO_PKG_VERSION"));

/// One entry of the `GET /users/{username}/keys` response. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct KeyRecord {
    key: String,
}

#[derive(Debug, Clone, Default)]
#[must_use]
/// Configures a [`KeysClient`] before construction.
///
/// # Defaults
/// - API base URL: [`DEFAULT_API_URL`]
/// - User-agent: [`DEFAULT_USER_AGENT`] (`github_auth-<crate-version>`)
/// - Transport: the process-wide [`global_transport`](crate::global_transport)
///
/// # Example
/// ```no_run
/// # use github_auth::KeysClient;
/// let client = KeysClient::builder()
///     .username("chrishunt")
///     .user_agent("my_sshd-1.4.0")
///     .build()?;
/// # Ok::<_, github_auth::Error>(())
/// ```
pub struct KeysClientBuilder {
    username: Option<String>,
    user_agent: Option<String>,
    api_url: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl KeysClientBuilder {
    /// The GitHub user whose keys to fetch. Required.
    pub fn username<S: Into<String>>(&mut self, username: S) -> &mut Self {
        self.username = Some(username.into());
        self
    }

    /// Replace the `User-Agent` tag, conventionally `<product>-<version>`.
    pub fn user_agent<S: Into<String>>(&mut self, user_agent: S) -> &mut Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Point the client at another API root, e.g. a GitHub Enterprise host
    /// (`https://ghe.example.com/api/v3`).
    pub fn api_url<S: Into<String>>(&mut self, api_url: S) -> &mut Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Inject the transport used to reach the API.
    pub fn transport(&mut self, transport: Arc<dyn HttpTransport>) -> &mut Self {
        self.transport = Some(transport);
        self
    }

    /// Build [`KeysClient`]. Performs no network I/O.
    ///
    /// Without an injected transport the client uses
    /// [`global_transport`](crate::global_transport), which builds and stores
    /// the process-wide default on first use.
    ///
    /// # Errors
    /// - [`Error::UsernameRequired`] if no username, or an empty one, was given.
    /// - [`Error::InvalidUsername`] if the username is `.` or `..`.
    /// - [`Error::InvalidApiUrl`] if the API base URL does not parse.
    /// - [`Error::Build`] if the default transport had to be created and failed.
    pub fn build(&self) -> Result<KeysClient> {
        let username = match self.username.as_deref() {
            None | Some("") => return Err(Error::UsernameRequired),
            // Dot segments are normalized away by URL parsing, even percent-encoded.
            Some(username @ ("." | "..")) => {
                return Err(Error::InvalidUsername {
                    username: username.to_string(),
                });
            }
            Some(username) => escape_username(username),
        };

        let api_url = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(api_url)?;
        let url = format!("{}/users/{username}/keys", api_url.trim_end_matches('/'));

        let transport = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(global_transport()?),
        };

        Ok(KeysClient {
            username,
            url,
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            transport,
            keys: OnceCell::new(),
        })
    }
}

/// Fetches the public SSH keys GitHub holds for one user.
///
/// The username is URL-escaped once, at construction. Nothing goes over the
/// network until [`KeysClient::keys`] is first called; the first successful
/// answer is then kept for the lifetime of the client.
///
/// ### Memoization
/// - Concurrent first calls are serialized: one request is made and every
///   caller receives its result.
/// - Failures are not remembered. A later call after an error issues a new
///   request, so callers decide whether and when to retry.
///
/// ### Example
/// ```no_run
/// # use github_auth::{Error, KeysClient};
/// # async fn run(presented: &str) -> github_auth::Result<bool> {
/// let client = KeysClient::new("chrishunt")?;
/// match client.keys().await {
///     Ok(keys) => Ok(keys.iter().any(|k| k.key() == presented)),
///     Err(Error::UserDoesNotExist { .. }) => Ok(false),
///     Err(e) => Err(e),
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct KeysClient {
    username: String,
    url: String,
    user_agent: String,
    transport: Arc<dyn HttpTransport>,
    keys: OnceCell<Vec<Key>>,
}

impl KeysClient {
    /// Client for `username` with default API URL, user-agent and transport.
    ///
    /// # Errors
    /// Same as [`KeysClientBuilder::build`].
    pub fn new<S: Into<String>>(username: S) -> Result<KeysClient> {
        Self::builder().username(username).build()
    }

    /// Returns a builder to edit settings before creating [`KeysClient`].
    pub fn builder() -> KeysClientBuilder {
        KeysClientBuilder::default()
    }

    // === Getters ===

    /// The URL-escaped username, e.g. `spaces+are+%21o.k.`.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `User-Agent` sent with the request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The URL the keys are fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The user's keys, in the order GitHub lists them.
    ///
    /// The first successful call fetches; later calls return the same slice
    /// without touching the network.
    ///
    /// # Errors
    /// - [`Error::UserDoesNotExist`] when GitHub answers `404`.
    /// - [`Error::Unavailable`] when the transport fails.
    /// - [`Error::UnexpectedResponse`] for any other status, or a `200` body
    ///   that is not a list of keys.
    pub async fn keys(&self) -> Result<&[Key]> {
        if let Some(keys) = self.keys.get() {
            trace!(username = %self.username, "serving memoized keys");
            return Ok(keys.as_slice());
        }

        let keys = self.keys.get_or_try_init(|| self.fetch()).await?;
        Ok(keys.as_slice())
    }

    #[instrument(skip(self), fields(username = %self.username))]
    async fn fetch(&self) -> Result<Vec<Key>> {
        debug!(url = %self.url, "requesting keys");

        let response = self
            .transport
            .get(&self.url, &[("User-Agent", self.user_agent.as_str())])
            .await?;
        let keys = parse_keys(&self.username, response)?;

        debug!(count = keys.len(), "fetched keys");
        Ok(keys)
    }
}

/// Form-urlencoded component escaping: space becomes `+`, anything outside
/// `[A-Za-z0-9*._-]` is percent-encoded.
fn escape_username(username: &str) -> String {
    byte_serialize(username.as_bytes()).collect()
}

fn parse_keys(username: &str, response: TransportResponse) -> Result<Vec<Key>> {
    match response.status {
        200 => {
            let records: Vec<KeyRecord> =
                serde_json::from_str(&response.body).map_err(|e| Error::UnexpectedResponse {
                    status: 200,
                    message: format!("malformed keys list: {e}"),
                })?;

            Ok(records
                .into_iter()
                .map(|record| Key::new(username, record.key))
                .collect())
        }
        404 => Err(Error::UserDoesNotExist {
            username: username.to_string(),
        }),
        status => {
            let message = if response.body.trim().is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown Error")
                    .to_string()
            } else {
                response.body
            };

            Err(Error::UnexpectedResponse { status, message })
        }
    }
}
