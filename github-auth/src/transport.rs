use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{BuildError, TransportError};

/// Status code and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, expected to be JSON.
    pub body: String,
}

/// The capability a [`KeysClient`](crate::KeysClient) uses to reach GitHub.
///
/// Implementations perform a single `GET` and hand back whatever the server
/// answered, whatever the status. Only failures to get an answer at all are
/// reported as [`TransportError`].
///
/// [`ReqwestTransport`] is the stock implementation. Custom transports (test
/// doubles, proxies, recorded fixtures) are injected with
/// [`KeysClientBuilder::transport`](crate::KeysClientBuilder::transport).
#[async_trait]
pub trait HttpTransport: Debug + Send + Sync {
    /// Issue a `GET` for `url` with the given request headers.
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
#[must_use]
/// Configures a [`ReqwestTransport`] before construction.
///
/// # Defaults
/// - HTTP request timeout: reqwest default (no global timeout) unless set via
///   [`Self::request_timeout`]
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use github_auth::ReqwestTransport;
/// let transport = ReqwestTransport::builder()
///     .request_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok::<_, github_auth::BuildError>(())
/// ```
pub struct ReqwestTransportBuilder {
    http_request_timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Set HTTP requests timeout. An expired timeout surfaces as
    /// [`Error::Unavailable`](crate::Error::Unavailable).
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.http_request_timeout = Some(timeout);

        self
    }

    /// Build [`ReqwestTransport`]
    ///
    /// # Errors
    /// [`BuildError::Http`] if reqwest rejects the configuration.
    pub fn build(&self) -> Result<ReqwestTransport, BuildError> {
        let mut http_builder = reqwest::Client::builder();

        if let Some(timeout) = self.http_request_timeout {
            http_builder = http_builder.timeout(timeout);
        }

        Ok(ReqwestTransport {
            http: http_builder.build()?,
        })
    }
}

/// [`HttpTransport`] backed by a [`reqwest::Client`].
///
/// Clones are cheap and share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest defaults.
    ///
    /// # Errors
    /// [`BuildError::Http`] if reqwest cannot build its client (e.g. the TLS
    /// backend fails to initialize).
    pub fn new() -> Result<ReqwestTransport, BuildError> {
        Self::builder().build()
    }

    /// Returns a builder to edit settings before creating [`ReqwestTransport`].
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
