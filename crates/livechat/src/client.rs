//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::api::{ChasitorApi, SystemApi};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::message::Messages;
use crate::types::{ChasitorInit, EndChatRequest, SendMessageRequest, Session};

/// Default timeout for requests.
///
/// Must stay above the server's long-poll window (`clientPollTimeout`).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Live Agent chat client.
///
/// Holds only the endpoint, API version and HTTP transport. Per-chat state
/// (affinity, session key, sequence) travels in the [`Header`] passed to each
/// call, so one client can serve any number of chats concurrently.
///
/// # Example
///
/// ```no_run
/// use livechat::{ChasitorInit, Header, LiveChatClient};
///
/// # async fn example() -> livechat::Result<()> {
/// let client = LiveChatClient::builder()
///     .base_url("https://d.la1-c1-ukb.salesforceliveagent.com")
///     .api_version("64")
///     .build()?;
///
/// let session = client.create_session().await?;
/// let mut header = Header::for_session(&session);
///
/// let init = ChasitorInit::new("00D...", "572...", "573...", &session.id);
/// client.init_chasitor(&header, &init).await?;
///
/// let batch = client.list_messages(&header).await?;
/// println!("{:?}", batch.message_types());
///
/// header.advance();
/// client.send_message(&header, "Hello world").await?;
///
/// header.advance();
/// client.end_chat(&header, "client").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LiveChatClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
#[derive(Debug)]
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Value of the API version header.
    pub(crate) api_version: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
}

impl LiveChatClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default transport settings.
    pub fn new(base_url: impl Into<String>, api_version: impl Into<String>) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .api_version(api_version)
            .build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the API version sent with every request.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the `System` resources (sessions, message polling).
    pub fn system(&self) -> SystemApi {
        SystemApi::new(self.clone())
    }

    /// Access the `Chasitor` resources (chat request, messages, end).
    pub fn chasitor(&self) -> ChasitorApi {
        ChasitorApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chat lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a chat session.
    ///
    /// Fails with [`Error::Protocol`] if the server leaves out the session
    /// key, id or affinity token.
    pub async fn create_session(&self) -> Result<Session> {
        self.system().session_id().await
    }

    /// Request a chat with an agent for the visitor.
    pub async fn init_chasitor(&self, header: &Header, init: &ChasitorInit) -> Result<()> {
        self.chasitor().init(header, init).await
    }

    /// Poll once for new messages.
    ///
    /// One HTTP round trip; the caller owns the poll loop.
    pub async fn list_messages(&self, header: &Header) -> Result<Messages> {
        self.system().messages(header).await
    }

    /// Send a chat message from the visitor.
    pub async fn send_message(&self, header: &Header, text: impl Into<String>) -> Result<()> {
        self.chasitor()
            .chat_message(header, &SendMessageRequest::new(text))
            .await
    }

    /// End the chat.
    pub async fn end_chat(&self, header: &Header, reason: impl Into<String>) -> Result<()> {
        self.chasitor()
            .chat_end(header, &EndChatRequest::new(reason))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// Make a GET request and decode the JSON body.
    ///
    /// An empty body (e.g. `204 No Content`) decodes to `T::default()`.
    pub(crate) async fn get<T>(&self, path: &str, header: &Header) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let response = self.send(Method::GET, path, header, None::<&()>).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(path, "Empty response body");
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a POST request with a JSON body, ignoring the response body.
    pub(crate) async fn post<B>(&self, path: &str, header: &Header, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        self.send(Method::POST, path, header, Some(body)).await?;
        Ok(())
    }

    /// Attach protocol headers, send, and reject non-2xx responses.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        header: &Header,
        body: Option<&B>,
    ) -> Result<reqwest::Response>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let headers = header.to_header_map(&self.inner.api_version)?;

        tracing::debug!(
            method = %method,
            path,
            sequence = ?header.sequence(),
            "Sending Live Agent request"
        );

        let mut request = self
            .inner
            .http
            .request(method, url)
            .headers(headers)
            .timeout(self.inner.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        Ok(response)
    }

    /// Turn a failed response into an error carrying its raw body.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status, error = %e, "Failed to read error body");
                String::new()
            }
        };

        tracing::warn!(status, body = %body, "Live Agent request failed");
        Error::Api { status, body }
    }
}

/// Builder for creating a LiveChatClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_version: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            http: None,
        }
    }

    /// Set the Live Agent endpoint, e.g. `https://d.la1-c1-ukb.salesforceliveagent.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API version header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent. Ignored when an HTTP client is supplied.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, test transports).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<LiveChatClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        let api_version = self
            .api_version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("api_version is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base URL", base_url)));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = match self.http {
            Some(http) => http,
            None => {
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("livechat/{}", env!("CARGO_PKG_VERSION")));
                reqwest::Client::builder().user_agent(user_agent).build()?
            }
        };

        Ok(LiveChatClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_version,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
