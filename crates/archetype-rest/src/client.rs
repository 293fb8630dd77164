//! Main client implementation

use crate::endpoints::ArchetypeEndpoints;
use crate::error::{invalid_config, ArchetypeResult};
use crate::transport::SignedTransport;
use archetype_auth::{Clock, Credentials, SystemClock};
use archetype_types::{Archetype, StrategyArchetypes};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Archetype API client
///
/// Cheap to clone and safe to share between tasks: it only holds immutable
/// configuration, and every call signs its own request.
///
/// # Example
///
/// ```no_run
/// use archetype_rest::{ArchetypeClient, ClientConfig, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new("https://api.example.com", Credentials::from_env()?)
///         .with_timeout(10);
///     let client = ArchetypeClient::with_config(config)?;
///
///     let strategy = client.get_strategy_archetypes("A052").await?;
///     println!("{} archetypes", strategy.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ArchetypeClient {
    transport: SignedTransport,
}

impl ArchetypeClient {
    /// Create a client with the default timeout
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API, e.g. `https://api.example.com`
    /// * `api_key` - API key sent with every request
    /// * `api_secret` - Shared secret used to sign requests
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> ArchetypeResult<Self> {
        let credentials = Credentials::new(api_key, api_secret).map_err(invalid_config)?;
        Self::with_config(ClientConfig::new(base_url, credentials))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> ArchetypeResult<Self> {
        let transport = SignedTransport::new(config)?;

        info!(base_url = transport.base_url(), "Created Archetype API client");

        Ok(Self { transport })
    }

    /// Underlying signed transport
    pub fn transport(&self) -> &SignedTransport {
        &self.transport
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Send an arbitrary signed request
    ///
    /// See [`SignedTransport::request`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> ArchetypeResult<Value> {
        self.transport.request(method, path, query, body).await
    }

    // ========================================================================
    // Archetype Endpoints
    // ========================================================================

    /// Get archetype endpoints
    pub fn archetypes(&self) -> ArchetypeEndpoints<'_> {
        ArchetypeEndpoints::new(&self.transport)
    }

    /// Get all archetype IDs for a strategy
    ///
    /// # Arguments
    /// * `strategy_id` - Strategy code, e.g. "A052"
    pub async fn get_strategy_archetypes(
        &self,
        strategy_id: &str,
    ) -> ArchetypeResult<StrategyArchetypes> {
        self.archetypes().get_strategy_archetypes(strategy_id).await
    }

    /// Get the portfolio allocation of an archetype
    ///
    /// # Arguments
    /// * `archetype_id` - Archetype ID, e.g. "A052071812-7a9581c6-ad66-474b-a738-5d00ee9ec3c2"
    pub async fn get_archetype(&self, archetype_id: &str) -> ArchetypeResult<Archetype> {
        self.archetypes().get_archetype(archetype_id).await
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API; trailing slashes are stripped
    pub base_url: String,
    /// API credentials
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Whether to honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_system_proxy: bool,
    /// Source of request timestamps
    pub clock: Arc<dyn Clock>,
}

impl ClientConfig {
    /// Create a new configuration with defaults for everything but the
    /// endpoint and credentials
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            use_system_proxy: true,
            clock: Arc::new(SystemClock),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Connect directly, ignoring proxy environment variables
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    /// Set the clock used to timestamp requests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
