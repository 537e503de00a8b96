//! Authenticated request dispatcher shared by every resource service.

pub mod dispatch;
pub mod request;

pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenManager},
	config::ClientConfig,
	http::{HttpTransport, TransportExecutor},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestTransport>;

/// Entry point for the provisioning API.
///
/// The client owns one transport executor and one token manager; both sit behind `Arc`s, so
/// clones are cheap and share the connection pool and the cached token. Resource operations
/// (tenants, instances, snapshots, CMEK, analytics) are `impl` blocks on this type in
/// [`crate::services`].
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	config: Arc<ClientConfig>,
	executor: Arc<TransportExecutor<T>>,
	tokens: Arc<TokenManager<T>>,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// `config.timeout` bounds every attempt made through the transport, token exchanges included.
	pub fn with_transport(
		config: ClientConfig,
		credentials: Credentials,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let executor = Arc::new(
			TransportExecutor::new(transport, config.retry, config.max_body_bytes)
				.with_attempt_timeout(config.timeout),
		);
		let tokens = Arc::new(TokenManager::new(&config, &credentials, executor.clone())?);

		Ok(Self { config: Arc::new(config), executor, tokens })
	}

	/// Returns the client configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the token manager shared by every clone of this client.
	pub fn tokens(&self) -> &TokenManager<T> {
		&self.tokens
	}

	/// Returns the transport executor shared by every clone of this client.
	pub fn executor(&self) -> &TransportExecutor<T> {
		&self.executor
	}

	/// Drops the cached token; the next call exchanges the credentials again.
	pub fn invalidate_token(&self) {
		self.tokens.invalidate();
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client backed by a reqwest transport built from `config.timeout`.
	pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
		let transport = ReqwestTransport::with_timeout(config.timeout)?;

		Self::with_transport(config, credentials, transport)
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			executor: self.executor.clone(),
			tokens: self.tokens.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url.as_str())
			.field("api_version", &self.config.api_version)
			.field("tokens", &self.tokens)
			.finish()
	}
}
