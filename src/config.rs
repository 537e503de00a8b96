//! Client configuration consumed by the transport, token, and dispatch layers.
//!
//! Values are supplied by the owning application; the client never reads environment
//! variables or files on its own.

/// Builder API for assembling client configs.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, http::RetryPolicy};

/// Immutable configuration shared by every call made through a client instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL every endpoint is resolved against.
	pub base_url: Url,
	/// API version segment inserted between the base URL and resource paths.
	pub api_version: String,
	/// Per-attempt timeout enforced by the transport executor for every transport.
	pub timeout: StdDuration,
	/// Transport retry policy.
	pub retry: RetryPolicy,
	/// Response bodies beyond this many bytes are truncated.
	pub max_body_bytes: usize,
	/// Tokens are refreshed once they are this close to expiry.
	pub token_margin: Duration,
	/// `User-Agent` header sent with every request.
	pub user_agent: String,
}
impl ClientConfig {
	/// Default API version segment.
	pub const DEFAULT_API_VERSION: &'static str = "v1";
	/// Default response body cap (10 MiB).
	pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
	/// Default token safety margin.
	pub const DEFAULT_TOKEN_MARGIN: Duration = Duration::seconds(60);
	/// Default per-attempt timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);
	/// Default `User-Agent` header value.
	pub const DEFAULT_USER_AGENT: &'static str =
		concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
	/// Path of the token endpoint relative to the base URL.
	pub const TOKEN_PATH: &'static str = "oauth/token";

	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Resolves the token endpoint, `{base}/oauth/token`.
	pub fn token_url(&self) -> Url {
		self.join_segments(Self::TOKEN_PATH.split('/'))
	}

	/// Resolves a versioned resource endpoint, `{base}/{api_version}/{path}`.
	///
	/// Each `/`-separated piece of `path` is pushed as its own segment, so reserved characters
	/// inside a piece are percent-encoded rather than interpreted.
	pub fn resource_url(&self, path: &str) -> Url {
		let segments = std::iter::once(self.api_version.as_str())
			.chain(path.split('/').filter(|segment| !segment.is_empty()));

		self.join_segments(segments)
	}

	fn join_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
		let mut url = self.base_url.clone();

		url.set_query(None);
		url.set_fragment(None);

		// `validate` rejects cannot-be-a-base URLs, so segments are always available.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}

		url
	}
}
