// self
use crate::{_prelude::*, config::ClientConfig, http::RetryPolicy};

/// Errors raised while constructing or validating client configs.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL must use HTTP or HTTPS.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL cannot be used as a base: {url}.")]
	BaseUrlCannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// API version must be a single non-empty path segment.
	#[error("API version `{version}` must be a single non-empty path segment.")]
	InvalidApiVersion {
		/// Rejected version string.
		version: String,
	},
	/// Timeout must be greater than zero.
	#[error("Timeout must be greater than zero.")]
	ZeroTimeout,
	/// Body limit must be greater than zero.
	#[error("Maximum body size must be greater than zero.")]
	ZeroBodyLimit,
	/// Retry waits must satisfy `min_wait <= max_wait`.
	#[error("Retry minimum wait exceeds the maximum wait.")]
	InvalidRetryWindow,
	/// Token margin cannot be negative.
	#[error("Token safety margin cannot be negative.")]
	NegativeTokenMargin,
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Base URL every endpoint is resolved against.
	pub base_url: Url,
	/// API version segment.
	pub api_version: String,
	/// Per-attempt timeout.
	pub timeout: StdDuration,
	/// Transport retry policy.
	pub retry: RetryPolicy,
	/// Response body cap.
	pub max_body_bytes: usize,
	/// Token safety margin.
	pub token_margin: Duration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with defaults and the provided base URL.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			api_version: ClientConfig::DEFAULT_API_VERSION.into(),
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			retry: RetryPolicy::default(),
			max_body_bytes: ClientConfig::DEFAULT_MAX_BODY_BYTES,
			token_margin: ClientConfig::DEFAULT_TOKEN_MARGIN,
			user_agent: ClientConfig::DEFAULT_USER_AGENT.into(),
		}
	}

	/// Overrides the API version segment.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Overrides the per-attempt timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the whole retry policy.
	pub fn retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Overrides only the maximum retry count, keeping the backoff window.
	pub fn max_retries(mut self, max_retries: u32) -> Self {
		self.retry.max_retries = max_retries;

		self
	}

	/// Overrides the response body cap.
	pub fn max_body_bytes(mut self, limit: usize) -> Self {
		self.max_body_bytes = limit;

		self
	}

	/// Overrides the token safety margin.
	pub fn token_margin(mut self, margin: Duration) -> Self {
		self.token_margin = margin;

		self
	}

	/// Overrides the `User-Agent` header value.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let config = ClientConfig {
			base_url: self.base_url,
			api_version: self.api_version,
			timeout: self.timeout,
			retry: self.retry,
			max_body_bytes: self.max_body_bytes,
			token_margin: self.token_margin,
			user_agent: self.user_agent,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	/// Validates invariants for the config.
	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ClientConfigError::BaseUrlCannotBeABase {
				url: self.base_url.to_string(),
			});
		}

		validate_api_version(&self.api_version)?;

		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}
		if self.max_body_bytes == 0 {
			return Err(ClientConfigError::ZeroBodyLimit);
		}
		if self.retry.min_wait > self.retry.max_wait {
			return Err(ClientConfigError::InvalidRetryWindow);
		}
		if self.token_margin.is_negative() {
			return Err(ClientConfigError::NegativeTokenMargin);
		}

		Ok(())
	}
}

fn validate_api_version(version: &str) -> Result<(), ClientConfigError> {
	if version.is_empty() || version.contains('/') || version.chars().any(char::is_whitespace) {
		Err(ClientConfigError::InvalidApiVersion { version: version.to_owned() })
	} else {
		Ok(())
	}
}
