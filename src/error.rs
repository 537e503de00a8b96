//! Client-level error types shared across the transport, token, and resource layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller-supplied input was rejected before any request was made.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Transport failure (DNS, TCP, TLS, timeouts) after the retry budget ran out.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint rejected the credentials or returned an unusable token.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Resource endpoint answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Successful response body did not match the expected shape.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request context was cancelled.
	#[error("Request was cancelled.")]
	Cancelled,
	/// Request context deadline elapsed.
	#[error("Request deadline exceeded.")]
	DeadlineExceeded,
}
impl Error {
	/// Returns the structured API error, if this is one.
	pub fn api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(err) => Some(err),
			_ => None,
		}
	}

	/// Returns `true` when the resource endpoint answered 404.
	pub fn is_not_found(&self) -> bool {
		self.api().is_some_and(ApiError::is_not_found)
	}

	/// Returns `true` when the resource endpoint answered 401.
	pub fn is_unauthorized(&self) -> bool {
		self.api().is_some_and(ApiError::is_unauthorized)
	}

	/// Returns `true` when the resource endpoint answered 400.
	pub fn is_bad_request(&self) -> bool {
		self.api().is_some_and(ApiError::is_bad_request)
	}

	/// Returns `true` when the failure came from the request context rather than the network.
	pub fn is_cancellation(&self) -> bool {
		matches!(self, Self::Cancelled | Self::DeadlineExceeded)
	}
}

/// Configuration failures raised while building the client or a request.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
	/// Header value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: &'static str,
		/// Underlying header parsing failure.
		#[source]
		source: ::http::header::InvalidHeaderValue,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	Serialize(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Caller input rejected locally.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Resource identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::id::IdentifierError),
	/// Snapshot date filter is not `YYYY-MM-DD`.
	#[error("Date `{value}` must use the YYYY-MM-DD format.")]
	InvalidDate {
		/// Rejected input.
		value: String,
	},
}

/// Token endpoint failures. None of these are retried by the client.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered with a non-2xx status.
	#[error("Token endpoint returned HTTP {status}: {message}.")]
	TokenEndpoint {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response body.
		message: String,
	},
	/// Token endpoint responded with JSON that does not match the token shape.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned a non-positive `expires_in`.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned an empty access token.
	#[error("Token endpoint returned an empty access token.")]
	EmptyAccessToken,
}
impl AuthError {
	/// Returns the HTTP status reported by the token endpoint, when available.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenEndpoint { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Single attempt exceeded the transport timeout.
	#[error("Request timed out while calling the API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Transport refused to build the request; retrying cannot help.
	#[error("Request could not be constructed by the transport.")]
	InvalidRequest {
		/// Transport-specific builder error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Wraps a transport-specific request construction error.
	pub fn invalid_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}

	/// Returns `true` when another attempt may succeed.
	pub fn is_retryable(&self) -> bool {
		!matches!(self, Self::InvalidRequest { .. })
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_builder() || e.is_redirect() {
			Self::invalid_request(e)
		} else if e.is_timeout() {
			Self::timeout(e)
		} else {
			Self::network(e)
		}
	}
}

/// One entry of the `errors`/`details` array in an API error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
	/// Human-readable detail message.
	#[serde(default)]
	pub message: String,
	/// Machine-readable reason code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
	/// Request field the detail refers to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
}

/// Structured error parsed from a non-2xx resource response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("API returned HTTP {status}: {message}.")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Top-level message; never empty.
	pub message: String,
	/// Field-level details, if the server supplied any.
	pub details: Vec<ApiErrorDetail>,
}
impl ApiError {
	/// Parses a failure body into an [`ApiError`].
	///
	/// Accepts `{message, errors|details}` bodies, falls back to an `error` string key, then to
	/// the raw body text, and finally to the status reason phrase so `message` is never empty.
	pub fn from_response(status: u16, body: &[u8]) -> Self {
		let parsed = serde_json::from_slice::<ApiErrorBody>(body).ok();
		let (message, details) = match parsed {
			Some(body) => {
				let message = non_blank(body.message).or_else(|| non_blank(body.error));
				let details = [body.errors, body.details]
					.into_iter()
					.flatten()
					.find_map(|value| serde_json::from_value::<Vec<ApiErrorDetail>>(value).ok())
					.unwrap_or_default();

				(message, details)
			},
			None => {
				let text = String::from_utf8_lossy(body).trim().to_owned();

				((!text.is_empty()).then_some(text), Vec::new())
			},
		};
		let message = message.unwrap_or_else(|| reason_phrase(status));

		Self { status, message, details }
	}

	/// Returns `true` for HTTP 404.
	pub fn is_not_found(&self) -> bool {
		self.status == 404
	}

	/// Returns `true` for HTTP 401.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Returns `true` for HTTP 400.
	pub fn is_bad_request(&self) -> bool {
		self.status == 400
	}

	/// Returns `true` for HTTP 403.
	pub fn is_forbidden(&self) -> bool {
		self.status == 403
	}

	/// Returns `true` for HTTP 409.
	pub fn is_conflict(&self) -> bool {
		self.status == 409
	}

	/// Returns `true` for any 5xx status.
	pub fn is_server_error(&self) -> bool {
		(500..600).contains(&self.status)
	}
}

// Fields stay untyped so one malformed member cannot discard the others.
#[derive(Deserialize)]
struct ApiErrorBody {
	#[serde(default)]
	message: Option<serde_json::Value>,
	#[serde(default)]
	error: Option<serde_json::Value>,
	#[serde(default)]
	errors: Option<serde_json::Value>,
	#[serde(default)]
	details: Option<serde_json::Value>,
}

fn non_blank(value: Option<serde_json::Value>) -> Option<String> {
	match value? {
		serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
		_ => None,
	}
}

fn reason_phrase(status: u16) -> String {
	::http::StatusCode::from_u16(status)
		.ok()
		.and_then(|code| code.canonical_reason())
		.map(str::to_owned)
		.unwrap_or_else(|| format!("HTTP status {status}"))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_message_and_either_detail_key() {
		let body = br#"{"message":"invalid request","errors":[{"message":"name is required","reason":"missing","field":"name"}]}"#;
		let err = ApiError::from_response(400, body);

		assert!(err.is_bad_request());
		assert_eq!(err.message, "invalid request");
		assert_eq!(err.details.len(), 1);
		assert_eq!(err.details[0].field.as_deref(), Some("name"));

		let body = br#"{"message":"conflict","details":[{"message":"already exists"}]}"#;
		let err = ApiError::from_response(409, body);

		assert!(err.is_conflict());
		assert_eq!(err.details[0].message, "already exists");
		assert_eq!(err.details[0].reason, None);
	}

	#[test]
	fn malformed_detail_list_keeps_message() {
		let body = br#"{"message":"quota exceeded","errors":"see docs"}"#;
		let err = ApiError::from_response(422, body);

		assert_eq!(err.message, "quota exceeded");
		assert!(err.details.is_empty());

		let err = ApiError::from_response(
			400,
			br#"{"message":{"code":7},"error":"bad plan","details":[{"message":"plan"}]}"#,
		);

		assert_eq!(err.message, "bad plan");
		assert_eq!(err.details[0].message, "plan");
	}

	#[test]
	fn not_found_with_error_key_keeps_message() {
		let err = ApiError::from_response(404, br#"{"error":"not found"}"#);

		assert!(err.is_not_found());
		assert!(!err.is_unauthorized());
		assert_eq!(err.message, "not found");
		assert!(err.details.is_empty());
	}

	#[test]
	fn falls_back_to_body_text_then_reason_phrase() {
		let err = ApiError::from_response(502, b"upstream unavailable");

		assert!(err.is_server_error());
		assert_eq!(err.message, "upstream unavailable");

		let err = ApiError::from_response(401, b"");

		assert!(err.is_unauthorized());
		assert_eq!(err.message, "Unauthorized");

		let err = ApiError::from_response(403, br#"{"message":"   "}"#);

		assert!(err.is_forbidden());
		assert_eq!(err.message, "Forbidden");
	}

	#[test]
	fn error_helpers_only_match_api_errors() {
		let err = Error::from(ApiError::from_response(404, b"{}"));

		assert!(err.is_not_found());
		assert!(!err.is_bad_request());
		assert!(!Error::Cancelled.is_not_found());
		assert!(Error::DeadlineExceeded.is_cancellation());
	}

	#[test]
	fn invalid_request_is_not_retryable() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");

		assert!(TransportError::from(io).is_retryable());
		assert!(
			!TransportError::invalid_request(std::io::Error::other("bad header")).is_retryable()
		);
	}
}
