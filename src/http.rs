//! Transport primitives: the single-attempt [`HttpTransport`] seam, the retrying
//! [`TransportExecutor`], and the bundled reqwest implementation.
//!
//! Implementations of [`HttpTransport`] perform exactly one HTTP exchange and read at most
//! `body_limit` bytes of the response body. Retries, backoff, and cancellation live in the
//! executor so every transport gets the same policy.

mod executor;
mod retry;

pub use executor::*;
pub use retry::*;

// crates.io
use ::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of performing a single request/response exchange.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one instance (and its connection pool) can be shared by every call
/// site of a client. A response with any status code is a successful exchange; only failures
/// to obtain a response are [`TransportError`]s.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and reads at most `body_limit` bytes of the response body, discarding
	/// the rest.
	fn send(&self, request: HttpRequest, body_limit: usize) -> TransportFuture<'_>;
}

/// Fully resolved outbound request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Sets a header, replacing any previous value.
	pub fn header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Sets the request body.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Normalized response returned by transports.
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body, capped at the configured limit.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from its parts.
	pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers, body: body.into() }
	}

	/// Returns `true` for statuses in `200..=299`.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Decodes the body as JSON, reporting the failing path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de).map_err(|source| Error::Decode { source })
	}
}

/// reqwest-backed [`HttpTransport`] sharing one connection pool across calls.
///
/// Redirects are not followed: the API answers directly, and following a redirect would forward
/// the bearer token to whatever host the redirect names.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`] as is.
	///
	/// The client's own redirect and timeout settings apply. Build it with
	/// `redirect(reqwest::redirect::Policy::none())` to keep the bearer token on the API host.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with the given per-attempt timeout and redirects disabled.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest, body_limit: usize) -> TransportFuture<'_> {
		Box::pin(async move {
			let HttpRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method, url).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let mut response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut body = Vec::new();

			while body.len() < body_limit {
				let Some(chunk) = response.chunk().await? else {
					break;
				};
				let take = chunk.len().min(body_limit - body.len());

				body.extend_from_slice(&chunk[..take]);
			}

			Ok::<_, TransportError>(HttpResponse { status, headers, body })
		})
	}
}
