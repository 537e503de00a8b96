//! Request descriptor consumed by the dispatcher.

// crates.io
use ::http::Method;
// self
use crate::{_prelude::*, error::ConfigError};

/// Default `Content-Type` for resource calls.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Verb, versioned path, query, and body of one resource call.
///
/// `path` is relative to `{base_url}/{api_version}`; it is split on `/` and each piece is
/// percent-encoded as its own segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the versioned base.
	pub path: String,
	/// Query pairs appended in order.
	pub query: Vec<(String, String)>,
	/// `Content-Type` header sent with the request.
	pub content_type: String,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			content_type: JSON_CONTENT_TYPE.into(),
			body: None,
		}
	}

	/// `GET {path}`.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// `POST {path}`.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// `PATCH {path}`.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::PATCH, path)
	}

	/// `DELETE {path}`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body).map_err(ConfigError::Serialize)?;

		self.content_type = JSON_CONTENT_TYPE.into();
		self.body = Some(bytes);

		Ok(self)
	}

	/// Sets a raw payload with an explicit content type.
	pub fn body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
		self.content_type = content_type.into();
		self.body = Some(body.into());

		self
	}
}
