//! Access tokens, their freshness rules, and the token endpoint payload.

// self
use crate::{_prelude::*, error::AuthError};

/// Redacted secret wrapper keeping credentials and tokens out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Bearer token cached by the [`TokenManager`](crate::auth::TokenManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Scheme reported by the token endpoint (usually `Bearer`).
	pub token_type: String,
	/// Token value.
	pub value: Secret,
	/// Instant the token was received.
	pub obtained_at: OffsetDateTime,
	/// Instant the server stops accepting the token.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Returns `true` while `instant` is strictly before `expires_at - margin`.
	///
	/// At exactly `expires_at - margin` the token already counts as stale, so a refresh is never
	/// started later than the margin allows.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		instant < self.refresh_at(margin)
	}

	/// Instant at which the token must be replaced.
	pub fn refresh_at(&self, margin: Duration) -> OffsetDateTime {
		self.expires_at - margin
	}

	/// Builds the `Authorization` header value, `<token_type> <token>`.
	pub fn authorization(&self) -> String {
		format!("{} {}", self.token_type, self.value.expose())
	}
}

/// Successful token endpoint payload.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
	/// Token scheme; defaults to `Bearer` when omitted or blank.
	#[serde(default)]
	pub token_type: String,
	/// Token value.
	pub access_token: String,
	/// Lifetime in seconds.
	pub expires_in: i64,
}
impl TokenResponse {
	const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";
	// Ten years.
	const MAX_EXPIRES_IN: i64 = 10 * 365 * 24 * 60 * 60;

	/// Parses the JSON body returned by the token endpoint.
	pub fn from_slice(body: &[u8]) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| AuthError::TokenResponseParse { source }.into())
	}

	/// Converts the payload into a cached token received at `obtained_at`.
	pub fn into_token(self, obtained_at: OffsetDateTime) -> Result<AccessToken> {
		if self.access_token.is_empty() {
			return Err(AuthError::EmptyAccessToken.into());
		}
		if self.expires_in <= 0 {
			return Err(AuthError::NonPositiveExpiresIn.into());
		}
		if self.expires_in > Self::MAX_EXPIRES_IN {
			return Err(AuthError::ExpiresInOutOfRange.into());
		}

		let token_type = match self.token_type.trim() {
			"" => Self::DEFAULT_TOKEN_TYPE.to_owned(),
			value => value.to_owned(),
		};

		Ok(AccessToken {
			token_type,
			value: Secret::new(self.access_token),
			obtained_at,
			expires_at: obtained_at + Duration::seconds(self.expires_in),
		})
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("token_type", &self.token_type)
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.finish()
	}
}
