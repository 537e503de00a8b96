//! Analytics session endpoints: `instances/{id}/analytics` and `analytics/{id}`.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	context::RequestContext,
	http::HttpTransport,
	id::{InstanceId, SessionId},
};

/// Read-only analytics session attached to an instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSession {
	/// Session identifier.
	pub id: SessionId,
	/// Instance the session reads from.
	pub instance_id: InstanceId,
	/// Lifecycle status reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Query endpoint once the session is ready.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,
	/// Server-side expiry (RFC 3339).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<String>,
}

/// Payload for `POST instances/{id}/analytics`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAnalyticsSessionRequest {
	/// Requested session lifetime in seconds; the server default applies when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ttl_seconds: Option<u64>,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Opens an analytics session on an instance.
	pub async fn create_analytics_session(
		&self,
		ctx: &RequestContext,
		instance: &InstanceId,
		request: &CreateAnalyticsSessionRequest,
	) -> Result<AnalyticsSession> {
		let request = ApiRequest::post(format!("instances/{instance}/analytics")).json(request)?;

		self.send_json(ctx, request).await
	}

	/// Fetches one session.
	pub async fn get_analytics_session(
		&self,
		ctx: &RequestContext,
		id: &SessionId,
	) -> Result<AnalyticsSession> {
		self.send_json(ctx, ApiRequest::get(format!("analytics/{id}"))).await
	}

	/// Closes a session and releases its resources.
	pub async fn close_analytics_session(&self, ctx: &RequestContext, id: &SessionId) -> Result<()> {
		self.send_empty(ctx, ApiRequest::delete(format!("analytics/{id}"))).await
	}
}
