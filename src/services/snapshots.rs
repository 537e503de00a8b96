//! Snapshot endpoints: `instances/{id}/snapshots` and `snapshots/{id}`.

// crates.io
use time::{Date, macros::format_description};
// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	context::RequestContext,
	error::ValidationError,
	http::HttpTransport,
	id::{InstanceId, SnapshotId},
	services::Instance,
};

/// Snapshot record returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
	/// Snapshot identifier.
	pub id: SnapshotId,
	/// Instance the snapshot was taken from.
	pub instance_id: InstanceId,
	/// Lifecycle status reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Size in bytes, once known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size_bytes: Option<u64>,
	/// Creation timestamp (RFC 3339) as reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
}

/// Payload for `POST instances/{id}/snapshots`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSnapshotRequest {
	/// Optional human label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Payload for `POST snapshots/{id}/restore`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSnapshotRequest {
	/// Restore into this existing instance; the server creates a new one when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_instance_id: Option<InstanceId>,
	/// Name for the instance created by the restore.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// Checks that `value` is a calendar date written as `YYYY-MM-DD`.
pub fn validate_snapshot_date(value: &str) -> Result<Date, ValidationError> {
	let invalid = || ValidationError::InvalidDate { value: value.to_owned() };

	if value.len() != 10 {
		return Err(invalid());
	}

	Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists snapshots of an instance, optionally restricted to one day.
	///
	/// A malformed `date` fails with [`Error::Validation`] before any network call.
	pub async fn list_snapshots(
		&self,
		ctx: &RequestContext,
		instance: &InstanceId,
		date: Option<&str>,
	) -> Result<Vec<Snapshot>> {
		let mut request = ApiRequest::get(format!("instances/{instance}/snapshots"));

		if let Some(date) = date {
			validate_snapshot_date(date)?;

			request = request.query("date", date);
		}

		self.send_json(ctx, request).await
	}

	/// Starts a snapshot of an instance.
	pub async fn create_snapshot(
		&self,
		ctx: &RequestContext,
		instance: &InstanceId,
		request: &CreateSnapshotRequest,
	) -> Result<Snapshot> {
		let request = ApiRequest::post(format!("instances/{instance}/snapshots")).json(request)?;

		self.send_json(ctx, request).await
	}

	/// Fetches one snapshot.
	pub async fn get_snapshot(&self, ctx: &RequestContext, id: &SnapshotId) -> Result<Snapshot> {
		self.send_json(ctx, ApiRequest::get(format!("snapshots/{id}"))).await
	}

	/// Deletes a snapshot.
	pub async fn delete_snapshot(&self, ctx: &RequestContext, id: &SnapshotId) -> Result<()> {
		self.send_empty(ctx, ApiRequest::delete(format!("snapshots/{id}"))).await
	}

	/// Restores a snapshot and returns the instance it was restored into.
	pub async fn restore_snapshot(
		&self,
		ctx: &RequestContext,
		id: &SnapshotId,
		request: &RestoreSnapshotRequest,
	) -> Result<Instance> {
		let request = ApiRequest::post(format!("snapshots/{id}/restore")).json(request)?;

		self.send_json(ctx, request).await
	}
}
