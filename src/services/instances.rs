//! Database instance endpoints: `instances[/{id}]` and `tenants/{id}/instances`.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	context::RequestContext,
	http::HttpTransport,
	id::{InstanceId, TenantId},
};

/// Lifecycle state of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
	/// Resources are being allocated.
	Provisioning,
	/// Accepting connections.
	Running,
	/// Stopped by the owner.
	Stopped,
	/// A configuration change is being applied.
	Updating,
	/// Deletion in progress.
	Deleting,
	/// Provisioning or an update failed.
	Failed,
	/// Status this client version does not know about.
	#[serde(other)]
	Unknown,
}

/// Instance record returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
	/// Instance identifier.
	pub id: InstanceId,
	/// Owning tenant.
	pub tenant_id: TenantId,
	/// Display name.
	pub name: String,
	/// Database engine (e.g. `postgres`).
	pub engine: String,
	/// Engine version.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	/// Size/plan identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plan: Option<String>,
	/// Deployment region.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	/// Lifecycle state.
	pub status: InstanceStatus,
	/// Connection endpoint once the instance is running.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,
	/// Customer-managed encryption key protecting the instance, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encryption_key_id: Option<String>,
	/// Free-form labels.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub labels: BTreeMap<String, String>,
}

/// Payload for `POST instances`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstanceRequest {
	/// Owning tenant.
	pub tenant_id: TenantId,
	/// Display name.
	pub name: String,
	/// Database engine.
	pub engine: String,
	/// Engine version; the server default applies when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	/// Size/plan identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plan: Option<String>,
	/// Deployment region.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	/// Customer-managed encryption key to protect the instance with.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encryption_key_id: Option<String>,
	/// Free-form labels.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub labels: BTreeMap<String, String>,
}
impl CreateInstanceRequest {
	/// Creates a request with the required fields set.
	pub fn new(tenant_id: TenantId, name: impl Into<String>, engine: impl Into<String>) -> Self {
		Self {
			tenant_id,
			name: name.into(),
			engine: engine.into(),
			version: None,
			plan: None,
			region: None,
			encryption_key_id: None,
			labels: BTreeMap::new(),
		}
	}
}

/// Payload for `PATCH instances/{id}`; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInstanceRequest {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New size/plan.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plan: Option<String>,
	/// Replacement label set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub labels: Option<BTreeMap<String, String>>,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the instances owned by a tenant.
	pub async fn list_instances(
		&self,
		ctx: &RequestContext,
		tenant: &TenantId,
	) -> Result<Vec<Instance>> {
		self.send_json(ctx, ApiRequest::get(format!("tenants/{tenant}/instances"))).await
	}

	/// Fetches one instance.
	pub async fn get_instance(&self, ctx: &RequestContext, id: &InstanceId) -> Result<Instance> {
		self.send_json(ctx, ApiRequest::get(format!("instances/{id}"))).await
	}

	/// Requests a new instance. Not idempotent: repeating the call provisions another instance.
	pub async fn create_instance(
		&self,
		ctx: &RequestContext,
		request: &CreateInstanceRequest,
	) -> Result<Instance> {
		self.send_json(ctx, ApiRequest::post("instances").json(request)?).await
	}

	/// Updates an instance in place.
	pub async fn update_instance(
		&self,
		ctx: &RequestContext,
		id: &InstanceId,
		request: &UpdateInstanceRequest,
	) -> Result<Instance> {
		self.send_json(ctx, ApiRequest::patch(format!("instances/{id}")).json(request)?).await
	}

	/// Deletes an instance.
	pub async fn delete_instance(&self, ctx: &RequestContext, id: &InstanceId) -> Result<()> {
		self.send_empty(ctx, ApiRequest::delete(format!("instances/{id}"))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unknown_status_does_not_fail_decoding() {
		let instance: Instance = serde_json::from_str(
			r#"{"id":"i-1","tenant_id":"t-1","name":"orders","engine":"postgres","status":"hibernating"}"#,
		)
		.expect("Unknown statuses should decode.");

		assert_eq!(instance.status, InstanceStatus::Unknown);
	}

	#[test]
	fn create_payload_skips_unset_fields() {
		let tenant = TenantId::new("t-1").expect("Tenant fixture should be valid.");
		let payload = serde_json::to_value(CreateInstanceRequest::new(tenant, "orders", "postgres"))
			.expect("Payload should serialize.");

		assert_eq!(
			payload,
			serde_json::json!({"tenant_id":"t-1","name":"orders","engine":"postgres"})
		);
	}
}
