//! Tenant endpoints: `tenants[/{id}]`.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	context::RequestContext,
	http::HttpTransport,
	id::TenantId,
};

/// Tenant record returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
	/// Tenant identifier.
	pub id: TenantId,
	/// Display name.
	pub name: String,
	/// Lifecycle status reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Creation timestamp (RFC 3339) as reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	/// Free-form labels.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub labels: BTreeMap<String, String>,
}

/// Payload for `POST tenants`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenantRequest {
	/// Display name.
	pub name: String,
	/// Free-form labels.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub labels: BTreeMap<String, String>,
}

/// Payload for `PATCH tenants/{id}`; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTenantRequest {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Replacement label set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub labels: Option<BTreeMap<String, String>>,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists tenants visible to the credentials.
	pub async fn list_tenants(&self, ctx: &RequestContext) -> Result<Vec<Tenant>> {
		self.send_json(ctx, ApiRequest::get("tenants")).await
	}

	/// Fetches one tenant.
	pub async fn get_tenant(&self, ctx: &RequestContext, id: &TenantId) -> Result<Tenant> {
		self.send_json(ctx, ApiRequest::get(format!("tenants/{id}"))).await
	}

	/// Creates a tenant.
	pub async fn create_tenant(
		&self,
		ctx: &RequestContext,
		request: &CreateTenantRequest,
	) -> Result<Tenant> {
		self.send_json(ctx, ApiRequest::post("tenants").json(request)?).await
	}

	/// Updates a tenant in place.
	pub async fn update_tenant(
		&self,
		ctx: &RequestContext,
		id: &TenantId,
		request: &UpdateTenantRequest,
	) -> Result<Tenant> {
		self.send_json(ctx, ApiRequest::patch(format!("tenants/{id}")).json(request)?).await
	}

	/// Deletes a tenant.
	pub async fn delete_tenant(&self, ctx: &RequestContext, id: &TenantId) -> Result<()> {
		self.send_empty(ctx, ApiRequest::delete(format!("tenants/{id}"))).await
	}
}
