//! Customer-managed encryption key endpoints: `cmek[/{id}]`.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	context::RequestContext,
	http::HttpTransport,
	id::KeyId,
};

/// Registered encryption key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKey {
	/// Key identifier.
	pub id: KeyId,
	/// Cloud KMS provider (e.g. `aws`, `gcp`, `azure`).
	pub provider: String,
	/// Provider-side key reference (ARN, resource name, or vault URI).
	pub key_uri: String,
	/// Region the key lives in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	/// Validation status reported by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
}

/// Payload for `POST cmek`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEncryptionKeyRequest {
	/// Cloud KMS provider.
	pub provider: String,
	/// Provider-side key reference.
	pub key_uri: String,
	/// Region the key lives in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists registered encryption keys.
	pub async fn list_encryption_keys(&self, ctx: &RequestContext) -> Result<Vec<EncryptionKey>> {
		self.send_json(ctx, ApiRequest::get("cmek")).await
	}

	/// Registers a key with the service.
	pub async fn create_encryption_key(
		&self,
		ctx: &RequestContext,
		request: &CreateEncryptionKeyRequest,
	) -> Result<EncryptionKey> {
		self.send_json(ctx, ApiRequest::post("cmek").json(request)?).await
	}

	/// Fetches one key.
	pub async fn get_encryption_key(
		&self,
		ctx: &RequestContext,
		id: &KeyId,
	) -> Result<EncryptionKey> {
		self.send_json(ctx, ApiRequest::get(format!("cmek/{id}"))).await
	}

	/// Deregisters a key. The server refuses while instances still use it.
	pub async fn delete_encryption_key(&self, ctx: &RequestContext, id: &KeyId) -> Result<()> {
		self.send_empty(ctx, ApiRequest::delete(format!("cmek/{id}"))).await
	}
}
