//! Lists tenants through the default reqwest transport against a local mock of the API.
//!
//! The first call exchanges the client credentials for a bearer token; the second reuses the
//! cached token, so the token endpoint is hit exactly once.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use dbaas_client::{
	auth::Credentials, client::ReqwestApiClient, config::ClientConfig, context::RequestContext,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let tenants_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/tenants").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body(concat!(
					"[{\"id\":\"tenant-acme\",\"name\":\"Acme\"},",
					"{\"id\":\"tenant-globex\",\"name\":\"Globex\"}]"
				));
		})
		.await;
	let config = ClientConfig::builder(Url::parse(&server.base_url())?).build()?;
	let client = ReqwestApiClient::new(config, Credentials::new("demo-client", "super-secret"))?;
	let ctx = RequestContext::new().with_timeout(std::time::Duration::from_secs(5));
	let first = client.list_tenants(&ctx).await?;
	let second = client.list_tenants(&ctx).await?;

	for tenant in &first {
		println!("{} -> {}", tenant.id, tenant.name);
	}

	assert_eq!(first, second);

	token_mock.assert_calls_async(1).await;
	tenants_mock.assert_calls_async(2).await;

	println!("token fetches: {}", client.tokens().metrics().fetches());

	Ok(())
}
