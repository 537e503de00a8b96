// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use dbaas_client::{
	_preludet::*,
	auth::Credentials,
	client::{ApiRequest, Client, ReqwestApiClient},
	config::ClientConfig,
	context::RequestContext,
	error::AuthError,
	id::{InstanceId, TenantId},
	services::{CreateInstanceRequest, InstanceStatus},
};

async fn mock_token<'a>(server: &'a MockServer, access_token: &str) -> httpmock::Mock<'a> {
	let body = token_body(access_token, 3600);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

#[tokio::test]
async fn concurrent_calls_share_one_token_exchange() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "shared-token").await;
	let tenants = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/tenants")
				.header("authorization", "Bearer shared-token")
				.header("content-type", "application/json")
				.header("user-agent", ClientConfig::DEFAULT_USER_AGENT);
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"t-1\",\"name\":\"acme\"}]");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let ctx = RequestContext::new();
	let (first, second, third, fourth) = tokio::join!(
		client.list_tenants(&ctx),
		client.list_tenants(&ctx),
		client.list_tenants(&ctx),
		client.list_tenants(&ctx),
	);

	for result in [first, second, third, fourth] {
		let tenants = result.expect("Concurrent list call should succeed.");

		assert_eq!(tenants.len(), 1);
		assert_eq!(tenants[0].name, "acme");
	}

	token.assert_calls_async(1).await;
	tenants.assert_calls_async(4).await;
}

#[tokio::test]
async fn not_found_maps_to_structured_error() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "nf-token").await;
	let _missing = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/tenants/t-missing");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"error\":\"not found\"}");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let tenant = TenantId::new("t-missing").expect("Tenant fixture should be valid.");
	let err = client
		.get_tenant(&RequestContext::new(), &tenant)
		.await
		.expect_err("A 404 must surface as an error.");

	assert!(err.is_not_found());

	let api = err.api().expect("A 404 should carry an API error.");

	assert_eq!(api.status, 404);
	assert_eq!(api.message, "not found");
}

#[tokio::test]
async fn token_endpoint_rejection_stops_before_resource_call() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let tenants = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/tenants");
			then.status(200).body("[]");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.list_tenants(&RequestContext::new())
		.await
		.expect_err("A rejected exchange must fail the call.");

	match err {
		Error::Auth(AuthError::TokenEndpoint { status, message }) => {
			assert_eq!(status, 401);
			assert_eq!(message, "invalid_client");
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	token.assert_calls_async(1).await;
	tenants.assert_calls_async(0).await;
	assert!(client.tokens().cached().is_none());
}

#[tokio::test]
async fn create_instance_round_trip() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "create-token").await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/instances")
				.header("content-type", "application/json")
				.json_body(json!({"tenant_id":"t-1","name":"orders","engine":"postgres"}));
			then.status(201).header("content-type", "application/json").json_body(json!({
				"id": "i-9",
				"tenant_id": "t-1",
				"name": "orders",
				"engine": "postgres",
				"status": "provisioning"
			}));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let tenant = TenantId::new("t-1").expect("Tenant fixture should be valid.");
	let instance = client
		.create_instance(
			&RequestContext::new(),
			&CreateInstanceRequest::new(tenant.clone(), "orders", "postgres"),
		)
		.await
		.expect("Instance creation should succeed.");

	assert_eq!(instance.id, InstanceId::new("i-9").expect("Instance fixture should be valid."));
	assert_eq!(instance.tenant_id, tenant);
	assert_eq!(instance.name, "orders");
	assert_eq!(instance.status, InstanceStatus::Provisioning);

	create.assert_calls_async(1).await;
}

#[tokio::test]
async fn snapshot_listing_forwards_date_filter() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "snap-token").await;
	let snapshots = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/instances/i-1/snapshots").query_param("date", "2025-01-02");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"s-1\",\"instance_id\":\"i-1\",\"size_bytes\":2048}]");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let instance = InstanceId::new("i-1").expect("Instance fixture should be valid.");
	let listed = client
		.list_snapshots(&RequestContext::new(), &instance, Some("2025-01-02"))
		.await
		.expect("Snapshot listing should succeed.");

	assert_eq!(listed.len(), 1);
	assert_eq!(listed[0].size_bytes, Some(2048));

	snapshots.assert_calls_async(1).await;
}

#[tokio::test]
async fn oversized_bodies_are_truncated() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "big-token").await;
	let _blob = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/blob");
			then.status(200).body("x".repeat(4096));
		})
		.await;
	let config = test_config_builder(&server.base_url())
		.max_body_bytes(1024)
		.build()
		.expect("Config should be valid.");
	let client: ReqwestApiClient =
		Client::new(config, Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET))
			.expect("Client should build.");
	let response = client
		.execute(&RequestContext::new(), ApiRequest::get("blob"))
		.await
		.expect("Blob fetch should succeed.");

	assert_eq!(response.body.len(), 1024);
	assert!(response.body.iter().all(|byte| *byte == b'x'));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "del-token").await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v1/instances/i-3");
			then.status(204);
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let instance = InstanceId::new("i-3").expect("Instance fixture should be valid.");

	client
		.delete_instance(&RequestContext::new(), &instance)
		.await
		.expect("Delete should succeed.");

	delete.assert_calls_async(1).await;
}

#[tokio::test]
async fn redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "redirect-token").await;
	let moved = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/tenants");
			then.status(302).header("location", "/elsewhere");
		})
		.await;
	let elsewhere = server
		.mock_async(|when, then| {
			when.method(GET).path("/elsewhere");
			then.status(200).body("[]");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.list_tenants(&RequestContext::new())
		.await
		.expect_err("A redirect must surface as an API error.");

	assert_eq!(err.api().map(|api| api.status), Some(302));

	moved.assert_calls_async(1).await;
	elsewhere.assert_calls_async(0).await;
}
