//! Plugs a hand-written [`HttpTransport`] into the client.
//!
//! The transport below answers from memory: the token endpoint returns a fixed token and every
//! resource call returns an empty JSON array. Swapping the HTTP stack only requires implementing
//! the single `send` method; retries, token caching, and error mapping stay in the client.

// std
use std::sync::atomic::{AtomicUsize, Ordering};
// crates.io
use color_eyre::Result;
// self
use dbaas_client::{
	auth::Credentials,
	client::Client,
	config::ClientConfig,
	context::RequestContext,
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	http_types::{HeaderMap, StatusCode},
	url::Url,
};

#[derive(Default)]
struct InMemoryTransport {
	requests: AtomicUsize,
}
impl HttpTransport for InMemoryTransport {
	fn send(&self, request: HttpRequest, body_limit: usize) -> TransportFuture<'_> {
		self.requests.fetch_add(1, Ordering::Relaxed);

		let mut body = if request.url.path().ends_with("/oauth/token") {
			b"{\"access_token\":\"in-memory\",\"token_type\":\"Bearer\",\"expires_in\":600}".to_vec()
		} else {
			b"[]".to_vec()
		};

		body.truncate(body_limit);

		Box::pin(async move {
			Ok::<_, TransportError>(HttpResponse::new(StatusCode::OK, HeaderMap::new(), body))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::builder(Url::parse("https://dbaas.example.com")?).build()?;
	let client: Client<InMemoryTransport> = Client::with_transport(
		config,
		Credentials::new("demo-client", "super-secret"),
		InMemoryTransport::default(),
	)?;
	let tenants = client.list_tenants(&RequestContext::new()).await?;

	println!("tenants: {}", tenants.len());
	println!("requests sent: {}", client.executor().transport().requests.load(Ordering::Relaxed));

	Ok(())
}
