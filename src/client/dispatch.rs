//! Authenticated execution: token, headers, transport, status check.

// crates.io
use ::http::{
	HeaderValue,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client, JSON_CONTENT_TYPE},
	context::RequestContext,
	error::{ApiError, ConfigError},
	http::{HttpRequest, HttpResponse, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Executes `request` with a valid bearer token and returns the raw 2xx response.
	///
	/// Token failures are returned before any resource call is attempted. Non-2xx responses
	/// become [`Error::Api`]; they are never handed back as successes.
	pub async fn execute(
		&self,
		ctx: &RequestContext,
		request: ApiRequest,
	) -> Result<HttpResponse> {
		const KIND: CallKind = CallKind::Resource;

		let span = CallSpan::new(KIND, &format!("{} {}", request.method, request.path));

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(ctx, request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Executes `request` and decodes the 2xx body as `R`.
	pub async fn send_json<R>(&self, ctx: &RequestContext, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.execute(ctx, request).await?.json()
	}

	/// Executes `request` and discards the 2xx body.
	pub async fn send_empty(&self, ctx: &RequestContext, request: ApiRequest) -> Result<()> {
		self.execute(ctx, request).await.map(|_| ())
	}

	async fn dispatch(&self, ctx: &RequestContext, request: ApiRequest) -> Result<HttpResponse> {
		ctx.check()?;

		let token = self.tokens.ensure_valid_token(ctx).await?;
		let ApiRequest { method, path, query, content_type, body } = request;
		let mut url = self.config.resource_url(&path);

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(&query);
		}

		let mut authorization = header_value("authorization", &token.authorization())?;

		authorization.set_sensitive(true);

		let mut outbound = HttpRequest::new(method, url)
			.header(AUTHORIZATION, authorization)
			.header(CONTENT_TYPE, header_value("content-type", &content_type)?)
			.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE))
			.header(USER_AGENT, header_value("user-agent", &self.config.user_agent)?);

		if let Some(body) = body {
			outbound = outbound.body(body);
		}

		let response = self.executor.execute(ctx, outbound).await?;

		if !response.is_success() {
			return Err(ApiError::from_response(response.status.as_u16(), &response.body).into());
		}

		Ok(response)
	}
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
	HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeader { name, source }.into())
}
