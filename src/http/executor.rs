// crates.io
use tokio::time;
// self
use crate::{
	_prelude::*,
	context::RequestContext,
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, RetryPolicy},
	obs::{self, RetryReason},
};

/// Runs requests through an [`HttpTransport`] with bounded retries and a response-size cap.
///
/// One executor (and therefore one transport/connection pool) is shared by every call site of a
/// client, token traffic included. Retries cover transport errors that report themselves as
/// retryable and responses whose status the [`RetryPolicy`] marks as retryable. Any other
/// response, whatever its status, is returned to the caller untouched.
#[derive(Debug)]
pub struct TransportExecutor<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	policy: RetryPolicy,
	body_limit: usize,
	attempt_timeout: Option<StdDuration>,
}
impl<T> TransportExecutor<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates an executor around a shared transport.
	pub fn new(transport: impl Into<Arc<T>>, policy: RetryPolicy, body_limit: usize) -> Self {
		Self { transport: transport.into(), policy, body_limit, attempt_timeout: None }
	}

	/// Fails any single attempt that takes longer than `timeout` with a retryable
	/// [`TransportError::Timeout`], whatever the transport's own settings.
	pub fn with_attempt_timeout(mut self, timeout: StdDuration) -> Self {
		self.attempt_timeout = Some(timeout);

		self
	}

	/// Returns the shared transport.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Returns the retry policy.
	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	/// Returns the response body cap in bytes.
	pub fn body_limit(&self) -> usize {
		self.body_limit
	}

	/// Returns the per-attempt timeout, if one is set.
	pub fn attempt_timeout(&self) -> Option<StdDuration> {
		self.attempt_timeout
	}

	/// Executes `request`, retrying transient failures until the policy or context says stop.
	///
	/// Fails with [`Error::Cancelled`]/[`Error::DeadlineExceeded`] before any I/O when `ctx` is
	/// already done. When attempts run out, the last transport error is returned; for retryable
	/// statuses the last response is returned instead.
	pub async fn execute(
		&self,
		ctx: &RequestContext,
		request: HttpRequest,
	) -> Result<HttpResponse> {
		ctx.check()?;

		let attempts = self.policy.attempts();
		let mut attempt = 0;

		loop {
			attempt += 1;

			let send = self.transport.send(request.clone(), self.body_limit);
			let outcome = match self.attempt_timeout {
				Some(limit) => ctx
					.run(time::timeout(limit, send))
					.await?
					.unwrap_or_else(|elapsed| Err(TransportError::timeout(elapsed))),
				None => ctx.run(send).await?,
			};
			let wait = match outcome {
				Ok(mut response) => {
					response.body.truncate(self.body_limit);

					if attempt >= attempts || !self.policy.is_retryable_status(response.status) {
						return Ok(response);
					}

					obs::record_retry(RetryReason::Status, attempt, &request.url);

					self.policy.backoff_for_response(attempt, &response.headers)
				},
				Err(err) => {
					if attempt >= attempts || !err.is_retryable() {
						return Err(err.into());
					}

					obs::record_retry(RetryReason::Transport, attempt, &request.url);

					self.policy.backoff(attempt)
				},
			};

			ctx.sleep(wait).await?;
		}
	}
}
