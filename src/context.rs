//! Per-call deadline and cancellation signal.
//!
//! Every client operation takes a [`RequestContext`]. The transport executor races each attempt
//! and each backoff sleep against it, and the token manager races its refresh lock against it,
//! so a cancelled or expired context stops work at the next suspension point without touching
//! cached token state.

// crates.io
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
// self
use crate::_prelude::*;

/// Deadline + cancellation carried through a single client call.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
	deadline: Option<Instant>,
	cancellation: CancellationToken,
}
impl RequestContext {
	/// Creates a context with no deadline and a fresh cancellation token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the deadline to `timeout` from now.
	pub fn with_timeout(self, timeout: StdDuration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	/// Sets an absolute deadline.
	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Uses a caller-owned cancellation token (e.g. a child of a shutdown token).
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = token;

		self
	}

	/// Returns the deadline, if one was set.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Returns the cancellation token observed by this context.
	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}

	/// Cancels the context and every clone sharing its token.
	pub fn cancel(&self) {
		self.cancellation.cancel();
	}

	/// Fails with [`Error::Cancelled`] or [`Error::DeadlineExceeded`] when the context is done.
	pub fn check(&self) -> Result<()> {
		if self.cancellation.is_cancelled() {
			return Err(Error::Cancelled);
		}
		if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
			return Err(Error::DeadlineExceeded);
		}

		Ok(())
	}

	/// Drives `fut` to completion unless the context finishes first.
	///
	/// The future is dropped as soon as the context is cancelled or its deadline elapses.
	pub async fn run<F>(&self, fut: F) -> Result<F::Output>
	where
		F: Future,
	{
		self.check()?;

		let deadline = async {
			match self.deadline {
				Some(deadline) => time::sleep_until(deadline).await,
				None => std::future::pending::<()>().await,
			}
		};

		tokio::select! {
			biased;
			_ = self.cancellation.cancelled() => Err(Error::Cancelled),
			_ = deadline => Err(Error::DeadlineExceeded),
			output = fut => Ok(output),
		}
	}

	/// Sleeps for `duration` unless the context finishes first.
	pub async fn sleep(&self, duration: StdDuration) -> Result<()> {
		self.run(time::sleep(duration)).await
	}
}
