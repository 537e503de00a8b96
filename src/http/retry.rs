// crates.io
use ::http::{HeaderMap, StatusCode, header::RETRY_AFTER};
use rand::Rng;
use time::format_description::well_known::Rfc2822;
// self
use crate::_prelude::*;

/// Bounded exponential backoff applied by the transport executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempts per call. Zero still performs a single attempt.
	pub max_retries: u32,
	/// Lower bound for the wait between attempts.
	pub min_wait: StdDuration,
	/// Upper bound for the wait between attempts, including `Retry-After` hints.
	pub max_wait: StdDuration,
}
impl RetryPolicy {
	/// Default attempt count.
	pub const DEFAULT_MAX_RETRIES: u32 = 3;
	/// Default lower wait bound.
	pub const DEFAULT_MIN_WAIT: StdDuration = StdDuration::from_millis(100);
	/// Default upper wait bound.
	pub const DEFAULT_MAX_WAIT: StdDuration = StdDuration::from_secs(5);

	/// Creates a policy from its parts.
	pub const fn new(max_retries: u32, min_wait: StdDuration, max_wait: StdDuration) -> Self {
		Self { max_retries, min_wait, max_wait }
	}

	/// Policy that never retries.
	pub const fn disabled() -> Self {
		Self::new(0, StdDuration::ZERO, StdDuration::ZERO)
	}

	/// Number of attempts the executor performs before giving up.
	pub fn attempts(&self) -> u32 {
		self.max_retries.max(1)
	}

	/// Returns `true` for statuses worth another attempt: 429 and every 5xx except 501.
	pub fn is_retryable_status(&self, status: StatusCode) -> bool {
		status == StatusCode::TOO_MANY_REQUESTS
			|| (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
	}

	/// Wait before attempt `attempt + 1`, where `attempt` is the 1-based attempt that just failed.
	///
	/// The base wait doubles per attempt from `min_wait`, is capped at `max_wait`, and up to half
	/// of it is shaved off as jitter without going below `min_wait`.
	pub fn backoff(&self, attempt: u32) -> StdDuration {
		let exponent = attempt.saturating_sub(1).min(31);
		let base = self.min_wait.saturating_mul(1_u32 << exponent).min(self.max_wait);
		let half = base / 2;

		if half.is_zero() {
			return base;
		}

		let jitter = rand::rng().random_range(StdDuration::ZERO..=half);

		base.saturating_sub(jitter).max(self.min_wait.min(self.max_wait))
	}

	/// Wait before the next attempt after a retryable response, honoring `Retry-After`.
	pub fn backoff_for_response(&self, attempt: u32, headers: &HeaderMap) -> StdDuration {
		match parse_retry_after(headers) {
			Some(hint) => hint.min(self.max_wait),
			None => self.backoff(attempt),
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_MAX_RETRIES, Self::DEFAULT_MIN_WAIT, Self::DEFAULT_MAX_WAIT)
	}
}

/// Parses a `Retry-After` header given either as delta-seconds or as an HTTP date.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<StdDuration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(StdDuration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return StdDuration::try_from(delta).ok();
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::HeaderValue;
	// self
	use super::*;

	#[test]
	fn attempts_never_drop_below_one() {
		assert_eq!(RetryPolicy::disabled().attempts(), 1);
		assert_eq!(RetryPolicy::default().attempts(), 3);
	}

	#[test]
	fn retryable_statuses_exclude_client_errors_and_501() {
		let policy = RetryPolicy::default();

		assert!(policy.is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
		assert!(policy.is_retryable_status(StatusCode::BAD_GATEWAY));
		assert!(policy.is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
		assert!(!policy.is_retryable_status(StatusCode::NOT_IMPLEMENTED));
		assert!(!policy.is_retryable_status(StatusCode::UNAUTHORIZED));
		assert!(!policy.is_retryable_status(StatusCode::NOT_FOUND));
		assert!(!policy.is_retryable_status(StatusCode::OK));
	}

	#[test]
	fn backoff_stays_within_window() {
		let policy =
			RetryPolicy::new(10, StdDuration::from_millis(100), StdDuration::from_millis(800));

		for attempt in 1..=12 {
			let wait = policy.backoff(attempt);

			assert!(wait >= policy.min_wait, "Attempt {attempt} waited {wait:?}.");
			assert!(wait <= policy.max_wait, "Attempt {attempt} waited {wait:?}.");
		}

		// Jitter shaves at most half of the capped base.
		assert!(policy.backoff(12) >= StdDuration::from_millis(400));
	}

	#[test]
	fn retry_after_seconds_are_clamped() {
		let policy = RetryPolicy::new(3, StdDuration::from_millis(10), StdDuration::from_secs(2));
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("1"));

		assert_eq!(policy.backoff_for_response(1, &headers), StdDuration::from_secs(1));

		headers.insert(RETRY_AFTER, HeaderValue::from_static("120"));

		assert_eq!(policy.backoff_for_response(1, &headers), StdDuration::from_secs(2));
	}

	#[test]
	fn retry_after_http_date_is_clamped() {
		let policy = RetryPolicy::new(3, StdDuration::from_millis(10), StdDuration::from_secs(2));
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Tue, 01 Jan 2999 00:00:00 +0000"));

		assert!(parse_retry_after(&headers).is_some_and(|wait| wait > StdDuration::from_secs(60)));
		assert_eq!(policy.backoff_for_response(1, &headers), StdDuration::from_secs(2));
	}

	#[test]
	fn past_retry_after_date_falls_back_to_backoff() {
		let policy = RetryPolicy::new(3, StdDuration::from_millis(10), StdDuration::from_millis(10));
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Mon, 01 Jan 2001 00:00:00 +0000"));

		assert_eq!(parse_retry_after(&headers), None);
		assert_eq!(policy.backoff_for_response(1, &headers), StdDuration::from_millis(10));
	}

	#[test]
	fn unparsable_retry_after_is_ignored() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);
	}
}
