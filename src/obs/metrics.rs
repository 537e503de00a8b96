// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome, RetryReason},
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"dbaas_client_call_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a scheduled retry via the metrics recorder and the tracing subscriber (when enabled).
pub fn record_retry(reason: RetryReason, attempt: u32, url: &Url) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("dbaas_client_retry_total", "reason" => reason.as_str()).increment(1);
	}
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = reason.as_str(), attempt, url = %url, "retrying request");
	}

	let _ = (reason, attempt, url);
}
