// self
use crate::obs::SendOutcome;

/// Records a send outcome via the global metrics recorder (when enabled).
pub fn record_send_outcome(outcome: SendOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("datalake_pipeline_send_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records one scheduled retry, labeled by the policy that requested it.
pub fn record_retry(policy: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("datalake_pipeline_retry_total", "policy" => policy).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = policy;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_send_outcome(SendOutcome::Failure);
		record_retry("retry");
	}
}
