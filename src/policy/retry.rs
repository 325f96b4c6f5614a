//! Retry stage.
//!
//! Attempts are retried on transport failures and on retryable statuses until
//! `retry_total` retries have been spent. A `Retry-After` header always wins over the
//! computed backoff. The computed backoff is zero for the first retry and then grows as
//! `factor * 2^(n-1)` (or stays at `factor` in fixed mode), capped at `backoff_max` and
//! stretched by a random jitter.

// std
use std::collections::BTreeSet;
// crates.io
use http::StatusCode;
use rand::Rng;
// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	http::{PipelineRequest, PipelineResponse},
	policy::{RequestPolicy, ResponseAction},
};

const DEFAULT_RETRY_STATUS: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Backoff growth mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryMode {
	/// `factor * 2^(n-1)`.
	#[default]
	Exponential,
	/// `factor` for every retry after the first.
	Fixed,
}

/// Retries failed attempts with capped, jittered backoff.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
	total: u32,
	backoff_factor: f64,
	backoff_max: Duration,
	jitter: f64,
	mode: RetryMode,
	retry_on_status: BTreeSet<u16>,
}
impl RetryPolicy {
	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self {
			total: settings.retry_total,
			backoff_factor: settings.retry_backoff_factor,
			backoff_max: Duration::seconds(
				i64::try_from(settings.retry_backoff_max).unwrap_or(i64::MAX),
			),
			jitter: settings.retry_jitter.clamp(0.0, 1.0),
			mode: settings.retry_mode,
			retry_on_status: DEFAULT_RETRY_STATUS
				.into_iter()
				.chain(settings.retry_on_status_codes.iter().copied())
				.collect(),
		}
	}

	/// A stage that never retries.
	pub fn no_retries() -> Self {
		Self { total: 0, ..Self::from_settings(&PipelineSettings::default()) }
	}

	/// Maximum number of retries per send.
	pub fn total(&self) -> u32 {
		self.total
	}

	/// Returns `true` when `status` is in the retryable set.
	pub fn is_retryable_status(&self, status: StatusCode) -> bool {
		self.retry_on_status.contains(&status.as_u16())
	}

	/// Un-jittered backoff before the `retry`-th retry (1-based).
	pub fn backoff(&self, retry: u32) -> Duration {
		if retry <= 1 {
			return Duration::ZERO;
		}

		let max_secs = self.backoff_max.as_seconds_f64();
		let raw = match self.mode {
			RetryMode::Exponential => {
				let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);

				self.backoff_factor * 2_f64.powi(exponent)
			},
			RetryMode::Fixed => self.backoff_factor,
		};
		let capped = if raw.is_finite() { raw.clamp(0.0, max_secs) } else { max_secs };

		Duration::saturating_seconds_f64(capped)
	}

	fn jittered(&self, delay: Duration) -> Duration {
		if self.jitter <= 0.0 || delay.is_zero() {
			return delay;
		}

		let scale = rand::rng().random_range((1.0 - self.jitter)..=(1.0 + self.jitter));

		Duration::saturating_seconds_f64(delay.as_seconds_f64() * scale)
	}

	fn next_delay(&self, request: &PipelineRequest, hint: Option<Duration>) -> Option<Duration> {
		let attempt = request.context.attempt;

		if attempt >= self.total {
			return None;
		}

		Some(hint.unwrap_or_else(|| self.jittered(self.backoff(attempt + 1))))
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::from_settings(&PipelineSettings::default())
	}
}
impl RequestPolicy for RetryPolicy {
	fn name(&self) -> &'static str {
		"retry"
	}

	fn on_response(
		&self,
		request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		if !self.is_retryable_status(response.status) {
			return Ok(ResponseAction::Continue);
		}

		Ok(self
			.next_delay(request, response.retry_after())
			.map_or(ResponseAction::Continue, |delay| ResponseAction::Retry { delay }))
	}

	fn on_failure(&self, request: &PipelineRequest, error: &Error) -> ResponseAction {
		if !matches!(error, Error::Transport(_)) {
			return ResponseAction::Continue;
		}

		self.next_delay(request, None)
			.map_or(ResponseAction::Continue, |delay| ResponseAction::Retry { delay })
	}
}
