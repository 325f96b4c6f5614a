//! Optional observability helpers for pipeline sends.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each send in a span named `datalake_pipeline.send` with the `method`
//!   and `resource` fields, and to let the logging policies emit events.
//! - Enable `metrics` to increment the `datalake_pipeline_send_total` counter for every
//!   attempt/success/failure (labeled by `outcome`) and `datalake_pipeline_retry_total` for every
//!   retry the pipeline schedules.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendOutcome {
	/// Entry to [`Pipeline::send`](crate::pipeline::Pipeline::send).
	Attempt,
	/// A response was returned to the caller.
	Success,
	/// An error was returned to the caller.
	Failure,
}
impl SendOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SendOutcome::Attempt => "attempt",
			SendOutcome::Success => "success",
			SendOutcome::Failure => "failure",
		}
	}
}
impl Display for SendOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
