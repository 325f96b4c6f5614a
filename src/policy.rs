//! Request policies: the pipeline-stage contract and the built-in stages.
//!
//! Every stage implements [`RequestPolicy`]. The pipeline calls
//! [`on_request`](RequestPolicy::on_request) on each stage in pipeline order before every
//! attempt, then [`on_response`](RequestPolicy::on_response) (or
//! [`on_failure`](RequestPolicy::on_failure) when the transport errored) in reverse order. The
//! first stage that answers something other than [`ResponseAction::Continue`] decides what the
//! pipeline does next.
//!
//! [`PolicyRole`] names the nine slots of a
//! [`PipelineConfiguration`](crate::config::PipelineConfiguration). Each role except
//! [`PolicyRole::Authentication`] has a default stage built from
//! [`PipelineSettings`](crate::config::PipelineSettings).

pub mod authentication;
pub mod custom_hook;
pub mod headers;
pub mod http_logging;
pub mod logging;
pub mod proxy;
pub mod redirect;
pub mod retry;
pub mod user_agent;

pub use authentication::*;
pub use custom_hook::*;
pub use headers::*;
pub use http_logging::*;
pub use logging::*;
pub use proxy::*;
pub use redirect::*;
pub use retry::*;
pub use user_agent::*;

// self
use crate::{
	_prelude::*,
	http::{PipelineRequest, PipelineResponse},
};

/// Boxed future returned by [`RequestPolicy::on_request`].
pub type PolicyFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a + Send>>;

/// Shared handle stored in configuration slots.
pub type SharedPolicy = Arc<dyn RequestPolicy>;

/// One stage of the outbound request pipeline.
///
/// Hooks have no-op defaults so stages only override what they inspect. `on_request` is
/// async because some stages (authentication) must fetch state before the request leaves;
/// response hooks are synchronous and mutate the request in place when they want it resent.
pub trait RequestPolicy
where
	Self: Debug + Send + Sync,
{
	/// Stable label used in logs and metrics.
	fn name(&self) -> &'static str;

	/// Prepares the request before each attempt.
	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		let _ = request;

		ready(Ok(()))
	}

	/// Inspects a response; may rewrite `request` and ask for a resend.
	fn on_response(
		&self,
		request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		let _ = (request, response);

		Ok(ResponseAction::Continue)
	}

	/// Inspects a failed attempt.
	fn on_failure(&self, request: &PipelineRequest, error: &Error) -> ResponseAction {
		let _ = (request, error);

		ResponseAction::Continue
	}
}

/// What the pipeline should do after a stage inspected an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseAction {
	/// Hand the outcome to the next stage (or the caller).
	Continue,
	/// Resend the same request after `delay`.
	Retry {
		/// Time to wait before the next attempt.
		delay: Duration,
	},
	/// Resend the request the stage rewrote (new URL, possibly new method).
	Redirect,
}

/// Named policy slots held by a pipeline configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRole {
	/// `User-Agent` header stage.
	UserAgent,
	/// Static header stage.
	Headers,
	/// Proxy selection stage.
	Proxy,
	/// Opt-in network trace logging.
	Logging,
	/// Redacted request/response logging.
	HttpLogging,
	/// Retry stage.
	Retry,
	/// Caller-supplied hooks.
	CustomHook,
	/// Redirect stage.
	Redirect,
	/// Credential stage; never defaulted.
	Authentication,
}
impl PolicyRole {
	/// Every role, in declaration order.
	pub const ALL: [PolicyRole; 9] = [
		PolicyRole::UserAgent,
		PolicyRole::Headers,
		PolicyRole::Proxy,
		PolicyRole::Logging,
		PolicyRole::HttpLogging,
		PolicyRole::Retry,
		PolicyRole::CustomHook,
		PolicyRole::Redirect,
		PolicyRole::Authentication,
	];
	/// Order in which the pipeline runs request hooks (responses run in reverse).
	pub const PIPELINE_ORDER: [PolicyRole; 9] = [
		PolicyRole::Headers,
		PolicyRole::UserAgent,
		PolicyRole::Proxy,
		PolicyRole::Redirect,
		PolicyRole::Retry,
		PolicyRole::Authentication,
		PolicyRole::CustomHook,
		PolicyRole::Logging,
		PolicyRole::HttpLogging,
	];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PolicyRole::UserAgent => "user_agent",
			PolicyRole::Headers => "headers",
			PolicyRole::Proxy => "proxy",
			PolicyRole::Logging => "logging",
			PolicyRole::HttpLogging => "http_logging",
			PolicyRole::Retry => "retry",
			PolicyRole::CustomHook => "custom_hook",
			PolicyRole::Redirect => "redirect",
			PolicyRole::Authentication => "authentication",
		}
	}

	/// Returns `true` when the configuration fills this slot with a default stage.
	pub const fn has_default(self) -> bool {
		!matches!(self, PolicyRole::Authentication)
	}
}
impl Display for PolicyRole {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Wraps an already-computed outcome as a [`PolicyFuture`].
pub(crate) fn ready(result: Result<()>) -> PolicyFuture<'static> {
	Box::pin(std::future::ready(result))
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::BTreeSet;
	// self
	use super::*;

	#[test]
	fn pipeline_order_covers_every_role_once() {
		let declared: BTreeSet<_> = PolicyRole::ALL.into_iter().collect();
		let ordered: BTreeSet<_> = PolicyRole::PIPELINE_ORDER.into_iter().collect();

		assert_eq!(declared, ordered);
		assert_eq!(declared.len(), PolicyRole::ALL.len());
	}

	#[test]
	fn only_authentication_lacks_a_default() {
		let without_default: Vec<_> =
			PolicyRole::ALL.into_iter().filter(|role| !role.has_default()).collect();

		assert_eq!(without_default, vec![PolicyRole::Authentication]);
	}

	#[test]
	fn labels_match_serde_names() {
		for role in PolicyRole::ALL {
			let encoded = serde_json::to_string(&role).expect("Role should serialize.");

			assert_eq!(encoded, format!("\"{}\"", role.as_str()));
		}
	}
}
