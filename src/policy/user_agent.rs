//! `User-Agent` stage.

// std
use std::env::consts::{ARCH, OS};
// crates.io
use http::header::USER_AGENT;
// self
use crate::{
	_prelude::*,
	config::{DEFAULT_SDK_MONIKER, PipelineSettings},
	http::PipelineRequest,
	policy::{PolicyFuture, RequestPolicy, ready},
};

/// Sets `User-Agent` to `[application] azsdk-rust-{moniker} ({os}; {arch})` on every attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAgentPolicy {
	user_agent: String,
}
impl UserAgentPolicy {
	/// Builds the header value from a moniker and an optional application prefix.
	pub fn new(sdk_moniker: &str, application_id: Option<&str>) -> Self {
		let base = format!("azsdk-rust-{sdk_moniker} ({OS}; {ARCH})");
		let user_agent = match application_id.map(str::trim).filter(|id| !id.is_empty()) {
			Some(id) => format!("{id} {base}"),
			None => base,
		};

		Self { user_agent }
	}

	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self::new(
			settings.sdk_moniker.as_deref().unwrap_or(DEFAULT_SDK_MONIKER),
			settings.user_agent.as_deref(),
		)
	}

	/// Header value this stage sends.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}
}
impl RequestPolicy for UserAgentPolicy {
	fn name(&self) -> &'static str {
		"user_agent"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		ready(request.set_header(USER_AGENT.as_str(), &self.user_agent).map_err(Error::from))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn application_prefix_is_trimmed_and_optional() {
		let bare = UserAgentPolicy::new("datalakepipeline/0.1.0", None);
		let prefixed = UserAgentPolicy::new("datalakepipeline/0.1.0", Some("  backup-tool/3 "));
		let blank = UserAgentPolicy::new("datalakepipeline/0.1.0", Some("   "));

		assert_eq!(bare.user_agent(), format!("azsdk-rust-datalakepipeline/0.1.0 ({OS}; {ARCH})"));
		assert_eq!(prefixed.user_agent(), format!("backup-tool/3 {}", bare.user_agent()));
		assert_eq!(blank, bare);
	}
}
