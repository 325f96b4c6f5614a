//! Pipeline configuration assembly.
//!
//! [`PipelineConfiguration`] bundles the endpoint URL, the fixed resource kind and API
//! version, and one policy per [`PolicyRole`]. Assembly applies an override-or-default rule
//! independently per role: a policy supplied in [`PipelineOptions`] is stored as-is, any
//! other slot receives a fresh default built from [`PipelineSettings`]. The authentication
//! slot has no default and stays empty unless the caller supplies one.

pub mod builder;
pub mod settings;

pub use builder::*;
pub use settings::*;

// self
use crate::{
	_prelude::*,
	policy::{
		CustomHookPolicy, HeadersPolicy, HttpLoggingPolicy, NetworkTraceLoggingPolicy,
		PolicyRole, ProxyPolicy, RedirectPolicy, RetryPolicy, SharedPolicy, UserAgentPolicy,
	},
};

/// REST surface targeted by the configuration.
pub const RESOURCE: &str = "filesystem";
/// Service API version sent with every request.
pub const API_VERSION: &str = "2020-06-12";
/// Crate version embedded in the default moniker.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Moniker used when the settings do not name one.
pub const DEFAULT_SDK_MONIKER: &str = concat!("datalakepipeline/", env!("CARGO_PKG_VERSION"));

/// Caller overrides applied during assembly.
#[derive(Clone, Debug, Default)]
pub struct PipelineOptions {
	/// Replacement `User-Agent` stage.
	pub user_agent_policy: Option<SharedPolicy>,
	/// Replacement header stage.
	pub headers_policy: Option<SharedPolicy>,
	/// Replacement proxy stage.
	pub proxy_policy: Option<SharedPolicy>,
	/// Replacement network trace logging stage.
	pub logging_policy: Option<SharedPolicy>,
	/// Replacement HTTP logging stage.
	pub http_logging_policy: Option<SharedPolicy>,
	/// Replacement retry stage.
	pub retry_policy: Option<SharedPolicy>,
	/// Replacement custom hook stage.
	pub custom_hook_policy: Option<SharedPolicy>,
	/// Replacement redirect stage.
	pub redirect_policy: Option<SharedPolicy>,
	/// Authentication stage; never defaulted.
	pub authentication_policy: Option<SharedPolicy>,
	/// Settings forwarded to default policy constructors.
	pub settings: PipelineSettings,
}
impl PipelineOptions {
	/// Supplies the stage for `role`, replacing any earlier override.
	pub fn with_policy(mut self, role: PolicyRole, policy: SharedPolicy) -> Self {
		*self.slot_mut(role) = Some(policy);

		self
	}

	/// Replaces the passthrough settings.
	pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
		self.settings = settings;

		self
	}

	fn slot_mut(&mut self, role: PolicyRole) -> &mut Option<SharedPolicy> {
		match role {
			PolicyRole::UserAgent => &mut self.user_agent_policy,
			PolicyRole::Headers => &mut self.headers_policy,
			PolicyRole::Proxy => &mut self.proxy_policy,
			PolicyRole::Logging => &mut self.logging_policy,
			PolicyRole::HttpLogging => &mut self.http_logging_policy,
			PolicyRole::Retry => &mut self.retry_policy,
			PolicyRole::CustomHook => &mut self.custom_hook_policy,
			PolicyRole::Redirect => &mut self.redirect_policy,
			PolicyRole::Authentication => &mut self.authentication_policy,
		}
	}
}

/// Immutable policy bundle handed to a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Clone, Debug)]
pub struct PipelineConfiguration {
	url: String,
	resource: &'static str,
	version: &'static str,
	settings: PipelineSettings,
	user_agent: SharedPolicy,
	headers: SharedPolicy,
	proxy: SharedPolicy,
	logging: SharedPolicy,
	http_logging: SharedPolicy,
	retry: SharedPolicy,
	custom_hook: SharedPolicy,
	redirect: SharedPolicy,
	authentication: Option<SharedPolicy>,
}
impl PipelineConfiguration {
	/// Assembles a configuration for `url`.
	///
	/// Fails with [`Error::InvalidArgument`] when `url` is empty or whitespace.
	pub fn new(url: impl Into<String>, options: PipelineOptions) -> Result<Self> {
		Self::assemble(Some(url.into()), options)
	}

	/// Creates a builder with no URL and default options.
	pub fn builder() -> PipelineConfigurationBuilder {
		PipelineConfigurationBuilder::new()
	}

	pub(crate) fn assemble(url: Option<String>, options: PipelineOptions) -> Result<Self> {
		let url = url
			.filter(|value| !value.trim().is_empty())
			.ok_or(Error::InvalidArgument { parameter: "url" })?;
		let PipelineOptions {
			user_agent_policy,
			headers_policy,
			proxy_policy,
			logging_policy,
			http_logging_policy,
			retry_policy,
			custom_hook_policy,
			redirect_policy,
			authentication_policy,
			mut settings,
		} = options;

		if settings.sdk_moniker.is_none() {
			settings.sdk_moniker = Some(DEFAULT_SDK_MONIKER.to_owned());
		}

		let s = &settings;
		let user_agent =
			user_agent_policy.unwrap_or_else(|| Arc::new(UserAgentPolicy::from_settings(s)));
		let headers = headers_policy.unwrap_or_else(|| Arc::new(HeadersPolicy::from_settings(s)));
		let proxy = proxy_policy.unwrap_or_else(|| Arc::new(ProxyPolicy::from_settings(s)));
		let logging =
			logging_policy.unwrap_or_else(|| Arc::new(NetworkTraceLoggingPolicy::from_settings(s)));
		let http_logging = http_logging_policy
			.unwrap_or_else(|| Arc::new(HttpLoggingPolicy::from_settings(s)));
		let retry = retry_policy.unwrap_or_else(|| Arc::new(RetryPolicy::from_settings(s)));
		let custom_hook =
			custom_hook_policy.unwrap_or_else(|| Arc::new(CustomHookPolicy::default()));
		let redirect =
			redirect_policy.unwrap_or_else(|| Arc::new(RedirectPolicy::from_settings(s)));

		Ok(Self {
			url,
			resource: RESOURCE,
			version: API_VERSION,
			settings,
			user_agent,
			headers,
			proxy,
			logging,
			http_logging,
			retry,
			custom_hook,
			redirect,
			authentication: authentication_policy,
		})
	}

	/// Endpoint URL every request is resolved against.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Resource kind (`filesystem`).
	pub fn resource(&self) -> &'static str {
		self.resource
	}

	/// Service API version.
	pub fn version(&self) -> &'static str {
		self.version
	}

	/// Settings after moniker defaulting.
	pub fn settings(&self) -> &PipelineSettings {
		&self.settings
	}

	/// Returns the stage in `role`; only [`PolicyRole::Authentication`] can be `None`.
	pub fn policy(&self, role: PolicyRole) -> Option<&SharedPolicy> {
		match role {
			PolicyRole::UserAgent => Some(&self.user_agent),
			PolicyRole::Headers => Some(&self.headers),
			PolicyRole::Proxy => Some(&self.proxy),
			PolicyRole::Logging => Some(&self.logging),
			PolicyRole::HttpLogging => Some(&self.http_logging),
			PolicyRole::Retry => Some(&self.retry),
			PolicyRole::CustomHook => Some(&self.custom_hook),
			PolicyRole::Redirect => Some(&self.redirect),
			PolicyRole::Authentication => self.authentication.as_ref(),
		}
	}

	/// Populated stages in pipeline order.
	pub fn policies(&self) -> Vec<(PolicyRole, SharedPolicy)> {
		PolicyRole::PIPELINE_ORDER
			.into_iter()
			.filter_map(|role| self.policy(role).map(|policy| (role, Arc::clone(policy))))
			.collect()
	}
}
