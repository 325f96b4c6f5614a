//! Proxy selection stage.

// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	error::ConfigError,
	http::PipelineRequest,
	policy::{PolicyFuture, RequestPolicy, ready},
};

/// Picks a proxy for each attempt by URL scheme, falling back to the `all` entry.
///
/// The choice is recorded on [`PipelineRequest::proxy`]; routing is the transport's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxyPolicy {
	proxies: BTreeMap<String, String>,
}
impl ProxyPolicy {
	const FALLBACK_KEY: &'static str = "all";

	/// Creates the stage from scheme → proxy URL pairs.
	pub fn new<I, K, V>(proxies: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self { proxies: proxies.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
	}

	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self { proxies: settings.proxies.clone() }
	}

	/// Returns the configured proxy for `url`, if any.
	pub fn select(&self, url: &Url) -> Option<&str> {
		self.proxies
			.get(url.scheme())
			.or_else(|| self.proxies.get(Self::FALLBACK_KEY))
			.map(String::as_str)
	}

	fn apply(&self, request: &mut PipelineRequest) -> Result<()> {
		request.proxy = match self.select(&request.url) {
			Some(raw) => Some(Url::parse(raw).map_err(|source| ConfigError::InvalidProxy {
				proxy: raw.to_owned(),
				source,
			})?),
			None => None,
		};

		Ok(())
	}
}
impl RequestPolicy for ProxyPolicy {
	fn name(&self) -> &'static str {
		"proxy"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		ready(self.apply(request))
	}
}
