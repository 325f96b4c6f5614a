//! Passthrough settings forwarded to default policy constructors.

// self
use crate::{_prelude::*, error::ConfigError, policy::RetryMode};

/// Settings consumed by the default policy factories.
///
/// Every field is optional when decoding. Settings meant for custom policies go under
/// [`extra`](Self::extra), which this crate never interprets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
	/// Product identifier embedded in the `User-Agent` header.
	///
	/// Left empty by callers, it is set to the crate's default moniker during
	/// configuration assembly.
	pub sdk_moniker: Option<String>,
	/// Application identifier prepended to the `User-Agent` header.
	pub user_agent: Option<String>,
	/// Headers attached to every request.
	pub headers: BTreeMap<String, String>,
	/// Proxy URLs keyed by URL scheme (`http`, `https`) or `all`.
	pub proxies: BTreeMap<String, String>,
	/// Enables full network trace logging.
	pub logging_enable: bool,
	/// Header names (case-insensitive) logged verbatim in addition to the built-in allow-list.
	pub logging_allowed_headers: Vec<String>,
	/// Query parameter names logged verbatim in addition to the built-in allow-list.
	pub logging_allowed_query_params: Vec<String>,
	/// Maximum number of retries per send.
	pub retry_total: u32,
	/// Backoff factor, in seconds.
	pub retry_backoff_factor: f64,
	/// Upper bound on a single backoff, in seconds.
	pub retry_backoff_max: u64,
	/// Fraction (0..=1) by which computed backoffs are randomly stretched or shrunk.
	pub retry_jitter: f64,
	/// Backoff growth mode.
	pub retry_mode: RetryMode,
	/// Status codes retried in addition to the built-in set.
	pub retry_on_status_codes: Vec<u16>,
	/// Whether redirects are followed at all.
	pub permit_redirects: bool,
	/// Maximum number of redirects per send.
	pub redirect_max: u32,
	/// Settings forwarded verbatim.
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl PipelineSettings {
	/// Decodes settings from JSON, reporting the path of the first invalid field.
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut de).map_err(|e| ConfigError::from(e).into())
	}

	/// Sets the product moniker.
	pub fn with_sdk_moniker(mut self, moniker: impl Into<String>) -> Self {
		self.sdk_moniker = Some(moniker.into());

		self
	}

	/// Adds a header attached to every request.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Routes requests whose scheme matches `scheme` (or `all`) through `proxy`.
	pub fn with_proxy(mut self, scheme: impl Into<String>, proxy: impl Into<String>) -> Self {
		self.proxies.insert(scheme.into(), proxy.into());

		self
	}

	/// Toggles network trace logging.
	pub fn with_logging_enable(mut self, enable: bool) -> Self {
		self.logging_enable = enable;

		self
	}
}
impl Default for PipelineSettings {
	fn default() -> Self {
		Self {
			sdk_moniker: None,
			user_agent: None,
			headers: BTreeMap::new(),
			proxies: BTreeMap::new(),
			logging_enable: false,
			logging_allowed_headers: Vec::new(),
			logging_allowed_query_params: Vec::new(),
			retry_total: 10,
			retry_backoff_factor: 0.8,
			retry_backoff_max: 120,
			retry_jitter: 0.2,
			retry_mode: RetryMode::default(),
			retry_on_status_codes: Vec::new(),
			permit_redirects: true,
			redirect_max: 30,
			extra: BTreeMap::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn json_fills_defaults_and_keeps_extra_settings() {
		let settings = PipelineSettings::from_json_str(
			r#"{"retry_total": 3, "headers": {"x-ms-client-request-id": "abc"}, "extra": {"tenant_hint": "contoso"}}"#,
		)
		.expect("Settings JSON should decode.");

		assert_eq!(settings.retry_total, 3);
		assert_eq!(settings.redirect_max, 30);
		assert_eq!(settings.retry_mode, RetryMode::Exponential);
		assert_eq!(
			settings.headers.get("x-ms-client-request-id").map(String::as_str),
			Some("abc")
		);
		assert_eq!(settings.extra.get("tenant_hint"), Some(&serde_json::json!("contoso")));
	}

	#[test]
	fn json_errors_report_the_failing_path() {
		let err = PipelineSettings::from_json_str(r#"{"proxies": {"https": 8080}}"#)
			.expect_err("A numeric proxy URL must be rejected.");

		match err {
			Error::Config(ConfigError::InvalidSettings(inner)) =>
				assert_eq!(inner.path().to_string(), "proxies.https"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
