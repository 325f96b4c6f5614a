//! Static header stage.

// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	http::PipelineRequest,
	policy::{PolicyFuture, RequestPolicy, ready},
};

/// Inserts a fixed set of headers on every attempt, replacing existing values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadersPolicy {
	headers: BTreeMap<String, String>,
}
impl HeadersPolicy {
	/// Creates the stage from explicit name/value pairs.
	pub fn new<I, K, V>(headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self { headers: headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
	}

	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self { headers: settings.headers.clone() }
	}

	/// Headers this stage sends.
	pub fn headers(&self) -> &BTreeMap<String, String> {
		&self.headers
	}

	fn apply(&self, request: &mut PipelineRequest) -> Result<()> {
		for (name, value) in &self.headers {
			request.set_header(name, value)?;
		}

		Ok(())
	}
}
impl RequestPolicy for HeadersPolicy {
	fn name(&self) -> &'static str {
		"headers"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		ready(self.apply(request))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::Method;
	// self
	use super::*;
	use crate::error::ConfigError;

	fn request() -> PipelineRequest {
		PipelineRequest::new(
			Method::GET,
			Url::parse("https://example.com/fs").expect("URL fixture should parse."),
		)
	}

	#[tokio::test]
	async fn configured_headers_override_existing_values() {
		let policy = HeadersPolicy::new([("x-ms-meta-owner", "ops"), ("accept", "application/json")]);
		let mut request = request();

		request.set_header("accept", "text/plain").expect("Fixture header should insert.");
		policy.on_request(&mut request).await.expect("Valid headers should apply.");

		assert_eq!(request.header("accept"), Some("application/json"));
		assert_eq!(request.header("x-ms-meta-owner"), Some("ops"));
	}

	#[tokio::test]
	async fn invalid_header_names_fail_the_attempt() {
		let policy = HeadersPolicy::new([("not a header", "x")]);
		let err = policy
			.on_request(&mut request())
			.await
			.expect_err("Invalid header names must be reported.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeader { .. })));
	}
}
