//! Redacted request/response logging.

// std
use std::collections::BTreeSet;
// crates.io
use http::HeaderMap;
// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	http::{PipelineRequest, PipelineResponse},
	policy::{PolicyFuture, RequestPolicy, ResponseAction, ready},
};

/// Placeholder written in place of values that are not allow-listed.
pub const REDACTED: &str = "REDACTED";

const DEFAULT_ALLOWED_HEADERS: [&str; 26] = [
	"x-ms-request-id",
	"x-ms-client-request-id",
	"x-ms-return-client-request-id",
	"x-ms-version",
	"traceparent",
	"accept",
	"cache-control",
	"connection",
	"content-length",
	"content-type",
	"date",
	"etag",
	"expires",
	"if-match",
	"if-modified-since",
	"if-none-match",
	"if-unmodified-since",
	"last-modified",
	"pragma",
	"request-id",
	"retry-after",
	"server",
	"transfer-encoding",
	"user-agent",
	"www-authenticate",
	"location",
];
const DEFAULT_ALLOWED_QUERY_PARAMS: [&str; 8] =
	["api-version", "comp", "restype", "resource", "recursive", "timeout", "action", "mode"];

/// Info-level summary of every attempt with non-allow-listed values redacted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpLoggingPolicy {
	allowed_headers: BTreeSet<String>,
	allowed_query_params: BTreeSet<String>,
}
impl HttpLoggingPolicy {
	/// Default factory; settings extend the built-in allow-lists.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		let allowed_headers = DEFAULT_ALLOWED_HEADERS
			.iter()
			.map(|name| (*name).to_owned())
			.chain(settings.logging_allowed_headers.iter().map(|name| name.to_ascii_lowercase()))
			.collect();
		let allowed_query_params = DEFAULT_ALLOWED_QUERY_PARAMS
			.iter()
			.map(|name| (*name).to_owned())
			.chain(settings.logging_allowed_query_params.iter().cloned())
			.collect();

		Self { allowed_headers, allowed_query_params }
	}

	/// Renders `url` with non-allow-listed query values replaced by [`REDACTED`].
	pub fn redact_url(&self, url: &Url) -> String {
		if url.query().is_none() {
			return url.to_string();
		}

		let pairs: Vec<(String, String)> = url
			.query_pairs()
			.map(|(key, value)| {
				let shown = if self.allowed_query_params.contains(key.as_ref()) {
					value.into_owned()
				} else {
					REDACTED.to_owned()
				};

				(key.into_owned(), shown)
			})
			.collect();
		let mut redacted = url.clone();

		redacted.query_pairs_mut().clear().extend_pairs(pairs);

		redacted.to_string()
	}

	/// Returns headers with non-allow-listed values replaced by [`REDACTED`].
	pub fn redact_headers(&self, headers: &HeaderMap) -> Vec<(String, String)> {
		headers
			.iter()
			.map(|(name, value)| {
				let shown = if self.allowed_headers.contains(name.as_str()) {
					String::from_utf8_lossy(value.as_bytes()).into_owned()
				} else {
					REDACTED.to_owned()
				};

				(name.as_str().to_owned(), shown)
			})
			.collect()
	}

	#[cfg(feature = "tracing")]
	fn emit_request(&self, request: &PipelineRequest) {
		tracing::info!(
			method = %request.method,
			url = %self.redact_url(&request.url),
			headers = ?self.redact_headers(&request.headers),
			"Request."
		);
	}
	#[cfg(not(feature = "tracing"))]
	fn emit_request(&self, request: &PipelineRequest) {
		let _ = request;
	}

	#[cfg(feature = "tracing")]
	fn emit_response(&self, response: &PipelineResponse) {
		tracing::info!(
			status = response.status.as_u16(),
			headers = ?self.redact_headers(&response.headers),
			"Response."
		);
	}
	#[cfg(not(feature = "tracing"))]
	fn emit_response(&self, response: &PipelineResponse) {
		let _ = response;
	}
}
impl Default for HttpLoggingPolicy {
	fn default() -> Self {
		Self::from_settings(&PipelineSettings::default())
	}
}
impl RequestPolicy for HttpLoggingPolicy {
	fn name(&self) -> &'static str {
		"http_logging"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		self.emit_request(request);

		ready(Ok(()))
	}

	fn on_response(
		&self,
		_request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		self.emit_response(response);

		Ok(ResponseAction::Continue)
	}
}
