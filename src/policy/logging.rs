//! Opt-in network trace logging.
//!
//! When enabled, every attempt and response is emitted as `debug` events on the
//! `datalake_pipeline::network` target. `Authorization` values are always masked; every other
//! header is logged verbatim, so enable this only while diagnosing a live issue.

// crates.io
use http::{HeaderMap, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	http::{PipelineRequest, PipelineResponse},
	policy::{PolicyFuture, RequestPolicy, ResponseAction, ready},
};

/// Debug-level trace of full requests and responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkTraceLoggingPolicy {
	enabled: bool,
}
impl NetworkTraceLoggingPolicy {
	/// Creates the stage, enabled or not.
	pub fn new(enabled: bool) -> Self {
		Self { enabled }
	}

	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self::new(settings.logging_enable)
	}

	/// Whether this stage emits anything.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}
}
impl RequestPolicy for NetworkTraceLoggingPolicy {
	fn name(&self) -> &'static str {
		"logging"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		if self.enabled {
			emit_request(request);
		}

		ready(Ok(()))
	}

	fn on_response(
		&self,
		_request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		if self.enabled {
			emit_response(response);
		}

		Ok(ResponseAction::Continue)
	}

	fn on_failure(&self, request: &PipelineRequest, error: &Error) -> ResponseAction {
		if self.enabled {
			emit_failure(request, error);
		}

		ResponseAction::Continue
	}
}

fn masked_headers(headers: &HeaderMap) -> Vec<(String, String)> {
	headers
		.iter()
		.map(|(name, value)| {
			let shown = if *name == AUTHORIZATION {
				"*****".to_owned()
			} else {
				String::from_utf8_lossy(value.as_bytes()).into_owned()
			};

			(name.as_str().to_owned(), shown)
		})
		.collect()
}

#[cfg(feature = "tracing")]
fn emit_request(request: &PipelineRequest) {
	tracing::debug!(
		target: "datalake_pipeline::network",
		method = %request.method,
		url = %request.url,
		attempt = request.context.attempt,
		headers = ?masked_headers(&request.headers),
		body_len = request.body.len(),
		"Request."
	);
}
#[cfg(not(feature = "tracing"))]
fn emit_request(request: &PipelineRequest) {
	let _ = masked_headers(&request.headers);
}

#[cfg(feature = "tracing")]
fn emit_response(response: &PipelineResponse) {
	tracing::debug!(
		target: "datalake_pipeline::network",
		status = response.status.as_u16(),
		headers = ?masked_headers(&response.headers),
		body_len = response.body.len(),
		"Response."
	);
}
#[cfg(not(feature = "tracing"))]
fn emit_response(response: &PipelineResponse) {
	let _ = response;
}

#[cfg(feature = "tracing")]
fn emit_failure(request: &PipelineRequest, error: &Error) {
	tracing::debug!(
		target: "datalake_pipeline::network",
		method = %request.method,
		url = %request.url,
		error = %error,
		"Attempt failed."
	);
}
#[cfg(not(feature = "tracing"))]
fn emit_failure(request: &PipelineRequest, error: &Error) {
	let _ = (request, error);
}
