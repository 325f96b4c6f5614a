//! Redirect stage.

// crates.io
use http::{Method, StatusCode, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	config::PipelineSettings,
	error::TransientError,
	http::{PipelineRequest, PipelineResponse},
	policy::{RequestPolicy, ResponseAction},
};

/// Follows `Location` redirects up to a fixed limit.
///
/// 300, 303, 307, and 308 are followed for every method; 301 and 302 only for `GET` and
/// `HEAD`. A 303 turns the request into a body-less `GET`. The `Authorization` header is
/// dropped before the request is resent, and a hop to another origin marks the request
/// [`cross_origin`](crate::http::RequestContext::cross_origin) for the rest of the send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedirectPolicy {
	permit: bool,
	max_redirects: u32,
}
impl RedirectPolicy {
	/// Creates the stage.
	pub fn new(permit: bool, max_redirects: u32) -> Self {
		Self { permit, max_redirects }
	}

	/// Default factory.
	pub fn from_settings(settings: &PipelineSettings) -> Self {
		Self::new(settings.permit_redirects, settings.redirect_max)
	}

	/// A stage that hands every redirect response back to the caller.
	pub fn no_redirects() -> Self {
		Self::new(false, 0)
	}

	/// Maximum number of redirects per send.
	pub fn max_redirects(&self) -> u32 {
		self.max_redirects
	}

	fn follows(status: StatusCode, method: &Method) -> bool {
		match status.as_u16() {
			300 | 303 | 307 | 308 => true,
			301 | 302 => *method == Method::GET || *method == Method::HEAD,
			_ => false,
		}
	}
}
impl Default for RedirectPolicy {
	fn default() -> Self {
		Self::from_settings(&PipelineSettings::default())
	}
}
impl RequestPolicy for RedirectPolicy {
	fn name(&self) -> &'static str {
		"redirect"
	}

	fn on_response(
		&self,
		request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		if !self.permit || !Self::follows(response.status, &request.method) {
			return Ok(ResponseAction::Continue);
		}

		let Some(target) = response.location(&request.url) else {
			return Ok(ResponseAction::Continue);
		};

		if request.context.redirects >= self.max_redirects {
			return Err(TransientError::TooManyRedirects { limit: self.max_redirects }.into());
		}
		if response.status == StatusCode::SEE_OTHER {
			request.method = Method::GET;
			request.body.clear();
		}

		if target.origin() != request.url.origin() {
			request.context.cross_origin = true;
		}

		request.url = target;
		request.headers.remove(AUTHORIZATION);

		Ok(ResponseAction::Redirect)
	}
}
