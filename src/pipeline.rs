//! Pipeline runner driving a request through the configured policies.
//!
//! [`Pipeline::send`] runs every populated stage's request hook in pipeline order, hands the
//! request to the [`HttpTransport`], then walks the stages in reverse so the stage closest to
//! the transport sees the outcome first. The first stage that asks for a retry or a redirect
//! wins and the loop starts over with the (possibly rewritten) request.

// crates.io
use http::Method;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	config::PipelineConfiguration,
	error::ConfigError,
	http::{HttpTransport, PipelineRequest, PipelineResponse},
	obs::{self, PipelineSpan, SendOutcome},
	policy::{PolicyRole, ResponseAction, SharedPolicy},
};

/// Header carrying the service API version.
pub const VERSION_HEADER: &str = "x-ms-version";

#[cfg(feature = "reqwest")]
/// Pipeline specialized for the crate's default reqwest transport.
pub type ReqwestPipeline = Pipeline<ReqwestTransport>;

/// Sends requests for one [`PipelineConfiguration`] over one transport.
#[derive(Debug)]
pub struct Pipeline<T>
where
	T: HttpTransport,
{
	config: Arc<PipelineConfiguration>,
	transport: Arc<T>,
}
impl<T> Pipeline<T>
where
	T: HttpTransport,
{
	/// Pairs a configuration with a transport.
	pub fn new(config: impl Into<Arc<PipelineConfiguration>>, transport: T) -> Self {
		Self::with_shared_transport(config, Arc::new(transport))
	}

	/// Pairs a configuration with a transport shared by other pipelines.
	pub fn with_shared_transport(
		config: impl Into<Arc<PipelineConfiguration>>,
		transport: Arc<T>,
	) -> Self {
		Self { config: config.into(), transport }
	}

	/// Configuration backing this pipeline.
	pub fn config(&self) -> &PipelineConfiguration {
		&self.config
	}

	/// Transport used for every attempt.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Builds a request for `path` relative to the configured endpoint.
	///
	/// The endpoint is treated as a directory, so `path` is appended below it whether or
	/// not it carries a leading slash. Query strings in `path` are kept.
	pub fn request(&self, method: Method, path: &str) -> Result<PipelineRequest> {
		let endpoint = self.config.url();
		let invalid = |source| ConfigError::InvalidUrl { url: endpoint.to_owned(), source };
		let mut base = Url::parse(endpoint).map_err(invalid)?;

		if !base.path().ends_with('/') {
			let directory = format!("{}/", base.path());

			base.set_path(&directory);
		}

		let url = base.join(path.trim_start_matches('/')).map_err(invalid)?;
		let mut request = PipelineRequest::new(method, url);

		request.set_header(VERSION_HEADER, self.config.version())?;

		Ok(request)
	}

	/// Sends `request` through every stage and returns the final response.
	///
	/// A response is returned whatever its status; only local failures, exhausted transport
	/// retries, and redirect loops surface as errors.
	pub async fn send(&self, mut request: PipelineRequest) -> Result<PipelineResponse> {
		let span = PipelineSpan::new(request.method.as_str(), self.config.resource());

		obs::record_send_outcome(SendOutcome::Attempt);

		let result = span.instrument(self.drive(&mut request)).await;

		match &result {
			Ok(_) => obs::record_send_outcome(SendOutcome::Success),
			Err(_) => obs::record_send_outcome(SendOutcome::Failure),
		}

		result
	}

	async fn drive(&self, request: &mut PipelineRequest) -> Result<PipelineResponse> {
		let policies = self.config.policies();

		if request.header(VERSION_HEADER).is_none() {
			request.set_header(VERSION_HEADER, self.config.version())?;
		}

		loop {
			for (_, policy) in &policies {
				policy.on_request(request).await?;
			}

			let outcome = self.transport.send(request).await;
			let (action, decided_by) = match &outcome {
				Ok(response) => Self::inspect_response(&policies, request, response)?,
				Err(error) => Self::inspect_failure(&policies, request, error),
			};

			match action {
				ResponseAction::Continue => return outcome,
				ResponseAction::Retry { delay } => {
					obs::record_retry(decided_by);

					request.context.attempt += 1;

					if delay.is_positive() {
						tokio::time::sleep(delay.unsigned_abs()).await;
					}
				},
				ResponseAction::Redirect => request.context.redirects += 1,
			}
		}
	}

	fn inspect_response(
		policies: &[(PolicyRole, SharedPolicy)],
		request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<(ResponseAction, &'static str)> {
		for (_, policy) in policies.iter().rev() {
			let action = policy.on_response(request, response)?;

			if action != ResponseAction::Continue {
				return Ok((action, policy.name()));
			}
		}

		Ok((ResponseAction::Continue, ""))
	}

	fn inspect_failure(
		policies: &[(PolicyRole, SharedPolicy)],
		request: &PipelineRequest,
		error: &Error,
	) -> (ResponseAction, &'static str) {
		policies
			.iter()
			.rev()
			.map(|(_, policy)| (policy.on_failure(request, error), policy.name()))
			.find(|(action, _)| *action != ResponseAction::Continue)
			.unwrap_or((ResponseAction::Continue, ""))
	}
}
impl<T> Clone for Pipeline<T>
where
	T: HttpTransport,
{
	fn clone(&self) -> Self {
		Self { config: Arc::clone(&self.config), transport: Arc::clone(&self.transport) }
	}
}
#[cfg(feature = "reqwest")]
impl Pipeline<ReqwestTransport> {
	/// Builds a pipeline backed by a fresh [`ReqwestTransport`].
	pub fn with_default_transport(config: impl Into<Arc<PipelineConfiguration>>) -> Result<Self> {
		Ok(Self::new(config, ReqwestTransport::new()?))
	}
}
