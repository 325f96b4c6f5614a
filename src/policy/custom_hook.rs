//! Caller-supplied hooks.

// self
use crate::{
	_prelude::*,
	http::{PipelineRequest, PipelineResponse},
	policy::{PolicyFuture, RequestPolicy, ResponseAction, ready},
};

/// Callback observing each outgoing attempt.
pub type RequestHook = Arc<dyn Fn(&PipelineRequest) + Send + Sync>;
/// Callback observing each response together with the request that produced it.
pub type ResponseHook = Arc<dyn Fn(&PipelineRequest, &PipelineResponse) + Send + Sync>;

/// Invokes optional observer callbacks. The default instance has none.
#[derive(Clone, Default)]
pub struct CustomHookPolicy {
	request_hook: Option<RequestHook>,
	response_hook: Option<ResponseHook>,
}
impl CustomHookPolicy {
	/// Installs the request observer.
	pub fn with_request_hook<F>(mut self, hook: F) -> Self
	where
		F: 'static + Fn(&PipelineRequest) + Send + Sync,
	{
		self.request_hook = Some(Arc::new(hook));

		self
	}

	/// Installs the response observer.
	pub fn with_response_hook<F>(mut self, hook: F) -> Self
	where
		F: 'static + Fn(&PipelineRequest, &PipelineResponse) + Send + Sync,
	{
		self.response_hook = Some(Arc::new(hook));

		self
	}
}
impl Debug for CustomHookPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomHookPolicy")
			.field("request_hook", &self.request_hook.is_some())
			.field("response_hook", &self.response_hook.is_some())
			.finish()
	}
}
impl RequestPolicy for CustomHookPolicy {
	fn name(&self) -> &'static str {
		"custom_hook"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		if let Some(hook) = &self.request_hook {
			hook(request);
		}

		ready(Ok(()))
	}

	fn on_response(
		&self,
		request: &mut PipelineRequest,
		response: &PipelineResponse,
	) -> Result<ResponseAction> {
		if let Some(hook) = &self.response_hook {
			hook(request, response);
		}

		Ok(ResponseAction::Continue)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU32, Ordering};
	// crates.io
	use http::{Method, StatusCode};
	// self
	use super::*;

	#[tokio::test]
	async fn hooks_observe_every_call() {
		let requests = Arc::new(AtomicU32::new(0));
		let statuses = Arc::new(Mutex::new(Vec::new()));
		let policy = CustomHookPolicy::default()
			.with_request_hook({
				let requests = Arc::clone(&requests);

				move |_| {
					requests.fetch_add(1, Ordering::Relaxed);
				}
			})
			.with_response_hook({
				let statuses = Arc::clone(&statuses);

				move |_, response| statuses.lock().push(response.status.as_u16())
			});
		let mut request = PipelineRequest::new(
			Method::GET,
			Url::parse("https://example.com/fs").expect("URL fixture should parse."),
		);

		policy.on_request(&mut request).await.expect("Hooks never fail.");
		policy.on_request(&mut request).await.expect("Hooks never fail.");
		policy
			.on_response(&mut request, &PipelineResponse::new(StatusCode::ACCEPTED))
			.expect("Hooks never fail.");

		assert_eq!(requests.load(Ordering::Relaxed), 2);
		assert_eq!(*statuses.lock(), vec![202]);
		assert_eq!(
			format!("{policy:?}"),
			"CustomHookPolicy { request_hook: true, response_hook: true }"
		);
	}
}
