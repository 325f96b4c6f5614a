//! Transport primitives for pipeline requests.
//!
//! The module exposes [`HttpTransport`] alongside [`PipelineRequest`] and
//! [`PipelineResponse`] so downstream crates can plug in custom HTTP clients while the
//! pipeline keeps ownership of redirects, retries, and header policies. Transports only
//! dispatch a single attempt; they must not follow redirects on their own.

// std
#[cfg(feature = "reqwest")] use std::collections::hash_map::Entry;
// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
	header::{LOCATION, RETRY_AFTER},
};
use time::format_description::well_known::Rfc2822;
// self
#[cfg(feature = "reqwest")] use crate::error::TransportError;
use crate::{_prelude::*, error::ConfigError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<PipelineResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of dispatching one pipeline attempt.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back many
/// pipelines. The returned future must be `Send` so pipeline sends can hop executors.
/// When [`PipelineRequest::proxy`] is set the transport must route the attempt through
/// that proxy.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Dispatches the request exactly once and returns the raw response.
	fn send<'a>(&'a self, request: &'a PipelineRequest) -> TransportFuture<'a>;
}

/// Per-send bookkeeping shared with policies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	/// Zero-based attempt counter; incremented before every retry.
	pub attempt: u32,
	/// Number of redirects followed so far.
	pub redirects: u32,
	/// Set once a redirect left the origin of the first attempt; never cleared.
	///
	/// Credential stages must not attach secrets while this is set.
	pub cross_origin: bool,
}

/// Mutable request flowing through the pipeline.
#[derive(Clone, Debug)]
pub struct PipelineRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Request payload (empty when no body is sent).
	pub body: Vec<u8>,
	/// Proxy selected by the proxy policy, if any.
	pub proxy: Option<Url>,
	/// Attempt and redirect counters.
	pub context: RequestContext,
}
impl PipelineRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: Url) -> Self {
		Self {
			method,
			url,
			headers: HeaderMap::new(),
			body: Vec::new(),
			proxy: None,
			context: RequestContext::default(),
		}
	}

	/// Replaces the request payload.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Inserts or replaces a header after validating name and value.
	pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
		let invalid = || ConfigError::InvalidHeader { name: name.to_owned() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		self.headers.insert(header_name, header_value);

		Ok(())
	}

	/// Returns a header value as UTF-8, when present and printable.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name)?.to_str().ok()
	}
}

/// Response returned by a transport for one attempt.
#[derive(Clone, Debug)]
pub struct PipelineResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Fully buffered response body.
	pub body: Vec<u8>,
}
impl PipelineResponse {
	/// Creates a response with empty headers and body.
	pub fn new(status: StatusCode) -> Self {
		Self { status, headers: HeaderMap::new(), body: Vec::new() }
	}

	/// Returns a header value as UTF-8, when present and printable.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name)?.to_str().ok()
	}

	/// Parses the `Retry-After` header as a relative duration.
	pub fn retry_after(&self) -> Option<Duration> {
		parse_retry_after(&self.headers)
	}

	/// Resolves the `Location` header against the URL that produced this response.
	pub fn location(&self, base: &Url) -> Option<Url> {
		let raw = self.headers.get(LOCATION)?.to_str().ok()?;

		base.join(raw.trim()).ok()
	}
}

/// reqwest-backed transport with redirect following disabled.
///
/// The pipeline owns redirect handling, so every client this transport builds uses
/// `redirect::Policy::none()`. Proxied attempts reuse one client per proxy URL.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	direct: ReqwestClient,
	proxied: Arc<Mutex<HashMap<Url, ReqwestClient>>>,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport around a fresh non-redirecting reqwest client.
	pub fn new() -> Result<Self> {
		let client = Self::client_builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The caller is responsible for disabling redirects on `client`.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { direct: client, proxied: Default::default() }
	}

	fn client_builder() -> reqwest::ClientBuilder {
		ReqwestClient::builder().redirect(reqwest::redirect::Policy::none())
	}

	fn client_for(&self, proxy: Option<&Url>) -> Result<ReqwestClient> {
		let Some(proxy) = proxy else {
			return Ok(self.direct.clone());
		};
		let mut proxied = self.proxied.lock();

		match proxied.entry(proxy.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().clone()),
			Entry::Vacant(entry) => {
				let route = reqwest::Proxy::all(proxy.as_str()).map_err(ConfigError::from)?;
				let client =
					Self::client_builder().proxy(route).build().map_err(ConfigError::from)?;

				Ok(entry.insert(client).clone())
			},
		}
	}

	async fn dispatch(&self, request: &PipelineRequest) -> Result<PipelineResponse> {
		let client = self.client_for(request.proxy.as_ref())?;
		let mut builder = client
			.request(request.method.clone(), request.url.clone())
			.headers(request.headers.clone());

		if !request.body.is_empty() {
			builder = builder.body(request.body.clone());
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

		Ok(PipelineResponse { status, headers, body })
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send<'a>(&'a self, request: &'a PipelineRequest) -> TransportFuture<'a> {
		Box::pin(self.dispatch(request))
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(i64::from(secs)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
