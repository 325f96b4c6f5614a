//! Pipeline-level error types shared across configuration, policies, and transports.

// self
use crate::_prelude::*;

/// Pipeline-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical pipeline error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// A required constructor parameter was absent or empty.
	#[error("Parameter `{parameter}` must not be empty.")]
	InvalidArgument {
		/// Name of the offending parameter.
		parameter: &'static str,
	},
	/// Local configuration problem surfaced while preparing a request.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Upstream behavior the pipeline gave up on.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Credential lookup failed or the request cannot carry a bearer token.
	#[error("Authentication failed: {reason}.")]
	Authentication {
		/// Credential- or policy-supplied reason string.
		reason: String,
	},
}
impl Error {
	/// Builds an [`Error::Authentication`] from any displayable reason.
	pub fn authentication(reason: impl Display) -> Self {
		Self::Authentication { reason: reason.to_string() }
	}
}

/// Configuration and validation failures raised while preparing requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured header name or value is not valid HTTP.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Header name as configured.
		name: String,
	},
	/// A configured proxy URL cannot be parsed.
	#[error("Proxy URL `{proxy}` is invalid.")]
	InvalidProxy {
		/// Proxy URL as configured.
		proxy: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The configured endpoint cannot be combined with the requested path.
	#[error("Request URL derived from `{url}` is invalid.")]
	InvalidUrl {
		/// Endpoint URL as configured.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Serialized pipeline settings could not be decoded.
	#[error("Pipeline settings are invalid.")]
	InvalidSettings(#[from] serde_path_to_error::Error<serde_json::Error>),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Upstream conditions the pipeline stopped handling.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// The service kept redirecting past the configured limit.
	#[error("Exceeded the maximum of {limit} redirects.")]
	TooManyRedirects {
		/// Configured redirect limit.
		limit: u32,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
