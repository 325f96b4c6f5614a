//! Policy-driven HTTP pipeline configuration for hierarchical-namespace storage file
//! systems: override-or-default policy assembly, retries, redirects, bearer tokens, and
//! redacted logging in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod pipeline;
pub mod policy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{PipelineConfiguration, PipelineOptions, PipelineSettings},
		http::ReqwestTransport,
		pipeline::ReqwestPipeline,
	};

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Settings with backoff and jitter zeroed so retry tests never sleep.
	pub fn immediate_retry_settings() -> PipelineSettings {
		PipelineSettings { retry_backoff_factor: 0.0, retry_jitter: 0.0, ..Default::default() }
	}

	/// Constructs a reqwest-backed [`ReqwestPipeline`] for `url` using the test transport.
	pub fn build_reqwest_test_pipeline(url: &str, options: PipelineOptions) -> ReqwestPipeline {
		let config = PipelineConfiguration::new(url, options)
			.expect("Test pipeline configuration should assemble.");

		ReqwestPipeline::new(config, test_reqwest_transport())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
