//! Consuming builder for pipeline configurations.

// self
use crate::{
	_prelude::*,
	config::{PipelineConfiguration, PipelineOptions, PipelineSettings},
	policy::{PolicyRole, SharedPolicy},
};

/// Builder for [`PipelineConfiguration`] values.
#[derive(Debug, Default)]
pub struct PipelineConfigurationBuilder {
	/// Endpoint URL; required.
	pub url: Option<String>,
	/// Overrides and passthrough settings.
	pub options: PipelineOptions,
}
impl PipelineConfigurationBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the endpoint URL.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Supplies the stage for `role`.
	pub fn policy(mut self, role: PolicyRole, policy: SharedPolicy) -> Self {
		self.options = self.options.with_policy(role, policy);

		self
	}

	/// Replaces the passthrough settings.
	pub fn settings(mut self, settings: PipelineSettings) -> Self {
		self.options.settings = settings;

		self
	}

	/// Replaces every override and the settings at once.
	pub fn options(mut self, options: PipelineOptions) -> Self {
		self.options = options;

		self
	}

	/// Consumes the builder and assembles the configuration.
	pub fn build(self) -> Result<PipelineConfiguration> {
		PipelineConfiguration::assemble(self.url, self.options)
	}
}
