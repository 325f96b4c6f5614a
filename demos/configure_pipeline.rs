//! Demonstrates assembling a pipeline configuration with one caller-supplied policy, inspecting
//! the resulting slots, and sending a request over the default reqwest transport.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use datalake_pipeline::{
	config::{PipelineConfiguration, PipelineSettings},
	http_types::Method,
	pipeline::Pipeline,
	policy::{PolicyRole, RetryPolicy},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/fs/reports").query_param("resource", "directory");
			then.status(201).header("x-ms-request-id", "demo-request");
		})
		.await;
	let settings = PipelineSettings::default()
		.with_sdk_moniker("datalake-demo/1.0")
		.with_header("x-ms-client-request-id", "demo-client-request");
	let config = PipelineConfiguration::builder()
		.url(server.url("/fs"))
		.settings(settings)
		.policy(PolicyRole::Retry, Arc::new(RetryPolicy::no_retries()))
		.build()?;

	for role in PolicyRole::PIPELINE_ORDER {
		match config.policy(role) {
			Some(policy) => println!("{:>14}: {policy:?}", role.as_str()),
			None => println!("{:>14}: <none>", role.as_str()),
		}
	}

	let pipeline = Pipeline::with_default_transport(config)?;
	let request = pipeline.request(Method::PUT, "reports?resource=directory")?;
	let response = pipeline.send(request).await?;

	mock.assert_async().await;

	println!("Created directory with status {}.", response.status);

	Ok(())
}
