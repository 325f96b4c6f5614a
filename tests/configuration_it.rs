// self
use datalake_pipeline::{
	_preludet::*,
	auth::{CredentialFuture, TokenCredential},
	config::{
		API_VERSION, DEFAULT_SDK_MONIKER, PipelineConfiguration, PipelineOptions,
		PipelineSettings, RESOURCE,
	},
	error::ConfigError,
	policy::{
		BearerTokenPolicy, CustomHookPolicy, PolicyRole, RetryPolicy, SharedPolicy,
		UserAgentPolicy,
	},
};

const URL: &str = "https://account.dfs.core.windows.net/fs";

struct NeverCalled;
impl TokenCredential for NeverCalled {
	fn get_token<'a>(&'a self, _: &'a [String]) -> CredentialFuture<'a> {
		Box::pin(async { Err(Error::authentication("unused")) })
	}
}

fn config(options: PipelineOptions) -> PipelineConfiguration {
	PipelineConfiguration::new(URL, options).expect("Configuration should assemble.")
}

fn slot(config: &PipelineConfiguration, role: PolicyRole) -> &SharedPolicy {
	config.policy(role).unwrap_or_else(|| panic!("Role `{role}` should be populated."))
}

#[test]
fn supplied_policies_are_stored_as_is() {
	let retry: SharedPolicy = Arc::new(RetryPolicy::no_retries());
	let hooks: SharedPolicy = Arc::new(CustomHookPolicy::default());
	let options = PipelineOptions::default()
		.with_policy(PolicyRole::Retry, Arc::clone(&retry))
		.with_policy(PolicyRole::CustomHook, Arc::clone(&hooks));
	let config = config(options);

	assert!(Arc::ptr_eq(slot(&config, PolicyRole::Retry), &retry));
	assert!(Arc::ptr_eq(slot(&config, PolicyRole::CustomHook), &hooks));
}

#[test]
fn every_role_keeps_its_own_override() {
	let supplied: Vec<(PolicyRole, SharedPolicy)> = PolicyRole::ALL
		.into_iter()
		.map(|role| (role, Arc::new(CustomHookPolicy::default()) as SharedPolicy))
		.collect();
	let options = supplied
		.iter()
		.fold(PipelineOptions::default(), |options, (role, policy)| {
			options.with_policy(*role, Arc::clone(policy))
		});
	let config = config(options);

	for (role, policy) in &supplied {
		assert!(
			Arc::ptr_eq(slot(&config, *role), policy),
			"Role `{role}` must hold the policy supplied for it."
		);
	}
	assert_eq!(config.policies().len(), PolicyRole::ALL.len());
}

#[test]
fn defaults_are_fresh_for_every_assembly() {
	let first = config(PipelineOptions::default());
	let second = config(PipelineOptions::default());

	assert_eq!(
		(first.url(), first.resource(), first.version()),
		(second.url(), second.resource(), second.version())
	);

	for role in PolicyRole::ALL.into_iter().filter(|role| role.has_default()) {
		assert!(
			!Arc::ptr_eq(slot(&first, role), slot(&second, role)),
			"Role `{role}` must not share its default across configurations."
		);
		assert_eq!(slot(&first, role).name(), role.as_str());
	}
}

#[test]
fn one_override_leaves_other_slots_defaulted() {
	let user_agent: SharedPolicy = Arc::new(UserAgentPolicy::new("cli/1.0", None));
	let baseline = config(PipelineOptions::default());
	let config = config(
		PipelineOptions::default().with_policy(PolicyRole::UserAgent, Arc::clone(&user_agent)),
	);

	assert!(Arc::ptr_eq(slot(&config, PolicyRole::UserAgent), &user_agent));
	assert_eq!(config.policies().len(), baseline.policies().len());

	for role in PolicyRole::ALL.into_iter().filter(|role| *role != PolicyRole::Authentication) {
		assert_eq!(slot(&config, role).name(), slot(&baseline, role).name());
	}
}

#[test]
fn authentication_is_never_defaulted() {
	let bare = config(PipelineOptions::default());

	assert!(bare.policy(PolicyRole::Authentication).is_none());

	let settings = PipelineSettings::default().with_header("x-ms-client-request-id", "abc");
	let with_settings = config(PipelineOptions::default().with_settings(settings));

	assert!(with_settings.policy(PolicyRole::Authentication).is_none());

	let auth: SharedPolicy = Arc::new(BearerTokenPolicy::new(Arc::new(NeverCalled), ["scope"]));
	let secured = config(
		PipelineOptions::default().with_policy(PolicyRole::Authentication, Arc::clone(&auth)),
	);

	assert!(Arc::ptr_eq(slot(&secured, PolicyRole::Authentication), &auth));
	assert_eq!(secured.policies().len(), PolicyRole::ALL.len());
}

#[test]
fn missing_or_blank_url_is_an_invalid_argument() {
	let missing = PipelineConfiguration::builder()
		.build()
		.expect_err("A builder without a URL must not assemble.");

	assert!(matches!(missing, Error::InvalidArgument { parameter: "url" }));

	let blank = PipelineConfiguration::new("", PipelineOptions::default())
		.expect_err("An empty URL must not assemble.");

	assert!(matches!(blank, Error::InvalidArgument { parameter: "url" }));
}

#[test]
fn constants_and_moniker_are_applied() {
	let config = PipelineConfiguration::builder()
		.url(URL)
		.settings(PipelineSettings::default())
		.build()
		.expect("Builder should assemble.");

	assert_eq!(config.url(), URL);
	assert_eq!(config.resource(), RESOURCE);
	assert_eq!(config.version(), API_VERSION);
	assert_eq!(config.settings().sdk_moniker.as_deref(), Some(DEFAULT_SDK_MONIKER));
}

#[test]
fn settings_json_reports_the_failing_field() {
	let settings = PipelineSettings::from_json_str(
		r#"{"retry_total":3,"redirect_max":5,"logging_enable":true,"extra":{"storage_account":"acct"}}"#,
	)
	.expect("Valid settings should decode.");

	assert_eq!(settings.retry_total, 3);
	assert_eq!(settings.redirect_max, 5);
	assert!(settings.logging_enable);
	assert_eq!(settings.extra.get("storage_account"), Some(&serde_json::json!("acct")));

	let err = PipelineSettings::from_json_str(r#"{"redirect_max":"many"}"#)
		.expect_err("A string redirect limit must be rejected.");

	match err {
		Error::Config(ConfigError::InvalidSettings(inner)) =>
			assert_eq!(inner.path().to_string(), "redirect_max"),
		other => panic!("Unexpected error: {other:?}"),
	}
}
