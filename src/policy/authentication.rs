//! Bearer-token authentication stage.
//!
//! This stage is never created by default: a configuration without an explicit
//! authentication policy sends requests without an `Authorization` header, leaving
//! credentials to the transport or a caller-managed layer.

// crates.io
use http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenCredential, TokenSecret},
	http::PipelineRequest,
	policy::{PolicyFuture, RequestPolicy},
};

/// Attaches `Authorization: Bearer <token>` obtained from a [`TokenCredential`].
///
/// Tokens are cached and reused until they come within five minutes of expiry; concurrent
/// sends share one refresh. Plain `http` URLs are refused. Once a redirect has left the
/// original origin the stage attaches nothing for the rest of the send.
pub struct BearerTokenPolicy {
	credential: Arc<dyn TokenCredential>,
	scopes: Vec<String>,
	cached: AsyncMutex<Option<AccessToken>>,
}
impl BearerTokenPolicy {
	const REFRESH_WINDOW: Duration = Duration::seconds(300);

	/// Creates the stage for `scopes`.
	pub fn new<I, S>(credential: Arc<dyn TokenCredential>, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			credential,
			scopes: scopes.into_iter().map(Into::into).collect(),
			cached: AsyncMutex::new(None),
		}
	}

	/// Scopes requested from the credential.
	pub fn scopes(&self) -> &[String] {
		&self.scopes
	}

	async fn token(&self) -> Result<TokenSecret> {
		let mut cached = self.cached.lock().await;
		let now = OffsetDateTime::now_utc();

		if let Some(current) =
			cached.as_ref().filter(|token| !token.expires_within(Self::REFRESH_WINDOW, now))
		{
			return Ok(current.token.clone());
		}

		let fresh = self.credential.get_token(&self.scopes).await?;
		let secret = fresh.token.clone();

		*cached = Some(fresh);

		Ok(secret)
	}

	async fn authorize(&self, request: &mut PipelineRequest) -> Result<()> {
		if request.context.cross_origin {
			request.headers.remove(AUTHORIZATION);

			return Ok(());
		}
		if request.url.scheme() != "https" {
			return Err(Error::authentication(
				"bearer token authentication is not permitted for non-https URLs",
			));
		}

		let token = self.token().await?;

		request.set_header(AUTHORIZATION.as_str(), &format!("Bearer {}", token.expose()))?;

		Ok(())
	}
}
impl Debug for BearerTokenPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BearerTokenPolicy").field("scopes", &self.scopes).finish()
	}
}
impl RequestPolicy for BearerTokenPolicy {
	fn name(&self) -> &'static str {
		"authentication"
	}

	fn on_request<'a>(&'a self, request: &'a mut PipelineRequest) -> PolicyFuture<'a> {
		Box::pin(self.authorize(request))
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU32, Ordering};
	// crates.io
	use http::Method;
	// self
	use super::*;
	use crate::auth::CredentialFuture;

	#[derive(Default)]
	struct CountingCredential {
		calls: AtomicU32,
		lifetime: Duration,
	}
	impl TokenCredential for CountingCredential {
		fn get_token<'a>(&'a self, scopes: &'a [String]) -> CredentialFuture<'a> {
			Box::pin(async move {
				let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;

				Ok(AccessToken::new(
					format!("token-{call}-{}", scopes.join(",")),
					OffsetDateTime::now_utc() + self.lifetime,
				))
			})
		}
	}

	fn request(url: &str) -> PipelineRequest {
		PipelineRequest::new(Method::GET, Url::parse(url).expect("URL fixture should parse."))
	}

	#[tokio::test]
	async fn long_lived_tokens_are_cached() {
		let credential =
			Arc::new(CountingCredential { lifetime: Duration::hours(1), ..Default::default() });
		let policy = BearerTokenPolicy::new(credential.clone(), ["https://storage.azure.com/.default"]);
		let mut first = request("https://example.com/fs");
		let mut second = request("https://example.com/fs");

		policy.on_request(&mut first).await.expect("First authorization should succeed.");
		policy.on_request(&mut second).await.expect("Second authorization should succeed.");

		assert_eq!(credential.calls.load(Ordering::Relaxed), 1);
		assert_eq!(
			second.header("authorization"),
			Some("Bearer token-1-https://storage.azure.com/.default")
		);
	}

	#[tokio::test]
	async fn near_expiry_tokens_are_refreshed() {
		let credential =
			Arc::new(CountingCredential { lifetime: Duration::minutes(2), ..Default::default() });
		let policy = BearerTokenPolicy::new(credential.clone(), ["scope"]);

		policy.on_request(&mut request("https://example.com")).await.expect("Should authorize.");
		policy.on_request(&mut request("https://example.com")).await.expect("Should authorize.");

		assert_eq!(credential.calls.load(Ordering::Relaxed), 2);
	}

	#[tokio::test]
	async fn cross_origin_requests_get_no_token() {
		let credential =
			Arc::new(CountingCredential { lifetime: Duration::hours(1), ..Default::default() });
		let policy = BearerTokenPolicy::new(credential.clone(), ["scope"]);
		let mut redirected = request("https://other.example.net/steal");

		redirected.context.cross_origin = true;
		policy.on_request(&mut redirected).await.expect("Skipping must not fail.");

		assert_eq!(redirected.header("authorization"), None);
		assert_eq!(credential.calls.load(Ordering::Relaxed), 0);
	}

	#[tokio::test]
	async fn plain_http_is_refused() {
		let credential = Arc::new(CountingCredential::default());
		let policy = BearerTokenPolicy::new(credential.clone(), ["scope"]);
		let err = policy
			.on_request(&mut request("http://example.com/fs"))
			.await
			.expect_err("Bearer tokens must not travel over http.");

		assert!(matches!(err, Error::Authentication { .. }));
		assert_eq!(credential.calls.load(Ordering::Relaxed), 0);
	}
}
