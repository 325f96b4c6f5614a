//! Token credential contract consumed by the bearer-token policy.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Boxed future returned by [`TokenCredential::get_token`].
pub type CredentialFuture<'a> = Pin<Box<dyn Future<Output = Result<AccessToken>> + 'a + Send>>;

/// Source of bearer tokens for a set of scopes.
///
/// Implementations decide how tokens are minted (managed identity, client secret, a
/// developer CLI, a fixed token in tests). The pipeline only caches what they return and
/// asks again once the cached token nears expiry.
pub trait TokenCredential
where
	Self: Send + Sync,
{
	/// Returns a token valid for every scope in `scopes`.
	fn get_token<'a>(&'a self, scopes: &'a [String]) -> CredentialFuture<'a>;
}
