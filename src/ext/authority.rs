//! Username/password token authority contract and its credential adapter.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CredentialFuture, TenantId, TokenCredential, TokenSecret},
	error::ConfigError,
};

/// Boxed future returned by [`UsernamePasswordAuthority::acquire_token_by_username_password`].
pub type AuthorityFuture<'a> = Pin<Box<dyn Future<Output = Result<AccessToken>> + 'a + Send>>;

/// Token authority that accepts resource-owner password credentials.
pub trait UsernamePasswordAuthority
where
	Self: Send + Sync,
{
	/// Issues a token for `scopes` on behalf of `username`.
	fn acquire_token_by_username_password<'a>(
		&'a self,
		username: &'a str,
		password: &'a TokenSecret,
		scopes: &'a [String],
	) -> AuthorityFuture<'a>;
}

/// Public-client registration an authority implementation is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
	/// Authority host, e.g. `https://login.microsoftonline.com/`.
	pub authority_host: Url,
	/// Directory tenant.
	pub tenant: TenantId,
	/// Application (client) identifier.
	pub client_id: String,
}
impl AuthorityConfig {
	/// Creates a registration; fails with [`Error::InvalidArgument`] on an empty client id.
	pub fn new(authority_host: Url, tenant: TenantId, client_id: impl Into<String>) -> Result<Self> {
		let client_id = client_id.into();

		if client_id.trim().is_empty() {
			return Err(Error::InvalidArgument { parameter: "client_id" });
		}

		Ok(Self { authority_host, tenant, client_id })
	}

	/// Tenant-specific authority URL (`{host}/{tenant}`).
	pub fn tenant_authority(&self) -> Result<Url> {
		let mut host = self.authority_host.clone();

		if !host.path().ends_with('/') {
			let directory = format!("{}/", host.path());

			host.set_path(&directory);
		}

		host.join(self.tenant.as_str()).map_err(|source| {
			ConfigError::InvalidUrl { url: self.authority_host.to_string(), source }.into()
		})
	}
}

/// [`TokenCredential`] that signs in with a fixed username and password.
///
/// Plugging this into a [`BearerTokenPolicy`](crate::policy::BearerTokenPolicy) lets the
/// pipeline authenticate as a directory user.
pub struct UsernamePasswordCredential<A>
where
	A: UsernamePasswordAuthority,
{
	authority: Arc<A>,
	username: String,
	password: TokenSecret,
}
impl<A> UsernamePasswordCredential<A>
where
	A: UsernamePasswordAuthority,
{
	/// Creates the credential; both `username` and `password` must be non-empty.
	pub fn new(
		authority: Arc<A>,
		username: impl Into<String>,
		password: impl Into<TokenSecret>,
	) -> Result<Self> {
		let username = username.into();
		let password = password.into();

		if username.trim().is_empty() {
			return Err(Error::InvalidArgument { parameter: "username" });
		}
		if password.is_empty() {
			return Err(Error::InvalidArgument { parameter: "password" });
		}

		Ok(Self { authority, username, password })
	}
}
impl<A> Debug for UsernamePasswordCredential<A>
where
	A: UsernamePasswordAuthority,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UsernamePasswordCredential")
			.field("username", &self.username)
			.field("password", &self.password)
			.finish()
	}
}
impl<A> TokenCredential for UsernamePasswordCredential<A>
where
	A: UsernamePasswordAuthority,
{
	fn get_token<'a>(&'a self, scopes: &'a [String]) -> CredentialFuture<'a> {
		self.authority.acquire_token_by_username_password(&self.username, &self.password, scopes)
	}
}
