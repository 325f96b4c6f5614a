//! Communication identity client contract.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CommunicationUserId, TokenSecret},
};

/// Boxed future returned by [`CommunicationIdentity`] operations.
pub type IdentityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Token issued for a communication user.
pub type CommunicationToken = AccessToken;

/// Capability granted by a communication token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationTokenScope {
	/// Chat access.
	Chat,
	/// Voice and video calling.
	Voip,
}
impl CommunicationTokenScope {
	/// Returns the wire label of the scope.
	pub const fn as_str(self) -> &'static str {
		match self {
			CommunicationTokenScope::Chat => "chat",
			CommunicationTokenScope::Voip => "voip",
		}
	}
}
impl Display for CommunicationTokenScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// User created together with its first token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationUserAndToken {
	/// Newly created user.
	pub user: CommunicationUserId,
	/// Token issued for `user`.
	pub token: CommunicationToken,
}

/// Remote identity operations for communication users.
///
/// Each call is a single service round-trip. Service failures surface through the
/// implementation's mapping into [`Error`].
pub trait CommunicationIdentity
where
	Self: Send + Sync,
{
	/// Creates a user with no tokens.
	fn create_user(&self) -> IdentityFuture<'_, CommunicationUserId>;

	/// Creates a user and issues a token for `scopes` in one call.
	fn create_user_and_token<'a>(
		&'a self,
		scopes: &'a [CommunicationTokenScope],
	) -> IdentityFuture<'a, CommunicationUserAndToken>;

	/// Issues a token for an existing user.
	fn get_token<'a>(
		&'a self,
		user: &'a CommunicationUserId,
		scopes: &'a [CommunicationTokenScope],
	) -> IdentityFuture<'a, CommunicationToken>;

	/// Revokes every token issued to `user`.
	fn revoke_tokens<'a>(&'a self, user: &'a CommunicationUserId) -> IdentityFuture<'a, ()>;

	/// Deletes `user` and revokes its tokens.
	fn delete_user<'a>(&'a self, user: &'a CommunicationUserId) -> IdentityFuture<'a, ()>;

	/// Exchanges a directory token of a Teams user for a communication token.
	fn get_token_for_teams_user<'a>(
		&'a self,
		external_token: &'a TokenSecret,
	) -> IdentityFuture<'a, CommunicationToken>;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_use_lowercase_labels() {
		let encoded = serde_json::to_string(&[
			CommunicationTokenScope::Chat,
			CommunicationTokenScope::Voip,
		])
		.expect("Scopes should serialize.");

		assert_eq!(encoded, r#"["chat","voip"]"#);
		assert_eq!(CommunicationTokenScope::Voip.to_string(), "voip");
	}
}
