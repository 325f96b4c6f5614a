//! Bearer access tokens with absolute expiry.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token issued by a [`TokenCredential`](crate::auth::TokenCredential) or an
/// external authority.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Bearer token value.
	pub token: TokenSecret,
	/// Instant after which the token must not be presented.
	pub expires_on: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token that expires at `expires_on`.
	pub fn new(token: impl Into<String>, expires_on: OffsetDateTime) -> Self {
		Self { token: TokenSecret::new(token), expires_on }
	}

	/// Returns `true` if the token expires within `window` of `now` (or already has).
	pub fn expires_within(&self, window: Duration, now: OffsetDateTime) -> bool {
		self.expires_on - now <= window
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("token", &"<redacted>")
			.field("expires_on", &self.expires_on)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_window_is_inclusive() {
		let now = macros::datetime!(2026-01-01 12:00 UTC);
		let token = AccessToken::new("abc", now + Duration::minutes(5));

		assert!(token.expires_within(Duration::minutes(5), now));
		assert!(!token.expires_within(Duration::minutes(4), now));
		assert!(token.expires_within(Duration::ZERO, now + Duration::hours(1)));
		assert!(!format!("{token:?}").contains("abc"));
	}
}
