//! Identifiers exchanged with identity collaborators.
//!
//! Communication users are raw `8:acs:<resource>_<user>` strings minted by the identity
//! service. Tenants are either directory GUIDs, verified domains, or one of the authority
//! aliases (`common`, `organizations`, `consumers`).

// self
use crate::_prelude::*;

const TENANT_MAX_LEN: usize = 256;

/// Error returned when an identifier does not have the expected shape.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// A communication user identifier lacks the `8:acs:` prefix or the text after it.
	#[error("Communication user identifier must look like `8:acs:<resource>_<user>`.")]
	NotAcsUser,
	/// The identifier contains a character outside its alphabet.
	#[error("{kind} identifier contains the invalid character {found:?}.")]
	InvalidCharacter {
		/// Kind of identifier.
		kind: &'static str,
		/// First offending character.
		found: char,
	},
	/// The tenant exceeded the allowed length.
	#[error("Tenant identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// Raw identifier of a communication services user.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommunicationUserId(String);
impl CommunicationUserId {
	const PREFIX: &'static str = "8:acs:";

	/// Validates `value` as an `8:acs:` user identifier.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		if value.is_empty() {
			return Err(IdentifierError::Empty { kind: "Communication user" });
		}

		let rest = value.strip_prefix(Self::PREFIX).ok_or(IdentifierError::NotAcsUser)?;

		if rest.is_empty() {
			return Err(IdentifierError::NotAcsUser);
		}
		if let Some(found) = rest.chars().find(|c| c.is_whitespace() || c.is_control()) {
			return Err(IdentifierError::InvalidCharacter { kind: "Communication user", found });
		}

		Ok(Self(value))
	}

	/// Full raw identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Communication resource the user belongs to (text between the prefix and the first `_`).
	pub fn resource_id(&self) -> &str {
		let rest = &self.0[Self::PREFIX.len()..];

		rest.split_once('_').map_or(rest, |(resource, _)| resource)
	}
}
impl TryFrom<String> for CommunicationUserId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<CommunicationUserId> for String {
	fn from(value: CommunicationUserId) -> Self {
		value.0
	}
}
impl Debug for CommunicationUserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CommunicationUser({})", self.0)
	}
}
impl Display for CommunicationUserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Directory tenant addressed by an external token authority.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);
impl TenantId {
	/// Validates `value` as a tenant GUID, domain, or authority alias.
	///
	/// The tenant becomes a URL path segment, so only ASCII letters, digits, `-`, and `.`
	/// are accepted.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		if value.is_empty() {
			return Err(IdentifierError::Empty { kind: "Tenant" });
		}
		if value.len() > TENANT_MAX_LEN {
			return Err(IdentifierError::TooLong { max: TENANT_MAX_LEN });
		}
		if let Some(found) =
			value.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
		{
			return Err(IdentifierError::InvalidCharacter { kind: "Tenant", found });
		}

		Ok(Self(value))
	}

	/// Tenant as it appears in authority URLs.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for TenantId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<TenantId> for String {
	fn from(value: TenantId) -> Self {
		value.0
	}
}
impl Debug for TenantId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Tenant({})", self.0)
	}
}
impl Display for TenantId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
