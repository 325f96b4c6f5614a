//! Credential contracts, access tokens, and validated identifiers.

pub mod credential;
pub mod id;
pub mod token;

pub use credential::*;
pub use id::*;
pub use token::{access::*, secret::*};
