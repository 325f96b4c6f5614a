//! Access-token models shared by credentials and the bearer-token policy.

pub mod access;
pub mod secret;
