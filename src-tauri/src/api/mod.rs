//! Remote portal access: the HTTP client and the response types it decodes.

pub mod client;
pub mod types;
