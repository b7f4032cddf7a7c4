pub mod auth;
pub mod groups;
pub mod schedule;
pub mod skipping;
pub mod themes;
