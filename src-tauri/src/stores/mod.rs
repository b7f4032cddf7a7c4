//! Client-side durable state: the session and the selected class group.
//!
//! Each store owns exactly one key in the preferences file and is the only
//! writer for it. In-memory state never diverges silently from storage:
//! mutations commit memory only after the durable write settles.

pub mod group;
pub mod session;
pub mod storage;
