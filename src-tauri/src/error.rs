use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyMateError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Authorization required")]
    Unauthorized,

    #[error("Portal error {code}: {message}")]
    Api { code: i64, message: String },
}

impl StudyMateError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Unauthorized => "unauthorized",
            Self::Api { .. } => "api",
        }
    }
}

/// Commands hand this to the frontend as `{kind, message}`; screens match on
/// `kind` to pick between a forced logout and a visible message.
impl Serialize for StudyMateError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StudyMateError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
