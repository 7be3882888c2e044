pub mod json_file;
pub mod memory;

pub use json_file::JsonFileProfileStore;
pub use memory::InMemoryProfileStore;

use crate::adaptive::LearningProfile;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}

/// Persistence strategy for per-user learning profiles.
pub trait ProfileStore: Send + Sync {
    fn load(&self, user_id: &str) -> Result<Option<LearningProfile>, StoreError>;

    fn save(&self, user_id: &str, profile: &LearningProfile) -> Result<(), StoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for std::sync::Arc<T> {
    fn load(&self, user_id: &str) -> Result<Option<LearningProfile>, StoreError> {
        (**self).load(user_id)
    }

    fn save(&self, user_id: &str, profile: &LearningProfile) -> Result<(), StoreError> {
        (**self).save(user_id, profile)
    }
}

/// Non-empty, at most 128 chars of `[A-Za-z0-9_-]`.
pub fn validate_user_id(user_id: &str) -> Result<(), StoreError> {
    let valid = !user_id.is_empty()
        && user_id.len() <= 128
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidUserId(user_id.to_string()))
    }
}
