use std::collections::HashMap;

use parking_lot::RwLock;

use crate::adaptive::LearningProfile;
use crate::store::{validate_user_id, ProfileStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, LearningProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self, user_id: &str) -> Result<Option<LearningProfile>, StoreError> {
        validate_user_id(user_id)?;
        Ok(self.profiles.read().get(user_id).cloned())
    }

    fn save(&self, user_id: &str, profile: &LearningProfile) -> Result<(), StoreError> {
        validate_user_id(user_id)?;
        self.profiles
            .write()
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_loads_none() {
        let store = InMemoryProfileStore::new();
        assert!(store.load("nobody").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = InMemoryProfileStore::new();
        let mut profile = LearningProfile::new();
        profile.preferences.show_recommendations = false;

        store.save("alice", &profile).unwrap();
        assert_eq!(store.load("alice").unwrap(), Some(profile));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_bad_user_id() {
        let store = InMemoryProfileStore::new();
        assert!(matches!(
            store.save("a/b", &LearningProfile::new()),
            Err(StoreError::InvalidUserId(_))
        ));
    }
}
