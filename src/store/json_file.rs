use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::adaptive::LearningProfile;
use crate::store::{validate_user_id, ProfileStore, StoreError};

/// One pretty-printed JSON document per user under `root`.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    root: PathBuf,
}

impl JsonFileProfileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn profile_path(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("{user_id}.json"))
    }

    /// User ids that currently have a stored profile.
    pub fn user_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_user_id(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self, user_id: &str) -> Result<Option<LearningProfile>, StoreError> {
        validate_user_id(user_id)?;
        let path = self.profile_path(user_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let profile = serde_json::from_str(&raw)?;
        tracing::debug!(user_id, path = %path.display(), "profile loaded");
        Ok(Some(profile))
    }

    fn save(&self, user_id: &str, profile: &LearningProfile) -> Result<(), StoreError> {
        validate_user_id(user_id)?;
        let path = self.profile_path(user_id);
        let tmp = self.root.join(format!(".{user_id}.json.tmp"));

        let body = serde_json::to_vec_pretty(profile)?;
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(user_id, path = %path.display(), "profile saved");
        Ok(())
    }
}
