//! Persistent session store.
//!
//! Holds exactly two keyed entries under `<data_dir>/session/`: the raw
//! bearer token and the serialized user profile. Writes are atomic
//! (temp file + rename) with exclusive file locking so a crashed write
//! never leaves a half-written entry behind.
//!
//! No expiry is tracked locally; a stale token is only discovered when
//! the backend rejects a request.

use crate::{Result, User};
use fs2::FileExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// The token/user pair read back from disk
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// File-backed store for the current session
#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted under the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into().join("session"),
        }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    /// Persist both entries. Either both land on disk or the previous
    /// contents survive.
    pub fn save(&self, token: &str, user: &User) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        write_atomic(&self.token_path(), token.as_bytes())?;
        let blob = serde_json::to_vec(user)?;
        write_atomic(&self.user_path(), &blob)?;

        tracing::debug!("Saved session for {} to {:?}", user.username, self.dir);
        Ok(())
    }

    /// Load the stored session.
    ///
    /// Returns `None` unless both entries are present and the user blob
    /// parses; a malformed blob logs a warning and yields `None` rather
    /// than an error.
    pub fn load(&self) -> Option<StoredSession> {
        let token = match std::fs::read_to_string(self.token_path()) {
            Ok(t) => t.trim().to_string(),
            Err(_) => {
                tracing::debug!("No token found in {:?}", self.dir);
                return None;
            }
        };
        if token.is_empty() {
            tracing::warn!("Empty token entry in {:?}, treating as logged out", self.dir);
            return None;
        }

        let contents = match std::fs::read_to_string(self.user_path()) {
            Ok(c) => c,
            Err(_) => {
                tracing::debug!("No user profile found in {:?}", self.dir);
                return None;
            }
        };

        match serde_json::from_str::<User>(&contents) {
            Ok(user) => Some(StoredSession { token, user }),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse stored user profile in {:?}: {}. Treating as logged out.",
                    self.dir,
                    e
                );
                None
            }
        }
    }

    /// Current bearer token, if any. Checked per request by the API client.
    pub fn token(&self) -> Option<String> {
        let token = std::fs::read_to_string(self.token_path()).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Remove both entries. Absent entries are not an error.
    pub fn clear(&self) -> Result<()> {
        for path in [self.token_path(), self.user_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::debug!("Cleared session store at {:?}", self.dir);
        Ok(())
    }
}

/// Write contents to a temp file in the target directory, then rename
/// over the destination. Exclusive lock serializes concurrent writers.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
    })?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(contents)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path)
        .map_err(|e| crate::Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u1".into(),
            username: "alice".into(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok-abc123", &test_user()).unwrap();

        let loaded = store.load().expect("session should load");
        assert_eq!(loaded.token, "tok-abc123");
        assert_eq!(loaded.user, test_user());
        assert_eq!(store.token().as_deref(), Some("tok-abc123"));
    }

    #[test]
    fn test_load_empty_store_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        assert!(store.load().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_corrupt_user_blob_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok-abc123", &test_user()).unwrap();
        std::fs::write(temp_dir.path().join("session/user.json"), "{ not json }").unwrap();

        assert!(store.load().is_none());
        // The token entry alone does not make a session
    }

    #[test]
    fn test_token_without_user_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        std::fs::create_dir_all(temp_dir.path().join("session")).unwrap();
        std::fs::write(temp_dir.path().join("session/token"), "tok-orphan").unwrap();

        assert!(store.load().is_none());
        // token() still answers for the API client's purposes
        assert_eq!(store.token().as_deref(), Some("tok-orphan"));
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok-abc123", &test_user()).unwrap();
        store.clear().unwrap();

        assert!(store.load().is_none());
        assert!(!temp_dir.path().join("session/token").exists());
        assert!(!temp_dir.path().join("session/user.json").exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_save_overwrites_previous_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok-old", &test_user()).unwrap();

        let bob = User {
            id: "u2".into(),
            username: "bob".into(),
            extra: serde_json::Map::new(),
        };
        store.save("tok-new", &bob).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "tok-new");
        assert_eq!(loaded.user.username, "bob");
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok-abc123", &test_user()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path().join("session"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "token" && e.file_name() != "user.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only token and user.json, found extras: {:?}",
            extras
        );
    }
}
