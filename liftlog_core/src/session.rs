//! Session lifecycle.
//!
//! A `Session` is an explicit value constructed once per process and
//! passed down to whatever consumes it; there is no ambient global to
//! look up. Hydration from the persistent store happens in
//! [`Session::restore`], a synchronous one-shot check with no network
//! validation of the token.

use crate::{Result, SessionStore, User};

/// The two states a session can be in
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(User),
}

/// Client-side belief about which user, if any, is authenticated.
///
/// State transitions write through to the [`SessionStore`], which stays
/// the source of truth for the bearer token.
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    state: SessionState,
}

impl Session {
    /// Hydrate from the store: Authenticated if a valid token/user pair
    /// is present, Anonymous otherwise.
    pub fn restore(store: SessionStore) -> Self {
        let state = match store.load() {
            Some(stored) => {
                tracing::debug!("Restored session for {}", stored.user.username);
                SessionState::Authenticated(stored.user)
            }
            None => SessionState::Anonymous,
        };
        Self { store, state }
    }

    /// Current state
    pub fn current(&self) -> &SessionState {
        &self.state
    }

    /// Derived flag; same fact the store's token answers for the client
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The authenticated user, if any
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    /// Transition to Authenticated (from any state) and persist both the
    /// token and the user profile.
    pub fn login(&mut self, token: &str, user: User) -> Result<()> {
        self.store.save(token, &user)?;
        tracing::info!("Logged in as {}", user.username);
        self.state = SessionState::Authenticated(user);
        Ok(())
    }

    /// Transition to Anonymous (from any state) and clear the store.
    ///
    /// The in-memory state is cleared before touching the filesystem, so
    /// the session reads as logged out even if entry removal fails.
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::Anonymous;
        self.store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The backing store (shared with the API client)
    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(username: &str) -> User {
        User {
            id: format!("id-{}", username),
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_restore_from_empty_store_is_anonymous() {
        let temp_dir = tempfile::tempdir().unwrap();
        let session = Session::restore(SessionStore::new(temp_dir.path()));

        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert_eq!(*session.current(), SessionState::Anonymous);
    }

    #[test]
    fn test_restore_from_populated_store_is_authenticated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        store.save("tok-abc", &test_user("alice")).unwrap();

        let session = Session::restore(store);
        assert!(session.is_logged_in());
        assert_eq!(session.user().unwrap().username, "alice");
    }

    #[test]
    fn test_restore_with_corrupt_user_blob_is_anonymous() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        store.save("tok-abc", &test_user("alice")).unwrap();
        std::fs::write(temp_dir.path().join("session/user.json"), "not json").unwrap();

        let session = Session::restore(store);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_login_persists_and_transitions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        let mut session = Session::restore(store.clone());

        session.login("tok-abc", test_user("alice")).unwrap();
        assert!(session.is_logged_in());

        // A fresh session picks the login up from disk
        let restored = Session::restore(store);
        assert_eq!(restored.user().unwrap().username, "alice");
    }

    #[test]
    fn test_login_replaces_existing_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        let mut session = Session::restore(store.clone());

        session.login("tok-a", test_user("alice")).unwrap();
        session.login("tok-b", test_user("bob")).unwrap();

        assert_eq!(session.user().unwrap().username, "bob");
        assert_eq!(store.load().unwrap().token, "tok-b");
    }

    #[test]
    fn test_logout_clears_state_and_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        let mut session = Session::restore(store.clone());

        session.login("tok-abc", test_user("alice")).unwrap();
        session.logout().unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_logout_from_anonymous_is_a_noop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = Session::restore(SessionStore::new(temp_dir.path()));

        session.logout().unwrap();
        assert!(!session.is_logged_in());
    }
}
