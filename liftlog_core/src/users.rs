//! User service: thin typed adapters over the auth endpoints.
//!
//! These functions do not catch; API client errors propagate unchanged
//! to the caller, which is the sole recovery point.

use crate::{ApiClient, AuthResponse, Credentials, Result};

/// Log in with validated credentials
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<AuthResponse> {
    client.post("/users/login", credentials).await
}

/// Register a new account
///
/// The backend may or may not include a token in the response; callers
/// that want a live session afterwards should fall back to [`login`]
/// when it is absent.
pub async fn register(client: &ApiClient, credentials: &Credentials) -> Result<AuthResponse> {
    client.post("/users", credentials).await
}
