#![forbid(unsafe_code)]

//! Core client library for the Liftlog workout tracker.
//!
//! This crate provides:
//! - Domain types (users, workouts, exercises)
//! - Persistent session store and session lifecycle
//! - Authenticated API client for the Liftlog REST backend
//! - Domain services (auth, workout CRUD)
//! - Local form validation

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod session;
pub mod client;
pub mod validate;
pub mod users;
pub mod workouts;

// Re-export commonly used types
pub use error::{Error, Result, UNAUTHORIZED_MESSAGE};
pub use types::*;
pub use config::Config;
pub use store::{SessionStore, StoredSession};
pub use session::{Session, SessionState};
pub use client::ApiClient;
