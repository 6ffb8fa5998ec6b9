//! Core domain types for the Liftlog client.
//!
//! This module defines the wire and storage types used throughout the
//! system:
//! - Users and credentials
//! - Workouts and their nested exercises
//! - Auth and delete response envelopes
//! - Weight unit preference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// User Types
// ============================================================================

/// An authenticated user as returned by the backend.
///
/// The backend may attach extra fields beyond id/username; those are kept
/// verbatim in `extra` so they survive a store round trip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Login/register request body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response envelope for login and register
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    /// Register may omit the token; login always includes it.
    #[serde(default)]
    pub token: Option<String>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// A workout owned by exactly one user.
///
/// The document-store backend emits `_id`; we accept either spelling and
/// always emit `id`. Date, duration and owner are backend extension
/// fields: optional, and omitted from JSON when absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(
        rename = "userId",
        alias = "user_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// A single exercise nested inside a workout.
///
/// Exercises have no independent lifecycle: updating a workout replaces
/// its exercise list wholesale. They do carry a stable string id so
/// displays never have to fall back to positional identity; the server
/// assigns one when it echoes an exercise back, and the client generates
/// a fresh UUID for exercises built locally (including ones arriving
/// from a backend that omits the field).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    #[serde(alias = "_id", default = "new_exercise_id")]
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

impl Exercise {
    /// Build a local exercise draft with a fresh stable id.
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            id: new_exercise_id(),
            name: name.into(),
            sets,
            reps,
            weight,
        }
    }
}

fn new_exercise_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create payload: everything but the server-assigned id
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// Partial update payload; absent fields are left untouched server-side.
/// When `exercises` is present it replaces the stored list wholesale.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WorkoutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

/// Response envelope for workout deletion
#[derive(Clone, Debug, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ============================================================================
// Preferences
// ============================================================================

/// Display unit for exercise weights
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Kg => write!(f, "kg"),
        }
    }
}
