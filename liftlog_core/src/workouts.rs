//! Workout service: thin typed adapters over the workout endpoints.
//!
//! Contract: every mutating call here ([`create_workout`],
//! [`update_workout`], [`delete_workout`]) invalidates any workout list
//! the caller previously fetched. There is no incremental patching of
//! local snapshots; the caller re-fetches with [`get_user_workouts`]
//! after a mutation succeeds. No retry, no caching, no request
//! coalescing: each call is one independent HTTP request.

use crate::{ApiClient, DeleteResponse, Result, Workout, WorkoutDraft, WorkoutPatch};

/// Fetch all workouts belonging to the given user
pub async fn get_user_workouts(client: &ApiClient, username: &str) -> Result<Vec<Workout>> {
    client.get(&format!("/users/{}/workouts", username)).await
}

/// Fetch one workout by id
pub async fn get_workout(client: &ApiClient, id: &str) -> Result<Workout> {
    client.get(&format!("/workouts/{}", id)).await
}

/// Create a workout; the backend assigns the id
pub async fn create_workout(client: &ApiClient, draft: &WorkoutDraft) -> Result<Workout> {
    client.post("/workouts", draft).await
}

/// Partially update a workout. A patch carrying exercises replaces the
/// stored exercise list wholesale.
pub async fn update_workout(client: &ApiClient, id: &str, patch: &WorkoutPatch) -> Result<Workout> {
    client.put(&format!("/workouts/{}", id), patch).await
}

/// Delete a workout by id
pub async fn delete_workout(client: &ApiClient, id: &str) -> Result<DeleteResponse> {
    client.delete(&format!("/workouts/{}", id)).await
}
