//! Local form validation.
//!
//! Mirrors the rules the backend enforces so obviously bad input never
//! reaches the network. Usernames are normalized to lowercase here, at
//! the form boundary, so the rest of the system only ever sees the
//! normalized handle.

use crate::{Credentials, Error, Result, WorkoutDraft};

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const USERNAME_MAX_LENGTH: usize = 15;
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Validate login input and build normalized credentials
pub fn login_credentials(username: &str, password: &str) -> Result<Credentials> {
    let username = normalized_username(username)?;
    check_password(password)?;
    Ok(Credentials {
        username,
        password: password.to_string(),
    })
}

/// Validate registration input; same rules as login plus confirmation
pub fn register_credentials(username: &str, password: &str, confirm: &str) -> Result<Credentials> {
    if password != confirm {
        return Err(Error::Validation("Passwords don't match".into()));
    }
    login_credentials(username, password)
}

/// Validate a workout draft before it is sent to the backend
pub fn workout_draft(draft: &WorkoutDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Validation("Workout name is required".into()));
    }
    exercises(&draft.exercises)
}

/// Validate an exercise list (also used for wholesale replacement in
/// partial updates, where there is no draft to validate)
pub fn exercises(list: &[crate::Exercise]) -> Result<()> {
    if list.is_empty() {
        return Err(Error::Validation("Add at least one exercise".into()));
    }
    for exercise in list {
        if exercise.name.trim().is_empty() {
            return Err(Error::Validation("Exercise name is required".into()));
        }
        if exercise.sets < 1 {
            return Err(Error::Validation("Sets must be at least 1".into()));
        }
        if exercise.reps < 1 {
            return Err(Error::Validation("Reps must be at least 1".into()));
        }
        if !exercise.weight.is_finite() || exercise.weight < 0.0 {
            return Err(Error::Validation("Weight cannot be negative".into()));
        }
    }
    Ok(())
}

fn normalized_username(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length < USERNAME_MIN_LENGTH {
        return Err(Error::Validation(format!(
            "Username must be at least {} characters",
            USERNAME_MIN_LENGTH
        )));
    }
    if length > USERNAME_MAX_LENGTH {
        return Err(Error::Validation(format!(
            "Username cannot be more than {} characters",
            USERNAME_MAX_LENGTH
        )));
    }
    Ok(trimmed.to_lowercase())
}

fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(Error::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }
    Ok(())
}
