//! The user record as read and written by the user directory.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::progress::SubjectProgress;
use crate::types::EntityId;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role strings.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_ADMIN];

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a first or last name.
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Admin => ROLE_ADMIN,
        }
    }
}

/// A user with enrollment list and progress.
///
/// Holds at most one [`SubjectProgress`] per subject, and only for subjects
/// whose owning course is in `purchased_courses`. The enrollment operations
/// maintain both rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub purchased_courses: Vec<EntityId>,
    pub subject_progress: Vec<SubjectProgress>,
}

impl User {
    pub fn is_enrolled(&self, course_id: EntityId) -> bool {
        self.purchased_courses.contains(&course_id)
    }

    pub fn progress_for(&self, subject_id: EntityId) -> Option<&SubjectProgress> {
        self.subject_progress
            .iter()
            .find(|p| p.subject_id == subject_id)
    }

    pub fn progress_for_mut(&mut self, subject_id: EntityId) -> Option<&mut SubjectProgress> {
        self.subject_progress
            .iter_mut()
            .find(|p| p.subject_id == subject_id)
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a first or last name.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH}"
        )));
    }
    Ok(())
}

/// Shallow email shape check: one `@` with text on both sides and a dot in
/// the domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();
    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(CoreError::Validation(format!(
            "email exceeds maximum length of {MAX_EMAIL_LENGTH}"
        )));
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }
    Ok(())
}
