//! Course catalog: courses, the subjects they own, and the assignment and
//! project definitions each subject carries.
//!
//! Definitions are read-only from the point of view of the progress
//! subsystem. The validation helpers here are applied by the request layer
//! before a definition is written.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Item kind identifier for assignments.
pub const KIND_ASSIGNMENT: &str = "assignment";

/// Item kind identifier for projects.
pub const KIND_PROJECT: &str = "project";

/// All valid item kinds.
pub const VALID_ITEM_KINDS: &[&str] = &[KIND_ASSIGNMENT, KIND_PROJECT];

/// Maximum length of a course, subject or item title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a subject code such as `STAT 101`.
pub const MAX_CODE_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which list of a subject an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Assignment,
    Project,
}

impl ItemKind {
    /// Convert from a stored or submitted string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_ASSIGNMENT => Ok(Self::Assignment),
            KIND_PROJECT => Ok(Self::Project),
            _ => Err(format!(
                "Invalid item kind '{s}'. Must be one of: {}",
                VALID_ITEM_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => KIND_ASSIGNMENT,
            Self::Project => KIND_PROJECT,
        }
    }

    /// Title shown when a progress item no longer resolves to a definition.
    pub fn missing_title(&self) -> &'static str {
        match self {
            Self::Assignment => "Assignment Missing",
            Self::Project => "Project Missing",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// An assignment or project definition within a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub total_points: f64,
}

/// A syllabus unit owned by exactly one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: EntityId,
    pub course_id: EntityId,
    pub title: String,
    pub code: String,
    pub units: i32,
    pub assignments: Vec<ItemDefinition>,
    pub projects: Vec<ItemDefinition>,
}

impl Subject {
    /// The ordered definitions of the given kind.
    pub fn definitions(&self, kind: ItemKind) -> &[ItemDefinition] {
        match kind {
            ItemKind::Assignment => &self.assignments,
            ItemKind::Project => &self.projects,
        }
    }

    /// Look up a definition by id within the list for `kind`.
    pub fn find_definition(&self, kind: ItemKind, item_id: EntityId) -> Option<&ItemDefinition> {
        self.definitions(kind).iter().find(|d| d.id == item_id)
    }
}

/// A top-level offering. `subject_ids` keeps the order subjects were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub subject_ids: Vec<EntityId>,
}

/// A course together with its fully loaded subjects, in course order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWithSubjects {
    pub course: Course,
    pub subjects: Vec<Subject>,
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a title-like field is non-blank and within length limits.
pub fn validate_title(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_TITLE_LENGTH}"
        )));
    }
    Ok(())
}

/// Validate a subject code (`STAT 101`).
pub fn validate_subject_code(code: &str) -> Result<(), CoreError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("code must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "code exceeds maximum length of {MAX_CODE_LENGTH}"
        )));
    }
    Ok(())
}

/// Validate subject credit units.
pub fn validate_units(units: i32) -> Result<(), CoreError> {
    if units < 0 {
        return Err(CoreError::Validation(format!(
            "units must be non-negative, got {units}"
        )));
    }
    Ok(())
}

/// Validate the point value of a new assignment or project definition.
pub fn validate_total_points(total_points: f64) -> Result<(), CoreError> {
    if !total_points.is_finite() {
        return Err(CoreError::Validation(
            "total_points must be a finite number".into(),
        ));
    }
    if total_points < 0.0 {
        return Err(CoreError::Validation(format!(
            "total_points must be non-negative, got {total_points}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
