//! Per-student progress records.
//!
//! A [`SubjectProgress`] tracks one student against one subject. Item
//! progress is keyed by the caller-supplied item id and looked up explicitly
//! so a subject never holds two entries for the same item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_GRADED: &str = "graded";

/// All valid item status strings.
pub const VALID_ITEM_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_SUBMITTED, STATUS_GRADED];

pub const ATTENDANCE_PRESENT: &str = "present";
pub const ATTENDANCE_ABSENT: &str = "absent";
pub const ATTENDANCE_LATE: &str = "late";
pub const ATTENDANCE_EXCUSED: &str = "excused";

/// All valid attendance status strings.
pub const VALID_ATTENDANCE_STATUSES: &[&str] = &[
    ATTENDANCE_PRESENT,
    ATTENDANCE_ABSENT,
    ATTENDANCE_LATE,
    ATTENDANCE_EXCUSED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle of a single assignment or project for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Submitted,
    Graded,
}

impl ItemStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_SUBMITTED => Ok(Self::Submitted),
            STATUS_GRADED => Ok(Self::Graded),
            _ => Err(format!(
                "Invalid item status '{s}'. Must be one of: {}",
                VALID_ITEM_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Submitted => STATUS_SUBMITTED,
            Self::Graded => STATUS_GRADED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ATTENDANCE_PRESENT => Ok(Self::Present),
            ATTENDANCE_ABSENT => Ok(Self::Absent),
            ATTENDANCE_LATE => Ok(Self::Late),
            ATTENDANCE_EXCUSED => Ok(Self::Excused),
            _ => Err(format!(
                "Invalid attendance status '{s}'. Must be one of: {}",
                VALID_ATTENDANCE_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => ATTENDANCE_PRESENT,
            Self::Absent => ATTENDANCE_ABSENT,
            Self::Late => ATTENDANCE_LATE,
            Self::Excused => ATTENDANCE_EXCUSED,
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// One student's state against one assignment or project.
///
/// `item_id` is not guaranteed to resolve to a definition: catalog and
/// progress may drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProgress {
    pub item_id: EntityId,
    pub status: ItemStatus,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
}

impl ItemProgress {
    /// A freshly graded item, created when a score arrives for an item the
    /// student has no entry for yet.
    pub fn graded(item_id: EntityId, grade: f64, now: Timestamp) -> Self {
        Self {
            item_id,
            status: ItemStatus::Graded,
            grade: Some(grade),
            feedback: None,
            file_url: None,
            submitted_at: Some(now),
        }
    }

    /// Set the grade and mark the item graded. Returns `true` if either the
    /// grade or the status actually changed.
    pub fn set_grade(&mut self, grade: f64) -> bool {
        let changed = self.grade != Some(grade) || self.status != ItemStatus::Graded;
        self.grade = Some(grade);
        self.status = ItemStatus::Graded;
        changed
    }

    /// Remove the grade and reset the item to pending.
    pub fn clear_grade(&mut self) {
        self.grade = None;
        self.status = ItemStatus::Pending;
    }

    /// Whether this item contributes to a score: graded with a grade present.
    pub fn graded_value(&self) -> Option<f64> {
        match (self.status, self.grade) {
            (ItemStatus::Graded, Some(grade)) if grade.is_finite() => Some(grade),
            _ => None,
        }
    }
}

/// A dated attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// One student's tracked state against one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject_id: EntityId,
    pub assignments: Vec<ItemProgress>,
    pub projects: Vec<ItemProgress>,
    pub attendance: Vec<AttendanceEntry>,
}

impl SubjectProgress {
    /// Empty progress, as provisioned at enrollment.
    pub fn new(subject_id: EntityId) -> Self {
        Self {
            subject_id,
            assignments: Vec::new(),
            projects: Vec::new(),
            attendance: Vec::new(),
        }
    }

    pub fn items(&self, kind: ItemKind) -> &[ItemProgress] {
        match kind {
            ItemKind::Assignment => &self.assignments,
            ItemKind::Project => &self.projects,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<ItemProgress> {
        match kind {
            ItemKind::Assignment => &mut self.assignments,
            ItemKind::Project => &mut self.projects,
        }
    }

    pub fn find_item(&self, kind: ItemKind, item_id: EntityId) -> Option<&ItemProgress> {
        self.items(kind).iter().find(|i| i.item_id == item_id)
    }

    pub fn find_item_mut(&mut self, kind: ItemKind, item_id: EntityId) -> Option<&mut ItemProgress> {
        self.items_mut(kind).iter_mut().find(|i| i.item_id == item_id)
    }

    /// Record attendance for `date`, replacing any existing mark for the same
    /// day. Entries stay sorted by date. Returns `true` if anything changed.
    pub fn record_attendance(&mut self, date: NaiveDate, status: AttendanceStatus) -> bool {
        match self.attendance.binary_search_by(|e| e.date.cmp(&date)) {
            Ok(idx) => {
                let entry = &mut self.attendance[idx];
                if entry.status == status {
                    return false;
                }
                entry.status = status;
                true
            }
            Err(idx) => {
                self.attendance.insert(idx, AttendanceEntry { date, status });
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
