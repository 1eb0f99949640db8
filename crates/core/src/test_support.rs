//! Fixture builders shared by the unit tests of this crate.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::catalog::{Course, CourseWithSubjects, ItemDefinition, Subject};
use crate::types::Timestamp;
use crate::user::{Role, User};

pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 9, 2, 9, 30, 0).unwrap()
}

pub fn definition(title: &str, total_points: f64) -> ItemDefinition {
    ItemDefinition {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        due_date: None,
        total_points,
    }
}

/// A subject with one assignment per entry of `assignment_points`. The
/// course id is patched in by [`course_with`].
pub fn subject_with(assignment_points: &[f64]) -> Subject {
    Subject {
        id: Uuid::new_v4(),
        course_id: Uuid::nil(),
        title: "Introduction to Statistics".to_string(),
        code: "STAT 101".to_string(),
        units: 3,
        assignments: assignment_points
            .iter()
            .enumerate()
            .map(|(i, points)| definition(&format!("Assignment {}", i + 1), *points))
            .collect(),
        projects: Vec::new(),
    }
}

pub fn course_with(subjects: Vec<Subject>) -> CourseWithSubjects {
    let id = Uuid::new_v4();
    let subjects: Vec<Subject> = subjects
        .into_iter()
        .map(|mut s| {
            s.course_id = id;
            s
        })
        .collect();
    CourseWithSubjects {
        course: Course {
            id,
            title: "Data Science Diploma".to_string(),
            description: None,
            subject_ids: subjects.iter().map(|s| s.id).collect(),
        },
        subjects,
    }
}

pub fn student() -> User {
    User {
        id: Uuid::new_v4(),
        first_name: "Ada".to_string(),
        last_name: "Okafor".to_string(),
        email: format!("{}@example.com", Uuid::new_v4().simple()),
        role: Role::Student,
        purchased_courses: Vec::new(),
        subject_progress: Vec::new(),
    }
}
