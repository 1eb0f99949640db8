//! Student progress view: per-subject graded counts and weighted averages.
//!
//! The view is built from two independent fetches, the user record and the
//! catalog definitions, combined by [`build_student_view`]. Progress that
//! references a definition the catalog no longer has degrades to a
//! placeholder title and is left out of point totals.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{Course, ItemKind, Subject};
use crate::error::CoreError;
use crate::progress::{ItemProgress, ItemStatus, SubjectProgress};
use crate::store::{require_user, CatalogStore, UserDirectory};
use crate::types::EntityId;
use crate::user::User;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Which enrolled courses a view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressScope {
    #[default]
    AllCourses,
    Course(EntityId),
}

impl ProgressScope {
    fn includes(&self, course_id: EntityId) -> bool {
        match self {
            Self::AllCourses => true,
            Self::Course(id) => *id == course_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub item_id: EntityId,
    pub title: String,
    pub status: ItemStatus,
    pub grade: Option<f64>,
    /// `None` when the definition could not be resolved.
    pub total_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub subject_id: EntityId,
    pub title: String,
    pub code: String,
    pub units: i32,
    /// Percentage of possible points earned on graded items; `None` when
    /// nothing with a known point value has been graded yet.
    pub average_score: Option<f64>,
    pub graded_items_count: usize,
    pub assignments: Vec<ItemSummary>,
    pub projects: Vec<ItemSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseProgress {
    pub course_id: EntityId,
    pub title: String,
    pub subjects: Vec<SubjectSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentView {
    pub user_id: EntityId,
    pub courses: Vec<CourseProgress>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PointTotals {
    earned: f64,
    possible: f64,
    graded: usize,
}

impl PointTotals {
    fn average(&self) -> Option<f64> {
        (self.possible > 0.0).then(|| self.earned * 100.0 / self.possible)
    }
}

fn summarize_items(
    items: &[ItemProgress],
    subject: &Subject,
    kind: ItemKind,
    totals: &mut PointTotals,
) -> Vec<ItemSummary> {
    items
        .iter()
        .map(|item| {
            let definition = subject.find_definition(kind, item.item_id);
            let total_points = definition.map(|d| d.total_points);

            if let (Some(grade), Some(points)) = (item.graded_value(), total_points) {
                totals.earned += grade;
                totals.possible += points;
                totals.graded += 1;
            }

            ItemSummary {
                item_id: item.item_id,
                title: definition
                    .map(|d| d.title.clone())
                    .unwrap_or_else(|| kind.missing_title().to_string()),
                status: item.status,
                grade: item.grade,
                total_points,
            }
        })
        .collect()
}

/// Summarize one subject's progress against its definitions.
pub fn summarize_subject(progress: &SubjectProgress, subject: &Subject) -> SubjectSummary {
    let mut totals = PointTotals::default();
    let assignments = summarize_items(
        &progress.assignments,
        subject,
        ItemKind::Assignment,
        &mut totals,
    );
    let projects = summarize_items(&progress.projects, subject, ItemKind::Project, &mut totals);

    SubjectSummary {
        subject_id: subject.id,
        title: subject.title.clone(),
        code: subject.code.clone(),
        units: subject.units,
        average_score: totals.average(),
        graded_items_count: totals.graded,
        assignments,
        projects,
    }
}

/// Group subject summaries by enrolled course.
///
/// Courses follow the user's enrollment order and subjects follow course
/// order. A subject is listed only when the user has progress for it and its
/// definition is present in `subjects`; a course missing from `courses` is
/// left out.
pub fn build_student_view(
    user: &User,
    courses: &[Course],
    subjects: &[Subject],
    scope: ProgressScope,
) -> StudentView {
    let courses_by_id: HashMap<EntityId, &Course> = courses.iter().map(|c| (c.id, c)).collect();
    let subjects_by_id: HashMap<EntityId, &Subject> =
        subjects.iter().map(|s| (s.id, s)).collect();

    let courses = user
        .purchased_courses
        .iter()
        .filter(|id| scope.includes(**id))
        .filter_map(|id| courses_by_id.get(id))
        .map(|course| CourseProgress {
            course_id: course.id,
            title: course.title.clone(),
            subjects: course
                .subject_ids
                .iter()
                .filter_map(|subject_id| {
                    let progress = user.progress_for(*subject_id)?;
                    let subject = subjects_by_id.get(subject_id)?;
                    Some(summarize_subject(progress, subject))
                })
                .collect(),
        })
        .collect();

    StudentView {
        user_id: user.id,
        courses,
    }
}

/// Fetch a student's progress and the matching definitions, then build the
/// view. Read-only.
pub async fn compute_student_view<C, U>(
    catalog: &C,
    users: &U,
    student_id: EntityId,
    scope: ProgressScope,
) -> Result<StudentView, CoreError>
where
    C: CatalogStore,
    U: UserDirectory,
{
    let user = require_user(users, student_id).await?;

    let course_ids: Vec<EntityId> = user
        .purchased_courses
        .iter()
        .copied()
        .filter(|id| scope.includes(*id))
        .collect();
    let subject_ids: Vec<EntityId> = user.subject_progress.iter().map(|p| p.subject_id).collect();

    let courses = catalog.get_courses(&course_ids).await?;
    let subjects = catalog.get_subject_definitions(&subject_ids).await?;

    Ok(build_student_view(&user, &courses, &subjects, scope))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
