//! Bulk score application.
//!
//! A batch of `(subject, kind, item) -> raw string` entries is applied to one
//! student's progress. Entries that cannot be applied are skipped without
//! failing the batch, and the record is written at most once.

use serde::Serialize;

use crate::catalog::ItemKind;
use crate::error::CoreError;
use crate::progress::ItemProgress;
use crate::store::{require_user, UserDirectory};
use crate::types::{EntityId, Timestamp};
use crate::user::User;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Decoded address of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub subject_id: EntityId,
    pub kind: ItemKind,
    pub item_id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub key: ScoreKey,
    pub raw: String,
}

/// An ordered batch of entries plus the number of fields that were dropped
/// while decoding it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBatch {
    pub entries: Vec<ScoreEntry>,
    pub malformed: usize,
}

/// Classification of a raw grade string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeInput {
    Empty,
    Invalid,
    Value(f64),
}

/// Parse a raw grade. Surrounding whitespace is ignored; anything that is not
/// a finite decimal number is [`GradeInput::Invalid`].
pub fn parse_grade(raw: &str) -> GradeInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return GradeInput::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => GradeInput::Value(value),
        _ => GradeInput::Invalid,
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Counts collected while applying a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTally {
    /// Entries that changed the record.
    pub changed: usize,
    /// Entries ignored: unknown subject progress or malformed key.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ScoreOutcome {
    /// At least one entry changed the record, which was saved once.
    Updated { changed: usize, skipped: usize },
    /// Nothing changed and nothing was written.
    NoChanges { skipped: usize },
}

impl ScoreOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Updated { changed: 1, .. } => "1 score updated".to_string(),
            Self::Updated { changed, .. } => format!("{changed} scores updated"),
            Self::NoChanges { .. } => "No changes to update".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record mutation
// ---------------------------------------------------------------------------

/// Apply one entry to `user`. Returns `None` if the entry was skipped,
/// otherwise whether the record changed.
fn apply_entry(user: &mut User, entry: &ScoreEntry, now: Timestamp) -> Option<bool> {
    let ScoreKey {
        subject_id,
        kind,
        item_id,
    } = entry.key;
    let user_id = user.id;

    let Some(progress) = user.progress_for_mut(subject_id) else {
        tracing::warn!(
            %user_id,
            %subject_id,
            "No progress record for subject, skipping score"
        );
        return None;
    };

    let changed = match parse_grade(&entry.raw) {
        GradeInput::Empty | GradeInput::Invalid => match progress.find_item_mut(kind, item_id) {
            Some(item) => {
                item.clear_grade();
                true
            }
            None => false,
        },
        GradeInput::Value(grade) => match progress.find_item_mut(kind, item_id) {
            Some(item) => item.set_grade(grade),
            None => {
                progress
                    .items_mut(kind)
                    .push(ItemProgress::graded(item_id, grade, now));
                true
            }
        },
    };
    Some(changed)
}

/// Apply every entry of `entries` to `user` in order.
pub fn apply_score_entries(user: &mut User, entries: &[ScoreEntry], now: Timestamp) -> ScoreTally {
    let mut tally = ScoreTally::default();
    for entry in entries {
        match apply_entry(user, entry, now) {
            Some(true) => tally.changed += 1,
            Some(false) => {}
            None => tally.skipped += 1,
        }
    }
    tally
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// Apply an admin-submitted score batch to a student.
///
/// Grades are not checked against the item's `total_points`: a grade above
/// the point value is stored as given.
pub async fn apply_scores<U: UserDirectory>(
    users: &U,
    course_id: EntityId,
    student_id: EntityId,
    batch: &ScoreBatch,
    now: Timestamp,
) -> Result<ScoreOutcome, CoreError> {
    let mut user = require_user(users, student_id).await?;

    let mut tally = apply_score_entries(&mut user, &batch.entries, now);
    tally.skipped += batch.malformed;

    if tally.changed == 0 {
        tracing::debug!(%course_id, %student_id, skipped = tally.skipped, "No score changes");
        return Ok(ScoreOutcome::NoChanges {
            skipped: tally.skipped,
        });
    }

    users.save_user(&user).await?;
    tracing::info!(
        %course_id,
        %student_id,
        changed = tally.changed,
        skipped = tally.skipped,
        "Scores updated"
    );
    Ok(ScoreOutcome::Updated {
        changed: tally.changed,
        skipped: tally.skipped,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;
    use crate::enrollment::enroll;
    use crate::memory::InMemoryStore;
    use crate::progress::ItemStatus;
    use crate::test_support::{course_with, now, student, subject_with};

    fn entry(subject_id: EntityId, kind: ItemKind, item_id: EntityId, raw: &str) -> ScoreEntry {
        ScoreEntry {
            key: ScoreKey {
                subject_id,
                kind,
                item_id,
            },
            raw: raw.to_string(),
        }
    }

    fn batch(entries: Vec<ScoreEntry>) -> ScoreBatch {
        ScoreBatch {
            entries,
            malformed: 0,
        }
    }

    /// Store with one enrolled student in a course with one subject holding a
    /// single 10-point assignment.
    async fn enrolled() -> (InMemoryStore, EntityId, EntityId, EntityId, EntityId) {
        let store = InMemoryStore::new();
        let course = course_with(vec![subject_with(&[10.0])]);
        let course_id = course.course.id;
        let subject_id = course.subjects[0].id;
        let item_id = course.subjects[0].assignments[0].id;
        store.insert_course(course).await;
        let user = student();
        let user_id = user.id;
        store.insert_user(user).await;
        enroll(&store, &store, course_id, user_id).await.unwrap();
        (store, course_id, user_id, subject_id, item_id)
    }

    // -- parse_grade ----------------------------------------------------------

    #[test]
    fn parse_grade_classifies_input() {
        assert_eq!(parse_grade(""), GradeInput::Empty);
        assert_eq!(parse_grade("   "), GradeInput::Empty);
        assert_eq!(parse_grade(" 9 "), GradeInput::Value(9.0));
        assert_eq!(parse_grade("7.5"), GradeInput::Value(7.5));
        assert_eq!(parse_grade("-2"), GradeInput::Value(-2.0));
        assert_eq!(parse_grade("nine"), GradeInput::Invalid);
        assert_eq!(parse_grade("9abc"), GradeInput::Invalid);
        assert_eq!(parse_grade("NaN"), GradeInput::Invalid);
        assert_eq!(parse_grade("inf"), GradeInput::Invalid);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(
            ScoreOutcome::Updated {
                changed: 1,
                skipped: 0
            }
            .message(),
            "1 score updated"
        );
        assert_eq!(
            ScoreOutcome::Updated {
                changed: 3,
                skipped: 1
            }
            .message(),
            "3 scores updated"
        );
        assert_eq!(
            ScoreOutcome::NoChanges { skipped: 0 }.message(),
            "No changes to update"
        );
    }

    // -- apply_scores ---------------------------------------------------------

    #[tokio::test]
    async fn valid_score_creates_graded_item() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;
        let saves_before = store.saves();

        let outcome = apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "9")]),
            now(),
        )
        .await
        .unwrap();
        assert_eq!(
            outcome,
            ScoreOutcome::Updated {
                changed: 1,
                skipped: 0
            }
        );
        assert_eq!(store.saves(), saves_before + 1);

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let progress = user.progress_for(subject_id).unwrap();
        assert_eq!(progress.assignments.len(), 1);
        let item = &progress.assignments[0];
        assert_eq!(item.item_id, item_id);
        assert_eq!(item.grade, Some(9.0));
        assert_eq!(item.status, ItemStatus::Graded);
        assert_eq!(item.submitted_at, Some(now()));
        assert!(progress.projects.is_empty());
    }

    #[tokio::test]
    async fn repeated_scores_never_duplicate_items() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;

        for raw in ["4", "6", "6", "8"] {
            apply_scores(
                &store,
                course_id,
                user_id,
                &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, raw)]),
                now(),
            )
            .await
            .unwrap();
        }

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let progress = user.progress_for(subject_id).unwrap();
        assert_eq!(progress.assignments.len(), 1);
        assert_eq!(progress.assignments[0].grade, Some(8.0));
    }

    #[tokio::test]
    async fn duplicate_entries_in_one_batch_keep_the_last_value() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;

        let outcome = apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![
                entry(subject_id, ItemKind::Assignment, item_id, "3"),
                entry(subject_id, ItemKind::Assignment, item_id, "5"),
            ]),
            now(),
        )
        .await
        .unwrap();
        assert_matches!(outcome, ScoreOutcome::Updated { changed: 2, .. });

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let progress = user.progress_for(subject_id).unwrap();
        assert_eq!(progress.assignments.len(), 1);
        assert_eq!(progress.assignments[0].grade, Some(5.0));
    }

    #[tokio::test]
    async fn same_grade_twice_is_no_change() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;
        let scores = batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "9")]);

        apply_scores(&store, course_id, user_id, &scores, now())
            .await
            .unwrap();
        let saves = store.saves();
        let outcome = apply_scores(&store, course_id, user_id, &scores, now())
            .await
            .unwrap();

        assert_eq!(outcome, ScoreOutcome::NoChanges { skipped: 0 });
        assert_eq!(store.saves(), saves);
    }

    #[tokio::test]
    async fn clearing_is_reversible() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;
        let apply = |raw: &'static str| {
            batch(vec![entry(subject_id, ItemKind::Assignment, item_id, raw)])
        };

        apply_scores(&store, course_id, user_id, &apply("9"), now())
            .await
            .unwrap();
        let cleared = apply_scores(&store, course_id, user_id, &apply(""), now())
            .await
            .unwrap();
        assert_matches!(cleared, ScoreOutcome::Updated { changed: 1, .. });

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let item = &user.progress_for(subject_id).unwrap().assignments[0];
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.grade, None);

        apply_scores(&store, course_id, user_id, &apply("6.5"), now())
            .await
            .unwrap();
        let user = store.get_user(user_id).await.unwrap().unwrap();
        let progress = user.progress_for(subject_id).unwrap();
        assert_eq!(progress.assignments.len(), 1);
        assert_eq!(progress.assignments[0].status, ItemStatus::Graded);
        assert_eq!(progress.assignments[0].grade, Some(6.5));
    }

    #[tokio::test]
    async fn invalid_value_clears_existing_grade() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;
        apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "9")]),
            now(),
        )
        .await
        .unwrap();

        apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "abc")]),
            now(),
        )
        .await
        .unwrap();

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let item = &user.progress_for(subject_id).unwrap().assignments[0];
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.grade, None);
    }

    #[tokio::test]
    async fn whitespace_for_unknown_item_is_a_noop() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;
        let saves = store.saves();

        let outcome = apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "  ")]),
            now(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, ScoreOutcome::NoChanges { skipped: 0 });
        assert_eq!(store.saves(), saves);
        let user = store.get_user(user_id).await.unwrap().unwrap();
        assert!(user.progress_for(subject_id).unwrap().assignments.is_empty());
    }

    #[tokio::test]
    async fn unknown_subject_is_skipped_but_batch_continues() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;

        let outcome = apply_scores(
            &store,
            course_id,
            user_id,
            &ScoreBatch {
                entries: vec![
                    entry(Uuid::new_v4(), ItemKind::Assignment, item_id, "10"),
                    entry(subject_id, ItemKind::Assignment, item_id, "7"),
                ],
                malformed: 2,
            },
            now(),
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            ScoreOutcome::Updated {
                changed: 1,
                skipped: 3
            }
        );
    }

    #[tokio::test]
    async fn project_scores_land_in_project_list() {
        let (store, course_id, user_id, subject_id, _) = enrolled().await;
        let project_id = Uuid::new_v4();

        apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Project, project_id, "42")]),
            now(),
        )
        .await
        .unwrap();

        let user = store.get_user(user_id).await.unwrap().unwrap();
        let progress = user.progress_for(subject_id).unwrap();
        assert!(progress.assignments.is_empty());
        assert_eq!(progress.projects.len(), 1);
        assert_eq!(progress.projects[0].item_id, project_id);
    }

    #[tokio::test]
    async fn over_cap_grade_is_stored_as_given() {
        let (store, course_id, user_id, subject_id, item_id) = enrolled().await;

        apply_scores(
            &store,
            course_id,
            user_id,
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "500")]),
            now(),
        )
        .await
        .unwrap();

        let user = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(
            user.progress_for(subject_id).unwrap().assignments[0].grade,
            Some(500.0)
        );
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let (store, course_id, _, subject_id, item_id) = enrolled().await;
        let saves = store.saves();

        let result = apply_scores(
            &store,
            course_id,
            Uuid::new_v4(),
            &batch(vec![entry(subject_id, ItemKind::Assignment, item_id, "9")]),
            now(),
        )
        .await;

        assert_matches!(result, Err(CoreError::NotFound { entity: "User", .. }));
        assert_eq!(store.saves(), saves);
    }
}
