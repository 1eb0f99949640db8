//! Integration tests for the catalog repositories and the `CatalogStore`
//! implementation.

use campus_core::catalog::ItemKind;
use campus_core::store::CatalogStore;
use campus_db::models::course::CreateCourse;
use campus_db::models::subject::CreateSubject;
use campus_db::models::subject_item::CreateSubjectItem;
use campus_db::repositories::{CourseRepo, SubjectItemRepo, SubjectRepo};
use campus_db::store::PgStore;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_course(title: &str) -> CreateCourse {
    CreateCourse {
        title: title.to_string(),
        description: None,
    }
}

fn new_subject(code: &str) -> CreateSubject {
    CreateSubject {
        title: format!("{code}: Introduction"),
        code: code.to_string(),
        units: 3,
    }
}

fn new_item(title: &str, total_points: f64) -> CreateSubjectItem {
    CreateSubjectItem {
        title: title.to_string(),
        description: None,
        due_date: None,
        total_points,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn subjects_and_items_keep_insertion_order(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Statistics Diploma"))
        .await
        .unwrap();
    let stat = SubjectRepo::create(&pool, course.id, &new_subject("STAT 101"))
        .await
        .unwrap();
    let prob = SubjectRepo::create(&pool, course.id, &new_subject("STAT 102"))
        .await
        .unwrap();
    assert_eq!(stat.position, 0);
    assert_eq!(prob.position, 1);

    let a1 = SubjectItemRepo::create(&pool, stat.id, ItemKind::Assignment, &new_item("A1", 10.0))
        .await
        .unwrap();
    let a2 = SubjectItemRepo::create(&pool, stat.id, ItemKind::Assignment, &new_item("A2", 20.0))
        .await
        .unwrap();
    let p1 = SubjectItemRepo::create(&pool, stat.id, ItemKind::Project, &new_item("P1", 50.0))
        .await
        .unwrap();
    assert_eq!(p1.position, 0);

    let store = PgStore::new(pool);
    let loaded = store
        .get_course_with_subjects(course.id)
        .await
        .unwrap()
        .expect("course exists");

    assert_eq!(loaded.course.subject_ids, vec![stat.id, prob.id]);
    let first = &loaded.subjects[0];
    let assignment_ids: Vec<_> = first.assignments.iter().map(|a| a.id).collect();
    assert_eq!(assignment_ids, vec![a1.id, a2.id]);
    assert_eq!(first.projects.len(), 1);
    assert_eq!(first.projects[0].id, p1.id);
    assert_eq!(first.projects[0].total_points, 50.0);
    assert!(loaded.subjects[1].assignments.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_points_violate_check_constraint(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("C")).await.unwrap();
    let subject = SubjectRepo::create(&pool, course.id, &new_subject("X 1"))
        .await
        .unwrap();

    let result =
        SubjectItemRepo::create(&pool, subject.id, ItemKind::Assignment, &new_item("Bad", -1.0))
            .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_course_is_none(pool: PgPool) {
    let store = PgStore::new(pool);
    let loaded = store.get_course_with_subjects(Uuid::new_v4()).await.unwrap();
    assert!(loaded.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_definitions_follow_requested_order_and_skip_unknown(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("C")).await.unwrap();
    let s1 = SubjectRepo::create(&pool, course.id, &new_subject("S 1"))
        .await
        .unwrap();
    let s2 = SubjectRepo::create(&pool, course.id, &new_subject("S 2"))
        .await
        .unwrap();

    let store = PgStore::new(pool);
    let subjects = store
        .get_subject_definitions(&[s2.id, Uuid::new_v4(), s1.id])
        .await
        .unwrap();
    let ids: Vec<_> = subjects.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![s2.id, s1.id]);
    assert!(subjects.iter().all(|s| s.course_id == course.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_headers_carry_subject_order(pool: PgPool) {
    let c1 = CourseRepo::create(&pool, &new_course("First")).await.unwrap();
    let c2 = CourseRepo::create(&pool, &new_course("Second")).await.unwrap();
    let s1 = SubjectRepo::create(&pool, c1.id, &new_subject("A 1"))
        .await
        .unwrap();
    let s2 = SubjectRepo::create(&pool, c1.id, &new_subject("A 2"))
        .await
        .unwrap();

    let store = PgStore::new(pool);
    let courses = store.get_courses(&[c2.id, c1.id]).await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].id, c2.id);
    assert!(courses[0].subject_ids.is_empty());
    assert_eq!(courses[1].subject_ids, vec![s1.id, s2.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_appends_take_distinct_positions(pool: PgPool) {
    let course_id = CourseRepo::create(&pool, &new_course("C")).await.unwrap().id;

    let subjects = (0..5).map(|i| {
        let pool = pool.clone();
        tokio::spawn(async move {
            SubjectRepo::create(&pool, course_id, &new_subject(&format!("S {i}"))).await
        })
    });
    let mut positions = Vec::new();
    for handle in subjects.collect::<Vec<_>>() {
        positions.push(handle.await.unwrap().unwrap().position);
    }
    positions.sort();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);

    let subject_id = SubjectRepo::create(&pool, course_id, &new_subject("T 1"))
        .await
        .unwrap()
        .id;
    let items = (0..5).map(|i| {
        let pool = pool.clone();
        tokio::spawn(async move {
            SubjectItemRepo::create(
                &pool,
                subject_id,
                ItemKind::Assignment,
                &new_item(&format!("A{i}"), 10.0),
            )
            .await
        })
    });
    let mut positions = Vec::new();
    for handle in items.collect::<Vec<_>>() {
        positions.push(handle.await.unwrap().unwrap().position);
    }
    positions.sort();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
}
