//! In-process implementation of the store traits.
//!
//! Backs the unit tests in this crate and lets the operations run without a
//! database. Writes replace whole records, matching the single-persist
//! contract of [`UserDirectory::save_user`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::catalog::{Course, CourseWithSubjects, Subject};
use crate::error::CoreError;
use crate::store::{CatalogStore, UserDirectory};
use crate::types::EntityId;
use crate::user::User;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    courses: RwLock<HashMap<EntityId, Course>>,
    subjects: RwLock<HashMap<EntityId, Subject>>,
    users: RwLock<HashMap<EntityId, User>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a course and all of its subjects.
    pub async fn insert_course(&self, course: CourseWithSubjects) {
        let mut subjects = self.subjects.write().await;
        for subject in course.subjects {
            subjects.insert(subject.id, subject);
        }
        self.courses
            .write()
            .await
            .insert(course.course.id, course.course);
    }

    /// Insert or replace a user without counting it as a save.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Remove a subject from the catalog, leaving any progress that
    /// references it in place.
    pub async fn remove_subject(&self, subject_id: EntityId) {
        self.subjects.write().await.remove(&subject_id);
        for course in self.courses.write().await.values_mut() {
            course.subject_ids.retain(|id| *id != subject_id);
        }
    }

    /// Number of `save_user` calls so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CatalogStore for InMemoryStore {
    async fn get_course_with_subjects(
        &self,
        course_id: EntityId,
    ) -> Result<Option<CourseWithSubjects>, CoreError> {
        let Some(course) = self.courses.read().await.get(&course_id).cloned() else {
            return Ok(None);
        };
        let subjects = self.subjects.read().await;
        let loaded = course
            .subject_ids
            .iter()
            .filter_map(|id| subjects.get(id).cloned())
            .collect();
        Ok(Some(CourseWithSubjects {
            course,
            subjects: loaded,
        }))
    }

    async fn get_subject_definitions(
        &self,
        subject_ids: &[EntityId],
    ) -> Result<Vec<Subject>, CoreError> {
        let subjects = self.subjects.read().await;
        Ok(subject_ids
            .iter()
            .filter_map(|id| subjects.get(id).cloned())
            .collect())
    }

    async fn get_courses(&self, course_ids: &[EntityId]) -> Result<Vec<Course>, CoreError> {
        let courses = self.courses.read().await;
        Ok(course_ids
            .iter()
            .filter_map(|id| courses.get(id).cloned())
            .collect())
    }
}

impl UserDirectory for InMemoryStore {
    async fn get_user(&self, user_id: EntityId) -> Result<Option<User>, CoreError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), CoreError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(CoreError::Store(format!("user {} does not exist", user.id)));
        }
        users.insert(user.id, user.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
