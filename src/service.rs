//! The storage collaborator: the contract the collection store consumes,
//! and a JSON-file-backed implementation of it.

use crate::errors::CoreError;
use crate::models::{Color, DayDropRecord, HabitFile, HabitRecord};
use crate::storage::persist_data;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Create/delete/list operations backed by persistent storage. Deletes of
/// absent rows are no-op successes; duplicate day drops are never created.
pub trait HabitService: Clone + Send + Sync + 'static {
    fn list_habits(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<HabitRecord>, CoreError>> + Send;

    fn create_habit(
        &self,
        user_id: &str,
        name: &str,
        color: Color,
    ) -> impl Future<Output = Result<HabitRecord, CoreError>> + Send;

    fn edit_habit(
        &self,
        id: &str,
        name: &str,
        color: Color,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_habit(
        &self,
        id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn create_day_drop(
        &self,
        habit_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_day_drop(
        &self,
        habit_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Habit storage persisted to a JSON file after every mutation. A failed
/// write surfaces as `CoreError::Remote`, which is what drives the
/// collection store's rollback path.
#[derive(Clone)]
pub struct FileService {
    path: PathBuf,
    data: Arc<Mutex<HabitFile>>,
}

impl FileService {
    pub fn new(path: PathBuf, data: HabitFile) -> Self {
        Self {
            path,
            data: Arc::new(Mutex::new(data)),
        }
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("habit name must not be empty".into()));
    }
    Ok(())
}

// The service contract deliberately checks only the loose ranges; real
// calendar validation (e.g. rejecting Feb 30) happens in the collection
// store before any write is attempted.
fn validate_date(year: i32, month: u32, day: u32) -> Result<(), CoreError> {
    if year < 1 {
        return Err(CoreError::Validation(format!("year {year} must be >= 1")));
    }
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "month {month} must be in 1..=12"
        )));
    }
    if !(1..=31).contains(&day) {
        return Err(CoreError::Validation(format!("day {day} must be in 1..=31")));
    }
    Ok(())
}

impl HabitService for FileService {
    async fn list_habits(&self, user_id: &str) -> Result<Vec<HabitRecord>, CoreError> {
        let data = self.data.lock().await;
        Ok(data
            .habits
            .iter()
            .filter(|habit| habit.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_habit(
        &self,
        user_id: &str,
        name: &str,
        color: Color,
    ) -> Result<HabitRecord, CoreError> {
        validate_name(name)?;
        let record = HabitRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.trim().to_string(),
            color,
            day_drops: Vec::new(),
        };

        let mut data = self.data.lock().await;
        data.habits.push(record.clone());
        persist_data(&self.path, &data).await?;
        Ok(record)
    }

    async fn edit_habit(&self, id: &str, name: &str, color: Color) -> Result<(), CoreError> {
        validate_name(name)?;
        let mut data = self.data.lock().await;
        let Some(habit) = data.habits.iter_mut().find(|habit| habit.id == id) else {
            return Ok(());
        };
        habit.name = name.trim().to_string();
        habit.color = color;
        persist_data(&self.path, &data).await
    }

    async fn delete_habit(&self, id: &str, user_id: &str) -> Result<(), CoreError> {
        let mut data = self.data.lock().await;
        let before = data.habits.len();
        data.habits
            .retain(|habit| !(habit.id == id && habit.user_id == user_id));
        if data.habits.len() == before {
            return Ok(());
        }
        persist_data(&self.path, &data).await
    }

    async fn create_day_drop(
        &self,
        habit_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<(), CoreError> {
        validate_date(year, month, day)?;
        let mut data = self.data.lock().await;
        let Some(habit) = data.habits.iter_mut().find(|habit| habit.id == habit_id) else {
            return Err(CoreError::Validation(format!("unknown habit id {habit_id}")));
        };
        let exists = habit
            .day_drops
            .iter()
            .any(|d| d.year == year && d.month == month && d.day == day);
        if exists {
            return Ok(());
        }
        habit.day_drops.push(DayDropRecord {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.to_string(),
            year,
            month,
            day,
        });
        persist_data(&self.path, &data).await
    }

    async fn delete_day_drop(
        &self,
        habit_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<(), CoreError> {
        validate_date(year, month, day)?;
        let mut data = self.data.lock().await;
        let Some(habit) = data.habits.iter_mut().find(|habit| habit.id == habit_id) else {
            return Ok(());
        };
        let before = habit.day_drops.len();
        habit
            .day_drops
            .retain(|d| !(d.year == year && d.month == month && d.day == day));
        if habit.day_drops.len() == before {
            return Ok(());
        }
        persist_data(&self.path, &data).await
    }
}
