//! Cached habit collection with optimistic day toggles.
//!
//! The cache mirrors the service's collection for one user. A toggle
//! applies locally first so observers re-render immediately, then calls
//! the service, and rolls the cache back to the pre-toggle snapshot if
//! the call fails. A generation counter makes sure an in-flight refresh
//! can never overwrite an optimistic write that began after it.

use crate::calendar;
use crate::errors::CoreError;
use crate::models::{Color, Habit, HabitRecord};
use crate::service::HabitService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Marked,
    Unmarked,
}

#[derive(Debug, Default)]
struct CacheInner {
    /// None until the first successful refresh.
    habits: Option<Vec<Habit>>,
    /// Bumped by every optimistic write. A refresh only commits if the
    /// generation it read at the start is still current.
    generation: u64,
}

#[derive(Clone)]
pub struct HabitCollectionStore<S: HabitService> {
    service: S,
    user_id: String,
    inner: Arc<Mutex<CacheInner>>,
}

impl<S: HabitService> HabitCollectionStore<S> {
    pub fn new(service: S, user_id: impl Into<String>) -> Self {
        Self {
            service,
            user_id: user_id.into(),
            inner: Arc::new(Mutex::new(CacheInner::default())),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current cached collection, if loaded.
    pub async fn snapshot(&self) -> Option<Vec<Habit>> {
        self.inner.lock().await.habits.clone()
    }

    /// Cached collection, loading it from the service first if needed.
    pub async fn habits(&self) -> Result<Vec<Habit>, CoreError> {
        if let Some(habits) = self.snapshot().await {
            return Ok(habits);
        }
        self.refresh().await?;
        Ok(self.snapshot().await.unwrap_or_default())
    }

    /// Reloads the collection from the service. The result is discarded
    /// when an optimistic write began after the reload started, so a
    /// stale listing cannot clobber a not-yet-confirmed local write.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let started_at = self.inner.lock().await.generation;
        let records = self.service.list_habits(&self.user_id).await?;
        let habits = records
            .iter()
            .map(Habit::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.inner.lock().await;
        if inner.generation == started_at {
            inner.habits = Some(habits);
        }
        Ok(())
    }

    fn spawn_refresh(&self) {
        let store = self.clone();
        tokio::spawn(async move {
            if let Err(err) = store.refresh().await {
                warn!("habit collection refresh failed: {err}");
            }
        });
    }

    pub async fn create_habit(&self, name: &str, color: Color) -> Result<HabitRecord, CoreError> {
        let record = self.service.create_habit(&self.user_id, name, color).await?;
        self.refresh().await?;
        Ok(record)
    }

    pub async fn edit_habit(&self, id: &str, name: &str, color: Color) -> Result<(), CoreError> {
        self.service.edit_habit(id, name, color).await?;
        self.refresh().await
    }

    pub async fn delete_habit(&self, id: &str) -> Result<(), CoreError> {
        self.service.delete_habit(id, &self.user_id).await?;
        self.refresh().await
    }

    /// Marks the date if unmarked, unmarks it if marked, optimistically.
    ///
    /// The local write is visible to readers as soon as this function
    /// first suspends. On service failure the cache is restored to the
    /// pre-toggle snapshot verbatim and the error is returned; nothing is
    /// retried here. On success a background refresh reconciles any
    /// drift from concurrent edits elsewhere.
    pub async fn toggle_day(
        &self,
        habit_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<ToggleOutcome, CoreError> {
        // Fail fast on impossible dates, before touching the cache.
        let day_of_year = calendar::month_day_to_day_of_year(month, day, year)?;

        let (snapshot, was_marked) = {
            let mut inner = self.inner.lock().await;
            // Cancel any in-flight refresh so it cannot land on top of
            // the write we are about to apply.
            inner.generation += 1;

            let Some(habits) = inner.habits.as_ref() else {
                self.spawn_refresh();
                return Err(CoreError::Invariant(
                    "habit collection is not loaded".into(),
                ));
            };

            let mut matches = habits
                .iter()
                .enumerate()
                .filter(|(_, habit)| habit.id == habit_id);
            let Some((index, _)) = matches.next() else {
                self.spawn_refresh();
                return Err(CoreError::Invariant(format!(
                    "no habit with id {habit_id} in the cached collection"
                )));
            };
            if matches.next().is_some() {
                self.spawn_refresh();
                return Err(CoreError::Invariant(format!(
                    "more than one habit with id {habit_id} in the cached collection"
                )));
            }

            // Clone is a deep copy here, so the snapshot cannot alias the
            // collection we are about to mutate.
            let snapshot = habits.clone();
            let mut next = snapshot.clone();
            let habit = &mut next[index];
            let was_marked = habit.drops.is_marked(day_of_year, year);
            if was_marked {
                habit.drops.unmark(day_of_year, year)?;
            } else {
                habit.drops.mark(day_of_year, year)?;
            }
            inner.habits = Some(next);
            (snapshot, was_marked)
        };

        let result = if was_marked {
            self.service.delete_day_drop(habit_id, year, month, day).await
        } else {
            self.service.create_day_drop(habit_id, year, month, day).await
        };

        match result {
            Ok(()) => {
                self.spawn_refresh();
                Ok(if was_marked {
                    ToggleOutcome::Unmarked
                } else {
                    ToggleOutcome::Marked
                })
            }
            Err(err) => {
                let mut inner = self.inner.lock().await;
                inner.habits = Some(snapshot);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayDropRecord;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{Barrier, oneshot};
    use tokio::time::{Duration, sleep};

    /// In-memory stand-in for the storage collaborator with injectable
    /// failures, a barrier gating writes, and a one-shot gate that makes
    /// the next listing return a deliberately stale capture.
    #[derive(Clone, Default)]
    struct FakeService {
        records: Arc<StdMutex<Vec<HabitRecord>>>,
        fail_writes: Arc<AtomicBool>,
        write_barrier: Arc<StdMutex<Option<Arc<Barrier>>>>,
        list_gate: Arc<StdMutex<Option<oneshot::Receiver<()>>>>,
    }

    impl FakeService {
        fn with_habit(id: &str) -> Self {
            let service = Self::default();
            service.records.lock().unwrap().push(HabitRecord {
                id: id.to_string(),
                user_id: "local".to_string(),
                name: "Test habit".to_string(),
                color: Color::Emerald,
                day_drops: Vec::new(),
            });
            service
        }

        fn drop_count(&self, habit_id: &str) -> usize {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|record| record.id == habit_id)
                .map_or(0, |record| record.day_drops.len())
        }
    }

    impl HabitService for FakeService {
        async fn list_habits(&self, user_id: &str) -> Result<Vec<HabitRecord>, CoreError> {
            // Capture before waiting so a gated listing is stale on purpose.
            let records: Vec<HabitRecord> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|record| record.user_id == user_id)
                .cloned()
                .collect();
            let gate = self.list_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(records)
        }

        async fn create_habit(
            &self,
            user_id: &str,
            name: &str,
            color: Color,
        ) -> Result<HabitRecord, CoreError> {
            let record = HabitRecord {
                id: format!("habit-{name}"),
                user_id: user_id.to_string(),
                name: name.to_string(),
                color,
                day_drops: Vec::new(),
            };
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn edit_habit(&self, id: &str, name: &str, color: Color) -> Result<(), CoreError> {
            let mut records = self.records.lock().unwrap();
            if let Some(record) = records.iter_mut().find(|record| record.id == id) {
                record.name = name.to_string();
                record.color = color;
            }
            Ok(())
        }

        async fn delete_habit(&self, id: &str, user_id: &str) -> Result<(), CoreError> {
            self.records
                .lock()
                .unwrap()
                .retain(|record| !(record.id == id && record.user_id == user_id));
            Ok(())
        }

        async fn create_day_drop(
            &self,
            habit_id: &str,
            year: i32,
            month: u32,
            day: u32,
        ) -> Result<(), CoreError> {
            let barrier = self.write_barrier.lock().unwrap().clone();
            if let Some(barrier) = barrier {
                barrier.wait().await;
            }
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(CoreError::Remote("injected write failure".into()));
            }
            let mut records = self.records.lock().unwrap();
            let Some(record) = records.iter_mut().find(|record| record.id == habit_id) else {
                return Err(CoreError::Validation(format!("unknown habit id {habit_id}")));
            };
            let exists = record
                .day_drops
                .iter()
                .any(|d| d.year == year && d.month == month && d.day == day);
            if !exists {
                record.day_drops.push(DayDropRecord {
                    id: format!("drop-{year}-{month}-{day}"),
                    habit_id: habit_id.to_string(),
                    year,
                    month,
                    day,
                });
            }
            Ok(())
        }

        async fn delete_day_drop(
            &self,
            habit_id: &str,
            year: i32,
            month: u32,
            day: u32,
        ) -> Result<(), CoreError> {
            let barrier = self.write_barrier.lock().unwrap().clone();
            if let Some(barrier) = barrier {
                barrier.wait().await;
            }
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(CoreError::Remote("injected write failure".into()));
            }
            let mut records = self.records.lock().unwrap();
            if let Some(record) = records.iter_mut().find(|record| record.id == habit_id) {
                record
                    .day_drops
                    .retain(|d| !(d.year == year && d.month == month && d.day == day));
            }
            Ok(())
        }
    }

    async fn loaded_store(service: &FakeService) -> HabitCollectionStore<FakeService> {
        let store = HabitCollectionStore::new(service.clone(), "local");
        store.refresh().await.unwrap();
        store
    }

    #[tokio::test]
    async fn toggle_applies_optimistically_before_refresh() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;

        let outcome = store.toggle_day("h1", 2024, 3, 15).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Marked);

        // Visible immediately, whether or not the background refresh ran.
        let habits = store.snapshot().await.unwrap();
        assert!(habits[0].drops.is_marked_date(2024, 3, 15).unwrap());
        assert_eq!(service.drop_count("h1"), 1);
    }

    #[tokio::test]
    async fn toggle_unmarks_an_existing_drop() {
        let service = FakeService::with_habit("h1");
        service.records.lock().unwrap()[0].day_drops.push(DayDropRecord {
            id: "d1".to_string(),
            habit_id: "h1".to_string(),
            year: 2024,
            month: 3,
            day: 15,
        });
        let store = loaded_store(&service).await;

        let outcome = store.toggle_day("h1", 2024, 3, 15).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Unmarked);

        let habits = store.snapshot().await.unwrap();
        assert!(!habits[0].drops.is_marked_date(2024, 3, 15).unwrap());
        assert_eq!(service.drop_count("h1"), 0);
    }

    #[tokio::test]
    async fn failed_toggle_rolls_back_to_the_snapshot() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;
        service.fail_writes.store(true, Ordering::SeqCst);

        let before = store.snapshot().await.unwrap();
        let err = store.toggle_day("h1", 2024, 3, 15).await.unwrap_err();
        assert!(matches!(err, CoreError::Remote(_)));

        // The cache equals the pre-toggle snapshot exactly.
        assert_eq!(store.snapshot().await.unwrap(), before);
        assert_eq!(service.drop_count("h1"), 0);
    }

    #[tokio::test]
    async fn invalid_dates_are_rejected_before_any_write() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;
        let before = store.snapshot().await.unwrap();

        assert!(matches!(
            store.toggle_day("h1", 2024, 13, 1).await,
            Err(CoreError::Calendar(_))
        ));
        assert!(matches!(
            store.toggle_day("h1", 2023, 2, 29).await,
            Err(CoreError::Calendar(_))
        ));

        assert_eq!(store.snapshot().await.unwrap(), before);
        assert_eq!(service.drop_count("h1"), 0);
    }

    #[tokio::test]
    async fn unknown_habit_is_an_invariant_violation() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;
        let before = store.snapshot().await.unwrap();

        let err = store.toggle_day("missing", 2024, 3, 15).await.unwrap_err();
        assert!(matches!(err, CoreError::Invariant(_)));
        assert_eq!(store.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn concurrent_toggles_lose_neither_update() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;

        // Hold both service writes at a barrier so the two toggles are
        // in flight at the same time, then release them together.
        let barrier = Arc::new(Barrier::new(3));
        *service.write_barrier.lock().unwrap() = Some(barrier.clone());

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.toggle_day("h1", 2024, 3, 15).await }
        });
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.toggle_day("h1", 2024, 3, 16).await }
        });

        barrier.wait().await;
        *service.write_barrier.lock().unwrap() = None;
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let habits = store.snapshot().await.unwrap();
        assert!(habits[0].drops.is_marked_date(2024, 3, 15).unwrap());
        assert!(habits[0].drops.is_marked_date(2024, 3, 16).unwrap());
        assert_eq!(service.drop_count("h1"), 2);
    }

    #[tokio::test]
    async fn stale_refresh_cannot_clobber_an_optimistic_write() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;

        // Start a refresh whose listing is captured, then held, before
        // the toggle below lands.
        let (release, gate) = oneshot::channel();
        *service.list_gate.lock().unwrap() = Some(gate);
        let stale = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        sleep(Duration::from_millis(20)).await;

        store.toggle_day("h1", 2024, 3, 15).await.unwrap();

        release.send(()).unwrap();
        stale.await.unwrap().unwrap();

        let habits = store.snapshot().await.unwrap();
        assert!(habits[0].drops.is_marked_date(2024, 3, 15).unwrap());
    }

    #[tokio::test]
    async fn habit_crud_refreshes_the_cache() {
        let service = FakeService::with_habit("h1");
        let store = loaded_store(&service).await;

        let record = store.create_habit("Run", Color::Sky).await.unwrap();
        let habits = store.snapshot().await.unwrap();
        assert_eq!(habits.len(), 2);

        store.edit_habit(&record.id, "Run far", Color::Lime).await.unwrap();
        let habits = store.snapshot().await.unwrap();
        let edited = habits.iter().find(|h| h.id == record.id).unwrap();
        assert_eq!(edited.name, "Run far");
        assert_eq!(edited.color, Color::Lime);

        store.delete_habit(&record.id).await.unwrap();
        let habits = store.snapshot().await.unwrap();
        assert_eq!(habits.len(), 1);
    }
}
