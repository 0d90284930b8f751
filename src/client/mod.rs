//! Reminder operations over a [`ReminderStore`].

use crate::bridge::FetchBridge;
use crate::config::{validate_config, RemindKitConfig};
use crate::error::{ReminderError, ReminderResult};
use crate::models::{NewReminder, Reminder, ReminderFilter, ReminderUpdate};
use crate::query::resolve_scope;
use crate::store::{NativeReminder, ReminderStore};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

pub mod calendars;
pub mod convert;
pub mod iter;

pub use calendars::CalendarManager;
pub use iter::Reminders;

use convert::{apply_new, apply_update, reminder_from_native};

pub type ReminderCallback = Box<dyn Fn(&Reminder) + Send + Sync>;

pub struct RemindKit {
    store: Arc<dyn ReminderStore>,
    bridge: FetchBridge,
    calendars: CalendarManager,
    on_created: Vec<ReminderCallback>,
    on_completed: Vec<ReminderCallback>,
}

impl RemindKit {
    /// Requests access to the store and fails with `PermissionDenied` unless
    /// it is granted.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime. The bridge blocks on
    /// its own runtime, here and in every later store call.
    pub fn connect(
        store: Arc<dyn ReminderStore>,
        config: &RemindKitConfig,
    ) -> ReminderResult<Self> {
        validate_config(config)?;
        let bridge = FetchBridge::new(config)?;
        Self::with_bridge(store, bridge)
    }

    /// Same as [`RemindKit::connect`] with an already configured bridge.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime.
    pub fn with_bridge(
        store: Arc<dyn ReminderStore>,
        bridge: FetchBridge,
    ) -> ReminderResult<Self> {
        bridge.request_access(store.as_ref())?;
        info!(
            "Reminders access granted (fetch timeout {:?}, {:?} on timeout)",
            bridge.fetch_timeout(),
            bridge.policy()
        );

        Ok(Self {
            calendars: CalendarManager::new(store.clone()),
            store,
            bridge,
            on_created: Vec::new(),
            on_completed: Vec::new(),
        })
    }

    pub fn calendars(&self) -> &CalendarManager {
        &self.calendars
    }

    /// Creates a reminder in `calendar_id`, or in the store's default
    /// calendar. Created-callbacks run before this returns.
    pub fn create_reminder(
        &self,
        draft: NewReminder,
        calendar_id: Option<&str>,
    ) -> ReminderResult<Reminder> {
        let calendar = match calendar_id {
            Some(id) => self.store.calendar_with_identifier(id).ok_or_else(|| {
                ReminderError::not_found(format!("Calendar with ID '{}' not found.", id))
            })?,
            None => self
                .store
                .default_calendar()
                .ok_or_else(|| ReminderError::not_found("No default calendar found."))?,
        };

        let mut native = self.store.new_reminder(&calendar);
        apply_new(&mut native, &draft)?;
        self.save(&mut native)?;

        let reminder = reminder_from_native(&native);
        info!("Created reminder '{}' in calendar '{}'", reminder.title, calendar.title);

        for callback in &self.on_created {
            callback(&reminder);
        }
        Ok(reminder)
    }

    /// Applies the fields present in `update` and saves. Completed-callbacks
    /// run when the reminder goes from incomplete to complete.
    pub fn update_reminder(&self, id: &str, update: ReminderUpdate) -> ReminderResult<Reminder> {
        let mut native = self.resolve(id)?;
        let was_completed = native.completed;

        apply_update(&mut native, &update)?;
        self.save(&mut native)?;

        let reminder = reminder_from_native(&native);
        if !was_completed && reminder.is_completed {
            info!("Reminder '{}' completed", reminder.title);
            for callback in &self.on_completed {
                callback(&reminder);
            }
        }
        Ok(reminder)
    }

    pub fn complete_reminder(&self, id: &str) -> ReminderResult<Reminder> {
        self.update_reminder(id, ReminderUpdate::new().completed(true))
    }

    pub fn uncomplete_reminder(&self, id: &str) -> ReminderResult<Reminder> {
        self.update_reminder(id, ReminderUpdate::new().completed(false))
    }

    pub fn delete_reminder(&self, id: &str) -> ReminderResult<bool> {
        let native = self.resolve(id)?;
        self.store.remove(&native).map_err(|e| {
            warn!("Failed to delete reminder {}: {}", id, e);
            ReminderError::DeleteFailed(e)
        })?;
        info!("Deleted reminder {}", id);
        Ok(true)
    }

    pub fn get_reminder_by_id(&self, id: &str) -> ReminderResult<Reminder> {
        self.resolve(id).map(|native| reminder_from_native(&native))
    }

    /// Lazily fetches reminders matching `filter`, calendar by calendar in
    /// store order. The calendar scope is checked before anything is fetched.
    pub fn get_reminders(&self, filter: ReminderFilter) -> ReminderResult<Reminders<'_>> {
        let calendars = resolve_scope(self.store.as_ref(), &filter)?;
        Ok(Reminders::new(self.store.as_ref(), &self.bridge, filter, calendars))
    }

    /// Case-insensitive search in titles and notes, across every calendar
    /// and completion state.
    pub fn search_reminders(&self, query: &str) -> Reminders<'_> {
        Reminders::new(
            self.store.as_ref(),
            &self.bridge,
            ReminderFilter::new(),
            self.store.calendars(),
        )
        .matching_text(query)
    }

    /// Incomplete reminder with the earliest due date after now. On equal
    /// due dates the first one fetched wins.
    pub fn get_next_reminder(&self) -> ReminderResult<Option<Reminder>> {
        let filter = ReminderFilter::new().completed(false).due_after(Utc::now());
        let mut next: Option<Reminder> = None;

        for reminder in self.get_reminders(filter)? {
            let reminder = reminder?;
            let Some(due) = reminder.due_date else {
                continue;
            };
            let earlier = next
                .as_ref()
                .and_then(|current| current.due_date)
                .map_or(true, |best| due < best);
            if earlier {
                next = Some(reminder);
            }
        }
        Ok(next)
    }

    pub fn on_reminder_created<F>(&mut self, callback: F)
    where
        F: Fn(&Reminder) + Send + Sync + 'static,
    {
        self.on_created.push(Box::new(callback));
    }

    pub fn on_reminder_completed<F>(&mut self, callback: F)
    where
        F: Fn(&Reminder) + Send + Sync + 'static,
    {
        self.on_completed.push(Box::new(callback));
    }

    fn resolve(&self, id: &str) -> ReminderResult<NativeReminder> {
        self.store
            .reminder_with_identifier(id)
            .ok_or_else(|| {
                ReminderError::not_found(format!("Reminder with ID '{}' not found.", id))
            })
    }

    fn save(&self, native: &mut NativeReminder) -> ReminderResult<()> {
        self.store.save(native).map_err(|e| {
            warn!("Failed to save reminder '{}': {}", native.title, e);
            ReminderError::SaveFailed(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeoutPolicy;
    use crate::store::{MockReminderStore, NativeCalendar, StoreError};
    use std::time::Duration;

    fn bridge() -> FetchBridge {
        FetchBridge::with_timeouts(
            Duration::from_millis(200),
            Duration::from_millis(200),
            TimeoutPolicy::Strict,
        )
        .unwrap()
    }

    fn calendar() -> NativeCalendar {
        NativeCalendar {
            identifier: "cal-1".to_string(),
            title: "Reminders".to_string(),
            color: None,
            allows_modifications: true,
        }
    }

    fn granted_store() -> MockReminderStore {
        let mut store = MockReminderStore::new();
        store
            .expect_request_access()
            .returning(|completion| completion(Ok(true)));
        store
    }

    fn saved_item(id: &str) -> NativeReminder {
        let mut item = NativeReminder::new("cal-1");
        item.identifier = Some(id.to_string());
        item.title = "Existing".to_string();
        item
    }

    #[test]
    fn test_connect_denied() {
        let mut store = MockReminderStore::new();
        store
            .expect_request_access()
            .returning(|completion| completion(Ok(false)));

        let result = RemindKit::with_bridge(Arc::new(store), bridge());
        assert!(matches!(result, Err(ReminderError::PermissionDenied(_))));
    }

    #[test]
    #[should_panic(expected = "within a runtime")]
    fn test_connect_inside_async_runtime_panics() {
        let outer = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let bridge = bridge();
        outer.block_on(async move {
            let _ = RemindKit::with_bridge(Arc::new(granted_store()), bridge);
        });
    }

    #[test]
    fn test_connect_rejects_invalid_config() {
        let config = RemindKitConfig {
            fetch_timeout_secs: 0,
            ..RemindKitConfig::default()
        };
        let result = RemindKit::connect(Arc::new(granted_store()), &config);
        assert!(matches!(result, Err(ReminderError::Config(_))));
    }

    #[test]
    fn test_create_without_default_calendar_is_not_found() {
        let mut store = granted_store();
        store.expect_default_calendar().returning(|| None);
        store.expect_save().never();

        let kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        let err = kit.create_reminder(NewReminder::new("Orphan"), None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_save_failure_carries_native_error_and_skips_callbacks() {
        let mut store = granted_store();
        store.expect_default_calendar().returning(|| Some(calendar()));
        store
            .expect_new_reminder()
            .returning(|calendar| NativeReminder::new(&calendar.identifier));
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(StoreError::commit("iCloud account signed out")));

        let mut kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        kit.on_reminder_created(|_| panic!("callback must not run on failure"));

        let err = kit.create_reminder(NewReminder::new("Lost"), None).unwrap_err();
        match err {
            ReminderError::SaveFailed(native) => {
                assert_eq!(native, StoreError::commit("iCloud account signed out"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_update_missing_reminder_is_not_found() {
        let mut store = granted_store();
        store.expect_reminder_with_identifier().returning(|_| None);

        let kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        let err = kit
            .update_reminder("gone", ReminderUpdate::new().title("x"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_failure_is_delete_failed() {
        let mut store = granted_store();
        store
            .expect_reminder_with_identifier()
            .returning(|id| Some(saved_item(id)));
        store
            .expect_remove()
            .returning(|_| Err(StoreError::commit("list is read-only")));

        let kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        let err = kit.delete_reminder("r-1").unwrap_err();
        assert!(matches!(err, ReminderError::DeleteFailed(_)));
    }

    #[test]
    fn test_get_reminders_invalid_scope_fails_before_fetching() {
        let mut store = granted_store();
        store.expect_calendar_with_identifier().returning(|_| None);
        store.expect_fetch().never();

        let kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        let result = kit.get_reminders(ReminderFilter::new().in_calendar("nope"));
        assert!(matches!(result, Err(ReminderError::ScopeInvalid(_))));
    }

    #[test]
    fn test_fetch_error_is_yielded_by_iterator() {
        let mut store = granted_store();
        store.expect_calendars().returning(|| vec![calendar()]);
        store
            .expect_predicate()
            .returning(|kind, start, end, calendars| crate::store::Predicate {
                kind,
                start,
                end,
                calendar_ids: calendars.iter().map(|c| c.identifier.clone()).collect(),
            });
        store
            .expect_fetch()
            .returning(|_, completion| completion(Err(StoreError::fetch("database busy"))));

        let kit = RemindKit::with_bridge(Arc::new(store), bridge()).unwrap();
        let results: Vec<_> = kit.get_reminders(ReminderFilter::new()).unwrap().collect();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(ReminderError::Store(_))));
    }
}
