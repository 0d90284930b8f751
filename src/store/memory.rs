//! In-process reminders store.
//!
//! Behaves like the native store as seen through [`ReminderStore`]:
//! completions are delivered from a separate thread, fetch results come back
//! in insertion order, and ids are assigned on first save. Switches allow
//! denying access, stalling fetch completions forever and rejecting commits.

use super::{
    AccessCompletion, FetchCompletion, NativeCalendar, NativeReminder, Predicate, ReminderStore,
    StoreError,
};
use log::debug;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Granted,
    Denied,
    /// The access completion is never invoked.
    Unanswered,
}

#[derive(Default)]
struct MemoryState {
    calendars: Vec<NativeCalendar>,
    default_calendar: Option<String>,
    reminders: Vec<NativeReminder>,
    stall_fetches: bool,
    fetch_delay: Option<Duration>,
    commit_failure: Option<String>,
    fetch_count: usize,
    // completions held back while fetches are stalled; never invoked
    parked: Vec<FetchCompletion>,
    parked_access: Vec<AccessCompletion>,
}

pub struct MemoryStore {
    state: Mutex<MemoryState>,
    access: Mutex<AccessMode>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            access: Mutex::new(AccessMode::Granted),
        }
    }

    /// Store with a default "Reminders" list and a "Work" list.
    pub fn seeded() -> Self {
        let store = Self::new();
        let default_id = store.add_calendar("Reminders", Some("#1BADF8"));
        store.add_calendar("Work", Some("#FF9500"));
        store.set_default_calendar(&default_id);
        store
    }

    pub fn add_calendar(&self, title: &str, color: Option<&str>) -> String {
        let identifier = Uuid::new_v4().to_string();
        self.lock().calendars.push(NativeCalendar {
            identifier: identifier.clone(),
            title: title.to_string(),
            color: color.map(str::to_string),
            allows_modifications: true,
        });
        identifier
    }

    pub fn set_default_calendar(&self, id: &str) {
        self.lock().default_calendar = Some(id.to_string());
    }

    pub fn clear_default_calendar(&self) {
        self.lock().default_calendar = None;
    }

    /// Also drops access completions parked while unanswered.
    pub fn set_access(&self, mode: AccessMode) {
        *self.access.lock().unwrap_or_else(|e| e.into_inner()) = mode;
        self.lock().parked_access.clear();
    }

    /// While set, fetch completions are parked and never delivered. Turning
    /// it off drops the parked ones.
    pub fn stall_fetches(&self, stall: bool) {
        let mut state = self.lock();
        state.stall_fetches = stall;
        if !stall {
            state.parked.clear();
        }
    }

    /// Completions held back by a stall or an unanswered access request.
    pub fn parked_count(&self) -> usize {
        let state = self.lock();
        state.parked.len() + state.parked_access.len()
    }

    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        self.lock().fetch_delay = delay;
    }

    /// Makes every subsequent save and remove fail with this message.
    pub fn fail_commits(&self, message: Option<&str>) {
        self.lock().commit_failure = message.map(str::to_string);
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    pub fn reminder_count(&self) -> usize {
        self.lock().reminders.len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReminderStore for MemoryStore {
    fn request_access(&self, completion: AccessCompletion) {
        let mode = *self.access.lock().unwrap_or_else(|e| e.into_inner());
        match mode {
            AccessMode::Unanswered => self.lock().parked_access.push(completion),
            AccessMode::Granted | AccessMode::Denied => {
                let granted = mode == AccessMode::Granted;
                thread::spawn(move || completion(Ok(granted)));
            }
        }
    }

    fn calendars(&self) -> Vec<NativeCalendar> {
        self.lock().calendars.clone()
    }

    fn default_calendar(&self) -> Option<NativeCalendar> {
        let state = self.lock();
        let id = state.default_calendar.as_ref()?;
        state.calendars.iter().find(|c| &c.identifier == id).cloned()
    }

    fn calendar_with_identifier(&self, id: &str) -> Option<NativeCalendar> {
        self.lock().calendars.iter().find(|c| c.identifier == id).cloned()
    }

    fn fetch(&self, predicate: &Predicate, completion: FetchCompletion) {
        let mut state = self.lock();
        state.fetch_count += 1;

        if state.stall_fetches {
            debug!("Parking fetch completion ({:?})", predicate.kind);
            state.parked.push(completion);
            return;
        }

        let matched: Vec<NativeReminder> = state
            .reminders
            .iter()
            .filter(|item| predicate.matches(item))
            .cloned()
            .collect();
        let delay = state.fetch_delay;
        drop(state);

        thread::spawn(move || {
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            completion(Ok(matched));
        });
    }

    fn reminder_with_identifier(&self, id: &str) -> Option<NativeReminder> {
        self.lock()
            .reminders
            .iter()
            .find(|r| r.identifier.as_deref() == Some(id))
            .cloned()
    }

    fn save(&self, reminder: &mut NativeReminder) -> Result<(), StoreError> {
        let mut state = self.lock();
        if let Some(message) = &state.commit_failure {
            return Err(StoreError::commit(message.clone()));
        }

        let calendar = state
            .calendars
            .iter()
            .find(|c| c.identifier == reminder.calendar_id)
            .ok_or_else(|| StoreError::commit("reminder has no valid calendar"))?;
        if !calendar.allows_modifications {
            return Err(StoreError::commit(format!(
                "calendar '{}' is read-only",
                calendar.title
            )));
        }

        match reminder.identifier.clone() {
            None => {
                reminder.identifier = Some(Uuid::new_v4().to_string());
                state.reminders.push(reminder.clone());
            }
            Some(id) => {
                let slot = state
                    .reminders
                    .iter_mut()
                    .find(|r| r.identifier.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| StoreError::commit("reminder no longer exists"))?;
                *slot = reminder.clone();
            }
        }
        Ok(())
    }

    fn remove(&self, reminder: &NativeReminder) -> Result<(), StoreError> {
        let mut state = self.lock();
        if let Some(message) = &state.commit_failure {
            return Err(StoreError::commit(message.clone()));
        }

        let id = reminder
            .identifier
            .as_deref()
            .ok_or_else(|| StoreError::commit("reminder was never saved"))?;
        let before = state.reminders.len();
        state.reminders.retain(|r| r.identifier.as_deref() != Some(id));
        if state.reminders.len() == before {
            return Err(StoreError::commit("reminder no longer exists"));
        }
        Ok(())
    }
}
