//! Native reminders store gateway
//!
//! The host reminders database is reached only through [`ReminderStore`].
//! Types here mirror the native object model: items carry a 0-9 integer
//! priority and their due date as broken-down calendar components.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Error reported by the native store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("access request failed: {0}")]
    Access(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("commit rejected: {0}")]
    Commit(String),
}

impl StoreError {
    pub fn access<S: Into<String>>(msg: S) -> Self {
        Self::Access(msg.into())
    }

    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn commit<S: Into<String>>(msg: S) -> Self {
        Self::Commit(msg.into())
    }
}

pub type AccessCompletion = Box<dyn FnOnce(Result<bool, StoreError>) + Send + 'static>;
pub type FetchCompletion =
    Box<dyn FnOnce(Result<Vec<NativeReminder>, StoreError>) + Send + 'static>;

/// Broken-down local calendar date, as the native store keeps due dates.
/// Time fields are absent for date-only (all-day) reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl DateComponents {
    /// Decomposes an instant into local year/month/day/hour/minute/second.
    /// Sub-second precision is dropped.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        let local = at.with_timezone(&Local);
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: Some(local.hour()),
            minute: Some(local.minute()),
            second: Some(local.second()),
        }
    }

    pub fn date_only(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: None,
            minute: None,
            second: None,
        }
    }

    /// Resolves the components in the local time zone. Returns `None` for
    /// impossible dates and for local times skipped by a DST transition.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let naive = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )?;

        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCalendar {
    pub identifier: String,
    pub title: String,
    pub color: Option<String>,
    pub allows_modifications: bool,
}

/// Native reminder item. `identifier` stays `None` until the first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeReminder {
    pub identifier: Option<String>,
    pub calendar_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub due_date_components: Option<DateComponents>,
    pub priority: u8,
    pub completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

impl NativeReminder {
    pub fn new(calendar_id: &str) -> Self {
        Self {
            identifier: None,
            calendar_id: calendar_id.to_string(),
            title: String::new(),
            notes: None,
            due_date_components: None,
            priority: 0,
            completed: false,
            completion_date: None,
            url: None,
        }
    }

    /// Toggling completion stamps or clears the completion date, the way
    /// the native store does.
    pub fn set_completed(&mut self, completed: bool) {
        if completed && !self.completed {
            self.completion_date = Some(Utc::now());
        } else if !completed {
            self.completion_date = None;
        }
        self.completed = completed;
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date_components.and_then(|c| c.to_utc())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateKind {
    /// Every reminder in the calendars, completed or not. Bounds are ignored.
    All,
    /// Incomplete reminders whose due date falls in the bounds.
    IncompleteByDueDate,
    /// Completed reminders whose completion date falls in the bounds.
    CompletedByCompletionDate,
}

/// Opaque query handed back to [`ReminderStore::fetch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub calendar_ids: Vec<String>,
}

impl Predicate {
    /// Native-side evaluation. Bounds are inclusive; with both bounds open,
    /// undated items match too.
    pub fn matches(&self, item: &NativeReminder) -> bool {
        if !self.calendar_ids.iter().any(|id| id == &item.calendar_id) {
            return false;
        }

        match self.kind {
            PredicateKind::All => true,
            PredicateKind::IncompleteByDueDate => {
                !item.completed && self.in_bounds(item.due_date())
            }
            PredicateKind::CompletedByCompletionDate => {
                item.completed && self.in_bounds(item.completion_date)
            }
        }
    }

    fn in_bounds(&self, at: Option<DateTime<Utc>>) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(at) = at else {
            return false;
        };
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

/// Narrow contract over the host reminders store.
///
/// `request_access` and `fetch` are asynchronous: the store invokes the
/// completion exactly once, possibly on another thread, possibly never.
#[cfg_attr(test, mockall::automock)]
pub trait ReminderStore: Send + Sync {
    fn request_access(&self, completion: AccessCompletion);

    /// Calendars that hold reminders, in the store's order.
    fn calendars(&self) -> Vec<NativeCalendar>;

    fn default_calendar(&self) -> Option<NativeCalendar>;

    fn calendar_with_identifier(&self, id: &str) -> Option<NativeCalendar>;

    fn predicate(
        &self,
        kind: PredicateKind,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        calendars: &[NativeCalendar],
    ) -> Predicate {
        Predicate {
            kind,
            start,
            end,
            calendar_ids: calendars.iter().map(|c| c.identifier.clone()).collect(),
        }
    }

    fn fetch(&self, predicate: &Predicate, completion: FetchCompletion);

    fn new_reminder(&self, calendar: &NativeCalendar) -> NativeReminder {
        NativeReminder::new(&calendar.identifier)
    }

    fn reminder_with_identifier(&self, id: &str) -> Option<NativeReminder>;

    /// Commits the item. Assigns `identifier` when the item is new.
    fn save(&self, reminder: &mut NativeReminder) -> Result<(), StoreError>;

    fn remove(&self, reminder: &NativeReminder) -> Result<(), StoreError>;
}
