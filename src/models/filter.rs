use super::priority::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query over reminders. Every set field narrows the result (logical AND).
///
/// `is_completed` is a tri-state: `None` returns both completed and
/// incomplete reminders and ignores the date bounds, `Some(false)` bounds by
/// due date, `Some(true)` bounds by completion date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderFilter {
    pub due_after: Option<DateTime<Utc>>,
    pub due_before: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
    pub priority: Option<Priority>,
    pub calendar_id: Option<String>,
}

impl ReminderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn due_after(mut self, at: DateTime<Utc>) -> Self {
        self.due_after = Some(at);
        self
    }

    pub fn due_before(mut self, at: DateTime<Utc>) -> Self {
        self.due_before = Some(at);
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn in_calendar<S: Into<String>>(mut self, calendar_id: S) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }
}
