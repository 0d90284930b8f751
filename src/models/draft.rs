// Attribute sets for creating and updating reminders
use super::priority::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attributes for a new reminder. Unset fields keep the store's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReminder {
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
    pub url: Option<String>,
}

impl NewReminder {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn due(mut self, at: DateTime<Utc>) -> Self {
        self.due_date = Some(at);
        self
    }

    pub fn notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Partial update. `None` leaves a field untouched; for the clearable fields
/// `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub notes: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
    pub url: Option<Option<String>>,
}

impl ReminderUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn due(mut self, at: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(at));
        self
    }

    pub fn clear_due(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(Some(url.into()));
        self
    }

    pub fn clear_url(mut self) -> Self {
        self.url = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reminder_builder() {
        let draft = NewReminder::new("Buy milk")
            .notes("2 litres")
            .priority(Priority::Low)
            .url("https://example.com/list");

        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.notes.as_deref(), Some("2 litres"));
        assert_eq!(draft.priority, Some(Priority::Low));
        assert!(draft.due_date.is_none());
        assert!(draft.is_completed.is_none());
    }

    #[test]
    fn test_update_distinguishes_clear_from_untouched() {
        let untouched = ReminderUpdate::new().title("Renamed");
        let cleared = ReminderUpdate::new().clear_notes();

        assert_eq!(untouched.notes, None);
        assert_eq!(cleared.notes, Some(None));
        assert!(!untouched.is_empty());
        assert!(ReminderUpdate::new().is_empty());
    }
}
