// file: src/reminder.rs
use super::priority::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a native reminder. Not live: re-fetch to see later changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub priority: Priority,
}

impl Reminder {
    pub fn is_overdue(&self) -> bool {
        match self.due_date {
            Some(due) => !self.is_completed && due < Utc::now(),
            None => false,
        }
    }

    pub fn minutes_until_due(&self) -> Option<i64> {
        self.due_date.map(|due| (due - Utc::now()).num_minutes())
    }

    /// Case-insensitive substring match on the title, then the notes.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.title.to_lowercase().contains(&query) {
            return true;
        }
        self.notes
            .as_deref()
            .map(|notes| notes.to_lowercase().contains(&query))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reminder(title: &str) -> Reminder {
        Reminder {
            id: "r-1".to_string(),
            calendar_id: "cal-1".to_string(),
            title: title.to_string(),
            due_date: None,
            notes: None,
            is_completed: false,
            completion_date: None,
            url: None,
            priority: Priority::None,
        }
    }

    #[test]
    fn test_reminder_is_overdue() {
        let past = Reminder {
            due_date: Some(Utc::now() - Duration::hours(1)),
            ..reminder("Pay rent")
        };
        let done = Reminder {
            is_completed: true,
            ..past.clone()
        };

        assert!(past.is_overdue());
        assert!(!done.is_overdue());
        assert!(!reminder("No due date").is_overdue());
    }

    #[test]
    fn test_reminder_minutes_until_due() {
        let soon = Reminder {
            due_date: Some(Utc::now() + Duration::minutes(30)),
            ..reminder("Call back")
        };

        let minutes = soon.minutes_until_due().unwrap();
        assert!(
            minutes >= 29 && minutes <= 31,
            "Expected ~30 minutes, got {}",
            minutes
        );
        assert!(reminder("Someday").minutes_until_due().is_none());
    }

    #[test]
    fn test_matches_text_title_then_notes() {
        let with_notes = Reminder {
            notes: Some("Bring the DEMO laptop".to_string()),
            ..reminder("Team sync")
        };

        assert!(reminder("Demo prep").matches_text("demo"));
        assert!(with_notes.matches_text("demo"));
        assert!(!reminder("Groceries").matches_text("demo"));
    }
}
