//! Mapping between native store items and value objects.

use crate::error::{ReminderError, ReminderResult};
use crate::models::{Calendar, NewReminder, Priority, Reminder, ReminderUpdate};
use crate::store::{DateComponents, NativeCalendar, NativeReminder};
use url::Url;

pub fn calendar_from_native(native: &NativeCalendar, default_id: Option<&str>) -> Calendar {
    Calendar {
        id: native.identifier.clone(),
        name: native.title.clone(),
        color: native.color.clone(),
        is_default: default_id == Some(native.identifier.as_str()),
    }
}

pub fn reminder_from_native(native: &NativeReminder) -> Reminder {
    Reminder {
        id: native.identifier.clone().unwrap_or_default(),
        calendar_id: native.calendar_id.clone(),
        title: native.title.clone(),
        due_date: native.due_date(),
        notes: native.notes.clone(),
        is_completed: native.completed,
        completion_date: native.completion_date,
        url: native.url.clone(),
        priority: Priority::from_native(native.priority),
    }
}

/// Copies every attribute of a draft onto a fresh native item.
pub fn apply_new(native: &mut NativeReminder, draft: &NewReminder) -> ReminderResult<()> {
    native.title = draft.title.clone();
    if let Some(due) = draft.due_date {
        native.due_date_components = Some(DateComponents::from_utc(due));
    }
    if let Some(notes) = &draft.notes {
        native.notes = Some(notes.clone());
    }
    if let Some(priority) = draft.priority {
        native.priority = priority.to_native();
    }
    if let Some(completed) = draft.is_completed {
        native.set_completed(completed);
    }
    if let Some(url) = &draft.url {
        native.url = Some(normalize_url(url)?);
    }
    Ok(())
}

/// Applies only the fields present in the update.
pub fn apply_update(native: &mut NativeReminder, update: &ReminderUpdate) -> ReminderResult<()> {
    // validate before touching anything so a bad url leaves the item as it was
    let url = match &update.url {
        Some(Some(raw)) => Some(Some(normalize_url(raw)?)),
        Some(None) => Some(None),
        None => None,
    };

    if let Some(title) = &update.title {
        native.title = title.clone();
    }
    if let Some(due) = update.due_date {
        native.due_date_components = due.map(DateComponents::from_utc);
    }
    if let Some(notes) = &update.notes {
        native.notes = notes.clone();
    }
    if let Some(priority) = update.priority {
        native.priority = priority.to_native();
    }
    if let Some(completed) = update.is_completed {
        native.set_completed(completed);
    }
    if let Some(url) = url {
        native.url = url;
    }
    Ok(())
}

fn normalize_url(raw: &str) -> ReminderResult<String> {
    Url::parse(raw.trim())
        .map(String::from)
        .map_err(|e| ReminderError::invalid_input(format!("Invalid URL '{}': {}", raw, e)))
}
