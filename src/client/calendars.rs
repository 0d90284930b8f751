//! Calendar enumeration and lookup. Nothing is cached: every call asks the
//! store again.

use super::convert::calendar_from_native;
use crate::error::{ReminderError, ReminderResult};
use crate::models::Calendar;
use crate::store::ReminderStore;
use std::sync::Arc;

pub struct CalendarManager {
    store: Arc<dyn ReminderStore>,
}

impl CalendarManager {
    pub fn new(store: Arc<dyn ReminderStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Calendar> {
        let default_id = self.store.default_calendar().map(|c| c.identifier);
        self.store
            .calendars()
            .iter()
            .map(|native| calendar_from_native(native, default_id.as_deref()))
            .collect()
    }

    /// Exact name match; the first calendar wins when names repeat.
    pub fn get(&self, name: &str) -> ReminderResult<Calendar> {
        self.list()
            .into_iter()
            .find(|calendar| calendar.name == name)
            .ok_or_else(|| {
                ReminderError::not_found(format!("Calendar with name '{}' not found.", name))
            })
    }

    pub fn get_by_id(&self, id: &str) -> ReminderResult<Calendar> {
        let native = self
            .store
            .calendar_with_identifier(id)
            .ok_or_else(|| {
                ReminderError::not_found(format!("Calendar with ID '{}' not found.", id))
            })?;
        let default_id = self.store.default_calendar().map(|c| c.identifier);
        Ok(calendar_from_native(&native, default_id.as_deref()))
    }

    /// Case-insensitive substring search on calendar names.
    pub fn search(&self, query: &str) -> Vec<Calendar> {
        self.list()
            .into_iter()
            .filter(|calendar| calendar.name_matches(query))
            .collect()
    }

    pub fn get_default(&self) -> ReminderResult<Calendar> {
        let native = self
            .store
            .default_calendar()
            .ok_or_else(|| ReminderError::not_found("No default calendar found."))?;
        Ok(calendar_from_native(&native, Some(native.identifier.as_str())))
    }
}
