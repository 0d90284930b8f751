//! Lazy reminder sequence. Calendars are fetched one at a time, only when
//! the iterator runs out of items from the previous one.

use super::convert::reminder_from_native;
use crate::bridge::FetchBridge;
use crate::error::ReminderResult;
use crate::models::{Reminder, ReminderFilter};
use crate::query::{build_predicate, matches_priority};
use crate::store::{NativeCalendar, NativeReminder, ReminderStore};
use std::slice;
use std::vec;

pub struct Reminders<'a> {
    store: &'a dyn ReminderStore,
    bridge: &'a FetchBridge,
    filter: ReminderFilter,
    text: Option<String>,
    pending: vec::IntoIter<NativeCalendar>,
    current: vec::IntoIter<NativeReminder>,
}

impl<'a> Reminders<'a> {
    pub(crate) fn new(
        store: &'a dyn ReminderStore,
        bridge: &'a FetchBridge,
        filter: ReminderFilter,
        calendars: Vec<NativeCalendar>,
    ) -> Self {
        Self {
            store,
            bridge,
            filter,
            text: None,
            pending: calendars.into_iter(),
            current: Vec::new().into_iter(),
        }
    }

    /// Keeps only reminders whose title or notes contain `query`.
    pub(crate) fn matching_text(mut self, query: &str) -> Self {
        self.text = Some(query.to_string());
        self
    }

    fn accepts(&self, reminder: &Reminder) -> bool {
        self.text
            .as_deref()
            .map_or(true, |query| reminder.matches_text(query))
    }
}

impl Iterator for Reminders<'_> {
    type Item = ReminderResult<Reminder>;

    /// A failed calendar fetch is yielded as an error; iteration then goes
    /// on with the next calendar.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                if !matches_priority(&item, self.filter.priority) {
                    continue;
                }
                let reminder = reminder_from_native(&item);
                if self.accepts(&reminder) {
                    return Some(Ok(reminder));
                }
                continue;
            }

            let calendar = self.pending.next()?;
            let predicate = build_predicate(self.store, &self.filter, slice::from_ref(&calendar));
            match self.bridge.fetch(self.store, &predicate) {
                Ok(items) => self.current = items.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
