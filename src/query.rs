//! Filter to native predicate translation
//!
//! Time window and completion state go into the store predicate. Priority
//! bands have no native predicate, so they are applied to the fetched items
//! afterwards.

use crate::error::{ReminderError, ReminderResult};
use crate::models::{Priority, ReminderFilter};
use crate::store::{NativeCalendar, NativeReminder, Predicate, PredicateKind, ReminderStore};

/// Picks the predicate shape from the completion tri-state.
pub fn predicate_kind(filter: &ReminderFilter) -> PredicateKind {
    match filter.is_completed {
        None => PredicateKind::All,
        Some(false) => PredicateKind::IncompleteByDueDate,
        Some(true) => PredicateKind::CompletedByCompletionDate,
    }
}

pub fn build_predicate(
    store: &dyn ReminderStore,
    filter: &ReminderFilter,
    calendars: &[NativeCalendar],
) -> Predicate {
    let kind = predicate_kind(filter);
    let (start, end) = match kind {
        PredicateKind::All => (None, None),
        _ => (filter.due_after, filter.due_before),
    };
    store.predicate(kind, start, end, calendars)
}

/// Calendars a filter applies to: the named one, or all of them in store order.
pub fn resolve_scope(
    store: &dyn ReminderStore,
    filter: &ReminderFilter,
) -> ReminderResult<Vec<NativeCalendar>> {
    match filter.calendar_id.as_deref() {
        Some(id) => store
            .calendar_with_identifier(id)
            .map(|calendar| vec![calendar])
            .ok_or_else(|| {
                ReminderError::scope_invalid(format!("Calendar with ID '{}' not found.", id))
            }),
        None => Ok(store.calendars()),
    }
}

/// Second filter stage, over items the predicate already returned.
pub fn matches_priority(item: &NativeReminder, band: Option<Priority>) -> bool {
    band.map_or(true, |band| band.contains(item.priority))
}
