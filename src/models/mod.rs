// Value objects handed to callers

pub mod calendar;
pub mod draft;
pub mod filter;
pub mod priority;
pub mod reminder;

pub use calendar::Calendar;
pub use draft::{NewReminder, ReminderUpdate};
pub use filter::ReminderFilter;
pub use priority::Priority;
pub use reminder::Reminder;
