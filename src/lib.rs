// RemindKit Library
// Reminders store binding: calendars and reminders as plain values,
// filtered fetches bridged from the store's callback API

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use bridge::FetchBridge;
pub use client::{CalendarManager, RemindKit, Reminders};
pub use config::{RemindKitConfig, TimeoutPolicy};
pub use error::{ReminderError, ReminderResult};
pub use models::*;
pub use store::{MemoryStore, ReminderStore, StoreError};
