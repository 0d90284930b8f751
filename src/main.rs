// RemindKit demo
// Walks through the calendar and reminder features against an in-memory store

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use log::info;
use remindkit::utils::{logging, short_id};
use remindkit::{
    MemoryStore, NewReminder, Priority, RemindKit, RemindKitConfig, ReminderFilter,
    ReminderUpdate,
};
use std::sync::Arc;

fn section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn main() -> Result<()> {
    logging::init_logging().context("Failed to initialize logging")?;

    if let Err(e) = run() {
        logging::log_error_with_context(&*e, "demo");
        return Err(e);
    }
    Ok(())
}

fn run() -> Result<()> {
    let config = RemindKitConfig::load().context("Failed to load configuration")?;
    let store = Arc::new(MemoryStore::seeded());
    let mut remind =
        RemindKit::connect(store, &config).context("Failed to connect to reminders")?;

    remind.on_reminder_created(|r| info!("created: {}", r.title));
    remind.on_reminder_completed(|r| info!("completed: {}", r.title));

    section("Calendars");
    let default_calendar = remind.calendars().get_default()?;
    println!("Default calendar: {}", default_calendar.name);
    for calendar in remind.calendars().list() {
        println!("  - {} (ID: {}...)", calendar.name, short_id(&calendar.id, 8));
    }
    let work = remind.calendars().get("Work")?;
    for calendar in remind.calendars().search("work") {
        println!("Search 'work': {}", calendar.name);
    }

    section("Creating reminders");
    let now = Utc::now();
    let high = remind.create_reminder(
        NewReminder::new("Demo: high priority task")
            .due(now + Duration::hours(2))
            .notes("Created by the demo")
            .url("https://example.com/demo")
            .priority(Priority::High),
        None,
    )?;
    let medium = remind.create_reminder(
        NewReminder::new("Demo: medium priority task")
            .due(now + Duration::days(1))
            .priority(Priority::Medium),
        Some(&work.id),
    )?;
    let low = remind.create_reminder(
        NewReminder::new("Demo: low priority task")
            .due(now + Duration::days(2))
            .priority(Priority::Low),
        None,
    )?;
    remind.create_reminder(NewReminder::new("Demo: no priority").notes("someday"), None)?;
    println!("Created '{}' due {:?}", high.title, high.due_date);

    section("Filtering");
    let retrieved = remind.get_reminder_by_id(&high.id)?;
    println!("By ID: {}", retrieved.title);

    for reminder in remind.get_reminders(ReminderFilter::new().completed(false).due_after(now))? {
        let reminder = reminder?;
        println!("Due after now: {} ({:?})", reminder.title, reminder.due_date);
    }
    let high_open = ReminderFilter::new().completed(false).priority(Priority::High);
    for reminder in remind.get_reminders(high_open)? {
        println!("High priority: {}", reminder?.title);
    }
    for reminder in remind.get_reminders(ReminderFilter::new().in_calendar(work.id.clone()))? {
        println!("In '{}': {}", work.name, reminder?.title);
    }
    for reminder in remind.search_reminders("demo") {
        println!("Search 'demo': {}", reminder?.title);
    }
    match remind.get_next_reminder()? {
        Some(next) => println!("Next upcoming: {}", next.title),
        None => println!("Next upcoming: none"),
    }

    section("Updating");
    let renamed =
        remind.update_reminder(&high.id, ReminderUpdate::new().title("Demo: renamed task"))?;
    println!("Renamed to '{}', notes still {:?}", renamed.title, renamed.notes);
    let bumped =
        remind.update_reminder(&medium.id, ReminderUpdate::new().priority(Priority::High))?;
    println!("'{}' is now {}", bumped.title, bumped.priority.as_str());
    let done = remind.complete_reminder(&low.id)?;
    println!("'{}' completed: {}", done.title, done.is_completed);

    section("Deleting");
    for reminder in remind.search_reminders("demo").collect::<Vec<_>>() {
        let reminder = reminder?;
        remind.delete_reminder(&reminder.id)?;
        println!("Deleted '{}'", reminder.title);
    }

    Ok(())
}
