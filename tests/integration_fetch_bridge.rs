use remindkit::store::memory::AccessMode;
use remindkit::{
    FetchBridge, MemoryStore, NewReminder, RemindKit, ReminderError, ReminderFilter, TimeoutPolicy,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_millis(300);

fn connect(store: &Arc<MemoryStore>, policy: TimeoutPolicy) -> RemindKit {
    let bridge = FetchBridge::with_timeouts(TIMEOUT, TIMEOUT, policy).unwrap();
    RemindKit::with_bridge(store.clone(), bridge).unwrap()
}

#[test]
fn test_stalled_fetch_returns_empty_in_lenient_mode() {
    let store = Arc::new(MemoryStore::seeded());
    let kit = connect(&store, TimeoutPolicy::Lenient);
    let default = kit.calendars().get_default().unwrap();
    kit.create_reminder(NewReminder::new("Invisible"), None).unwrap();
    store.stall_fetches(true);

    let started = Instant::now();
    let results: Vec<_> = kit
        .get_reminders(ReminderFilter::new().in_calendar(default.id))
        .unwrap()
        .collect();

    assert!(results.is_empty());
    assert!(started.elapsed() >= TIMEOUT);
    assert!(started.elapsed() < TIMEOUT + Duration::from_secs(1));
}

#[test]
fn test_stalled_fetch_reports_timeout_in_strict_mode() {
    let store = Arc::new(MemoryStore::seeded());
    let kit = connect(&store, TimeoutPolicy::Strict);
    store.stall_fetches(true);

    let started = Instant::now();
    let first = kit.search_reminders("anything").next().unwrap();

    assert!(matches!(first, Err(ReminderError::Timeout(d)) if d == TIMEOUT));
    assert!(started.elapsed() < TIMEOUT + Duration::from_secs(1));
}

#[test]
fn test_strict_mode_moves_on_to_next_calendar_after_timeout() {
    let store = Arc::new(MemoryStore::seeded());
    let kit = connect(&store, TimeoutPolicy::Strict);
    store.stall_fetches(true);

    let results: Vec<_> = kit.get_reminders(ReminderFilter::new()).unwrap().collect();

    // one timeout per calendar, nothing else
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| matches!(r, Err(ReminderError::Timeout(_)))));
}

#[test]
fn test_slow_store_within_timeout_still_delivers() {
    let store = Arc::new(MemoryStore::seeded());
    let kit = connect(&store, TimeoutPolicy::Strict);
    kit.create_reminder(NewReminder::new("Eventually"), None).unwrap();
    store.set_fetch_delay(Some(Duration::from_millis(50)));

    let default = kit.calendars().get_default().unwrap();
    let titles: Vec<String> = kit
        .get_reminders(ReminderFilter::new().in_calendar(default.id))
        .unwrap()
        .map(|r| r.unwrap().title)
        .collect();

    assert_eq!(titles, vec!["Eventually"]);
}

#[test]
fn test_unanswered_access_request_is_denied_after_timeout() {
    let store = Arc::new(MemoryStore::seeded());
    store.set_access(AccessMode::Unanswered);
    let bridge = FetchBridge::with_timeouts(TIMEOUT, TIMEOUT, TimeoutPolicy::Lenient).unwrap();

    let started = Instant::now();
    let result = RemindKit::with_bridge(store, bridge);

    assert!(matches!(result, Err(ReminderError::PermissionDenied(_))));
    assert!(started.elapsed() < TIMEOUT + Duration::from_secs(1));
}
