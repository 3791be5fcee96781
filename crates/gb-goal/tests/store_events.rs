// store_events.rs — GoalStore behaviour observed from outside the crate:
// the event trail written by mutations, and id uniqueness under threads.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use serde_json::Value;
use tempfile::tempdir;

use gb_goal::{default_seed, EventDispatcher, GoalPatch, GoalStore, LogSink, NewGoal};

#[test]
fn every_mutation_lands_in_the_event_log() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("events.jsonl");
    let store = GoalStore::with_goals(default_seed())
        .with_events(EventDispatcher::new().with_sink(LogSink::open(&log).unwrap()));

    let goal = store.create(NewGoal::new("Write tests")).unwrap();
    store.update(goal.id, GoalPatch::title("Write more tests")).unwrap();
    assert!(store.update(404, GoalPatch::title("nope")).is_err());
    store.delete(goal.id);
    store.delete(404);

    let events: Vec<Value> = fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // A failed update emits nothing.
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        ["goal_created", "goal_updated", "goal_deleted", "goal_deleted"]
    );
    assert_eq!(events[1]["title"], "Write more tests");
    assert_eq!(events[2]["removed"], true);
    assert_eq!(events[3]["removed"], false);
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let store = Arc::new(GoalStore::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..50)
                    .map(|i| store.create(NewGoal::new(format!("{worker}-{i}"))).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(ids.len(), 400);
    assert_eq!(store.len(), 400);
}
