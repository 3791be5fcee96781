// store.rs — GoalStore: the in-memory goal collection.
//
// The store owns an ordered list of goals and the counter that hands out
// ids. It is built once per process and shared (behind an `Arc`) with
// every request handler; nothing about it is global.
//
// The list and the counter live under one RwLock, so every operation sees
// and leaves a consistent collection. There is no further concurrency
// control: two updates to the same goal are last-write-wins.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::GoalError;
use crate::events::{EventDispatcher, GoalEvent};
use crate::goal::{Goal, GoalId, GoalPatch, NewGoal};

#[derive(Debug)]
struct Inner {
    goals: Vec<Goal>,
    // None once the counter has handed out `GoalId::MAX`.
    next_id: Option<GoalId>,
}

/// In-memory store for goal records.
#[derive(Debug)]
pub struct GoalStore {
    inner: RwLock<Inner>,
    events: EventDispatcher,
}

impl GoalStore {
    /// Create an empty store. The first goal gets id 1.
    pub fn new() -> Self {
        Self::with_goals(Vec::new())
    }

    /// Create a store pre-filled with `goals`.
    ///
    /// The id counter starts one past the largest seeded id, so generated
    /// ids never collide with seeded ones. A seed holding `GoalId::MAX`
    /// leaves no id to hand out, so every later `create` fails.
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        let next_id = match goals.iter().map(|g| g.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            inner: RwLock::new(Inner { goals, next_id }),
            events: EventDispatcher::new(),
        }
    }

    /// Attach the dispatcher that receives an event after every mutation.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// All goals, in insertion order.
    pub fn list(&self) -> Vec<Goal> {
        self.read().goals.clone()
    }

    /// A single goal by id.
    pub fn get(&self, id: GoalId) -> Option<Goal> {
        self.read().goals.iter().find(|g| g.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a new goal and return it with its assigned id.
    ///
    /// Fails with [`GoalError::IdsExhausted`] once the counter is spent;
    /// ids are never wrapped or reused.
    pub fn create(&self, new: NewGoal) -> Result<Goal, GoalError> {
        let goal = {
            let mut inner = self.write();
            let id = inner.next_id.ok_or(GoalError::IdsExhausted)?;
            inner.next_id = id.checked_add(1);
            let goal = Goal::from_new(id, new);
            inner.goals.push(goal.clone());
            goal
        };

        tracing::debug!(goal_id = goal.id, "created goal");
        self.events.dispatch(&GoalEvent::goal_created(&goal));
        Ok(goal)
    }

    /// Shallow-merge `patch` into the goal with `id` and return the result.
    pub fn update(&self, id: GoalId, patch: GoalPatch) -> Result<Goal, GoalError> {
        let goal = {
            let mut inner = self.write();
            let goal = inner
                .goals
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or(GoalError::NotFound(id))?;
            goal.apply(patch);
            goal.clone()
        };

        tracing::debug!(goal_id = id, "updated goal");
        self.events.dispatch(&GoalEvent::goal_updated(&goal));
        Ok(goal)
    }

    /// Remove the goal with `id`.
    ///
    /// Deleting an id that isn't present is not an error; the return value
    /// only says whether anything was removed.
    pub fn delete(&self, id: GoalId) -> bool {
        let removed = {
            let mut inner = self.write();
            let before = inner.goals.len();
            inner.goals.retain(|g| g.id != id);
            inner.goals.len() != before
        };

        tracing::debug!(goal_id = id, removed, "deleted goal");
        self.events.dispatch(&GoalEvent::goal_deleted(id, removed));
        removed
    }

    // Poisoning is ignored: each mutation is a single push, apply or retain.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for GoalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::default_seed;
    use serde_json::json;

    fn seeded() -> GoalStore {
        GoalStore::with_goals(default_seed())
    }

    #[test]
    fn empty_store_starts_ids_at_one() {
        let store = GoalStore::new();
        assert!(store.is_empty());

        let goal = store.create(NewGoal::new("First")).unwrap();
        assert_eq!(goal.id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_assigns_unseen_id_after_seed() {
        let store = seeded();
        let before: Vec<GoalId> = store.list().iter().map(|g| g.id).collect();

        let goal = store.create(NewGoal::new("X")).unwrap();
        assert!(!before.contains(&goal.id));
        assert_eq!(goal.id, 3);

        let listed = store.list();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.iter().filter(|g| g.title == "X").count(), 1);
        assert_eq!(listed.last().unwrap().id, goal.id);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = GoalStore::new();
        let a = store.create(NewGoal::new("a")).unwrap();
        assert!(store.delete(a.id));
        let b = store.create(NewGoal::new("b")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn seed_with_gaps_counts_from_max() {
        let store = GoalStore::with_goals(vec![Goal::new(10, "ten"), Goal::new(4, "four")]);
        assert_eq!(store.create(NewGoal::new("next")).unwrap().id, 11);
        // Seed order is kept.
        assert_eq!(store.list()[0].id, 10);
    }

    #[test]
    fn seed_at_max_id_refuses_to_create() {
        let store = GoalStore::with_goals(vec![Goal::new(GoalId::MAX, "last")]);
        let result = store.create(NewGoal::new("overflow"));
        assert!(matches!(result, Err(GoalError::IdsExhausted)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn counter_hands_out_max_id_once() {
        let store = GoalStore::with_goals(vec![Goal::new(GoalId::MAX - 1, "almost")]);
        assert_eq!(store.create(NewGoal::new("last")).unwrap().id, GoalId::MAX);
        assert!(matches!(
            store.create(NewGoal::new("one more")),
            Err(GoalError::IdsExhausted)
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_missing_returns_not_found() {
        let store = seeded();
        let result = store.update(99, GoalPatch::title("Y"));
        assert!(matches!(result, Err(GoalError::NotFound(99))));
        assert_eq!(store.list(), default_seed());
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let store = GoalStore::new();
        let new: NewGoal =
            serde_json::from_value(json!({"title": "Run", "distance": 5})).unwrap();
        let created = store.create(new).unwrap();

        let patch: GoalPatch = serde_json::from_value(json!({"distance": 10})).unwrap();
        let updated = store.update(created.id, patch).unwrap();

        assert_eq!(updated.title, "Run");
        assert_eq!(updated.extra["distance"], json!(10));
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn create_update_list_round_trip() {
        let store = seeded();
        let goal = store.create(NewGoal::new("original")).unwrap();
        store.update(goal.id, GoalPatch::title("renamed")).unwrap();

        let titles: Vec<String> = store.list().into_iter().map(|g| g.title).collect();
        assert!(titles.contains(&"renamed".to_string()));
        assert!(!titles.contains(&"original".to_string()));
    }

    #[test]
    fn delete_missing_is_noop() {
        let store = seeded();
        assert!(!store.delete(99));
        assert_eq!(store.list(), default_seed());
    }

    #[test]
    fn delete_existing_removes_exactly_one() {
        let store = seeded();
        let before = store.len();
        assert!(store.delete(1));
        assert_eq!(store.len(), before - 1);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());
    }
}
