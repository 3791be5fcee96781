// events.rs — Goal events and notification dispatch.
//
// The store emits an event after every mutation. Notification sinks
// subscribe to these events: the tracing sink writes a structured log
// line, the log sink appends JSONL to a file.
//
// Dispatch is synchronous and happens after the store lock is released.
// A failing sink is logged and never fails the request that caused it.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalId};

/// Events emitted by the store after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GoalEvent {
    /// A goal was appended to the collection.
    GoalCreated {
        goal_id: GoalId,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was patched in place.
    GoalUpdated {
        goal_id: GoalId,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A delete was requested. `removed` is false when nothing matched.
    GoalDeleted {
        goal_id: GoalId,
        removed: bool,
        timestamp: DateTime<Utc>,
    },
}

impl GoalEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            GoalEvent::GoalCreated { .. } => "goal_created",
            GoalEvent::GoalUpdated { .. } => "goal_updated",
            GoalEvent::GoalDeleted { .. } => "goal_deleted",
        }
    }

    /// The id of the goal the event is about.
    pub fn goal_id(&self) -> GoalId {
        match self {
            GoalEvent::GoalCreated { goal_id, .. }
            | GoalEvent::GoalUpdated { goal_id, .. }
            | GoalEvent::GoalDeleted { goal_id, .. } => *goal_id,
        }
    }

    pub fn goal_created(goal: &Goal) -> Self {
        GoalEvent::GoalCreated {
            goal_id: goal.id,
            title: goal.title.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_updated(goal: &Goal) -> Self {
        GoalEvent::GoalUpdated {
            goal_id: goal.id,
            title: goal.title.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_deleted(goal_id: GoalId, removed: bool) -> Self {
        GoalEvent::GoalDeleted {
            goal_id,
            removed,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving goal events.
///
/// Sinks are shared between request handlers, so they must be `Sync`.
pub trait NotificationSink: Send + Sync {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &GoalEvent) -> Result<(), GoalError>;

    /// Short label used in log records about this sink.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn send(&self, event: &GoalEvent) -> Result<(), GoalError> {
        tracing::info!(
            event_type = event.event_type(),
            goal_id = event.goal_id(),
            "goal event"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "tracing"
    }
}

/// Appends events as JSONL to a file.
///
/// The file is opened once, when the sink is built, so a bad `events_log`
/// path fails at startup instead of on the first request.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogSink {
    /// Create missing parent directories and open `path` for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GoalError> {
        let path = path.into();
        let io_error = |source: std::io::Error| GoalError::IoError {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &GoalEvent) -> Result<(), GoalError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        // One write_all per event keeps lines whole across threads.
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(&line).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Fans each event out to every registered sink, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// A dispatcher with no sinks; events go nowhere.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every sink. Returns how many sinks rejected it;
    /// each rejection is logged and the remaining sinks still run.
    pub fn dispatch(&self, event: &GoalEvent) -> usize {
        self.sinks
            .iter()
            .filter(|sink| match sink.send(event) {
                Ok(()) => false,
                Err(error) => {
                    tracing::warn!(
                        sink = sink.name(),
                        event_type = event.event_type(),
                        goal_id = event.goal_id(),
                        %error,
                        "goal event dropped"
                    );
                    true
                }
            })
            .count()
    }
}

impl FromIterator<Box<dyn NotificationSink>> for EventDispatcher {
    fn from_iter<I: IntoIterator<Item = Box<dyn NotificationSink>>>(iter: I) -> Self {
        Self {
            sinks: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.sinks.iter().map(|sink| sink.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Refuses every event.
    struct Broken;

    impl NotificationSink for Broken {
        fn send(&self, event: &GoalEvent) -> Result<(), GoalError> {
            Err(GoalError::NotFound(event.goal_id()))
        }
    }

    #[test]
    fn event_type_is_tagged_in_json() {
        let event = GoalEvent::goal_created(&Goal::new(3, "Test Goal"));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"goal_created\""));

        let restored: GoalEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.goal_id(), 3);
    }

    #[test]
    fn log_sink_creates_parents_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let sink = LogSink::open(&path).unwrap();

        sink.send(&GoalEvent::goal_created(&Goal::new(1, "Goal 1")))
            .unwrap();
        sink.send(&GoalEvent::goal_deleted(1, true)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("goal_deleted"));
    }

    #[test]
    fn log_sink_keeps_existing_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        fs::write(&path, "{}\n").unwrap();

        LogSink::open(&path)
            .unwrap()
            .send(&GoalEvent::goal_deleted(4, false))
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn log_sink_on_a_directory_fails_to_open() {
        let dir = tempdir().unwrap();
        let err = LogSink::open(dir.path()).unwrap_err();
        assert!(matches!(err, GoalError::IoError { .. }));
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let first = LogSink::open(dir.path().join("sink1.jsonl")).unwrap();
        let second = LogSink::open(dir.path().join("sink2.jsonl")).unwrap();
        let paths = [first.path().to_path_buf(), second.path().to_path_buf()];

        let dispatcher = EventDispatcher::new()
            .with_sink(first)
            .with_sink(TracingSink)
            .with_sink(second);
        assert_eq!(dispatcher.len(), 3);
        assert_eq!(format!("{dispatcher:?}"), r#"["log", "tracing", "log"]"#);

        let failed = dispatcher.dispatch(&GoalEvent::goal_updated(&Goal::new(2, "x")));
        assert_eq!(failed, 0);

        for path in &paths {
            assert!(fs::read_to_string(path).unwrap().contains("goal_updated"));
        }
    }

    #[test]
    fn failing_sink_does_not_stop_others() {
        let dir = tempdir().unwrap();
        let good = LogSink::open(dir.path().join("good.jsonl")).unwrap();
        let good_path = good.path().to_path_buf();

        let dispatcher: EventDispatcher = [
            Box::new(Broken) as Box<dyn NotificationSink>,
            Box::new(good),
        ]
        .into_iter()
        .collect();

        assert_eq!(dispatcher.dispatch(&GoalEvent::goal_deleted(9, false)), 1);
        assert!(fs::read_to_string(&good_path)
            .unwrap()
            .contains("\"removed\":false"));
    }

    #[test]
    fn empty_dispatcher_drops_events() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch(&GoalEvent::goal_deleted(1, true)), 0);
    }
}
