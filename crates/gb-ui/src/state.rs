// state.rs — BoardState: the single client-side state container.
//
// Rows mirror the last list the server returned. Everything else here is
// view state: the edit buffer and busy flag of each row, the add input,
// the status line, the current toast and a pending delete confirmation.

use std::time::{Duration, Instant};

use gb_goal::{Goal, GoalId};

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(1700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A short-lived notification. A new toast replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(text: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }
}

/// One goal as displayed: a view row plus a hidden edit row.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRow {
    pub goal: Goal,
    /// Whether the edit row is revealed.
    pub editing: bool,
    /// Contents of the edit row's text input.
    pub input: String,
    /// A request for this row is in flight; its controls are disabled.
    pub busy: bool,
}

impl GoalRow {
    pub fn new(goal: Goal) -> Self {
        let input = goal.title.clone();
        Self {
            goal,
            editing: false,
            input,
            busy: false,
        }
    }

    pub fn id(&self) -> GoalId {
        self.goal.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub rows: Vec<GoalRow>,
    /// Status line ("Loading...", "Failed to load goals.", or empty).
    pub status: String,
    pub toast: Option<Toast>,
    /// Text of the "add goal" input.
    pub draft: String,
    /// An add is in flight; add and refresh are disabled.
    pub adding: bool,
    /// Goal awaiting a yes/no delete confirmation.
    pub confirm_delete: Option<GoalId>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row with the given goals.
    pub fn replace_goals(&mut self, goals: Vec<Goal>) {
        self.rows = goals.into_iter().map(GoalRow::new).collect();
        if let Some(id) = self.confirm_delete {
            if self.row(id).is_none() {
                self.confirm_delete = None;
            }
        }
    }

    pub fn row(&self, id: GoalId) -> Option<&GoalRow> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn row_mut(&mut self, id: GoalId) -> Option<&mut GoalRow> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    pub fn set_busy(&mut self, id: GoalId, busy: bool) {
        if let Some(row) = self.row_mut(id) {
            row.busy = busy;
        }
    }

    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(text, kind));
    }

    /// The toast, if it hasn't expired yet.
    pub fn visible_toast(&self, now: Instant) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible(now))
    }

    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.rows.iter().map(|r| &r.goal)
    }
}
