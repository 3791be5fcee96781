// controller.rs — Command dispatch for the goal board.
//
// Every user action is a Command. The controller runs it against the API
// and updates BoardState; callers render the state after each dispatch.
// Mutations never patch rows locally: a successful create, update or
// delete is always followed by a full reload from the server.
//
// Busy flags stand in for disabled controls. A command aimed at a busy
// row, or an add/refresh while an add is in flight, is dropped.

use gb_goal::GoalId;

use crate::api::GoalApi;
use crate::state::{BoardState, ToastKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the list and replace every row.
    Load,
    /// Explicit reload from the refresh control.
    Refresh,
    /// Replace the add input's text.
    SetDraft(String),
    /// Create a goal with this title.
    Add { title: String },
    /// Reveal a row's edit row.
    BeginEdit { id: GoalId },
    /// Replace a row's edit input text.
    SetEditInput { id: GoalId, text: String },
    /// Hide the edit row and restore the original title in its input.
    CancelEdit { id: GoalId },
    /// Save a new title for a goal.
    Save { id: GoalId, title: String },
    /// Ask for confirmation before deleting.
    RequestDelete { id: GoalId },
    /// Delete the goal awaiting confirmation.
    ConfirmDelete,
    /// Drop a pending delete confirmation.
    DismissConfirm,
}

pub struct Controller<A> {
    api: A,
    state: BoardState,
}

impl<A: GoalApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: BoardState::new(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one command and return the resulting state.
    pub fn dispatch(&mut self, command: Command) -> &BoardState {
        tracing::trace!(?command, "dispatch");
        match command {
            Command::Load => self.load(),
            Command::Refresh => self.refresh(),
            Command::SetDraft(text) => self.state.draft = text,
            Command::Add { title } => self.add(&title),
            Command::BeginEdit { id } => self.begin_edit(id),
            Command::SetEditInput { id, text } => {
                if let Some(row) = self.state.row_mut(id).filter(|r| !r.busy) {
                    row.input = text;
                }
            }
            Command::CancelEdit { id } => self.cancel_edit(id),
            Command::Save { id, title } => self.save(id, &title),
            Command::RequestDelete { id } => {
                if self.state.row(id).is_some_and(|r| !r.busy) {
                    self.state.confirm_delete = Some(id);
                }
            }
            Command::ConfirmDelete => self.confirm_delete(),
            Command::DismissConfirm => self.state.confirm_delete = None,
        }
        &self.state
    }

    fn load(&mut self) {
        self.state.status = "Loading...".to_string();
        match self.api.list() {
            Ok(goals) => {
                self.state.replace_goals(goals);
                self.state.status.clear();
            }
            Err(e) => {
                tracing::warn!("failed to load goals: {}", e);
                self.state.status = "Failed to load goals.".to_string();
                self.state.show_toast(e.to_string(), ToastKind::Error);
            }
        }
    }

    fn refresh(&mut self) {
        if self.state.adding {
            return;
        }
        self.state.show_toast("Refreshing...", ToastKind::Info);
        self.load();
    }

    fn add(&mut self, title: &str) {
        if self.state.adding {
            return;
        }
        let title = title.trim();
        if title.is_empty() {
            self.state.show_toast("Please enter a title", ToastKind::Error);
            return;
        }

        self.state.adding = true;
        match self.api.create(title) {
            Ok(goal) => {
                tracing::debug!(goal_id = goal.id, "goal added");
                self.state.draft.clear();
                self.state.show_toast("Added!", ToastKind::Success);
                self.load();
            }
            Err(e) => self.state.show_toast(e.to_string(), ToastKind::Error),
        }
        self.state.adding = false;
    }

    fn begin_edit(&mut self, id: GoalId) {
        if let Some(row) = self.state.row_mut(id).filter(|r| !r.busy) {
            row.editing = true;
        }
    }

    fn cancel_edit(&mut self, id: GoalId) {
        if let Some(row) = self.state.row_mut(id).filter(|r| !r.busy) {
            row.input = row.goal.title.clone();
            row.editing = false;
        }
    }

    fn save(&mut self, id: GoalId, title: &str) {
        if self.state.row(id).is_some_and(|r| r.busy) {
            return;
        }
        let title = title.trim();
        if title.is_empty() {
            self.state.show_toast("Title cannot be empty", ToastKind::Error);
            return;
        }

        self.state.set_busy(id, true);
        match self.api.update(id, title) {
            Ok(_) => {
                self.state.show_toast("Updated!", ToastKind::Success);
                self.load();
            }
            Err(e) => self.state.show_toast(e.to_string(), ToastKind::Error),
        }
        self.state.set_busy(id, false);
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.state.confirm_delete.take() else {
            return;
        };
        if self.state.row(id).is_some_and(|r| r.busy) {
            return;
        }

        self.state.set_busy(id, true);
        match self.api.delete(id) {
            Ok(_) => {
                self.state.show_toast("Deleted!", ToastKind::Success);
                self.load();
            }
            Err(e) => self.state.show_toast(e.to_string(), ToastKind::Error),
        }
        self.state.set_busy(id, false);
    }
}
