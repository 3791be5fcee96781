// render.rs — Turns BoardState into a BoardView.
//
// The view is what a front-end draws: one entry per goal with its view
// row and, when revealed, its edit row. Controls are marked enabled or
// not from the busy flags. `Display` prints the view as plain text for
// one-shot CLI commands; the terminal board draws the same view.

use std::fmt;
use std::time::Instant;

use gb_goal::GoalId;

use crate::state::{BoardState, ToastKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub status: Option<String>,
    pub toast: Option<(String, ToastKind)>,
    pub rows: Vec<RowView>,
    /// Prompt text when a delete is awaiting confirmation.
    pub confirm: Option<String>,
    pub draft: String,
    /// Add and refresh controls.
    pub controls_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: GoalId,
    pub title: String,
    /// Edit and Delete buttons.
    pub actions_enabled: bool,
    /// The edit row, present only while revealed.
    pub edit: Option<EditView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub input: String,
    /// Save and Cancel buttons.
    pub enabled: bool,
}

/// Build the view for `state` as of `now` (expired toasts are dropped).
pub fn render(state: &BoardState, now: Instant) -> BoardView {
    let rows = state
        .rows
        .iter()
        .map(|row| RowView {
            id: row.id(),
            title: row.goal.title.clone(),
            actions_enabled: !row.busy,
            edit: row.editing.then(|| EditView {
                input: row.input.clone(),
                enabled: !row.busy,
            }),
        })
        .collect();

    BoardView {
        status: (!state.status.is_empty()).then(|| state.status.clone()),
        toast: state
            .visible_toast(now)
            .map(|t| (t.text.clone(), t.kind)),
        rows,
        confirm: state
            .confirm_delete
            .map(|_| "Delete this goal?".to_string()),
        draft: state.draft.clone(),
        controls_enabled: !state.adding,
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((text, kind)) = &self.toast {
            let tag = match kind {
                ToastKind::Info => "info",
                ToastKind::Success => "ok",
                ToastKind::Error => "error",
            };
            writeln!(f, "[{}] {}", tag, text)?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "{}", status)?;
        }

        if self.rows.is_empty() {
            if self.status.is_none() {
                writeln!(f, "No goals yet.")?;
            }
            return Ok(());
        }

        writeln!(f, "{:<16} {}", "ID", "TITLE")?;
        writeln!(f, "{}", "-".repeat(60))?;
        for row in &self.rows {
            writeln!(f, "{:<16} {}", row.id, row.title)?;
            if let Some(edit) = &row.edit {
                writeln!(f, "{:<16} > {}", "", edit.input)?;
            }
        }
        write!(f, "\n{} goal(s) total.", self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_goal::Goal;

    fn state() -> BoardState {
        let mut state = BoardState::new();
        state.replace_goals(vec![Goal::new(1, "Learn Express"), Goal::new(2, "Build a CRUD API")]);
        state
    }

    #[test]
    fn edit_row_only_when_revealed() {
        let mut state = state();
        state.row_mut(2).unwrap().editing = true;
        state.row_mut(2).unwrap().input = "draft".into();

        let view = render(&state, Instant::now());
        assert_eq!(view.rows[0].edit, None);
        assert_eq!(
            view.rows[1].edit,
            Some(EditView {
                input: "draft".into(),
                enabled: true
            })
        );
    }

    #[test]
    fn busy_flags_disable_controls() {
        let mut state = state();
        state.set_busy(1, true);
        state.adding = true;

        let view = render(&state, Instant::now());
        assert!(!view.rows[0].actions_enabled);
        assert!(view.rows[1].actions_enabled);
        assert!(!view.controls_enabled);
    }

    #[test]
    fn expired_toast_is_not_rendered() {
        let mut state = state();
        state.show_toast("Added!", ToastKind::Success);
        let shown = state.toast.as_ref().unwrap().shown_at;

        assert!(render(&state, shown).toast.is_some());
        assert!(render(&state, shown + crate::state::TOAST_DURATION)
            .toast
            .is_none());
    }

    #[test]
    fn text_lists_goals() {
        let text = render(&state(), Instant::now()).to_string();
        assert!(text.contains("Learn Express"));
        assert!(text.contains("Build a CRUD API"));
        assert!(text.ends_with("2 goal(s) total."));
    }

    #[test]
    fn text_for_empty_board() {
        let text = render(&BoardState::new(), Instant::now()).to_string();
        assert_eq!(text, "No goals yet.\n");
    }

    #[test]
    fn confirmation_prompt() {
        let mut state = state();
        state.confirm_delete = Some(1);
        assert_eq!(
            render(&state, Instant::now()).confirm.as_deref(),
            Some("Delete this goal?")
        );
    }
}
