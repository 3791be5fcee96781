// goal.rs — One-shot goal commands: list, add, edit, delete, greet.
//
// Each command runs through the same controller as the interactive
// board: load, dispatch, then print the rendered board. An error toast
// becomes the command's error.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::bail;

use gb_goal::GoalId;
use gb_ui::{render, BoardState, Command, Controller, GoalApi, HttpGoalApi, ToastKind};

fn connect(server: &str) -> anyhow::Result<Controller<HttpGoalApi>> {
    let api = HttpGoalApi::new(server)?;
    tracing::debug!("using server {}", api.server_url());
    let mut controller = Controller::new(api);
    controller.dispatch(Command::Load);
    check(controller.state())?;
    Ok(controller)
}

/// Print the board, failing if the last action left an error toast.
fn finish(state: &BoardState) -> anyhow::Result<()> {
    check(state)?;
    println!("{}", render(state, Instant::now()));
    Ok(())
}

fn check(state: &BoardState) -> anyhow::Result<()> {
    if let Some(toast) = state.toast.as_ref().filter(|t| t.kind == ToastKind::Error) {
        bail!("{}", toast.text);
    }
    Ok(())
}

pub fn list(server: &str) -> anyhow::Result<()> {
    let controller = connect(server)?;
    finish(controller.state())
}

pub fn add(server: &str, title: &str) -> anyhow::Result<()> {
    let mut controller = connect(server)?;
    let state = controller.dispatch(Command::Add {
        title: title.to_string(),
    });
    finish(state)
}

pub fn edit(server: &str, id: GoalId, title: &str) -> anyhow::Result<()> {
    let mut controller = connect(server)?;
    controller.dispatch(Command::BeginEdit { id });
    let state = controller.dispatch(Command::Save {
        id,
        title: title.to_string(),
    });
    finish(state)
}

pub fn delete(server: &str, id: GoalId, yes: bool) -> anyhow::Result<()> {
    let mut controller = connect(server)?;
    controller.dispatch(Command::RequestDelete { id });
    if controller.state().confirm_delete.is_none() {
        println!("No goal with ID {}.", id);
        return Ok(());
    }

    let command = if yes || confirm("Delete this goal?")? {
        Command::ConfirmDelete
    } else {
        Command::DismissConfirm
    };
    let state = controller.dispatch(command);
    finish(state)
}

pub fn greet(server: &str) -> anyhow::Result<()> {
    let api = HttpGoalApi::new(server)?;
    println!("{}", api.greet()?);
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
