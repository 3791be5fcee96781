// board.rs — `gb board`: the interactive terminal board.

use gb_ui::terminal::BoardApp;
use gb_ui::{Controller, HttpGoalApi};

pub fn execute(server: &str) -> anyhow::Result<()> {
    let api = HttpGoalApi::new(server)?;
    BoardApp::new(Controller::new(api)).run()?;
    Ok(())
}
