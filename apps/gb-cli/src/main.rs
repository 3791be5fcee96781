//! # gb
//!
//! Command-line interface for goalboard.
//!
//! - `gb list / add / edit / delete` — one-shot goal operations
//! - `gb greet` — check the server is up
//! - `gb board` — interactive terminal board
//! - `gb serve` — run the HTTP server in the foreground

mod commands;

use clap::{Parser, Subcommand};

use gb_goal::GoalId;
use gb_ui::DEFAULT_SERVER_URL;

/// goalboard CLI — track goals against a goalboard server.
#[derive(Parser)]
#[command(name = "gb", version, about)]
struct Cli {
    /// Server base URL.
    #[arg(long, env = "GOALBOARD_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all goals.
    List,
    /// Add a goal.
    Add {
        /// Goal title.
        title: String,
    },
    /// Change a goal's title.
    Edit {
        /// Goal ID.
        id: GoalId,
        /// New title.
        title: String,
    },
    /// Delete a goal.
    Delete {
        /// Goal ID.
        id: GoalId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the server's greeting.
    Greet,
    /// Open the interactive goal board.
    Board,
    /// Run the goalboard HTTP server.
    Serve(gb_daemon::ServeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The board owns the terminal; log lines would tear the screen.
    if !matches!(cli.command, Commands::Board) {
        let directives: &[&str] = match cli.command {
            Commands::Serve(_) => &gb_daemon::SERVER_LOG_DIRECTIVES,
            _ => &[],
        };
        gb_daemon::init_tracing(directives)?;
    }

    match cli.command {
        Commands::List => commands::goal::list(&cli.server),
        Commands::Add { title } => commands::goal::add(&cli.server, &title),
        Commands::Edit { id, title } => commands::goal::edit(&cli.server, id, &title),
        Commands::Delete { id, yes } => commands::goal::delete(&cli.server, id, yes),
        Commands::Greet => commands::goal::greet(&cli.server),
        Commands::Board => commands::board::execute(&cli.server),
        Commands::Serve(args) => commands::serve::execute(args),
    }
}
