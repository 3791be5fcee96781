// terminal.rs — Interactive goal board in the terminal.
//
// Keys map to controller commands; the screen is redrawn from `render()`
// on every loop iteration, so expired toasts disappear on the next poll.
//
//   Normal:   ↑/↓ select, a add, e edit, d delete, r refresh, q quit
//   Confirm:  y delete, n / Esc keep
//   Adding:   type, Enter add, Esc back
//   Editing:  type, Enter save, Esc cancel

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use gb_goal::GoalId;

use crate::api::GoalApi;
use crate::controller::{Command, Controller};
use crate::render::{render, BoardView};
use crate::state::ToastKind;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Adding,
    Editing(GoalId),
}

/// Terminal front-end over a [`Controller`].
pub struct BoardApp<A> {
    controller: Controller<A>,
    mode: Mode,
    selected: usize,
    quit: bool,
}

impl<A: GoalApi> BoardApp<A> {
    pub fn new(controller: Controller<A>) -> Self {
        Self {
            controller,
            mode: Mode::Normal,
            selected: 0,
            quit: false,
        }
    }

    pub fn controller(&self) -> &Controller<A> {
        &self.controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Take over the terminal until the user quits.
    pub fn run(mut self) -> io::Result<()> {
        let mut terminal = ratatui::try_init()?;
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        self.dispatch(Command::Load);
        while !self.quit {
            let view = render(self.controller.state(), Instant::now());
            terminal.draw(|frame| self.draw(frame, &view))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: Command) {
        let rows = self.controller.dispatch(command).rows.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn selected_id(&self) -> Option<GoalId> {
        self.controller.state().rows.get(self.selected).map(|r| r.id())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.controller.state().confirm_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.dispatch(Command::ConfirmDelete),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.dispatch(Command::DismissConfirm)
                }
                _ => {}
            }
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Adding => self.handle_adding(key),
            Mode::Editing(id) => self.handle_editing(id, key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.controller.state().rows.len();
                if self.selected + 1 < rows {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Char('a') => self.mode = Mode::Adding,
            KeyCode::Char('r') => self.dispatch(Command::Refresh),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Command::BeginEdit { id });
                    if self.controller.state().row(id).is_some_and(|r| r.editing) {
                        self.mode = Mode::Editing(id);
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Command::RequestDelete { id });
                }
            }
            _ => {}
        }
    }

    fn handle_adding(&mut self, key: KeyEvent) {
        let mut draft = self.controller.state().draft.clone();
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let blank = draft.trim().is_empty();
                self.dispatch(Command::Add { title: draft });
                if !blank && self.controller.state().draft.is_empty() {
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Backspace => {
                draft.pop();
                self.dispatch(Command::SetDraft(draft));
            }
            KeyCode::Char(c) => {
                draft.push(c);
                self.dispatch(Command::SetDraft(draft));
            }
            _ => {}
        }
    }

    fn handle_editing(&mut self, id: GoalId, key: KeyEvent) {
        let Some(row) = self.controller.state().row(id) else {
            self.mode = Mode::Normal;
            return;
        };
        let mut input = row.input.clone();

        match key.code {
            KeyCode::Esc => {
                self.dispatch(Command::CancelEdit { id });
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                self.dispatch(Command::Save { id, title: input });
                // A successful save reloads the rows, which hides the edit row.
                if !self.controller.state().row(id).is_some_and(|r| r.editing) {
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Backspace => {
                input.pop();
                self.dispatch(Command::SetEditInput { id, text: input });
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.dispatch(Command::SetEditInput { id, text: input });
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame, view: &BoardView) {
        let [input_area, list_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let input_style = if self.mode == Mode::Adding {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let add_title = if view.controls_enabled {
            " New goal "
        } else {
            " New goal (adding...) "
        };
        frame.render_widget(
            Paragraph::new(view.draft.as_str())
                .style(input_style)
                .block(Block::bordered().title(add_title)),
            input_area,
        );

        let items: Vec<ListItem> = view
            .rows
            .iter()
            .map(|row| {
                let title_style = if row.actions_enabled {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let mut lines = vec![Line::from(vec![
                    Span::styled(row.title.clone(), title_style),
                    Span::styled("  [e]dit [d]elete", Style::default().fg(Color::DarkGray)),
                ])];
                if let Some(edit) = &row.edit {
                    lines.push(Line::from(vec![
                        Span::raw("  > "),
                        Span::styled(edit.input.clone(), Style::default().fg(Color::Cyan)),
                        Span::styled(
                            "  [Enter] save [Esc] cancel",
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]));
                }
                ListItem::new(lines)
            })
            .collect();

        let mut list_state = ListState::default();
        if !view.rows.is_empty() {
            list_state.select(Some(self.selected));
        }
        frame.render_stateful_widget(
            List::new(items)
                .block(Block::bordered().title(" Goals "))
                .highlight_symbol("> ")
                .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40))),
            list_area,
            &mut list_state,
        );

        let status_line = match (&view.toast, &view.status) {
            (Some((text, kind)), _) => {
                let color = match kind {
                    ToastKind::Info => Color::Gray,
                    ToastKind::Success => Color::Green,
                    ToastKind::Error => Color::Red,
                };
                Line::styled(text.clone(), Style::default().fg(color))
            }
            (None, Some(status)) => Line::raw(status.clone()),
            (None, None) => Line::raw(""),
        };
        frame.render_widget(Paragraph::new(status_line), status_area);

        let help = match self.mode {
            Mode::Normal => "↑/↓ select · a add · e edit · d delete · r refresh · q quit",
            Mode::Adding => "type a title · Enter add · Esc back",
            Mode::Editing(_) => "type a title · Enter save · Esc cancel",
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );

        if let Some(prompt) = &view.confirm {
            let area = centered(frame.area(), 36, 3);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(format!("{prompt} [y/n]"))
                    .block(Block::bordered().title(" Confirm ")),
                area,
            );
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
