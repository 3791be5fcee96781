//! # gb-ui
//!
//! Client side of goalboard.
//!
//! The board keeps no state of its own beyond what the server last
//! returned: every mutation is followed by a full reload. All user actions
//! go through one [`Controller`] as [`Command`]s, the controller updates a
//! single [`BoardState`], and [`render`] turns that state into a
//! [`BoardView`] after every dispatch.
//!
//! ## Key components
//!
//! - [`GoalApi`] — the five API calls; [`HttpGoalApi`] talks to `gb-daemon`
//! - [`BoardState`] — rows, edit buffers, busy flags, status line, toast
//! - [`Controller`] / [`Command`] — load, add, edit, save, delete, refresh
//! - [`render`] / [`BoardView`] — presentation model, printable as text
//! - [`terminal`] — interactive ratatui board over the same controller

pub mod api;
pub mod controller;
pub mod error;
pub mod render;
pub mod state;
pub mod terminal;

pub use api::{GoalApi, HttpGoalApi, API_BASE, DEFAULT_SERVER_URL};
pub use controller::{Command, Controller};
pub use error::ClientError;
pub use render::{render, BoardView, EditView, RowView};
pub use state::{BoardState, GoalRow, Toast, ToastKind, TOAST_DURATION};
