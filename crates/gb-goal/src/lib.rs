//! # gb-goal
//!
//! Goal records and their in-memory store for goalboard.
//!
//! A [`Goal`] is a titled record with a server-assigned integer id. The
//! [`GoalStore`] owns the whole collection for the lifetime of the process;
//! it is built once and shared with whatever serves requests.
//!
//! ## Key components
//!
//! - [`Goal`] — the record, plus [`NewGoal`] / [`GoalPatch`] request shapes
//! - [`GoalStore`] — list / create / update / delete over one ordered list
//! - [`GoalEvent`] — emitted after every mutation
//! - [`EventDispatcher`] — fans events out to [`NotificationSink`]s
//!   ([`TracingSink`], [`LogSink`])

pub mod error;
pub mod events;
pub mod goal;
pub mod store;

pub use error::GoalError;
pub use events::{EventDispatcher, GoalEvent, LogSink, NotificationSink, TracingSink};
pub use goal::{default_seed, Goal, GoalId, GoalPatch, NewGoal};
pub use store::GoalStore;
