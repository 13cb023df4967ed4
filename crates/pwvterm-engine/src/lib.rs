//! Query engine for the PWV terminal.
//!
//! A read-only corpus of extracted blog-post entities goes in; free-text
//! commands come from the shell; every turn yields exactly one structured
//! `CommandResult`. Three layers:
//! - `command`: the per-verb contract and the ordered registry (order is
//!   dispatch precedence)
//! - `commands`: one object per verb
//! - `engine`: the turn loop — numeric selection, registry scan, then the
//!   legacy inline grammars (showcase/timeline/connections/help)
//!
//! The engine is a single-threaded turn machine: no I/O, no suspension
//! points, one mutable field (the current selectable list).

pub mod command;
pub mod commands;
mod engine;
mod legacy;
mod render;
pub mod result;
pub mod rng;

pub use command::{Category, Command, CommandContext, CommandRegistry};
pub use commands::default_registry;
pub use engine::QueryEngine;
pub use result::{CommandResult, PostNav, ResultKind, SelectableItem, SelectableKind};
pub use rng::XorShift64;
