#![forbid(unsafe_code)]
//! pathtree: turn flat path listings into filtered, searchable directory trees.

pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod logging;
pub mod render;
pub mod session;
pub mod source;
pub mod terminal;
pub mod tree;
