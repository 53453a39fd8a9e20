//! taskdeck: a small task-management web service.
//!
//! JSON API over a single SQLite-backed `Task` table with status filtering
//! and case-insensitive title search. The binary in `main.rs` is a thin clap
//! wrapper around [`cli::serve`].

pub mod api;
pub mod cli;
pub mod error;
pub mod model;
pub mod storage;
