//! API request handlers

pub mod tasks;
