//! chainpeek: a terminal app that reads a Substrate node's genesis hash,
//! timestamp and one account's balance and nonce when it starts.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
