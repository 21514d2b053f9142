//! Minbar is a full-screen terminal chat client for services that answer
//! questions over a minimal HTTP protocol: `POST /ask` with
//! `{"question": ...}`, answered by `{"response": ...}`.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the transcript, the ask-request service,
//!   the typewriter reveal, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the ask-protocol payloads and the HTTP round trip.
//! - [`utils`] holds the clipboard shim, URL and input helpers, scroll math,
//!   and tracing setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
