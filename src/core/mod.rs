pub mod app;
pub mod ask;
pub mod config;
pub mod constants;
pub mod message;
pub mod typewriter;
