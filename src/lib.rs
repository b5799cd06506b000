pub mod config;
pub mod demo;
pub mod fixtures;
pub mod pipeline;
pub mod server;
pub mod tui;
