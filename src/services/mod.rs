//! Process-level services: the terminal session and log output

pub mod terminal;
pub mod tracing_setup;
