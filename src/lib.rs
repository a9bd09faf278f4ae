// Editor library - exposes all core modules for testing

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod input;
pub mod prompt;
pub mod search;
#[cfg(feature = "runtime")]
pub mod services;
pub mod view;
pub mod viewport;

// Re-export commonly used types
pub use buffer::{Document, Row};
pub use config::Config;
pub use editor::Editor;
pub use input::Key;
