//! Everything that turns editor state into terminal output

pub mod render;
pub mod status;

pub use render::{FrameContext, ScreenRenderer};
pub use status::StatusMessage;
