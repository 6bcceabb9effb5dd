//! Output formatting for rendered trees

mod config;
mod markdown;

pub use config::OutputConfig;
pub use markdown::{render_markdown, write_markdown};
