//! Markdown document output
//!
//! The rendered tree is placed in a fenced code block under a heading so
//! that it survives being pasted into documentation or an issue.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::{Result, ScanError};

use super::config::OutputConfig;

const FENCE: &str = "```";

/// Wrap a rendered tree in the configured heading and a code fence.
pub fn render_markdown(tree: &str, config: &OutputConfig) -> String {
    let mut output = String::with_capacity(tree.len() + config.heading.len() + 16);
    output.push_str(&config.heading);
    output.push_str("\n\n");
    output.push_str(FENCE);
    output.push('\n');
    output.push_str(tree);
    if !tree.is_empty() && !tree.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(FENCE);
    output.push('\n');
    output
}

/// Write the Markdown document to `config.output_path` as UTF-8.
///
/// Returns the path that was written.
pub fn write_markdown(tree: &str, config: &OutputConfig) -> Result<PathBuf> {
    let document = render_markdown(tree, config);
    fs::write(&config.output_path, document).map_err(|source| ScanError::WriteOutput {
        path: config.output_path.clone(),
        source,
    })?;
    info!(path = %config.output_path.display(), "wrote directory structure");
    Ok(config.output_path.clone())
}
