//! Output configuration types

use std::path::PathBuf;

const DEFAULT_OUTPUT_FILE: &str = "Structure.md";
const DEFAULT_HEADING: &str = "# Directory Structure";

/// Where and how the rendered tree is written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_path: PathBuf,
    /// Markdown heading placed above the fenced tree.
    pub heading: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}
