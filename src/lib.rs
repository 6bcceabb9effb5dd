//! Treemark - snapshot a directory tree as text, filtered by .gitignore

use std::path::Path;

pub mod error;
pub mod output;
pub mod rules;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{Result, ScanError};
pub use output::{OutputConfig, render_markdown, write_markdown};
pub use rules::{IgnoreRule, RuleSet};
pub use tree::{FileFilter, Placeholder, ReincludedPaths, ScanConfig, TreeWalker};

/// Render the tree below `root` using `config`.
pub fn generate_tree(root: &Path, config: &ScanConfig) -> Result<String> {
    TreeWalker::new(config.clone()).walk(root)
}

/// Render the tree below `root`, applying `root/.gitignore` when
/// `ignore_enabled` is set.
pub fn get_directory_structure(root: &Path, ignore_enabled: bool) -> Result<String> {
    let config = ScanConfig {
        ignore_enabled,
        ..Default::default()
    };
    generate_tree(root, &config)
}
