//! Directory tree scanning and rendering
//!
//! A scan runs in two passes over the filesystem:
//!
//! - `ReincludedPaths`: one unfiltered walk that records every path a negated
//!   ignore rule restores, so that excluded parents can still lead to it
//! - `TreeWalker`: the rendering walk, consulting `FileFilter` at every entry

mod config;
mod filter;
mod reinclude;
mod utils;
mod walker;

pub use config::{DEFAULT_IGNORE_FILE, ScanConfig};
pub use filter::FileFilter;
pub use reinclude::ReincludedPaths;
pub use walker::{Placeholder, TreeWalker};
