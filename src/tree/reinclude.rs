//! Discovery of paths restored by negated ignore rules
//!
//! A negated rule (`!pattern`) can bring back a path whose parent directory
//! an earlier, broader rule excluded. The walker cannot see such paths while
//! it skips excluded directories, so they are collected up front with one
//! unfiltered pass over the whole tree.

use std::collections::HashSet;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::rules::RuleSet;

use super::utils::{ancestors, relative_path};

/// Root-relative `/`-separated paths restored by negated rules.
#[derive(Debug, Clone, Default)]
pub struct ReincludedPaths {
    /// Paths matched by a negated rule, plus everything below a matched
    /// directory.
    paths: HashSet<String>,
    /// Directories that contain a path from `paths`.
    ancestors: HashSet<String>,
}

impl ReincludedPaths {
    /// Walk `root` once and collect every path a negated rule restores.
    ///
    /// Entries that cannot be read are skipped. With no negated rules the
    /// tree is not walked at all.
    pub fn build(root: &Path, rules: &RuleSet) -> Self {
        let mut set = Self::default();
        if rules.negated().next().is_none() {
            return set;
        }

        for entry in unfiltered_walk(root) {
            if entry.depth() == 0 {
                continue;
            }
            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };
            if !rules.is_negated_match(&relative) {
                continue;
            }

            let is_dir = entry.path().is_dir();
            set.insert(relative);

            // Everything below a restored directory comes back with it.
            if is_dir {
                for descendant in unfiltered_walk(entry.path()) {
                    if descendant.depth() == 0 {
                        continue;
                    }
                    if let Some(relative) = relative_path(root, descendant.path()) {
                        set.paths.insert(relative);
                    }
                }
            }
        }

        if set.is_empty() {
            debug!("no paths matched a negated rule");
        } else {
            debug!(
                reincluded = set.len(),
                ancestors = set.ancestors.len(),
                "collected re-included paths"
            );
        }
        set
    }

    fn insert(&mut self, relative: String) {
        for ancestor in ancestors(&relative) {
            if !self.ancestors.insert(ancestor.to_string()) {
                break;
            }
        }
        self.paths.insert(relative);
    }

    /// Check if a path was restored by a negated rule.
    pub fn contains(&self, relative: &str) -> bool {
        self.paths.contains(relative)
    }

    /// Check if a path must survive exclusion: it was restored, or it is a
    /// directory leading to a restored path.
    pub fn shields(&self, relative: &str) -> bool {
        self.paths.contains(relative) || self.ancestors.contains(relative)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Walk every entry below `path` with all ignore handling switched off.
///
/// Symlinks are followed; the walker reports loops as errors, which are
/// skipped along with unreadable entries.
fn unfiltered_walk(path: &Path) -> impl Iterator<Item = DirEntry> {
    WalkBuilder::new(path)
        .standard_filters(false)
        .follow_links(true)
        .build()
        .flatten()
}
