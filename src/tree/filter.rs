//! Per-entry ignore decisions

use std::path::Path;

use crate::error::Result;
use crate::rules::RuleSet;

use super::config::ScanConfig;
use super::reinclude::ReincludedPaths;

/// Ignore filter for one scan: the compiled rules plus the paths that
/// negated rules restore.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    rules: RuleSet,
    reincluded: ReincludedPaths,
}

impl FileFilter {
    pub fn new(rules: RuleSet, reincluded: ReincludedPaths) -> Self {
        Self { rules, reincluded }
    }

    /// Load the ignore file from `root` and collect re-included paths.
    pub fn from_root(root: &Path, config: &ScanConfig) -> Result<Self> {
        let rules = RuleSet::load(root, &config.ignore_file_name)?;
        let reincluded = ReincludedPaths::build(root, &rules);
        Ok(Self::new(rules, reincluded))
    }

    /// Decide whether a root-relative path is hidden.
    ///
    /// An excluding rule hides the path unless it is shielded by the
    /// re-included set. Any matching negated rule un-hides it, wherever it
    /// sits in the file.
    pub fn is_ignored(&self, relative: &str) -> bool {
        if self.rules.is_negated_match(relative) {
            return false;
        }
        !self.reincluded.shields(relative)
            && self.rules.excluding().any(|r| r.is_match(relative))
    }

    /// Check if a path should be listed.
    pub fn is_included(&self, relative: &str) -> bool {
        !self.is_ignored(relative)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn reincluded(&self) -> &ReincludedPaths {
        &self.reincluded
    }
}
