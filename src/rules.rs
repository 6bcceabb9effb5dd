//! Ignore-file rule compilation
//!
//! Every non-blank, non-comment line of an ignore file becomes exactly one
//! [`IgnoreRule`]: a regex that is *searched* (not fully matched) against a
//! `/`-separated path relative to the scan root, plus a negation flag.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{Result, ScanError};

/// One compiled line of an ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: Regex,
    negated: bool,
    source: String,
}

impl IgnoreRule {
    /// Compile a single ignore line.
    ///
    /// The caller is responsible for skipping blank lines and comments;
    /// anything passed here produces a rule or a fatal error.
    pub fn compile(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let (negated, original) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let translated = translate(original);
        trace!(line = trimmed, pattern = %translated, "compiled ignore rule");

        let pattern = Regex::new(&translated).map_err(|source| ScanError::PatternCompile {
            line: trimmed.to_string(),
            source,
        })?;

        Ok(Self {
            pattern,
            negated,
            source: trimmed.to_string(),
        })
    }

    /// Search the rule's pattern in a root-relative, `/`-separated path.
    pub fn is_match(&self, relative: &str) -> bool {
        self.pattern.is_match(relative)
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The trimmed line this rule was compiled from, `!` included.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The regex the line was translated into.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Translate an ignore line (negation already removed) into regex source.
///
/// Anchoring decisions look at `original`, the line before its leading and
/// trailing `/` were stripped.
fn translate(original: &str) -> String {
    let literal = original.strip_prefix('/').unwrap_or(original);
    let literal = literal.strip_suffix('/').unwrap_or(literal);

    let mut pattern = regex::escape(literal)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");

    let double_star = original.starts_with("**");
    let dir_only = original.ends_with('/');

    if !original.starts_with('/') && !double_star {
        pattern = format!(".*{pattern}");
    }

    if dir_only && !original.ends_with("**") {
        pattern.push_str("/?.*");
    }

    // Bare names must line up with whole path segments.
    if !literal.contains('/') && !dir_only && !double_star {
        pattern = format!("(^|.*/){pattern}(/|$)");
    }

    pattern
}

/// Ordered rules of one ignore file, in file order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
}

impl RuleSet {
    /// Parse the text of an ignore file.
    pub fn parse(text: &str) -> Result<Self> {
        let rules = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(IgnoreRule::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Read and parse `dir/file_name`.
    ///
    /// A missing file yields an empty rule set. Any other failure, including
    /// content that is not valid UTF-8, is fatal.
    pub fn load(dir: &Path, file_name: &str) -> Result<Self> {
        let path = dir.join(file_name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ignore file, continuing without rules");
                return Ok(Self::default());
            }
            Err(source) => return Err(ScanError::IgnoreFileRead { path, source }),
        };

        let rules = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            rules = rules.len(),
            negated = rules.negated().count(),
            "loaded ignore rules"
        );
        Ok(rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter()
    }

    /// Rules that start with `!`.
    pub fn negated(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter().filter(|r| r.negated)
    }

    /// Rules that exclude paths.
    pub fn excluding(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter().filter(|r| !r.negated)
    }

    /// Check whether any negated rule matches `relative`.
    pub fn is_negated_match(&self, relative: &str) -> bool {
        self.negated().any(|r| r.is_match(relative))
    }
}
