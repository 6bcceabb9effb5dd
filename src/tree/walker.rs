//! TreeWalker - renders a filtered directory tree as text

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ScanError};

use super::config::ScanConfig;
use super::filter::FileFilter;
use super::utils::{child_prefix, connector, entry_name, join_relative, root_line};

/// Stand-in line for a directory whose contents could not be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    PermissionDenied,
    NotFound,
}

impl Placeholder {
    /// Map a listing error to a placeholder, if it is one we recover from.
    pub fn from_error(error: &io::Error) -> Option<Self> {
        match error.kind() {
            ErrorKind::PermissionDenied => Some(Self::PermissionDenied),
            ErrorKind::NotFound => Some(Self::NotFound),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "[Permission Denied]",
            Self::NotFound => "[Not Found]",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A directory entry that survived filtering.
#[derive(Debug)]
struct Child {
    name: String,
    path: PathBuf,
    relative: String,
    is_dir: bool,
}

/// Tree walker that renders straight into a string.
pub struct TreeWalker {
    config: ScanConfig,
}

impl TreeWalker {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Render the tree below `root`.
    ///
    /// The first line is always the root's own name with a trailing `/`.
    /// Directories below the root that cannot be listed are rendered as a
    /// placeholder line; every other failure aborts the scan.
    pub fn walk(&self, root: &Path) -> Result<String> {
        let root = fs::canonicalize(root).map_err(|source| ScanError::RootAccess {
            path: root.to_path_buf(),
            source,
        })?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let filter = if self.config.ignore_enabled {
            Some(FileFilter::from_root(&root, &self.config)?)
        } else {
            debug!("ignore processing disabled, listing every entry");
            None
        };

        let mut render = Render {
            filter: filter.as_ref(),
            output: root_line(&root),
            open_dirs: HashSet::from([root.clone()]),
        };
        render.walk_dir(&root, "", "")?;
        Ok(render.output)
    }
}

/// Output buffer and filter for one rendering pass.
struct Render<'a> {
    filter: Option<&'a FileFilter>,
    output: String,
    /// Canonical paths of the directories currently being rendered, root
    /// included. A symlink resolving to one of them would recurse forever.
    open_dirs: HashSet<PathBuf>,
}

impl Render<'_> {
    fn walk_dir(&mut self, path: &Path, relative: &str, prefix: &str) -> Result<()> {
        let children = match self.read_children(path, relative) {
            Ok(children) => children,
            Err(e) => match Placeholder::from_error(&e) {
                Some(placeholder) => {
                    warn!(path = %path.display(), error = %e, "cannot list directory");
                    self.push_line(prefix, false, placeholder.label());
                    return Ok(());
                }
                None => return Err(ScanError::read_dir(path, e)),
            },
        };

        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.push_line(prefix, is_last, &child.name);

            if child.is_dir {
                self.enter_dir(&child, &child_prefix(prefix, is_last))?;
            }
        }

        Ok(())
    }

    /// Recurse into a child directory, symlinked or not, unless it
    /// resolves to a directory that is already open above it.
    fn enter_dir(&mut self, child: &Child, prefix: &str) -> Result<()> {
        // Unresolvable paths fall through so listing reports the error.
        let target = fs::canonicalize(&child.path).ok();
        if let Some(target) = &target {
            if !self.open_dirs.insert(target.clone()) {
                debug!(path = %child.path.display(), "directory cycle, not descending");
                return Ok(());
            }
        }

        let result = self.walk_dir(&child.path, &child.relative, prefix);
        if let Some(target) = &target {
            self.open_dirs.remove(target);
        }
        result
    }

    /// List, partition, filter and sort the children of a directory.
    fn read_children(&self, path: &Path, relative: &str) -> io::Result<Vec<Child>> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in fs::read_dir(path)?.filter_map(|e| e.ok()) {
            let entry_path = entry.path();
            let name = entry_name(&entry_path);
            let child = Child {
                relative: join_relative(relative, &name),
                name,
                is_dir: entry_path.is_dir(),
                path: entry_path,
            };
            if child.is_dir {
                dirs.push(child);
            } else if child.path.is_file() {
                files.push(child);
            }
        }

        if let Some(filter) = self.filter {
            dirs.retain(|d| filter.is_included(&d.relative));
            files.retain(|f| filter.is_included(&f.relative));
        }

        let mut children = dirs;
        children.append(&mut files);
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn push_line(&mut self, prefix: &str, is_last: bool, name: &str) {
        self.output.push_str(prefix);
        self.output.push_str(connector(is_last));
        self.output.push_str(name);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn expected_root_line(dir: &TempDir) -> String {
        let canonical = fs::canonicalize(dir.path()).unwrap();
        format!("{}/\n", entry_name(&canonical))
    }

    #[test]
    fn test_children_sorted_and_interleaved() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "a.txt");
        touch(dir.path(), "c/inner.txt");
        touch(dir.path(), "c/z/deep.txt");
        touch(dir.path(), "bb/x.txt");

        let output = TreeWalker::new(ScanConfig::show_all())
            .walk(dir.path())
            .unwrap();

        let expected = format!(
            "{}\
├── a.txt
├── b.txt
├── bb
│   └── x.txt
└── c
    ├── inner.txt
    └── z
        └── deep.txt
",
            expected_root_line(&dir)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_directory_renders_root_only() {
        let dir = TempDir::new().unwrap();
        let output = TreeWalker::new(ScanConfig::default())
            .walk(dir.path())
            .unwrap();
        assert_eq!(output, expected_root_line(&dir));
    }

    #[test]
    fn test_filtering_applies_rules() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".gitignore");
        touch(dir.path(), "main.rs");
        touch(dir.path(), "debug.log");
        touch(dir.path(), "node_modules/pkg/index.js");
        touch(dir.path(), "my_node_modules_backup/keep.js");
        fs::write(dir.path().join(".gitignore"), "*.log\nnode_modules\n").unwrap();

        let output = TreeWalker::new(ScanConfig::default())
            .walk(dir.path())
            .unwrap();

        let expected = format!(
            "{}\
├── .gitignore
├── main.rs
└── my_node_modules_backup
    └── keep.js
",
            expected_root_line(&dir)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_negated_file_inside_excluded_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "build/output.txt");
        touch(dir.path(), "build/other.txt");
        touch(dir.path(), "src/lib.rs");
        fs::write(dir.path().join(".gitignore"), "build/\n!build/output.txt\n").unwrap();

        let output = TreeWalker::new(ScanConfig::default())
            .walk(dir.path())
            .unwrap();

        let expected = format!(
            "{}\
├── .gitignore
├── build
│   └── output.txt
└── src
    └── lib.rs
",
            expected_root_line(&dir)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_disabled_ignores_gitignore() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "debug.log");
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();

        let output = TreeWalker::new(ScanConfig::show_all())
            .walk(dir.path())
            .unwrap();
        assert!(output.contains("└── debug.log\n"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = TreeWalker::new(ScanConfig::default())
            .walk(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, ScanError::RootAccess { .. }));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "file.txt");
        let err = TreeWalker::new(ScanConfig::default())
            .walk(&dir.path().join("file.txt"))
            .unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_directory_is_entered() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "shared/doc.md");
        symlink("shared", dir.path().join("link")).unwrap();

        let output = TreeWalker::new(ScanConfig::show_all())
            .walk(dir.path())
            .unwrap();

        let expected = format!(
            "{}\
├── link
│   └── doc.md
└── shared
    └── doc.md
",
            expected_root_line(&dir)
        );
        assert_eq!(output, expected);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_cycle_stops_at_open_directory() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/file.rs");
        symlink("..", dir.path().join("a").join("up")).unwrap();
        symlink(".", dir.path().join("a").join("self")).unwrap();

        let output = TreeWalker::new(ScanConfig::show_all())
            .walk(dir.path())
            .unwrap();

        let expected = format!(
            "{}\
└── a
    ├── file.rs
    ├── self
    └── up
",
            expected_root_line(&dir)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_placeholder_from_error() {
        let denied = io::Error::from(ErrorKind::PermissionDenied);
        let missing = io::Error::from(ErrorKind::NotFound);
        let other = io::Error::from(ErrorKind::InvalidData);
        assert_eq!(
            Placeholder::from_error(&denied),
            Some(Placeholder::PermissionDenied)
        );
        assert_eq!(Placeholder::from_error(&missing), Some(Placeholder::NotFound));
        assert_eq!(Placeholder::from_error(&other), None);
        assert_eq!(Placeholder::NotFound.to_string(), "[Not Found]");
    }
}
