//! Configuration types for tree scanning

/// Name of the ignore file read from the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Apply ignore-file rules. When false the ignore file is never read
    /// and every entry is listed.
    pub ignore_enabled: bool,
    /// Ignore file looked up in the scan root.
    pub ignore_file_name: String,
}

impl ScanConfig {
    /// Configuration that lists every entry regardless of ignore rules.
    pub fn show_all() -> Self {
        Self {
            ignore_enabled: false,
            ..Default::default()
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_enabled: true,
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
        }
    }
}
