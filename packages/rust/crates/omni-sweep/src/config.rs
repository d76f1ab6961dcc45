//! Sweep configuration.
//!
//! [`SweepConfig`] is the resolved value handed to every operation.
//! [`SweepSettings`] is its on-disk YAML form: every field optional, so a
//! project file can override a user file field by field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default directory ignore patterns.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = [
    r"[/\\]\.git[/\\]",
    r"[/\\]target[/\\]",
    r"[/\\]node_modules[/\\]",
];

/// Settings file looked up under the user config directory.
pub const USER_SETTINGS_RELATIVE_PATH: &str = "omni-sweep/sweep.yaml";

/// Settings file looked up in the root directory of a run.
pub const PROJECT_SETTINGS_FILE: &str = ".sweep.yaml";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Characters of context before each match.
    pub context_before: usize,
    /// Characters of context after each match.
    pub context_after: usize,
    /// Directory ignore patterns (regex, searched in the directory path).
    pub ignore_patterns: Vec<String>,
    /// Case-fold the path pattern and ignore patterns.
    pub case_fold_paths: bool,
    /// Stop at the first unreadable file instead of recording it.
    pub fail_fast: bool,
    /// Files larger than this are read failures.
    pub max_file_size: u64,
    /// Tag inserted into backup file names.
    pub backup_tag: String,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            context_before: 40,
            context_after: 40,
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(ToString::to_string).collect(),
            case_fold_paths: false,
            fail_fast: false,
            max_file_size: 10 * 1024 * 1024, // 10MB
            backup_tag: "sweep".to_string(),
            follow_symlinks: true,
        }
    }
}

/// YAML settings; unset fields fall back to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepSettings {
    /// See [`SweepConfig::context_before`].
    pub context_before: Option<usize>,
    /// See [`SweepConfig::context_after`].
    pub context_after: Option<usize>,
    /// See [`SweepConfig::ignore_patterns`].
    pub ignore_patterns: Option<Vec<String>>,
    /// See [`SweepConfig::case_fold_paths`].
    pub case_fold_paths: Option<bool>,
    /// See [`SweepConfig::fail_fast`].
    pub fail_fast: Option<bool>,
    /// See [`SweepConfig::max_file_size`].
    pub max_file_size: Option<u64>,
    /// See [`SweepConfig::backup_tag`].
    pub backup_tag: Option<String>,
    /// See [`SweepConfig::follow_symlinks`].
    pub follow_symlinks: Option<bool>,
}

impl SweepSettings {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            context_before: other.context_before.or(self.context_before),
            context_after: other.context_after.or(self.context_after),
            ignore_patterns: other.ignore_patterns.or(self.ignore_patterns),
            case_fold_paths: other.case_fold_paths.or(self.case_fold_paths),
            fail_fast: other.fail_fast.or(self.fail_fast),
            max_file_size: other.max_file_size.or(self.max_file_size),
            backup_tag: other.backup_tag.or(self.backup_tag),
            follow_symlinks: other.follow_symlinks.or(self.follow_symlinks),
        }
    }

    /// Fill unset fields from [`SweepConfig::default`].
    #[must_use]
    pub fn resolve(self) -> SweepConfig {
        let defaults = SweepConfig::default();
        SweepConfig {
            context_before: self.context_before.unwrap_or(defaults.context_before),
            context_after: self.context_after.unwrap_or(defaults.context_after),
            ignore_patterns: self.ignore_patterns.unwrap_or(defaults.ignore_patterns),
            case_fold_paths: self.case_fold_paths.unwrap_or(defaults.case_fold_paths),
            fail_fast: self.fail_fast.unwrap_or(defaults.fail_fast),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            backup_tag: self.backup_tag.unwrap_or(defaults.backup_tag),
            follow_symlinks: self.follow_symlinks.unwrap_or(defaults.follow_symlinks),
        }
    }

    /// Load one settings file. Missing files are empty settings; unreadable
    /// or malformed files are logged and ignored.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to read settings file; ignoring"
                );
                return Self::default();
            }
        };
        match serde_yaml::from_str::<Option<Self>>(&raw) {
            Ok(value) => value.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to parse settings yaml; ignoring file"
                );
                Self::default()
            }
        }
    }
}

/// User settings path, when the platform has a config directory.
#[must_use]
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_SETTINGS_RELATIVE_PATH))
}

/// Layered settings for a run rooted at `root`: user file, then the
/// project file in `root`, then `explicit` when given.
#[must_use]
pub fn load_layered_settings(root: &Path, explicit: Option<&Path>) -> SweepSettings {
    let user = user_settings_path()
        .map(|p| SweepSettings::load(&p))
        .unwrap_or_default();
    let project = SweepSettings::load(&root.join(PROJECT_SETTINGS_FILE));
    let merged = user.merge(project);
    match explicit {
        Some(path) => merged.merge(SweepSettings::load(path)),
        None => merged,
    }
}
