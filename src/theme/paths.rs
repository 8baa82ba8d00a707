use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::types::{Partial, ThemeId};

/// Source extension of theme and partial files.
pub const SOURCE_EXT: &str = "scss";

/// Directory name used under the user's config home.
const APP_DIR: &str = "css-injector";

/// Layout of the read-only themes directory.
///
/// ```text
/// <dir>/base.scss
/// <dir>/mappings.scss
/// <dir>/<theme>.scss
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePaths {
    /// Directory holding the partials and theme sources.
    dir: PathBuf,
}

impl ThemePaths {
    /// Wrap the themes directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The themes directory itself; also handed to the compiler as a load path.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a shared partial.
    #[must_use]
    pub fn partial(&self, partial: Partial) -> PathBuf {
        self.dir.join(format!("{}.{SOURCE_EXT}", partial.name()))
    }

    /// Location of a theme's source file, or `None` when the name is not a usable file stem.
    #[must_use]
    pub fn theme(&self, id: &ThemeId) -> Option<PathBuf> {
        id.is_valid_file_stem()
            .then(|| self.dir.join(format!("{}.{SOURCE_EXT}", id.as_str())))
    }

    /// What: List the themes a user can pick from.
    ///
    /// Inputs:
    /// - `reserved`: The "no override" identifier, always listed first.
    ///
    /// Output:
    /// - `reserved` followed by every `*.scss` stem in the directory except the partials, sorted.
    ///
    /// Details:
    /// - An unreadable directory yields just the reserved entry.
    #[must_use]
    pub fn available_themes(&self, reserved: &ThemeId) -> Vec<ThemeId> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|stem| {
                Partial::ALL.iter().all(|partial| partial.name() != stem)
                    && stem != reserved.as_str()
            })
            .collect();
        names.sort();
        names.dedup();
        let mut out = Vec::with_capacity(names.len() + 1);
        out.push(reserved.clone());
        out.extend(names.into_iter().map(ThemeId::new));
        out
    }
}

/// Determine the configuration file path for the injector, searching in priority order.
///
/// Checks `$HOME/.config/css-injector/injector.conf`, then
/// `$XDG_CONFIG_HOME/css-injector/injector.conf`; first existing file wins.
#[must_use]
pub fn resolve_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(h) = home.as_deref() {
        candidates.push(Path::new(h).join(".config").join(APP_DIR).join("injector.conf"));
    }
    if let Some(xdg) = xdg_config.as_deref() {
        candidates.push(Path::new(xdg).join(APP_DIR).join("injector.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Logs directory: `$XDG_STATE_HOME/css-injector/logs` (ensured to exist when possible).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_STATE_HOME", &[".local", "state"])
        .join(APP_DIR)
        .join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}
