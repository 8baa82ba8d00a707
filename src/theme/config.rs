use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::sidebar::DEFAULT_SIDEBAR_SELECTOR;
use crate::theme::paths::{ThemePaths, resolve_config_path};
use crate::theme::types::ThemeId;

/// Environment variable overriding the themes directory.
pub const THEMES_DIR_ENV: &str = "CSS_INJECTOR_THEMES_DIR";

/// Injector settings parsed from `injector.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectorConfig {
    /// Directory holding `base.scss`, `mappings.scss` and the theme files.
    pub themes_dir: PathBuf,
    /// Theme name meaning "no override".
    pub default_theme: ThemeId,
    /// Selector of the element hidden by the sidebar toggle.
    pub sidebar_selector: String,
    /// Theme applied at startup, if any.
    pub initial_theme: Option<ThemeId>,
    /// Whether the sidebar starts hidden.
    pub hide_sidebar: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self::with_app_root(Path::new("."))
    }
}

impl InjectorConfig {
    /// What: Defaults for an application installed at `app_root`.
    ///
    /// Inputs:
    /// - `app_root`: Application directory; themes live under `src/themes`.
    ///
    /// Output:
    /// - Config with the reserved `default` theme, the call-sidebar selector,
    ///   no startup theme and the sidebar visible.
    #[must_use]
    pub fn with_app_root(app_root: &Path) -> Self {
        Self {
            themes_dir: app_root.join("src").join("themes"),
            default_theme: ThemeId::default(),
            sidebar_selector: DEFAULT_SIDEBAR_SELECTOR.to_string(),
            initial_theme: None,
            hide_sidebar: false,
        }
    }

    /// Layout of the configured themes directory.
    #[must_use]
    pub fn theme_paths(&self) -> ThemePaths {
        ThemePaths::new(&self.themes_dir)
    }

    /// What: Load settings for an application installed at `app_root`.
    ///
    /// Inputs:
    /// - `app_root`: Application directory used for defaults.
    ///
    /// Output:
    /// - Defaults overlaid with `injector.conf` (when found) and `CSS_INJECTOR_THEMES_DIR`.
    ///
    /// Details:
    /// - A missing or unreadable config file is not an error; defaults are used.
    #[must_use]
    pub fn load(app_root: &Path) -> Self {
        let mut cfg = Self::with_app_root(app_root);
        if let Some(p) = resolve_config_path() {
            match fs::read_to_string(&p) {
                Ok(content) => {
                    debug!(path = %p.display(), bytes = content.len(), "[Config] Loaded injector.conf");
                    parse_config(&content, &mut cfg);
                }
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "[Config] injector.conf unreadable, using defaults");
                }
            }
        }
        if let Ok(dir) = env::var(THEMES_DIR_ENV)
            && !dir.trim().is_empty()
        {
            cfg.themes_dir = PathBuf::from(dir.trim());
        }
        normalize(&mut cfg, app_root);
        cfg
    }
}

/// Byte offset where a `marker` comment starts, if any.
///
/// The marker only counts at the start of the value or after whitespace, so
/// `/srv//themes` and `a#b` stay intact.
fn comment_start(s: &str, marker: &str) -> Option<usize> {
    s.match_indices(marker)
        .map(|(i, _)| i)
        .find(|&i| i == 0 || s[..i].ends_with(char::is_whitespace))
}

/// Strip a trailing `// ...` comment from a value.
fn strip_slash_comment(s: &str) -> &str {
    comment_start(s, "//").map_or(s, |i| &s[..i]).trim()
}

/// Strip a trailing `# ...` or `// ...` comment from a value.
fn strip_inline_comment(s: &str) -> &str {
    let s = strip_slash_comment(s);
    comment_start(s, "#").map_or(s, |i| &s[..i]).trim()
}

/// Interpret the usual spellings of a boolean.
fn parse_bool(val: &str) -> bool {
    let lv = val.to_ascii_lowercase();
    lv == "true" || lv == "1" || lv == "yes" || lv == "on"
}

/// What: Parse `injector.conf` content into `cfg`.
///
/// Inputs:
/// - `content`: File contents, `key = value` per line.
/// - `cfg`: Config to update in place.
///
/// Output:
/// - None (modifies `cfg` in-place).
///
/// Details:
/// - Blank lines and lines starting with `#` or `//` are skipped, as are lines without `=`.
/// - Inline comments need whitespace before the marker; `sidebar_selector` only honours `//`.
/// - Keys are case-insensitive; `.`, `-` and spaces count as `_`.
/// - Unknown keys are logged and ignored.
pub fn parse_config(content: &str, cfg: &mut InjectorConfig) {
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let raw_val = raw_val.trim();
        let val = strip_inline_comment(raw_val);
        match key.as_str() {
            "themes_dir" | "theme_dir" | "themes_directory" => {
                cfg.themes_dir = PathBuf::from(val);
            }
            "default_theme" | "reserved_theme" => {
                cfg.default_theme = ThemeId::new(val);
            }
            "sidebar_selector" => {
                // `#` starts id selectors here, never a comment
                cfg.sidebar_selector = strip_slash_comment(raw_val).to_string();
            }
            "theme" | "initial_theme" | "startup_theme" => {
                cfg.initial_theme = Some(ThemeId::new(val));
            }
            "hide_sidebar" | "hide_dialer_sidebar" => {
                cfg.hide_sidebar = parse_bool(val);
            }
            _ => {
                debug!(line = idx + 1, key = %key, "[Config] ignoring unknown key");
            }
        }
    }
}

/// What: Normalize parsed settings.
///
/// Inputs:
/// - `cfg`: Config to normalize in-place.
/// - `app_root`: Base for relative `themes_dir` values.
///
/// Details:
/// - Empty values fall back to defaults; a relative `themes_dir` is taken relative to `app_root`.
/// - An empty startup theme means no startup theme.
fn normalize(cfg: &mut InjectorConfig, app_root: &Path) {
    let defaults = InjectorConfig::with_app_root(app_root);
    if cfg.themes_dir.as_os_str().is_empty() {
        cfg.themes_dir = defaults.themes_dir;
    } else if cfg.themes_dir.is_relative() {
        cfg.themes_dir = app_root.join(&cfg.themes_dir);
    }
    if cfg.default_theme.as_str().is_empty() {
        cfg.default_theme = defaults.default_theme;
    }
    cfg.sidebar_selector = cfg.sidebar_selector.trim().to_string();
    if cfg.sidebar_selector.is_empty() {
        cfg.sidebar_selector = defaults.sidebar_selector;
    }
    if cfg
        .initial_theme
        .as_ref()
        .is_some_and(|t| t.as_str().is_empty())
    {
        cfg.initial_theme = None;
    }
}
