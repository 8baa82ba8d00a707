//! Theme composition and lifecycle.
//!
//! A theme is an SCSS file in the themes directory that may pull in two
//! shared partials. Applying one inlines those partials, compiles the result,
//! forces every declaration to `!important` and swaps it in as the window's
//! single theme stylesheet.

/// Compiler boundary and the `grass` implementation.
mod compile;
/// Injector settings.
mod config;
/// Single-active-theme lifecycle.
mod controller;
/// Error types.
mod error;
/// Partial inlining.
pub mod imports;
/// Themes directory layout and config locations.
mod paths;
/// Forced-priority post-processing.
mod priority;
/// Filesystem boundary.
mod source;
/// Identifiers, keys and outcomes.
mod types;

pub use compile::{GrassCompiler, StyleCompiler};
pub use config::{InjectorConfig, THEMES_DIR_ENV, parse_config};
pub use controller::ThemeController;
pub use error::{CompileError, HostError, ThemeError};
pub use imports::{ImportResolver, inline_partials};
pub use paths::{SOURCE_EXT, ThemePaths, logs_dir};
pub use priority::{FORCED_PRIORITY, force_priority};
pub use source::{FsLoader, SourceLoader};
pub use types::{ApplyOutcome, Partial, SidebarOutcome, StyleKey, ThemeId};
