//! Runtime theming for a desktop application window.
//!
//! Themes are SCSS files sharing two partials, `base` and `mappings`. The
//! partials are inlined textually before compilation (see
//! [`theme::imports`]), the compiled CSS is forced to `!important`, and the
//! result replaces whatever theme stylesheet the window had before. A second,
//! independent surface hides the call sidebar with a one-line rule.

pub mod host;
pub mod injector;
pub mod logging;
pub mod runtime;
pub mod sidebar;
pub mod theme;

pub use host::StyleHost;
pub use injector::Injector;
pub use runtime::{InjectorHandle, spawn};
pub use sidebar::SidebarToggle;
pub use theme::{
    ApplyOutcome, CompileError, HostError, InjectorConfig, SidebarOutcome, StyleKey,
    ThemeController, ThemeError, ThemeId,
};
