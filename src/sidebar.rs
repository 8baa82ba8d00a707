//! Hiding the call sidebar with a one-rule stylesheet.

use std::sync::Weak;

use tracing::{debug, warn};

use crate::host::StyleHost;
use crate::theme::{HostError, SidebarOutcome, StyleKey};

/// Element hidden by default.
pub const DEFAULT_SIDEBAR_SELECTOR: &str = "gv-call-sidebar";

/// Build the display-suppression rule for `selector`.
#[must_use]
pub fn hide_rule(selector: &str) -> String {
    format!("{selector} {{ display: none }}")
}

/// Owner of the sidebar-hiding stylesheet.
///
/// Independent of the theme stylesheet: applying or clearing a theme never
/// touches this key and vice versa.
pub struct SidebarToggle<H> {
    /// Target window; dropped windows are treated as absent.
    window: Weak<H>,
    /// CSS rule injected while hidden.
    rule: String,
    /// Key of the injected hide rule, if any.
    active: Option<StyleKey>,
}

impl<H: StyleHost> SidebarToggle<H> {
    /// Toggle hiding `selector` in `window`.
    #[must_use]
    pub fn new(window: Weak<H>, selector: &str) -> Self {
        Self {
            window,
            rule: hide_rule(selector),
            active: None,
        }
    }

    /// Whether a hide rule is currently tracked.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.active.is_some()
    }

    /// Key of the tracked hide rule.
    #[must_use]
    pub const fn active_key(&self) -> Option<&StyleKey> {
        self.active.as_ref()
    }

    /// What: Show or hide the sidebar.
    ///
    /// Inputs:
    /// - `hidden`: `true` to inject the hide rule, `false` to remove it.
    ///
    /// Output:
    /// - What changed; see [`SidebarOutcome`].
    ///
    /// Details:
    /// - Without a window this is a no-op.
    /// - Hiding while already hidden keeps the existing rule instead of stacking a second one.
    /// - Showing forgets the key, so a later hide injects afresh.
    pub async fn set_hidden(&mut self, hidden: bool) -> SidebarOutcome {
        let Some(window) = self.window.upgrade() else {
            return SidebarOutcome::NoWindow;
        };
        if !hidden {
            return self.active.take().map_or(SidebarOutcome::Unchanged, |key| {
                window.remove_inserted_css(&key);
                debug!(key = %key, "[Sidebar] hide rule removed");
                SidebarOutcome::Shown
            });
        }
        if self.active.is_some() {
            return SidebarOutcome::Unchanged;
        }
        let inserted = window.insert_css(self.rule.clone()).await;
        drop(window);
        match inserted {
            Ok(key) if self.window.strong_count() > 0 => {
                debug!(key = %key, "[Sidebar] hide rule injected");
                self.active = Some(key);
                SidebarOutcome::Hidden
            }
            Ok(_) | Err(HostError::WindowClosed) => SidebarOutcome::Discarded,
            Err(err) => {
                warn!(error = %err, "[Sidebar] window rejected hide rule");
                SidebarOutcome::Discarded
            }
        }
    }
}
