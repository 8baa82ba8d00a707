//! The injector bound to one window: theme lifecycle plus sidebar toggle.

use std::sync::Arc;

use tracing::info;

use crate::host::StyleHost;
use crate::sidebar::SidebarToggle;
use crate::theme::{
    ApplyOutcome, FsLoader, GrassCompiler, InjectorConfig, SidebarOutcome, SourceLoader,
    StyleCompiler, ThemeController, ThemeError, ThemeId,
};

/// Theme controller and sidebar toggle sharing one window.
///
/// Both surfaces track their own key; neither ever removes the other's
/// stylesheet.
pub struct Injector<H, L = FsLoader, C = GrassCompiler> {
    /// Settings the injector was built from.
    config: InjectorConfig,
    /// Theme stylesheet owner.
    theme: ThemeController<H, L, C>,
    /// Sidebar hide-rule owner.
    sidebar: SidebarToggle<H>,
}

impl<H: StyleHost> Injector<H> {
    /// What: Bind an injector to `window`.
    ///
    /// Inputs:
    /// - `config`: Themes directory, reserved theme and sidebar selector.
    /// - `window`: Target window; only a weak reference is kept.
    ///
    /// Output:
    /// - Injector reading themes from disk and compiling them with `grass`.
    #[must_use]
    pub fn new(config: InjectorConfig, window: &Arc<H>) -> Self {
        let theme = ThemeController::new(Arc::downgrade(window), config.theme_paths())
            .with_reserved(config.default_theme.clone());
        let sidebar = SidebarToggle::new(Arc::downgrade(window), &config.sidebar_selector);
        Self {
            config,
            theme,
            sidebar,
        }
    }
}

impl<H: StyleHost, L: SourceLoader, C: StyleCompiler> Injector<H, L, C> {
    /// Replace the source loader.
    #[must_use]
    pub fn with_loader<L2: SourceLoader>(self, loader: L2) -> Injector<H, L2, C> {
        Injector {
            config: self.config,
            theme: self.theme.with_loader(loader),
            sidebar: self.sidebar,
        }
    }

    /// Replace the compiler.
    #[must_use]
    pub fn with_compiler<C2: StyleCompiler>(self, compiler: C2) -> Injector<H, L, C2> {
        Injector {
            config: self.config,
            theme: self.theme.with_compiler(compiler),
            sidebar: self.sidebar,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Theme stylesheet owner.
    #[must_use]
    pub const fn theme(&self) -> &ThemeController<H, L, C> {
        &self.theme
    }

    /// Sidebar hide-rule owner.
    #[must_use]
    pub const fn sidebar(&self) -> &SidebarToggle<H> {
        &self.sidebar
    }

    /// Split into the two independently owned surfaces.
    #[must_use]
    pub fn into_parts(self) -> (ThemeController<H, L, C>, SidebarToggle<H>) {
        (self.theme, self.sidebar)
    }

    /// What: Apply a theme by name.
    ///
    /// # Errors
    /// - See [`ThemeController::apply_theme`].
    pub async fn apply_theme(
        &mut self,
        theme: impl Into<ThemeId>,
    ) -> Result<ApplyOutcome, ThemeError> {
        self.theme.apply_theme(&theme.into()).await
    }

    /// Show or hide the sidebar; see [`SidebarToggle::set_hidden`].
    pub async fn set_sidebar_hidden(&mut self, hidden: bool) -> SidebarOutcome {
        self.sidebar.set_hidden(hidden).await
    }

    /// Themes offered to the user, reserved theme first.
    #[must_use]
    pub fn available_themes(&self) -> Vec<ThemeId> {
        self.theme.paths().available_themes(self.theme.reserved())
    }

    /// What: Apply the startup state from the config.
    ///
    /// Output:
    /// - None; failures are logged by the surfaces and leave the window unthemed.
    ///
    /// Details:
    /// - Hides the sidebar when `hide_sidebar` is set, then applies `initial_theme` if any.
    pub async fn apply_startup(&mut self) {
        if self.config.hide_sidebar {
            self.sidebar.set_hidden(true).await;
        }
        if let Some(theme) = self.config.initial_theme.clone() {
            info!(theme = %theme, "[Injector] applying startup theme");
            let _ = self.theme.apply_theme(&theme).await;
        }
    }
}
