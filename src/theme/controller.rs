use std::path::PathBuf;
use std::sync::Weak;

use tracing::{debug, error, info, warn};

use crate::host::StyleHost;
use crate::theme::compile::{GrassCompiler, StyleCompiler};
use crate::theme::error::{HostError, ThemeError};
use crate::theme::imports::ImportResolver;
use crate::theme::paths::ThemePaths;
use crate::theme::priority::force_priority;
use crate::theme::source::{FsLoader, SourceLoader};
use crate::theme::types::{ApplyOutcome, StyleKey, ThemeId};

/// Owner of the single theme stylesheet injected into a window.
///
/// State transitions of the tracked key:
/// - `None -> Some(k)` when a theme is injected;
/// - `Some(k) -> None` on every `apply_theme` call before anything else
///   happens, so a failed apply leaves the window without a theme;
/// - `Some(k)` is never overwritten without `k` being removed first.
pub struct ThemeController<H, L = FsLoader, C = GrassCompiler> {
    /// Target window; dropped windows are treated as absent.
    window: Weak<H>,
    /// Themes directory layout.
    paths: ThemePaths,
    /// The "no override" theme.
    reserved: ThemeId,
    /// Reads theme and partial sources.
    loader: L,
    /// Turns resolved SCSS into CSS.
    compiler: C,
    /// Key of the stylesheet currently injected, if any.
    active: Option<StyleKey>,
}

impl<H: StyleHost> ThemeController<H> {
    /// What: Create a controller reading from disk and compiling with `grass`.
    ///
    /// Inputs:
    /// - `window`: Weak reference to the target window.
    /// - `paths`: Themes directory.
    ///
    /// Output:
    /// - Controller with no active theme and `default` as the reserved theme.
    #[must_use]
    pub fn new(window: Weak<H>, paths: ThemePaths) -> Self {
        Self {
            window,
            paths,
            reserved: ThemeId::default(),
            loader: FsLoader,
            compiler: GrassCompiler,
            active: None,
        }
    }
}

impl<H: StyleHost, L: SourceLoader, C: StyleCompiler> ThemeController<H, L, C> {
    /// Replace the source loader.
    #[must_use]
    pub fn with_loader<L2: SourceLoader>(self, loader: L2) -> ThemeController<H, L2, C> {
        ThemeController {
            window: self.window,
            paths: self.paths,
            reserved: self.reserved,
            loader,
            compiler: self.compiler,
            active: self.active,
        }
    }

    /// Replace the compiler.
    #[must_use]
    pub fn with_compiler<C2: StyleCompiler>(self, compiler: C2) -> ThemeController<H, L, C2> {
        ThemeController {
            window: self.window,
            paths: self.paths,
            reserved: self.reserved,
            loader: self.loader,
            compiler,
            active: self.active,
        }
    }

    /// Use `reserved` as the "no override" theme.
    #[must_use]
    pub fn with_reserved(mut self, reserved: ThemeId) -> Self {
        self.reserved = reserved;
        self
    }

    /// Key of the theme stylesheet currently injected.
    #[must_use]
    pub const fn active_key(&self) -> Option<&StyleKey> {
        self.active.as_ref()
    }

    /// The "no override" theme.
    #[must_use]
    pub const fn reserved(&self) -> &ThemeId {
        &self.reserved
    }

    /// Themes directory this controller reads from.
    #[must_use]
    pub const fn paths(&self) -> &ThemePaths {
        &self.paths
    }

    /// Source loader in use.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Compiler in use.
    #[must_use]
    pub const fn compiler(&self) -> &C {
        &self.compiler
    }

    /// What: Remove the tracked stylesheet, if any, and forget its key.
    ///
    /// Output:
    /// - `true` when a key was tracked.
    ///
    /// Details:
    /// - If the window is already gone its stylesheets went with it; the key is just dropped.
    fn revoke_active(&mut self) -> bool {
        let Some(key) = self.active.take() else {
            return false;
        };
        if let Some(window) = self.window.upgrade() {
            window.remove_inserted_css(&key);
            debug!(key = %key, "[Theme] removed theme stylesheet");
        }
        true
    }

    /// What: Build the injectable stylesheet for `theme` without touching the window.
    ///
    /// Inputs:
    /// - `theme`: Theme to load from the themes directory.
    ///
    /// Output:
    /// - CSS with partials inlined, compiled, and every declaration forced to `!important`.
    ///
    /// # Errors
    /// - `ThemeError::InvalidName` when `theme` cannot name a file.
    /// - `ThemeError::Read` when the theme or a partial cannot be read.
    /// - `ThemeError::Compile` when the combined source does not compile.
    pub fn render(&self, theme: &ThemeId) -> Result<String, ThemeError> {
        let path = self
            .paths
            .theme(theme)
            .ok_or_else(|| ThemeError::InvalidName(theme.to_string()))?;
        let source = self
            .loader
            .read(&path)
            .map_err(|source| ThemeError::Read { path, source })?;
        let resolved = ImportResolver::new(&self.loader, &self.paths).resolve(&source)?;
        let load_paths: [PathBuf; 1] = [self.paths.dir().to_path_buf()];
        let compiled = self.compiler.compile(&resolved, &load_paths)?;
        Ok(force_priority(&compiled))
    }

    /// What: Make `theme` the window's only theme stylesheet.
    ///
    /// Inputs:
    /// - `theme`: Theme to apply; the reserved theme removes any override.
    ///
    /// Output:
    /// - `Cleared` for the reserved theme, `Applied` once the new key is tracked,
    ///   `Discarded` when the window disappeared before the key could be tracked.
    ///
    /// # Errors
    /// - Any [`ThemeController::render`] error, or `ThemeError::Inject` when the window
    ///   refuses the stylesheet. The previous theme is already removed in every case.
    ///
    /// Details:
    /// - The reserved theme never reads files or runs the compiler.
    pub async fn apply_theme(&mut self, theme: &ThemeId) -> Result<ApplyOutcome, ThemeError> {
        self.revoke_active();
        if theme.is_reserved(&self.reserved) {
            info!(theme = %theme, "[Theme] reserved theme selected, no override injected");
            return Ok(ApplyOutcome::Cleared);
        }
        let css = match self.render(theme) {
            Ok(css) => css,
            Err(err) => {
                if err.is_not_found() {
                    warn!(theme = %theme, error = %err, "[Theme] could not find theme");
                } else {
                    error!(theme = %theme, error = %err, "[Theme] failed to build theme");
                }
                return Err(err);
            }
        };
        self.inject(theme, css).await
    }

    /// What: Insert `css` and track the returned key.
    ///
    /// Details:
    /// - The window is only borrowed for the duration of the insertion; if the
    ///   last strong reference is gone afterwards the key is not tracked.
    async fn inject(&mut self, theme: &ThemeId, css: String) -> Result<ApplyOutcome, ThemeError> {
        let Some(window) = self.window.upgrade() else {
            return Ok(ApplyOutcome::Discarded);
        };
        let bytes = css.len();
        let inserted = window.insert_css(css).await;
        drop(window);
        match inserted {
            Ok(key) if self.window.strong_count() > 0 => {
                info!(theme = %theme, key = %key, bytes, "[Theme] theme applied");
                self.active = Some(key);
                Ok(ApplyOutcome::Applied)
            }
            Ok(_) | Err(HostError::WindowClosed) => Ok(ApplyOutcome::Discarded),
            Err(err) => {
                error!(theme = %theme, error = %err, "[Theme] window rejected theme stylesheet");
                Err(err.into())
            }
        }
    }

    /// What: Remove the active theme stylesheet, if any.
    ///
    /// Output:
    /// - `true` when a stylesheet was tracked and has been revoked.
    pub fn clear(&mut self) -> bool {
        self.revoke_active()
    }
}
