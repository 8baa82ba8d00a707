//! Inlining of the shared `base` and `mappings` partials.
//!
//! Sass modules scope variables per file and keep placeholder selectors from
//! crossing file boundaries, which is exactly what themes rely on. Instead of
//! letting the compiler load the partials, their text is pasted over every
//! `@use`/`@import` that names them, so the compiler sees one flat file.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::theme::error::ThemeError;
use crate::theme::paths::ThemePaths;
use crate::theme::source::SourceLoader;
use crate::theme::types::Partial;

/// Compiled reference patterns, one per partial.
static BASE_REF: OnceLock<Regex> = OnceLock::new();
/// See [`BASE_REF`].
static MAPPINGS_REF: OnceLock<Regex> = OnceLock::new();

/// What: Pattern matching a `@use`/`@import` of `partial`.
///
/// Inputs:
/// - `partial`: Which partial the reference must name.
///
/// Output:
/// - Shared compiled regex.
///
/// Details:
/// - Accepts either quote style, an optional `.scss` suffix, and an optional
///   terminating `;` after optional whitespace. Unquoted names do not match.
fn reference_pattern(partial: Partial) -> &'static Regex {
    let cell = match partial {
        Partial::Base => &BASE_REF,
        Partial::Mappings => &MAPPINGS_REF,
    };
    cell.get_or_init(|| {
        let pattern = format!(
            r#"@(?:use|import)\s+["']{}(?:\.scss)?["']\s*;?"#,
            regex::escape(partial.name())
        );
        // Fixed template plus an escaped literal; cannot fail.
        Regex::new(&pattern).expect("partial reference pattern is valid")
    })
}

/// Replace every reference to `partial` in `text` with `replacement`, verbatim.
fn substitute(text: &str, partial: Partial, replacement: &str) -> String {
    reference_pattern(partial)
        .replace_all(text, NoExpand(replacement))
        .into_owned()
}

/// What: Whether `text` still contains a reference to either partial.
///
/// Inputs:
/// - `text`: SCSS source.
///
/// Output:
/// - `true` if any recognised `base` or `mappings` reference remains.
#[must_use]
pub fn has_partial_reference(text: &str) -> bool {
    Partial::ALL
        .iter()
        .any(|p| reference_pattern(*p).is_match(text))
}

/// What: Inline the given partial texts into a theme source.
///
/// Inputs:
/// - `source`: Raw theme text.
/// - `base`: Full text of the `base` partial.
/// - `mappings`: Full text of the `mappings` partial.
///
/// Output:
/// - Source with no remaining `base`/`mappings` references.
///
/// Details:
/// - `base` is substituted first, then `mappings` over that result, so a
///   `mappings` reference brought in by `base` is expanded too.
/// - Whatever references survive (only possible from inside `mappings`) are
///   deleted in a final pass.
#[must_use]
pub fn inline_partials(source: &str, base: &str, mappings: &str) -> String {
    let with_base = substitute(source, Partial::Base, base);
    let with_mappings = substitute(&with_base, Partial::Mappings, mappings);
    Partial::ALL
        .iter()
        .fold(with_mappings, |text, partial| substitute(&text, *partial, ""))
}

/// Resolves partial references against the themes directory.
///
/// Partials are re-read on every call so edits are picked up without a restart.
pub struct ImportResolver<'a, L: SourceLoader> {
    /// Source of partial text.
    loader: &'a L,
    /// Where the partials live.
    paths: &'a ThemePaths,
}

impl<'a, L: SourceLoader> ImportResolver<'a, L> {
    /// Create a resolver reading partials from `paths` through `loader`.
    #[must_use]
    pub const fn new(loader: &'a L, paths: &'a ThemePaths) -> Self {
        Self { loader, paths }
    }

    /// What: Load one partial's text.
    ///
    /// # Errors
    /// - `ThemeError::Read` when the partial file cannot be read.
    fn load(&self, partial: Partial) -> Result<String, ThemeError> {
        let path = self.paths.partial(partial);
        self.loader
            .read(&path)
            .map_err(|source| ThemeError::Read { path, source })
    }

    /// What: Produce a self-contained theme source.
    ///
    /// Inputs:
    /// - `source`: Raw theme text.
    ///
    /// Output:
    /// - Theme text with both partials inlined; see [`inline_partials`].
    ///
    /// # Errors
    /// - `ThemeError::Read` when either partial cannot be read. Both are loaded
    ///   up front, even when the theme references neither.
    pub fn resolve(&self, source: &str) -> Result<String, ThemeError> {
        let base = self.load(Partial::Base)?;
        let mappings = self.load(Partial::Mappings)?;
        let resolved = inline_partials(source, &base, &mappings);
        tracing::debug!(
            source_bytes = source.len(),
            resolved_bytes = resolved.len(),
            "[Theme] inlined partials"
        );
        Ok(resolved)
    }
}
