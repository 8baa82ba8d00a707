use std::fmt;

/// Name of a theme as selected by the surrounding application.
///
/// The identifier doubles as the file stem of the theme source inside the
/// themes directory (`<id>.scss`). One value is reserved to mean "no theme
/// override"; see [`ThemeId::is_reserved`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThemeId(String);

impl ThemeId {
    /// Identifier the application ships as its "no override" theme.
    pub const DEFAULT: &'static str = "default";

    /// What: Build an identifier from any string-like name.
    ///
    /// Inputs:
    /// - `name`: Theme name, surrounding whitespace is trimmed.
    ///
    /// Output:
    /// - New `ThemeId`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self(name.trim().to_string())
    }

    /// Borrow the identifier as a plain string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier equals the reserved "no override" value `reserved`.
    #[must_use]
    pub fn is_reserved(&self, reserved: &Self) -> bool {
        self == reserved
    }

    /// What: Check whether the identifier can be used as a file stem.
    ///
    /// Output:
    /// - `true` when the name is non-empty and cannot escape the themes directory.
    ///
    /// Details:
    /// - Rejects path separators and leading dots (which also covers `..`).
    #[must_use]
    pub fn is_valid_file_stem(&self) -> bool {
        !self.0.is_empty()
            && !self.0.starts_with('.')
            && !self.0.contains(['/', '\\'])
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ThemeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// One of the two shared fragments every theme may pull in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partial {
    /// Variables and placeholder selectors shared by all themes.
    Base,
    /// Concrete selectors mapping the host page's elements onto placeholders.
    Mappings,
}

impl Partial {
    /// Both partials, in the order they are inlined.
    pub const ALL: [Self; 2] = [Self::Base, Self::Mappings];

    /// File stem of the partial inside the themes directory.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Mappings => "mappings",
        }
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque token for one stylesheet inserted into the host window.
///
/// Keys are handed out by [`crate::StyleHost::insert_css`] and are unique
/// per call; the only thing a holder can do with one is give it back to
/// [`crate::StyleHost::remove_inserted_css`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    /// Wrap a host-provided key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key as the host reported it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful theme application request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The reserved theme was requested; any active stylesheet was removed.
    Cleared,
    /// The theme stylesheet is now injected and tracked.
    Applied,
    /// The stylesheet was built but the window went away before it could be tracked.
    Discarded,
}

/// Result of a sidebar visibility request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarOutcome {
    /// No window is attached; nothing happened.
    NoWindow,
    /// The hide rule is now injected and tracked.
    Hidden,
    /// The hide rule was removed.
    Shown,
    /// The sidebar already was in the requested state.
    Unchanged,
    /// The hide rule could not be tracked because the window went away.
    Discarded,
}
