use std::fmt;
use std::path::PathBuf;

/// Failure reported by the stylesheet compiler.
///
/// The message is kept as text; nothing in the injector interprets it beyond
/// logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError(pub String);

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stylesheet compilation failed: {}", self.0)
    }
}

impl std::error::Error for CompileError {}

/// Failure reported by the host window while inserting a stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The window was torn down before the insertion completed.
    WindowClosed,
    /// The window refused the stylesheet.
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowClosed => f.write_str("window closed before the stylesheet was inserted"),
            Self::Rejected(msg) => write!(f, "window rejected stylesheet: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Errors that abort a theme application.
#[derive(Debug)]
pub enum ThemeError {
    /// The theme name cannot be mapped onto a file in the themes directory.
    InvalidName(String),
    /// A theme or partial file could not be read.
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The combined source did not compile.
    Compile(CompileError),
    /// The host window refused the compiled stylesheet.
    Inject(HostError),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "invalid theme name {name:?}"),
            Self::Read { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            Self::Compile(err) => write!(f, "{err}"),
            Self::Inject(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Compile(err) => Some(err),
            Self::Inject(err) => Some(err),
            Self::InvalidName(_) => None,
        }
    }
}

impl From<CompileError> for ThemeError {
    fn from(value: CompileError) -> Self {
        Self::Compile(value)
    }
}

impl From<HostError> for ThemeError {
    fn from(value: HostError) -> Self {
        Self::Inject(value)
    }
}

impl ThemeError {
    /// Whether the failure came from a file that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
