use std::io;
use std::path::Path;

/// Read access to theme and partial sources.
///
/// Every call goes to the backing store; implementations must not cache, so
/// edits to a partial are picked up by the next resolution.
pub trait SourceLoader: Send + Sync {
    /// What: Read the full text of a source file.
    ///
    /// Inputs:
    /// - `path`: File inside the themes directory.
    ///
    /// Output:
    /// - File contents, or the I/O error (typically `NotFound`).
    ///
    /// # Errors
    /// - Returns the underlying I/O error when the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Loader backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
