use std::path::PathBuf;

use crate::theme::error::CompileError;

/// The SCSS preprocessor, seen as a pure function.
pub trait StyleCompiler: Send + Sync {
    /// What: Compile SCSS source into CSS.
    ///
    /// Inputs:
    /// - `source`: Self-contained SCSS text.
    /// - `load_paths`: Extra directories searched for any `@use`/`@import` left in `source`.
    ///
    /// Output:
    /// - Compiled CSS text.
    ///
    /// # Errors
    /// - Returns `CompileError` carrying the compiler's message when `source` is invalid.
    fn compile(&self, source: &str, load_paths: &[PathBuf]) -> Result<String, CompileError>;
}

/// Compiler backed by `grass`, a pure-Rust Sass implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrassCompiler;

impl StyleCompiler for GrassCompiler {
    fn compile(&self, source: &str, load_paths: &[PathBuf]) -> Result<String, CompileError> {
        let options = grass::Options::default().load_paths(load_paths);
        grass::from_string(source.to_string(), &options).map_err(|e| CompileError(e.to_string()))
    }
}
