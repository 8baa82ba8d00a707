//! Host window, loader and compiler stand-ins built on the public traits.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use css_injector::theme::{SourceLoader, StyleCompiler};
use css_injector::{CompileError, HostError, StyleHost, StyleKey};

/// Calls seen by a [`RecordingHost`].
#[derive(Debug, Default)]
pub struct HostLog {
    /// Insertions in call order, with their keys.
    pub inserted: Vec<(StyleKey, String)>,
    /// Removals in call order.
    pub removed: Vec<StyleKey>,
}

impl HostLog {
    /// Keys inserted and not yet removed.
    pub fn live(&self) -> Vec<StyleKey> {
        self.inserted
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !self.removed.contains(key))
            .cloned()
            .collect()
    }

    /// How many times `key` was removed.
    pub fn removal_count(&self, key: &StyleKey) -> usize {
        self.removed.iter().filter(|k| *k == key).count()
    }

    /// CSS text inserted under `key`.
    pub fn css_for(&self, key: &StyleKey) -> Option<&str> {
        self.inserted
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, css)| css.as_str())
    }
}

/// Window double minting `win-<n>` keys.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_key: AtomicUsize,
    delay: Option<Duration>,
    log: Mutex<HostLog>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertions complete after `delay`.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn log(&self) -> MutexGuard<'_, HostLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StyleHost for RecordingHost {
    async fn insert_css(&self, css: String) -> Result<StyleKey, HostError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let n = self.next_key.fetch_add(1, Ordering::SeqCst);
        let key = StyleKey::new(format!("win-{n}"));
        self.log().inserted.push((key.clone(), css));
        Ok(key)
    }

    fn remove_inserted_css(&self, key: &StyleKey) {
        self.log().removed.push(key.clone());
    }
}

/// Loader with no files that counts how often it is asked.
#[derive(Debug, Default)]
pub struct EmptyLoader {
    reads: AtomicUsize,
}

impl EmptyLoader {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SourceLoader for EmptyLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            path.display().to_string(),
        ))
    }
}

/// Compiler wrapper counting invocations.
#[derive(Debug, Default)]
pub struct CountingCompiler<C> {
    inner: C,
    calls: AtomicUsize,
}

impl<C> CountingCompiler<C> {
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<C: StyleCompiler> StyleCompiler for CountingCompiler<C> {
    fn compile(&self, source: &str, load_paths: &[PathBuf]) -> Result<String, CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(source, load_paths)
    }
}
