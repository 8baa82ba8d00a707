//! Boundary to the host window's runtime style-injection API.

use std::future::Future;

use crate::theme::{HostError, StyleKey};

/// A window that accepts stylesheets at runtime.
///
/// The injector never owns the window; it keeps a `Weak` reference and
/// treats a dropped window as "no window".
pub trait StyleHost: Send + Sync {
    /// What: Insert a stylesheet into the window's page.
    ///
    /// Inputs:
    /// - `css`: Plain CSS text.
    ///
    /// Output:
    /// - Future resolving to a key unique to this insertion.
    ///
    /// # Errors
    /// - `HostError::WindowClosed` when the window goes away before completion.
    /// - `HostError::Rejected` when the window refuses the stylesheet.
    fn insert_css(&self, css: String)
    -> impl Future<Output = Result<StyleKey, HostError>> + Send;

    /// Remove a stylesheet previously returned by [`StyleHost::insert_css`].
    fn remove_inserted_css(&self, key: &StyleKey);
}
