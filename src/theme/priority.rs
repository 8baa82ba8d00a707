/// Marker appended to every declaration so theme rules beat the host page's own.
pub const FORCED_PRIORITY: &str = " !important";

/// What: Give every declaration in compiled CSS forced priority.
///
/// Inputs:
/// - `css`: Compiler output.
///
/// Output:
/// - Same CSS with each `;` rewritten to ` !important;`.
///
/// Details:
/// - Purely textual; the number of markers added equals the number of `;` in `css`.
#[must_use]
pub fn force_priority(css: &str) -> String {
    css.replace(';', &format!("{FORCED_PRIORITY};"))
}
