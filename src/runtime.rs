//! Background workers that serialize requests per surface.
//!
//! The application fires theme and sidebar requests from its event loop
//! without waiting. Each surface gets its own worker draining an unbounded
//! queue in order, so at most one insertion is in flight per surface and the
//! key that ends up tracked always belongs to the most recent request.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::host::StyleHost;
use crate::injector::Injector;
use crate::sidebar::SidebarToggle;
use crate::theme::{
    ApplyOutcome, SidebarOutcome, SourceLoader, StyleCompiler, ThemeController, ThemeError,
    ThemeId,
};

/// A queued theme change.
struct ThemeRequest {
    /// Theme to apply.
    theme: ThemeId,
    /// Where to report the outcome; may be dropped by the caller.
    reply: oneshot::Sender<Result<ApplyOutcome, ThemeError>>,
}

/// A queued sidebar change.
struct SidebarRequest {
    /// Requested visibility.
    hidden: bool,
    /// Where to report the outcome; may be dropped by the caller.
    reply: oneshot::Sender<SidebarOutcome>,
}

/// Cheap, clonable front end to the running workers.
///
/// Dropping every clone closes both queues; the workers finish what is
/// queued and exit.
#[derive(Clone)]
pub struct InjectorHandle {
    /// Queue of the theme worker.
    theme_tx: mpsc::UnboundedSender<ThemeRequest>,
    /// Queue of the sidebar worker.
    sidebar_tx: mpsc::UnboundedSender<SidebarRequest>,
}

impl InjectorHandle {
    /// What: Queue a theme change.
    ///
    /// Inputs:
    /// - `theme`: Theme name; the reserved name clears the override.
    ///
    /// Output:
    /// - Receiver for the outcome. Drop it for fire-and-forget use; it errors if the worker is gone.
    #[must_use]
    pub fn apply_theme(
        &self,
        theme: impl Into<ThemeId>,
    ) -> oneshot::Receiver<Result<ApplyOutcome, ThemeError>> {
        let (reply, rx) = oneshot::channel();
        let theme = theme.into();
        if self.theme_tx.send(ThemeRequest { theme, reply }).is_err() {
            warn!("[Runtime] theme worker stopped, request dropped");
        }
        rx
    }

    /// What: Queue a sidebar visibility change.
    ///
    /// Inputs:
    /// - `hidden`: Requested visibility.
    ///
    /// Output:
    /// - Receiver for the outcome, with the same semantics as [`InjectorHandle::apply_theme`].
    #[must_use]
    pub fn set_sidebar_hidden(&self, hidden: bool) -> oneshot::Receiver<SidebarOutcome> {
        let (reply, rx) = oneshot::channel();
        if self.sidebar_tx.send(SidebarRequest { hidden, reply }).is_err() {
            warn!("[Runtime] sidebar worker stopped, request dropped");
        }
        rx
    }
}

/// Drain theme requests one at a time.
async fn theme_worker<H, L, C>(
    mut controller: ThemeController<H, L, C>,
    mut rx: mpsc::UnboundedReceiver<ThemeRequest>,
) where
    H: StyleHost,
    L: SourceLoader,
    C: StyleCompiler,
{
    while let Some(req) = rx.recv().await {
        let result = controller.apply_theme(&req.theme).await;
        let _ = req.reply.send(result);
    }
    debug!("[Runtime] theme worker exited");
}

/// Drain sidebar requests one at a time.
async fn sidebar_worker<H: StyleHost>(
    mut toggle: SidebarToggle<H>,
    mut rx: mpsc::UnboundedReceiver<SidebarRequest>,
) {
    while let Some(req) = rx.recv().await {
        let outcome = toggle.set_hidden(req.hidden).await;
        let _ = req.reply.send(outcome);
    }
    debug!("[Runtime] sidebar worker exited");
}

/// What: Move `injector` onto two background workers.
///
/// Inputs:
/// - `injector`: Fully configured injector.
///
/// Output:
/// - Handle used to queue requests.
///
/// # Panics
/// - When called outside a Tokio runtime.
#[must_use]
pub fn spawn<H, L, C>(injector: Injector<H, L, C>) -> InjectorHandle
where
    H: StyleHost + 'static,
    L: SourceLoader + 'static,
    C: StyleCompiler + 'static,
{
    let (controller, toggle) = injector.into_parts();
    let (theme_tx, theme_rx) = mpsc::unbounded_channel();
    let (sidebar_tx, sidebar_rx) = mpsc::unbounded_channel();
    tokio::spawn(theme_worker(controller, theme_rx));
    tokio::spawn(sidebar_worker(toggle, sidebar_rx));
    InjectorHandle {
        theme_tx,
        sidebar_tx,
    }
}
