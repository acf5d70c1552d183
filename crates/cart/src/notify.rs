//! User-facing notifications.

/// Tracing target used by [`TracingNotifier`].
pub const NOTICE_TARGET: &str = "rocket_shoes_cart::notice";

/// Fire-and-forget sink for messages shown to the shopper.
pub trait Notifier {
    /// Display `message` to the user.
    fn display(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn display(&self, message: &str) {
        (**self).display(message);
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn display(&self, message: &str) {
        (**self).display(message);
    }
}

/// Notifier that emits each message as a `warn` event.
///
/// With the CLI's subscriber installed this is what the user sees on stderr.
/// The CLI keeps [`NOTICE_TARGET`] enabled at `warn` whatever `RUST_LOG` says.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn display(&self, message: &str) {
        tracing::warn!(target: NOTICE_TARGET, "{message}");
    }
}
