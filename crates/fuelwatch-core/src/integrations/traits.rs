use crate::error::NotifyError;

/// Every message sink implements this trait.
/// Delivery is synchronous and one message per call; implementations
/// do not retry.
pub trait Notifier: Send + Sync {
    /// Short identifier used in logs (e.g. "discord").
    fn name(&self) -> &str;

    /// Deliver one message.
    fn send(&self, text: &str) -> Result<(), NotifyError>;
}
