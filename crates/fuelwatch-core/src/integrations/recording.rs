//! In-memory notifier for previews and tests.

use std::sync::Mutex;

use crate::error::NotifyError;
use crate::integrations::traits::Notifier;

/// Keeps every message instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` messages, then answer every send with HTTP 500.
    pub fn failing_after(count: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail_after: Some(count),
        }
    }

    /// Messages received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&self, text: &str) -> Result<(), NotifyError> {
        let mut messages = self.messages.lock().map_err(|_| NotifyError::Http {
            status: 500,
            body: "recording notifier poisoned".into(),
        })?;
        if self.fail_after.is_some_and(|limit| messages.len() >= limit) {
            return Err(NotifyError::Http {
                status: 500,
                body: "simulated failure".into(),
            });
        }
        messages.push(text.to_string());
        Ok(())
    }
}
