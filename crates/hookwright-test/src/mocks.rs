//! Mock implementations for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use hookwright_core::{HostClient, HostError, HostResult, PromptPart, Toast};

/// A prompt captured by [`MockHost::send_prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPrompt {
    /// Target session.
    pub session_id: String,
    /// Parts sent.
    pub parts: Vec<PromptPart>,
}

impl SentPrompt {
    /// All text parts joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|PromptPart::Text { text }| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Mock implementation of [`HostClient`] that records every call.
///
/// Uses `std::sync::Mutex` internally so captured calls can be read from
/// sync test code without a runtime. Clones share the same capture buffers.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    toasts: Arc<Mutex<Vec<Toast>>>,
    appended: Arc<Mutex<Vec<String>>>,
    sent: Arc<Mutex<Vec<SentPrompt>>>,
    /// When set, every call is recorded and then rejected.
    reject_calls: bool,
}

impl MockHost {
    /// Create a new mock host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that records calls but returns an error from each of them.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            reject_calls: true,
            ..Self::default()
        }
    }

    /// Wrap a clone of this mock as a shared client.
    #[must_use]
    pub fn client(&self) -> Arc<dyn HostClient> {
        Arc::new(self.clone())
    }

    /// Captured toasts, in call order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Captured pending-input appends, in call order.
    #[must_use]
    pub fn appended_prompts(&self) -> Vec<String> {
        self.appended.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Captured session messages, in call order.
    #[must_use]
    pub fn sent_prompts(&self) -> Vec<SentPrompt> {
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Whether nothing at all reached the host.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.toasts().is_empty() && self.appended_prompts().is_empty() && self.sent_prompts().is_empty()
    }

    /// Clear all captured calls.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.toasts.lock() {
            guard.clear();
        }
        if let Ok(mut guard) = self.appended.lock() {
            guard.clear();
        }
        if let Ok(mut guard) = self.sent.lock() {
            guard.clear();
        }
    }

    fn outcome(&self, call: &'static str) -> HostResult<()> {
        if self.reject_calls {
            return Err(HostError::Rejected {
                call,
                message: "mock host rejects all calls".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HostClient for MockHost {
    async fn toast(&self, toast: Toast) -> HostResult<()> {
        if let Ok(mut guard) = self.toasts.lock() {
            guard.push(toast);
        }
        self.outcome("toast")
    }

    async fn append_prompt(&self, text: &str) -> HostResult<()> {
        if let Ok(mut guard) = self.appended.lock() {
            guard.push(text.to_string());
        }
        self.outcome("append_prompt")
    }

    async fn send_prompt(&self, session_id: &str, parts: Vec<PromptPart>) -> HostResult<()> {
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(SentPrompt {
                session_id: session_id.to_string(),
                parts,
            });
        }
        self.outcome("send_prompt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwright_core::ToastVariant;

    #[tokio::test]
    async fn test_mock_host_records_calls() {
        let host = MockHost::new();
        let client = host.client();

        client
            .toast(Toast::new("t", "m", ToastVariant::Info, 10))
            .await
            .unwrap();
        client.append_prompt("later").await.unwrap();
        client
            .send_prompt("ses_1", vec![PromptPart::text("now")])
            .await
            .unwrap();

        assert_eq!(host.toasts().len(), 1);
        assert_eq!(host.appended_prompts(), vec!["later".to_string()]);
        assert_eq!(host.sent_prompts()[0].session_id, "ses_1");
        assert_eq!(host.sent_prompts()[0].text(), "now");

        host.clear();
        assert!(host.is_silent());
    }

    #[tokio::test]
    async fn test_rejecting_host_still_records() {
        let host = MockHost::rejecting();
        let result = host.append_prompt("x").await;
        assert!(matches!(result, Err(HostError::Rejected { call: "append_prompt", .. })));
        assert_eq!(host.appended_prompts().len(), 1);
    }
}
