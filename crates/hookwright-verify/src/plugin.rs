//! The verify-on-idle plugin.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use hookwright_config::{FailureDelivery, VerifySection};
use hookwright_core::{
    HookName, HostClient, HostEvent, Plugin, PluginId, PluginInput, PluginResult, Project,
    PromptPart, Toast, ToastVariant,
};

use crate::outcome::{VerifyOutcome, failure_prompt};
use crate::runner::{VerifyCommand, run_verification};

/// Environment variable carrying the idle session's ID into the command.
pub const SESSION_ENV: &str = "HOOKWRIGHT_SESSION_ID";
/// Environment variable carrying the worktree path into the command.
pub const WORKTREE_ENV: &str = "HOOKWRIGHT_WORKTREE";

const HOOKS: &[HookName] = &[HookName::Event];

/// Runs the configured verification command whenever a session goes idle
/// and feeds failures back into the conversation.
///
/// There is no concurrency guard: two idle events in quick succession run
/// two overlapping verifications.
pub struct VerifyPlugin {
    id: PluginId,
    client: Arc<dyn HostClient>,
    project: Project,
    section: VerifySection,
}

impl VerifyPlugin {
    /// Stable plugin ID.
    pub const ID: &'static str = "auto-verify";

    /// Create the plugin from host input and its config section.
    #[must_use]
    pub fn new(input: PluginInput, section: VerifySection) -> Self {
        Self {
            id: PluginId::from_static(Self::ID),
            client: input.client,
            project: input.project,
            section,
        }
    }

    /// Run one verification for `session_id` and report it to the host.
    pub async fn verify(&self, session_id: &str) -> VerifyOutcome {
        if self.section.notify {
            self.toast(Toast::new(
                "Verifying",
                "Running verification checks...",
                ToastVariant::Info,
                self.section.info_duration_ms,
            ))
            .await;
        }

        let command = VerifyCommand::from_section(&self.section, &self.project.worktree)
            .with_env(SESSION_ENV, session_id)
            .with_env(WORKTREE_ENV, self.project.worktree.display().to_string());
        let outcome = run_verification(&command).await;

        match outcome.failure_output() {
            None => {
                if self.section.notify {
                    self.toast(Toast::new(
                        "Verification Passed",
                        "All checks passed ✓",
                        ToastVariant::Success,
                        self.section.info_duration_ms,
                    ))
                    .await;
                }
            },
            Some(output) => {
                if self.section.notify {
                    self.toast(Toast::new(
                        "Verification Failed",
                        "Tests failed - check conversation",
                        ToastVariant::Error,
                        self.section.error_duration_ms,
                    ))
                    .await;
                }
                self.deliver(session_id, &failure_prompt(&output)).await;
            },
        }

        outcome
    }

    async fn toast(&self, toast: Toast) {
        if let Err(e) = self.client.toast(toast).await {
            warn!(plugin_id = %self.id, error = %e, "Failed to show toast");
        }
    }

    async fn deliver(&self, session_id: &str, text: &str) {
        let result = match self.section.delivery {
            FailureDelivery::SendPrompt => {
                self.client
                    .send_prompt(session_id, vec![PromptPart::text(text)])
                    .await
            },
            FailureDelivery::AppendPrompt => self.client.append_prompt(text).await,
        };
        if let Err(e) = result {
            warn!(
                plugin_id = %self.id,
                delivery = %self.section.delivery,
                error = %e,
                "Failed to deliver verification failure"
            );
        }
    }
}

impl std::fmt::Debug for VerifyPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyPlugin")
            .field("id", &self.id)
            .field("project", &self.project)
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Plugin for VerifyPlugin {
    fn id(&self) -> &PluginId {
        &self.id
    }

    fn hooks(&self) -> &[HookName] {
        HOOKS
    }

    async fn on_event(&self, event: &HostEvent) -> PluginResult<()> {
        let HostEvent::SessionIdle { session } = event else {
            debug!(plugin_id = %self.id, event = event.kind(), "Ignoring event");
            return Ok(());
        };
        self.verify(&session.id).await;
        Ok(())
    }
}
