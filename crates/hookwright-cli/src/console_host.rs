//! A host that prints plugin calls as JSON lines.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use hookwright_core::{HostClient, HostError, HostResult, PromptPart, Toast};

#[derive(Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
enum HostCall<'a> {
    Toast(&'a Toast),
    AppendPrompt {
        text: &'a str,
    },
    SendPrompt {
        session_id: &'a str,
        parts: &'a [PromptPart],
    },
}

/// Writes one JSON object per host call to `out`.
pub(crate) struct ConsoleHost<W> {
    out: Mutex<W>,
}

impl ConsoleHost<std::io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleHost<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn emit(&self, call: &HostCall<'_>) -> HostResult<()> {
        let line = serde_json::to_string(call)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| HostError::Unavailable("console output lock poisoned".into()))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> HostClient for ConsoleHost<W> {
    async fn toast(&self, toast: Toast) -> HostResult<()> {
        self.emit(&HostCall::Toast(&toast))
    }

    async fn append_prompt(&self, text: &str) -> HostResult<()> {
        self.emit(&HostCall::AppendPrompt { text })
    }

    async fn send_prompt(&self, session_id: &str, parts: Vec<PromptPart>) -> HostResult<()> {
        self.emit(&HostCall::SendPrompt {
            session_id,
            parts: &parts,
        })
    }
}
