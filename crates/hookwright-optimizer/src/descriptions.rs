//! The description lookup file and the derived system prompt.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OptimizerError, OptimizerResult};

/// Replacement text keyed by tool and parameter.
///
/// On disk this is JSON of the form:
///
/// ```json
/// {
///   "tools": { "bash": "Run a shell command." },
///   "parameters": { "bash.command": "The command." },
///   "systemPromptPrefix": "You are a careful engineer.\n"
/// }
/// ```
///
/// Tool keys are lowercase; parameter keys are `{lowercase tool}.{param}`
/// with the parameter name as the host sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Tool description overrides.
    pub tools: HashMap<String, String>,
    /// Parameter description overrides.
    pub parameters: HashMap<String, String>,
    /// Text placed before the markdown file in the system prompt.
    pub system_prompt_prefix: String,
}

impl OptimizerConfig {
    /// Read and parse the lookup file.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Read`] if the file cannot be read and
    /// [`OptimizerError::Parse`] if it is not valid.
    pub fn load(path: &Path) -> OptimizerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| OptimizerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| OptimizerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the lookup file, substituting an empty table on any failure.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                debug!(
                    path = %path.display(),
                    tools = config.tools.len(),
                    parameters = config.parameters.len(),
                    "Loaded tool description overrides"
                );
                config
            },
            Err(e) => {
                warn!(error = %e, "Using empty tool description overrides");
                Self::default()
            },
        }
    }

    /// Override for a tool's description.
    #[must_use]
    pub fn tool_description(&self, tool: &str) -> Option<&str> {
        self.tools.get(&tool.to_lowercase()).map(String::as_str)
    }

    /// Override for one of a tool's parameter descriptions.
    #[must_use]
    pub fn parameter_description(&self, tool: &str, param: &str) -> Option<&str> {
        self.parameters
            .get(&format!("{}.{param}", tool.to_lowercase()))
            .map(String::as_str)
    }
}

/// The system prompt: `prefix` followed verbatim by the markdown file.
///
/// A missing markdown file is expected and only logged at debug level.
#[must_use]
pub fn derive_system_prompt(prefix: &str, markdown: Option<&Path>) -> String {
    let mut prompt = prefix.to_string();
    let Some(path) = markdown else {
        return prompt;
    };

    match std::fs::read_to_string(path) {
        Ok(body) => prompt.push_str(&body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No system prompt markdown");
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read system prompt markdown");
        },
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_file() {
        let config: OptimizerConfig = serde_json::from_str(
            r#"{
                "tools": {"bash": "Run it."},
                "parameters": {"read.filePath": "Where."},
                "systemPromptPrefix": "Be brief."
            }"#,
        )
        .unwrap();

        assert_eq!(config.tool_description("Bash"), Some("Run it."));
        assert_eq!(config.parameter_description("READ", "filePath"), Some("Where."));
        assert_eq!(config.parameter_description("read", "filepath"), None);
        assert_eq!(config.system_prompt_prefix, "Be brief.");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: OptimizerConfig = serde_json::from_str(r#"{"tools": {}}"#).unwrap();
        assert_eq!(config, OptimizerConfig::default());
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.json");
        assert!(OptimizerConfig::load(&missing).unwrap_err().is_not_found());
        assert_eq!(OptimizerConfig::load_or_default(&missing), OptimizerConfig::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ tools: ").unwrap();
        let err = OptimizerConfig::load(&bad).unwrap_err();
        assert!(matches!(err, OptimizerError::Parse { .. }));
        assert_eq!(OptimizerConfig::load_or_default(&bad), OptimizerConfig::default());

        let wrong_shape = dir.path().join("shape.json");
        std::fs::write(&wrong_shape, r#"{"tools": ["bash"]}"#).unwrap();
        assert_eq!(
            OptimizerConfig::load_or_default(&wrong_shape),
            OptimizerConfig::default()
        );
    }

    #[test]
    fn test_derive_system_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let md = dir.path().join("system-prompt.md");

        assert_eq!(derive_system_prompt("P: ", None), "P: ");
        assert_eq!(derive_system_prompt("P: ", Some(&md)), "P: ");

        std::fs::write(&md, "# Rules\nNo yak shaving.\n").unwrap();
        assert_eq!(
            derive_system_prompt("P: ", Some(&md)),
            "P: # Rules\nNo yak shaving.\n"
        );
        assert_eq!(derive_system_prompt("", Some(&md)), "# Rules\nNo yak shaving.\n");
    }
}
