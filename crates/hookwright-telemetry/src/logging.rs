//! Subscriber construction.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TelemetryError, TelemetryResult};

/// Line format of emitted events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, for reading in a terminal.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Where events are written. Never stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// `{dir}/{prefix}.YYYY-MM-DD`, rotated daily.
    File {
        /// Directory holding the log files.
        dir: PathBuf,
        /// File name prefix.
        prefix: String,
    },
}

/// How to set up logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Base level (`trace`..`error`) or any `EnvFilter` expression.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Output target.
    pub target: LogTarget,
    /// Include source file and line.
    pub source_location: bool,
    /// Emit ANSI colour codes.
    pub ansi: bool,
    /// Extra per-target directives such as `hookwright_verify=trace`.
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    /// Compact output to stderr at `level`.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            source_location: false,
            ansi: true,
            directives: Vec::new(),
        }
    }

    /// Set the line format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to daily-rotated `hookwright.*` files in `dir`. Turns colour off.
    #[must_use]
    pub fn with_file_logging(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target = LogTarget::File {
            dir: dir.into(),
            prefix: "hookwright".to_string(),
        };
        self.ansi = false;
        self
    }

    /// Add a per-target directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Include source file and line in each event.
    #[must_use]
    pub fn with_source_location(mut self) -> Self {
        self.source_location = true;
        self
    }

    /// Turn colour off.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn env_filter(&self) -> TelemetryResult<EnvFilter> {
        let invalid = |filter: &str, e: &dyn std::fmt::Display| TelemetryError::InvalidFilter {
            filter: filter.to_string(),
            message: e.to_string(),
        };

        let mut filter = EnvFilter::try_new(&self.level).map_err(|e| invalid(&self.level, &e))?;
        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| invalid(directive, &e),
            )?);
        }
        Ok(filter)
    }
}

#[cfg(feature = "config")]
impl From<&hookwright_config::LoggingSection> for LogConfig {
    fn from(section: &hookwright_config::LoggingSection) -> Self {
        // The config crate has already validated the format name
        let format = section.format.parse().unwrap_or_default();
        let mut config = Self::new(section.level.clone()).with_format(format);
        config.directives.clone_from(&section.directives);
        match &section.directory {
            Some(dir) => config.with_file_logging(dir.clone()),
            None => config,
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails on an invalid level or directive, an uncreatable log directory, or
/// when a global subscriber has already been installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.env_filter()?;

    match &config.target {
        LogTarget::Stderr => install(config, filter, std::io::stderr),
        LogTarget::File { dir, prefix } => {
            std::fs::create_dir_all(dir).map_err(|source| TelemetryError::LogDirectory {
                path: dir.clone(),
                source,
            })?;
            install(
                config,
                filter,
                RollingFileAppender::new(Rotation::DAILY, dir, prefix),
            )
        },
    }
}

fn install<W>(config: &LogConfig, filter: EnvFilter, writer: W) -> TelemetryResult<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_file(config.source_location)
        .with_line_number(config.source_location);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
    installed.map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_go_to_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.ansi);
        assert!(!config.source_location);
    }

    #[test]
    fn test_builder_chain() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .with_source_location()
            .with_directive("hookwright_verify=trace")
            .without_ansi();

        assert_eq!(config.format, LogFormat::Json);
        assert!(config.source_location);
        assert!(!config.ansi);
        assert_eq!(config.directives, vec!["hookwright_verify=trace"]);
    }

    #[test]
    fn test_file_target() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::new("info").with_file_logging(dir.path());
        assert_eq!(
            config.target,
            LogTarget::File {
                dir: dir.path().to_path_buf(),
                prefix: "hookwright".into(),
            }
        );
        assert!(!config.ansi);
    }

    #[test]
    fn test_format_names() {
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_filter_validation() {
        assert!(
            LogConfig::new("warn")
                .with_directive("hookwright_optimizer=debug")
                .env_filter()
                .is_ok()
        );

        let err = LogConfig::new("debug")
            .with_directive("[unclosed=trace")
            .env_filter()
            .unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { ref filter, .. } if filter == "[unclosed=trace"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_logging_section() {
        let section = hookwright_config::LoggingSection {
            level: "warn".into(),
            format: "json".into(),
            directives: vec!["hookwright_core=debug".into()],
            directory: None,
        };
        let config = LogConfig::from(&section);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target, LogTarget::Stderr);
        assert_eq!(config.directives, section.directives);
    }
}
