//! Runtime configuration for the `dhis2` binary.
//!
//! Configuration is resolved once in `main` and then passed into command handlers, so nothing
//! below the entry point reads process-wide environment variables.

use dhis2::{Dhis2Error, Dhis2Result};

/// Default tracing directive when `DHIS2_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVE: &str = "dhis2=info";

/// Configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pretty_json: bool,
    log_directive: String,
}

impl RunConfig {
    /// Create a new `RunConfig`.
    pub fn new(pretty_json: bool, log_directive: String) -> Dhis2Result<Self> {
        if log_directive.trim().is_empty() {
            return Err(Dhis2Error::InvalidInput(
                "log directive cannot be empty".into(),
            ));
        }

        Ok(Self {
            pretty_json,
            log_directive,
        })
    }

    pub fn pretty_json(&self) -> bool {
        self.pretty_json
    }

    pub fn log_directive(&self) -> &str {
        &self.log_directive
    }

    /// Returns a copy with pretty output forced on, as requested by `--pretty`.
    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = self.pretty_json || pretty_json;
        self
    }
}

/// Parse the pretty-output flag from an optional string value.
///
/// `None` or empty/whitespace means compact output.
pub fn pretty_json_from_env_value(value: Option<String>) -> Dhis2Result<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("0" | "false" | "no") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some(other) => Err(Dhis2Error::InvalidInput(format!(
            "DHIS2_PRETTY_JSON must be one of 1/0, true/false, yes/no; got '{other}'"
        ))),
    }
}

/// Resolve the tracing directive from an optional string value.
pub fn log_directive_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_defaults_to_compact() {
        assert!(!pretty_json_from_env_value(None).expect("default"));
        assert!(!pretty_json_from_env_value(Some("  ".into())).expect("blank"));
    }

    #[test]
    fn pretty_json_accepts_truthy_values() {
        for value in ["1", "true", "YES", " True "] {
            assert!(pretty_json_from_env_value(Some(value.into())).expect("truthy"));
        }
        for value in ["0", "false", "no"] {
            assert!(!pretty_json_from_env_value(Some(value.into())).expect("falsy"));
        }
    }

    #[test]
    fn pretty_json_rejects_unknown_values() {
        let err = pretty_json_from_env_value(Some("maybe".into())).expect_err("should reject");
        match err {
            Dhis2Error::InvalidInput(msg) => assert!(msg.contains("maybe")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn log_directive_falls_back_to_default() {
        assert_eq!(log_directive_from_env_value(None), DEFAULT_LOG_DIRECTIVE);
        assert_eq!(log_directive_from_env_value(Some("".into())), DEFAULT_LOG_DIRECTIVE);
        assert_eq!(
            log_directive_from_env_value(Some("dhis2=debug".into())),
            "dhis2=debug"
        );
    }

    #[test]
    fn rejects_empty_log_directive() {
        assert!(RunConfig::new(false, " ".into()).is_err());
    }

    #[test]
    fn pretty_flag_overrides_environment() {
        let config = RunConfig::new(false, DEFAULT_LOG_DIRECTIVE.into()).expect("config");
        assert!(!config.pretty_json());
        assert!(config.clone().with_pretty_json(true).pretty_json());
        assert!(!config.with_pretty_json(false).pretty_json());
    }
}
