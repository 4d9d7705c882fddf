//! CLI error handling

use std::fmt;

use extbuild_builder::exit_code_for;
use extbuild_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Error reported by the hook, driver, or configuration layer
    Ops(extbuild_errors::Error),
    /// I/O error while rendering output
    Io(std::io::Error),
}

impl CliError {
    /// Status the process exits with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Ops(e) => exit_code_for(e),
            CliError::Io(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<extbuild_errors::Error> for CliError {
    fn from(e: extbuild_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extbuild_errors::{BuildError, ConfigError};

    #[test]
    fn test_step_failure_exits_minus_one() {
        let err = CliError::from(extbuild_errors::Error::from(BuildError::step_exited(
            "make compiler",
            Some(2),
        )));
        assert_eq!(err.exit_code(), -1);
        let rendered = err.to_string();
        assert!(rendered.contains("make compiler"));
        assert!(rendered.contains("Code: build.step_failed"));
    }

    #[test]
    fn test_other_errors_exit_one() {
        let err = CliError::from(extbuild_errors::Error::from(ConfigError::ParseError {
            message: "expected `]`".into(),
        }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Hint:"));
    }
}
