//! Integration tests for error types

#[cfg(test)]
mod tests {
    use extbuild_errors::*;

    #[test]
    fn test_error_conversion() {
        let build_err = BuildError::step_exited("make compiler", Some(2));
        let err: Error = build_err.into();
        assert!(matches!(err, Error::Build(_)));
        assert!(err.is_step_failure());
    }

    #[test]
    fn test_step_failed_display() {
        let err = BuildError::step_exited("make compiler-api", Some(1));
        assert_eq!(
            err.to_string(),
            "build step `make compiler-api` failed: exited with status 1"
        );

        let err = BuildError::step_exited("make compiler", None);
        assert_eq!(
            err.to_string(),
            "build step `make compiler` failed: terminated by signal"
        );
    }

    #[test]
    fn test_spawn_failure_collapses_into_step_failure() {
        let platform_err = PlatformError::ProcessExecutionFailed {
            command: "make compiler".into(),
            message: "No such file or directory (os error 2)".into(),
        };
        let build_err: BuildError = platform_err.into();
        match build_err {
            BuildError::StepFailed {
                command,
                exit_code,
                detail,
            } => {
                assert_eq!(command, "make compiler");
                assert_eq!(exit_code, None);
                assert!(detail.contains("os error 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_codes() {
        let err: Error = BuildError::step_exited("make compiler", Some(2)).into();
        assert_eq!(err.user_code(), Some("build.step_failed"));
        assert!(!err.is_retryable());
        assert!(err.user_hint().is_some());

        let err: Error = ConfigError::NotFound {
            path: "/nope.toml".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("config.not_found"));
        assert!(!err.is_step_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.user_code(), Some("error.io"));
    }

    #[test]
    fn test_error_clone() {
        let err = BuildError::UnknownCommand {
            name: "bdist".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
