//! Classification of the engine's process exit status.

use std::fmt;

/// How the engine finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// No messages.
    Success,
    /// At least one warning, no errors.
    Warning,
    /// At least one error, processing completed.
    Error,
    /// Processing stopped.
    FatalError,
    /// Any other status, including termination by a signal.
    UnknownExitCode,
}

impl ExitCode {
    /// Classifies a raw process status. `None` means the process did not
    /// exit normally.
    pub fn from_status(status: Option<i32>) -> ExitCode {
        match status {
            Some(0) => ExitCode::Success,
            Some(5) => ExitCode::Warning,
            Some(10) => ExitCode::Error,
            Some(20) => ExitCode::FatalError,
            _ => ExitCode::UnknownExitCode,
        }
    }

    /// Returns true for `Success` and `Warning`.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success | ExitCode::Warning)
    }

    /// Returns true if the engine produced normalized output.
    pub fn has_output(self) -> bool {
        matches!(self, ExitCode::Success | ExitCode::Warning | ExitCode::Error)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(ExitCode::from_status(Some(0)), ExitCode::Success);
        assert_eq!(ExitCode::from_status(Some(5)), ExitCode::Warning);
        assert_eq!(ExitCode::from_status(Some(10)), ExitCode::Error);
        assert_eq!(ExitCode::from_status(Some(20)), ExitCode::FatalError);
        assert_eq!(ExitCode::from_status(Some(1)), ExitCode::UnknownExitCode);
        assert_eq!(ExitCode::from_status(None), ExitCode::UnknownExitCode);
    }

    #[test]
    fn test_output_availability() {
        assert!(ExitCode::Error.has_output());
        assert!(!ExitCode::Error.is_success());
        assert!(!ExitCode::FatalError.has_output());
        assert!(!ExitCode::UnknownExitCode.has_output());
    }
}
