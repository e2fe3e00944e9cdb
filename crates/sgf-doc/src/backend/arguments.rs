//! Engine command-line arguments and the pre-flight policy.

use crate::error::ArgumentPolicyError;

/// Arguments the library must control itself: help and version output,
/// interactive mode, and options that change where or how output is
/// written.
pub const BANNED_ARGUMENTS: &[&str] = &["-h", "--help", "--version", "-i", "-c", "-g", "-s"];

/// Ordered list of engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    arguments: Vec<String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument.
    pub fn add(&mut self, argument: impl Into<String>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    /// Builder-style variant of [`Arguments::add`].
    pub fn with(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.arguments
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn clear(&mut self) {
        self.arguments.clear();
    }

    /// Checks every argument: it must be an option (start with `-`) and
    /// must not be on the deny-list. Reports the first offender.
    pub fn validate(&self) -> Result<(), ArgumentPolicyError> {
        for argument in &self.arguments {
            if BANNED_ARGUMENTS.contains(&argument.as_str()) {
                return Err(ArgumentPolicyError::Banned {
                    argument: argument.clone(),
                });
            }
            if !argument.starts_with('-') || argument.len() < 2 {
                return Err(ArgumentPolicyError::Unparseable {
                    argument: argument.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Arguments {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_arguments() {
        let args: Arguments = ["-r", "-b1", "-z"].into_iter().collect();
        assert!(args.validate().is_ok());
        assert!(Arguments::new().validate().is_ok());
    }

    #[test]
    fn test_banned_argument() {
        let args = Arguments::new().with("-r").with("--version");
        assert_eq!(
            args.validate(),
            Err(ArgumentPolicyError::Banned { argument: "--version".into() })
        );
    }

    #[test]
    fn test_unparseable_argument() {
        for bad in ["output.sgf", "-", ""] {
            let args = Arguments::new().with(bad);
            assert!(matches!(args.validate(), Err(ArgumentPolicyError::Unparseable { .. })), "{bad:?}");
        }
    }
}
