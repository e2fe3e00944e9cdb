//! The external engine and how it is invoked.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crate::backend::arguments::Arguments;

/// Environment variable naming the engine binary.
pub const ENGINE_PATH_ENV: &str = "SGFC_PATH";

/// Engine binary used when nothing else is configured.
pub const DEFAULT_ENGINE_PATH: &str = "sgfc";

/// What one engine run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Exit status, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl EngineOutput {
    /// The diagnostic stream: stdout followed by stderr.
    pub fn diagnostics(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        out.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') && !self.stderr.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.stderr);
        out
    }
}

/// Something that checks an SGF file and writes the normalized result.
///
/// Invoked as `<engine> <arguments...> <input> <output>`. An `Err` means
/// the engine could not be started at all.
pub trait Engine {
    fn run(&self, arguments: &[String], input: &Path, output: &Path) -> io::Result<EngineOutput>;

    /// Name used in diagnostics.
    fn name(&self) -> String {
        "engine".to_string()
    }
}

impl<T: Engine + ?Sized> Engine for &T {
    fn run(&self, arguments: &[String], input: &Path, output: &Path) -> io::Result<EngineOutput> {
        (**self).run(arguments, input, output)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Runs the engine as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for ProcessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_PATH)
    }
}

impl Engine for ProcessEngine {
    #[instrument(skip_all, fields(program = %self.program.display(), input = %input.display()))]
    fn run(&self, arguments: &[String], input: &Path, output: &Path) -> io::Result<EngineOutput> {
        let result = Command::new(&self.program)
            .args(arguments)
            .arg(input)
            .arg(output)
            .output()?;
        let output = EngineOutput {
            status: result.status.code(),
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        };
        debug!(status = ?output.status, "engine finished");
        Ok(output)
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Options for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOptions {
    /// Path or name of the engine binary.
    pub engine_path: PathBuf,
    /// Extra engine options, checked before every run.
    pub arguments: Arguments,
}

impl BackendOptions {
    /// Creates default options: engine `sgfc` found on `PATH`, no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with the engine path taken from `SGFC_PATH` if set.
    pub fn from_env() -> Self {
        let engine_path = env::var_os(ENGINE_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE_PATH));
        Self {
            engine_path,
            arguments: Arguments::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Builds the process engine these options describe.
    pub fn engine(&self) -> ProcessEngine {
        ProcessEngine::new(&self.engine_path)
    }
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from(DEFAULT_ENGINE_PATH),
            arguments: Arguments::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_order() {
        let output = EngineOutput {
            status: Some(5),
            stdout: "Warning 1: a".into(),
            stderr: "Error 2: b\n".into(),
        };
        assert_eq!(output.diagnostics(), "Warning 1: a\nError 2: b\n");
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let engine = ProcessEngine::new("/nonexistent/sgf-doc/engine");
        let dir = tempfile::tempdir().unwrap();
        let err = engine
            .run(&[], &dir.path().join("in.sgf"), &dir.path().join("out.sgf"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_default_options() {
        let options = BackendOptions::new();
        assert_eq!(options.engine_path, PathBuf::from("sgfc"));
        assert!(options.arguments.is_empty());
        assert_eq!(options.engine().program(), Path::new("sgfc"));
    }
}
