//! Drives the engine for loads and saves.
//!
//! A load validates the configured arguments, runs the engine on the input
//! (a caller's file, or a temporary file holding caller content), collects
//! the translated diagnostics and keeps the engine's normalized output in
//! memory. Saves write that normalized content out again.
//!
//! Failures of the file protocol never panic and never surface as a
//! separate error channel: they become one fatal [`Message`] appended to the
//! parse result, and the exit code becomes [`ExitCode::FatalError`].

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::arguments::Arguments;
use crate::backend::engine::{BackendOptions, Engine, ProcessEngine};
use crate::backend::exit_code::ExitCode;
use crate::backend::temp::TempSgfFile;
use crate::constants::SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR;
use crate::error::ProtocolError;
use crate::message::{translate, Message};

/// Outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveResult {
    pub exit_code: ExitCode,
    pub messages: Vec<Message>,
}

impl SaveResult {
    fn fatal(messages: Vec<Message>) -> Self {
        Self {
            exit_code: ExitCode::FatalError,
            messages,
        }
    }
}

/// Runs the engine and holds the result of the most recent load.
#[derive(Debug)]
pub struct BackendController<E: Engine = ProcessEngine> {
    engine: E,
    arguments: Arguments,
    invalid_command_line: Option<Message>,
    exit_code: Option<ExitCode>,
    messages: Vec<Message>,
    content: Option<String>,
}

impl BackendController<ProcessEngine> {
    /// Creates a controller that runs the engine binary named in `options`.
    pub fn new(options: &BackendOptions) -> Self {
        Self::with_engine(options.engine(), options.arguments.clone())
    }
}

impl<E: Engine> BackendController<E> {
    /// Creates a controller around any engine. The arguments are checked
    /// here; if they fail, every load reports the failure without running
    /// the engine.
    pub fn with_engine(engine: E, arguments: Arguments) -> Self {
        let invalid_command_line = arguments.validate().err().map(|err| {
            warn!(error = %err, "engine arguments rejected");
            err.to_message()
        });
        Self {
            engine,
            arguments,
            invalid_command_line,
            exit_code: None,
            messages: Vec::new(),
            content: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn is_command_line_valid(&self) -> bool {
        self.invalid_command_line.is_none()
    }

    /// The fatal message describing why the arguments were rejected.
    pub fn invalid_command_line_reason(&self) -> Option<&Message> {
        self.invalid_command_line.as_ref()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Runs the engine on the SGF file at `path`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ExitCode {
        let path = path.as_ref();
        info!(path = %path.display(), "loading SGF file");
        self.reset();
        if let Some(reason) = self.invalid_command_line.clone() {
            return self.fail(reason);
        }
        match self.run_engine(path) {
            Ok(exit_code) => exit_code,
            Err(err) => self.fail(err.to_message()),
        }
    }

    /// Runs the engine on `content` by way of a temporary file.
    pub fn load_content(&mut self, content: &str) -> ExitCode {
        info!(bytes = content.len(), "loading SGF content");
        self.reset();
        if let Some(reason) = self.invalid_command_line.clone() {
            return self.fail(reason);
        }
        let input = match TempSgfFile::with_content(content) {
            Ok(input) => input,
            Err(err) => return self.fail(err.to_message()),
        };
        let exit_code = match self.run_engine(input.path()) {
            Ok(exit_code) => exit_code,
            Err(err) => self.fail(err.to_message()),
        };
        match input.close() {
            Ok(()) => exit_code,
            Err(err) => self.fail(err.to_message()),
        }
    }

    fn run_engine(&mut self, input: &Path) -> Result<ExitCode, ProtocolError> {
        let output = TempSgfFile::create()?;
        let run = self
            .engine
            .run(self.arguments.as_slice(), input, output.path())
            .map_err(|source| ProtocolError::Spawn {
                program: self.engine.name(),
                source,
            })?;

        let exit_code = ExitCode::from_status(run.status);
        self.messages = translate(&run.diagnostics());
        debug!(%exit_code, messages = self.messages.len(), "engine run classified");

        if exit_code.has_output() {
            self.content = Some(output.read()?);
        }
        output.close()?;
        self.exit_code = Some(exit_code);
        Ok(exit_code)
    }

    fn reset(&mut self) {
        self.exit_code = None;
        self.messages.clear();
        self.content = None;
    }

    /// Records a fatal failure of the current load.
    fn fail(&mut self, message: Message) -> ExitCode {
        warn!(id = message.id(), text = message.text(), "load failed");
        self.messages.push(message);
        self.content = None;
        self.exit_code = Some(ExitCode::FatalError);
        ExitCode::FatalError
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Messages of the most recent load, in emission order.
    pub fn parse_result(&self) -> &[Message] {
        &self.messages
    }

    /// Exit code of the most recent load, `None` before the first load.
    pub fn exit_code(&self) -> Option<ExitCode> {
        self.exit_code
    }

    /// Returns true if the most recent load produced normalized content.
    pub fn is_content_loaded(&self) -> bool {
        self.content.is_some()
    }

    /// The normalized content of the most recent load.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Writes the loaded content to `path`.
    pub fn save_file(&self, path: impl AsRef<Path>) -> SaveResult {
        let path = path.as_ref();
        let content = match self.loaded() {
            Ok(content) => content,
            Err(result) => return result,
        };
        if let Err(source) = fs::write(path, content) {
            let err = ProtocolError::Write {
                path: path.display().to_string(),
                source,
            };
            warn!(error = %err, "save failed");
            let mut messages = self.messages.clone();
            messages.push(err.to_message());
            return SaveResult::fatal(messages);
        }
        info!(path = %path.display(), "saved SGF file");
        self.save_result()
    }

    /// Returns the loaded content.
    pub fn save_content(&self) -> Result<String, SaveResult> {
        self.loaded().map(str::to_string)
    }

    fn loaded(&self) -> Result<&str, SaveResult> {
        self.content.as_deref().ok_or_else(|| {
            let mut messages = self.messages.clone();
            messages.push(Message::fatal(
                SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR,
                "no SGF content has been loaded",
            ));
            SaveResult::fatal(messages)
        })
    }

    /// The result reported for a successful save: the classification and
    /// messages of the load that produced the content.
    pub fn save_result(&self) -> SaveResult {
        SaveResult {
            exit_code: self.exit_code.unwrap_or(ExitCode::UnknownExitCode),
            messages: self.messages.clone(),
        }
    }
}
