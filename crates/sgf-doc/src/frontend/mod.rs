//! Reading and writing documents through the engine.
//!
//! [`DocumentReader`] runs the engine on SGF input and decodes the
//! normalized output. [`DocumentWriter`] encodes a document, lets the engine
//! check it, and writes the normalized result.

use std::path::Path;

use tracing::{debug, warn};

use crate::backend::{
    Arguments, BackendController, BackendOptions, Engine, ExitCode, ProcessEngine,
};
use crate::codec::{decode_document, encode_document};
use crate::error::EngineError;
use crate::message::{Message, MessageType};
use crate::model::Document;

/// Outcome of a read.
#[derive(Debug, Clone)]
pub struct ReadResult {
    pub exit_code: ExitCode,
    pub messages: Vec<Message>,
    /// The decoded document; empty if the engine produced no content.
    pub document: Document,
}

impl ReadResult {
    /// Returns true if the engine reported success or only warnings.
    pub fn is_success(&self) -> bool {
        self.exit_code.is_success()
    }

    /// Converts into the document, or an error summarizing the first
    /// fatal or error message.
    pub fn into_result(self) -> Result<Document, EngineError> {
        if self.exit_code.is_success() {
            return Ok(self.document);
        }
        Err(EngineError::NotSuccessful {
            exit_code: self.exit_code,
            summary: summarize(&self.messages),
        })
    }
}

/// Outcome of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub exit_code: ExitCode,
    pub messages: Vec<Message>,
    /// The normalized SGF text, for in-memory writes that succeeded.
    pub content: Option<String>,
}

impl WriteResult {
    pub fn is_success(&self) -> bool {
        self.exit_code.is_success()
    }
}

fn summarize(messages: &[Message]) -> String {
    messages
        .iter()
        .max_by_key(|m| m.message_type())
        .filter(|m| m.message_type() != MessageType::Warning)
        .map(|m| m.to_string())
        .unwrap_or_else(|| "no diagnostics".to_string())
}

/// Reads SGF files or content into documents.
#[derive(Debug, Clone)]
pub struct DocumentReader<E: Engine = ProcessEngine> {
    engine: E,
    arguments: Arguments,
}

impl DocumentReader<ProcessEngine> {
    pub fn new(options: &BackendOptions) -> Self {
        Self::with_engine(options.engine(), options.arguments.clone())
    }
}

impl<E: Engine> DocumentReader<E> {
    pub fn with_engine(engine: E, arguments: Arguments) -> Self {
        Self { engine, arguments }
    }

    pub fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> ReadResult {
        let mut controller = self.controller();
        controller.load_file(path);
        finish_read(&controller)
    }

    pub fn read_content(&self, content: &str) -> ReadResult {
        let mut controller = self.controller();
        controller.load_content(content);
        finish_read(&controller)
    }

    fn controller(&self) -> BackendController<&E> {
        BackendController::with_engine(&self.engine, self.arguments.clone())
    }
}

fn finish_read<E: Engine>(controller: &BackendController<E>) -> ReadResult {
    let mut exit_code = controller.exit_code().unwrap_or(ExitCode::UnknownExitCode);
    let mut messages = controller.parse_result().to_vec();
    let document = match controller.content() {
        Some(text) => match decode_document(text) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "engine output could not be decoded");
                messages.push(err.to_message());
                exit_code = ExitCode::FatalError;
                Document::new()
            }
        },
        None => Document::new(),
    };
    debug!(%exit_code, games = document.len(), "read finished");
    ReadResult {
        exit_code,
        messages,
        document,
    }
}

/// Writes documents as SGF files or content.
#[derive(Debug, Clone)]
pub struct DocumentWriter<E: Engine = ProcessEngine> {
    engine: E,
    arguments: Arguments,
}

impl DocumentWriter<ProcessEngine> {
    pub fn new(options: &BackendOptions) -> Self {
        Self::with_engine(options.engine(), options.arguments.clone())
    }
}

impl<E: Engine> DocumentWriter<E> {
    pub fn with_engine(engine: E, arguments: Arguments) -> Self {
        Self { engine, arguments }
    }

    pub fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    /// Encodes `document`, checks it with the engine and writes the
    /// normalized text to `path`.
    pub fn write_file(&self, document: &Document, path: impl AsRef<Path>) -> WriteResult {
        let controller = match self.check(document) {
            Ok(controller) => controller,
            Err(rejected) => return rejected,
        };
        let saved = controller.save_file(path);
        WriteResult {
            exit_code: saved.exit_code,
            messages: saved.messages,
            content: None,
        }
    }

    /// Encodes `document`, checks it with the engine and returns the
    /// normalized text in the result.
    pub fn write_content(&self, document: &Document) -> WriteResult {
        let controller = match self.check(document) {
            Ok(controller) => controller,
            Err(rejected) => return rejected,
        };
        match controller.save_content() {
            Ok(content) => {
                let saved = controller.save_result();
                WriteResult {
                    exit_code: saved.exit_code,
                    messages: saved.messages,
                    content: Some(content),
                }
            }
            Err(saved) => WriteResult {
                exit_code: saved.exit_code,
                messages: saved.messages,
                content: None,
            },
        }
    }

    /// Runs the engine on the encoded document. Returns the controller if
    /// the engine produced content, otherwise the failed result.
    fn check(&self, document: &Document) -> Result<BackendController<&E>, WriteResult> {
        let mut controller = BackendController::with_engine(&self.engine, self.arguments.clone());
        let exit_code = controller.load_content(&encode_document(document));
        if controller.is_content_loaded() {
            return Ok(controller);
        }
        Err(WriteResult {
            exit_code,
            messages: controller.parse_result().to_vec(),
            content: None,
        })
    }
}
