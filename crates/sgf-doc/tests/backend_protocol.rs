//! Backend and front end behaviour against a scripted engine.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sgf_doc::backend::{Arguments, BackendController, BackendOptions, Engine, EngineOutput, ExitCode};
use sgf_doc::constants::{
    BANNED_ARGUMENT, ENGINE_INVOCATION_ERROR, PARSE_ARGUMENT_ERROR,
    SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR, UNKNOWN_SGFC_MESSAGE_ID,
};
use sgf_doc::frontend::{DocumentReader, DocumentWriter};
use sgf_doc::message::MessageType;
use sgf_doc::model::{BoardSize, GameType};

/// One recorded engine invocation.
#[derive(Debug, Clone)]
struct Call {
    arguments: Vec<String>,
    input: PathBuf,
    output: PathBuf,
}

/// Engine double. Writes `output` (or a copy of the input) to the output
/// path and reports the scripted status and streams.
#[derive(Debug, Default)]
struct ScriptedEngine {
    status: Option<i32>,
    stdout: String,
    stderr: String,
    output: Option<String>,
    spawn_error: bool,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedEngine {
    fn echo(status: i32) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Engine for ScriptedEngine {
    fn run(&self, arguments: &[String], input: &Path, output: &Path) -> io::Result<EngineOutput> {
        self.calls.borrow_mut().push(Call {
            arguments: arguments.to_vec(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
        if self.spawn_error {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        let text = match &self.output {
            Some(text) => text.clone(),
            None => fs::read_to_string(input)?,
        };
        fs::write(output, text)?;
        Ok(EngineOutput {
            status: self.status,
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        })
    }
}

#[test]
fn banned_argument_never_invokes_engine() {
    let engine = ScriptedEngine::echo(0);
    let mut controller = BackendController::with_engine(&engine, Arguments::new().with("-r").with("-i"));
    assert!(!controller.is_command_line_valid());

    assert_eq!(controller.load_content("(;)"), ExitCode::FatalError);
    let messages = controller.parse_result();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id(), BANNED_ARGUMENT);
    assert_eq!(messages[0].message_type(), MessageType::Fatal);
    assert!(engine.calls().is_empty());
    assert!(!controller.is_content_loaded());
}

#[test]
fn unparseable_argument_is_reported() {
    let engine = ScriptedEngine::echo(0);
    let mut controller = BackendController::with_engine(&engine, Arguments::new().with("out.sgf"));
    assert_eq!(controller.load_file("whatever.sgf"), ExitCode::FatalError);
    assert_eq!(controller.parse_result()[0].id(), PARSE_ARGUMENT_ERROR);
    assert!(engine.calls().is_empty());
}

#[test]
fn engine_receives_arguments_then_paths() {
    let engine = ScriptedEngine::echo(0);
    let mut controller = BackendController::with_engine(&engine, Arguments::new().with("-r").with("-b1"));
    assert_eq!(controller.load_content("(;GM[1])"), ExitCode::Success);
    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].arguments, vec!["-r".to_string(), "-b1".to_string()]);
    assert_ne!(calls[0].input, calls[0].output);
    assert_eq!(controller.content(), Some("(;GM[1])"));
}

#[test]
fn temp_files_removed_after_success() {
    let engine = ScriptedEngine::echo(5);
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    assert_eq!(controller.load_content("(;B[aa])"), ExitCode::Warning);
    let call = &engine.calls()[0];
    assert!(!call.input.exists());
    assert!(!call.output.exists());
}

#[test]
fn temp_files_removed_after_failure() {
    let engine = ScriptedEngine {
        status: Some(20),
        stdout: "Fatal error 2: could not read input\n".into(),
        ..ScriptedEngine::default()
    };
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    assert_eq!(controller.load_content("garbage"), ExitCode::FatalError);
    assert!(!controller.is_content_loaded());
    let call = &engine.calls()[0];
    assert!(!call.input.exists());
    assert!(!call.output.exists());
    assert_eq!(controller.parse_result()[0].message_type(), MessageType::Fatal);
}

#[test]
fn spawn_failure_is_fatal_message() {
    let engine = ScriptedEngine {
        spawn_error: true,
        ..ScriptedEngine::default()
    };
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    assert_eq!(controller.load_content("(;)"), ExitCode::FatalError);
    let messages = controller.parse_result();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id(), ENGINE_INVOCATION_ERROR);
    let call = &engine.calls()[0];
    assert!(!call.input.exists());
    assert!(!call.output.exists());
}

#[test]
fn missing_engine_binary_is_fatal_message() {
    let options = BackendOptions {
        engine_path: PathBuf::from("/nonexistent/sgf-doc/sgfc"),
        ..BackendOptions::default()
    };
    let mut controller = BackendController::new(&options);
    assert_eq!(controller.load_content("(;)"), ExitCode::FatalError);
    assert_eq!(controller.parse_result()[0].id(), ENGINE_INVOCATION_ERROR);
}

#[test]
fn signal_termination_is_unknown_exit_code() {
    let engine = ScriptedEngine {
        status: None,
        ..ScriptedEngine::default()
    };
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    assert_eq!(controller.load_content("(;)"), ExitCode::UnknownExitCode);
    assert!(!controller.is_content_loaded());
}

#[test]
fn diagnostics_translated_in_order_around_malformed_record() {
    let engine = ScriptedEngine {
        status: Some(10),
        stdout: "SGFC banner line\n\
                 Line:1 col:2 - Warning 12: first\n\
                 ??? not a record\n"
            .into(),
        stderr: "Line:3 col:4 - Error 17 (critical): third\n".into(),
        ..ScriptedEngine::default()
    };
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    assert_eq!(controller.load_content("(;)"), ExitCode::Error);
    let messages = controller.parse_result();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].id(), 12);
    assert_eq!(messages[1].id(), UNKNOWN_SGFC_MESSAGE_ID);
    assert_eq!(messages[1].line(), None);
    assert_eq!(messages[2].id(), 17);
    assert!(messages[2].is_critical());
    assert!(controller.is_content_loaded());
}

#[test]
fn save_without_load_is_fatal() {
    let engine = ScriptedEngine::echo(0);
    let controller = BackendController::with_engine(&engine, Arguments::new());
    let err = controller.save_content().unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FatalError);
    assert_eq!(err.messages.last().map(|m| m.id()), Some(SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR));
}

#[test]
fn save_file_writes_normalized_content() {
    let engine = ScriptedEngine {
        status: Some(0),
        output: Some("(;FF[4]GM[1])".into()),
        ..ScriptedEngine::default()
    };
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    controller.load_content("(;GM[1])");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.sgf");
    let result = controller.save_file(&path);
    assert_eq!(result.exit_code, ExitCode::Success);
    assert_eq!(fs::read_to_string(&path).unwrap(), "(;FF[4]GM[1])");
}

#[test]
fn save_file_to_missing_directory_is_fatal() {
    let engine = ScriptedEngine::echo(0);
    let mut controller = BackendController::with_engine(&engine, Arguments::new());
    controller.load_content("(;)");
    let result = controller.save_file("/nonexistent/sgf-doc/out.sgf");
    assert_eq!(result.exit_code, ExitCode::FatalError);
    assert_eq!(result.messages.last().map(|m| m.id()), Some(SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR));
}

#[test]
fn reader_decodes_engine_output() {
    let engine = ScriptedEngine::echo(0);
    let reader = DocumentReader::with_engine(&engine, Arguments::new());
    let result = reader.read_content("(;GM[1]SZ[13];B[dd](;W[jj])(;W[jd]))");
    assert!(result.is_success());
    let doc = result.into_result().unwrap();
    let game = doc.game(0).unwrap();
    assert_eq!(game.game_type(), GameType::Go);
    assert_eq!(game.board_size().size(), Some(BoardSize::square(13)));
    assert_eq!(game.node_count(), 4);
}

#[test]
fn reader_reports_undecodable_output() {
    let engine = ScriptedEngine {
        status: Some(0),
        output: Some("(;B[aa]".into()),
        ..ScriptedEngine::default()
    };
    let reader = DocumentReader::with_engine(&engine, Arguments::new());
    let result = reader.read_content("(;B[aa])");
    assert_eq!(result.exit_code, ExitCode::FatalError);
    assert!(result.document.is_empty());
    assert_eq!(result.messages.last().map(|m| m.message_type()), Some(MessageType::Fatal));
}

#[test]
fn reader_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sgf");
    fs::write(&path, "(;GM[3])").unwrap();
    let engine = ScriptedEngine::echo(0);
    let reader = DocumentReader::with_engine(&engine, Arguments::new());
    let doc = reader.read_file(&path).into_result().unwrap();
    assert_eq!(doc.game(0).unwrap().game_type(), GameType::Chess);
    assert_eq!(engine.calls()[0].input, path);
    assert!(path.exists());
}

#[test]
fn writer_round_trip() {
    let engine = ScriptedEngine::echo(0);
    let reader = DocumentReader::with_engine(&engine, Arguments::new());
    let writer = DocumentWriter::with_engine(&engine, Arguments::new());

    let doc = reader.read_content("(;SZ[9]GM[1];B[cc])").into_result().unwrap();
    let written = writer.write_content(&doc);
    assert!(written.is_success());
    assert_eq!(written.content.as_deref(), Some("(;GM[1]SZ[9]\n;B[cc])\n"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.sgf");
    let result = writer.write_file(&doc, &path);
    assert_eq!(result.exit_code, ExitCode::Success);
    assert_eq!(fs::read_to_string(&path).unwrap(), "(;GM[1]SZ[9]\n;B[cc])\n");
}

#[test]
fn writer_rejected_by_engine() {
    let engine = ScriptedEngine {
        status: Some(20),
        stderr: "Fatal error 5: bad\n".into(),
        ..ScriptedEngine::default()
    };
    let writer = DocumentWriter::with_engine(&engine, Arguments::new());
    let doc = sgf_doc::decode_document("(;)").unwrap();
    let result = writer.write_content(&doc);
    assert_eq!(result.exit_code, ExitCode::FatalError);
    assert_eq!(result.content, None);
    assert_eq!(result.messages[0].id(), 5);
    assert_eq!(engine.calls().len(), 1);
}
