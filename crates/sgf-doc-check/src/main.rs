//! Inspects SGF files and prints a JSON report per file.
//!
//! By default each file goes through the SGFC engine (`SGFC_PATH` or
//! `--engine` selects the binary). With `--decode-only` the file is decoded
//! directly and the engine is never run. Set `RUST_LOG=sgf_doc=debug` for
//! engine logs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;
use sgf_doc::{
    decode_document, validate_document, Arguments, BackendOptions, Document, DocumentReader,
    ExitCode, Game, Message,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

// =============================================================================
// COMMAND LINE
// =============================================================================

/// Check SGF files and report diagnostics, games and validation as JSON
#[derive(Parser, Debug)]
#[command(name = "sgf-doc-check")]
#[command(version, long_about = None)]
struct Cli {
    /// Decode files directly instead of running the engine
    #[arg(long)]
    decode_only: bool,

    /// Engine binary; overrides SGFC_PATH
    #[arg(long, value_name = "PATH")]
    engine: Option<PathBuf>,

    /// Extra option passed to the engine (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// SGF files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn backend_options(&self) -> BackendOptions {
        let mut options = BackendOptions::from_env()
            .with_arguments(self.engine_args.iter().cloned().collect::<Arguments>());
        if let Some(engine) = &self.engine {
            options.engine_path = engine.clone();
        }
        options
    }
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    exit_code: String,
    success: bool,
    messages: Vec<MessageReport>,
    games: Vec<GameReport>,
    validation: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageReport {
    id: i32,
    severity: &'static str,
    line: Option<u32>,
    column: Option<u32>,
    critical: bool,
    text: String,
}

impl From<&Message> for MessageReport {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id(),
            severity: message.message_type().label(),
            line: message.line(),
            column: message.column(),
            critical: message.is_critical(),
            text: message.text().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GameReport {
    game_type: String,
    game_type_number: i64,
    board_size: Option<String>,
    nodes: usize,
    main_line: usize,
}

impl From<&Game> for GameReport {
    fn from(game: &Game) -> Self {
        Self {
            game_type: format!("{:?}", game.game_type()),
            game_type_number: game.game_type_as_number(),
            board_size: game
                .effective_board_size()
                .size()
                .map(|size| format!("{}x{}", size.columns, size.rows)),
            nodes: game.node_count(),
            main_line: game.main_line().len(),
        }
    }
}

fn report(path: &Path, exit_code: ExitCode, messages: &[Message], document: &Document) -> FileReport {
    FileReport {
        path: path.display().to_string(),
        exit_code: exit_code.to_string(),
        success: exit_code.is_success(),
        messages: messages.iter().map(MessageReport::from).collect(),
        games: document.games().iter().map(GameReport::from).collect(),
        validation: validate_document(document).err().map(|err| err.to_string()),
    }
}

// =============================================================================
// CHECKS
// =============================================================================

fn check_decode_only(path: &Path) -> FileReport {
    let decoded = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|text| decode_document(&text).map_err(|err| err.to_string()));
    match decoded {
        Ok(document) => report(path, ExitCode::Success, &[], &document),
        Err(reason) => {
            error!(path = %path.display(), %reason, "decode failed");
            let mut failed = report(path, ExitCode::FatalError, &[], &Document::new());
            failed.validation = Some(reason);
            failed
        }
    }
}

fn check_with_engine(reader: &DocumentReader, path: &Path) -> FileReport {
    let result = reader.read_file(path);
    debug!(path = %path.display(), exit_code = %result.exit_code, "engine finished");
    report(path, result.exit_code, &result.messages, &result.document)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reader = DocumentReader::new(&cli.backend_options());

    let mut failures = 0usize;
    for path in &cli.files {
        let file_report = if cli.decode_only {
            check_decode_only(path)
        } else {
            check_with_engine(&reader, path)
        };
        if !file_report.success {
            failures += 1;
        }
        match serde_json::to_string_pretty(&file_report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!(error = %err, "could not serialize report");
                process::exit(1);
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} file(s) failed", cli.files.len());
        process::exit(1);
    }
}
