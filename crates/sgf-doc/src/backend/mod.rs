//! Integration with the external SGF engine.
//!
//! - [`arguments`]: engine options and the deny-list
//! - [`engine`]: the [`Engine`] trait, the process engine and options
//! - [`exit_code`]: exit status classification
//! - [`controller`]: loads, saves and the temporary-file protocol

pub mod arguments;
pub mod controller;
pub mod engine;
pub mod exit_code;
mod temp;

pub use arguments::{Arguments, BANNED_ARGUMENTS};
pub use controller::{BackendController, SaveResult};
pub use engine::{BackendOptions, Engine, EngineOutput, ProcessEngine};
pub use exit_code::ExitCode;
