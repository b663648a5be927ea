//! Structured CLI error presentation, modeled on `stateql-cli`'s
//! `error_presentation.rs`: a hand-rolled `CliError` enum rendered through
//! `anyhow`+`miette` with a `[category]` prefix.

use std::{io, path::PathBuf};

use anyhow::Context;
use miette::Report;

const READ_FILE_CONTEXT: &str = "while reading schema input";
const WRITE_ARTIFACT_CONTEXT: &str = "while writing migration artifact";
const CORE_CONTEXT: &str = "while running the pipeline";

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    UnknownAdapter {
        requested: String,
        available: Vec<String>,
    },
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    ParseSchema {
        path: PathBuf,
        source: serde_json::Error,
    },
    WriteArtifact {
        path: PathBuf,
        source: io::Error,
    },
    ConfigInvalid {
        path: PathBuf,
        reason: String,
    },
    Core(pgdelta_core::Error),
}

impl From<pgdelta_core::Error> for CliError {
    fn from(value: pgdelta_core::Error) -> Self {
        Self::Core(value)
    }
}

pub fn render_runtime_error(error: &CliError) -> String {
    match error {
        CliError::UnknownAdapter { requested, available } => {
            format!(
                "[usage] unknown adapter `{requested}`; available adapters: {}",
                if available.is_empty() {
                    "(none registered)".to_string()
                } else {
                    available.join(", ")
                }
            )
        }
        CliError::ReadFile { path, source } => {
            let context = format!("{READ_FILE_CONTEXT} `{}`", path.display());
            format!("[io] {}", report_with_context(clone_io_error(source), context))
        }
        CliError::ParseSchema { path, source } => {
            format!(
                "[parse] invalid schema JSON in `{}`: {source}",
                path.display()
            )
        }
        CliError::WriteArtifact { path, source } => {
            let context = format!("{WRITE_ARTIFACT_CONTEXT} `{}`", path.display());
            format!("[io] {}", report_with_context(clone_io_error(source), context))
        }
        CliError::ConfigInvalid { path, reason } => {
            format!("[config] invalid config at `{}`: {reason}", path.display())
        }
        CliError::Core(source) => {
            format!("[core] {}", report_with_context(source.clone(), CORE_CONTEXT))
        }
    }
}

fn clone_io_error(source: &io::Error) -> io::Error {
    io::Error::new(source.kind(), source.to_string())
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}
