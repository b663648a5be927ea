//! `pgdelta.yml` project config for the `run` subcommand, recovered from
//! `original_source/schema_agent/policy/config.py` and
//! `config_schema.py` (`SPEC_FULL.md` §6.4).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error_presentation::CliError;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_adapter")]
    pub adapter: String,
    #[serde(default = "default_dialect")]
    pub dialect: String,

    pub base_dir: PathBuf,
    pub head_dir: PathBuf,

    pub base_module: Option<String>,
    pub head_module: Option<String>,

    pub schema_hints: Option<PathBuf>,

    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub fail_on_unsafe: bool,
    #[serde(default)]
    pub summary_only: bool,
    pub summary_json: Option<PathBuf>,
}

fn default_adapter() -> String {
    "json".to_string()
}

fn default_dialect() -> String {
    "postgresql".to_string()
}

/// Loads `path`, failing loudly: an invalid or missing project config at
/// an explicitly requested path is caller-facing input validation, not a
/// silent degrade (`SPEC_FULL.md` §6.4) — unlike hint-file parsing, an
/// empty config can never satisfy the required `base_dir`/`head_dir`
/// fields.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|source| CliError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })
}
