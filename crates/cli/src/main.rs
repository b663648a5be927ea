//! `pgdelta` — forward/rollback PostgreSQL schema migration planner CLI.

mod adapter;
mod artifacts;
mod config;
mod error_presentation;
mod hints_yaml;
mod summary_table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pgdelta_core::DialectRegistry;

use adapter::AdapterRegistry;
use error_presentation::{CliError, CliResult, render_runtime_error};

#[derive(Parser)]
#[command(name = "pgdelta", about = "Forward/rollback PostgreSQL schema migration planner")]
struct Cli {
    /// Tracing verbosity, passed through to `RUST_LOG`-style filtering.
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Diff two schema snapshots and emit forward/rollback SQL.
    Diff(DiffArgs),
    /// Diff using a `pgdelta.yml` project config instead of repeating flags.
    Run(RunArgs),
}

#[derive(Args)]
struct DiffArgs {
    #[arg(long = "base-dir")]
    base_dir: PathBuf,
    #[arg(long = "base-module")]
    base_module: Option<String>,
    #[arg(long = "head-dir")]
    head_dir: PathBuf,
    #[arg(long = "head-module")]
    head_module: Option<String>,
    #[arg(long, default_value = "postgresql")]
    dialect: String,
    #[arg(long, default_value = "json")]
    adapter: String,
    #[arg(long = "out-dir", default_value = "./artifacts")]
    out_dir: PathBuf,
    #[arg(long = "schema-hints")]
    schema_hints: Option<PathBuf>,
    #[arg(long = "fail-on-unsafe")]
    fail_on_unsafe: bool,
    #[arg(long = "summary-only")]
    summary_only: bool,
    #[arg(long = "summary-json")]
    summary_json: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,
    #[arg(long = "summary-json")]
    summary_json: Option<PathBuf>,
}

/// The resolved parameters every run ends up feeding into [`run_diff`],
/// whether they arrived via flags (`diff`) or a project config (`run`).
struct DiffParams {
    base_dir: PathBuf,
    base_module: Option<String>,
    head_dir: PathBuf,
    head_module: Option<String>,
    dialect: String,
    adapter: String,
    out_dir: PathBuf,
    schema_hints: Option<PathBuf>,
    fail_on_unsafe: bool,
    summary_only: bool,
    summary_json: Option<PathBuf>,
}

impl From<DiffArgs> for DiffParams {
    fn from(args: DiffArgs) -> Self {
        Self {
            base_dir: args.base_dir,
            base_module: args.base_module,
            head_dir: args.head_dir,
            head_module: args.head_module,
            dialect: args.dialect,
            adapter: args.adapter,
            out_dir: args.out_dir,
            schema_hints: args.schema_hints,
            fail_on_unsafe: args.fail_on_unsafe,
            summary_only: args.summary_only,
            summary_json: args.summary_json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let outcome = match cli.command {
        Command::Diff(args) => run_diff(args.into()),
        Command::Run(args) => run_with_config(args),
    };

    match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", render_runtime_error(&error));
            ExitCode::from(1)
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_with_config(args: RunArgs) -> CliResult<ExitCode> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from("pgdelta.yml"));
    let cfg = config::load_project_config(&config_path)?;

    tracing::info!(path = %config_path.display(), "loaded project config");

    let params = DiffParams {
        base_dir: cfg.base_dir,
        base_module: cfg.base_module,
        head_dir: cfg.head_dir,
        head_module: cfg.head_module,
        dialect: cfg.dialect,
        adapter: cfg.adapter,
        out_dir: args.out_dir.or(cfg.out_dir).unwrap_or_else(|| PathBuf::from("./artifacts")),
        schema_hints: cfg.schema_hints,
        fail_on_unsafe: cfg.fail_on_unsafe,
        summary_only: cfg.summary_only,
        summary_json: args.summary_json.or(cfg.summary_json),
    };

    run_diff(params)
}

fn run_diff(params: DiffParams) -> CliResult<ExitCode> {
    let adapters = AdapterRegistry::with_builtins();
    let schema_adapter = adapters.get(&params.adapter).ok_or_else(|| CliError::UnknownAdapter {
        requested: params.adapter.clone(),
        available: adapters.names(),
    })?;

    let mut registry = DialectRegistry::new();
    pgdelta_dialect_postgres::register(&mut registry);

    let base = schema_adapter.emit_ir(&params.base_dir, params.base_module.as_deref())?;
    let head = schema_adapter.emit_ir(&params.head_dir, params.head_module.as_deref())?;

    if base.tables.is_empty() || head.tables.is_empty() {
        tracing::warn!(
            base_tables = base.tables.len(),
            head_tables = head.tables.len(),
            "no tables detected in one of the trees"
        );
    }

    let hints_path = hints_yaml::resolve_hints_path(params.schema_hints.as_deref(), &params.out_dir);
    let hints = hints_yaml::load_hints(hints_path.as_deref());

    let migration = pgdelta_core::run_pipeline(&base, &head, &params.dialect, &hints, &registry)?;

    println!("{}", summary_table::render_summary(&migration.summary));

    if let Some(summary_json_path) = &params.summary_json {
        artifacts::write_summary_json(summary_json_path, &migration)?;
    }

    if !params.summary_only {
        artifacts::write_migration_artifacts(
            &params.out_dir,
            &migration,
            &base,
            &head,
            params.summary_only,
        )?;
    }

    if params.fail_on_unsafe && migration.summary.unsafe_changes {
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}
