//! Persisted artifact writers (`spec.md` §6 / §6.5): `forward.sql`,
//! `rollback.sql`, debug IR dumps, and the summary JSON.

use std::path::Path;

use pgdelta_core::{GeneratedMigration, Schema};

use crate::error_presentation::CliError;

fn write(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content).map_err(|source| CliError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `forward.sql`, `rollback.sql`, and (unless `summary_only`) the
/// debug `ir_base.json`/`ir_head.json` dumps into `out_dir`, creating it
/// if needed.
pub fn write_migration_artifacts(
    out_dir: &Path,
    migration: &GeneratedMigration,
    base: &Schema,
    head: &Schema,
    summary_only: bool,
) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir).map_err(|source| CliError::WriteArtifact {
        path: out_dir.to_path_buf(),
        source,
    })?;

    write(&out_dir.join("forward.sql"), &migration.forward_sql)?;
    write(&out_dir.join("rollback.sql"), &migration.rollback_sql)?;

    if !summary_only {
        write_ir_dump(&out_dir.join("ir_base.json"), base)?;
        write_ir_dump(&out_dir.join("ir_head.json"), head)?;
    }

    Ok(())
}

fn write_ir_dump(path: &Path, schema: &Schema) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string());
    write(path, &json)
}

/// Writes `{tables: {...}, unsafe: bool}` to `path` when
/// `--summary-json PATH` is given.
pub fn write_summary_json(path: &Path, migration: &GeneratedMigration) -> Result<(), CliError> {
    let json =
        serde_json::to_string_pretty(&migration.summary).unwrap_or_else(|_| "{}".to_string());
    write(path, &json)
}
