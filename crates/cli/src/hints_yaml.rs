//! Loads the `schema_hints.yml` file into a typed [`pgdelta_core::Hints`]
//! (`spec.md` §6.3). YAML parsing is deliberately kept out of
//! `pgdelta-core` (an explicit non-goal); this module is the only place
//! that reads the hint file's on-disk shape.

use std::collections::BTreeMap;
use std::path::Path;

use pgdelta_core::{Hints, PlannerHints};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHints {
    renames: BTreeMap<String, String>,
    unsafe_allow: Vec<String>,
    planner: RawPlannerHints,
    dialect: RawDialectHints,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlannerHints {
    default_backfill_batch_rows: Option<u32>,
    use_fast_not_null: bool,
    use_batched_backfill: bool,
    large_table_mode: bool,
    emit_data_validation_hints: Option<bool>,
    unique_nulls_not_distinct: bool,
    add_banner_for_non_txn: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDialectHints {
    postgres: RawPostgresHints,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPostgresHints {
    target_version: Option<String>,
}

/// Loads hints from `path`. A missing path, missing file, unparsable
/// YAML, or a non-mapping root all degrade to [`Hints::default`] rather
/// than erroring — `original_source/policy/hints.py` does the same.
#[must_use]
pub fn load_hints(path: Option<&Path>) -> Hints {
    let Some(path) = path else {
        return Hints::default();
    };
    let Ok(content) = std::fs::read_to_string(path) else {
        return Hints::default();
    };
    let Ok(raw) = serde_yaml::from_str::<RawHints>(&content) else {
        return Hints::default();
    };
    into_hints(raw)
}

fn into_hints(raw: RawHints) -> Hints {
    let default_planner = PlannerHints::default();
    let target_pg_major = raw
        .dialect
        .postgres
        .target_version
        .as_deref()
        .and_then(parse_major_version);

    Hints {
        renames: raw.renames,
        unsafe_allow: raw.unsafe_allow,
        planner: PlannerHints {
            default_backfill_batch_rows: raw
                .planner
                .default_backfill_batch_rows
                .unwrap_or(default_planner.default_backfill_batch_rows),
            use_fast_not_null: raw.planner.use_fast_not_null,
            use_batched_backfill: raw.planner.use_batched_backfill || raw.planner.large_table_mode,
            emit_data_validation_hints: raw
                .planner
                .emit_data_validation_hints
                .unwrap_or(default_planner.emit_data_validation_hints),
            unique_nulls_not_distinct: raw.planner.unique_nulls_not_distinct,
            add_banner_for_non_txn: raw.planner.add_banner_for_non_txn,
        },
        target_pg_major,
    }
}

fn parse_major_version(version: &str) -> Option<u16> {
    version.split('.').next()?.parse().ok()
}

/// Resolves a hints file from an explicit `--schema-hints` path, falling
/// back to `./schema_hints.yml` then `{out_dir}/schema_hints.yml`
/// (`original_source/schema_agent/cli.py`'s `diff` command).
#[must_use]
pub fn resolve_hints_path(explicit: Option<&Path>, out_dir: &Path) -> Option<std::path::PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    for candidate in [Path::new("schema_hints.yml").to_path_buf(), out_dir.join("schema_hints.yml")] {
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_degrades_to_default() {
        assert_eq!(load_hints(None), Hints::default());
    }

    #[test]
    fn parses_target_version_into_major() {
        let raw: RawHints = serde_yaml::from_str(
            "dialect:\n  postgres:\n    target_version: \"14.2\"\n",
        )
        .unwrap();
        let hints = into_hints(raw);
        assert_eq!(hints.target_pg_major, Some(14));
    }

    #[test]
    fn large_table_mode_aliases_use_batched_backfill() {
        let raw: RawHints = serde_yaml::from_str("planner:\n  large_table_mode: true\n").unwrap();
        let hints = into_hints(raw);
        assert!(hints.planner.use_batched_backfill);
    }
}
