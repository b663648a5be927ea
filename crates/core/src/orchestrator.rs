//! Wires differ → planner → scheduler → emitter behind the dialect
//! registry (`spec.md` §2 data flow, §9 design note on registries as
//! write-once process state).

use serde::{Deserialize, Serialize};

use crate::diff::diff_schema;
use crate::error::Result;
use crate::hints::Hints;
use crate::ir::Schema;
use crate::registry::DialectRegistry;
use crate::scheduler::schedule_steps;
use crate::step::Phase;

/// One risk flag inferred by the emitter's substring scan (`spec.md`
/// §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    FkValidate,
    ConcurrentIndex,
    NotNullTighten,
    RewriteLikely,
    DestructivePresent,
    /// Design Note 3: the `<DEFAULT_OR_EXPR>` placeholder was emitted
    /// verbatim and needs a human to fill it in before this migration can
    /// run.
    NeedsManualBackfillExpr,
}

/// Per-table (or `__global__`) summary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// The set of phases observed among this table's steps.
    pub ops: std::collections::BTreeSet<Phase>,
    pub risks: std::collections::BTreeSet<RiskFlag>,
    /// Phase counts in `(prep, backfill, tighten, indexes, finalize)`
    /// order.
    pub phase_counts: [usize; 5],
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub tables: std::collections::BTreeMap<String, TableSummary>,
    #[serde(rename = "unsafe")]
    pub unsafe_changes: bool,
}

/// Final output of one pipeline run: forward/rollback SQL and the
/// summary used to render the CLI table and `--summary-json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMigration {
    pub forward_sql: String,
    pub rollback_sql: String,
    pub summary: Summary,
}

/// Runs the full pipeline for one `(base, head)` pair under `dialect`.
///
/// # Errors
/// Returns [`crate::Error::UnknownDialect`] if `dialect` has no registered
/// planner or emitter. Every other failure mode named in `spec.md` §7
/// (malformed hints, IR invariant violations, scheduler cycles) degrades
/// silently rather than erroring here.
pub fn run_pipeline(
    base: &Schema,
    head: &Schema,
    dialect: &str,
    hints: &Hints,
    registry: &DialectRegistry,
) -> Result<GeneratedMigration> {
    let planner = registry.planner_or_err(dialect)?;
    let emitter = registry.emitter_or_err(dialect)?;

    let ops = diff_schema(base, head, hints);
    let steps = planner(base, head, &ops, hints);
    let ordered = schedule_steps(steps);

    Ok(emitter(&ordered, hints))
}
