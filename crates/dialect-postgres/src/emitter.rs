//! `Vec<Step> -> (forward_sql, rollback_sql, Summary)` for PostgreSQL
//! (`spec.md` §4.4).

use std::collections::{BTreeMap, BTreeSet};

use pgdelta_core::{GeneratedMigration, Hints, Phase, RiskFlag, Step, Summary, TableSummary};

const GLOBAL_BUCKET: &str = "__global__";

/// Groups `steps` by table (in first-seen order) and renders forward SQL,
/// rollback SQL, and the per-table summary.
#[must_use]
pub fn generate_postgres_sql(steps: &[Step], hints: &Hints) -> GeneratedMigration {
    if steps.is_empty() {
        return GeneratedMigration {
            forward_sql: "-- no schema changes detected\n".to_string(),
            rollback_sql: "-- no schema changes detected\n".to_string(),
            summary: Summary::default(),
        };
    }

    let mut buckets: Vec<&str> = Vec::new();
    let mut by_bucket: BTreeMap<&str, Vec<&Step>> = BTreeMap::new();
    for step in steps {
        let bucket = step.table.as_deref().unwrap_or(GLOBAL_BUCKET);
        if !by_bucket.contains_key(bucket) {
            buckets.push(bucket);
        }
        by_bucket.entry(bucket).or_default().push(step);
    }

    let mut forward_lines = Vec::new();
    let mut rollback_lines = Vec::new();
    let mut summary = Summary::default();

    for bucket in &buckets {
        let bucket_steps = &by_bucket[bucket];

        forward_lines.push(format!("-- ==== Table: {bucket} ===="));
        for step in bucket_steps.iter() {
            if step.destructive {
                forward_lines.push("-- DESTRUCTIVE (commented out by default):".to_string());
                for line in step.sql.lines() {
                    forward_lines.push(format!("-- {line}"));
                }
            } else {
                forward_lines.push(step.sql.clone());
            }
        }

        rollback_lines.push(format!("-- ==== Table: {bucket} (rollback) ===="));
        for step in bucket_steps.iter().rev() {
            if let Some(reverse_sql) = &step.reverse_sql {
                rollback_lines.push(reverse_sql.clone());
            } else {
                if step.reversible {
                    rollback_lines.push(format!("-- rollback for step {} may be lossy", step.id));
                }
                rollback_lines.push(format!("-- forward: {}", step.sql));
            }
        }

        summary
            .tables
            .insert((*bucket).to_string(), table_summary(bucket_steps, &mut summary.unsafe_changes));
    }

    let mut forward_sql = forward_lines.join("\n") + "\n";
    let rollback_sql = rollback_lines.join("\n") + "\n";

    if hints.planner.add_banner_for_non_txn && forward_sql.contains("INDEX CONCURRENTLY") {
        let banner = "-- NOTE: This migration must run OUTSIDE a transaction due to CONCURRENTLY.\n\n";
        forward_sql = format!("{banner}{forward_sql}");
    }

    GeneratedMigration {
        forward_sql,
        rollback_sql,
        summary,
    }
}

fn table_summary(steps: &[&Step], unsafe_changes: &mut bool) -> TableSummary {
    let mut phase_counts = [0usize; 5];
    let mut risks = BTreeSet::new();
    let mut ops = BTreeSet::new();

    for step in steps {
        phase_counts[phase_index(step.phase)] += 1;
        ops.insert(step.phase);

        if step.sql.contains("NOT VALID") {
            risks.insert(RiskFlag::FkValidate);
        }
        if step.sql.contains("CREATE") && step.sql.contains("INDEX CONCURRENTLY") {
            risks.insert(RiskFlag::ConcurrentIndex);
        }
        if step.sql.contains("SET NOT NULL") {
            risks.insert(RiskFlag::NotNullTighten);
        }
        if step.sql.contains("USING") && step.sql.contains("ALTER COLUMN") && step.sql.contains("TYPE") {
            risks.insert(RiskFlag::RewriteLikely);
        }
        if step.sql.contains("<DEFAULT_OR_EXPR>") {
            risks.insert(RiskFlag::NeedsManualBackfillExpr);
        }
        if step.destructive {
            risks.insert(RiskFlag::DestructivePresent);
            *unsafe_changes = true;
        }
    }

    TableSummary {
        ops,
        risks,
        phase_counts,
    }
}

fn phase_index(phase: Phase) -> usize {
    match phase {
        Phase::Prep => 0,
        Phase::Backfill => 1,
        Phase::Tighten => 2,
        Phase::Indexes => 3,
        Phase::Finalize => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdelta_core::Step as CoreStep;

    #[test]
    fn empty_plan_yields_sentinel() {
        let migration = generate_postgres_sql(&[], &Hints::default());
        assert_eq!(migration.forward_sql, "-- no schema changes detected\n");
        assert_eq!(migration.rollback_sql, "-- no schema changes detected\n");
    }

    #[test]
    fn destructive_step_is_commented_out_and_flagged_unsafe() {
        let step = CoreStep::new(
            "s1",
            Some("users".to_string()),
            "DROP TABLE users;",
            Phase::Finalize,
        )
        .destructive();
        let migration = generate_postgres_sql(&[step], &Hints::default());

        assert!(migration.forward_sql.contains("-- DESTRUCTIVE"));
        assert!(migration.forward_sql.contains("-- DROP TABLE users;"));
        assert!(migration.summary.unsafe_changes);
        assert!(migration.summary.tables["users"]
            .risks
            .contains(&RiskFlag::DestructivePresent));
    }
}
