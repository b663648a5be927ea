//! Remaining invariants from `spec.md` §8 that need the planner/emitter,
//! not just the differ or scheduler (invariants 1 full pipeline, 3, 4, 5, 6).

use pgdelta_core::{Column, GeneratedMigration, Hints, PlannerHints, Schema, Table, diff_schema, schedule_steps};
use pgdelta_dialect_postgres::{generate_postgres_sql, plan_postgres};

fn run(base: &Schema, head: &Schema, hints: &Hints) -> GeneratedMigration {
    let ops = diff_schema(base, head, hints);
    let steps = plan_postgres(base, head, &ops, hints);
    let ordered = schedule_steps(steps);
    generate_postgres_sql(&ordered, hints)
}

fn sample_schema() -> Schema {
    let mut users = Table::named("users");
    users.columns.insert("id".to_string(), Column::new("id", "BIGINT", false));
    users
        .columns
        .insert("email".to_string(), Column::new("email", "TEXT", false));
    users.primary_key = vec!["id".to_string()];
    let mut schema = Schema::new("postgresql");
    schema.tables.insert(users.name.clone(), users);
    schema
}

#[test]
fn invariant_1_identical_snapshots_yield_empty_plan() {
    let schema = sample_schema();
    let migration = run(&schema, &schema.clone(), &Hints::default());

    assert_eq!(migration.forward_sql, "-- no schema changes detected\n");
    assert_eq!(migration.rollback_sql, "-- no schema changes detected\n");
    assert!(migration.summary.tables.is_empty());
    assert!(!migration.summary.unsafe_changes);
}

#[test]
fn invariant_3_reverse_sql_is_nonempty_and_same_table() {
    let base = sample_schema();
    let mut orders = Table::named("orders");
    orders.columns.insert("id".to_string(), Column::new("id", "BIGINT", false));
    let mut head = base.clone();
    head.tables.insert("orders".to_string(), orders);

    let ops = diff_schema(&base, &head, &Hints::default());
    let steps = plan_postgres(&base, &head, &ops, &Hints::default());

    for step in steps.iter().filter(|s| s.reverse_sql.is_some()) {
        let reverse = step.reverse_sql.as_ref().unwrap();
        assert!(!reverse.trim().is_empty());
        if let Some(table) = &step.table {
            assert!(reverse.contains(table.as_str()));
        }
    }
}

#[test]
fn invariant_4_allowlist_flips_destructive_flag() {
    let mut base = sample_schema();
    base.tables.get_mut("users").unwrap().columns.insert(
        "legacy_flag".to_string(),
        Column::new("legacy_flag", "BOOLEAN", true),
    );
    let mut head = base.clone();
    head.tables.get_mut("users").unwrap().columns.remove("legacy_flag");

    let ops = diff_schema(&base, &head, &Hints::default());

    let steps_blocked = plan_postgres(&base, &head, &ops, &Hints::default());
    assert!(steps_blocked.iter().any(|s| s.destructive));

    let hints_allowed = Hints {
        unsafe_allow: vec!["drop_column: users.legacy_flag".to_string()],
        ..Hints::default()
    };
    let steps_allowed = plan_postgres(&base, &head, &ops, &hints_allowed);
    assert!(!steps_allowed.iter().any(|s| s.destructive));
}

#[test]
fn invariant_5_concurrent_index_gets_banner_when_enabled() {
    let base = sample_schema();
    let mut head = base.clone();
    let index = pgdelta_core::Index {
        name: "idx_users_email".to_string(),
        columns: vec!["email".to_string()],
        unique: false,
        method: "btree".to_string(),
        include: None,
    };
    head.tables.get_mut("users").unwrap().indexes.insert(index.name.clone(), index);

    let hints = Hints {
        planner: PlannerHints {
            add_banner_for_non_txn: true,
            ..PlannerHints::default()
        },
        ..Hints::default()
    };

    let migration = run(&base, &head, &hints);
    assert!(migration.forward_sql.contains("INDEX CONCURRENTLY"));
    assert!(migration.forward_sql.starts_with("-- NOTE: This migration must run OUTSIDE a transaction"));
}

#[test]
fn invariant_6_type_compatible_rename_with_no_hint() {
    let mut base = Table::named("orders");
    base.columns
        .insert("qty".to_string(), Column::new("qty", "INTEGER", false));
    let mut head = base.clone();
    head.columns.remove("qty");
    head.columns
        .insert("quantity".to_string(), Column::new("quantity", "BIGINT", false));

    let mut base_schema = Schema::new("postgresql");
    base_schema.tables.insert("orders".to_string(), base);
    let mut head_schema = Schema::new("postgresql");
    head_schema.tables.insert("orders".to_string(), head);

    let ops = diff_schema(&base_schema, &head_schema, &Hints::default());

    let renames: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, pgdelta_core::Op::RenameColumn { .. }))
        .collect();
    assert_eq!(renames.len(), 1);
    assert!(!ops.iter().any(|op| matches!(op, pgdelta_core::Op::AddColumn { .. })));
    assert!(!ops.iter().any(|op| matches!(op, pgdelta_core::Op::DropColumn { .. })));
}
