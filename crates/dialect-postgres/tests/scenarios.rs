//! End-to-end scenarios covering differ -> planner -> scheduler -> emitter.

use std::collections::BTreeMap;

use pgdelta_core::{Column, Hints, PlannerHints, Schema, Table, diff_schema, schedule_steps};
use pgdelta_dialect_postgres::{generate_postgres_sql, plan_postgres};

fn run(base: &Schema, head: &Schema, hints: &Hints) -> pgdelta_core::GeneratedMigration {
    let ops = diff_schema(base, head, hints);
    let steps = plan_postgres(base, head, &ops, hints);
    let ordered = schedule_steps(steps);
    generate_postgres_sql(&ordered, hints)
}

fn col(name: &str, data_type: &str, nullable: bool) -> Column {
    Column::new(name, data_type, nullable)
}

fn schema(tables: Vec<Table>) -> Schema {
    let mut schema = Schema::new("postgresql");
    for table in tables {
        schema.tables.insert(table.name.clone(), table);
    }
    schema
}

#[test]
fn scenario_a_add_not_null_column_with_default() {
    let mut users = Table::named("users");
    users.columns.insert("id".to_string(), col("id", "BIGINT", false));
    users.columns.insert("email".to_string(), col("email", "TEXT", false));
    users.primary_key = vec!["id".to_string()];
    users.uniques = vec![vec!["email".to_string()]];
    let base = schema(vec![users.clone()]);

    let mut created_at = col("created_at", "TIMESTAMPTZ", false);
    created_at.default = Some("now()".to_string());
    users.columns.insert("created_at".to_string(), created_at);
    let head = schema(vec![users]);

    let migration = run(&base, &head, &Hints::default());

    let add_idx = migration
        .forward_sql
        .find("ALTER TABLE users ADD COLUMN IF NOT EXISTS created_at")
        .expect("forward contains ADD COLUMN");
    let default_idx = migration
        .forward_sql
        .find("ALTER TABLE users ALTER COLUMN created_at SET DEFAULT now();")
        .expect("forward contains SET DEFAULT");
    let backfill_idx = migration
        .forward_sql
        .find("UPDATE users SET created_at = now() WHERE created_at IS NULL;")
        .expect("forward contains backfill UPDATE");
    let notnull_idx = migration
        .forward_sql
        .find("ALTER TABLE users ALTER COLUMN created_at SET NOT NULL;")
        .expect("forward contains SET NOT NULL");

    assert!(add_idx < default_idx);
    assert!(default_idx < backfill_idx);
    assert!(backfill_idx < notnull_idx);

    assert!(
        migration
            .rollback_sql
            .contains("ALTER TABLE users DROP COLUMN IF EXISTS created_at;")
    );
}

#[test]
fn scenario_b_create_new_table() {
    let base = schema(vec![]);

    let mut orders = Table::named("orders");
    orders.columns.insert("id".to_string(), col("id", "BIGINT", false));
    orders
        .columns
        .insert("user_id".to_string(), col("user_id", "BIGINT", false));
    orders.primary_key = vec!["id".to_string()];
    let head = schema(vec![orders]);

    let migration = run(&base, &head, &Hints::default());

    assert!(migration.forward_sql.contains("CREATE TABLE IF NOT EXISTS orders ("));
    assert!(migration.rollback_sql.contains("DROP TABLE IF EXISTS orders;"));
}

#[test]
fn scenario_c_rename_with_hint() {
    let mut orders = Table::named("orders");
    orders
        .columns
        .insert("total_price".to_string(), col("total_price", "NUMERIC(12,2)", true));
    let base = schema(vec![orders.clone()]);

    orders.columns.remove("total_price");
    let mut amount = col("amount", "NUMERIC(12,2)", false);
    amount.default = Some("0".to_string());
    orders.columns.insert("amount".to_string(), amount);
    let head = schema(vec![orders]);

    let mut renames = BTreeMap::new();
    renames.insert("orders.total_price".to_string(), "orders.amount".to_string());
    let hints = Hints {
        renames,
        ..Hints::default()
    };

    let ops = diff_schema(&base, &head, &hints);

    assert!(ops.iter().any(|op| matches!(
        op,
        pgdelta_core::Op::RenameColumn { table, from, to }
            if table == "orders" && from == "total_price" && to == "amount"
    )));
    assert!(ops.iter().any(|op| matches!(op, pgdelta_core::Op::AlterNullable { .. })));
    assert!(ops.iter().any(|op| matches!(op, pgdelta_core::Op::AlterDefault { .. })));
    assert!(!ops.iter().any(|op| matches!(op, pgdelta_core::Op::AddColumn { .. })));
    assert!(!ops.iter().any(|op| matches!(op, pgdelta_core::Op::DropColumn { .. })));
}

#[test]
fn scenario_d_dangerous_drop_without_allowlist() {
    let mut users = Table::named("users");
    users.columns.insert("id".to_string(), col("id", "BIGINT", false));
    users.columns.insert("name".to_string(), col("name", "TEXT", false));
    let base = schema(vec![users.clone()]);

    users.columns.remove("name");
    let head = schema(vec![users]);

    let migration = run(&base, &head, &Hints::default());

    assert!(migration.forward_sql.contains("-- DESTRUCTIVE"));
    assert!(migration.forward_sql.contains("-- ALTER TABLE users DROP COLUMN IF EXISTS"));
    assert!(migration.summary.unsafe_changes);
}

#[test]
fn scenario_f_fast_not_null_path() {
    let mut users = Table::named("users");
    users.columns.insert("id".to_string(), col("id", "BIGINT", false));
    users.columns.insert("active".to_string(), col("active", "BOOLEAN", true));
    let base = schema(vec![users.clone()]);

    users
        .columns
        .insert("active".to_string(), col("active", "BOOLEAN", false));
    let head = schema(vec![users]);

    let hints = Hints {
        planner: PlannerHints {
            use_fast_not_null: true,
            ..PlannerHints::default()
        },
        ..Hints::default()
    };

    let migration = run(&base, &head, &hints);
    let forward = &migration.forward_sql;

    let backfill_idx = forward.find("UPDATE users SET active").expect("backfill present");
    let add_chk_idx = forward
        .find("ADD CONSTRAINT chk_users_active_nn CHECK (active IS NOT NULL) NOT VALID;")
        .expect("not-valid check present");
    let validate_idx = forward
        .find("VALIDATE CONSTRAINT chk_users_active_nn;")
        .expect("validate present");
    let set_nn_idx = forward
        .find("ALTER TABLE users ALTER COLUMN active SET NOT NULL;")
        .expect("set not null present");
    let drop_chk_idx = forward
        .find("DROP CONSTRAINT IF EXISTS chk_users_active_nn;")
        .expect("drop constraint present");

    assert!(backfill_idx < add_chk_idx);
    assert!(add_chk_idx < validate_idx);
    assert!(validate_idx < set_nn_idx);
    assert!(set_nn_idx < drop_chk_idx);
}
