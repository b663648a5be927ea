//! `Vec<Op> -> Vec<Step>` for PostgreSQL (`spec.md` §4.2).

use std::collections::BTreeMap;

use pgdelta_core::{Column, Hints, Op, Phase, Schema, Step};

/// Plans a PostgreSQL migration from the differ's op list.
///
/// Deterministic given `(base, head, ops, hints)`: op order drives step
/// id assignment (`s1, s2, ...`), and every per-table/per-column lookup
/// used for dependency wiring is keyed so iteration order never affects
/// the result (`spec.md` §5).
#[must_use]
pub fn plan_postgres(_base: &Schema, head: &Schema, ops: &[Op], hints: &Hints) -> Vec<Step> {
    let mut planner = Planner::new(head, hints);
    for op in ops {
        planner.plan_op(op);
    }
    planner.finish()
}

struct Planner<'a> {
    head: &'a Schema,
    hints: &'a Hints,
    steps: Vec<Step>,
    next_id: u64,
    table_rename_step: BTreeMap<String, String>,
    default_step_by_col: BTreeMap<(String, String), String>,
    backfill_step_by_col: BTreeMap<(String, String), String>,
    notnull_step_by_col: BTreeMap<(String, String), String>,
    validate_steps: Vec<String>,
    add_constraint_steps: Vec<String>,
}

impl<'a> Planner<'a> {
    fn new(head: &'a Schema, hints: &'a Hints) -> Self {
        Self {
            head,
            hints,
            steps: Vec::new(),
            next_id: 0,
            table_rename_step: BTreeMap::new(),
            default_step_by_col: BTreeMap::new(),
            backfill_step_by_col: BTreeMap::new(),
            notnull_step_by_col: BTreeMap::new(),
            validate_steps: Vec::new(),
            add_constraint_steps: Vec::new(),
        }
    }

    fn add_step(
        &mut self,
        table: Option<&str>,
        sql: impl Into<String>,
        phase: Phase,
        reversible: bool,
        mut depends_on: Vec<String>,
        destructive: bool,
        reverse_sql: Option<String>,
    ) -> String {
        self.next_id += 1;
        let id = format!("s{}", self.next_id);

        if let Some(table) = table
            && let Some(rename_id) = self.table_rename_step.get(table)
            && !depends_on.contains(rename_id)
        {
            depends_on.push(rename_id.clone());
        }

        let mut step = Step::new(&id, table.map(str::to_string), sql, phase).depends_on(depends_on);
        if reversible {
            step.reversible = true;
        }
        if let Some(reverse_sql) = reverse_sql {
            step.reversible = true;
            step.reverse_sql = Some(reverse_sql);
        }
        if destructive {
            step = step.destructive();
        }
        self.steps.push(step);
        id
    }

    fn is_allowed(&self, kind: &str, table: Option<&str>, name: Option<&str>) -> bool {
        self.hints.is_allowed(kind, table, name)
    }

    fn backfill_sql(&self, table: &str, column: &str, expr: &str) -> String {
        if self.hints.planner.use_batched_backfill {
            let batch = self.hints.planner.default_backfill_batch_rows;
            format!(
                "-- Batched backfill\nDO $$\nDECLARE _batch INT := {batch};\nBEGIN\n  LOOP\n    UPDATE {table} SET {column} = {expr}\n    WHERE {column} IS NULL AND ctid IN (\n      SELECT ctid FROM {table} WHERE {column} IS NULL LIMIT _batch\n    );\n    EXIT WHEN NOT FOUND;\n  END LOOP;\nEND $$;"
            )
        } else {
            format!("UPDATE {table} SET {column} = {expr} WHERE {column} IS NULL;")
        }
    }

    fn plan_op(&mut self, op: &Op) {
        match op {
            Op::RenameColumn { table, from, to } => self.plan_rename_column(table, from, to),
            Op::AddColumn { table, column } => self.plan_add_column(table, column),
            Op::DropColumn { table, column } => self.plan_drop_column(table, column),
            Op::AlterColumnType {
                table,
                column,
                to_type,
                ..
            } => self.plan_alter_column_type(table, column, to_type),
            Op::AlterNullable {
                table,
                column,
                nullable,
            } => self.plan_alter_nullable(table, column, *nullable),
            Op::AlterDefault {
                table,
                column,
                default,
            } => self.plan_alter_default(table, column, default.as_deref()),
            Op::AddIndex { table, index } => self.plan_add_index(table, index),
            Op::DropIndex { table, index } => self.plan_drop_index(table, index),
            Op::AddForeignKey { table, foreign_key } => self.plan_add_fk(table, foreign_key),
            Op::DropForeignKey { table, foreign_key } => self.plan_drop_fk(table, foreign_key),
            Op::AddCheck { table, name, expr } => self.plan_add_check(table, name, expr),
            Op::DropCheck { table, name } => self.plan_drop_check(table, name),
            Op::AddUnique { table, columns } => self.plan_add_unique(table, columns),
            Op::DropUnique { table, columns } => self.plan_drop_unique(table, columns),
            Op::CreateTable { table, def } => self.plan_create_table(table, def),
            Op::DropTable { table } => self.plan_drop_table(table),
            Op::RenameTable { table, .. } => {
                // Never constructed by the differ; see `spec.md` §9 open question 1.
                let _ = table;
            }
        }
    }

    fn plan_rename_column(&mut self, table: &str, from: &str, to: &str) {
        let id = self.add_step(
            Some(table),
            format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to};"),
            Phase::Prep,
            true,
            Vec::new(),
            false,
            None,
        );
        self.table_rename_step.insert(table.to_string(), id);
    }

    fn plan_add_column(&mut self, table: &str, column: &Column) {
        let name = column.name.as_str();
        let null_sql = if column.nullable { "" } else { " NULL" };
        let create_sql = format!(
            "ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {name} {}{null_sql};",
            column.data_type
        );
        self.add_step(
            Some(table),
            create_sql,
            Phase::Prep,
            true,
            Vec::new(),
            false,
            Some(format!("ALTER TABLE {table} DROP COLUMN IF EXISTS {name};")),
        );

        if let Some(default) = &column.default {
            let did = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ALTER COLUMN {name} SET DEFAULT {default};"),
                Phase::Tighten,
                true,
                Vec::new(),
                false,
                None,
            );
            self.default_step_by_col
                .insert((table.to_string(), column.name.clone()), did);
        }

        if !column.nullable {
            let default_expr = column.default.clone().unwrap_or_else(|| "NULL".to_string());
            let bf_sql = self.backfill_sql(table, name, &default_expr);
            let bf_dep = self
                .default_step_by_col
                .get(&(table.to_string(), column.name.clone()))
                .cloned()
                .into_iter()
                .collect();
            let bf_id = self.add_step(Some(table), bf_sql, Phase::Backfill, false, bf_dep, false, None);
            self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ALTER COLUMN {name} SET NOT NULL;"),
                Phase::Tighten,
                true,
                vec![bf_id],
                false,
                None,
            );
        }
    }

    fn plan_alter_default(&mut self, table: &str, column: &str, default: Option<&str>) {
        let name = column;
        let sql = match default {
            Some(expr) => format!("ALTER TABLE {table} ALTER COLUMN {name} SET DEFAULT {expr};"),
            None => format!("ALTER TABLE {table} ALTER COLUMN {name} DROP DEFAULT;"),
        };
        let reverse = default.map(|_| format!("ALTER TABLE {table} ALTER COLUMN {name} DROP DEFAULT;"));
        let did = self.add_step(Some(table), sql, Phase::Tighten, true, Vec::new(), false, reverse);
        self.default_step_by_col
            .insert((table.to_string(), column.to_string()), did.clone());

        if let Some(bf) = self
            .backfill_step_by_col
            .get(&(table.to_string(), column.to_string()))
            .cloned()
            && let Some(step) = self.steps.iter_mut().find(|s| s.id == bf)
            && !step.depends_on.contains(&did)
        {
            step.depends_on.push(did);
        }
    }

    fn plan_alter_nullable(&mut self, table: &str, column: &str, nullable: bool) {
        let name = column;
        if nullable {
            self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ALTER COLUMN {name} DROP NOT NULL;"),
                Phase::Finalize,
                true,
                Vec::new(),
                false,
                None,
            );
            return;
        }

        let mut bf_dep = Vec::new();
        if let Some(did) = self
            .default_step_by_col
            .get(&(table.to_string(), column.to_string()))
        {
            bf_dep.push(did.clone());
        }

        let bf_expr = self
            .head
            .tables
            .get(table)
            .and_then(|t| t.columns.get(column))
            .and_then(|c| c.default.clone())
            .unwrap_or_else(|| "<DEFAULT_OR_EXPR>".to_string());

        let bf_sql = self.backfill_sql(table, name, &bf_expr);
        let bf_id = self.add_step(Some(table), bf_sql, Phase::Backfill, false, bf_dep, false, None);
        self.backfill_step_by_col
            .insert((table.to_string(), column.to_string()), bf_id.clone());

        if self.hints.planner.use_fast_not_null {
            let chk_name = format!("chk_{table}_{column}_nn");
            let add_id = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ADD CONSTRAINT {chk_name} CHECK ({name} IS NOT NULL) NOT VALID;"),
                Phase::Prep,
                true,
                vec![bf_id],
                false,
                None,
            );
            let v_id = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} VALIDATE CONSTRAINT {chk_name};"),
                Phase::Tighten,
                true,
                vec![add_id.clone()],
                false,
                None,
            );
            let nn_id = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ALTER COLUMN {name} SET NOT NULL;"),
                Phase::Tighten,
                true,
                vec![v_id],
                false,
                Some(format!("ALTER TABLE {table} ALTER COLUMN {name} DROP NOT NULL;")),
            );
            self.add_step(
                Some(table),
                format!("ALTER TABLE {table} DROP CONSTRAINT IF EXISTS {chk_name};"),
                Phase::Finalize,
                true,
                vec![nn_id.clone()],
                false,
                None,
            );
            self.notnull_step_by_col
                .insert((table.to_string(), column.to_string()), nn_id);
        } else {
            let nn_id = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ALTER COLUMN {name} SET NOT NULL;"),
                Phase::Tighten,
                true,
                vec![bf_id],
                false,
                Some(format!("ALTER TABLE {table} ALTER COLUMN {name} DROP NOT NULL;")),
            );
            self.notnull_step_by_col
                .insert((table.to_string(), column.to_string()), nn_id);
        }
    }

    fn plan_alter_column_type(&mut self, table: &str, column: &str, to_type: &str) {
        let name = column;
        self.add_step(
            Some(table),
            format!("ALTER TABLE {table} ALTER COLUMN {name} TYPE {to_type} USING {name}::{to_type};"),
            Phase::Finalize,
            true,
            Vec::new(),
            false,
            None,
        );
    }

    fn plan_add_index(&mut self, table: &str, index: &pgdelta_core::Index) {
        let cols = index.columns.join(", ");
        let unique = if index.unique { "UNIQUE " } else { "" };
        self.add_step(
            Some(table),
            format!(
                "CREATE {unique}INDEX CONCURRENTLY IF NOT EXISTS {} ON {table} USING {} ({cols});",
                index.name, index.method
            ),
            Phase::Indexes,
            true,
            Vec::new(),
            false,
            None,
        );
    }

    fn plan_drop_index(&mut self, table: &str, index: &str) {
        let destructive = !self.is_allowed("drop_index", None, Some(index));
        self.add_step(
            Some(table),
            format!("DROP INDEX CONCURRENTLY IF EXISTS {index};"),
            Phase::Indexes,
            true,
            Vec::new(),
            destructive,
            None,
        );
    }

    fn plan_add_fk(&mut self, table: &str, fk: &pgdelta_core::ForeignKey) {
        let cols = fk.columns.join(", ");
        let rcols = fk.ref_columns.join(", ");
        let mut clauses = Vec::new();
        if let Some(on_delete) = &fk.on_delete {
            clauses.push(format!("ON DELETE {on_delete}"));
        }
        if let Some(on_update) = &fk.on_update {
            clauses.push(format!("ON UPDATE {on_update}"));
        }
        let clause_sql = clauses.join(" ");
        let add_id = self.add_step(
            Some(table),
            format!(
                "ALTER TABLE {table} ADD CONSTRAINT {} FOREIGN KEY ({cols}) REFERENCES {} ({rcols}) {clause_sql} NOT VALID;",
                fk.name, fk.ref_table
            ),
            Phase::Prep,
            true,
            Vec::new(),
            false,
            None,
        );
        self.add_constraint_steps.push(add_id.clone());

        if self.hints.planner.emit_data_validation_hints {
            let first_local = fk.columns.first().map(String::as_str).unwrap_or_default();
            let first_ref = fk.ref_columns.first().map(String::as_str).unwrap_or_default();
            self.add_step(
                Some(table),
                format!(
                    "-- OPTIONAL: handle orphans before FK VALIDATE\n-- DELETE FROM {table} child WHERE NOT EXISTS (SELECT 1 FROM {} parent WHERE parent.{first_ref} = child.{first_local});\n-- or UPDATE to a fallback value per your rules",
                    fk.ref_table
                ),
                Phase::Backfill,
                false,
                vec![add_id.clone()],
                false,
                None,
            );
        }

        let v_id = self.add_step(
            Some(table),
            format!("ALTER TABLE {table} VALIDATE CONSTRAINT {};", fk.name),
            Phase::Tighten,
            true,
            vec![add_id],
            false,
            None,
        );
        self.validate_steps.push(v_id);
    }

    fn plan_drop_fk(&mut self, table: &str, name: &str) {
        self.add_step(
            Some(table),
            format!("ALTER TABLE {table} DROP CONSTRAINT IF EXISTS {name};"),
            Phase::Finalize,
            true,
            Vec::new(),
            true,
            None,
        );
    }

    fn plan_add_check(&mut self, table: &str, name: &str, expr: &str) {
        let add_id = self.add_step(
            Some(table),
            format!("ALTER TABLE {table} ADD CONSTRAINT {name} CHECK ({expr}) NOT VALID;"),
            Phase::Prep,
            true,
            Vec::new(),
            false,
            None,
        );
        self.add_constraint_steps.push(add_id.clone());

        if self.hints.planner.emit_data_validation_hints {
            self.add_step(
                Some(table),
                format!(
                    "-- OPTIONAL: ensure existing rows satisfy check before validation\n-- For example, if expression is {expr}, you may need to clean up violating rows."
                ),
                Phase::Backfill,
                false,
                vec![add_id.clone()],
                false,
                None,
            );
        }

        let v_id = self.add_step(
            Some(table),
            format!("ALTER TABLE {table} VALIDATE CONSTRAINT {name};"),
            Phase::Tighten,
            true,
            vec![add_id],
            false,
            None,
        );
        self.validate_steps.push(v_id);
    }

    fn plan_drop_check(&mut self, table: &str, name: &str) {
        let destructive = !self.is_allowed("drop_check", Some(table), Some(name));
        self.add_step(
            Some(table),
            format!("ALTER TABLE {table} DROP CONSTRAINT IF EXISTS {name};"),
            Phase::Finalize,
            true,
            Vec::new(),
            destructive,
            None,
        );
    }

    fn unique_names(table: &str, columns: &[String]) -> (String, String) {
        let joined = columns.join("_");
        (format!("uq_{table}_{joined}_idx"), format!("uq_{table}_{joined}"))
    }

    fn plan_add_unique(&mut self, table: &str, columns: &[String]) {
        let (idx_name, constraint_name) = Self::unique_names(table, columns);
        let mut cols = columns.join(", ");
        if self.hints.planner.unique_nulls_not_distinct && columns.len() == 1 {
            cols = format!("{cols} NULLS NOT DISTINCT");
        }
        self.add_step(
            Some(table),
            format!(
                "-- OPTIONAL: check duplicates before unique enforcement\n-- SELECT {}, COUNT(*) FROM {table} GROUP BY {} HAVING COUNT(*) > 1;",
                columns.join(", "),
                columns.join(", ")
            ),
            Phase::Prep,
            false,
            Vec::new(),
            false,
            None,
        );
        self.add_step(
            Some(table),
            format!("CREATE UNIQUE INDEX CONCURRENTLY IF NOT EXISTS {idx_name} ON {table} ({cols});"),
            Phase::Indexes,
            true,
            Vec::new(),
            false,
            None,
        );
        self.add_step(
            Some(table),
            unique_attach_guard(table, &idx_name, &constraint_name),
            Phase::Finalize,
            true,
            Vec::new(),
            false,
            None,
        );
    }

    fn plan_drop_unique(&mut self, table: &str, columns: &[String]) {
        let (_, constraint_name) = Self::unique_names(table, columns);
        let destructive = !self.is_allowed("drop_unique", Some(table), Some(&columns.join("_")));
        self.add_step(
            Some(table),
            format!("ALTER TABLE {table} DROP CONSTRAINT IF EXISTS {constraint_name};"),
            Phase::Finalize,
            true,
            Vec::new(),
            destructive,
            None,
        );
    }

    fn plan_create_table(&mut self, table: &str, def: &pgdelta_core::Table) {
        let mut col_defs = Vec::new();
        for (cname, column) in &def.columns {
            let mut pieces = vec![cname.clone(), column.data_type.clone()];
            if def.primary_key.len() == 1 && def.primary_key[0] == *cname {
                pieces.push("PRIMARY KEY".to_string());
            }
            if !column.nullable {
                pieces.push("NOT NULL".to_string());
            }
            if let Some(default) = &column.default {
                pieces.push(format!("DEFAULT {default}"));
            }
            col_defs.push(pieces.join(" "));
        }
        if def.primary_key.len() > 1 {
            let cols = def.primary_key.join(", ");
            col_defs.push(format!("PRIMARY KEY ({cols})"));
        }
        let body = col_defs.join(",\n  ");
        self.add_step(
            Some(table),
            format!("CREATE TABLE IF NOT EXISTS {table} (\n  {body}\n);"),
            Phase::Prep,
            false,
            Vec::new(),
            false,
            Some(format!("DROP TABLE IF EXISTS {table};")),
        );

        for (name, expr) in &def.checks {
            let add_id = self.add_step(
                Some(table),
                format!("ALTER TABLE {table} ADD CONSTRAINT {name} CHECK ({expr}) NOT VALID;"),
                Phase::Prep,
                true,
                Vec::new(),
                false,
                None,
            );
            self.add_step(
                Some(table),
                format!("ALTER TABLE {table} VALIDATE CONSTRAINT {name};"),
                Phase::Tighten,
                true,
                vec![add_id],
                false,
                None,
            );
        }

        for columns in &def.uniques {
            let (idx_name, constraint_name) = Self::unique_names(table, columns);
            let cols = columns.join(", ");
            self.add_step(
                Some(table),
                format!("CREATE UNIQUE INDEX CONCURRENTLY IF NOT EXISTS {idx_name} ON {table} ({cols});"),
                Phase::Indexes,
                true,
                Vec::new(),
                false,
                None,
            );
            self.add_step(
                Some(table),
                unique_attach_guard(table, &idx_name, &constraint_name),
                Phase::Finalize,
                true,
                Vec::new(),
                false,
                None,
            );
        }

        for (fk_name, fk) in &def.foreign_keys {
            let cols = fk.columns.join(", ");
            let rcols = fk.ref_columns.join(", ");
            let mut clauses = Vec::new();
            if let Some(on_delete) = &fk.on_delete {
                clauses.push(format!("ON DELETE {on_delete}"));
            }
            if let Some(on_update) = &fk.on_update {
                clauses.push(format!("ON UPDATE {on_update}"));
            }
            let name = if fk.name.is_empty() { fk_name } else { &fk.name };
            let add_id = self.add_step(
                Some(table),
                format!(
                    "ALTER TABLE {table} ADD CONSTRAINT {name} FOREIGN KEY ({cols}) REFERENCES {} ({rcols}) {};",
                    fk.ref_table,
                    clauses.join(" ")
                ),
                Phase::Prep,
                true,
                Vec::new(),
                false,
                None,
            );
            self.add_step(
                Some(table),
                format!("ALTER TABLE {table} VALIDATE CONSTRAINT {name};"),
                Phase::Tighten,
                true,
                vec![add_id],
                false,
                None,
            );
        }
    }

    fn plan_drop_table(&mut self, table: &str) {
        let destructive = !self.is_allowed("drop_table", Some(table), None);
        self.add_step(
            Some(table),
            format!("DROP TABLE IF EXISTS {table};"),
            Phase::Finalize,
            false,
            Vec::new(),
            destructive,
            None,
        );
    }

    fn plan_drop_column(&mut self, table: &str, column: &str) {
        let destructive = !self.is_allowed("drop_column", Some(table), Some(column));
        self.add_step(
            Some(table),
            format!("ALTER TABLE {table} DROP COLUMN IF EXISTS {column};"),
            Phase::Finalize,
            true,
            Vec::new(),
            destructive,
            None,
        );
    }

    /// Post-pass dependency tightening (`spec.md` §4.2): VALIDATE steps
    /// wait on every NOT-NULL tighten for the same table; NOT VALID ADD
    /// steps wait on every backfill for the same table.
    fn finish(mut self) -> Vec<Step> {
        for v_id in &self.validate_steps {
            let table = self.steps.iter().find(|s| &s.id == v_id).and_then(|s| s.table.clone());
            let Some(table) = table else { continue };
            let notnull_ids: Vec<String> = self
                .notnull_step_by_col
                .iter()
                .filter(|((t, _), _)| *t == table)
                .map(|(_, id)| id.clone())
                .collect();
            if let Some(step) = self.steps.iter_mut().find(|s| &s.id == v_id) {
                for id in notnull_ids {
                    if !step.depends_on.contains(&id) {
                        step.depends_on.push(id);
                    }
                }
            }
        }

        for add_id in &self.add_constraint_steps {
            let table = self.steps.iter().find(|s| &s.id == add_id).and_then(|s| s.table.clone());
            let Some(table) = table else { continue };
            let backfill_ids: Vec<String> = self
                .backfill_step_by_col
                .iter()
                .filter(|((t, _), _)| *t == table)
                .map(|(_, id)| id.clone())
                .collect();
            if let Some(step) = self.steps.iter_mut().find(|s| &s.id == add_id) {
                for id in backfill_ids {
                    if !step.depends_on.contains(&id) {
                        step.depends_on.push(id);
                    }
                }
            }
        }

        self.steps
    }
}

fn unique_attach_guard(table: &str, idx_name: &str, constraint_name: &str) -> String {
    format!(
        "DO $$\nBEGIN\n  IF NOT EXISTS (\n    SELECT 1 FROM pg_constraint\n    WHERE conname = '{constraint_name}' AND conrelid = '{table}'::regclass\n  ) THEN\n    ALTER TABLE {table} ADD CONSTRAINT {constraint_name} UNIQUE USING INDEX {idx_name} NOT DEFERRABLE;\n  END IF;\nEND $$;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdelta_core::{Column as IrColumn, Table as IrTable};

    fn schema_with_table(table: IrTable) -> Schema {
        let mut schema = Schema::new("postgresql");
        schema.tables.insert(table.name.clone(), table);
        schema
    }

    #[test]
    fn add_not_null_column_backfills_then_tightens() {
        let mut table = IrTable::named("users");
        let mut column = IrColumn::new("active", "BOOLEAN", false);
        column.default = Some("true".to_string());
        table.columns.insert("active".to_string(), column.clone());
        let head = schema_with_table(table);
        let base = Schema::new("postgresql");

        let ops = vec![Op::AddColumn {
            table: "users".to_string(),
            column,
        }];
        let steps = plan_postgres(&base, &head, &ops, &Hints::default());

        let phases: Vec<Phase> = steps.iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![Phase::Prep, Phase::Tighten, Phase::Backfill, Phase::Tighten]);
        let tighten = &steps[3];
        assert_eq!(tighten.depends_on, vec![steps[2].id.clone()]);
    }

    #[test]
    fn drop_table_is_destructive_unless_allowlisted() {
        let base = schema_with_table(IrTable::named("legacy"));
        let head = Schema::new("postgresql");
        let ops = vec![Op::DropTable {
            table: "legacy".to_string(),
        }];

        let steps = plan_postgres(&base, &head, &ops, &Hints::default());
        assert!(steps[0].destructive);

        let hints = Hints {
            unsafe_allow: vec!["drop_table: legacy".to_string()],
            ..Hints::default()
        };
        let steps = plan_postgres(&base, &head, &ops, &hints);
        assert!(!steps[0].destructive);
    }
}
