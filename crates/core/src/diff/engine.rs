//! The structural differ (`spec.md` §4.1): `(base, head, hints) -> [Op]`.

use std::collections::BTreeSet;

use super::op::Op;
use super::rename_inference::infer_renames;
use crate::Hints;
use crate::ir::{Schema, Table};

/// Compares `base` against `head` and returns the ops needed to turn `base`
/// into `head`, in the order fixed by `spec.md` §4.1: all `CREATE_TABLE`
/// ops (sorted by table name), then all `DROP_TABLE` ops (sorted), then
/// per-table ops for tables present in both, iterated in sorted table
/// order.
#[must_use]
pub fn diff_schema(base: &Schema, head: &Schema, hints: &Hints) -> Vec<Op> {
    let mut ops = Vec::new();

    let base_tables: BTreeSet<&String> = base.tables.keys().collect();
    let head_tables: BTreeSet<&String> = head.tables.keys().collect();

    for table in head_tables.difference(&base_tables) {
        ops.push(Op::CreateTable {
            table: (*table).clone(),
            def: head.tables[*table].clone(),
        });
    }
    for table in base_tables.difference(&head_tables) {
        ops.push(Op::DropTable {
            table: (*table).clone(),
        });
    }
    for table in base_tables.intersection(&head_tables) {
        ops.extend(diff_table(&base.tables[*table], &head.tables[*table], hints));
    }

    ops
}

fn diff_table(base: &Table, head: &Table, hints: &Hints) -> Vec<Op> {
    let mut ops = Vec::new();
    let table_name = &base.name;

    let base_cols: BTreeSet<&String> = base.columns.keys().collect();
    let head_cols: BTreeSet<&String> = head.columns.keys().collect();

    let removed: Vec<String> = base_cols
        .difference(&head_cols)
        .map(|s| (*s).clone())
        .collect();
    let added: Vec<String> = head_cols
        .difference(&base_cols)
        .map(|s| (*s).clone())
        .collect();

    let renames = infer_renames(base, head, &removed, &added, hints);
    let renamed_from: BTreeSet<&String> = renames.iter().map(|(from, _)| from).collect();
    let renamed_to: BTreeSet<&String> = renames.iter().map(|(_, to)| to).collect();

    for (from, to) in &renames {
        ops.push(Op::RenameColumn {
            table: table_name.clone(),
            from: from.clone(),
            to: to.clone(),
        });
    }

    let mut remaining_added: Vec<&String> = added.iter().filter(|c| !renamed_to.contains(c)).collect();
    remaining_added.sort();
    let mut remaining_removed: Vec<&String> =
        removed.iter().filter(|c| !renamed_from.contains(c)).collect();
    remaining_removed.sort();

    for column in remaining_added {
        ops.push(Op::AddColumn {
            table: table_name.clone(),
            column: head.columns[column].clone(),
        });
    }
    for column in remaining_removed {
        ops.push(Op::DropColumn {
            table: table_name.clone(),
            column: column.clone(),
        });
    }

    let mut common: Vec<&String> = base_cols.intersection(&head_cols).copied().collect();
    common.sort();
    let pairs = common
        .into_iter()
        .map(|c| (c.clone(), c.clone()))
        .chain(renames.into_iter());

    for (src, dst) in pairs {
        let (Some(base_col), Some(head_col)) = (base.columns.get(&src), head.columns.get(&dst))
        else {
            continue;
        };
        if base_col.data_type != head_col.data_type {
            ops.push(Op::AlterColumnType {
                table: table_name.clone(),
                column: dst.clone(),
                from_type: base_col.data_type.clone(),
                to_type: head_col.data_type.clone(),
            });
        }
        if base_col.nullable != head_col.nullable {
            ops.push(Op::AlterNullable {
                table: table_name.clone(),
                column: dst.clone(),
                nullable: head_col.nullable,
            });
        }
        let base_default = base_col.default.as_deref().filter(|s| !s.is_empty());
        let head_default = head_col.default.as_deref().filter(|s| !s.is_empty());
        if base_default != head_default {
            ops.push(Op::AlterDefault {
                table: table_name.clone(),
                column: dst.clone(),
                default: head_col.default.clone(),
            });
        }
    }

    diff_by_name_set(&mut ops, table_name, &base.indexes, &head.indexes, |idx| {
        Op::AddIndex {
            table: table_name.clone(),
            index: idx.clone(),
        }
    }, |name| Op::DropIndex {
        table: table_name.clone(),
        index: name.clone(),
    });

    diff_by_name_set(
        &mut ops,
        table_name,
        &base.foreign_keys,
        &head.foreign_keys,
        |fk| Op::AddForeignKey {
            table: table_name.clone(),
            foreign_key: fk.clone(),
        },
        |name| Op::DropForeignKey {
            table: table_name.clone(),
            foreign_key: name.clone(),
        },
    );

    let base_uniques: BTreeSet<Vec<String>> = base.uniques.iter().map(|u| sorted_cols(u)).collect();
    let head_uniques: BTreeSet<Vec<String>> = head.uniques.iter().map(|u| sorted_cols(u)).collect();
    for columns in head_uniques.difference(&base_uniques) {
        ops.push(Op::AddUnique {
            table: table_name.clone(),
            columns: columns.clone(),
        });
    }
    for columns in base_uniques.difference(&head_uniques) {
        ops.push(Op::DropUnique {
            table: table_name.clone(),
            columns: columns.clone(),
        });
    }

    let base_checks: BTreeSet<&String> = base.checks.keys().collect();
    let head_checks: BTreeSet<&String> = head.checks.keys().collect();
    for name in head_checks.difference(&base_checks) {
        ops.push(Op::AddCheck {
            table: table_name.clone(),
            name: (*name).clone(),
            expr: head.checks[*name].clone(),
        });
    }
    for name in base_checks.difference(&head_checks) {
        ops.push(Op::DropCheck {
            table: table_name.clone(),
            name: (*name).clone(),
        });
    }

    ops
}

fn sorted_cols(columns: &[String]) -> Vec<String> {
    let mut sorted = columns.clone();
    sorted.sort();
    sorted
}

/// Diffs two name-keyed maps by name-set difference only — no
/// attribute-level reconciliation within a name (`spec.md` §4.1: "Indexes,
/// FKs, checks are diffed by name").
fn diff_by_name_set<V, AddOp, DropOp>(
    ops: &mut Vec<Op>,
    _table_name: &str,
    base_map: &std::collections::BTreeMap<String, V>,
    head_map: &std::collections::BTreeMap<String, V>,
    add_op: AddOp,
    drop_op: DropOp,
) where
    AddOp: Fn(&V) -> Op,
    DropOp: Fn(&String) -> Op,
{
    let base_keys: BTreeSet<&String> = base_map.keys().collect();
    let head_keys: BTreeSet<&String> = head_map.keys().collect();
    for name in head_keys.difference(&base_keys) {
        ops.push(add_op(&head_map[*name]));
    }
    for name in base_keys.difference(&head_keys) {
        ops.push(drop_op(*name));
    }
}
