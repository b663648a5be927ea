//! Property tests for the differ-only and scheduler-only invariants
//! (`spec.md` §8, invariants 1 and 2).

use std::collections::BTreeMap;

use pgdelta_core::{Column, Hints, Phase, Schema, Step, Table, diff_schema, schedule_steps};
use proptest::prelude::*;

fn arb_data_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("BIGINT".to_string()),
        Just("TEXT".to_string()),
        Just("BOOLEAN".to_string()),
        Just("NUMERIC(12,2)".to_string()),
        Just("TIMESTAMPTZ".to_string()),
    ]
}

fn arb_table() -> impl Strategy<Value = Table> {
    (
        "[a-z]{1,6}",
        prop::collection::vec(("[a-z]{1,6}", arb_data_type(), any::<bool>()), 0..5),
    )
        .prop_map(|(table_name, columns)| {
            let mut table = Table::named(table_name);
            for (col_name, data_type, nullable) in columns {
                table
                    .columns
                    .insert(col_name.clone(), Column::new(col_name, data_type, nullable));
            }
            table
        })
}

fn arb_schema() -> impl Strategy<Value = Schema> {
    prop::collection::vec(arb_table(), 0..4).prop_map(|tables| {
        let mut schema = Schema::new("postgresql");
        for table in tables {
            schema.tables.insert(table.name.clone(), table);
        }
        schema
    })
}

proptest! {
    /// Invariant 1 (differ half): diffing a schema against an identical
    /// clone always yields an empty Op list.
    #[test]
    fn identical_schemas_diff_to_nothing(schema in arb_schema()) {
        let ops = diff_schema(&schema, &schema.clone(), &Hints::default());
        prop_assert!(ops.is_empty());
    }
}

fn arb_step_graph() -> impl Strategy<Value = Vec<Step>> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0usize..n.max(1), 0..3), n).prop_map(
            move |edge_lists| {
                let ids: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
                ids.iter()
                    .enumerate()
                    .map(|(i, id)| {
                        // Only depend on earlier-indexed steps, guaranteeing a DAG.
                        let deps: Vec<String> = edge_lists[i]
                            .iter()
                            .filter(|&&j| j < i)
                            .map(|&j| ids[j].clone())
                            .collect();
                        Step::new(id.as_str(), None, format!("-- {id}"), Phase::Prep).depends_on(deps)
                    })
                    .collect()
            },
        )
    })
}

proptest! {
    /// Invariant 2: the scheduler output is a topological order — every
    /// predecessor appears before its dependent.
    #[test]
    fn scheduler_output_is_topological(steps in arb_step_graph()) {
        let ordered = schedule_steps(steps);
        let position: BTreeMap<&str, usize> = ordered
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        for step in &ordered {
            for dep in &step.depends_on {
                prop_assert!(position[dep.as_str()] < position[step.id.as_str()]);
            }
        }
    }
}
