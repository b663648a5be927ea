//! Terminal summary rendering, ported from `original_source/schema_agent
//! /cli.py`'s `_print_summary` (a `rich.table.Table`) onto this corpus's
//! table-rendering crate.

use comfy_table::{Table, presets::UTF8_FULL};
use pgdelta_core::Summary;

#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Table",
        "Ops",
        "Risk Flags",
        "Steps (prep/backfill/tighten/indexes/finalize)",
    ]);

    for (name, info) in &summary.tables {
        let ops = info
            .ops
            .iter()
            .map(|phase| format!("{phase:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join(", ");
        let risks = info
            .risks
            .iter()
            .map(|risk| format!("{risk:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let phase_counts = info
            .phase_counts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        table.add_row(vec![name.as_str(), &ops, &risks, &phase_counts]);
    }

    table.to_string()
}
