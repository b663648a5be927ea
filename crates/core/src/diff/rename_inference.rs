//! Rename inference: the hints pass and the heuristic pass described in
//! `spec.md` §4.1.

use std::collections::BTreeSet;

use crate::Hints;
use crate::ir::Table;

/// Two type tokens are compatible if they're equal after lowercasing and
/// stripping at the first `(`, or if both normalize into the integer
/// family, or if both normalize to `numeric` (`spec.md` §4.1). This is
/// intentionally loose — see `spec.md` §9 open question 2.
#[must_use]
pub fn is_type_compatible(left: &str, right: &str) -> bool {
    fn normalize(token: &str) -> String {
        token
            .split('(')
            .next()
            .unwrap_or(token)
            .trim()
            .to_lowercase()
    }

    let (left, right) = (normalize(left), normalize(right));
    if left == right {
        return true;
    }
    const INTEGER_FAMILY: [&str; 4] = ["int", "integer", "bigint", "smallint"];
    if INTEGER_FAMILY.contains(&left.as_str()) && INTEGER_FAMILY.contains(&right.as_str()) {
        return true;
    }
    left == "numeric" && right == "numeric"
}

/// Parses a `"table.col"` hint key/value. Entries containing `:` in either
/// side are reserved syntax and are ignored (`spec.md` §4.1).
fn parse_qualified(value: &str) -> Option<(&str, &str)> {
    if value.contains(':') {
        return None;
    }
    value.split_once('.')
}

/// Runs both rename-inference passes over `removed` against `added`,
/// returning `(old_column, new_column)` pairs in the order matches are
/// found. Matched columns are not reconsidered by the heuristic pass.
#[must_use]
pub fn infer_renames(
    base_table: &Table,
    head_table: &Table,
    removed: &[String],
    added: &[String],
    hints: &Hints,
) -> Vec<(String, String)> {
    let mut renames = Vec::new();
    let mut used_added: BTreeSet<String> = BTreeSet::new();

    for removed_col in removed {
        if let Some(target) = hint_target(base_table, head_table, removed_col, hints)
            && added.contains(&target)
            && !used_added.contains(&target)
        {
            used_added.insert(target.clone());
            renames.push((removed_col.clone(), target));
            continue;
        }

        let Some(base_column) = base_table.columns.get(removed_col) else {
            continue;
        };
        for candidate in added {
            if used_added.contains(candidate) {
                continue;
            }
            let Some(head_column) = head_table.columns.get(candidate) else {
                continue;
            };
            if is_type_compatible(&base_column.data_type, &head_column.data_type) {
                used_added.insert(candidate.clone());
                renames.push((removed_col.clone(), candidate.clone()));
                break;
            }
        }
    }

    renames
}

fn hint_target(
    base_table: &Table,
    head_table: &Table,
    removed_col: &str,
    hints: &Hints,
) -> Option<String> {
    for (key, value) in &hints.renames {
        let Some((old_table, old_col)) = parse_qualified(key) else {
            continue;
        };
        let Some((new_table, new_col)) = parse_qualified(value) else {
            continue;
        };
        if old_table == base_table.name && new_table == head_table.name && old_col == removed_col
        {
            return Some(new_col.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatible_integer_family() {
        assert!(is_type_compatible("INT", "bigint"));
        assert!(is_type_compatible("SMALLINT", "Integer"));
    }

    #[test]
    fn compatible_numeric_ignores_precision() {
        assert!(is_type_compatible("NUMERIC(12,2)", "numeric(8,4)"));
    }

    #[test]
    fn incompatible_unrelated_types() {
        assert!(!is_type_compatible("TEXT", "BIGINT"));
    }
}
