//! Typed view of the recursive hint mapping described in `spec.md` §6.
//!
//! Parsing the YAML hint *file* is the CLI's job (`spec.md` §1 non-goals);
//! this module only defines the shape the core consumes once that parsing
//! is done, mirroring how `stateql_core::config` hands the dialects a typed
//! `ConnectionConfig` rather than a raw map.

use std::collections::BTreeMap;

/// Default `planner.default_backfill_batch_rows` (`spec.md` §4.2).
pub const DEFAULT_BACKFILL_BATCH_ROWS: u32 = 5000;

/// Hints threaded through the differ (renames), the planner (the
/// `planner.*` knobs and the unsafe allowlist), and the emitter (the
/// non-transactional banner knob).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hints {
    /// `"table.col" -> "table.col"` rename pairs consumed by the differ's
    /// hints pass (`spec.md` §4.1).
    pub renames: BTreeMap<String, String>,
    /// Allowlist strings that demote a destructive step (`spec.md` §4.2).
    pub unsafe_allow: Vec<String>,
    pub planner: PlannerHints,
    /// `dialect.postgres.target_version` parsed to a major version number,
    /// or `None` if absent/unparsable (`spec.md` §6).
    pub target_pg_major: Option<u16>,
}

/// The `planner.*` knobs (`spec.md` §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerHints {
    pub default_backfill_batch_rows: u32,
    pub use_fast_not_null: bool,
    pub use_batched_backfill: bool,
    pub emit_data_validation_hints: bool,
    pub unique_nulls_not_distinct: bool,
    pub add_banner_for_non_txn: bool,
}

impl Default for PlannerHints {
    fn default() -> Self {
        Self {
            default_backfill_batch_rows: DEFAULT_BACKFILL_BATCH_ROWS,
            use_fast_not_null: false,
            use_batched_backfill: false,
            emit_data_validation_hints: true,
            unique_nulls_not_distinct: false,
            add_banner_for_non_txn: false,
        }
    }
}

impl Hints {
    /// `true` if `kind`/`table`/`name` matches any of the four allowlist
    /// forms in priority order (`spec.md` §4.2):
    /// `"{kind}: {table}.{name}"`, `"{kind}: {table}"`, `"{kind}: {name}"`,
    /// bare `"{kind}"`.
    #[must_use]
    pub fn is_allowed(&self, kind: &str, table: Option<&str>, name: Option<&str>) -> bool {
        let mut candidates = Vec::with_capacity(4);
        if let (Some(table), Some(name)) = (table, name) {
            candidates.push(format!("{kind}: {table}.{name}"));
        }
        if let Some(table) = table {
            candidates.push(format!("{kind}: {table}"));
        }
        if let Some(name) = name {
            candidates.push(format!("{kind}: {name}"));
        }
        candidates.push(kind.to_string());

        candidates
            .iter()
            .any(|candidate| self.unsafe_allow.iter().any(|allowed| allowed == candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_matches_most_specific_form() {
        let hints = Hints {
            unsafe_allow: vec!["drop_column: users.legacy_flag".to_string()],
            ..Hints::default()
        };
        assert!(hints.is_allowed("drop_column", Some("users"), Some("legacy_flag")));
        assert!(!hints.is_allowed("drop_column", Some("orders"), Some("legacy_flag")));
    }

    #[test]
    fn allowlist_matches_bare_kind() {
        let hints = Hints {
            unsafe_allow: vec!["drop_index".to_string()],
            ..Hints::default()
        };
        assert!(hints.is_allowed("drop_index", None, Some("idx_users_email")));
    }
}
