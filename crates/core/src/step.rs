//! The planner's output unit (`spec.md` §3): one `Step` per emitted DDL
//! statement, reordered by the scheduler and consumed by the emitter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Prep,
    Backfill,
    Tighten,
    Indexes,
    Finalize,
}

/// One planned DDL statement.
///
/// `phase` is documentation only (`spec.md` §9 design note): the scheduler
/// trusts `depends_on`, never `phase`, to order steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub table: Option<String>,
    pub sql: String,
    pub phase: Phase,
    pub reversible: bool,
    pub destructive: bool,
    pub depends_on: Vec<String>,
    pub reverse_sql: Option<String>,
}

impl Step {
    #[must_use]
    pub fn new(id: impl Into<String>, table: Option<String>, sql: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: id.into(),
            table,
            sql: sql.into(),
            phase,
            reversible: false,
            destructive: false,
            depends_on: Vec::new(),
            reverse_sql: None,
        }
    }

    #[must_use]
    pub fn reversible(mut self, reverse_sql: impl Into<String>) -> Self {
        self.reversible = true;
        self.reverse_sql = Some(reverse_sql.into());
        self
    }

    #[must_use]
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    #[must_use]
    pub fn depends_on(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.depends_on.extend(ids);
        self
    }
}
