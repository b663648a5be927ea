//! The typed tagged union `Op` (`spec.md` §9 design note: "each Op kind
//! becomes a distinct variant ... carrying typed fields"). This replaces
//! the kind+payload-map pair the distilled spec describes with one enum,
//! which is what removes the string-keyed access the design note calls
//! out.

use crate::ir::{Column, ForeignKey, Index, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    CreateTable {
        table: String,
        def: Table,
    },
    DropTable {
        table: String,
    },
    /// Never constructed by [`crate::diff_schema`] — kept only so the
    /// planner's per-table rename-dependency bookkeeping has something to
    /// key off once cross-snapshot table-rename detection exists. See
    /// `spec.md` §9 open question 1.
    RenameTable {
        table: String,
        from: String,
    },
    RenameColumn {
        table: String,
        from: String,
        to: String,
    },
    AddColumn {
        table: String,
        column: Column,
    },
    DropColumn {
        table: String,
        column: String,
    },
    AlterColumnType {
        table: String,
        column: String,
        from_type: String,
        to_type: String,
    },
    AlterNullable {
        table: String,
        column: String,
        nullable: bool,
    },
    AlterDefault {
        table: String,
        column: String,
        default: Option<String>,
    },
    AddIndex {
        table: String,
        index: Index,
    },
    DropIndex {
        table: String,
        index: String,
    },
    AddForeignKey {
        table: String,
        foreign_key: ForeignKey,
    },
    DropForeignKey {
        table: String,
        foreign_key: String,
    },
    AddCheck {
        table: String,
        name: String,
        expr: String,
    },
    DropCheck {
        table: String,
        name: String,
    },
    AddUnique {
        table: String,
        columns: Vec<String>,
    },
    DropUnique {
        table: String,
        columns: Vec<String>,
    },
}

impl Op {
    /// The table this op targets, if any (every variant here has one —
    /// `spec.md`'s IR has no table-less objects).
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::CreateTable { table, .. }
            | Self::DropTable { table }
            | Self::RenameTable { table, .. }
            | Self::RenameColumn { table, .. }
            | Self::AddColumn { table, .. }
            | Self::DropColumn { table, .. }
            | Self::AlterColumnType { table, .. }
            | Self::AlterNullable { table, .. }
            | Self::AlterDefault { table, .. }
            | Self::AddIndex { table, .. }
            | Self::DropIndex { table, .. }
            | Self::AddForeignKey { table, .. }
            | Self::DropForeignKey { table, .. }
            | Self::AddCheck { table, .. }
            | Self::DropCheck { table, .. }
            | Self::AddUnique { table, .. }
            | Self::DropUnique { table, .. } => table,
        }
    }
}
