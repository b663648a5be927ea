//! Pure value model for a schema snapshot (`spec.md` §3).
//!
//! Every map here is a `BTreeMap` so iteration order is deterministic
//! without extra sorting at every call site (`spec.md` §5). The IR is
//! immutable once built: nothing in this module mutates a `Schema` after
//! construction, and the differ only ever reads it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A full schema snapshot: one side of a base/head comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Always `"postgresql"` for this version (`spec.md` §1 non-goals).
    pub dialect: String,
    #[serde(default)]
    pub version: Option<String>,
    pub tables: BTreeMap<String, Table>,
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Schema {
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            version: None,
            tables: BTreeMap::new(),
            enums: BTreeMap::new(),
            extensions: Vec::new(),
        }
    }

    /// Checks the invariants listed in `spec.md` §3. The pipeline itself
    /// never calls this — malformed IR is undefined behavior by design,
    /// never a panic (`spec.md` §7) — but adapters and tests can use it to
    /// catch a broken front-end before it reaches the differ.
    #[must_use]
    pub fn validate(&self) -> Vec<IrViolation> {
        let mut violations = Vec::new();
        for (table_name, table) in &self.tables {
            if table_name != &table.name {
                violations.push(IrViolation::TableNameMismatch {
                    key: table_name.clone(),
                    name: table.name.clone(),
                });
            }
            table.validate_into(&mut violations);
        }
        violations
    }
}

/// One invariant violation found by [`Schema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrViolation {
    TableNameMismatch {
        key: String,
        name: String,
    },
    PrimaryKeyColumnMissing {
        table: String,
        column: String,
    },
    ForeignKeyColumnMissing {
        table: String,
        fk: String,
        column: String,
    },
    IndexColumnMissing {
        table: String,
        index: String,
        column: String,
    },
    UniqueColumnMissing {
        table: String,
        column: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Table {
    pub name: String,
    pub columns: BTreeMap<String, Column>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub uniques: Vec<Vec<String>>,
    #[serde(default)]
    pub checks: BTreeMap<String, String>,
    #[serde(default)]
    pub indexes: BTreeMap<String, Index>,
    #[serde(default)]
    pub foreign_keys: BTreeMap<String, ForeignKey>,
    #[serde(default)]
    pub partition: Option<Partition>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Table {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn validate_into(&self, violations: &mut Vec<IrViolation>) {
        for column in &self.primary_key {
            if !self.columns.contains_key(column) {
                violations.push(IrViolation::PrimaryKeyColumnMissing {
                    table: self.name.clone(),
                    column: column.clone(),
                });
            }
        }
        for (fk_name, fk) in &self.foreign_keys {
            for column in &fk.columns {
                if !self.columns.contains_key(column) {
                    violations.push(IrViolation::ForeignKeyColumnMissing {
                        table: self.name.clone(),
                        fk: fk_name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        for (index_name, index) in &self.indexes {
            for column in &index.columns {
                if !self.columns.contains_key(column) {
                    violations.push(IrViolation::IndexColumnMissing {
                        table: self.name.clone(),
                        index: index_name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        for unique in &self.uniques {
            for column in unique {
                if !self.columns.contains_key(column) {
                    violations.push(IrViolation::UniqueColumnMissing {
                        table: self.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// PG-compiled type token, e.g. `BIGINT`, `NUMERIC(12,2)`, `TEXT`.
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub generated: Option<String>,
    #[serde(default)]
    pub collation: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
            default: None,
            generated: None,
            collation: None,
            comment: None,
        }
    }
}

fn default_index_method() -> String {
    "btree".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default = "default_index_method")]
    pub method: String,
    #[serde(default)]
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
    #[serde(default)]
    pub deferrable: bool,
    #[serde(default)]
    pub initially_deferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStrategy {
    Range,
    List,
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub strategy: PartitionStrategy,
    pub key: Vec<String>,
}
