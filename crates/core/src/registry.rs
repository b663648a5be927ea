//! Dialect registry: name → (planner fn, emitter fn) (`spec.md` §6.2).
//!
//! Unlike `stateql_core::Dialect`, which is a trait object a caller
//! constructs per connection, this is write-once process state (`spec.md`
//! §9 design note): dialects are plain functions registered by whichever
//! binary links them in, since the core crate cannot depend on
//! `pgdelta-dialect-postgres` without a cycle.

use std::collections::BTreeMap;

use crate::diff::Op;
use crate::error::{Error, UnknownDialectError};
use crate::hints::Hints;
use crate::ir::Schema;
use crate::orchestrator::GeneratedMigration;
use crate::step::Step;

pub type PlannerFn = fn(&Schema, &Schema, &[Op], &Hints) -> Vec<Step>;
pub type EmitterFn = fn(&[Step], &Hints) -> GeneratedMigration;

/// Holds every registered dialect's planner and emitter. Built once at
/// process start and never mutated afterward (`spec.md` §5).
#[derive(Debug, Default)]
pub struct DialectRegistry {
    planners: BTreeMap<String, PlannerFn>,
    emitters: BTreeMap<String, EmitterFn>,
}

impl DialectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_planner(&mut self, dialect: impl Into<String>, planner: PlannerFn) {
        self.planners.insert(dialect.into(), planner);
    }

    pub fn register_emitter(&mut self, dialect: impl Into<String>, emitter: EmitterFn) {
        self.emitters.insert(dialect.into(), emitter);
    }

    #[must_use]
    pub fn planner(&self, dialect: &str) -> Option<PlannerFn> {
        self.planners.get(dialect).copied()
    }

    #[must_use]
    pub fn emitter(&self, dialect: &str) -> Option<EmitterFn> {
        self.emitters.get(dialect).copied()
    }

    /// Dialects with both a planner and an emitter registered, sorted.
    #[must_use]
    pub fn supported_dialects(&self) -> Vec<String> {
        self.planners
            .keys()
            .filter(|name| self.emitters.contains_key(*name))
            .cloned()
            .collect()
    }

    pub(crate) fn planner_or_err(&self, dialect: &str) -> Result<PlannerFn, Error> {
        self.planner(dialect).ok_or_else(|| unknown_dialect(self, dialect))
    }

    pub(crate) fn emitter_or_err(&self, dialect: &str) -> Result<EmitterFn, Error> {
        self.emitter(dialect).ok_or_else(|| unknown_dialect(self, dialect))
    }
}

fn unknown_dialect(registry: &DialectRegistry, requested: &str) -> Error {
    UnknownDialectError {
        requested: requested.to_string(),
        supported: registry.supported_dialects(),
    }
    .into()
}
