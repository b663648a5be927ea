//! `SchemaAdapter` trait and the built-in `JsonSchemaAdapter`
//! (`spec.md` §6.1 / `SPEC_FULL.md` §6.1).
//!
//! `original_source/`'s SQLAlchemy adapter reflects live ORM metadata,
//! which has no idiomatic Rust equivalent and is out of scope here. The
//! adapter contract is kept real and testable with a JSON-file stand-in.

use std::collections::BTreeMap;
use std::path::Path;

use pgdelta_core::Schema;

use crate::error_presentation::{CliError, CliResult};

/// Produces an IR [`Schema`] from some external representation of a
/// schema snapshot. `module_hint` is threaded through unused by
/// [`JsonSchemaAdapter`]; it exists so the trait matches the shape
/// `original_source/`'s ORM-reflection adapter needs (a dotted module
/// path to import).
pub trait SchemaAdapter {
    fn emit_ir(&self, repo_path: &Path, module_hint: Option<&str>) -> CliResult<Schema>;
}

/// Loads a [`Schema`] value serialized as JSON at `repo_path`.
pub struct JsonSchemaAdapter;

impl SchemaAdapter for JsonSchemaAdapter {
    fn emit_ir(&self, repo_path: &Path, _module_hint: Option<&str>) -> CliResult<Schema> {
        let content = std::fs::read_to_string(repo_path).map_err(|source| CliError::ReadFile {
            path: repo_path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CliError::ParseSchema {
            path: repo_path.to_path_buf(),
            source,
        })
    }
}

type AdapterFactory = fn() -> Box<dyn SchemaAdapter>;

/// Name → adapter factory, mirroring [`pgdelta_core::DialectRegistry`].
#[derive(Default)]
pub struct AdapterRegistry {
    factories: BTreeMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        registry.register("json", || Box::new(JsonSchemaAdapter));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: AdapterFactory) {
        self.factories.insert(name.into(), factory);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Box<dyn SchemaAdapter>> {
        self.factories.get(name).map(|factory| factory())
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
