//! PostgreSQL planner and emitter, registered under dialect key
//! `"postgresql"` (`spec.md` §6.2).

mod emitter;
mod planner;

pub use emitter::generate_postgres_sql;
pub use planner::plan_postgres;

/// The dialect key every CLI binary should register these two functions
/// under.
pub const DIALECT_NAME: &str = "postgresql";

/// Registers `plan_postgres`/`generate_postgres_sql` into `registry`
/// under [`DIALECT_NAME`]. Call once at process start.
pub fn register(registry: &mut pgdelta_core::DialectRegistry) {
    registry.register_planner(DIALECT_NAME, plan_postgres);
    registry.register_emitter(DIALECT_NAME, generate_postgres_sql);
}
