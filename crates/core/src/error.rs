use std::fmt;

/// Raised by the dialect registry when a requested dialect name has no
/// registered planner, no registered emitter, or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDialectError {
    pub requested: String,
    pub supported: Vec<String>,
}

impl fmt::Display for UnknownDialectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported dialect `{}`; supported dialects: {}",
            self.requested,
            if self.supported.is_empty() {
                "(none registered)".to_string()
            } else {
                self.supported.join(", ")
            }
        )
    }
}

impl std::error::Error for UnknownDialectError {}

/// The core's only fallible boundary: everything else (malformed IR,
/// unparsable hints, scheduling cycles) degrades silently by design — see
/// `spec.md` §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnknownDialect(UnknownDialectError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDialect(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownDialect(source) => Some(source),
        }
    }
}

impl From<UnknownDialectError> for Error {
    fn from(source: UnknownDialectError) -> Self {
        Self::UnknownDialect(source)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
