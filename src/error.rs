use thiserror::Error;

/// Failures surfaced by the strict engines and by option parsing.
///
/// The lenient defaults never produce these: unsupported kinds are classified,
/// dropped, or rendered as `UNKNOWN` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid input kind `{kind}` ({context})")]
    InvalidInputKind { kind: String, context: String },

    #[error("invalid options at {path}: {message}")]
    Config { path: String, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid_kind(kind: impl Into<String>, context: impl Into<String>) -> Self {
        Error::InvalidInputKind { kind: kind.into(), context: context.into() }
    }
}
