use thiserror::Error;

/// Core error type shared across htmlfaker crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No text source was supplied when building a generator.
    #[error("no text source configured")]
    MissingTextSource,
    /// A weight table handed to weighted selection has no entries.
    #[error("weight table '{0}' is empty")]
    EmptyWeightTable(String),
    /// A weight table or class map references an element kind with no renderer.
    #[error("unknown element kind '{0}'")]
    UnknownElementKind(String),
    /// A table column type is outside the supported set.
    #[error("unknown table column type '{0}'")]
    UnknownColumnType(String),
    /// An integer range sampler received `lo > hi`.
    #[error("invalid range: {lo} > {hi}")]
    InvalidRange { lo: i64, hi: i64 },
    /// A numeric override is negative, non-finite or otherwise unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results returned by htmlfaker crates.
pub type Result<T> = std::result::Result<T, Error>;
