use thiserror::Error;

/// Main error type for the tidytable crate.
/// Aggregates errors from the standard library and dependencies.
///
/// Most table operations deliberately never fail: missing columns fall back
/// to identity or empty results and malformed cells fall back to default
/// values, as documented per operation. This type only surfaces where a
/// failure is genuinely observable at the API boundary: serialization,
/// strict column conversion, and glob pattern compilation.
#[derive(Error, Debug)]
pub enum TidyError {
    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    StringEncodingError(#[from] std::string::FromUtf8Error),

    // Third-party library errors
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    PatternError(#[from] glob::PatternError),
}
