use crate::extract::MAX_PARSING_DEPTH;

/// Error type for JSONPath compilation failures
///
/// Raised only while compiling a path string, never during a document scan.
/// The message text is part of the compatibility contract with the SQL
/// function layer, which matches on substrings of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The path is empty or does not begin with the root operator
    #[error("JSONPath must start with '$'")]
    MissingRoot,
    /// The path contains a JSONPath operator this engine rejects by design
    /// (`*`, `..`, or `@`)
    #[error("Unsupported operator in JSONPath: {0}")]
    UnsupportedOperator(&'static str),
    /// A token failed dialect-specific syntax; carries the raw remainder of
    /// the path starting at the offending token
    #[error("Invalid token in JSONPath at: {0}")]
    InvalidToken(String),
}

/// Error type for document scan failures
///
/// Raised only during extraction. A well-formed document that the path does
/// not match is *not* an error, and neither is a malformed document: both
/// produce a successful null result. The only hard failure is the nesting
/// guard tripping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The document nests objects/arrays beyond [`MAX_PARSING_DEPTH`]
    #[error(
        "JSON parsing failed due to deeply nested array/struct. Maximum nesting depth is {}",
        MAX_PARSING_DEPTH
    )]
    DeeplyNested,
}
