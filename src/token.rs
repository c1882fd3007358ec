//! Path tokens and the two JSONPath syntax dialects

/// The JSONPath syntax accepted when compiling a path
///
/// The SQL standard functions (`JSON_QUERY`, `JSON_VALUE`) quote field names
/// with double quotes after a dot and accept only integers inside brackets.
/// The legacy functions (`JSON_EXTRACT` family) quote field names with single
/// quotes inside brackets instead. Each dialect's quoting form is a syntax
/// error in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// SQL standard syntax: `.name`, `."quoted name"`, `[0]`
    Standard,
    /// Legacy syntax: `.name`, `['quoted name']`, `[0]`, `[word]`
    Legacy,
}

impl Dialect {
    /// Select the dialect from the SQL layer's standard-mode flag
    pub fn from_sql_standard_mode(sql_standard_mode: bool) -> Self {
        if sql_standard_mode {
            Dialect::Standard
        } else {
            Dialect::Legacy
        }
    }
}

/// One step of a compiled JSONPath
///
/// Tokens are classified by content, not by the syntax they were written in:
/// any token whose text is an optionally negated run of digits is an
/// [`Index`][PathToken::Index], so `.1`, `[1]`, and `['1']` all produce the
/// same token. During a scan a token matches an object member by its text and
/// an array position by its numeric value, whichever the document offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// The document root (`$`); always token zero of a valid path
    Root,
    /// An object member name, with quoting escapes already resolved
    Field(String),
    /// An array position, kept in its original textual form so that `-0`
    /// and out-of-range literals survive compilation
    Index(String),
}

impl PathToken {
    /// Classify raw token text as an index or a field name
    pub(crate) fn from_text(text: String) -> Self {
        let digits = text.strip_prefix('-').unwrap_or(&text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            PathToken::Index(text)
        } else {
            PathToken::Field(text)
        }
    }

    /// The token text used to match object member names
    ///
    /// The root token's name is the empty string.
    pub fn name(&self) -> &str {
        match self {
            PathToken::Root => "",
            PathToken::Field(text) | PathToken::Index(text) => text,
        }
    }

    /// The array position this token addresses, if any
    ///
    /// `None` for field tokens and for index literals too large to
    /// represent; such tokens never match an array position. `-0` is
    /// numerically zero and addresses the first element; every other
    /// negative value addresses nothing.
    pub fn array_index(&self) -> Option<i64> {
        match self {
            PathToken::Index(text) => text.parse().ok(),
            _ => None,
        }
    }
}
