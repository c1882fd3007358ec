use crate::error::{ExtractError, ParseError};
use crate::extract::{self, Extracted, ExtractedArray};
use crate::parser::parse_path_tokens;
use crate::token::{Dialect, PathToken};

/// A validated JSONPath, traversable in both directions
///
/// The token sequence is fixed at construction and is a pure function of the
/// path string and the [`Dialect`]; only the cursor is mutable. The cursor
/// ranges over `[-1, N]`, where both `-1` and `N` are off the ends
/// ([`end`][JsonPathIterator::end] is true at either boundary) and positions
/// `0..N-1` address valid tokens. Stepping off an end saturates; stepping
/// back from a boundary re-enters the valid range.
///
/// A compiled iterator is independent of any document and can drive any
/// number of extractions; each scan rewinds it before use.
///
/// # Example
/// ```rust
/// use json_path_extract::{Dialect, JsonPathIterator, PathToken};
///
/// # fn main() -> Result<(), json_path_extract::ParseError> {
/// let mut path = JsonPathIterator::parse("$.a[0]", Dialect::Standard)?;
/// assert_eq!(path.current(), Some(&PathToken::Root));
/// path.advance();
/// assert_eq!(path.current(), Some(&PathToken::Field("a".to_string())));
/// path.advance();
/// assert_eq!(path.current(), Some(&PathToken::Index("0".to_string())));
/// path.advance();
/// assert!(path.end());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPathIterator {
    tokens: Vec<PathToken>,
    cursor: isize,
}

impl JsonPathIterator {
    /// Validate `path` against `dialect` and compile its token sequence
    ///
    /// The cursor starts at the root token.
    pub fn parse(path: &str, dialect: Dialect) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: parse_path_tokens(path, dialect)?,
            cursor: 0,
        })
    }

    /// Reset the cursor to the root token
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// True when the cursor sits off either end of the token sequence
    pub fn end(&self) -> bool {
        self.cursor < 0 || self.cursor as usize >= self.tokens.len()
    }

    /// The token under the cursor, or `None` at either boundary
    pub fn current(&self) -> Option<&PathToken> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|i| self.tokens.get(i))
    }

    /// Step the cursor forward one token, saturating past the last
    pub fn advance(&mut self) {
        if self.cursor < self.tokens.len() as isize {
            self.cursor += 1;
        }
    }

    /// Step the cursor backward one token, saturating before the first
    pub fn retreat(&mut self) {
        if self.cursor >= 0 {
            self.cursor -= 1;
        }
    }

    /// Advance to the end of the token sequence
    ///
    /// Used to validate a path without extracting anything.
    pub fn scan(&mut self) {
        while !self.end() {
            self.advance();
        }
    }
}

/// Check that `path` is a valid JSONPath in the selected dialect
///
/// Validation without extraction: compiles the path and walks its tokens.
///
/// # Example
/// ```rust
/// use json_path_extract::is_valid_json_path;
///
/// assert!(is_valid_json_path("$.a", true).is_ok());
/// // Quoted brackets belong to the legacy dialect
/// assert!(is_valid_json_path("$['a']", true).is_err());
/// assert!(is_valid_json_path("$['a']", false).is_ok());
/// ```
pub fn is_valid_json_path(path: &str, sql_standard_mode: bool) -> Result<(), ParseError> {
    let mut iter = JsonPathIterator::parse(path, Dialect::from_sql_standard_mode(sql_standard_mode))?;
    iter.scan();
    Ok(())
}

/// A compiled JSONPath bound to the three extraction entry points
///
/// Compile once per path literal, then call the extraction methods once per
/// document. The methods take `&mut self` because each scan rewinds and
/// walks the stored path cursor; the token sequence itself never changes,
/// and the evaluator is `Clone` for sharing a compiled path across threads.
///
/// # Usage
/// ```rust
/// use json_path_extract::JsonPathEvaluator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut evaluator = JsonPathEvaluator::new("$.a.b[0].c", true)?;
/// let result = evaluator.extract(r#"{"a": {"b": [ { "c" : "foo" } ] } }"#)?;
/// assert_eq!(result.value, r#""foo""#);
/// assert!(!result.is_null);
///
/// let scalar = evaluator.extract_scalar(r#"{"a": {"b": [ { "c" : "foo" } ] } }"#)?;
/// assert_eq!(scalar.value, "foo");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPathEvaluator {
    path: JsonPathIterator,
    escape_special_characters: bool,
}

impl JsonPathEvaluator {
    /// Compile `path`, selecting the dialect from the SQL layer's flag
    ///
    /// `sql_standard_mode` is true for `JSON_QUERY`/`JSON_VALUE` syntax and
    /// false for the `JSON_EXTRACT` family.
    pub fn new(path: &str, sql_standard_mode: bool) -> Result<Self, ParseError> {
        let dialect = Dialect::from_sql_standard_mode(sql_standard_mode);
        Ok(Self {
            path: JsonPathIterator::parse(path, dialect)?,
            escape_special_characters: false,
        })
    }

    /// Re-escape special characters in structural and array output
    ///
    /// Off by default. When enabled, string values and object keys copied
    /// into the output are re-escaped so the emitted text is valid JSON;
    /// when disabled the decoded string is emitted verbatim between quotes,
    /// which is lossy for strings containing quotes or control characters.
    pub fn enable_special_character_escaping(&mut self) {
        self.escape_special_characters = true;
    }

    /// Set special-character escaping explicitly
    pub fn set_special_character_escaping(&mut self, enabled: bool) {
        self.escape_special_characters = enabled;
    }

    /// Extract the sub-document addressed by the path
    ///
    /// The matched value is reconstructed compactly (no whitespace).
    /// `is_null` is true when the match is the literal `null` (its text is
    /// still emitted), when nothing matches, or when the document is
    /// malformed; [`Extracted::stopped_on_first_match`] distinguishes the
    /// first case from the others.
    pub fn extract(&mut self, json: &str) -> Result<Extracted, ExtractError> {
        extract::extract(json, &mut self.path, self.escape_special_characters)
    }

    /// Extract the scalar addressed by the path
    ///
    /// Strings are returned decoded and unquoted; numbers and booleans as
    /// their source lexemes. A match that is an object, an array, or `null`
    /// yields `is_null = true` with empty output.
    pub fn extract_scalar(&mut self, json: &str) -> Result<Extracted, ExtractError> {
        extract::extract_scalar(json, &mut self.path, self.escape_special_characters)
    }

    /// Extract the elements of the array addressed by the path
    ///
    /// Each element is reconstructed compactly, in document order. An empty
    /// array yields an empty, non-null sequence; a match that is not an
    /// array yields `is_null = true` with no elements.
    ///
    /// # Example
    /// ```rust
    /// use json_path_extract::JsonPathEvaluator;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut evaluator = JsonPathEvaluator::new("$.a", false)?;
    /// let result = evaluator.extract_array(r#"{"a": [1, "two", [3]]}"#)?;
    /// assert_eq!(result.elements, ["1", "\"two\"", "[3]"]);
    /// assert!(!result.is_null);
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_array(&mut self, json: &str) -> Result<ExtractedArray, ExtractError> {
        extract::extract_array(json, &mut self.path, self.escape_special_characters)
    }
}
