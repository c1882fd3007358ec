//! The single-pass extraction engine
//!
//! One recursive-descent scanner serves all three extraction modes; they
//! differ only in how the matched value is captured. The scanner walks the
//! document and the compiled path together: descending into an object member
//! or array element whose token matches advances the path cursor, and a
//! descent that fails to resolve the rest of the path retreats it, so later
//! duplicate keys are still considered. The first fully resolved match stops
//! the scan immediately; nothing after it is read.
//!
//! Malformed input is not an error at this layer: the scan aborts and the
//! result is null. The one hard failure is the nesting guard, which counts
//! every object/array open, including structure that is only being skipped.

use crate::error::ExtractError;
use crate::path::JsonPathIterator;

mod strings;

/// Maximum object/array nesting depth accepted while scanning a document
pub const MAX_PARSING_DEPTH: usize = 1000;

/// The result of a structural or scalar extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The matched text; empty when `is_null` is set, except for a
    /// structural match of the literal `null`
    pub value: String,
    /// True when the match is the literal `null`, when nothing matches, or
    /// when the matched node cannot be represented in the requested mode
    pub is_null: bool,
    /// True when some node fully satisfied the path, whether or not it
    /// produced a non-null value; false when the path matched nothing
    pub stopped_on_first_match: bool,
}

/// The result of an array-elements extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArray {
    /// The matched array's elements, reconstructed compactly, in document
    /// order; empty when the match is an empty array or when `is_null` is set
    pub elements: Vec<String>,
    /// True when the match is not an array or nothing matches
    pub is_null: bool,
    /// True when some node fully satisfied the path
    pub stopped_on_first_match: bool,
}

/// Extract the matched sub-document as compact text
pub(crate) fn extract(
    json: &str,
    path: &mut JsonPathIterator,
    escape_special_characters: bool,
) -> Result<Extracted, ExtractError> {
    let scanner = Scanner::new(json, path, OutputMode::Structural, escape_special_characters);
    let done = scanner.run()?;
    Ok(Extracted {
        value: done.out,
        is_null: done.is_null,
        stopped_on_first_match: done.stopped_on_first_match,
    })
}

/// Extract the matched value only if it is a scalar
pub(crate) fn extract_scalar(
    json: &str,
    path: &mut JsonPathIterator,
    escape_special_characters: bool,
) -> Result<Extracted, ExtractError> {
    let scanner = Scanner::new(json, path, OutputMode::Scalar, escape_special_characters);
    let done = scanner.run()?;
    Ok(Extracted {
        value: done.out,
        is_null: done.is_null,
        stopped_on_first_match: done.stopped_on_first_match,
    })
}

/// Extract the matched array's elements as compact text
pub(crate) fn extract_array(
    json: &str,
    path: &mut JsonPathIterator,
    escape_special_characters: bool,
) -> Result<ExtractedArray, ExtractError> {
    let scanner = Scanner::new(json, path, OutputMode::ArrayElements, escape_special_characters);
    let done = scanner.run()?;
    Ok(ExtractedArray {
        elements: done.elements,
        is_null: done.is_null,
        stopped_on_first_match: done.stopped_on_first_match,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Structural,
    Scalar,
    ArrayElements,
}

/// Why a scan stopped before completing normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanAbort {
    /// The document is not well-formed JSON; the overall result is null
    Malformed,
    /// The nesting guard tripped; the overall result is a hard error
    TooDeep,
}

/// Outcome of scanning one value: either the match resolved here (and the
/// scan must unwind), or scanning continues with the siblings
enum Scan {
    Continue,
    Done,
}

type ScanResult = Result<Scan, ScanAbort>;

/// Nesting counter shared by every phase of a scan
///
/// Incremented on each `{`/`[`, including structure that is being skipped
/// because it cannot match the path.
#[derive(Debug, Default)]
struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    fn push(&mut self) -> Result<(), ScanAbort> {
        self.depth += 1;
        if self.depth > MAX_PARSING_DEPTH {
            Err(ScanAbort::TooDeep)
        } else {
            Ok(())
        }
    }

    fn pop(&mut self) {
        self.depth -= 1;
    }
}

/// A single-use scan of one document against one compiled path
struct Scanner<'a, 'p> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    path: &'p mut JsonPathIterator,
    mode: OutputMode,
    escape_special_characters: bool,
    guard: DepthGuard,
    out: String,
    elements: Vec<String>,
    is_null: bool,
    stopped_on_first_match: bool,
}

impl<'a, 'p> Scanner<'a, 'p> {
    fn new(
        json: &'a str,
        path: &'p mut JsonPathIterator,
        mode: OutputMode,
        escape_special_characters: bool,
    ) -> Self {
        path.rewind();
        // The root token always matches the whole document
        path.advance();
        Scanner {
            text: json,
            input: json.as_bytes(),
            pos: 0,
            path,
            mode,
            escape_special_characters,
            guard: DepthGuard::default(),
            out: String::new(),
            elements: Vec::new(),
            is_null: true,
            stopped_on_first_match: false,
        }
    }

    fn run(mut self) -> Result<Self, ExtractError> {
        match self.value() {
            Err(ScanAbort::TooDeep) => return Err(ExtractError::DeeplyNested),
            Err(ScanAbort::Malformed) => {
                self.out.clear();
                self.elements.clear();
                self.is_null = true;
            }
            Ok(_) => {}
        }
        Ok(self)
    }

    /// Scan one value; the current value is the match target when the path
    /// cursor is exhausted
    fn value(&mut self) -> ScanResult {
        self.skip_ws();
        if self.path.end() {
            return self.capture();
        }
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            // A scalar has no members; the remaining tokens cannot match
            _ => {
                self.walk_value(false)?;
                Ok(Scan::Continue)
            }
        }
    }

    /// Scan an object's members against the current field token
    ///
    /// Members are visited in document order. A member whose key matches is
    /// descended into; if the descent does not resolve the rest of the path,
    /// the cursor retreats and scanning continues with the following members,
    /// so a later duplicate key can still match.
    fn object(&mut self) -> ScanResult {
        self.bump();
        self.guard.push()?;
        self.skip_ws();
        if self.eat(b'}') {
            self.guard.pop();
            return Ok(Scan::Continue);
        }
        loop {
            self.skip_ws();
            let key = self.read_string()?;
            self.skip_ws();
            if !self.eat(b':') {
                return Err(ScanAbort::Malformed);
            }
            let descend = self.path.current().map_or(false, |t| t.name() == key);
            if descend {
                self.path.advance();
                if let Scan::Done = self.value()? {
                    return Ok(Scan::Done);
                }
                self.path.retreat();
            } else {
                self.walk_value(false)?;
            }
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                self.guard.pop();
                return Ok(Scan::Continue);
            }
            return Err(ScanAbort::Malformed);
        }
    }

    /// Scan an array's elements against the current index token
    fn array(&mut self) -> ScanResult {
        self.bump();
        self.guard.push()?;
        let wanted = self.path.current().and_then(|t| t.array_index());
        self.skip_ws();
        if self.eat(b']') {
            self.guard.pop();
            return Ok(Scan::Continue);
        }
        let mut position: i64 = 0;
        loop {
            if wanted == Some(position) {
                self.path.advance();
                if let Scan::Done = self.value()? {
                    return Ok(Scan::Done);
                }
                self.path.retreat();
            } else {
                self.walk_value(false)?;
            }
            self.skip_ws();
            if self.eat(b',') {
                position += 1;
                continue;
            }
            if self.eat(b']') {
                self.guard.pop();
                return Ok(Scan::Continue);
            }
            return Err(ScanAbort::Malformed);
        }
    }

    /// The path cursor is exhausted: the value at the scan position is the
    /// match. Capture it per the output mode and stop the scan.
    fn capture(&mut self) -> ScanResult {
        match self.mode {
            OutputMode::Structural => {
                self.is_null = self.peek() == Some(b'n');
                self.walk_value(true)?;
                self.stopped_on_first_match = true;
            }
            OutputMode::Scalar => self.capture_scalar()?,
            OutputMode::ArrayElements => self.capture_elements()?,
        }
        Ok(Scan::Done)
    }

    /// Scalar capture stops the instant the scalar's lexeme is recognized;
    /// whatever follows it in the document is never validated. A composite
    /// match is null and its interior is not scanned at all.
    fn capture_scalar(&mut self) -> Result<(), ScanAbort> {
        match self.peek() {
            Some(b'{') | Some(b'[') => self.is_null = true,
            Some(b'"') => {
                let decoded = self.read_string()?;
                self.out.push_str(&decoded);
                self.is_null = false;
            }
            Some(b't') => {
                self.keyword("true")?;
                self.out.push_str("true");
                self.is_null = false;
            }
            Some(b'f') => {
                self.keyword("false")?;
                self.out.push_str("false");
                self.is_null = false;
            }
            Some(b'n') => {
                self.keyword("null")?;
                self.is_null = true;
            }
            Some(c) if c == b'-' || c.is_ascii_digit() => {
                let lexeme = self.read_number()?;
                self.out.push_str(lexeme);
                self.is_null = false;
            }
            _ => return Err(ScanAbort::Malformed),
        }
        self.stopped_on_first_match = true;
        Ok(())
    }

    /// The match must be an array; copy out each element's compact text
    fn capture_elements(&mut self) -> Result<(), ScanAbort> {
        if self.peek() != Some(b'[') {
            self.is_null = true;
            self.stopped_on_first_match = true;
            return Ok(());
        }
        self.bump();
        self.guard.push()?;
        self.skip_ws();
        if !self.eat(b']') {
            loop {
                let start = self.out.len();
                self.walk_value(true)?;
                self.elements.push(self.out.split_off(start));
                self.skip_ws();
                if self.eat(b',') {
                    continue;
                }
                if self.eat(b']') {
                    break;
                }
                return Err(ScanAbort::Malformed);
            }
        }
        self.guard.pop();
        self.is_null = false;
        self.stopped_on_first_match = true;
        Ok(())
    }

    /// Walk one complete value, emitting its compact reconstruction when
    /// `emit` is set and merely validating it otherwise. Depth accounting is
    /// identical either way.
    fn walk_value(&mut self, emit: bool) -> Result<(), ScanAbort> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => {
                self.bump();
                self.guard.push()?;
                if emit {
                    self.out.push('{');
                }
                self.skip_ws();
                if !self.eat(b'}') {
                    loop {
                        self.skip_ws();
                        let key = self.read_string()?;
                        if emit {
                            self.push_quoted(&key);
                            self.out.push(':');
                        }
                        self.skip_ws();
                        if !self.eat(b':') {
                            return Err(ScanAbort::Malformed);
                        }
                        self.walk_value(emit)?;
                        self.skip_ws();
                        if self.eat(b',') {
                            if emit {
                                self.out.push(',');
                            }
                            continue;
                        }
                        if self.eat(b'}') {
                            break;
                        }
                        return Err(ScanAbort::Malformed);
                    }
                }
                if emit {
                    self.out.push('}');
                }
                self.guard.pop();
            }
            Some(b'[') => {
                self.bump();
                self.guard.push()?;
                if emit {
                    self.out.push('[');
                }
                self.skip_ws();
                if !self.eat(b']') {
                    loop {
                        self.walk_value(emit)?;
                        self.skip_ws();
                        if self.eat(b',') {
                            if emit {
                                self.out.push(',');
                            }
                            continue;
                        }
                        if self.eat(b']') {
                            break;
                        }
                        return Err(ScanAbort::Malformed);
                    }
                }
                if emit {
                    self.out.push(']');
                }
                self.guard.pop();
            }
            Some(b'"') => {
                let decoded = self.read_string()?;
                if emit {
                    self.push_quoted(&decoded);
                }
            }
            Some(b't') => {
                self.keyword("true")?;
                if emit {
                    self.out.push_str("true");
                }
            }
            Some(b'f') => {
                self.keyword("false")?;
                if emit {
                    self.out.push_str("false");
                }
            }
            Some(b'n') => {
                self.keyword("null")?;
                if emit {
                    self.out.push_str("null");
                }
            }
            Some(c) if c == b'-' || c.is_ascii_digit() => {
                let lexeme = self.read_number()?;
                if emit {
                    self.out.push_str(lexeme);
                }
            }
            _ => return Err(ScanAbort::Malformed),
        }
        Ok(())
    }

    fn push_quoted(&mut self, decoded: &str) {
        self.out.push('"');
        if self.escape_special_characters {
            strings::escape_into(decoded, &mut self.out);
        } else {
            self.out.push_str(decoded);
        }
        self.out.push('"');
    }

    fn read_string(&mut self) -> Result<String, ScanAbort> {
        let (decoded, end) = strings::read_string(self.text, self.pos)?;
        self.pos = end;
        Ok(decoded)
    }

    fn read_number(&mut self) -> Result<&'a str, ScanAbort> {
        let text: &'a str = self.text;
        let end = strings::read_number(text, self.pos)?;
        let lexeme = &text[self.pos..end];
        self.pos = end;
        Ok(lexeme)
    }

    fn keyword(&mut self, word: &str) -> Result<(), ScanAbort> {
        if self.text[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(())
        } else {
            Err(ScanAbort::Malformed)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(
            self.peek(),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
        ) {
            self.pos += 1;
        }
    }
}
