//! Streaming JSONPath extraction over raw JSON text.
//!
//! This crate implements the extraction core behind the SQL scalar functions
//! `JSON_EXTRACT`, `JSON_EXTRACT_SCALAR`, `JSON_EXTRACT_ARRAY`, `JSON_QUERY`,
//! and `JSON_VALUE`. Given a JSON document as text and a path expression, it
//! scans the document in a single pass, stops at the first node the path
//! addresses, and copies out only that node's text; no value tree is ever
//! built for the input.
//!
//! # Features
//!
//! This crate provides two key abstractions:
//!
//! * The [`JsonPathEvaluator`] struct, which binds a compiled path to the
//!   three extraction entry points used by the SQL function layer.
//! * The [`JsonPathIterator`] struct, which represents a validated path as a
//!   bidirectionally traversable sequence of [`PathToken`]s.
//!
//! Two path [`Dialect`]s are supported, selected by the SQL layer's
//! standard-mode flag: `JSON_QUERY`/`JSON_VALUE` syntax (`."quoted field"`),
//! and the legacy `JSON_EXTRACT` syntax (`['quoted field']`). Paths are
//! compiled once and reused across any number of documents.
//!
//! # Usage
//!
//! ## Extracting a sub-document
//!
//! [`extract`][JsonPathEvaluator::extract] returns the matched value's text,
//! reconstructed compactly:
//!
//! ```rust
//! use json_path_extract::JsonPathEvaluator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut evaluator = JsonPathEvaluator::new("$.a.b", true)?;
//! let result = evaluator.extract(r#"{"a": {"b": [ { "c" : "foo" } ] } }"#)?;
//! assert_eq!(result.value, r#"[{"c":"foo"}]"#);
//! assert!(!result.is_null);
//! # Ok(())
//! # }
//! ```
//!
//! ## Extracting a scalar
//!
//! [`extract_scalar`][JsonPathEvaluator::extract_scalar] returns strings
//! decoded and unquoted, and composite matches as null:
//!
//! ```rust
//! # use json_path_extract::JsonPathEvaluator;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{"a": {"b": [ { "c" : "foo" } ] } }"#;
//! let mut evaluator = JsonPathEvaluator::new("$.a.b[0].c", true)?;
//! assert_eq!(evaluator.extract_scalar(json)?.value, "foo");
//!
//! let mut evaluator = JsonPathEvaluator::new("$.a.b", true)?;
//! assert!(evaluator.extract_scalar(json)?.is_null);
//! # Ok(())
//! # }
//! ```
//!
//! ## Extracting array elements
//!
//! [`extract_array`][JsonPathEvaluator::extract_array] returns each element
//! of the matched array as its own string:
//!
//! ```rust
//! # use json_path_extract::JsonPathEvaluator;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut evaluator = JsonPathEvaluator::new("$.a", false)?;
//! let result = evaluator.extract_array(r#"{"a": [1, "two", {"three": 3}]}"#)?;
//! assert_eq!(result.elements, ["1", "\"two\"", r#"{"three":3}"#]);
//! # Ok(())
//! # }
//! ```
//!
//! # Matching semantics
//!
//! A path that addresses no node is not an error: the call succeeds with
//! `is_null` set. Objects may contain duplicate keys; members are scanned in
//! document order and the first member whose subtree resolves the rest of
//! the path wins, at which point scanning stops and later siblings are never
//! read. Array positions are zero-based; `'-0'` addresses position zero,
//! while every other negative or out-of-range index matches nothing.
//!
//! Malformed documents also produce a null result rather than an error, with
//! one exception: input nested more than [`MAX_PARSING_DEPTH`] objects or
//! arrays deep fails with [`ExtractError::DeeplyNested`], whatever the path.
//!
//! # Unsupported operators
//!
//! Wildcards (`*`), recursive descent (`..`), and filter expressions (`@`)
//! are rejected when the path is compiled, with an error naming the
//! operator.

#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::todo,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::mem_forget,
    clippy::unused_self,
    clippy::filter_map_next,
    clippy::needless_continue,
    clippy::needless_borrow,
    clippy::match_wildcard_for_single_variants,
    clippy::if_let_mutex,
    clippy::await_holding_lock,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::lossy_float_literal,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::fn_params_excessive_bools,
    clippy::exit,
    clippy::inefficient_to_string,
    clippy::linkedlist,
    clippy::macro_use_imports,
    clippy::option_option,
    clippy::verbose_file_reads,
    clippy::unnested_or_patterns,
    clippy::str_to_string,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    missing_debug_implementations,
    missing_docs
)]
#![deny(unreachable_pub)]
#![allow(elided_lifetimes_in_paths, clippy::type_complexity)]
#![forbid(unsafe_code)]

mod error;
mod extract;
mod parser;
mod path;
mod token;

pub use error::{ExtractError, ParseError};
pub use extract::{Extracted, ExtractedArray, MAX_PARSING_DEPTH};
pub use path::{is_valid_json_path, JsonPathEvaluator, JsonPathIterator};
pub use token::{Dialect, PathToken};
