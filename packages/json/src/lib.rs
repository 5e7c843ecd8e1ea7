//! Minimal JSON value tree for the Pxshot SDK.
//!
//! Parses request and response bodies into an owned [`Value`] tree, builds
//! outbound bodies through checked mutators, and prints trees back to text.
//!
//! ```
//! let value = pxshot_json::parse(r#"{"a":1,"b":[true,null]}"#).unwrap();
//! assert_eq!(value.get("a").and_then(|a| a.as_i64()), Some(1));
//! assert_eq!(pxshot_json::print(&value).unwrap(), r#"{"a":1,"b":[true,null]}"#);
//! ```

pub mod error;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod serializer;
pub mod value;
mod serde_impl;

#[cfg(test)]
mod tests_roundtrip;

pub use error::{ErrorKind, JsonError, JsonResult, ParseError, ParseResult};
pub use number::{Number, MAX_SAFE_INTEGER};
pub use parser::{parse, parse_bytes, parse_bytes_with, parse_with, ParseOptions, Parser, DEFAULT_MAX_DEPTH};
pub use serializer::{print, print_pretty, print_unformatted, Serializer};
pub use value::{Kind, Value};
