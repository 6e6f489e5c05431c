//! # json-core
//!
//! An owned JSON value tree with a strict parser, a deterministic serializer
//! and a trait-based conversion layer for native Rust types.
//!
//! ## Quick start
//!
//! ```rust
//! use json_core::{parse, FormatOptions, Value};
//!
//! // Text → Value
//! let mut doc = parse(r#"{"name":"Alice","scores":[95,87]}"#).unwrap();
//! assert_eq!(doc["scores"][1], 87.0);
//!
//! // Build in place; missing containers are created on the way down
//! doc["team"]["city"] = "Lyon".into();
//! doc["scores"][3] = 70.into();
//!
//! // Value → Text
//! assert_eq!(
//!     doc.to_string(),
//!     r#"{"name": "Alice", "scores": [95, 87, null, 70], "team": {"city": "Lyon"}}"#
//! );
//! let pretty = json_core::to_string_with(&doc, &FormatOptions::pretty());
//! assert!(pretty.starts_with("{\n    \"name\": \"Alice\""));
//!
//! // Typed access
//! let name: String = doc.get("name").unwrap();
//! let scores: Vec<Option<u32>> = doc.get("scores").unwrap();
//! assert_eq!(name, "Alice");
//! assert_eq!(scores, [Some(95), Some(87), None, Some(70)]);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: [`Value`] and [`Kind`]
//! - [`map`]: [`Map`], the object storage (insertion order, or sorted with the
//!   `sort-keys` feature)
//! - [`parser`]: text → [`Value`]
//! - [`serializer`]: [`Value`] → text
//! - [`convert`]: [`ToJson`] / [`FromJson`] / [`MapKey`]
//! - [`access`]: `get` / `try_get` / `has_key` / `set` on objects
//! - [`fs`]: whole-file read and write
//! - [`interop`]: serde and `serde_json::Value` bridges
//! - [`error`]: [`JsonError`]

pub mod access;
pub mod convert;
pub mod error;
pub mod fs;
mod index;
pub mod interop;
pub mod map;
pub mod parser;
pub mod serializer;
pub mod value;

pub use convert::{decode, encode, FromJson, MapKey, ToJson};
pub use error::{JsonError, Result};
pub use fs::{parse_file, try_parse_file, try_parse_file_with_message, write_file};
pub use interop::{from_serde, to_serde};
pub use map::Map;
pub use parser::{
    parse, parse_value_at, parse_with_options, try_parse, try_parse_with_message, ParseOptions,
    Parser, MAX_DEPTH,
};
pub use serializer::{to_string, to_string_with, FormatOptions, Serializer};
pub use value::{Kind, Value};
