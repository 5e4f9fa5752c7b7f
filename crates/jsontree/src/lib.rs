//! # jsontree
//!
//! In-memory JSON document tree for embedding in larger applications
//! (configuration trees, protocol payloads).
//!
//! A [`Value`] is built programmatically, parsed from JSON text, mutated through
//! path-like accessors and serialized back to compact JSON text. Mutating
//! accessors lazily turn `null` into the object or array they need, but never
//! silently change a value that already holds something else.
//!
//! ## Quick start
//!
//! ```rust
//! use jsontree::Value;
//!
//! let mut value = Value::default();
//! value[0] = Value::from(500);
//! value[1] = Value::parse(r#"{"host": "127.0.0.1", "object": {"color": "green"}}"#)?;
//!
//! assert_eq!(value[1]["object"].dump(), r#"{"color":"green"}"#);
//! assert_eq!(value[1]["host"].get::<String>()?, "127.0.0.1");
//!
//! // Lookups that must not create anything report what went wrong.
//! assert!(value[1].at("port").is_err());
//! assert!(value[1].search("port").is_none());
//! # Ok::<(), jsontree::JsonError>(())
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value`, `Member`, assignment (`assign`) and typed reads (`get`)
//! - [`access`] — lookup-or-create, lookup-or-fail, `search`, `push_back`, `[]` operators
//! - [`pointer`] — RFC 6901 JSON Pointer lookup and path creation
//! - [`parser`] — JSON text → `Value`, with `ParseOptions`
//! - [`serializer`] — `Value` → compact JSON text (`dump`, `Display`)
//! - [`error`] — Error types for access and parse failures
//!
//! `serde` `Serialize`/`Deserialize` and conversions to and from
//! `serde_json::Value` are implemented for [`Value`].

pub mod access;
pub mod error;
pub mod parser;
pub mod pointer;
mod serde_impl;
pub mod serializer;
pub mod value;

pub use access::Locator;
pub use error::{JsonError, Result};
pub use parser::{from_slice, parse, parse_with, ParseOptions};
pub use value::{Assign, FromValue, Member, Value, ValueType};
