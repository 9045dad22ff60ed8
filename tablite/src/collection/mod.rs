//! Tables and documents for schemaless data storage.
//!
//! This module provides the core document storage abstraction in Tablite.
//! Tables store unstructured documents in insertion order and support
//! partial-match queries and recursive merge updates.
//!
//! # Documents
//!
//! A `Document` is a key-value map where keys are strings and values are
//! `Value` objects. Keys are literal: nesting is expressed through
//! `Value::Document`, and the dotted path form only has meaning in queries.
//!
//! ```rust,ignore
//! use tablite::doc;
//!
//! let doc = doc!{
//!     name: "Alice",
//!     address: { city: "New York" },
//!     age: 30,
//! };
//! ```
//!
//! # Tables
//!
//! A `Table` manages a sequence of documents. Tables support:
//! - Insert, read, update, delete operations
//! - Partial-match queries written as plain documents
//! - Path-keyed queries and patches with permissive nested semantics
//!
//! ```rust,ignore
//! use tablite::doc;
//!
//! let table = Table::new("users");
//! table.insert(doc!{ name: "Alice", status: { active: true } });
//!
//! let matched = table.read(&doc!{ "status.active": true });
//! let result = table.update(&doc!{ name: "Alice" }, &doc!{ "status.active": false });
//! ```
//!
//! # Document identity
//!
//! Documents carry no identifier field. A stored document is identified by its
//! [DocumentHandle]: reads return handles into live storage, and update and
//! delete resolve matches back to storage slots by handle identity. Duplicate
//! contents are therefore distinct rows.

mod document;
mod table;
mod write_result;

pub use document::*;
pub use table::*;
pub use write_result::*;
