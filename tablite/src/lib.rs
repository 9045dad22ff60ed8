#![allow(dead_code, unused_imports)]
//! # Tablite - Embeddable In-Memory Document Store
//!
//! Tablite is a lightweight, schema-less, in-memory document store written in
//! Rust. It organizes documents into named tables and answers partial-match
//! queries written as plain documents.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process, no storage backend to configure
//! - **Schema-less**: Documents are free-form maps of strings to values
//! - **Queries by example**: A query is itself a document; matching is a
//!   subset check at the top level
//! - **Path queries**: `{"status.code": 200}` reaches into nested documents
//!   and matches permissively, while literal nesting matches strictly
//! - **Merge updates**: Updates merge a patch into matching documents in
//!   place, recursively for path-keyed patches
//! - **Shared handles**: Reads return handles into live storage, so results
//!   observe later mutations
//! - **Interchange**: Whole catalogs export to and import from a small JSON
//!   format
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tablite::doc;
//! use tablite::tablite::Tablite;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a catalog
//! let db = Tablite::new();
//!
//! // Create a table and select it
//! db.create_table("users")?;
//! db.use_table("users")?;
//!
//! // Insert documents
//! db.insert(doc!{ name: "Alice", status: { active: true, role: "admin" } })?;
//! db.insert(doc!{ name: "Bob", status: { active: false, role: "user" } })?;
//!
//! // Query by example: path keys match nested fields permissively
//! let active = db.read(&doc!{ "status.active": true })?;
//! assert_eq!(active.len(), 1);
//!
//! // Merge a patch into matching documents
//! db.update(&doc!{ name: "Bob" }, &doc!{ "status.active": true })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Pattern
//!
//! Tablite uses the **PIMPL (Pointer To IMPLementation)** design pattern:
//!
//! - **Encapsulation**: Implementation details are completely hidden
//! - **API Stability**: Public interface is stable and can evolve independently
//! - **Thread Safety**: All clones share the same underlying state through
//!   `Arc` and lock-guarded interiors
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, shared document handles, and tables
//! - [`common`] - Common types, constants, and utilities
//! - [`defer`] - Deferred result delivery
//! - [`errors`] - Error types and result definitions
//! - [`persist`] - Catalog import and export
//! - [`query`] - Query normalization, matching, and merging
//! - [`tablite`] - Core catalog interface

pub mod collection;
pub mod common;
pub mod defer;
pub mod errors;
pub mod persist;
pub mod query;
pub mod tablite;
