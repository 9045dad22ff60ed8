//! Common types and utilities shared across the crate.
//!
//! This module provides the value model, crate-wide constants, and the
//! lock-guarded shared state primitives used by tables and the catalog.

mod constants;
mod util;
mod value;

pub use constants::*;
pub use util::*;
pub use value::*;
