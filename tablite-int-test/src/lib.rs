//! Shared fixtures and helpers for the tablite integration tests.

pub mod test_util;
