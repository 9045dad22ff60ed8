//! Query normalization, matching, and merging.
//!
//! Queries and patches are plain [`crate::collection::Document`]s. Before a
//! table evaluates one it goes through [normalize], which expands dotted path
//! keys into nested form and records the [MatchMode] the query was written in.
//! [matches] then decides membership and [merge_in_place] applies updates,
//! both honoring the recorded mode. The path form and equivalent literal
//! nesting produce the same canonical document but different modes, which is
//! the whole point: how a query is spelled decides how exact it is.

mod matcher;
mod merger;
mod normalizer;

pub use matcher::*;
pub use merger::*;
pub use normalizer::*;
