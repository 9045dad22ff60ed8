use crate::collection::Document;
use crate::common::Value;
use crate::query::MatchMode;

/// Checks whether a stored document satisfies a canonical query.
///
/// The query must already be normalized (see [`crate::query::normalize`]);
/// matching never interprets dotted keys itself. An empty query matches every
/// document.
///
/// Top levels always match as subsets: extra fields in the document never
/// disqualify it. The mode only changes what happens inside nested documents.
/// Under [MatchMode::Strict] a nested document must carry exactly the queried
/// fields, so `{status: {code: 200}}` does not match a document whose `status`
/// also has a `message`. Under [MatchMode::Permissive] nested documents match
/// as subsets too, which is what a dotted path query means.
///
/// One quirk is part of the contract: an empty document as a constraint is
/// trivially satisfied by any present value, so `{nested: {}}` matches every
/// document that has a `nested` field at all, even under strict mode.
pub fn matches(document: &Document, query: &Document, mode: MatchMode) -> bool {
    matches_at(document, query, mode == MatchMode::Strict, 0)
}

fn matches_at(document: &Document, query: &Document, strict: bool, depth: usize) -> bool {
    // every queried key must be present and satisfied
    for (key, constraint) in query.iter() {
        match document.get(key) {
            Some(actual) => {
                if !satisfies(actual, constraint, strict, depth) {
                    return false;
                }
            }
            None => return false,
        }
    }

    // strict nested levels additionally reject extra document fields;
    // the top level (depth 0) stays a subset match in both modes
    if strict && depth != 0 {
        for (key, actual) in document.iter() {
            match query.get(key) {
                Some(constraint) => {
                    if !satisfies(actual, constraint, strict, depth) {
                        return false;
                    }
                }
                None => return false,
            }
        }
    }

    true
}

fn satisfies(actual: &Value, constraint: &Value, strict: bool, depth: usize) -> bool {
    match constraint {
        // an empty sub-query is trivially satisfied by any present value
        Value::Document(sub) if sub.is_empty() => true,
        Value::Document(sub) => match actual {
            Value::Document(inner) => matches_at(inner, sub, strict, depth + 1),
            _ => false,
        },
        primitive => actual == primitive,
    }
}
