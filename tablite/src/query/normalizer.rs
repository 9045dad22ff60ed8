use crate::collection::Document;
use crate::common::{Value, PATH_SEPARATOR};

/// How the matcher treats nested documents once a query has been normalized.
///
/// The mode is a product of normalization, never an independent caller choice:
/// a query written with dotted path keys matches permissively, a query written
/// with literal nesting matches strictly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchMode {
    /// Nested documents must match exactly: no extra fields on either side.
    Strict,
    /// Nested documents match as subsets: extra stored fields are ignored.
    Permissive,
}

/// A query or patch rewritten into canonical nested form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Normalized {
    /// The input with every dotted path key expanded into nested documents.
    pub canonical: Document,
    /// Strict when the input used literal nesting only, permissive otherwise.
    pub mode: MatchMode,
}

/// Rewrites a query or patch document into canonical nested form.
///
/// Each key containing `.` is split into segments and folded from the right
/// into a chain of single-field documents, so `{"a.b.c": v}` becomes
/// `{"a": {"b": {"c": v}}}`. Keys without a separator are copied verbatim.
/// Top-level collisions resolve by shallow union: the last writer wins for the
/// value while the key keeps its first position.
///
/// The returned mode records how the query was written. Any path key makes the
/// whole query [MatchMode::Permissive]; a query of literal keys only stays
/// [MatchMode::Strict]. Matching and merging change behavior on this flag, so
/// `{"status.code": 200}` and `{"status": {"code": 200}}` normalize to the
/// same canonical document but do not mean the same thing.
///
/// # Examples
///
/// ```ignore
/// let normalized = normalize(&doc!{ "status.code": 200 });
/// assert_eq!(normalized.canonical, doc!{ status: { code: 200 } });
/// assert_eq!(normalized.mode, MatchMode::Permissive);
///
/// let normalized = normalize(&doc!{ status: { code: 200 } });
/// assert_eq!(normalized.mode, MatchMode::Strict);
/// ```
pub fn normalize(query: &Document) -> Normalized {
    let mut canonical = Document::new();
    let mut path_keyed = false;

    for (key, value) in query.iter() {
        if key.contains(PATH_SEPARATOR) {
            path_keyed = true;
            let segments: Vec<&str> = key.split(PATH_SEPARATOR).collect();
            canonical.set(segments[0].to_string(), expand_path(&segments[1..], value));
        } else {
            canonical.set(key.clone(), value.clone());
        }
    }

    let mode = if path_keyed {
        MatchMode::Permissive
    } else {
        MatchMode::Strict
    };
    Normalized { canonical, mode }
}

/// Folds the remaining path segments into nested single-field documents.
///
/// Empty segments are preserved as empty keys, so `"a."` expands to
/// `{"a": {"": v}}` rather than being rejected.
fn expand_path(segments: &[&str], value: &Value) -> Value {
    match segments.split_first() {
        None => value.clone(),
        Some((head, rest)) => {
            let mut wrapper = Document::new();
            wrapper.set((*head).to_string(), expand_path(rest, value));
            Value::Document(wrapper)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_literal_query_is_strict() {
        let query = doc! { key: "A", status: { code: 200 } };
        let normalized = normalize(&query);

        assert_eq!(normalized.canonical, query);
        assert_eq!(normalized.mode, MatchMode::Strict);
    }

    #[test]
    fn test_empty_query_is_strict() {
        let normalized = normalize(&doc! {});
        assert!(normalized.canonical.is_empty());
        assert_eq!(normalized.mode, MatchMode::Strict);
    }

    #[test]
    fn test_single_path_key_expands() {
        let normalized = normalize(&doc! { "status.code": 200 });

        assert_eq!(normalized.canonical, doc! { status: { code: 200 } });
        assert_eq!(normalized.mode, MatchMode::Permissive);
    }

    #[test]
    fn test_multi_segment_path_expands_right_to_left() {
        let normalized = normalize(&doc! { "a.b.c": "deep" });

        assert_eq!(normalized.canonical, doc! { a: { b: { c: "deep" } } });
        assert_eq!(normalized.mode, MatchMode::Permissive);
    }

    #[test]
    fn test_one_path_key_makes_whole_query_permissive() {
        let normalized = normalize(&doc! { key: "A", "status.code": 200 });

        assert_eq!(
            normalized.canonical,
            doc! { key: "A", status: { code: 200 } }
        );
        assert_eq!(normalized.mode, MatchMode::Permissive);
    }

    #[test]
    fn test_colliding_top_level_keys_last_writer_wins() {
        // "status.code" lands first, the literal "status" then replaces it
        let query = doc! { "status.code": 200, status: { message: "OK" } };
        let normalized = normalize(&query);

        assert_eq!(normalized.canonical, doc! { status: { message: "OK" } });
        // the key keeps its first position
        let keys: Vec<&String> = normalized.canonical.keys().collect();
        assert_eq!(keys, ["status"]);
        assert_eq!(normalized.mode, MatchMode::Permissive);
    }

    #[test]
    fn test_collision_union_is_shallow() {
        let query = doc! { "status.code": 200, "status.message": "OK" };
        let normalized = normalize(&query);

        // no recursive union: the second expansion replaces the first
        assert_eq!(normalized.canonical, doc! { status: { message: "OK" } });
    }

    #[test]
    fn test_trailing_separator_keeps_empty_segment() {
        let normalized = normalize(&doc! { "a.": 1 });

        let inner = normalized
            .canonical
            .get("a")
            .and_then(Value::as_document)
            .unwrap();
        assert_eq!(inner.get(""), Some(&Value::from(1)));
        assert_eq!(normalized.mode, MatchMode::Permissive);
    }

    #[test]
    fn test_input_document_is_untouched() {
        let query = doc! { "status.code": 200 };
        let _ = normalize(&query);
        assert_eq!(query, doc! { "status.code": 200 });
    }

    #[test]
    fn test_non_path_values_copied_verbatim() {
        let query = doc! { tags: ["a", "b"], flag: true, level: 3 };
        let normalized = normalize(&query);

        assert_eq!(normalized.canonical, query);
        assert_eq!(normalized.mode, MatchMode::Strict);
    }
}
