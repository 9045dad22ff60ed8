use crate::collection::Document;
use crate::common::Value;
use crate::query::MatchMode;

/// Applies a canonical patch to a document in place.
///
/// The patch must already be normalized (see [`crate::query::normalize`]);
/// its mode decides how nested documents combine. Keys missing from the target
/// are always copied over verbatim.
///
/// Under [MatchMode::Strict] an existing key is replaced wholesale, so a
/// literal patch `{status: {code: 500}}` overwrites the entire `status`
/// document and drops any sibling fields it carried. Under
/// [MatchMode::Permissive] two documents merge recursively instead, which is
/// what a dotted path patch means: `{"status.code": 500}` rewrites `code` and
/// leaves the rest of `status` intact. Any non-document value on either side
/// still replaces.
///
/// Replaced and inserted keys keep their position when they already exist and
/// append otherwise, so merging never reorders a document.
pub fn merge_in_place(target: &mut Document, patch: &Document, mode: MatchMode) {
    merge_at(target, patch, mode == MatchMode::Strict);
}

/// Returns a merged copy, leaving the target untouched.
///
/// Same combination rules as [merge_in_place].
pub fn merge_copy(target: &Document, patch: &Document, mode: MatchMode) -> Document {
    let mut merged = target.clone();
    merge_in_place(&mut merged, patch, mode);
    merged
}

fn merge_at(target: &mut Document, patch: &Document, strict: bool) {
    for (key, incoming) in patch.iter() {
        if !strict {
            if let (Some(Value::Document(existing)), Value::Document(sub)) =
                (target.get_mut(key), incoming)
            {
                merge_at(existing, sub, false);
                continue;
            }
        }
        target.set(key.clone(), incoming.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::query::{normalize, Normalized};

    fn stored() -> Document {
        doc! {
            key: "A",
            status: {
                code: 200,
                message: "OK",
            },
        }
    }

    fn apply(target: &mut Document, patch: Document) {
        let Normalized { canonical, mode } = normalize(&patch);
        merge_in_place(target, &canonical, mode);
    }

    #[test]
    fn test_missing_keys_are_copied() {
        let mut target = doc! { key: "A" };
        apply(&mut target, doc! { value: "B" });
        assert_eq!(target, doc! { key: "A", value: "B" });
    }

    #[test]
    fn test_scalar_replaces_scalar() {
        let mut target = doc! { key: "A", value: "B" };
        apply(&mut target, doc! { value: "X" });
        assert_eq!(target, doc! { key: "A", value: "X" });
    }

    #[test]
    fn test_path_patch_preserves_nested_siblings() {
        let mut target = stored();
        apply(&mut target, doc! { "status.code": 500 });

        assert_eq!(
            target,
            doc! { key: "A", status: { code: 500, message: "OK" } }
        );
    }

    #[test]
    fn test_literal_patch_replaces_nested_document() {
        let mut target = stored();
        apply(&mut target, doc! { status: { code: 500 } });

        assert_eq!(target, doc! { key: "A", status: { code: 500 } });
    }

    #[test]
    fn test_patch_asymmetry_on_same_canonical_form() {
        // both patches normalize to {status: {code: 500}}; only the path form
        // keeps the sibling "message"
        let mut by_path = stored();
        apply(&mut by_path, doc! { "status.code": 500 });
        assert!(by_path.get_path("status.message").is_some());

        let mut by_literal = stored();
        apply(&mut by_literal, doc! { status: { code: 500 } });
        assert!(by_literal.get_path("status.message").is_none());
    }

    #[test]
    fn test_deep_path_patch_creates_missing_levels() {
        let mut target = doc! { key: "A" };
        apply(&mut target, doc! { "a.b.c": 1 });

        assert_eq!(target, doc! { key: "A", a: { b: { c: 1 } } });
    }

    #[test]
    fn test_permissive_scalar_still_replaces_document() {
        // recursion only happens when both sides are documents
        let mut target = doc! { status: { code: 200 } };
        apply(&mut target, doc! { "audit.by": "ops", status: "down" });

        assert_eq!(target.get("status"), Some(&Value::from("down")));
        assert_eq!(target.get_path("audit.by"), Some(&Value::from("ops")));
    }

    #[test]
    fn test_empty_path_segments_merge_like_any_key() {
        let mut target = doc! { status: { code: 200 } };
        apply(&mut target, doc! { "status.": "flat" });

        let status = target.get("status").and_then(Value::as_document).unwrap();
        assert_eq!(status.get(""), Some(&Value::from("flat")));
        assert_eq!(status.get("code"), Some(&Value::from(200)));
    }

    #[test]
    fn test_permissive_document_replaces_scalar() {
        let mut target = doc! { status: 200 };
        apply(&mut target, doc! { "status.code": 500 });

        assert_eq!(target, doc! { status: { code: 500 } });
    }

    #[test]
    fn test_merge_keeps_field_order() {
        let mut target = doc! { first: 1, second: 2, third: 3 };
        apply(&mut target, doc! { second: 20, fourth: 4 });

        let keys: Vec<&String> = target.keys().collect();
        assert_eq!(keys, ["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let mut target = stored();
        apply(&mut target, doc! {});
        assert_eq!(target, stored());
    }

    #[test]
    fn test_merge_copy_leaves_target_untouched() {
        let target = stored();
        let Normalized { canonical, mode } = normalize(&doc! { "status.code": 500 });
        let merged = merge_copy(&target, &canonical, mode);

        assert_eq!(target, stored());
        assert_eq!(
            merged,
            doc! { key: "A", status: { code: 500, message: "OK" } }
        );
    }

    #[test]
    fn test_strict_merge_is_shallow_replacement() {
        let mut target = doc! { a: { b: { c: 1 }, d: 2 } };
        apply(&mut target, doc! { a: { b: { x: 9 } } });

        assert_eq!(target, doc! { a: { b: { x: 9 } } });
    }
}
