use indexmap::IndexMap;

use crate::common::{atomic, Atomic, ReadExecutor, Value, PATH_SEPARATOR};
use crate::errors::{ErrorKind, TabliteError, TabliteResult};
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Represents a document in a Tablite table.
///
/// Tablite documents are composed of key-value pairs. The key is always a
/// [String] and value is a [Value]. Keys preserve their insertion order, so a
/// document round-trips through the JSON interchange format without reordering.
///
/// Documents support nesting through [Value::Document]. At the storage level a
/// key is always literal: `"status.code"` names a single top-level field whose
/// name happens to contain a dot. The dotted path form only gains meaning when
/// a document is used as a query or patch, where the normalizer expands it
/// into nested structure (see [`crate::query::normalize`]).
///
/// There are no reserved fields and no schema. Two documents are equal when
/// they hold the same keys with structurally equal values, regardless of key
/// order.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            fields: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let empty_doc = Document::new();
    /// assert!(empty_doc.is_empty());
    ///
    /// let doc = doc!{ key: "value" };
    /// assert!(!doc.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of top-level fields in the document.
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// This method inserts a key-value pair into the document. If the key
    /// already exists, its value is replaced while the key keeps its original
    /// position. The key is stored verbatim; a key containing `.` stays a
    /// single literal field and is never expanded into nested documents.
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that
    ///   implements `Into<Value>` (primitives, strings, documents, arrays, etc.).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    ///
    /// # Examples
    ///
    /// Basic insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    ///
    /// Nested document insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("status", doc!{ code: 200 })?;
    /// assert!(doc.get("status").is_some());
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> TabliteResult<()> {
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(TabliteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        self.fields.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Inserts a key-value pair without validation.
    ///
    /// The normalizer relies on this to reproduce query shapes exactly,
    /// including the empty path segments a malformed query can carry.
    pub(crate) fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    /// Returns the value associated with the given top-level key.
    ///
    /// Lookup is literal: `get("status.code")` only finds a field whose name
    /// is exactly `"status.code"`. Use [Document::get_path] to walk nested
    /// documents along a dotted path.
    ///
    /// # Arguments
    ///
    /// * `key` - The top-level key to look up.
    ///
    /// # Returns
    ///
    /// `Some(&Value)` if the key exists, `None` otherwise.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the value associated with the given key mutably.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Returns the value at the given dotted path.
    ///
    /// A literal field with the full path as its name takes precedence over
    /// the nested interpretation. Otherwise the path is split on `.` and each
    /// segment must resolve through a nested document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ status: { code: 200 } };
    /// assert_eq!(doc.get_path("status.code"), Some(&Value::from(200)));
    /// assert_eq!(doc.get("status.code"), None);
    /// ```
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        if !path.contains(PATH_SEPARATOR) {
            return None;
        }

        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Document(inner) => current = inner.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Checks whether the document contains the given top-level key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes the given top-level key from the document.
    ///
    /// The relative order of the remaining fields is preserved.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was absent.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Returns an iterator over the key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(text) => write!(f, "{}", text),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

/// Shared handle to a document stored in a table.
///
/// Every read result hands out handles into live storage rather than
/// snapshots, so an update performed through the table is observable through
/// handles obtained earlier. Handle identity (not structural equality) is what
/// ties a matched document back to its slot during update and delete.
pub type DocumentHandle = Atomic<Document>;

/// Wraps a document into a fresh [DocumentHandle].
pub fn document_handle(document: Document) -> DocumentHandle {
    atomic(document)
}

/// Checks whether two handles refer to the same stored document.
///
/// Structural equality is useless here: a table may hold several documents
/// with identical contents, and only pointer identity distinguishes them.
pub fn same_document(a: &DocumentHandle, b: &DocumentHandle) -> bool {
    Arc::ptr_eq(a, b)
}

/// Returns a point-in-time copy of the document behind a handle.
pub fn snapshot(handle: &DocumentHandle) -> Document {
    handle.read_with(|document| document.clone())
}

/// Returns point-in-time copies of the documents behind the given handles.
pub fn snapshots(handles: &[DocumentHandle]) -> Vec<Document> {
    handles.iter().map(snapshot).collect()
}

/// Strips surrounding double quotes from a stringified macro key.
///
/// The `doc!` macro passes keys through `stringify!`, which leaves string
/// literal keys (like `"status.code"`) wrapped in quotes; identifier keys
/// pass through unchanged.
pub fn unquote(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a Tablite Document with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use tablite::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Simple key-value pairs
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = doc!{
///     name: "Bob",
///     score: (base * 2),
///     computed: (base + 50)
/// };
///
/// // Nested documents and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
///
/// // Literal dotted keys, as used in path queries
/// let query = doc!{ "status.code": 200 };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document (without braces)
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (outer braces)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs (without outer braces)
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::unquote(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
