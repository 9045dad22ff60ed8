use itertools::Itertools;

use crate::collection::{
    document_handle, same_document, snapshots, Document, DocumentHandle, WriteResult,
};
use crate::common::{atomic, Atomic, ReadExecutor, Value, WriteExecutor};
use crate::errors::{ErrorKind, TabliteError, TabliteResult};
use crate::query::{matches, merge_in_place, normalize, MatchMode};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A named table of documents.
///
/// A table is an ordered sequence of shared document handles. Insertion order
/// is the storage order: reads, updates, and deletes all report documents in
/// the order they entered the table.
///
/// `Table` is cheap to clone; all clones share the same underlying storage
/// through `Arc<TableInner>`. Queries hand out [DocumentHandle]s into live
/// storage, so mutations performed through the table are observable through
/// handles obtained earlier, and vice versa.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::doc;
///
/// let table = Table::new("records");
/// table.insert(doc!{ key: "A", status: { code: 200, message: "OK" } });
///
/// let matched = table.read(&doc!{ "status.code": 200 });
/// assert_eq!(matched.len(), 1);
///
/// let result = table.update(&doc!{ key: "A" }, &doc!{ "status.code": 500 });
/// assert_eq!(result.count(), 1);
/// ```
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

struct TableInner {
    name: String,
    data: Atomic<Vec<DocumentHandle>>,
}

impl Table {
    /// Creates a new empty table with the given name.
    pub fn new(name: &str) -> Self {
        Self::with_documents(name, Vec::new())
    }

    /// Creates a new table seeded with the given documents, in order.
    pub fn with_documents(name: &str, documents: Vec<Document>) -> Self {
        let data = documents.into_iter().map(document_handle).collect();
        Table {
            inner: Arc::new(TableInner {
                name: name.to_string(),
                data: atomic(data),
            }),
        }
    }

    /// Creates a new table from an untyped seed value.
    ///
    /// The seed must be an array of documents, the shape a table takes in the
    /// catalog interchange format.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::InvalidDataType] error when the seed is not an
    /// array, or when any element is not a document.
    pub fn from_seed(name: &str, seed: Value) -> TabliteResult<Table> {
        let items = match seed {
            Value::Array(items) => items,
            other => {
                log::error!(
                    "Unsupported data type {} in seed for table {}",
                    other.type_name(),
                    name
                );
                return Err(TabliteError::new(
                    &format!("Unsupported data type for table seed: {}", other.type_name()),
                    ErrorKind::InvalidDataType,
                ));
            }
        };

        let mut documents = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Document(document) => documents.push(document),
                other => {
                    log::error!(
                        "Unsupported data type {} in seed for table {}",
                        other.type_name(),
                        name
                    );
                    return Err(TabliteError::new(
                        &format!(
                            "Unsupported data type in table seed: {}",
                            other.type_name()
                        ),
                        ErrorKind::InvalidDataType,
                    ));
                }
            }
        }
        Ok(Table::with_documents(name, documents))
    }

    /// Returns the name of this table.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the number of documents in the table.
    pub fn len(&self) -> usize {
        self.inner.data.read_with(|data| data.len())
    }

    /// Checks whether the table holds no documents.
    pub fn is_empty(&self) -> bool {
        self.inner.data.read_with(|data| data.is_empty())
    }

    /// Appends a document to the table.
    ///
    /// # Returns
    ///
    /// A handle to the stored document. The handle points into live storage;
    /// later updates through the table are visible through it.
    pub fn insert(&self, document: Document) -> DocumentHandle {
        let handle = document_handle(document);
        self.inner.data.write_with(|data| data.push(handle.clone()));
        log::debug!("Inserted document into table {}", self.inner.name);
        handle
    }

    /// Returns handles to all documents matching the query, in storage order.
    ///
    /// The query is normalized first, so dotted path keys match permissively
    /// while literal nesting matches strictly. An empty query matches every
    /// document. Reading never copies document contents.
    pub fn read(&self, query: &Document) -> Vec<DocumentHandle> {
        let query = normalize(query);
        self.inner
            .data
            .read_with(|data| select_matching(data, &query.canonical, query.mode))
    }

    /// Merges a patch into every document matching the query.
    ///
    /// Matching and merging are independent: the query and the patch are
    /// normalized separately, so a literal query can carry a path patch and
    /// the other way around. Affected documents are mutated in place through
    /// their handles and keep their storage positions.
    ///
    /// # Returns
    ///
    /// A [WriteResult] holding the updated handles in storage order.
    pub fn update(&self, query: &Document, patch: &Document) -> WriteResult {
        let query = normalize(query);
        let patch = normalize(patch);

        let affected = self.inner.data.read_with(|data| {
            let matched = select_matching(data, &query.canonical, query.mode);
            candidate_positions(data, &matched)
                .iter()
                .map(|&position| data[position].clone())
                .collect::<Vec<_>>()
        });

        for handle in &affected {
            handle.write_with(|document| merge_in_place(document, &patch.canonical, patch.mode));
        }

        log::debug!(
            "Updated {} documents in table {}",
            affected.len(),
            self.inner.name
        );
        WriteResult::new(affected)
    }

    /// Removes every document matching the query from the table.
    ///
    /// Matched documents are located by handle identity, so two structurally
    /// identical documents are distinct rows and only the matched instances
    /// leave the table. The remaining documents keep their relative order.
    ///
    /// # Returns
    ///
    /// A [WriteResult] holding the removed handles in their former storage
    /// order.
    pub fn delete(&self, query: &Document) -> WriteResult {
        let query = normalize(query);

        let removed = self.inner.data.write_with(|data| {
            let matched = select_matching(data, &query.canonical, query.mode);
            let positions = candidate_positions(data, &matched);
            let removed: Vec<DocumentHandle> = positions
                .iter()
                .map(|&position| data[position].clone())
                .collect();
            for &position in positions.iter().rev() {
                data.remove(position);
            }
            removed
        });

        log::debug!(
            "Deleted {} documents from table {}",
            removed.len(),
            self.inner.name
        );
        WriteResult::new(removed)
    }

    /// Returns handles to all stored documents, in storage order.
    pub fn handles(&self) -> Vec<DocumentHandle> {
        self.inner.data.read_with(|data| data.to_vec())
    }

    /// Returns point-in-time copies of all stored documents, in storage order.
    pub fn documents(&self) -> Vec<Document> {
        self.inner.data.read_with(|data| snapshots(data))
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table[{}, {} documents]", self.inner.name, self.len())
    }
}

/// Filters storage for handles whose documents satisfy the canonical query.
fn select_matching(
    data: &[DocumentHandle],
    query: &Document,
    mode: MatchMode,
) -> Vec<DocumentHandle> {
    data.iter()
        .filter(|handle| handle.read_with(|document| matches(document, query, mode)))
        .cloned()
        .collect()
}

/// Resolves matched handles back to their storage positions by identity.
fn candidate_positions(data: &[DocumentHandle], matched: &[DocumentHandle]) -> Vec<usize> {
    data.iter()
        .positions(|stored| {
            matched
                .iter()
                .any(|candidate| same_document(candidate, stored))
        })
        .collect()
}
