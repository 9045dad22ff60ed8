use crate::collection::DocumentHandle;

/// The result of an update or delete operation.
///
/// `WriteResult` carries the handles of the affected documents in storage
/// order. For an update the handles point into live storage, so the merged
/// contents are observable through them. For a delete they are the only
/// remaining references to the removed documents.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::doc;
///
/// let result = table.update(&doc!{ key: "A" }, &doc!{ value: "X" });
/// assert_eq!(result.count(), 1);
/// for handle in result {
///     println!("Updated document: {}", tablite::collection::snapshot(&handle));
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct WriteResult {
    documents: Vec<DocumentHandle>,
}

impl WriteResult {
    /// Creates a new `WriteResult` with the specified affected documents.
    ///
    /// # Arguments
    ///
    /// * `documents` - Handles of the documents affected by the write operation
    pub fn new(documents: Vec<DocumentHandle>) -> Self {
        Self { documents }
    }

    /// Gets the handles of the documents affected by the write operation.
    ///
    /// The slice preserves the order the documents held in table storage.
    pub fn documents(&self) -> &[DocumentHandle] {
        &self.documents
    }

    /// Returns the number of affected documents.
    pub fn count(&self) -> usize {
        self.documents.len()
    }

    /// Checks whether the operation affected any document.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl IntoIterator for WriteResult {
    type Item = DocumentHandle;
    type IntoIter = std::vec::IntoIter<DocumentHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{document_handle, same_document, snapshot};
    use crate::doc;

    #[test]
    fn test_write_result_new() {
        let handles = vec![
            document_handle(doc! { key: "A" }),
            document_handle(doc! { key: "B" }),
        ];
        let write_result = WriteResult::new(handles.clone());

        assert_eq!(write_result.count(), 2);
        assert!(!write_result.is_empty());
        assert!(same_document(&write_result.documents()[0], &handles[0]));
        assert!(same_document(&write_result.documents()[1], &handles[1]));
    }

    #[test]
    fn test_write_result_empty() {
        let write_result = WriteResult::default();
        assert_eq!(write_result.count(), 0);
        assert!(write_result.is_empty());
    }

    #[test]
    fn test_write_result_iterates_in_storage_order() {
        let first = document_handle(doc! { seq: 1 });
        let second = document_handle(doc! { seq: 2 });
        let write_result = WriteResult::new(vec![first, second]);

        let sequence: Vec<_> = write_result
            .into_iter()
            .map(|handle| snapshot(&handle))
            .collect();
        assert_eq!(sequence, vec![doc! { seq: 1 }, doc! { seq: 2 }]);
    }
}
