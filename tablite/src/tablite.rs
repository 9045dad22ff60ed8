use indexmap::IndexMap;

use crate::collection::{Document, DocumentHandle, Table, WriteResult};
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, TabliteError, TabliteResult};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// The main catalog instance for Tablite.
///
/// `Tablite` is the entry point for all store operations. It owns a set of
/// named [Table]s and a selection cursor naming the current default table.
/// Table operations can either name a table explicitly (`insert_into`,
/// `read_from`, ...) or fall back to the selected table (`insert`, `read`,
/// ...).
///
/// `Tablite` uses the PIMPL (Pointer to Implementation) design pattern
/// internally. All clones share the same catalog state through
/// `Arc<TabliteInner>`, so a `Tablite` handle is cheap to clone and safe to
/// share across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::doc;
/// use tablite::tablite::Tablite;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Tablite::new();
/// db.create_table("users")?;
/// db.use_table("users")?;
///
/// db.insert(doc!{ name: "Alice", status: { active: true } })?;
///
/// let matched = db.read(&doc!{ "status.active": true })?;
/// assert_eq!(matched.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Tablite {
    inner: Arc<TabliteInner>,
}

impl Tablite {
    /// Creates a new empty catalog with no tables and no selection.
    pub fn new() -> Self {
        Tablite {
            inner: Arc::new(TabliteInner::new()),
        }
    }

    /// Creates a new empty table under the given name.
    ///
    /// # Arguments
    ///
    /// * `name` - The table name
    ///
    /// # Returns
    ///
    /// The newly created [Table].
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableExists] error if a table with the same
    /// name already exists. The existing table is left untouched.
    pub fn create_table(&self, name: &str) -> TabliteResult<Table> {
        self.inner.create_table(name)
    }

    /// Creates a new table under the given name, seeded with documents.
    ///
    /// The seed documents become the initial storage sequence, in order.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableExists] error if a table with the same
    /// name already exists.
    pub fn create_table_with(&self, name: &str, documents: Vec<Document>) -> TabliteResult<Table> {
        self.inner.add_table(Table::with_documents(name, documents))
    }

    /// Removes the table with the given name from the catalog.
    ///
    /// Dropping does not touch the selection cursor: if the dropped table was
    /// selected, later unqualified operations fail with
    /// [ErrorKind::TableNotFound] until a new selection is made.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn drop_table(&self, name: &str) -> TabliteResult<()> {
        self.inner.drop_table(name)
    }

    /// Selects the table unqualified operations act on.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists;
    /// the previous selection is kept in that case.
    pub fn use_table(&self, name: &str) -> TabliteResult<()> {
        self.inner.use_table(name)
    }

    /// Returns the names of all tables, in creation order.
    pub fn list_tables(&self) -> Vec<String> {
        self.inner.list_tables()
    }

    /// Checks whether a table with the given name exists.
    pub fn has_table(&self, name: &str) -> bool {
        self.inner.has_table(name)
    }

    /// Returns the name of the currently selected table, if any.
    ///
    /// The name is reported even if the table has since been dropped.
    pub fn using(&self) -> Option<String> {
        self.inner.using()
    }

    /// Returns the table with the given name.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn table(&self, name: &str) -> TabliteResult<Table> {
        self.inner.table(name)
    }

    /// Inserts a document into the selected table.
    ///
    /// # Returns
    ///
    /// A handle to the stored document.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::NoTableSelected] error if no table is selected,
    /// or an [ErrorKind::TableNotFound] error if the selection is stale.
    pub fn insert(&self, document: Document) -> TabliteResult<DocumentHandle> {
        Ok(self.inner.selected_table()?.insert(document))
    }

    /// Reads all documents matching the query from the selected table.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::NoTableSelected] error if no table is selected,
    /// or an [ErrorKind::TableNotFound] error if the selection is stale.
    pub fn read(&self, query: &Document) -> TabliteResult<Vec<DocumentHandle>> {
        Ok(self.inner.selected_table()?.read(query))
    }

    /// Merges a patch into all matching documents in the selected table.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::NoTableSelected] error if no table is selected,
    /// or an [ErrorKind::TableNotFound] error if the selection is stale.
    pub fn update(&self, query: &Document, patch: &Document) -> TabliteResult<WriteResult> {
        Ok(self.inner.selected_table()?.update(query, patch))
    }

    /// Deletes all documents matching the query from the selected table.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::NoTableSelected] error if no table is selected,
    /// or an [ErrorKind::TableNotFound] error if the selection is stale.
    pub fn delete(&self, query: &Document) -> TabliteResult<WriteResult> {
        Ok(self.inner.selected_table()?.delete(query))
    }

    /// Inserts a document into the named table, ignoring the selection.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn insert_into(&self, name: &str, document: Document) -> TabliteResult<DocumentHandle> {
        Ok(self.inner.table(name)?.insert(document))
    }

    /// Reads matching documents from the named table, ignoring the selection.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn read_from(&self, name: &str, query: &Document) -> TabliteResult<Vec<DocumentHandle>> {
        Ok(self.inner.table(name)?.read(query))
    }

    /// Updates matching documents in the named table, ignoring the selection.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn update_in(
        &self,
        name: &str,
        query: &Document,
        patch: &Document,
    ) -> TabliteResult<WriteResult> {
        Ok(self.inner.table(name)?.update(query, patch))
    }

    /// Deletes matching documents from the named table, ignoring the selection.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::TableNotFound] error if no such table exists.
    pub fn delete_from(&self, name: &str, query: &Document) -> TabliteResult<WriteResult> {
        Ok(self.inner.table(name)?.delete(query))
    }

    /// Registers an externally built table, as the catalog importer does.
    pub(crate) fn add_table(&self, table: Table) -> TabliteResult<Table> {
        self.inner.add_table(table)
    }
}

impl Default for Tablite {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Tablite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tablite[tables: {:?}, using: {:?}]",
            self.list_tables(),
            self.using()
        )
    }
}

struct TabliteInner {
    tables: Atomic<IndexMap<String, Table>>,
    selection: Atomic<Option<String>>,
}

impl TabliteInner {
    fn new() -> Self {
        TabliteInner {
            tables: atomic(IndexMap::new()),
            selection: atomic(None),
        }
    }

    fn create_table(&self, name: &str) -> TabliteResult<Table> {
        self.add_table(Table::new(name))
    }

    fn add_table(&self, table: Table) -> TabliteResult<Table> {
        self.tables.write_with(|tables| {
            if tables.contains_key(table.name()) {
                log::error!("A table with name {} already exists", table.name());
                return Err(TabliteError::new(
                    "A table with same name already exists",
                    ErrorKind::TableExists,
                ));
            }
            log::debug!("Created table {}", table.name());
            tables.insert(table.name().to_string(), table.clone());
            Ok(table)
        })
    }

    fn drop_table(&self, name: &str) -> TabliteResult<()> {
        let removed = self.tables.write_with(|tables| tables.shift_remove(name));
        match removed {
            Some(_) => {
                // the selection cursor keeps its value; a stale name
                // resolves as unknown on the next unqualified operation
                log::debug!("Dropped table {}", name);
                Ok(())
            }
            None => {
                log::error!("Table {} does not exist", name);
                Err(TabliteError::new(
                    "Table does not exist",
                    ErrorKind::TableNotFound,
                ))
            }
        }
    }

    fn use_table(&self, name: &str) -> TabliteResult<()> {
        if !self.has_table(name) {
            log::error!("Table {} does not exist", name);
            return Err(TabliteError::new(
                "Table does not exist",
                ErrorKind::TableNotFound,
            ));
        }
        self.selection
            .write_with(|selection| *selection = Some(name.to_string()));
        log::debug!("Using table {}", name);
        Ok(())
    }

    fn list_tables(&self) -> Vec<String> {
        self.tables
            .read_with(|tables| tables.keys().cloned().collect())
    }

    fn has_table(&self, name: &str) -> bool {
        self.tables.read_with(|tables| tables.contains_key(name))
    }

    fn using(&self) -> Option<String> {
        self.selection.read_with(|selection| selection.clone())
    }

    fn table(&self, name: &str) -> TabliteResult<Table> {
        let found = self.tables.read_with(|tables| tables.get(name).cloned());
        match found {
            Some(table) => Ok(table),
            None => {
                log::error!("Table {} does not exist", name);
                Err(TabliteError::new(
                    "Table does not exist",
                    ErrorKind::TableNotFound,
                ))
            }
        }
    }

    fn selected_table(&self) -> TabliteResult<Table> {
        let selection = self.using();
        match selection {
            Some(name) => self.table(&name),
            None => {
                log::error!("No table selected, select one with use_table or name one explicitly");
                Err(TabliteError::new(
                    "No table selected",
                    ErrorKind::NoTableSelected,
                ))
            }
        }
    }
}
