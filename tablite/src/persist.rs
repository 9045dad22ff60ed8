//! Catalog import and export through a JSON interchange format.
//!
//! A catalog serializes to a single JSON object:
//!
//! ```json
//! {
//!   "type": "basic",
//!   "tables": [
//!     { "name": "records", "data": [ { "key": "A" } ] }
//!   ]
//! }
//! ```
//!
//! The `type` tag guards against feeding arbitrary JSON into the importer.
//! Table order and document order both survive a round trip. The selection
//! cursor is deliberately not part of the format: an imported catalog starts
//! with no table selected.

use crate::collection::{Document, Table};
use crate::common::{
    Value, CATALOG_TABLES_FIELD, CATALOG_TYPE_BASIC, CATALOG_TYPE_FIELD, JSON_EXTENSION,
    TABLE_DATA_FIELD, TABLE_NAME_FIELD,
};
use crate::errors::{ErrorKind, TabliteError, TabliteResult};
use crate::tablite::Tablite;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the whole catalog to a JSON file in the given directory.
///
/// The file is named `<name>.json` unless the name already carries the
/// extension. An existing file is overwritten.
///
/// # Arguments
///
/// * `db` - The catalog to export
/// * `name` - The file name, with or without the `.json` extension
/// * `dir` - The directory to write into; must already exist
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an [ErrorKind::FileNotFound] error when the directory does not
/// exist, or an [ErrorKind::IOError] error when the file cannot be written.
pub fn export_catalog(db: &Tablite, name: &str, dir: impl AsRef<Path>) -> TabliteResult<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        log::error!("Path not found: {}", dir.display());
        return Err(TabliteError::new(
            &format!("Path not found: {}", dir.display()),
            ErrorKind::FileNotFound,
        ));
    }

    let path = resolve_json_path(dir, name);
    let export = catalog_to_document(db)?;
    let text = serde_json::to_string_pretty(&export)?;
    fs::write(&path, text)?;

    log::debug!(
        "Exported catalog with {} tables to {}",
        db.list_tables().len(),
        path.display()
    );
    Ok(path)
}

/// Reads a catalog back from a JSON file in the given directory.
///
/// The file is resolved the same way [export_catalog] names it. The imported
/// catalog carries every table with its documents in order, and starts with
/// no table selected.
///
/// # Errors
///
/// Returns an [ErrorKind::FileNotFound] error when the file does not exist,
/// an [ErrorKind::EncodingError] error when the file is not valid interchange
/// JSON, or an [ErrorKind::InvalidDataType] error when a table entry carries
/// data that is not an array of documents.
pub fn import_catalog(name: &str, dir: impl AsRef<Path>) -> TabliteResult<Tablite> {
    let path = resolve_json_path(dir.as_ref(), name);
    if !path.exists() {
        log::error!("JSON file does not exist: {}", path.display());
        return Err(TabliteError::new(
            &format!("JSON file does not exist: {}", path.display()),
            ErrorKind::FileNotFound,
        ));
    }

    let text = fs::read_to_string(&path)?;
    let root: Document = serde_json::from_str(&text)?;
    let db = catalog_from_document(&root)?;

    log::debug!(
        "Imported catalog with {} tables from {}",
        db.list_tables().len(),
        path.display()
    );
    Ok(db)
}

/// Appends the `.json` extension unless the name already mentions it.
fn resolve_json_path(dir: &Path, name: &str) -> PathBuf {
    if name.contains(JSON_EXTENSION) {
        dir.join(name)
    } else {
        dir.join(format!("{}{}", name, JSON_EXTENSION))
    }
}

fn catalog_to_document(db: &Tablite) -> TabliteResult<Document> {
    let mut tables = Vec::new();
    for name in db.list_tables() {
        let table = db.table(&name)?;
        tables.push(Value::Document(table_to_document(&table)));
    }

    let mut root = Document::new();
    root.set(
        CATALOG_TYPE_FIELD.to_string(),
        Value::String(CATALOG_TYPE_BASIC.to_string()),
    );
    root.set(CATALOG_TABLES_FIELD.to_string(), Value::Array(tables));
    Ok(root)
}

fn table_to_document(table: &Table) -> Document {
    let data = table
        .documents()
        .into_iter()
        .map(Value::Document)
        .collect();

    let mut entry = Document::new();
    entry.set(
        TABLE_NAME_FIELD.to_string(),
        Value::String(table.name().to_string()),
    );
    entry.set(TABLE_DATA_FIELD.to_string(), Value::Array(data));
    entry
}

fn catalog_from_document(root: &Document) -> TabliteResult<Tablite> {
    let type_tag = root.get(CATALOG_TYPE_FIELD).and_then(Value::as_string);
    if type_tag.map(String::as_str) != Some(CATALOG_TYPE_BASIC) {
        log::error!(
            "Unsupported catalog type {:?} in interchange file",
            type_tag
        );
        return Err(TabliteError::new(
            "Unsupported catalog type",
            ErrorKind::EncodingError,
        ));
    }

    let entries = match root.get(CATALOG_TABLES_FIELD) {
        Some(Value::Array(entries)) => entries,
        _ => {
            log::error!("Malformed interchange file: tables is not an array");
            return Err(TabliteError::new(
                "Malformed interchange file: tables must be an array",
                ErrorKind::EncodingError,
            ));
        }
    };

    let db = Tablite::new();
    for entry in entries {
        let table = table_from_value(entry)?;
        db.add_table(table)?;
    }
    Ok(db)
}

fn table_from_value(entry: &Value) -> TabliteResult<Table> {
    let entry = match entry.as_document() {
        Some(entry) => entry,
        None => {
            log::error!("Malformed interchange file: table entry is not a document");
            return Err(TabliteError::new(
                "Malformed interchange file: table entry must be a document",
                ErrorKind::EncodingError,
            ));
        }
    };

    let name = match entry.get(TABLE_NAME_FIELD).and_then(Value::as_string) {
        Some(name) => name,
        None => {
            log::error!("Malformed interchange file: table entry has no name");
            return Err(TabliteError::new(
                "Malformed interchange file: table entry must carry a name",
                ErrorKind::EncodingError,
            ));
        }
    };

    // a missing data field imports as an empty table
    let data = entry
        .get(TABLE_DATA_FIELD)
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    Table::from_seed(name, data)
}
