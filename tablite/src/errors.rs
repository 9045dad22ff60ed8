use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Tablite operations.
///
/// This enum represents all possible error types that can occur while working
/// with a Tablite catalog. Each error kind describes a specific category of
/// failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::errors::{TabliteError, ErrorKind, TabliteResult};
///
/// fn example() -> TabliteResult<()> {
///     Err(TabliteError::new("Table does not exist", ErrorKind::TableNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Catalog Errors - raised by table lifecycle operations
    /// A table with the same name already exists
    TableExists,
    /// Table does not exist
    TableNotFound,
    /// A table-level operation was issued with no table selected
    NoTableSelected,

    // Validation Errors - raised when data does not fit the document model
    /// Invalid data type for operation
    InvalidDataType,
    /// The operation is not valid in the current context
    InvalidOperation,

    // IO Errors - raised by catalog import/export
    /// Generic IO error
    IOError,
    /// The file or directory was not found
    FileNotFound,
    /// Error encoding or decoding interchange data
    EncodingError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TableExists => write!(f, "Table already exists"),
            ErrorKind::TableNotFound => write!(f, "Table not found"),
            ErrorKind::NoTableSelected => write!(f, "No table selected"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Tablite error type.
///
/// `TabliteError` encapsulates error information including the error message,
/// kind, and optional cause. It supports error chaining and backtraces for
/// debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::errors::{TabliteError, ErrorKind};
///
/// // Create a simple error
/// let err = TabliteError::new("Table does not exist", ErrorKind::TableNotFound);
///
/// // Create an error with a cause
/// let cause = TabliteError::new("IO failed", ErrorKind::IOError);
/// let err = TabliteError::new_with_cause("Catalog export failed", ErrorKind::IOError, cause);
/// ```
///
/// # Type alias
///
/// The `TabliteResult<T>` type alias is equivalent to `Result<T, TabliteError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct TabliteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<TabliteError>>,
    backtrace: Atomic<Backtrace>,
}

impl TabliteError {
    /// Creates a new `TabliteError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `TabliteError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        TabliteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `TabliteError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_type` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `TabliteError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: TabliteError) -> Self {
        TabliteError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<TabliteError>> {
        self.cause.as_ref()
    }
}

impl Display for TabliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for TabliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for TabliteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Tablite operations.
///
/// `TabliteResult<T>` is shorthand for `Result<T, TabliteError>`.
/// All fallible Tablite operations return this type.
///
/// # Examples
///
/// ```rust,ignore
/// use tablite::errors::TabliteResult;
///
/// fn find_table(name: &str) -> TabliteResult<String> {
///     // Return success
///     Ok(name.to_string())
///     // Or return error
///     // Err(TabliteError::new("Table does not exist", ErrorKind::TableNotFound))
/// }
/// ```
pub type TabliteResult<T> = Result<T, TabliteError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for TabliteError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            _ => ErrorKind::IOError,
        };
        TabliteError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for TabliteError {
    fn from(err: serde_json::Error) -> Self {
        TabliteError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<String> for TabliteError {
    fn from(msg: String) -> Self {
        TabliteError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for TabliteError {
    fn from(msg: &str) -> Self {
        TabliteError::new(msg, ErrorKind::InternalError)
    }
}
