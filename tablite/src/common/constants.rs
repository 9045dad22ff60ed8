// query constants
pub const PATH_SEPARATOR: &str = ".";

// interchange constants
pub const CATALOG_TYPE_FIELD: &str = "type";
pub const CATALOG_TYPE_BASIC: &str = "basic";
pub const CATALOG_TABLES_FIELD: &str = "tables";
pub const TABLE_NAME_FIELD: &str = "name";
pub const TABLE_DATA_FIELD: &str = "data";
pub const JSON_EXTENSION: &str = ".json";

pub const TABLITE_VERSION: &str = env!("CARGO_PKG_VERSION");
