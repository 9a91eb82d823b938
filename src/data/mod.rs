pub mod registry;
pub mod table;
pub mod workbook;

pub use registry::DataRegistry;
pub use table::{DataTable, RawSheet, RawValue, Record, SchemaError, REQUIRED_COLUMNS};
pub use workbook::{load_table, WorkbookError, DATA_SHEET_NAME, DEFAULT_WORKBOOK_PATH};
