//! Startup-loaded data cache (DataRegistry) for the server and CLI.
//! Load the workbook once, pass via Arc to handlers; a re-upload builds a
//! fresh registry that replaces the old one wholesale.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::table::DataTable;
use crate::data::workbook::{load_table, WorkbookError, DEFAULT_WORKBOOK_PATH};

/// Read-only registry holding the validated capacity table for one session.
#[derive(Debug)]
pub struct DataRegistry {
    table: DataTable,
    source_path: PathBuf,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl DataRegistry {
    /// Load the workbook from CITYPLAN_DATA (or the default path) and build
    /// the table. Returns an Arc so it can be shared across handlers.
    pub fn load() -> Result<Arc<DataRegistry>, WorkbookError> {
        let path =
            std::env::var("CITYPLAN_DATA").unwrap_or_else(|_| DEFAULT_WORKBOOK_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Arc<DataRegistry>, WorkbookError> {
        let table = load_table(path)?;
        Ok(Arc::new(DataRegistry {
            table,
            source_path: path.to_path_buf(),
            loaded_at: chrono::Utc::now(),
        }))
    }

    /// Registry over an already-built table (tests, in-memory fixtures).
    pub fn from_table(table: DataTable) -> Arc<DataRegistry> {
        Arc::new(DataRegistry {
            table,
            source_path: PathBuf::from("<memory>"),
            loaded_at: chrono::Utc::now(),
        })
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn loaded_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.loaded_at
    }
}
