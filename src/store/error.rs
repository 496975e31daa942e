use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the read-only weapon store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened (missing file, permissions,
    /// corruption).
    #[error("cannot open weapon database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement preparation, parameter binding, or row stepping failed.
    #[error("weapon query failed: {source}")]
    Query {
        #[from]
        source: rusqlite::Error,
    },
}
