//! Tipos de error del crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errores al cargar o recargar el catálogo.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// El nombre del fichero no sigue el patrón `..._{year}_{term}_final.json`.
    #[error("cannot derive year/term from file name '{0}'")]
    FileName(String),

    #[error("no course datasets (*_final.json) found in '{0}'")]
    NoDatasets(PathBuf),

    #[error("a catalog reload is already in progress")]
    ReloadInProgress,

    #[error("catalog reload lock poisoned")]
    LockPoisoned,
}

/// Errores de validación de las peticiones HTTP. Siempre se traducen a 400.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("missing 'year' or 'term' in request body and no default snapshot configured")]
    NoSnapshotSelected,
}
