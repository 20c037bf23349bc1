// Biblioteca raíz del crate `ufscheduler`.
// Búsqueda de cursos por prefijo (trie) y construcción del grafo de
// prerequisitos a partir del catálogo cargado en memoria.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::{AppState, run_server};

pub use algorithm::{SearchMode, build_dependency_graph, search_courses};
pub use catalog::{CatalogSnapshot, CatalogStore, SnapshotKey};
pub use config::ServerConfig;
pub use error::{CatalogError, RequestError};
pub use models::{CourseRecord, GraphOutput};
