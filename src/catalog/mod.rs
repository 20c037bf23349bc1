//! Catálogo de cursos por periodo (year, term).
//!
//! Submódulos:
//! - `io`: descubrimiento y decodificación de los datasets JSON
//! - `snapshot`: `CatalogSnapshot` inmutable con sus índices
//! - `store`: `CatalogStore` con recarga atómica

pub mod io;
mod snapshot;
mod store;

pub use snapshot::{CatalogSnapshot, SnapshotKey, SnapshotSummary};
pub use store::{CatalogStore, load_snapshots};
