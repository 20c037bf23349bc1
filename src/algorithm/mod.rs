// Módulo de alto nivel: búsqueda paginada y grafo de prerequisitos.
pub mod graph;
pub mod prereq;
pub mod text_search;
pub mod trie;

pub use graph::{DependencyGraph, build_dependency_graph, build_graph_output};
pub use prereq::{display_id, extract_course_codes, normalize_code};
pub use text_search::TextIndex;
pub use trie::PrefixIndex;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::models::CourseRecord;

/// Tipo de búsqueda: por prefijo de código (trie) o por palabras clave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Code,
    Text,
}

/// Devuelve la página `[start_from, start_from + items_per_page)` de las
/// coincidencias de `term`. No se guarda estado entre páginas: cada llamada
/// recalcula las coincidencias hasta `items_per_page + start_from`.
pub fn search_courses(
    snapshot: &CatalogSnapshot,
    term: &str,
    items_per_page: usize,
    start_from: usize,
    mode: SearchMode,
) -> Vec<Arc<CourseRecord>> {
    let term = term.trim();
    if term.is_empty() || items_per_page == 0 {
        return Vec::new();
    }

    let limit = items_per_page.saturating_add(start_from);
    let matches = match mode {
        SearchMode::Code => snapshot.prefix_index().query(term, limit),
        SearchMode::Text => snapshot.text_index().search(term, limit),
    };
    debug!(term, ?mode, limit, hits = matches.len(), "course search");

    matches.into_iter().skip(start_from).take(items_per_page).collect()
}
