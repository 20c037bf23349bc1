pub mod handlers;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::algorithm::SearchMode;
use crate::catalog::{CatalogSnapshot, CatalogStore, SnapshotKey};
use crate::error::RequestError;

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 20;

fn default_items_per_page() -> i64 {
    DEFAULT_ITEMS_PER_PAGE
}

// El frontend manda el año a veces como texto ("25") y a veces como número (25).
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Cuerpo de `POST /api/get_courses`
///
/// ```json
/// { "searchTerm": "COP 35", "itemsPerPage": 20, "startFrom": 0,
///   "year": "25", "term": "fall", "mode": "code" }
/// ```
///
/// - `searchTerm`: prefijo del código (modo `code`) o palabras clave (modo `text`)
/// - `itemsPerPage` / `startFrom`: paginación; valores negativos cuentan como 0
/// - `year` / `term`: periodo; si faltan se usa el snapshot por defecto
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: i64,
    #[serde(default)]
    pub start_from: i64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub term: Option<String>,
    #[serde(default)]
    pub mode: SearchMode,
}

impl SearchRequest {
    /// (items_per_page, start_from) ya saneados; la página se limita a `max_page_size`.
    pub fn page(&self, max_page_size: usize) -> (usize, usize) {
        let items = usize::try_from(self.items_per_page.max(0)).unwrap_or(0).min(max_page_size);
        let start = usize::try_from(self.start_from.max(0)).unwrap_or(0);
        (items, start)
    }
}

/// Cuerpo de `POST /generate_a_list`
///
/// ```json
/// { "selectedMajor": "Computer & Information Science & Engineering",
///   "selectedCourses": ["COP3503C", "COT3100"], "year": "25", "term": "fall" }
/// ```
///
/// `selectedCourses` es obligatorio. Sin `selectedMajor` el grafo contiene
/// sólo los cursos aprobados.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    #[serde(default, alias = "selectedMajorServ")]
    pub selected_major: Option<String>,
    #[serde(default, alias = "selectedCoursesServ")]
    pub selected_courses: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub term: Option<String>,
}

pub fn parse_search_request(body: Value) -> Result<SearchRequest, RequestError> {
    serde_json::from_value::<SearchRequest>(body).map_err(|e| RequestError::InvalidBody(e.to_string()))
}

pub fn parse_graph_request(body: Value) -> Result<GraphRequest, RequestError> {
    let req = serde_json::from_value::<GraphRequest>(body)
        .map_err(|e| RequestError::InvalidBody(e.to_string()))?;
    if req.selected_courses.is_none() {
        return Err(RequestError::MissingField("selectedCourses"));
    }
    Ok(req)
}

/// Resuelve el snapshot pedido.
///
/// - year y term presentes: ese periodo (`Ok(None)` si no está cargado)
/// - sólo uno de los dos: `MissingField` con el que falta
/// - ninguno: el periodo por defecto configurado, o el único snapshot
///   cargado si sólo hay uno; si no, `NoSnapshotSelected`
pub fn resolve_snapshot(
    store: &CatalogStore,
    default_key: Option<&SnapshotKey>,
    year: Option<&str>,
    term: Option<&str>,
) -> Result<Option<Arc<CatalogSnapshot>>, RequestError> {
    match (year, term) {
        (Some(y), Some(t)) => return Ok(store.get(&SnapshotKey::new(y, t))),
        (Some(_), None) => return Err(RequestError::MissingField("term")),
        (None, Some(_)) => return Err(RequestError::MissingField("year")),
        (None, None) => {}
    }
    if let Some(key) = default_key {
        return Ok(store.get(key));
    }
    match store.only() {
        Some(s) => Ok(Some(s)),
        None => Err(RequestError::NoSnapshotSelected),
    }
}
