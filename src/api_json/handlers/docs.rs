use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api_json::{DEFAULT_ITEMS_PER_PAGE, GraphRequest, SearchRequest};
use crate::algorithm::SearchMode;
use crate::server::AppState;

/// GET /help
/// Ejemplos de cuerpos para los endpoints POST y periodos disponibles.
pub async fn help_handler(state: web::Data<AppState>) -> impl Responder {
    let search_example = SearchRequest {
        search_term: "COP 35".to_string(),
        items_per_page: DEFAULT_ITEMS_PER_PAGE,
        start_from: 0,
        year: Some("25".to_string()),
        term: Some("fall".to_string()),
        mode: SearchMode::Code,
    };
    let graph_example = GraphRequest {
        selected_major: Some("Computer & Information Science & Engineering".to_string()),
        selected_courses: Some(vec!["COP3503C".to_string(), "COT3100".to_string()]),
        year: Some("25".to_string()),
        term: Some("fall".to_string()),
    };

    let periods: Vec<String> = state
        .store
        .summaries()
        .into_iter()
        .map(|s| format!("{}/{}", s.year, s.term))
        .collect();

    HttpResponse::Ok().json(json!({
        "description": "Búsqueda de cursos por prefijo de código y grafo de prerequisitos por carrera.",
        "search": {"route": "POST /api/get_courses", "example": search_example,
                   "note": "mode = \"code\" (prefijo, por defecto) o \"text\" (palabras clave)"},
        "graph": {"route": "POST /generate_a_list", "example": graph_example,
                  "note": "selectedCourses es obligatorio; sin selectedMajor sólo se devuelven los cursos aprobados"},
        "snapshots": periods,
        "max_page_size": state.config.max_page_size
    }))
}
