use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::debug;

use crate::algorithm::search_courses;
use crate::api_json::{parse_search_request, resolve_snapshot};
use crate::server::AppState;

/// POST /api/get_courses
/// Devuelve la página pedida de cursos cuyo código empieza por `searchTerm`
/// (o que contienen las palabras clave, con `"mode": "text"`). Un periodo no
/// cargado o un término sin coincidencias devuelve `[]`.
pub async fn courses_search_handler(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let req = match parse_search_request(body.into_inner()) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "rejected search request");
            return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
        }
    };

    let snapshot = match resolve_snapshot(
        &state.store,
        state.config.default_snapshot.as_ref(),
        req.year.as_deref(),
        req.term.as_deref(),
    ) {
        Ok(Some(s)) => s,
        Ok(None) => return HttpResponse::Ok().json(json!([])),
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };

    let (items_per_page, start_from) = req.page(state.config.max_page_size);
    let results = search_courses(&snapshot, &req.search_term, items_per_page, start_from, req.mode);
    let body: Vec<&crate::models::CourseRecord> = results.iter().map(|r| r.as_ref()).collect();
    HttpResponse::Ok().json(body)
}
