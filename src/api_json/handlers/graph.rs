use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::debug;

use crate::algorithm::build_dependency_graph;
use crate::api_json::{parse_graph_request, resolve_snapshot};
use crate::catalog::{CatalogSnapshot, SnapshotKey};
use crate::models::GraphOutput;
use crate::server::AppState;

/// POST /generate_a_list (alias POST /api/graph)
/// Construye el grafo de prerequisitos de la carrera elegida marcando los
/// cursos ya aprobados. Respuesta: `{"nodes": [...], "edges": [...]}`.
pub async fn graph_handler(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let req = match parse_graph_request(body.into_inner()) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "rejected graph request");
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
        // periodo no cargado: se comporta como un catálogo vacío
        Ok(None) => std::sync::Arc::new(CatalogSnapshot::build(SnapshotKey::new("", ""), Vec::new())),
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };

    let selector = req.selected_major.as_deref().unwrap_or("");
    let taken = req.selected_courses.unwrap_or_default();
    let graph = build_dependency_graph(&snapshot, selector, taken.as_slice(), &state.config.label_separator);
    let out: GraphOutput = graph.to_output();
    HttpResponse::Ok().json(out)
}
