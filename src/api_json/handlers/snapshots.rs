use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::error;

use crate::error::CatalogError;
use crate::server::AppState;

/// GET /api/snapshots
/// Lista los periodos cargados con su número de cursos.
pub async fn snapshots_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({"snapshots": state.store.summaries()}))
}

/// POST /api/reload
/// Relee los datasets del disco y sustituye el catálogo completo. Si falla,
/// el catálogo anterior sigue activo.
pub async fn reload_handler(state: web::Data<AppState>) -> impl Responder {
    let store = state.store.clone();
    match web::block(move || store.reload()).await {
        Ok(Ok(count)) => HttpResponse::Ok().json(json!({"status": "ok", "snapshots": count})),
        Ok(Err(CatalogError::ReloadInProgress)) => {
            HttpResponse::Conflict().json(json!({"error": CatalogError::ReloadInProgress.to_string()}))
        }
        Ok(Err(e)) => {
            error!(error = %e, "catalog reload failed");
            HttpResponse::InternalServerError().json(json!({"error": format!("reload failed: {}", e)}))
        }
        Err(e) => {
            error!(error = %e, "catalog reload task failed");
            HttpResponse::InternalServerError().json(json!({"error": format!("reload failed: {}", e)}))
        }
    }
}
