use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::api_json::handlers::{
    courses_search_handler, graph_handler, help_handler, reload_handler, snapshots_handler,
};
use crate::catalog::CatalogStore;
use crate::config::ServerConfig;

/// Estado compartido por todos los workers. El catálogo sólo se lee; las
/// recargas publican un mapa nuevo de forma atómica dentro del store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: CatalogStore, config: ServerConfig) -> Self {
        AppState { store: Arc::new(store), config: Arc::new(config) }
    }
}

/// Registra las rutas de la API. Se usa tanto en el servidor como en los tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/get_courses", web::post().to(courses_search_handler))
        .route("/generate_a_list", web::post().to(graph_handler))
        .route("/api/graph", web::post().to(graph_handler))
        .route("/api/snapshots", web::get().to(snapshots_handler))
        .route("/api/reload", web::post().to(reload_handler))
        .route("/help", web::get().to(help_handler));
}

fn cors_for(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, o| cors.allowed_origin(o))
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600)
}

pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let bind = state.config.bind.clone();
    let workers = state.config.workers;
    info!(%bind, workers, snapshots = state.store.len(), "starting HTTP server");

    let data = web::Data::new(state);
    HttpServer::new(move || {
        let cors = cors_for(&data.config.allowed_origins);
        App::new()
            .wrap(cors)
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind(bind)?
    .run()
    .await
}
