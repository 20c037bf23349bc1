// --- UF Scheduler: búsqueda de cursos y grafo de prerequisitos ---

use tracing::{error, info};
use ufscheduler::observability::init_logging;
use ufscheduler::{AppState, CatalogStore, ServerConfig, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    init_logging(config.log_format);
    info!(dir = %config.courses_dir.display(), "loading course catalog");

    // Sin catálogo completo no se sirve nada.
    let store = match CatalogStore::open(&config.courses_dir) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to load course catalog");
            return Err(std::io::Error::other(e));
        }
    };

    run_server(AppState::new(store, config)).await
}
