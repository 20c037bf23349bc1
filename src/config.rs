//! Configuración del servidor leída desde variables de entorno (y `.env`).

use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::catalog::SnapshotKey;
use crate::observability::LogFormat;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_COURSES_DIR: &str = "courses";
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_LABEL_SEPARATOR: &str = "\n";

const DEFAULT_ORIGINS: &[&str] = &[
    "http://ufscheduler.com",
    "https://ufscheduler.com",
    "http://www.ufscheduler.com",
    "https://www.ufscheduler.com",
    "http://localhost:3000",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub courses_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    /// Snapshot usado cuando la petición no trae year/term.
    pub default_snapshot: Option<SnapshotKey>,
    pub max_page_size: usize,
    pub workers: usize,
    pub label_separator: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            courses_dir: PathBuf::from(DEFAULT_COURSES_DIR),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
            default_snapshot: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            workers: num_cpus::get(),
            label_separator: DEFAULT_LABEL_SEPARATOR.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Lee `UFS_*` del entorno tras cargar `.env` si existe.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: `lookup` resuelve una variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = ServerConfig::default();
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(b) = get("UFS_BIND") {
            cfg.bind = b.trim().to_string();
        }
        if let Some(d) = get("UFS_COURSES_DIR") {
            cfg.courses_dir = PathBuf::from(d.trim());
        }
        if let Some(o) = get("UFS_ALLOWED_ORIGINS") {
            cfg.allowed_origins = o
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let (Some(y), Some(t)) = (get("UFS_DEFAULT_YEAR"), get("UFS_DEFAULT_TERM")) {
            cfg.default_snapshot = Some(SnapshotKey::new(y.trim(), t.trim()));
        }
        if let Some(v) = get("UFS_MAX_PAGE_SIZE") {
            cfg.max_page_size = parse_or("UFS_MAX_PAGE_SIZE", &v, DEFAULT_MAX_PAGE_SIZE);
        }
        if let Some(v) = get("UFS_WORKERS") {
            cfg.workers = parse_or("UFS_WORKERS", &v, cfg.workers).max(1);
        }
        // El separador puede ser un espacio, así que no se filtra por vacío.
        if let Some(sep) = lookup("UFS_GRAPH_LABEL_SEPARATOR") {
            cfg.label_separator = sep.replace("\\n", "\n");
        }
        if let Some(f) = get("UFS_LOG_FORMAT") {
            cfg.log_format = LogFormat::parse(&f);
        }
        cfg
    }
}

fn parse_or(key: &str, raw: &str, default: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value = raw, default, "invalid numeric config value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = ServerConfig::from_lookup(|_| None);
        assert_eq!(cfg.bind, DEFAULT_BIND);
        assert_eq!(cfg.courses_dir, PathBuf::from("courses"));
        assert_eq!(cfg.max_page_size, 100);
        assert_eq!(cfg.label_separator, "\n");
        assert!(cfg.default_snapshot.is_none());
        assert!(cfg.allowed_origins.contains(&"http://localhost:3000".to_string()));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("UFS_BIND", "0.0.0.0:9000"),
            ("UFS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("UFS_DEFAULT_YEAR", "25"),
            ("UFS_DEFAULT_TERM", "fall"),
            ("UFS_MAX_PAGE_SIZE", "abc"),
            ("UFS_WORKERS", "0"),
            ("UFS_GRAPH_LABEL_SEPARATOR", " "),
            ("UFS_LOG_FORMAT", "JSON"),
        ]));
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(cfg.default_snapshot, Some(SnapshotKey::new("25", "fall")));
        assert_eq!(cfg.max_page_size, DEFAULT_MAX_PAGE_SIZE);
        assert_eq!(cfg.workers, 1);
        assert_eq!(cfg.label_separator, " ");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn test_default_snapshot_needs_year_and_term() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[("UFS_DEFAULT_YEAR", "25")]));
        assert!(cfg.default_snapshot.is_none());
    }
}
