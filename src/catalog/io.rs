use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::catalog::SnapshotKey;
use crate::error::{CatalogError, Result};
use crate::models::CourseRecord;

/// Sufijo de los datasets ya limpios que produce el scraper.
pub const DATASET_SUFFIX: &str = "_final.json";

/// Extrae (year, term) del nombre de fichero. Se toman el antepenúltimo y
/// el penúltimo segmento separados por `_`:
/// `UF_Feb-21-2025_25_fall_final.json` -> ("25", "fall").
pub fn parse_year_term(file_name: &str) -> Result<SnapshotKey> {
    let parts: Vec<&str> = file_name.split('_').collect();
    if parts.len() < 3 {
        return Err(CatalogError::FileName(file_name.to_string()));
    }
    let year = parts[parts.len() - 3].trim();
    let term = parts[parts.len() - 2].trim();
    if year.is_empty() || term.is_empty() {
        return Err(CatalogError::FileName(file_name.to_string()));
    }
    Ok(SnapshotKey::new(year, term))
}

/// Lista los datasets `*_final.json` del directorio, ordenados por nombre.
/// Ficheros ocultos o temporales se ignoran.
pub fn list_dataset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in read.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        let Some(name) = p.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('~') {
            continue;
        }
        if name.ends_with(DATASET_SUFFIX) {
            files.push(p);
        }
    }
    files.sort();
    Ok(files)
}

// El scraper guarda páginas `{"COURSES": [...], ...}`; los datasets limpios
// son directamente la lista de cursos. Se aceptan ambos.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetItem {
    Page {
        #[serde(rename = "COURSES")]
        courses: Vec<CourseRecord>,
    },
    Course(CourseRecord),
}

/// Decodifica un dataset en memoria, aplanando páginas si las hay.
pub fn parse_dataset(bytes: &[u8]) -> std::result::Result<Vec<CourseRecord>, serde_json::Error> {
    let items: Vec<DatasetItem> = serde_json::from_slice(bytes)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            DatasetItem::Page { courses } => out.extend(courses),
            DatasetItem::Course(c) => out.push(c),
        }
    }
    Ok(out)
}

/// Lee y decodifica un fichero de dataset. Cualquier fallo es un error: no se
/// sirve nunca un catálogo parcial.
pub fn read_dataset(path: &Path) -> Result<Vec<CourseRecord>> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let courses = parse_dataset(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if courses.is_empty() {
        warn!(path = %path.display(), "dataset contains no courses");
    }
    Ok(courses)
}
