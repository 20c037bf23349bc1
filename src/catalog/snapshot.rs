use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::algorithm::text_search::TextIndex;
use crate::algorithm::trie::PrefixIndex;
use crate::catalog::io::{parse_year_term, read_dataset};
use crate::error::{CatalogError, Result};
use crate::models::CourseRecord;

/// Periodo de oferta: año ("25") y término ("fall", "spring", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub year: String,
    pub term: String,
}

impl SnapshotKey {
    /// El término se guarda en minúsculas: "Fall" y "fall" son el mismo periodo.
    pub fn new(year: impl AsRef<str>, term: impl AsRef<str>) -> Self {
        SnapshotKey {
            year: year.as_ref().trim().to_string(),
            term: term.as_ref().trim().to_lowercase(),
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.term)
    }
}

/// Catálogo inmutable de un periodo, con sus índices derivados.
#[derive(Debug)]
pub struct CatalogSnapshot {
    key: SnapshotKey,
    records: Vec<Arc<CourseRecord>>,
    by_code: HashMap<String, usize>,
    dept_by_code: HashMap<String, String>,
    prefix_index: PrefixIndex,
    text_index: TextIndex,
    loaded_at: DateTime<Utc>,
    source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub year: String,
    pub term: String,
    pub courses: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: Option<String>,
}

impl CatalogSnapshot {
    /// Construye el snapshot y sus índices a partir de los cursos, en orden.
    pub fn build(key: SnapshotKey, courses: Vec<CourseRecord>) -> Self {
        let records: Vec<Arc<CourseRecord>> = courses.into_iter().map(Arc::new).collect();

        let mut by_code: HashMap<String, usize> = HashMap::with_capacity(records.len());
        let mut dept_by_code: HashMap<String, String> = HashMap::with_capacity(records.len());
        for (pos, r) in records.iter().enumerate() {
            if by_code.contains_key(&r.code) {
                warn!(snapshot = %key, code = %r.code, "duplicate course code, keeping first record");
                continue;
            }
            by_code.insert(r.code.clone(), pos);
            dept_by_code.insert(r.code.clone(), r.dept_name().to_string());
        }

        let prefix_index = PrefixIndex::build(records.iter().cloned());
        let text_index = TextIndex::build(records.iter().cloned());

        CatalogSnapshot {
            key,
            records,
            by_code,
            dept_by_code,
            prefix_index,
            text_index,
            loaded_at: Utc::now(),
            source: None,
        }
    }

    /// Carga un dataset desde disco; year/term salen del nombre del fichero.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::FileName(path.display().to_string()))?;
        let key = parse_year_term(file_name)?;
        let courses = read_dataset(path)?;
        let mut snapshot = CatalogSnapshot::build(key, courses);
        snapshot.source = Some(path.to_path_buf());
        info!(
            snapshot = %snapshot.key,
            courses = snapshot.len(),
            file = %path.display(),
            "catalog snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn key(&self) -> &SnapshotKey {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Todos los cursos en el orden del dataset.
    pub fn records(&self) -> &[Arc<CourseRecord>] {
        &self.records
    }

    /// Un registro por código (el primero del dataset), en orden del dataset.
    pub fn unique_records(&self) -> impl Iterator<Item = &Arc<CourseRecord>> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(pos, r)| self.by_code.get(&r.code) == Some(pos))
            .map(|(_, r)| r)
    }

    pub fn get(&self, code: &str) -> Option<&Arc<CourseRecord>> {
        self.by_code.get(code).map(|&pos| &self.records[pos])
    }

    pub fn dept_name(&self, code: &str) -> Option<&str> {
        self.dept_by_code.get(code).map(|s| s.as_str())
    }

    pub fn prefix_index(&self) -> &PrefixIndex {
        &self.prefix_index
    }

    pub fn text_index(&self) -> &TextIndex {
        &self.text_index
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            year: self.key.year.clone(),
            term: self.key.term.clone(),
            courses: self.len(),
            loaded_at: self.loaded_at,
            source: self.source.as_ref().map(|p| p.display().to_string()),
        }
    }
}
