//! Almacén de snapshots del catálogo con recarga atómica.
//!
//! Los lectores obtienen el mapa actual sin bloqueo (`ArcSwap`). Una recarga
//! construye un mapa completo aparte y lo publica de una sola vez; mientras
//! tanto los lectores siguen viendo el anterior.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, TryLockError};

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::catalog::io::list_dataset_files;
use crate::catalog::snapshot::{CatalogSnapshot, SnapshotKey, SnapshotSummary};
use crate::error::{CatalogError, Result};

type SnapshotMap = HashMap<SnapshotKey, Arc<CatalogSnapshot>>;

#[derive(Debug)]
pub struct CatalogStore {
    dir: Option<PathBuf>,
    snapshots: ArcSwap<SnapshotMap>,
    reload_lock: Mutex<()>,
}

/// Carga todos los datasets del directorio. Falla si alguno no se puede leer
/// o si no hay ninguno.
pub fn load_snapshots(dir: &Path) -> Result<SnapshotMap> {
    let files = list_dataset_files(dir)?;
    if files.is_empty() {
        return Err(CatalogError::NoDatasets(dir.to_path_buf()));
    }

    let mut map: SnapshotMap = HashMap::with_capacity(files.len());
    for path in files {
        let snapshot = CatalogSnapshot::load(&path)?;
        let key = snapshot.key().clone();
        if map.insert(key.clone(), Arc::new(snapshot)).is_some() {
            warn!(snapshot = %key, file = %path.display(), "several datasets for the same period, keeping the last one");
        }
    }
    Ok(map)
}

impl CatalogStore {
    /// Carga inicial desde `dir`. Un error aquí debe abortar el arranque.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let map = load_snapshots(&dir)?;
        Ok(CatalogStore {
            dir: Some(dir),
            snapshots: ArcSwap::from_pointee(map),
            reload_lock: Mutex::new(()),
        })
    }

    /// Store en memoria, sin directorio de origen (no recargable).
    pub fn from_snapshots<I>(snapshots: I) -> Self
    where
        I: IntoIterator<Item = CatalogSnapshot>,
    {
        let map: SnapshotMap = snapshots
            .into_iter()
            .map(|s| (s.key().clone(), Arc::new(s)))
            .collect();
        CatalogStore {
            dir: None,
            snapshots: ArcSwap::from_pointee(map),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn get(&self, key: &SnapshotKey) -> Option<Arc<CatalogSnapshot>> {
        self.snapshots.load().get(key).cloned()
    }

    /// Si sólo hay un snapshot cargado, ése.
    pub fn only(&self) -> Option<Arc<CatalogSnapshot>> {
        let map = self.snapshots.load();
        if map.len() == 1 { map.values().next().cloned() } else { None }
    }

    pub fn len(&self) -> usize {
        self.snapshots.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.load().is_empty()
    }

    pub fn summaries(&self) -> Vec<SnapshotSummary> {
        let map = self.snapshots.load();
        let mut keys: Vec<&SnapshotKey> = map.keys().collect();
        keys.sort();
        keys.into_iter().map(|k| map[k].summary()).collect()
    }

    /// Reconstruye todos los snapshots desde disco y los publica de forma
    /// atómica. Sólo una recarga a la vez; si falla se conserva el estado
    /// anterior. Devuelve el número de snapshots publicados.
    pub fn reload(&self) -> Result<usize> {
        let _guard = match self.reload_lock.try_lock() {
            Ok(g) => g,
            Err(TryLockError::WouldBlock) => return Err(CatalogError::ReloadInProgress),
            Err(TryLockError::Poisoned(_)) => return Err(CatalogError::LockPoisoned),
        };
        let Some(dir) = self.dir.as_deref() else {
            // nada que releer: el store se creó en memoria
            return Ok(self.len());
        };

        info!(dir = %dir.display(), "catalog reload started");
        let map = load_snapshots(dir)?;
        let count = map.len();
        self.snapshots.store(Arc::new(map));
        info!(snapshots = count, "catalog reload finished");
        Ok(count)
    }

    /// Toma el cerrojo de recarga como lo haría una recarga en curso.
    #[cfg(test)]
    pub(crate) fn hold_reload_lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.reload_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}
