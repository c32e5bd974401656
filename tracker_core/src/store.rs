//! Record store with per-collection locking.
//!
//! Records live in named collections. A [`StorageBackend`] moves whole
//! collections to and from the medium; [`RecordStore`] layers typed access and
//! a reader/writer guard per collection on top, so that every
//! load-modify-save sequence runs with a single writer.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use tempfile::NamedTempFile;

/// The named collections held by the store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Exercises,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Exercises => "exercises",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage capability for whole collections
pub trait StorageBackend: Send + Sync {
    /// Read every record of a collection, creating it empty on first use
    fn read(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Replace a collection. Readers must never observe a partial write.
    fn write(&self, collection: Collection, records: &[Value]) -> Result<()>;
}

// ============================================================================
// JSON file backend
// ============================================================================

/// One JSON array file per collection, e.g. `<dir>/users.json`
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing a collection
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, collection: Collection) -> Result<Vec<Value>> {
        let path = self.path_for(collection);
        if !path.exists() {
            tracing::info!("Creating empty {} collection at {:?}", collection, path);
            self.write(collection, &[])?;
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let records: Vec<Value> = serde_json::from_str(&contents).map_err(|e| {
            Error::Storage(format!(
                "{} collection at {:?} is unreadable: {}",
                collection, path, e
            ))
        })?;

        tracing::debug!("Read {} {} records from {:?}", records.len(), collection, path);
        Ok(records)
    }

    fn write(&self, collection: Collection, records: &[Value]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(collection);

        // Temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} {} records to {:?}", records.len(), collection, path);
        Ok(())
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Keeps collections in memory; nothing survives the process
#[derive(Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, collection: Collection) -> Result<Vec<Value>> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| Error::Storage("memory backend lock poisoned".into()))?;
        Ok(collections.entry(collection).or_default().clone())
    }

    fn write(&self, collection: Collection, records: &[Value]) -> Result<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| Error::Storage("memory backend lock poisoned".into()))?;
        collections.insert(collection, records.to_vec());
        Ok(())
    }
}

// ============================================================================
// Record store
// ============================================================================

/// Typed, guarded access to the collections of a backend
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    users_guard: RwLock<()>,
    exercises_guard: RwLock<()>,
}

impl RecordStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            users_guard: RwLock::new(()),
            exercises_guard: RwLock::new(()),
        }
    }

    /// Store backed by JSON files in `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileBackend::new(dir))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    fn guard(&self, collection: Collection) -> &RwLock<()> {
        match collection {
            Collection::Users => &self.users_guard,
            Collection::Exercises => &self.exercises_guard,
        }
    }

    /// Load a whole collection in stored order
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let _guard = self
            .guard(collection)
            .read()
            .map_err(|_| poisoned(collection))?;
        self.load_unguarded(collection)
    }

    /// Overwrite a whole collection
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let _guard = self
            .guard(collection)
            .write()
            .map_err(|_| poisoned(collection))?;
        self.save_unguarded(collection, records)
    }

    /// Load a collection, modify it, and save it back under the write guard
    ///
    /// If `f` fails nothing is written.
    pub fn update<T, R, F>(&self, collection: Collection, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let _guard = self
            .guard(collection)
            .write()
            .map_err(|_| poisoned(collection))?;

        let mut records = self.load_unguarded(collection)?;
        let output = f(&mut records)?;
        self.save_unguarded(collection, &records)?;
        Ok(output)
    }

    fn load_unguarded<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        self.backend
            .read(collection)?
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|e| {
                    Error::Storage(format!(
                        "record {} of {} collection is invalid: {}",
                        index, collection, e
                    ))
                })
            })
            .collect()
    }

    fn save_unguarded<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.backend.write(collection, &values)
    }
}

fn poisoned(collection: Collection) -> Error {
    Error::Storage(format!("{} collection lock poisoned", collection))
}
