use super::KeyValueStore;
use crate::error::StoreError;
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Default wait for the advisory write lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Exclusive advisory lock on a sibling `.lock` file, released on drop.
#[derive(Debug)]
struct WriteLock {
    file: File,
}

impl WriteLock {
    fn acquire(path: &Path, timeout: Duration) -> Result<Self, StoreError> {
        let unavailable = |source| StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        };

        let start = Instant::now();
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(path)
                .map_err(unavailable)?;

            if FileExt::try_lock_exclusive(&file).is_ok() {
                return Ok(Self { file });
            }

            if start.elapsed() >= timeout {
                return Err(StoreError::LockTimeout {
                    path: path.to_path_buf(),
                    waited: start.elapsed(),
                });
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// A store persisted as one JSON object in a single file.
///
/// The whole map is read at open. Each mutation rewrites the file through a
/// temporary sibling and an atomic rename while holding the write lock, so a
/// crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the file exists but cannot be
    /// read, and [`StoreError::CorruptFile`] when it is not a JSON object of
    /// string values.
    pub fn open(path: impl Into<PathBuf>, lock_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::CorruptFile {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Unavailable { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");

        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        Ok(Self {
            path,
            lock_path,
            lock_timeout,
            entries,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let _lock = WriteLock::acquire(&self.lock_path, self.lock_timeout)?;

        let body = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut tmp = File::create(&tmp_path).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.sync_all().map_err(write_err)?;
        drop(tmp);
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }

    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StoreError> {
        self.persist(&entries)?;
        self.entries = entries;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }
}
