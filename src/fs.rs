//! Filesystem capability used by [`FileStore`](crate::file_utils::FileStore)
//!
//! Every file helper goes through the [`FileSystem`] trait instead of calling
//! `std::fs` directly, so existence checks and writes can be served from memory
//! in tests.
//!
//! - [`OsFs`] - the real filesystem
//! - [`MemoryFs`] - a map of paths to byte buffers

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How an existing file is treated when it is opened for writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Discard existing content
    Truncate,
    /// Keep existing content and write after it
    Append,
}

/// Minimal set of filesystem operations the file helpers need.
///
/// Each call opens and releases its own handle; implementations keep no open
/// files between calls.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file. A missing file is `ErrorKind::NotFound`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes `data`, creating the file if needed.
    fn write(&self, path: &Path, data: &[u8], mode: WriteMode) -> io::Result<()>;

    /// Removes a file. A missing file is `ErrorKind::NotFound`.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem, backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs {
    sync_on_write: bool,
}

impl OsFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `sync_all` after every write so data reaches physical media.
    pub fn with_sync(mut self, sync_on_write: bool) -> Self {
        self.sync_on_write = sync_on_write;
        self
    }
}

impl FileSystem for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8], mode: WriteMode) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        // Handle is dropped (closed) on every return path
        let mut file = options.open(path)?;
        file.write_all(data)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// In-memory filesystem.
///
/// Paths are compared literally (no normalization). Directories are not
/// modelled: any path can be written.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.lock().insert(path.into(), content.into());
        self
    }

    /// Returns a file's content as UTF-8 text, lossily.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Paths of all stored files, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.lock().get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn write(&self, path: &Path, data: &[u8], mode: WriteMode) -> io::Result<()> {
        let mut files = self.lock();
        let file = files.entry(path.to_path_buf()).or_default();
        if mode == WriteMode::Truncate {
            file.clear();
        }
        file.extend_from_slice(data);
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, data: &[u8], mode: WriteMode) -> io::Result<()> {
        (**self).write(path, data, mode)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_truncate_and_append() {
        let fs = MemoryFs::new();
        let path = Path::new("notes.txt");

        fs.write(path, b"one\n", WriteMode::Append).unwrap();
        fs.write(path, b"two\n", WriteMode::Append).unwrap();
        assert_eq!(fs.contents(path).unwrap(), "one\ntwo\n");

        fs.write(path, b"three\n", WriteMode::Truncate).unwrap();
        assert_eq!(fs.contents(path).unwrap(), "three\n");
    }

    #[test]
    fn test_memory_fs_missing_file_is_not_found() {
        let fs = MemoryFs::new();
        let path = Path::new("absent");

        assert!(!fs.exists(path));
        assert_eq!(fs.read(path).unwrap_err().kind(), io::ErrorKind::NotFound);
        assert_eq!(fs.remove(path).unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_fs_with_file_and_remove() {
        let fs = MemoryFs::new().with_file("a", "x").with_file("b", "y");
        assert_eq!(fs.paths(), vec![PathBuf::from("a"), PathBuf::from("b")]);

        fs.remove(Path::new("a")).unwrap();
        assert!(!fs.exists(Path::new("a")));
        assert_eq!(fs.read(Path::new("b")).unwrap(), b"y");
    }

    #[test]
    fn test_os_fs_write_modes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let fs = OsFs::new().with_sync(true);

        fs.write(&path, b"a", WriteMode::Append).unwrap();
        fs.write(&path, b"b", WriteMode::Append).unwrap();
        assert_eq!(fs.read(&path).unwrap(), b"ab");

        fs.write(&path, b"c", WriteMode::Truncate).unwrap();
        assert_eq!(fs.read(&path).unwrap(), b"c");

        fs.remove(&path).unwrap();
        assert!(!fs.exists(&path));
    }
}
