//! Plain text, JSON and JSON-lines persistence
//!
//! All text is read and written as UTF-8. Each operation opens its file,
//! writes or reads it, and releases the handle before returning.
//!
//! # Writers
//!
//! | content      | truncate             | append             | save (dispatch)   |
//! |--------------|----------------------|--------------------|-------------------|
//! | text / lines | `rewrite_into_file`  | `write_into_file`  | `save_into_file`  |
//! | JSON value   | `rewrite_into_json`  | `write_into_json`  | `save_in_json`    |
//! | JSON lines   | `rewrite_into_jsonl` | `write_into_jsonl` | `save_in_jsonl`   |
//!
//! Prefer the `save_*` functions. They rewrite a file that already exists and
//! append to (i.e. create) one that does not; see [`SaveAction`].
//!
//! `write_into_json` appends a whole new JSON array on every call, so calling it
//! twice on the same file leaves content that is not one parseable document.
//! Existing files depend on this layout; use `save_in_json` or the JSON-lines
//! writers when accumulating records.
//!
//! # Example
//!
//! ```no_run
//! use utilkit::file_utils::{read_file, save_into_file};
//!
//! save_into_file(&["first", "  second  "], "notes.txt")?;
//! assert_eq!(read_file("notes.txt")?, vec!["first\n", "second\n"]);
//! # Ok::<(), utilkit::Error>(())
//! ```

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, OsFs, WriteMode};
use crate::json_format;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A JSON object, the unit written by the JSON and JSON-lines helpers
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Content accepted by the plain-text writers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// Written verbatim
    Text(&'a str),
    /// Each element trimmed and written on its own `\n`-terminated line
    Lines(Vec<&'a str>),
}

impl Content<'_> {
    fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Lines(lines) => {
                let mut out = String::new();
                for line in lines {
                    out.push_str(line.trim());
                    out.push('\n');
                }
                out.into_bytes()
            }
        }
    }
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a, S: AsRef<str>> From<&'a [S]> for Content<'a> {
    fn from(lines: &'a [S]) -> Self {
        Self::Lines(lines.iter().map(AsRef::as_ref).collect())
    }
}

impl<'a, S: AsRef<str>> From<&'a Vec<S>> for Content<'a> {
    fn from(lines: &'a Vec<S>) -> Self {
        Self::from(lines.as_slice())
    }
}

impl<'a, S: AsRef<str>, const N: usize> From<&'a [S; N]> for Content<'a> {
    fn from(lines: &'a [S; N]) -> Self {
        Self::from(lines.as_slice())
    }
}

/// What a `save_*` call does with its target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    /// The path exists: its content is replaced
    Rewrite,
    /// The path does not exist: it is created by appending to nothing
    Append,
}

impl SaveAction {
    pub fn write_mode(self) -> WriteMode {
        match self {
            Self::Rewrite => WriteMode::Truncate,
            Self::Append => WriteMode::Append,
        }
    }
}

/// File helpers bound to a filesystem and a configuration
#[derive(Debug, Clone, Default)]
pub struct FileStore<F = OsFs> {
    fs: F,
    config: StoreConfig,
}

impl FileStore<OsFs> {
    /// Store on the real filesystem, configured by `config`
    pub fn from_config(config: StoreConfig) -> Self {
        Self {
            fs: OsFs::new().with_sync(config.sync_on_write),
            config,
        }
    }

    /// Store on the real filesystem, configured from a JSON file.
    ///
    /// A missing or invalid file gives the default configuration; see
    /// [`StoreConfig::load`].
    pub fn from_config_file(path: impl AsRef<Path>) -> Self {
        Self::from_config(StoreConfig::load(path))
    }
}

impl<F: FileSystem> FileStore<F> {
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, StoreConfig::default())
    }

    pub fn with_config(fs: F, config: StoreConfig) -> Self {
        Self { fs, config }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Reads a file and returns its lines, each keeping its trailing `\n`.
    ///
    /// `\r\n` and lone `\r` line endings are normalized to `\n`. The last line
    /// has no terminator if the file does not end with one.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the path does not exist, [`Error::Encoding`] if
    /// the file is not UTF-8, [`Error::Io`] for anything else.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let text = self.read_text(path.as_ref())?;
        Ok(split_lines(&text))
    }

    /// Replaces the file's content.
    pub fn rewrite_into_file<'a>(
        &self,
        content: impl Into<Content<'a>>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        self.write_bytes(path.as_ref(), &content.into().to_bytes(), WriteMode::Truncate)
    }

    /// Appends to the file, creating it if needed.
    pub fn write_into_file<'a>(
        &self,
        content: impl Into<Content<'a>>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        self.write_bytes(path.as_ref(), &content.into().to_bytes(), WriteMode::Append)
    }

    /// Decides how a `save_*` call treats `path`, based on whether it exists.
    pub fn save_action(&self, path: impl AsRef<Path>) -> SaveAction {
        if self.fs.exists(path.as_ref()) {
            SaveAction::Rewrite
        } else {
            SaveAction::Append
        }
    }

    /// Rewrites the file if it exists, otherwise appends (creates) it.
    pub fn save_into_file<'a>(
        &self,
        content: impl Into<Content<'a>>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        match self.save_action(path) {
            SaveAction::Rewrite => self.rewrite_into_file(content, path),
            SaveAction::Append => self.write_into_file(content, path),
        }
    }

    /// Replaces the file's content with `records` encoded as one JSON array.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] if a record cannot be represented in JSON. The
    /// file is left untouched in that case.
    pub fn rewrite_into_json<T: Serialize>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let data = json_format::to_json(records, self.config.json_style)?;
        self.write_bytes(path.as_ref(), &data, WriteMode::Truncate)
    }

    /// Appends `records` encoded as one JSON array.
    ///
    /// A second call on the same file produces two concatenated arrays.
    pub fn write_into_json<T: Serialize>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let data = json_format::to_json(records, self.config.json_style)?;
        self.write_bytes(path.as_ref(), &data, WriteMode::Append)
    }

    pub fn save_in_json<T: Serialize>(&self, records: &[T], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match self.save_action(path) {
            SaveAction::Rewrite => self.rewrite_into_json(records, path),
            SaveAction::Append => self.write_into_json(records, path),
        }
    }

    /// Appends one JSON line per record.
    pub fn write_into_jsonl<T: Serialize>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let data = json_format::to_json_lines(records, self.config.json_style)?;
        self.write_bytes(path.as_ref(), &data, WriteMode::Append)
    }

    /// Replaces the file's content with one JSON line per record.
    pub fn rewrite_into_jsonl<T: Serialize>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let data = json_format::to_json_lines(records, self.config.json_style)?;
        self.write_bytes(path.as_ref(), &data, WriteMode::Truncate)
    }

    pub fn save_in_jsonl<T: Serialize>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        match self.save_action(path) {
            SaveAction::Rewrite => self.rewrite_into_jsonl(records, path),
            SaveAction::Append => self.write_into_jsonl(records, path),
        }
    }

    /// Parses a file holding a single JSON document.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let text = self.read_text(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Parses a JSON-lines file, skipping blank lines.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] on the first malformed line.
    pub fn read_jsonl<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<Vec<T>> {
        let text = self.read_text(path.as_ref())?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }

    /// Deletes the file if present. A missing file is not an error.
    pub fn remove_if_exist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            return Ok(());
        }

        tracing::debug!(path = %path.display(), "removing file");
        match self.fs.remove(path) {
            Ok(()) => Ok(()),
            // Removed by someone else between the check and the call
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        tracing::trace!(path = %path.display(), "reading file");
        let bytes = self.fs.read(path).map_err(|e| Error::io(path, e))?;
        String::from_utf8(bytes).map_err(|source| Error::Encoding {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_bytes(&self, path: &Path, data: &[u8], mode: WriteMode) -> Result<()> {
        tracing::debug!(path = %path.display(), ?mode, bytes = data.len(), "writing file");
        self.fs
            .write(path, data, mode)
            .map_err(|e| Error::io(path, e))
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split_inclusive('\n').map(str::to_string).collect()
}

// Free functions on the real filesystem with default settings

fn default_store() -> FileStore {
    FileStore::default()
}

/// See [`FileStore::read_file`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    default_store().read_file(path)
}

/// See [`FileStore::rewrite_into_file`].
pub fn rewrite_into_file<'a>(
    content: impl Into<Content<'a>>,
    path: impl AsRef<Path>,
) -> Result<()> {
    default_store().rewrite_into_file(content, path)
}

/// See [`FileStore::write_into_file`].
pub fn write_into_file<'a>(
    content: impl Into<Content<'a>>,
    path: impl AsRef<Path>,
) -> Result<()> {
    default_store().write_into_file(content, path)
}

/// See [`FileStore::save_into_file`].
pub fn save_into_file<'a>(
    content: impl Into<Content<'a>>,
    path: impl AsRef<Path>,
) -> Result<()> {
    default_store().save_into_file(content, path)
}

pub fn rewrite_into_json<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().rewrite_into_json(records, path)
}

pub fn write_into_json<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().write_into_json(records, path)
}

pub fn save_in_json<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().save_in_json(records, path)
}

pub fn write_into_jsonl<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().write_into_jsonl(records, path)
}

pub fn rewrite_into_jsonl<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().rewrite_into_jsonl(records, path)
}

pub fn save_in_jsonl<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> Result<()> {
    default_store().save_in_jsonl(records, path)
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    default_store().read_json(path)
}

pub fn read_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    default_store().read_jsonl(path)
}

/// See [`FileStore::remove_if_exist`].
pub fn remove_if_exist(path: impl AsRef<Path>) -> Result<()> {
    default_store().remove_if_exist(path)
}
