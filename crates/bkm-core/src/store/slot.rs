//! Durable slot: the single named location holding the whole serialized collection.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage for one serialized blob. Every write replaces the previous content entirely.
pub trait DurableSlot {
    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;

    /// Current content as raw bytes, or None if nothing has been stored yet.
    /// Content that is not valid text is still returned; decoding decides whether it is usable.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the content. Readers never observe a partially written blob.
    fn write(&self, data: &str) -> Result<()>;

    /// Move unreadable content aside so a fresh collection can be written.
    /// Returns where it went, if anywhere.
    fn quarantine(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// JSON file on disk. Writes go to a temp file in the same directory, then rename.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path that receives corrupt content: `bookmarks.json` → `bookmarks.json.corrupt`.
    pub fn corrupt_path(&self) -> PathBuf {
        self.corrupt_path_n(0)
    }

    /// First corrupt path not already taken: `.corrupt`, then `.corrupt.1`, `.corrupt.2`, ...
    pub fn next_free_corrupt_path(&self) -> PathBuf {
        (0u32..)
            .map(|n| self.corrupt_path_n(n))
            .find(|p| !p.exists())
            .unwrap_or_else(|| self.corrupt_path())
    }

    fn corrupt_path_n(&self, n: u32) -> PathBuf {
        let mut o = self.path.as_os_str().to_owned();
        o.push(".corrupt");
        if n > 0 {
            o.push(format!(".{n}"));
        }
        PathBuf::from(o)
    }
}

impl DurableSlot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read bookmarks: {}", self.path.display())),
        }
    }

    fn write(&self, data: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).with_context(|| format!("create dir: {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(data.as_bytes())
            .with_context(|| format!("write temp file for {}", self.path.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("sync temp file for {}", self.path.display()))?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("replace bookmarks: {}", self.path.display()))?;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        // earlier quarantined blobs are never overwritten
        let target = self.next_free_corrupt_path();
        std::fs::rename(&self.path, &target).with_context(|| {
            format!(
                "failed to move {} to {}",
                self.path.display(),
                target.display()
            )
        })?;
        Ok(Some(target.display().to_string()))
    }
}

/// In-process slot for tests and embedding; keeps the last written blob.
#[derive(Debug, Default)]
pub struct MemorySlot {
    data: RefCell<Option<Vec<u8>>>,
    quarantined: RefCell<Option<Vec<u8>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `data`, as if written by an earlier session.
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: RefCell::new(Some(data.into())),
            quarantined: RefCell::new(None),
        }
    }

    /// Stored content as text (lossy for non-UTF-8 bytes).
    pub fn contents(&self) -> Option<String> {
        lossy(self.data.borrow().as_deref())
    }

    pub fn quarantined(&self) -> Option<String> {
        lossy(self.quarantined.borrow().as_deref())
    }
}

fn lossy(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| String::from_utf8_lossy(b).into_owned())
}

impl DurableSlot for MemorySlot {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.data.borrow().clone())
    }

    fn write(&self, data: &str) -> Result<()> {
        *self.data.borrow_mut() = Some(data.as_bytes().to_vec());
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<String>> {
        let old = self.data.borrow_mut().take();
        let moved = old.is_some();
        *self.quarantined.borrow_mut() = old;
        Ok(moved.then(|| "memory (quarantined)".to_string()))
    }
}

impl<T: DurableSlot + ?Sized> DurableSlot for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, data: &str) -> Result<()> {
        (**self).write(data)
    }

    fn quarantine(&self) -> Result<Option<String>> {
        (**self).quarantine()
    }
}
