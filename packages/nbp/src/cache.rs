//! On-disk cache of downloaded publications.
//!
//! The cache is a plain directory tree mirroring the feed layout. There is
//! no locking; concurrent writers to the same file are last-writer-wins.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// One cached file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cached file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the cached file.
    fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    pub fn dir_exists(&self) -> bool {
        self.dir().is_none_or(Path::is_dir)
    }

    /// Create the directory, including parents. Succeeds if it already exists.
    pub fn create_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn file_exists(&self) -> bool {
        self.path.is_file()
    }

    /// Save `content` to the cache file.
    ///
    /// Uses atomic write pattern: writes to temp file, syncs to disk, then
    /// renames, so readers never see a partial file.
    pub fn save(&self, content: &[u8]) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_file = self.path.with_file_name(format!(".{file_name}.tmp"));

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content)?;
            file.sync_all()?;
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }

        fs::rename(&temp_file, &self.path)?;
        Ok(())
    }

    /// Read the cached content.
    pub fn open(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let cache = CacheFile::new(temp_dir.path().join("2012/a/12a001.xml"));

        assert!(!cache.dir_exists());
        cache.create_dir().unwrap();
        assert!(cache.dir_exists());
        cache.create_dir().unwrap();
        assert!(cache.dir_exists());
    }

    #[test]
    fn test_save_and_open() {
        let temp_dir = tempdir().unwrap();
        let cache = CacheFile::new(temp_dir.path().join("2012/a/12a001.xml"));
        cache.create_dir().unwrap();

        assert!(!cache.file_exists());
        cache.save(b"<tabela_kursow/>").unwrap();
        assert!(cache.file_exists());
        assert_eq!(cache.open().unwrap(), b"<tabela_kursow/>");

        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("2012/a"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = tempdir().unwrap();
        let cache = CacheFile::new(temp_dir.path().join("12a001.xml"));
        cache.save(b"old").unwrap();
        cache.save(b"new").unwrap();
        assert_eq!(cache.open().unwrap(), b"new");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let temp_dir = tempdir().unwrap();
        let cache = CacheFile::new(temp_dir.path().join("missing.xml"));
        assert!(cache.open().is_err());
    }
}
