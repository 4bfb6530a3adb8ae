//! Entry storage on the local filesystem.
//!
//! The backing store is a flat directory of markdown files, one per entry:
//!
//! ```text
//! content/daily/
//! ├── 2024-03-01.md
//! ├── 2024-02-15.md
//! └── 2024-01-10.md
//! ```
//!
//! Nothing is cached. Every call goes back to the directory, so an entry that
//! is added while the server runs shows up on the next request.

use crate::entry::{Entry, EntryId, EntryOrder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("no entry for {0}")]
    NotFound(EntryId),
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    fn storage(path: &Path, source: std::io::Error) -> Self {
        RepositoryError::Storage {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads entries from a directory of `<date>.md` files.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    dir: PathBuf,
    order: EntryOrder,
}

impl EntryRepository {
    pub fn new(dir: impl Into<PathBuf>, order: EntryOrder) -> Self {
        Self {
            dir: dir.into(),
            order,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerate entry ids.
    ///
    /// Only regular files named `<date>.md` count; anything else in the
    /// directory is skipped.
    pub async fn list_entries(&self) -> Result<Vec<EntryId>, RepositoryError> {
        Ok(self.inspect().await?.entries)
    }

    /// Like [`list_entries`](Self::list_entries), but also reports the names of
    /// files that were skipped. Used by the `check` command.
    pub async fn inspect(&self) -> Result<Inventory, RepositoryError> {
        let (mut entries, mut skipped) = self.scan().await?;
        if self.order == EntryOrder::NewestFirst {
            entries.sort_by(|a, b| b.cmp(a));
        }
        skipped.sort();
        Ok(Inventory { entries, skipped })
    }

    /// Load the markdown source for `id`.
    ///
    /// A missing file is [`RepositoryError::NotFound`] only while the entries
    /// directory itself is there; without the directory it is a storage error,
    /// the same as [`list_entries`](Self::list_entries) reports.
    pub async fn load_entry(&self, id: &EntryId) -> Result<Entry, RepositoryError> {
        let path = self.dir.join(id.file_name());
        match fs::read_to_string(&path).await {
            Ok(source) => Ok(Entry {
                id: id.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if fs::metadata(&self.dir).await.is_ok_and(|m| m.is_dir()) {
                    Err(RepositoryError::NotFound(id.clone()))
                } else {
                    Err(RepositoryError::storage(&self.dir, e))
                }
            }
            Err(e) => Err(RepositoryError::storage(&path, e)),
        }
    }

    /// Directory order, unsorted. Returns accepted ids and skipped file names.
    async fn scan(&self) -> Result<(Vec<EntryId>, Vec<String>), RepositoryError> {
        let mut dir = fs::read_dir(&self.dir)
            .await
            .map_err(|e| RepositoryError::storage(&self.dir, e))?;

        let mut ids = Vec::new();
        let mut skipped = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| RepositoryError::storage(&self.dir, e))?
        {
            let file_name = item.file_name().to_string_lossy().into_owned();
            // Follows symlinks; a dangling link is skipped like any other stray.
            let is_file = fs::metadata(item.path())
                .await
                .is_ok_and(|m| m.is_file());

            match file_name.strip_suffix(".md").and_then(EntryId::parse) {
                Some(id) if is_file => ids.push(id),
                _ => {
                    tracing::debug!(file = %file_name, "skipping non-entry file");
                    skipped.push(file_name);
                }
            }
        }
        Ok((ids, skipped))
    }
}

/// Result of [`EntryRepository::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub entries: Vec<EntryId>,
    pub skipped: Vec<String>,
}
