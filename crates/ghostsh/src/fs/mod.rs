//! Virtual filesystem store
//!
//! A stateless projection over a real directory tree confined to the
//! sandbox root. There is no in-memory index: the persisted tree is the
//! entity, and every operation resolves its path arguments through
//! [`Sandbox::resolve`] before touching storage. A confinement failure
//! short-circuits with no side effect.

pub mod seed;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sandbox::Sandbox;

/// Kind of a virtual filesystem entry, `"file"` or `"folder"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    File,
    Folder,
}

/// One node in the virtual tree as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Entry name (not full path).
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Byte length for files; directories report 0.
    pub size: u64,
}

/// Request payload for the path-bearing endpoints.
///
/// Transports deserialize into this before anything reaches the store, so
/// malformed payloads are rejected at the boundary. `content` defaults to
/// empty, `type` to `file`; `destination` is only meaningful for move/copy.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRequest {
    pub path: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub destination: Option<String>,
}

/// The confined directory tree.
///
/// All methods take `&self`; concurrent operations on disjoint paths do not
/// interfere, and overlapping operations race at the storage layer (callers
/// tolerate the resulting not-found or storage error).
pub struct SandboxFs {
    sandbox: Sandbox,
}

impl SandboxFs {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }

    /// The resolver this store is confined by.
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// The canonical sandbox root.
    pub fn root(&self) -> &Path {
        self.sandbox.root()
    }

    /// List the immediate children of a directory.
    ///
    /// Sizes are taken from metadata for files only; no recursive
    /// aggregation. Enumeration order is whatever the storage yields.
    pub async fn list(&self, path: &str) -> Result<Vec<Entry>> {
        let target = self.sandbox.resolve(path)?;

        match tokio::fs::metadata(&target).await {
            Ok(meta) if !meta.is_dir() => {
                return Err(Error::NotADirectory(path.to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("Directory".to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&target).await?;
        while let Some(child) = dir.next_entry().await? {
            let meta = child.metadata().await?;
            let kind = if meta.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                name: child.file_name().to_string_lossy().into_owned(),
                kind,
                size: if meta.is_file() { meta.len() } else { 0 },
            });
        }
        Ok(entries)
    }

    /// Read the full textual content of a file.
    pub async fn read(&self, path: &str) -> Result<String> {
        let target = self.sandbox.resolve(path)?;

        match tokio::fs::metadata(&target).await {
            Ok(meta) if meta.is_dir() => {
                return Err(Error::IsADirectory(path.to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("File".to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(tokio::fs::read_to_string(&target).await?)
    }

    /// Overwrite (or create) the file at `path`, truncating prior content.
    ///
    /// Missing intermediate directories are not created here; writing into
    /// a non-existent directory surfaces the storage error. Only
    /// [`create`](Self::create) auto-creates ancestors.
    pub async fn write(&self, path: &str, content: &str) -> Result<()> {
        let target = self.sandbox.resolve(path)?;

        if let Ok(meta) = tokio::fs::metadata(&target).await {
            if meta.is_dir() {
                return Err(Error::IsADirectory(path.to_string()));
            }
        }

        tracing::debug!(path, bytes = content.len(), "write");
        tokio::fs::write(&target, content).await?;
        Ok(())
    }

    /// Create a file or directory, creating missing ancestors.
    ///
    /// Directory creation is idempotent. File creation writes `content`
    /// (default empty), overwriting an existing file.
    pub async fn create(&self, path: &str, kind: EntryKind, content: Option<&str>) -> Result<()> {
        let target = self.sandbox.resolve(path)?;

        tracing::debug!(path, ?kind, "create");
        match kind {
            EntryKind::Folder => {
                tokio::fs::create_dir_all(&target).await?;
            }
            EntryKind::File => {
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&target, content.unwrap_or_default()).await?;
            }
        }
        Ok(())
    }

    /// Delete a file, or a directory and its entire contents.
    ///
    /// Deletion is permanent and immediate; the seeded `trash/` directory
    /// is content, not a recycle bin.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let target = self.sandbox.resolve(path)?;

        let meta = match tokio::fs::symlink_metadata(&target).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("File".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path, "delete");
        if meta.is_dir() {
            tokio::fs::remove_dir_all(&target).await?;
        } else {
            tokio::fs::remove_file(&target).await?;
        }
        Ok(())
    }

    /// Relocate an entry, file or directory.
    ///
    /// Destination policy (shared with [`copy`](Self::copy)): fails with
    /// `AlreadyExists` when the destination is a non-empty directory,
    /// otherwise the destination is replaced.
    pub async fn rename(&self, path: &str, destination: &str) -> Result<()> {
        let src = self.sandbox.resolve(path)?;
        let dst = self.sandbox.resolve(destination)?;

        match tokio::fs::symlink_metadata(&src).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("File".to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        self.displace_destination(&dst, destination).await?;

        tracing::debug!(path, destination, "rename");
        tokio::fs::rename(&src, &dst).await?;
        Ok(())
    }

    /// Copy an entry; directories are duplicated recursively.
    ///
    /// Same destination policy as [`rename`](Self::rename). The copy and
    /// the original are independently mutable afterwards.
    pub async fn copy(&self, path: &str, destination: &str) -> Result<()> {
        let src = self.sandbox.resolve(path)?;
        let dst = self.sandbox.resolve(destination)?;

        let meta = match tokio::fs::metadata(&src).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("File".to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        self.displace_destination(&dst, destination).await?;

        tracing::debug!(path, destination, "copy");
        if meta.is_dir() {
            copy_tree(&src, &dst).await?;
        } else {
            tokio::fs::copy(&src, &dst).await?;
        }
        Ok(())
    }

    /// Clear the way for a move/copy destination: remove an existing file
    /// or empty directory, reject a non-empty directory.
    async fn displace_destination(&self, dst: &Path, relative: &str) -> Result<()> {
        let meta = match tokio::fs::symlink_metadata(dst).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if meta.is_dir() {
            let mut dir = tokio::fs::read_dir(dst).await?;
            if dir.next_entry().await?.is_some() {
                return Err(Error::AlreadyExists(relative.to_string()));
            }
            tokio::fs::remove_dir(dst).await?;
        } else {
            tokio::fs::remove_file(dst).await?;
        }
        Ok(())
    }
}

/// Duplicate a directory subtree with an explicit worklist.
async fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let mut queue: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from, to)) = queue.pop() {
        tokio::fs::create_dir_all(&to).await?;
        let mut dir = tokio::fs::read_dir(&from).await?;
        while let Some(child) = dir.next_entry().await? {
            let target = to.join(child.file_name());
            if child.metadata().await?.is_dir() {
                queue.push((child.path(), target));
            } else {
                tokio::fs::copy(child.path(), &target).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_wire_kind() {
        let entry = Entry {
            name: "notes.txt".to_string(),
            kind: EntryKind::File,
            size: 17,
        };
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "notes.txt", "type": "file", "size": 17})
        );
    }

    #[test]
    fn test_file_request_defaults() {
        let req: FileRequest = serde_json::from_str(r#"{"path": "a.txt"}"#).expect("deserialize");
        assert_eq!(req.kind, EntryKind::File);
        assert!(req.content.is_none());
        assert!(req.destination.is_none());
    }

    #[test]
    fn test_file_request_folder() {
        let req: FileRequest =
            serde_json::from_str(r#"{"path": "docs", "type": "folder"}"#).expect("deserialize");
        assert_eq!(req.kind, EntryKind::Folder);
    }
}
