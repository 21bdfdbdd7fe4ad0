//! Sandbox path resolver
//!
//! Turns a client-supplied relative path into an absolute location that is
//! guaranteed to stay inside the sandbox root, or rejects it. This is the
//! only security boundary in the system; every store operation goes through
//! [`Sandbox::resolve`] before touching storage.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// The confined root plus pure path arithmetic over it.
///
/// The root is canonicalized once at construction so the prefix check below
/// compares against a symlink-free absolute path. Resolution itself never
/// touches storage: the candidate is normalized lexically and then checked
/// for prefix containment. The store never materializes symlinks, so a
/// lexically-contained path cannot point outside the tree.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create a sandbox over an existing directory.
    ///
    /// The directory must exist; callers seed it first (see
    /// [`crate::fs::seed`]).
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = tokio::fs::canonicalize(root.into()).await?;
        Ok(Self { root })
    }

    /// The canonical sandbox root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a client-supplied path to an absolute location inside the
    /// sandbox, or fail with [`Error::AccessDenied`].
    ///
    /// Input is treated as root-relative regardless of leading slashes.
    /// `.` and `..` segments are normalized away before the containment
    /// check, so any number of `../` either lands back inside the root or
    /// is rejected — never both.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = relative.trim_start_matches('/');
        let candidate = normalize(&self.root.join(relative));

        if candidate.starts_with(&self.root) {
            Ok(candidate)
        } else {
            tracing::warn!(path = %relative, "path escaped the sandbox root");
            Err(Error::AccessDenied)
        }
    }
}

/// Resolve `.` and `..` components lexically.
///
/// `..` pops the last pushed component; at the filesystem root it is a
/// no-op, so `/..` stays `/` and the prefix check above does the rest.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push("/");
            }
            Component::Normal(name) => {
                result.push(name);
            }
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() {
        result.push("/");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn sandbox() -> (tempfile::TempDir, Sandbox) {
        let dir = tempfile::tempdir().expect("tempdir");
        let sandbox = Sandbox::new(dir.path()).await.expect("sandbox");
        (dir, sandbox)
    }

    #[test]
    fn test_normalize_dots() {
        assert_eq!(normalize(Path::new("/a/./b")), PathBuf::from("/a/b"));
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/a/../..")), PathBuf::from("/"));
    }

    #[tokio::test]
    async fn test_resolve_empty_is_root() {
        let (_dir, sandbox) = sandbox().await;
        let resolved = sandbox.resolve("").expect("root resolves");
        assert_eq!(resolved, sandbox.root());
    }

    #[tokio::test]
    async fn test_resolve_leading_slash_is_relative() {
        let (_dir, sandbox) = sandbox().await;
        let resolved = sandbox.resolve("/etc/passwd").expect("stripped");
        assert_eq!(resolved, sandbox.root().join("etc/passwd"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let (_dir, sandbox) = sandbox().await;
        for input in [
            "..",
            "../",
            "../../etc/passwd",
            "a/../../b",
            "documents/../../../../root",
            "/../../etc/shadow",
        ] {
            let err = sandbox.resolve(input).expect_err(input);
            assert!(matches!(err, Error::AccessDenied), "{input}");
        }
    }

    #[tokio::test]
    async fn test_resolve_allows_internal_dotdot() {
        let (_dir, sandbox) = sandbox().await;
        let resolved = sandbox.resolve("documents/../logs/boot.log").expect("ok");
        assert_eq!(resolved, sandbox.root().join("logs/boot.log"));
    }
}
