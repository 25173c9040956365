//! Path guard for file tools: resolve a user-supplied path under the workspace
//! root and reject anything that escapes it.
//!
//! Every tool goes through [`WorkspaceRoot::resolve`] (or
//! [`WorkspaceRoot::resolve_for_write`]) before touching the filesystem.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::tool_source::ToolSourceError;

use super::error::FileToolError;

/// Canonical workspace root shared by all file tools.
///
/// Set once at startup; cloning shares the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot(Arc<PathBuf>);

/// A path that passed the workspace containment check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    input: String,
    path: PathBuf,
}

impl ResolvedPath {
    /// The path as the caller wrote it (used in messages back to the agent).
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Absolute, symlink-resolved path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Normalizes a path by resolving `.` and `..` without requiring the path to exist.
fn normalize_path(path: &Path) -> PathBuf {
    let mut buf = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(p) => buf = PathBuf::from(p.as_os_str()),
            Component::RootDir => buf.push(comp),
            Component::CurDir => {}
            Component::ParentDir => {
                buf.pop();
            }
            Component::Normal(s) => buf.push(s),
        }
    }
    buf
}

/// Upper bound on dangling-link hops followed while resolving one path.
const MAX_LINK_HOPS: usize = 40;

/// Canonicalizes the longest existing prefix of `path` and re-appends the rest.
///
/// `path` must already be normalized (no `..`), so popping file names walks up
/// the real ancestry. A dangling symlink on the way is replaced by its target,
/// so the result names the file a write would actually create.
fn resolve_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();
    let mut hops = 0;
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Ok(target) = std::fs::read_link(&existing) {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            "too many levels of symbolic links",
                        ));
                    }
                    let base = match existing.parent() {
                        Some(parent) => parent.canonicalize()?,
                        None => PathBuf::new(),
                    };
                    existing = normalize_path(&base.join(target));
                    continue;
                }
                match existing.file_name() {
                    Some(name) => {
                        missing.push(name.to_os_string());
                        existing.pop();
                    }
                    None => return Err(e),
                }
            }
            Err(e) => return Err(e),
        }
    }
}

impl WorkspaceRoot {
    /// Canonicalizes `path` and checks that it is a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ToolSourceError> {
        let canonical = path.as_ref().canonicalize().map_err(|e| {
            ToolSourceError::InvalidInput(format!(
                "workspace root not found or not a directory: {}",
                e
            ))
        })?;
        if !canonical.is_dir() {
            return Err(ToolSourceError::InvalidInput(
                "workspace root is not a directory".to_string(),
            ));
        }
        Ok(Self(Arc::new(canonical)))
    }

    pub fn path(&self) -> &Path {
        self.0.as_path()
    }

    fn join_resolved(&self, input: &str) -> Result<PathBuf, FileToolError> {
        let trimmed = input.trim();
        let relative = if trimmed.is_empty() { "." } else { trimmed };
        let normalized = normalize_path(&self.0.join(relative));
        resolve_existing_prefix(&normalized)
            .map_err(|e| FileToolError::io("resolve path", input, e))
    }

    /// Resolves `input` relative to the root; the result must be the root or below it.
    pub fn resolve(&self, input: &str) -> Result<ResolvedPath, FileToolError> {
        let path = self.join_resolved(input)?;
        if !path.starts_with(self.path()) {
            tracing::warn!(input = %input, resolved = %path.display(), "path escapes workspace");
            return Err(FileToolError::AccessDenied {
                path: input.to_string(),
            });
        }
        Ok(ResolvedPath {
            input: input.to_string(),
            path,
        })
    }

    /// Like [`resolve`](Self::resolve), but checks the parent of the target.
    ///
    /// Lets callers create new files anywhere under the root while refusing the
    /// root itself and anything above it.
    pub fn resolve_for_write(&self, input: &str) -> Result<ResolvedPath, FileToolError> {
        let path = self.join_resolved(input)?;
        let contained = path
            .parent()
            .map(|parent| parent.starts_with(self.path()))
            .unwrap_or(false);
        if !contained {
            tracing::warn!(input = %input, resolved = %path.display(), "write target escapes workspace");
            return Err(FileToolError::AccessDenied {
                path: input.to_string(),
            });
        }
        Ok(ResolvedPath {
            input: input.to_string(),
            path,
        })
    }

    /// `path` relative to the root, `"."` for the root itself.
    pub fn relative(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(self.path()) {
            Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> (tempfile::TempDir, WorkspaceRoot) {
        let dir = tempfile::tempdir().unwrap();
        let root = WorkspaceRoot::new(dir.path()).unwrap();
        (dir, root)
    }

    #[test]
    fn normalize_path_resolves_dot_dot() {
        let n = normalize_path(Path::new("/a/b/../c"));
        assert_eq!(n, PathBuf::from("/a/c"));
    }

    #[test]
    fn normalize_path_resolves_dot() {
        let n = normalize_path(Path::new("/a/./b"));
        assert_eq!(n, PathBuf::from("/a/b"));
    }

    #[test]
    fn resolve_dot_and_empty_give_root() {
        let (_dir, root) = root();
        assert_eq!(root.resolve(".").unwrap().path(), root.path());
        assert_eq!(root.resolve("").unwrap().path(), root.path());
        assert_eq!(root.resolve("  ").unwrap().path(), root.path());
    }

    #[test]
    fn resolve_nested_missing_path_is_absolute_under_root() {
        let (_dir, root) = root();
        let r = root.resolve("a/b/../c.txt").unwrap();
        assert_eq!(r.path(), root.path().join("a").join("c.txt"));
        assert_eq!(r.input(), "a/b/../c.txt");
    }

    #[test]
    fn resolve_rejects_parent_escapes() {
        let (_dir, root) = root();
        for p in ["..", "../x", "a/../../x", "./a/b/../../../../etc/passwd"] {
            let err = root.resolve(p).unwrap_err();
            assert!(
                matches!(err, FileToolError::AccessDenied { .. }),
                "{} should be denied",
                p
            );
        }
    }

    #[test]
    fn resolve_rejects_absolute_path_outside_root() {
        let (_dir, root) = root();
        let err = root.resolve("/etc/passwd").unwrap_err();
        assert!(matches!(err, FileToolError::AccessDenied { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_rejects_symlink_pointing_outside() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "s").unwrap();
        let (dir, root) = root();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let err = root.resolve("link/secret.txt").unwrap_err();
        assert!(matches!(err, FileToolError::AccessDenied { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_for_write_follows_dangling_symlink_outside() {
        let outside = tempfile::tempdir().unwrap();
        let (dir, root) = root();
        let target = outside.path().join("planted.txt");
        std::os::unix::fs::symlink(&target, dir.path().join("evil")).unwrap();

        let err = root.resolve_for_write("evil").unwrap_err();
        assert!(matches!(err, FileToolError::AccessDenied { .. }));
        let err = root.resolve("evil").unwrap_err();
        assert!(matches!(err, FileToolError::AccessDenied { .. }));
        assert!(!target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_relative_symlink_inside_root_resolves_to_target() {
        let (dir, root) = root();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink("../real.txt", dir.path().join("sub/link")).unwrap();

        let r = root.resolve_for_write("sub/link").unwrap();
        assert_eq!(r.path(), root.path().join("real.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_directory_outside_is_denied_for_nested_write() {
        let outside = tempfile::tempdir().unwrap();
        let (dir, root) = root();
        std::os::unix::fs::symlink(outside.path().join("gone"), dir.path().join("d")).unwrap();

        let err = root.resolve_for_write("d/new.txt").unwrap_err();
        assert!(matches!(err, FileToolError::AccessDenied { .. }));
    }

    #[test]
    fn resolve_for_write_allows_new_file_in_root_and_denies_root_itself() {
        let (_dir, root) = root();
        let r = root.resolve_for_write("new.txt").unwrap();
        assert_eq!(r.path(), root.path().join("new.txt"));
        assert!(root.resolve_for_write(".").is_err());
        assert!(root.resolve_for_write("../new.txt").is_err());
    }

    #[test]
    fn relative_strips_root() {
        let (_dir, root) = root();
        assert_eq!(root.relative(root.path()), PathBuf::from("."));
        assert_eq!(
            root.relative(&root.path().join("src/lib.rs")),
            PathBuf::from("src/lib.rs")
        );
    }

    #[test]
    fn new_rejects_missing_root() {
        let err = WorkspaceRoot::new("/definitely/not/here/aspen-root").unwrap_err();
        assert!(matches!(err, ToolSourceError::InvalidInput(_)));
    }
}
