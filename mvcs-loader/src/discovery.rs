//! Model file discovery.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf, absolute};
use std::sync::Arc;
use tracing::debug;

use crate::error::LoaderResult;

/// Decides whether a discovered file is skipped.
#[derive(Clone)]
pub enum IgnoreRule {
    /// Matches the file at this path, resolved against the models directory.
    /// Absolute paths and `..` segments are allowed.
    Literal(PathBuf),
    /// Matches any file the predicate returns `true` for.
    Predicate(Arc<dyn Fn(&Path) -> bool + Send + Sync>),
}

impl IgnoreRule {
    pub fn literal(path: impl Into<PathBuf>) -> Self {
        Self::Literal(path.into())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Ignores every file whose name does not end with `suffix`.
    pub fn require_suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self::predicate(move |path| {
            !path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&suffix))
        })
    }

    /// `file` is the path as listed under `root`. Literals compare resolved
    /// paths; predicates see `file` unchanged.
    pub fn matches(&self, root: &Path, file: &Path) -> bool {
        match self {
            Self::Literal(literal) => resolve_lossy(&root.join(literal)) == resolve_lossy(file),
            Self::Predicate(predicate) => predicate(file),
        }
    }
}

impl fmt::Debug for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Lists every file under `root`, recursively, sorted by name at each
/// level, minus the files any rule in `ignore` matches.
///
/// `root` is made absolute and normalized first, so every returned path
/// (and every path a predicate sees) is absolute.
pub fn list_model_files(root: &Path, ignore: &[IgnoreRule]) -> LoaderResult<Vec<PathBuf>> {
    let root = resolve(root)?;
    let mut files = Vec::new();
    walk(&root, &mut files)?;
    let found = files.len();
    files.retain(|file| !ignore.iter().any(|rule| rule.matches(&root, file)));
    debug!(
        "found {} files under {}, {} ignored",
        found,
        root.display(),
        found - files.len()
    );
    Ok(files)
}

/// Absolute path with `.` and `..` folded lexically. Symlinks are left alone.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    Ok(normalize(&absolute(path)?))
}

fn resolve_lossy(path: &Path) -> PathBuf {
    absolute(path).map_or_else(|_| normalize(path), |abs| normalize(&abs))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}
