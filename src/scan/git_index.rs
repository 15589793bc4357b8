//! Tracked file listing from the repository index via libgit2.

use crate::domain::LocError;
use git2::Repository;
use std::path::{Component, Path, PathBuf};

const STAGE_MASK: u16 = 0x3000;

/// List index entries under `root`, re-rooted at `root`.
///
/// `root` may be the work tree itself or any directory inside it. Conflicted
/// paths appear once even though the index stores one entry per stage.
pub fn index_files(root: &Path) -> Result<Vec<String>, LocError> {
    let not_a_repo =
        |message: String| LocError::NotARepository { path: root.to_path_buf(), message };

    let repo = Repository::discover(root).map_err(|e| not_a_repo(e.message().to_string()))?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| not_a_repo("bare repository has no work tree".to_string()))?;

    let root_abs = root.canonicalize().map_err(|e| not_a_repo(e.to_string()))?;
    let workdir_abs = workdir.canonicalize().map_err(|e| not_a_repo(e.to_string()))?;
    let prefix = relative_prefix(&root_abs, &workdir_abs)
        .ok_or_else(|| not_a_repo(format!("outside work tree {}", workdir_abs.display())))?;

    let index = repo.index().map_err(|e| LocError::IndexUnreadable {
        path: root.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let mut paths: Vec<String> = Vec::with_capacity(index.len());
    for entry in index.iter() {
        let stage = (entry.flags & STAGE_MASK) >> 12;
        let path = String::from_utf8(entry.path).map_err(|e| {
            LocError::NonUtf8Path(String::from_utf8_lossy(e.as_bytes()).into_owned())
        })?;

        let Some(relative) = strip_prefix(&path, &prefix) else {
            continue;
        };
        if stage != 0 && paths.last().map(String::as_str) == Some(relative) {
            continue;
        }
        paths.push(relative.to_string());
    }

    tracing::debug!("Read {} index entries under '{}'", paths.len(), prefix);
    Ok(paths)
}

/// Slash-joined path of `root` relative to `workdir`, or `None` if outside it.
fn relative_prefix(root: &Path, workdir: &Path) -> Option<String> {
    let relative: PathBuf = root.strip_prefix(workdir).ok()?.to_path_buf();
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    path.strip_prefix(prefix)?.strip_prefix('/')
}
