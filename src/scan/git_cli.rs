//! Tracked file listing through the `git` executable.

use crate::domain::LocError;
use std::path::Path;
use std::process::Command;

/// Run `git ls-files -z` in `root` and return the listed paths.
///
/// Paths are relative to `root` and keep the order git reports them in.
pub fn ls_files(root: &Path) -> Result<Vec<String>, LocError> {
    let output = Command::new("git")
        .args(["ls-files", "-z"])
        .current_dir(root)
        .output()
        .map_err(|source| LocError::GitUnavailable { path: root.to_path_buf(), source })?;

    if !output.status.success() {
        return Err(LocError::ListingFailed {
            path: root.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_nul_separated(&output.stdout)
}

/// Split NUL-separated listing output, dropping empty entries.
pub fn parse_nul_separated(stdout: &[u8]) -> Result<Vec<String>, LocError> {
    stdout
        .split(|&b| b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            std::str::from_utf8(entry)
                .map(str::to_string)
                .map_err(|_| LocError::NonUtf8Path(String::from_utf8_lossy(entry).into_owned()))
        })
        .collect()
}
