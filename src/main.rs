//! repo-loc: Count lines of tracked files in a git repository
//!
//! Appends one JSON metric record per file, per directory and for the whole
//! repository to an output file.

use anyhow::Result;

fn main() -> Result<()> {
    repo_loc::cli::run()
}
