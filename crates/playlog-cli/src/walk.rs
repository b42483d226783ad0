//! Recursive enumeration of the JSON files under a data root.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

/// All `*.json` files under `root`, recursively, sorted lexicographically
/// by path so every run visits files in the same order.
pub fn json_files(root: &Path) -> io::Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  collect(root, &mut files)?;
  files.sort();
  Ok(files)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if entry.file_type()?.is_dir() {
      collect(&path, files)?;
    } else if path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
      files.push(path);
    }
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
