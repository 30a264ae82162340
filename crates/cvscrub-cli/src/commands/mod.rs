pub mod init;
pub mod restore;
pub mod scrub;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files under `dir` whose name matches `pattern`, sorted.
///
/// Only immediate children unless `recursive`.
pub fn collect_inputs(dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(pattern)
        .with_context(|| format!("Invalid file pattern: {}", pattern))?;
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).max_depth(max_depth) {
        let entry = entry?;
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| pattern.matches(name));

        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }

    // Sort for determinism
    files.sort();

    Ok(files)
}

/// `<out_dir>/<relative dirs>/<stem>.scrubbed.txt` for an input found under `root`
pub fn scrubbed_path(out_dir: &Path, root: &Path, input: &Path) -> PathBuf {
    let relative = input.strip_prefix(root).unwrap_or(input);
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    out_dir
        .join(parent)
        .join(format!("{}.scrubbed.txt", file_stem(input)))
}

/// `<stem>.mapping.json` beside `path`, dropping a `.scrubbed` suffix from the stem
pub fn mapping_path(path: &Path) -> PathBuf {
    let stem = file_stem(path);
    let stem = stem.strip_suffix(".scrubbed").unwrap_or(&stem);
    path.with_file_name(format!("{}.mapping.json", stem))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}
