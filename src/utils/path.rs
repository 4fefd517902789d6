//! Path utilities: expand ~, validate absolute paths, default file names.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// When `path` is an existing directory, place `default_name` inside it.
pub fn resolve_output(path: &str, default_name: &str) -> PathBuf {
    let p = expand_tilde(path);
    if Path::new(&p).is_dir() {
        p.join(default_name)
    } else {
        p
    }
}
