//! Path utilities.

use std::path::PathBuf;

/// Expand a leading `~` (alone or as `~/…`) to the home directory.
/// Other paths, and `~` when no home directory is known, are kept as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
