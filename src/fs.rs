use std::env;
use std::path::{Path, PathBuf};
use anyhow::Result;

pub fn expand_home(path: &str) -> Result<PathBuf> {
    let expanded_path = if let Some(rest) = path.strip_prefix("~/") {
        let home = match dirs::home_dir() {
            Some(home) => home,
            None => PathBuf::from(env::var("HOME")?),
        };
        home.join(rest)
    } else {
        PathBuf::from(path)
    };
    Ok(expanded_path)
}

/// Joins a root-relative path onto `root`, one segment at a time.
///
/// Both `/` and `\` separate segments and empty segments are dropped, so
/// `"/wp-admin//x.php"` resolves to `root/wp-admin/x.php` rather than
/// replacing the root.
pub fn join_root(root: &Path, relative: &str) -> PathBuf {
    let mut joined = root.to_path_buf();
    for segment in relative.split(['/', '\\']).filter(|s| !s.is_empty()) {
        joined.push(segment);
    }
    joined
}

/// Like [`join_root`], but refuses relative paths containing a `..`
/// segment, which could name something outside the root.
pub fn join_within_root(root: &Path, relative: &str) -> Option<PathBuf> {
    if relative.split(['/', '\\']).any(|s| s == "..") {
        return None;
    }
    Some(join_root(root, relative))
}
