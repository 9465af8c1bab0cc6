use std::path::Path;
use anyhow::{Context, Result};
use tracing::info;
use crate::known::{ensure_root, resolve_source, SourceKind};

pub fn execute(root: &Path, source: SourceKind, list: Option<&Path>) -> Result<()> {
    ensure_root(root)?;
    let source = resolve_source(source, root, list)?;
    let known = source
        .load()
        .with_context(|| format!("Failed to load known paths from {}", source.describe()))?;
    info!("{} known paths from {}", known.len(), source.describe());
    for path in &known {
        println!("{}", path);
    }
    Ok(())
}
