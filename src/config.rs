use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Resolves the directory the embedded data store lives in. An explicit CLI
/// override wins over the platform data directory.
pub fn resolve_data_path(custom: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = custom {
        debug!("Using custom data path: {path}");
        return Ok(PathBuf::from(path));
    }
    default_data_path()
}

pub fn default_data_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "outgo", "outgo")
        .context("Could not determine project directories")?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_path_wins() {
        let path = resolve_data_path(Some("/tmp/outgo-test")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/outgo-test"));
    }

    #[test]
    fn test_default_path_is_resolvable() {
        // Only asserts the platform lookup itself works.
        assert!(default_data_path().is_ok());
    }
}
