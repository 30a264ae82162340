use anyhow::Result;
use cvscrub_config::{Config, PROJECT_FILE};
use std::path::{Path, PathBuf};

pub async fn handle(force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let path = init_in(&current_dir, force)?;

    println!("✓ Created {}", path.display());
    println!("  Add villages, employers and schools to local_terms");

    Ok(())
}

/// Write a default config into `dir`
pub fn init_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(PROJECT_FILE);

    if path.exists() && !force {
        anyhow::bail!("{} already exists in {}", PROJECT_FILE, dir.display());
    }

    Config::default().save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_in(dir.path(), false).unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.brands, Config::default().brands);
        assert!(config.salt.is_none());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "salt = \"keep\"\n").unwrap();

        assert!(init_in(dir.path(), false).is_err());
        init_in(dir.path(), true).unwrap();

        let config = Config::from_path(&dir.path().join(PROJECT_FILE)).unwrap();
        assert!(config.salt.is_none());
    }
}
