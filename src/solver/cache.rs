use crate::prelude::*;

use anyhow::Context;
use std::{fs, path::PathBuf};

/// A directory of persisted pattern tables, one `<name>.pdb` file each.
///
/// Tables are deterministic, so a missing or damaged file is simply rebuilt.
#[derive(Debug, Clone)]
pub struct TableCache {
    dir: PathBuf,
}

impl TableCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TableCache { dir: dir.into() }
    }

    pub fn path_for<P: Projection>(&self) -> PathBuf {
        self.dir.join(format!("{}.pdb", P::NAME))
    }

    pub fn load_or_build<P: Projection>(&self) -> anyhow::Result<PatternTable> {
        let path = self.path_for::<P>();

        if path.exists() {
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read pattern table {}", path.display()))?;
            match PatternTable::from_bytes::<P>(bytes) {
                Some(table) => {
                    log::info!("Loaded pattern table {} from {}", P::NAME, path.display());
                    return Ok(table);
                }
                None => log::warn!("Discarding malformed pattern table {}", path.display()),
            }
        }

        let table = PatternTable::build::<P>();
        self.store(&path, &table)?;
        Ok(table)
    }

    fn store(&self, path: &std::path::Path, table: &PatternTable) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory {}", self.dir.display()))?;

        // Written under a temporary name so readers never see a partial table.
        let partial = path.with_extension("pdb.partial");
        fs::write(&partial, table.as_bytes())
            .with_context(|| format!("Failed to write pattern table {}", partial.display()))?;
        fs::rename(&partial, path)
            .with_context(|| format!("Failed to move pattern table to {}", path.display()))?;

        log::info!("Stored pattern table {} in {}", table.name(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("idacube-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn builds_then_loads() {
        let dir = scratch_dir("builds-then-loads");
        let cache = TableCache::new(&dir);

        let built = cache.load_or_build::<CornerOrientation>().unwrap();
        let path = cache.path_for::<CornerOrientation>();
        assert_eq!(fs::read(&path).unwrap().len(), 2187);

        let loaded = cache.load_or_build::<CornerOrientation>().unwrap();
        assert_eq!(built, loaded);
        assert_eq!(loaded.as_bytes(), DATABASE.tables()[0].as_bytes());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rebuilds_truncated_file() {
        let dir = scratch_dir("rebuilds-truncated");
        let cache = TableCache::new(&dir);
        let path = cache.path_for::<EdgeOrientation>();

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, [0u8; 100]).unwrap();

        let table = cache.load_or_build::<EdgeOrientation>().unwrap();
        assert!(table.is_complete());
        assert_eq!(fs::read(&path).unwrap().len(), 2048);
        assert!(!path.with_extension("pdb.partial").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_names() {
        let cache = TableCache::new("tables");
        assert_eq!(
            cache.path_for::<FirstEdges>(),
            PathBuf::from("tables/edges_first_half.pdb")
        );
        assert_eq!(
            cache.path_for::<SecondEdges>(),
            PathBuf::from("tables/edges_second_half.pdb")
        );
    }
}
