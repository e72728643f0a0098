use crate::prelude::*;

use anyhow::Context;
use std::{path::PathBuf, sync::Arc};

mod cache;
pub use cache::*;

mod ida_star;
pub use ida_star::*;

mod naive_iddfs;
pub use naive_iddfs::*;

mod pattern;
pub use pattern::*;

/// Every cube is solvable in this many moves.
pub const GODS_NUMBER: u8 = 20;

pub trait Solver {
    /// A shortest move sequence that solves `cube`, if one exists within the
    /// solver's depth limit.
    fn solve(&self, cube: &Cube) -> Option<Vec<Move>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Directory holding the persisted pattern tables.
    pub cache_dir: PathBuf,
    /// Deepest IDA* threshold attempted. Never below [`GODS_NUMBER`] when read
    /// from the environment.
    pub max_depth: u8,
    pub log_level: log::LevelFilter,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            cache_dir: PathBuf::from("pdb"),
            max_depth: GODS_NUMBER,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl SolverConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `IDACUBE_CACHE_DIR`, `IDACUBE_MAX_DEPTH` and `IDACUBE_LOG` through
    /// `lookup`, keeping defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = SolverConfig::default();

        if let Some(dir) = lookup("IDACUBE_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(depth) = lookup("IDACUBE_MAX_DEPTH") {
            config.max_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("IDACUBE_MAX_DEPTH={:?} is not a move count", depth))?;
            anyhow::ensure!(
                config.max_depth >= GODS_NUMBER,
                "IDACUBE_MAX_DEPTH={} would leave some cubes unsolvable, use at least {}",
                config.max_depth,
                GODS_NUMBER
            );
        }
        if let Some(level) = lookup("IDACUBE_LOG") {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("IDACUBE_LOG={:?} is not a log level", level))?;
        }

        Ok(config)
    }
}

/// Facelets in, moves out.
pub struct CubeSolver {
    search: IdaStar,
}

impl CubeSolver {
    /// Loads the pattern tables from the configured cache, building and
    /// storing any that are missing. Building takes a while.
    pub fn new(config: &SolverConfig) -> anyhow::Result<Self> {
        let database = PatternDatabase::load_or_build(&TableCache::new(&config.cache_dir))?;
        Ok(Self::with_database(Arc::new(database), config.max_depth))
    }

    /// `max_depth` below [`GODS_NUMBER`] makes [`CubeSolver::solve_cube`]
    /// panic on cubes further away than that.
    pub fn with_database(database: Arc<PatternDatabase>, max_depth: u8) -> Self {
        CubeSolver {
            search: IdaStar::new(database, max_depth),
        }
    }

    pub fn solve_cube(&self, cube: &Cube) -> Vec<Move> {
        match self.search.solve(cube) {
            Some(moves) => moves,
            None => {
                // Every valid cube is solvable within GODS_NUMBER moves.
                log::error!(
                    "No solution within {} moves for a valid cube:\n{}",
                    self.search.max_depth(),
                    cube
                );
                panic!(
                    "no solution within {} moves for {}",
                    self.search.max_depth(),
                    to_facelets(cube)
                );
            }
        }
    }

    pub fn solve(&self, facelets: &str) -> Result<Vec<Move>, FaceletError> {
        let cube = parse_facelets(facelets)?;
        Ok(self.solve_cube(&cube))
    }

    pub fn solve_to_string(&self, facelets: &str) -> Result<String, FaceletError> {
        self.solve(facelets).map(|moves| format_moves(&moves))
    }
}
