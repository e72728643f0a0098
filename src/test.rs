use crate::prelude::*;

use std::sync::Arc;

lazy_static::lazy_static! {
    /// Built once per test binary; tables are pure functions of the move set.
    pub static ref DATABASE: Arc<PatternDatabase> = Arc::new(PatternDatabase::build());
}

pub fn cube_with_moves(moves: &str) -> Cube {
    Cube::solved().apply_all(Move::parse_sequence(moves).unwrap())
}
