use crate::prelude::*;

/// Unpruned iterative deepening over all 18 moves.
///
/// Exponentially slower than [`IdaStar`]; kept as a reference for checking
/// that move pruning and the heuristic never lose a shorter solution.
pub struct NaiveIddfs {
    max_depth: u8,
}

impl NaiveIddfs {
    pub fn new(max_depth: u8) -> Self {
        NaiveIddfs { max_depth }
    }

    fn find_solution(&self, remaining_moves: u8, cube: &Cube) -> Option<Vec<Move>> {
        if remaining_moves == 0 {
            if cube.is_solved() {
                return Some(Vec::new());
            } else {
                return None;
            }
        }

        Move::all().find_map(|move_| {
            let c = cube.clone().apply(move_);
            self.find_solution(remaining_moves - 1, &c).map(|mut v| {
                v.insert(0, move_);
                v
            })
        })
    }
}

impl super::Solver for NaiveIddfs {
    fn solve(&self, cube: &Cube) -> Option<Vec<Move>> {
        (0..=self.max_depth).find_map(|move_depth| self.find_solution(move_depth, cube))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_is_empty() {
        assert_eq!(NaiveIddfs::new(3).solve(&Cube::solved()), Some(Vec::new()));
    }

    #[test]
    fn finds_shortest() {
        let cube = cube_with_moves("R U R'");
        let solution = NaiveIddfs::new(3).solve(&cube).unwrap();
        assert_eq!(solution.len(), 3);
        assert!(cube.apply_all(solution).is_solved());
    }

    #[test]
    fn respects_depth_limit() {
        assert_eq!(NaiveIddfs::new(1).solve(&cube_with_moves("R U")), None);
    }
}
