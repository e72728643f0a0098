use crate::prelude::*;

use smallvec::SmallVec;
use std::sync::Arc;

/// Moves worth trying after each move, with a final row for the empty path.
type Followers = SmallVec<[Move; MOVE_COUNT]>;

lazy_static::lazy_static! {
    static ref FOLLOWERS: Vec<Followers> = {
        let mut rows = Move::all()
            .map(|last| Move::all().filter(|m| m.could_follow(&last)).collect())
            .collect::<Vec<Followers>>();
        rows.push(Move::all().collect());
        rows
    };
}

pub fn allowed_after(last: Option<Move>) -> &'static [Move] {
    &FOLLOWERS[last.map_or(MOVE_COUNT, Move::index)]
}

/// Iterative-deepening A* over the pattern database heuristic.
pub struct IdaStar {
    database: Arc<PatternDatabase>,
    max_depth: u8,
}

enum Search {
    NotFound(u32),
    Found(Vec<Move>),
}

/// Mutable state of one solve. Never shared between searches.
struct Frame {
    cube: Cube,
    path: SmallVec<[Move; 24]>,
    scratch: [u8; EDGES],
    nodes: u64,
}

impl IdaStar {
    pub fn new(database: Arc<PatternDatabase>, max_depth: u8) -> Self {
        IdaStar {
            database,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    fn find_solution(
        &self,
        frame: &mut Frame,
        g: u32,
        threshold: u32,
        last: Option<Move>,
    ) -> Search {
        frame.nodes += 1;

        let h = self.database.heuristic(&frame.cube, &mut frame.scratch) as u32;
        let f = g + h;
        if f > threshold {
            return Search::NotFound(f);
        }
        if h == 0 {
            return Search::Found(frame.path.to_vec());
        }

        let mut best = u32::MAX;
        for &move_ in allowed_after(last) {
            frame.cube.apply_mut(move_);
            frame.path.push(move_);
            let sub = self.find_solution(frame, g + 1, threshold, Some(move_));
            frame.path.pop();
            frame.cube.undo(move_);

            match sub {
                Search::Found(moves) => return Search::Found(moves),
                Search::NotFound(bound) => best = best.min(bound),
            }
        }
        Search::NotFound(best)
    }
}

impl Solver for IdaStar {
    fn solve(&self, cube: &Cube) -> Option<Vec<Move>> {
        let mut frame = Frame {
            cube: cube.clone(),
            path: SmallVec::new(),
            scratch: [0; EDGES],
            nodes: 0,
        };

        let mut threshold = self.database.heuristic(&frame.cube, &mut frame.scratch) as u32;
        loop {
            if threshold > self.max_depth as u32 {
                log::warn!("Gave up above {} moves", self.max_depth);
                return None;
            }

            log::info!("Searching <= {} moves", threshold);
            match self.find_solution(&mut frame, 0, threshold, None) {
                Search::Found(moves) => {
                    log::info!(
                        "Found {} move solution after {} nodes",
                        moves.len(),
                        frame.nodes
                    );
                    return Some(moves);
                }
                Search::NotFound(u32::MAX) => return None,
                Search::NotFound(next) => {
                    log::debug!("{} nodes visited so far", frame.nodes);
                    threshold = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::time::{Duration, Instant};

    fn ida() -> IdaStar {
        IdaStar::new(Arc::clone(&*DATABASE), 20)
    }

    #[cfg(test)]
    mod followers {
        use super::*;

        #[test]
        fn root_allows_everything() {
            assert_eq!(allowed_after(None).len(), MOVE_COUNT);
        }

        #[test]
        fn never_repeats_face() {
            for last in Move::all() {
                assert!(allowed_after(Some(last)).iter().all(|m| m.face != last.face));
                assert!(!allowed_after(Some(last)).contains(&last));
            }
        }

        #[test]
        fn one_order_per_opposite_pair() {
            for a in Move::all() {
                for b in Move::all().filter(|b| b.face == a.face.opposite()) {
                    let forward = allowed_after(Some(a)).contains(&b);
                    let backward = allowed_after(Some(b)).contains(&a);
                    assert!(forward != backward, "{} {}", a, b);
                }
            }
        }

        #[test]
        fn branching_factor() {
            let sizes = Move::all()
                .map(|m| allowed_after(Some(m)).len())
                .collect::<Vec<_>>();
            assert!(sizes.iter().all(|&n| n == 12 || n == 15));
        }
    }

    #[test]
    fn solved_needs_no_moves() {
        assert_eq!(ida().solve(&Cube::solved()), Some(Vec::new()));
    }

    #[test]
    fn single_moves_take_one_move() {
        for m in Move::all() {
            let cube = Cube::solved().apply(m);
            let solution = ida().solve(&cube).unwrap();
            assert_eq!(solution, vec![m.reverse()], "{}", m);
            assert_eq!(Cube::solved().apply(solution[0].reverse()), cube);
        }
    }

    #[test]
    fn opposite_faces_solve_in_two() {
        let cube = cube_with_moves("U D'");
        let solution = ida().solve(&cube).unwrap();
        assert_eq!(solution.len(), 2);
        assert!(cube.apply_all(solution).is_solved());
    }

    fn random_scramble(rng: &mut StdRng, length: usize) -> Vec<Move> {
        (0..length)
            .map(|_| Move::from_index(rng.gen_range(0, MOVE_COUNT)))
            .collect()
    }

    #[test]
    fn seven_move_scrambles() {
        let ida = ida();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..3 {
            let scramble = random_scramble(&mut rng, 7);
            let cube = Cube::solved().apply_all(scramble.iter().copied());

            let start = Instant::now();
            let solution = ida.solve(&cube).unwrap();
            let elapsed = start.elapsed();
            assert!(
                elapsed < Duration::from_secs(1),
                "{} took {:?}",
                format_moves(&scramble),
                elapsed
            );
            assert!(
                solution.len() <= 7,
                "{} -> {}",
                format_moves(&scramble),
                format_moves(&solution)
            );
            assert!(cube.apply_all(solution).is_solved());
        }
    }

    #[test]
    #[ignore = "takes tens of seconds"]
    fn twelve_move_scramble() {
        let ida = ida();
        let mut rng = StdRng::seed_from_u64(12);
        let scramble = random_scramble(&mut rng, 12);
        let cube = Cube::solved().apply_all(scramble.iter().copied());

        let start = Instant::now();
        let solution = ida.solve(&cube).unwrap();
        assert!(start.elapsed() < Duration::from_secs(120));
        assert!(solution.len() <= 12);
        assert!(cube.apply_all(solution).is_solved());
    }

    #[test]
    fn gives_up_past_max_depth() {
        let cube = cube_with_moves("R U F");
        assert_eq!(IdaStar::new(Arc::clone(&*DATABASE), 2).solve(&cube), None);
    }

    // Pruning never costs optimality: compare with the unpruned search.
    #[quickcheck]
    fn matches_brute_force(moves: Vec<Move>) -> bool {
        let cube = Cube::solved().apply_all(moves.into_iter().take(4));

        let optimal = NaiveIddfs::new(4).solve(&cube).unwrap();
        let found = ida().solve(&cube).unwrap();
        found.len() == optimal.len() && cube.apply_all(found).is_solved()
    }
}
