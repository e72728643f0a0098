use crate::cube::coord::{self, EDGE_SUBSET};
use crate::prelude::*;

use std::time::Instant;

/// Marks entries the breadth-first fill has not reached yet.
pub const UNVISITED: u8 = u8::MAX;

/// A simplification of the cube whose states can be ranked densely.
pub trait Projection {
    const NAME: &'static str;
    const SIZE: usize;
    type Coord: Copy;

    fn project(cube: &Cube) -> Self::Coord;
    fn step(coord: &Self::Coord, def: &MoveDef) -> Self::Coord;
    fn index(coord: &Self::Coord) -> usize;
}

pub struct CornerOrientation;

impl Projection for CornerOrientation {
    const NAME: &'static str = "corner_orientation";
    const SIZE: usize = coord::CORNER_ORIENTATIONS;
    type Coord = [u8; CORNERS];

    fn project(cube: &Cube) -> Self::Coord {
        *cube.corner_orientation()
    }

    fn step(co: &Self::Coord, def: &MoveDef) -> Self::Coord {
        let mut out = [0; CORNERS];
        for i in 0..CORNERS {
            out[i] = (co[def.cp[i] as usize] + def.co[i]) % 3;
        }
        out
    }

    fn index(co: &Self::Coord) -> usize {
        coord::corner_orientation(co)
    }
}

pub struct EdgeOrientation;

impl Projection for EdgeOrientation {
    const NAME: &'static str = "edge_orientation";
    const SIZE: usize = coord::EDGE_ORIENTATIONS;
    type Coord = [u8; EDGES];

    fn project(cube: &Cube) -> Self::Coord {
        *cube.edge_orientation()
    }

    fn step(eo: &Self::Coord, def: &MoveDef) -> Self::Coord {
        let mut out = [0; EDGES];
        for i in 0..EDGES {
            out[i] = (eo[def.ep[i] as usize] + def.eo[i]) % 2;
        }
        out
    }

    fn index(eo: &Self::Coord) -> usize {
        coord::edge_orientation(eo)
    }
}

pub struct CornerPosition;

impl Projection for CornerPosition {
    const NAME: &'static str = "corner_position";
    const SIZE: usize = coord::CORNER_POSITIONS;
    type Coord = [u8; CORNERS];

    fn project(cube: &Cube) -> Self::Coord {
        *cube.corner_permutation()
    }

    fn step(cp: &Self::Coord, def: &MoveDef) -> Self::Coord {
        def.cp.map(|from| cp[from as usize])
    }

    fn index(cp: &Self::Coord) -> usize {
        coord::corner_position(cp)
    }
}

/// Slots of the six edge pieces starting at `FIRST`, ignoring all others.
pub struct EdgeSubset<const FIRST: usize>;

pub type FirstEdges = EdgeSubset<0>;
pub type SecondEdges = EdgeSubset<{ EDGE_SUBSET }>;

impl<const FIRST: usize> Projection for EdgeSubset<FIRST> {
    const NAME: &'static str = if FIRST == 0 {
        "edges_first_half"
    } else {
        "edges_second_half"
    };
    const SIZE: usize = coord::EDGE_SUBSET_POSITIONS;
    type Coord = [u8; EDGE_SUBSET];

    fn project(cube: &Cube) -> Self::Coord {
        let mut slots = [0; EDGE_SUBSET];
        for (slot, &piece) in cube.edge_permutation().iter().enumerate() {
            let piece = piece as usize;
            if (FIRST..FIRST + EDGE_SUBSET).contains(&piece) {
                slots[piece - FIRST] = slot as u8;
            }
        }
        slots
    }

    fn step(slots: &Self::Coord, def: &MoveDef) -> Self::Coord {
        slots.map(|slot| def.edge_dest[slot as usize])
    }

    fn index(slots: &Self::Coord) -> usize {
        coord::edge_subset_index(slots)
    }
}

/// Exact distances to solved for every state of one projection.
#[derive(Clone, PartialEq, Eq)]
pub struct PatternTable {
    name: &'static str,
    distances: Box<[u8]>,
}

impl PatternTable {
    pub fn build<P: Projection>() -> Self {
        let start = Instant::now();
        log::info!("Populating pattern table {}", P::NAME);

        let moves = Move::all().map(Move::definition).collect::<Vec<_>>();
        let mut distances = vec![UNVISITED; P::SIZE].into_boxed_slice();

        let solved = P::project(&Cube::solved());
        distances[P::index(&solved)] = 0;
        let mut frontier = vec![solved];
        let mut reached = 1;
        let mut depth = 0;

        while !frontier.is_empty() {
            log::info!(
                "{}: Expanding depth {}, {} of {} entries",
                P::NAME,
                depth,
                reached,
                P::SIZE
            );

            let mut next = Vec::new();
            for from in &frontier {
                for def in &moves {
                    let to = P::step(from, def);
                    let i = P::index(&to);
                    if distances[i] == UNVISITED {
                        distances[i] = depth + 1;
                        next.push(to);
                    }
                }
            }

            reached += next.len();
            frontier = next;
            depth += 1;
        }

        log::info!(
            "Finished populating pattern table {}, {} entries up to depth {}, took {:?}",
            P::NAME,
            reached,
            depth - 1,
            start.elapsed()
        );

        PatternTable {
            name: P::NAME,
            distances,
        }
    }

    /// Accepts previously persisted bytes if they form a complete table.
    pub fn from_bytes<P: Projection>(bytes: Vec<u8>) -> Option<Self> {
        let table = PatternTable {
            name: P::NAME,
            distances: bytes.into_boxed_slice(),
        };
        let solved = P::index(&P::project(&Cube::solved()));
        if table.len() != P::SIZE || !table.is_complete() || table.get(solved) != 0 {
            return None;
        }
        Some(table)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.distances[index]
    }

    pub fn is_complete(&self) -> bool {
        !self.distances.contains(&UNVISITED)
    }

    pub fn deepest(&self) -> u8 {
        self.distances.iter().copied().max().unwrap_or(0)
    }
}

impl core::fmt::Debug for PatternTable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("PatternTable")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("deepest", &self.deepest())
            .finish()
    }
}

/// The five pattern tables whose maximum bounds the moves left to solve.
///
/// Read-only once built, so one database can back any number of concurrent
/// searches.
#[derive(Debug)]
pub struct PatternDatabase {
    corner_orientation: PatternTable,
    edge_orientation: PatternTable,
    corner_position: PatternTable,
    first_edges: PatternTable,
    second_edges: PatternTable,
}

impl PatternDatabase {
    pub fn build() -> Self {
        PatternDatabase {
            corner_orientation: PatternTable::build::<CornerOrientation>(),
            edge_orientation: PatternTable::build::<EdgeOrientation>(),
            corner_position: PatternTable::build::<CornerPosition>(),
            first_edges: PatternTable::build::<FirstEdges>(),
            second_edges: PatternTable::build::<SecondEdges>(),
        }
    }

    pub fn load_or_build(cache: &TableCache) -> anyhow::Result<Self> {
        Ok(PatternDatabase {
            corner_orientation: cache.load_or_build::<CornerOrientation>()?,
            edge_orientation: cache.load_or_build::<EdgeOrientation>()?,
            corner_position: cache.load_or_build::<CornerPosition>()?,
            first_edges: cache.load_or_build::<FirstEdges>()?,
            second_edges: cache.load_or_build::<SecondEdges>()?,
        })
    }

    pub fn tables(&self) -> [&PatternTable; 5] {
        [
            &self.corner_orientation,
            &self.edge_orientation,
            &self.corner_position,
            &self.first_edges,
            &self.second_edges,
        ]
    }

    /// Admissible lower bound on the moves needed to solve `cube`.
    ///
    /// `scratch` receives the inverse edge permutation and must not be shared
    /// between concurrent callers.
    #[inline]
    pub fn heuristic(&self, cube: &Cube, scratch: &mut [u8; EDGES]) -> u8 {
        for (slot, &piece) in cube.edge_permutation().iter().enumerate() {
            scratch[piece as usize] = slot as u8;
        }

        let co = self
            .corner_orientation
            .get(coord::corner_orientation(cube.corner_orientation()));
        let eo = self
            .edge_orientation
            .get(coord::edge_orientation(cube.edge_orientation()));
        let cp = self
            .corner_position
            .get(coord::corner_position(cube.corner_permutation()));
        let first = self.first_edges.get(coord::partial_permutation_rank(
            &scratch[..EDGE_SUBSET],
            EDGES,
        ));
        let second = self.second_edges.get(coord::partial_permutation_rank(
            &scratch[EDGE_SUBSET..],
            EDGES,
        ));

        co.max(eo).max(cp).max(first).max(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<P: Projection>(table: &PatternTable, cube: &Cube) -> u8 {
        table.get(P::index(&P::project(cube)))
    }

    #[test]
    fn tables_are_complete() {
        for table in DATABASE.tables() {
            assert!(table.is_complete(), "{:?}", table);
        }
    }

    #[test]
    fn table_sizes() {
        let sizes = DATABASE.tables().map(|t| t.len());
        assert_eq!(sizes, [2187, 2048, 40320, 665280, 665280]);
    }

    #[test]
    fn solved_projections_are_zero() {
        let solved = Cube::solved();
        assert_eq!(lookup::<CornerOrientation>(&DATABASE.corner_orientation, &solved), 0);
        assert_eq!(lookup::<EdgeOrientation>(&DATABASE.edge_orientation, &solved), 0);
        assert_eq!(lookup::<CornerPosition>(&DATABASE.corner_position, &solved), 0);
        assert_eq!(lookup::<FirstEdges>(&DATABASE.first_edges, &solved), 0);
        assert_eq!(lookup::<SecondEdges>(&DATABASE.second_edges, &solved), 0);
        assert_eq!(DATABASE.heuristic(&solved, &mut [0; EDGES]), 0);
    }

    #[test]
    fn known_table_depths() {
        assert_eq!(DATABASE.corner_orientation.deepest(), 6);
        assert_eq!(DATABASE.edge_orientation.deepest(), 7);
    }

    #[test]
    fn single_move_is_one() {
        for m in Move::all() {
            let cube = Cube::solved().apply(m);
            assert_eq!(DATABASE.heuristic(&cube, &mut [0; EDGES]), 1, "{}", m);
        }
    }

    #[test]
    fn half_turn_keeps_orientation() {
        let cube = cube_with_moves("R2");
        assert_eq!(lookup::<CornerOrientation>(&DATABASE.corner_orientation, &cube), 0);
        assert_eq!(lookup::<EdgeOrientation>(&DATABASE.edge_orientation, &cube), 0);
    }

    #[test]
    fn projected_step_matches_cubie_move() {
        let cube = cube_with_moves("R U2 F' L D B'");
        for m in Move::all() {
            let moved = cube.clone().apply(m);
            let def = m.definition();
            assert_eq!(
                FirstEdges::step(&FirstEdges::project(&cube), def),
                FirstEdges::project(&moved)
            );
            assert_eq!(
                SecondEdges::step(&SecondEdges::project(&cube), def),
                SecondEdges::project(&moved)
            );
            assert_eq!(
                CornerOrientation::step(&CornerOrientation::project(&cube), def),
                CornerOrientation::project(&moved)
            );
            assert_eq!(
                EdgeOrientation::step(&EdgeOrientation::project(&cube), def),
                EdgeOrientation::project(&moved)
            );
            assert_eq!(
                CornerPosition::step(&CornerPosition::project(&cube), def),
                CornerPosition::project(&moved)
            );
        }
    }

    #[test]
    fn rejects_incomplete_bytes() {
        let mut bytes = DATABASE.corner_orientation.as_bytes().to_vec();
        assert!(PatternTable::from_bytes::<CornerOrientation>(bytes.clone()).is_some());

        bytes[5] = UNVISITED;
        assert!(PatternTable::from_bytes::<CornerOrientation>(bytes.clone()).is_none());

        bytes.pop();
        assert!(PatternTable::from_bytes::<CornerOrientation>(bytes).is_none());
    }

    #[quickcheck]
    fn never_overestimates(moves: Vec<Move>) -> bool {
        let cube = Cube::solved().apply_all(moves.iter().copied());
        DATABASE.heuristic(&cube, &mut [0; EDGES]) as usize <= moves.len()
    }

    #[quickcheck]
    fn moves_change_estimate_by_at_most_one(moves: Vec<Move>, m: Move) -> bool {
        let cube = Cube::solved().apply_all(moves);
        let before = DATABASE.heuristic(&cube, &mut [0; EDGES]) as i32;
        let after = DATABASE.heuristic(&cube.apply(m), &mut [0; EDGES]) as i32;
        (before - after).abs() <= 1
    }
}
