use crate::cube::*;

use enum_iterator::Sequence;

pub const MOVE_COUNT: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum Direction {
    Single,
    Double,
    Reverse,
}

impl Move {
    pub fn all() -> impl Iterator<Item = Move> {
        enum_iterator::all::<Face>().flat_map(|face| {
            enum_iterator::all::<Direction>().map(move |direction| Move { face, direction })
        })
    }

    pub fn parse_sequence(s: &str) -> anyhow::Result<Vec<Move>> {
        s.split_whitespace().map(|s| s.parse()).collect()
    }

    /// Dense index in `0..MOVE_COUNT`, matching the order of [`Move::all`].
    pub fn index(self) -> usize {
        self.face as usize * 3 + self.direction as usize
    }

    pub fn from_index(index: usize) -> Move {
        Move::all()
            .nth(index)
            .unwrap_or_else(|| panic!("move index {} out of range", index))
    }

    pub fn reverse(self) -> Move {
        let direction = match self.direction {
            Direction::Single => Direction::Reverse,
            Direction::Double => Direction::Double,
            Direction::Reverse => Direction::Single,
        };
        Move { direction, ..self }
    }

    /// Whether `self` may directly follow `last` in a search path.
    ///
    /// Turning the same face twice in a row is never useful, and opposite faces
    /// commute so only one of their two orderings is explored.
    pub fn could_follow(&self, last: &Move) -> bool {
        if self.face == last.face {
            return false;
        }
        !(Face::same_axis(self.face, last.face) && self.face < last.face)
    }
}

pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl core::str::FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Move> {
        let mut chars = s.chars();
        let face_char = match chars.next() {
            Some(c) => c,
            None => return Err(anyhow::anyhow!("No face for move")),
        };

        let face = match Face::from_letter(face_char.to_ascii_uppercase()) {
            Some(f) => f,
            None => return Err(anyhow::anyhow!("Unrecognized face {}", face_char)),
        };

        let direction = match chars.next() {
            None => Direction::Single,
            Some('\'') => Direction::Reverse,
            Some('2') => Direction::Double,
            Some(c) => return Err(anyhow::anyhow!("Unrecognized direction {}", c)),
        };

        if let Some(c) = chars.next() {
            return Err(anyhow::anyhow!("Trailing character {} in move {}", c, s));
        }

        Ok(Move { face, direction })
    }
}

impl core::fmt::Display for Move {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let suffix = match self.direction {
            Direction::Single => "",
            Direction::Double => "2",
            Direction::Reverse => "'",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Move {
    fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
        use rand::Rng;
        Move::from_index(g.gen_range(0, MOVE_COUNT))
    }
}
