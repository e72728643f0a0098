use crate::prelude::*;

use enum_iterator::Sequence;

pub mod coord;
mod cubie;
mod facie;

pub use cubie::{CubieCube as Cube, MoveDef};
pub use facie::{parse_facelets, to_facelets, FaceletError, SOLVED_FACELETS};

pub const CORNERS: usize = 8;
pub const EDGES: usize = 12;

pub trait CubeLike: Sized + core::fmt::Debug + Eq {
    fn solved() -> Self;
    fn apply(self, move_: Move) -> Self;

    fn apply_all(self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves.into_iter().fold(self, |cube, m| cube.apply(m))
    }
}

/// Faces in facelet-string block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence)]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl Face {
    pub fn same_axis(a: Face, b: Face) -> bool {
        a == b || a.opposite() == b
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        enum_iterator::all::<Face>().find(|f| f.letter() == c)
    }
}

impl core::fmt::Display for Face {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Corner slots, and the pieces that belong in them when solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Corner {
    Urf,
    Ufl,
    Ulb,
    Ubr,
    Dfr,
    Dlf,
    Dbl,
    Drb,
}

/// Edge slots, and the pieces that belong in them when solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Edge {
    Ur,
    Uf,
    Ul,
    Ub,
    Dr,
    Df,
    Dl,
    Db,
    Fr,
    Fl,
    Bl,
    Br,
}

impl Corner {
    pub fn from_index(i: usize) -> Corner {
        enum_iterator::all::<Corner>()
            .nth(i)
            .unwrap_or_else(|| panic!("corner index {} out of range", i))
    }
}

impl Edge {
    pub fn from_index(i: usize) -> Edge {
        enum_iterator::all::<Edge>()
            .nth(i)
            .unwrap_or_else(|| panic!("edge index {} out of range", i))
    }
}

impl core::fmt::Display for Corner {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

impl core::fmt::Display for Edge {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}
