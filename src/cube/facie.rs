use crate::prelude::*;

use super::cubie::CubieCube;
use super::{Corner, Edge, CORNERS, EDGES};

use thiserror::Error;

pub const FACELETS: usize = 54;

pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Why a facelet string cannot describe an assembled cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    #[error("facelet string must be exactly 54 characters, got {0}")]
    WrongLength(usize),
    #[error("center facelets must show six distinct colors, found {0}")]
    DuplicateCenters(usize),
    #[error("character {character:?} at position {index} is not one of the center colors")]
    InvalidCharacter { index: usize, character: char },
    #[error("no corner piece has the colors found in corner slot {0}")]
    UnknownCorner(Corner),
    #[error("corner slot {0} shows its colors in mirrored order")]
    MirroredCorner(Corner),
    #[error("no edge piece has the colors found in edge slot {0}")]
    UnknownEdge(Edge),
    #[error("corner piece {0} appears more than once")]
    DuplicateCorner(Corner),
    #[error("edge piece {0} appears more than once")]
    DuplicateEdge(Edge),
    #[error("corner piece {0} is missing")]
    MissingCorner(Corner),
    #[error("edge piece {0} is missing")]
    MissingEdge(Edge),
    #[error("corner twists sum to {0}, which is not a multiple of 3")]
    CornerTwist(u32),
    #[error("edge flips sum to {0}, which is not a multiple of 2")]
    EdgeFlip(u32),
    #[error("corner and edge permutations have different parity")]
    ParityMismatch,
}

const CENTERS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Facelet positions of each corner slot, starting with its U or D sticker
/// and going clockwise.
const CORNER_FACELETS: [[usize; 3]; CORNERS] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// Facelet positions of each edge slot; the U/D sticker comes first, or the
/// F/B sticker for middle-layer slots.
const EDGE_FACELETS: [[usize; 2]; EDGES] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

const CORNER_COLORS: [[Face; 3]; CORNERS] = {
    use Face::*;
    [
        [Up, Right, Front],
        [Up, Front, Left],
        [Up, Left, Back],
        [Up, Back, Right],
        [Down, Front, Right],
        [Down, Left, Front],
        [Down, Back, Left],
        [Down, Right, Back],
    ]
};

const EDGE_COLORS: [[Face; 2]; EDGES] = {
    use Face::*;
    [
        [Up, Right],
        [Up, Front],
        [Up, Left],
        [Up, Back],
        [Down, Right],
        [Down, Front],
        [Down, Left],
        [Down, Back],
        [Front, Right],
        [Front, Left],
        [Back, Left],
        [Back, Right],
    ]
};

/// Reads a facelet string in U, R, F, D, L, B block order.
///
/// The letters on the six centers name the faces, so any six distinct
/// characters work as colors.
pub fn parse_facelets(s: &str) -> Result<CubieCube, FaceletError> {
    let chars = s.chars().collect::<Vec<_>>();
    if chars.len() != FACELETS {
        return Err(FaceletError::WrongLength(chars.len()));
    }

    let centers = CENTERS.map(|i| chars[i]);
    let mut distinct = centers.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() != centers.len() {
        return Err(FaceletError::DuplicateCenters(distinct.len()));
    }

    let faces = chars
        .iter()
        .enumerate()
        .map(|(index, &character)| {
            centers
                .iter()
                .position(|&c| c == character)
                .map(Face::from_block)
                .ok_or(FaceletError::InvalidCharacter { index, character })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut cube = CubieCube::solved();
    let mut seen_corners = [false; CORNERS];
    for (slot, positions) in CORNER_FACELETS.iter().enumerate() {
        let observed = positions.map(|p| faces[p]);
        let slot_name = Corner::from_index(slot);

        let piece = CORNER_COLORS
            .iter()
            .position(|colors| same_faces(colors, &observed))
            .ok_or(FaceletError::UnknownCorner(slot_name))?;
        let twist = observed
            .iter()
            .position(|f| matches!(f, Face::Up | Face::Down))
            .ok_or(FaceletError::UnknownCorner(slot_name))?;

        if observed[(twist + 1) % 3] != CORNER_COLORS[piece][1] {
            return Err(FaceletError::MirroredCorner(slot_name));
        }
        if std::mem::replace(&mut seen_corners[piece], true) {
            return Err(FaceletError::DuplicateCorner(Corner::from_index(piece)));
        }

        cube.cp[slot] = piece as u8;
        cube.co[slot] = twist as u8;
    }

    let mut seen_edges = [false; EDGES];
    for (slot, positions) in EDGE_FACELETS.iter().enumerate() {
        let observed = positions.map(|p| faces[p]);

        let piece = EDGE_COLORS
            .iter()
            .position(|colors| same_faces(colors, &observed))
            .ok_or(FaceletError::UnknownEdge(Edge::from_index(slot)))?;
        let flip = if observed[0] == EDGE_COLORS[piece][0] { 0 } else { 1 };

        if std::mem::replace(&mut seen_edges[piece], true) {
            return Err(FaceletError::DuplicateEdge(Edge::from_index(piece)));
        }

        cube.ep[slot] = piece as u8;
        cube.eo[slot] = flip;
    }

    cube.verify()?;
    Ok(cube)
}

/// The facelet string of `cube` using the letters `URFDLB`.
pub fn to_facelets(cube: &CubieCube) -> String {
    let mut facelets = [' '; FACELETS];

    for face in enum_iterator::all::<Face>() {
        facelets[CENTERS[face as usize]] = face.letter();
    }

    for (slot, positions) in CORNER_FACELETS.iter().enumerate() {
        let piece = cube.cp[slot] as usize;
        let twist = cube.co[slot] as usize;
        for (n, color) in CORNER_COLORS[piece].iter().enumerate() {
            facelets[positions[(n + twist) % 3]] = color.letter();
        }
    }

    for (slot, positions) in EDGE_FACELETS.iter().enumerate() {
        let piece = cube.ep[slot] as usize;
        let flip = cube.eo[slot] as usize;
        for (n, color) in EDGE_COLORS[piece].iter().enumerate() {
            facelets[positions[(n + flip) % 2]] = color.letter();
        }
    }

    facelets.iter().collect()
}

fn same_faces(piece: &[Face], observed: &[Face]) -> bool {
    piece.iter().all(|f| observed.contains(f)) && observed.iter().all(|f| piece.contains(f))
}

impl Face {
    fn from_block(block: usize) -> Face {
        enum_iterator::all::<Face>()
            .nth(block)
            .unwrap_or_else(|| panic!("no face block {}", block))
    }
}

impl core::str::FromStr for CubieCube {
    type Err = FaceletError;

    fn from_str(s: &str) -> Result<CubieCube, FaceletError> {
        parse_facelets(s)
    }
}

impl std::fmt::Display for CubieCube {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let facelets = to_facelets(self).chars().collect::<Vec<_>>();
        let row = |face: Face, r: usize| -> String {
            let start = face as usize * 9 + r * 3;
            facelets[start..start + 3].iter().collect()
        };

        for r in 0..3 {
            writeln!(f, "    {}", row(Face::Up, r))?;
        }
        for r in 0..3 {
            let sides = [Face::Left, Face::Front, Face::Right, Face::Back]
                .map(|face| row(face, r));
            writeln!(f, "{}", sides.join(" "))?;
        }
        for r in 0..3 {
            writeln!(f, "    {}", row(Face::Down, r))?;
        }

        Ok(())
    }
}
