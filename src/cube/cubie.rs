use crate::prelude::*;

use super::{Corner, Edge, CORNERS, EDGES};

/// A cube at the level of its pieces.
///
/// `cp[i]` is the corner piece sitting in corner slot `i` and `co[i]` its
/// twist (0..3, zero when its U/D sticker faces U or D). Edges are the same with
/// flips (0..2). Orientation sums are always 0 modulo 3 and 2 respectively and
/// the corner and edge permutations always share a parity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub(crate) cp: [u8; CORNERS],
    pub(crate) co: [u8; CORNERS],
    pub(crate) ep: [u8; EDGES],
    pub(crate) eo: [u8; EDGES],
}

/// A move as a "replaced by" permutation plus orientation deltas.
///
/// Applying it sends the piece in slot `cp[i]` to slot `i`, adding `co[i]` to
/// its twist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDef {
    pub cp: [u8; CORNERS],
    pub co: [u8; CORNERS],
    pub ep: [u8; EDGES],
    pub eo: [u8; EDGES],
    /// `edge_dest[s]` is the slot the edge in slot `s` ends up in.
    pub edge_dest: [u8; EDGES],
}

impl super::CubeLike for CubieCube {
    fn solved() -> Self {
        CubieCube {
            cp: identity(),
            co: [0; CORNERS],
            ep: identity(),
            eo: [0; EDGES],
        }
    }

    fn apply(mut self, move_: Move) -> Self {
        self.apply_mut(move_);
        self
    }
}

impl CubieCube {
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::solved()
    }

    pub fn corner_permutation(&self) -> &[u8; CORNERS] {
        &self.cp
    }

    pub fn corner_orientation(&self) -> &[u8; CORNERS] {
        &self.co
    }

    pub fn edge_permutation(&self) -> &[u8; EDGES] {
        &self.ep
    }

    pub fn edge_orientation(&self) -> &[u8; EDGES] {
        &self.eo
    }

    #[inline]
    pub fn apply_mut(&mut self, move_: Move) {
        let def = move_.definition();

        let (cp, co) = (self.cp, self.co);
        for i in 0..CORNERS {
            let from = def.cp[i] as usize;
            self.cp[i] = cp[from];
            self.co[i] = (co[from] + def.co[i]) % 3;
        }

        let (ep, eo) = (self.ep, self.eo);
        for i in 0..EDGES {
            let from = def.ep[i] as usize;
            self.ep[i] = ep[from];
            self.eo[i] = (eo[from] + def.eo[i]) % 2;
        }
    }

    #[inline]
    pub fn undo(&mut self, move_: Move) {
        self.apply_mut(move_.reverse());
    }

    pub fn corner_parity(&self) -> u8 {
        parity(&self.cp)
    }

    pub fn edge_parity(&self) -> u8 {
        parity(&self.ep)
    }

    /// Checks every invariant a physically assembled cube satisfies.
    pub fn verify(&self) -> Result<(), FaceletError> {
        if let Some(piece) = missing(&self.cp) {
            return Err(FaceletError::MissingCorner(Corner::from_index(piece)));
        }
        if let Some(piece) = missing(&self.ep) {
            return Err(FaceletError::MissingEdge(Edge::from_index(piece)));
        }

        let twist: u32 = self.co.iter().map(|&o| o as u32).sum();
        if twist % 3 != 0 {
            return Err(FaceletError::CornerTwist(twist));
        }
        let flip: u32 = self.eo.iter().map(|&o| o as u32).sum();
        if flip % 2 != 0 {
            return Err(FaceletError::EdgeFlip(flip));
        }

        if self.corner_parity() != self.edge_parity() {
            return Err(FaceletError::ParityMismatch);
        }
        Ok(())
    }
}

impl MoveDef {
    /// The move that performs `self` and then `next`.
    pub fn then(&self, next: &MoveDef) -> MoveDef {
        let mut cp = [0; CORNERS];
        let mut co = [0; CORNERS];
        for i in 0..CORNERS {
            let via = next.cp[i] as usize;
            cp[i] = self.cp[via];
            co[i] = (self.co[via] + next.co[i]) % 3;
        }

        let mut ep = [0; EDGES];
        let mut eo = [0; EDGES];
        for i in 0..EDGES {
            let via = next.ep[i] as usize;
            ep[i] = self.ep[via];
            eo[i] = (self.eo[via] + next.eo[i]) % 2;
        }

        MoveDef::new(cp, co, ep, eo)
    }

    fn new(cp: [u8; CORNERS], co: [u8; CORNERS], ep: [u8; EDGES], eo: [u8; EDGES]) -> MoveDef {
        let mut edge_dest = [0; EDGES];
        for (slot, &from) in ep.iter().enumerate() {
            edge_dest[from as usize] = slot as u8;
        }
        MoveDef {
            cp,
            co,
            ep,
            eo,
            edge_dest,
        }
    }

    fn quarter_turn(face: Face) -> MoveDef {
        use Corner::*;
        use Edge::*;

        let (cp, co, ep, eo) = match face {
            Face::Up => (
                [Ubr, Urf, Ufl, Ulb, Dfr, Dlf, Dbl, Drb],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [Ub, Ur, Uf, Ul, Dr, Df, Dl, Db, Fr, Fl, Bl, Br],
                [0; EDGES],
            ),
            Face::Right => (
                [Dfr, Ufl, Ulb, Urf, Drb, Dlf, Dbl, Ubr],
                [2, 0, 0, 1, 1, 0, 0, 2],
                [Fr, Uf, Ul, Ub, Br, Df, Dl, Db, Dr, Fl, Bl, Ur],
                [0; EDGES],
            ),
            Face::Front => (
                [Ufl, Dlf, Ulb, Ubr, Urf, Dfr, Dbl, Drb],
                [1, 2, 0, 0, 2, 1, 0, 0],
                [Ur, Fl, Ul, Ub, Dr, Fr, Dl, Db, Uf, Df, Bl, Br],
                [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
            ),
            Face::Down => (
                [Urf, Ufl, Ulb, Ubr, Dlf, Dbl, Drb, Dfr],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [Ur, Uf, Ul, Ub, Df, Dl, Db, Dr, Fr, Fl, Bl, Br],
                [0; EDGES],
            ),
            Face::Left => (
                [Urf, Ulb, Dbl, Ubr, Dfr, Ufl, Dlf, Drb],
                [0, 1, 2, 0, 0, 2, 1, 0],
                [Ur, Uf, Bl, Ub, Dr, Df, Fl, Db, Fr, Ul, Dl, Br],
                [0; EDGES],
            ),
            Face::Back => (
                [Urf, Ufl, Ubr, Drb, Dfr, Dlf, Ulb, Dbl],
                [0, 0, 1, 2, 0, 0, 2, 1],
                [Ur, Uf, Ul, Br, Dr, Df, Dl, Bl, Fr, Fl, Ub, Db],
                [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
            ),
        };

        MoveDef::new(cp.map(|c| c as u8), co, ep.map(|e| e as u8), eo)
    }
}

lazy_static::lazy_static! {
    static ref MOVE_TABLE: Vec<MoveDef> = {
        let mut table = Vec::with_capacity(MOVE_COUNT);
        for face in enum_iterator::all::<Face>() {
            let single = MoveDef::quarter_turn(face);
            let double = single.then(&single);
            let reverse = double.then(&single);
            table.extend([single, double, reverse]);
        }
        table
    };
}

impl Move {
    pub fn definition(self) -> &'static MoveDef {
        &MOVE_TABLE[self.index()]
    }
}

fn identity<const N: usize>() -> [u8; N] {
    let mut out = [0; N];
    for (i, v) in out.iter_mut().enumerate() {
        *v = i as u8;
    }
    out
}

fn missing(perm: &[u8]) -> Option<usize> {
    (0..perm.len()).find(|&piece| !perm.contains(&(piece as u8)))
}

/// Parity of a permutation from its cycle decomposition.
pub(crate) fn parity(perm: &[u8]) -> u8 {
    let mut visited = [false; EDGES];
    let mut swaps = 0;
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut len = 0;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = perm[i] as usize;
            len += 1;
        }
        swaps += len - 1;
    }
    (swaps % 2) as u8
}
