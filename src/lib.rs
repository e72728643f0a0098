//! Optimal Rubik's Cube solving with IDA* over pattern databases.

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

pub mod cube;
pub mod r#move;
pub mod prelude;
pub mod solver;

#[cfg(test)]
mod test;
