pub use crate::cube::*;
pub use crate::r#move::*;
pub use crate::solver::*;

#[cfg(test)]
pub use crate::test::*;
