#[cfg(any(feature = "circular", feature = "linked"))]
pub mod generation;
pub mod result;

#[cfg(test)]
pub mod testing;
