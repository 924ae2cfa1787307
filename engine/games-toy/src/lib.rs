//! Synthetic games for tests and benchmarks.
//!
//! - [`Nim`]: take 1 to 3 tokens, taking the last token wins. Small piles
//!   are exhaustively searchable and full of transpositions. An optional
//!   chance action removes a random number of tokens.
//! - [`Fork`]: a single decision between an immediate win and an
//!   immediate loss.

mod fork;
mod nim;

pub use fork::{Fork, ForkAction, ForkEvaluator};
pub use nim::{Nim, NimAction, NimEvaluator, MAX_PILE, MAX_TAKE};

#[cfg(test)]
mod tests;
