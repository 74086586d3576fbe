//! # RePair - Greedy Pairwise Compression
//!
//! A Rust implementation of RePair-style pair merging over an arbitrary
//! symbol sequence.
//!
//! Each round replaces every non-overlapping occurrence of the most frequent
//! adjacent pair with a new synthetic symbol:
//! 1. **Frequency first**: the pair with the most occurrences wins
//! 2. **Leftmost on ties**: among equally frequent pairs, the one starting first wins
//! 3. **Repetition required**: a pair occurring once is never merged, and a
//!    round without repeated pairs ends compression
//!
//! ## Example
//!
//! ```
//! use repair_rs::{compress_text, Repair, Symbol};
//!
//! assert_eq!(compress_text("mississippi", 1).unwrap(), "mAsAsippi");
//!
//! let mut repair = Repair::new();
//! repair.extend([1u8, 2, 1, 2, 3]);
//! repair.compress(4).unwrap();
//!
//! assert_eq!(
//!     repair.materialize(),
//!     vec![Symbol::Synthetic(0), Symbol::Synthetic(0), Symbol::Value(3)]
//! );
//! println!("Ran {} rounds", repair.rounds());
//! ```
//!
//! ## Performance
//!
//! - O(n) per round with the default full rescan
//! - [`IndexStrategy::Incremental`] touches only the pairs around each merge
//! - Nodes live in a generational arena (SlotMap), merges never shift memory

mod config;
mod error;
mod id_gen;
mod pair_index;
mod repair;
mod repair_iter;
mod selector;
mod sequence;
mod symbol;
mod text;


pub use config::{IndexStrategy, RepairConfig};
pub use error::{RepairError, Result};
pub use repair::{compress, EngineState, Repair, RepairStats, RoundReport};
pub use repair_iter::RepairIter;
pub use symbol::Symbol;
pub use text::{
    compress_text, compress_text_engine, compress_text_with, render, synthetic_char,
    SYNTHETIC_ALPHABET, SYNTHETIC_CAPACITY,
};
