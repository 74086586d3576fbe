//! Text front-end: lowercase strings in, merge symbols rendered as capitals.
//!
//! ```
//! use repair_rs::compress_text;
//!
//! assert_eq!(compress_text("ababcababc", 2).unwrap(), "BcBc");
//! ```

use crate::config::{IndexStrategy, RepairConfig};
use crate::error::{RepairError, Result};
use crate::repair::Repair;
use crate::symbol::Symbol;

/// Letters used for merge symbols, in creation order.
pub const SYNTHETIC_ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

/// Number of merge symbols the text front-end can render.
pub const SYNTHETIC_CAPACITY: usize = 26;

/// Renders the `id`-th merge symbol.
pub fn synthetic_char(id: u32) -> Option<char> {
    if (id as usize) < SYNTHETIC_CAPACITY {
        char::from_u32(u32::from(*SYNTHETIC_ALPHABET.start()) + id)
    } else {
        None
    }
}

/// Compresses `text` for at most `rounds` rounds.
///
/// Merge symbols are written as `'A'`, `'B'`, … in the order they are
/// created. Empty text or `rounds == 0` returns the text unchanged.
///
/// # Errors
///
/// - [`RepairError::AlphabetExhausted`] if `rounds` exceeds
///   [`SYNTHETIC_CAPACITY`].
/// - [`RepairError::ReservedSymbol`] if the text contains a letter of
///   [`SYNTHETIC_ALPHABET`].
pub fn compress_text(text: &str, rounds: usize) -> Result<String> {
    compress_text_with(text, rounds, IndexStrategy::default())
}

/// Like [`compress_text`], with an explicit pair index strategy.
pub fn compress_text_with(text: &str, rounds: usize, strategy: IndexStrategy) -> Result<String> {
    let repair = compress_text_engine(text, rounds, strategy)?;
    render(&repair)
}

/// Runs the text compression and hands back the engine, for callers that
/// want the round history or statistics.
pub fn compress_text_engine(
    text: &str,
    rounds: usize,
    strategy: IndexStrategy,
) -> Result<Repair<char>> {
    let config = RepairConfig::new()
        .with_strategy(strategy)
        .with_synthetic_capacity(SYNTHETIC_CAPACITY);
    let mut repair = Repair::with_config(config);

    if !text.is_empty() && rounds > 0 {
        if let Some((position, symbol)) = text
            .chars()
            .enumerate()
            .find(|(_, c)| SYNTHETIC_ALPHABET.contains(c))
        {
            return Err(RepairError::ReservedSymbol { symbol, position });
        }
    }

    repair.extend(text.chars());
    repair.compress(rounds)?;

    Ok(repair)
}

/// Writes the current sequence of a text engine as a string.
///
/// # Errors
///
/// [`RepairError::AlphabetExhausted`] if the engine created more merge
/// symbols than [`SYNTHETIC_ALPHABET`] holds, which only happens for
/// engines not built by [`compress_text_engine`].
pub fn render(repair: &Repair<char>) -> Result<String> {
    repair
        .iter()
        .map(|symbol| match symbol {
            Symbol::Value(&c) => Ok(c),
            Symbol::Synthetic(id) => {
                synthetic_char(id).ok_or(RepairError::AlphabetExhausted {
                    requested: id as usize + 1,
                    capacity: SYNTHETIC_CAPACITY,
                })
            }
        })
        .collect()
}
