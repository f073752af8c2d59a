//! Canonical binary sequence codec.
//!
//! Converts numeric or boolean input into an immutable two-symbol sequence
//! and maintains a compact string encoding used for substring search in the
//! LZ76 engine. The numeric mapping is an exact zero test: a sample maps to
//! `false` iff it equals zero, with no floating tolerance.

use crate::error::ComplexityError;

/// Character representing a cleared symbol in the canonical encoding.
pub const ZERO_SYMBOL: char = '0';

/// Character representing a set symbol in the canonical encoding.
pub const ONE_SYMBOL: char = '1';

/// An ordered, fixed-length sequence of boolean symbols.
///
/// Immutable once constructed; length is always at least 1. The canonical
/// encoding maps each symbol to one ASCII character (`'0'` or `'1'`), is
/// order-preserving, and round-trips through [`BinarySequence::from_encoded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySequence {
    bits: Vec<bool>,
    encoded: String,
}

impl BinarySequence {
    /// Build a sequence from boolean symbols.
    ///
    /// # Errors
    /// Returns `InvalidInputKind` if `bits` is empty.
    pub fn from_bools(bits: &[bool]) -> Result<Self, ComplexityError> {
        if bits.is_empty() {
            return Err(ComplexityError::InvalidInputKind(
                "sequence must contain at least one symbol".into(),
            ));
        }
        let encoded = bits
            .iter()
            .map(|&b| if b { ONE_SYMBOL } else { ZERO_SYMBOL })
            .collect();
        Ok(Self {
            bits: bits.to_vec(),
            encoded,
        })
    }

    /// Build a sequence from numeric samples.
    ///
    /// Each sample maps to `true` iff it is nonzero (exact test, no epsilon).
    ///
    /// # Errors
    /// Returns `InvalidInputKind` if `samples` is empty.
    pub fn from_numeric(samples: &[f64]) -> Result<Self, ComplexityError> {
        let bits: Vec<bool> = samples.iter().map(|&x| x != 0.0).collect();
        Self::from_bools(&bits)
    }

    /// Rebuild a sequence from its canonical encoding.
    ///
    /// # Errors
    /// Returns `InvalidInputKind` if `encoded` is empty or contains a
    /// character other than the two symbol characters.
    pub fn from_encoded(encoded: &str) -> Result<Self, ComplexityError> {
        let bits = encoded
            .chars()
            .map(|c| match c {
                ZERO_SYMBOL => Ok(false),
                ONE_SYMBOL => Ok(true),
                other => Err(ComplexityError::InvalidInputKind(format!(
                    "unexpected symbol '{other}' in encoded sequence"
                ))),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        Self::from_bools(&bits)
    }

    /// Number of symbols in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false: empty sequences cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The symbols as booleans.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The canonical string encoding, one character per symbol.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}
