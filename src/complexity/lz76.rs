//! LZ76 complexity via production history decomposition.
//!
//! Implements the complexity measure from Lempel & Ziv, "On the Complexity
//! of Finite Sequences" (IEEE Trans. Inf. Theory, 1976), in both flavours:
//! - exhaustive decomposition: the minimal history count (lower bound)
//! - primitive decomposition: the upper bound
//!
//! The measure is driven by the eigenfunction `gs`: for each prefix length
//! the largest starting position whose suffix has not yet appeared in the
//! shorter prefix. The recurrence scans the candidate range from both ends
//! at once and resolves on the first decisive probe.

use std::ops::Range;

use crate::complexity::sequence::BinarySequence;
use crate::error::ComplexityError;

/// History decomposition flavours of the LZ76 measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Lz76Variant {
    /// Exhaustive production process: minimal history, lower complexity bound.
    #[default]
    Exhaustive,
    /// Primitive production process: upper complexity bound.
    Primitive,
}

impl Lz76Variant {
    /// Display name for the variant.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::Primitive => "primitive",
        }
    }

    /// All available variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Exhaustive, Self::Primitive]
    }
}

/// Outcome of one LZ76 computation. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityResult {
    /// The complexity value: the raw history count, or the count divided by
    /// `L / log2(L)` when normalization was requested.
    pub count: f64,
    /// The history components as half-open index ranges. Together they
    /// partition `[0, L)` with no gaps or overlaps.
    pub history: Vec<Range<usize>>,
    /// The eigenfunction array, length `L + 1`, with `gs[0] = 0, gs[1] = 1`.
    pub eigenfunction: Vec<usize>,
    /// Whether `count` was length-normalized.
    pub normalized: bool,
}

impl ComplexityResult {
    /// The raw (un-normalized) history count.
    #[must_use]
    pub fn raw_count(&self) -> usize {
        self.history.len()
    }
}

/// Compute the LZ76 complexity of a binary sequence.
///
/// With `normalize` set the returned count is `raw / (L / log2(L))`, which
/// is only defined for sequences longer than one symbol.
///
/// Deterministic: identical input always yields identical output.
///
/// # Errors
/// - `DegenerateSequence` if `normalize` is requested for `L <= 1`.
/// - `EigenvalueSearchExhausted` if the recurrence fails to resolve, which
///   cannot happen for a well-formed binary sequence.
pub fn lz76_complexity(
    sequence: &BinarySequence,
    variant: Lz76Variant,
    normalize: bool,
) -> Result<ComplexityResult, ComplexityError> {
    let l = sequence.len();
    if normalize && l <= 1 {
        return Err(ComplexityError::DegenerateSequence(l));
    }

    let gs = compute_eigenfunction(sequence.encoded())?;

    let mut boundaries = match variant {
        Lz76Variant::Exhaustive => exhaustive_boundaries(&gs),
        Lz76Variant::Primitive => primitive_boundaries(&gs),
    };
    // The trailing partial component still counts.
    if boundaries.last() != Some(&l) {
        boundaries.push(l);
    }

    let history: Vec<Range<usize>> = boundaries.windows(2).map(|w| w[0]..w[1]).collect();

    let raw = history.len() as f64;
    let count = if normalize {
        let lf = l as f64;
        raw / (lf / lf.log2())
    } else {
        raw
    };

    Ok(ComplexityResult {
        count,
        history,
        eigenfunction: gs,
        normalized: normalize,
    })
}

/// Compute the eigenfunction `gs` for an encoded sequence.
///
/// `gs` has length `L + 1` with `gs[0] = 0` and `gs[1] = 1`. For each `n`
/// from 1 to `L - 1`, `gs[n + 1]` is found by probing candidate start
/// positions `m` (1-indexed) in `[gs[n] + 1, n + 1]`: the substring of
/// symbols `m..=n+1` is searched for in the prefix of the first `n`
/// symbols. The scan walks the range from both ends simultaneously:
/// - upper probe not found in the prefix: `gs[n + 1] = m_upper`
/// - lower probe found in the prefix: `gs[n + 1] = m_lower - 1`
/// - probes converged to adjacent positions: `gs[n + 1] = m_lower`
fn compute_eigenfunction(s: &str) -> Result<Vec<usize>, ComplexityError> {
    let l = s.len();
    let mut gs = vec![0usize; l + 1];
    gs[1] = 1;

    for n in 1..l {
        let lo = gs[n] + 1;
        let hi = n + 1;
        // gs[n] <= n, so the range is never empty.
        let span = hi - lo + 1;
        let prefix = &s[..n];

        let mut resolved = false;
        for k in 0..span.div_ceil(2) {
            let m_upper = hi - k;
            if !prefix.contains(&s[m_upper - 1..=n]) {
                gs[n + 1] = m_upper;
                resolved = true;
                break;
            }

            let m_lower = lo + k;
            if prefix.contains(&s[m_lower - 1..=n]) {
                gs[n + 1] = m_lower - 1;
                resolved = true;
                break;
            } else if m_upper == m_lower + 1 {
                gs[n + 1] = m_lower;
                resolved = true;
                break;
            }
        }

        if !resolved {
            return Err(ComplexityError::EigenvalueSearchExhausted(n));
        }
    }

    Ok(gs)
}

/// Boundaries of the exhaustive history.
///
/// Starting from boundary 0, repeatedly find the smallest gs index `j`
/// past the current boundary whose value strictly exceeds it; `j` becomes
/// the next boundary. Stops when no such index remains.
fn exhaustive_boundaries(gs: &[usize]) -> Vec<usize> {
    let mut boundaries = vec![0usize];
    let mut h_prev = 0usize;

    while let Some(j) = (h_prev + 1..gs.len()).find(|&j| gs[j] > h_prev) {
        boundaries.push(j);
        h_prev = j;
    }

    boundaries
}

/// Boundaries of the primitive history: the first-occurrence positions of
/// the distinct eigenfunction values. `gs` is nondecreasing, so these are
/// exactly the positions where the value changes.
fn primitive_boundaries(gs: &[usize]) -> Vec<usize> {
    let mut boundaries = Vec::new();
    let mut current = None;

    for (j, &v) in gs.iter().enumerate() {
        if current != Some(v) {
            boundaries.push(j);
            current = Some(v);
        }
    }

    boundaries
}
