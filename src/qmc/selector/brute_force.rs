//! Exhaustive minimum cover search

use super::{mask_to_indices, Coverage, PrimeSelector};
use crate::qmc::error::SelectError;
use crate::qmc::row::TableRow;
use log::debug;
use std::collections::BTreeSet;

/// Largest prime count the exhaustive selectors accept
///
/// Subsets are enumerated as bit masks over the primes.
pub const MAX_BRUTE_FORCE_PRIMES: usize = 31;

/// Next larger integer with the same number of set bits (Gosper's hack)
fn next_same_popcount(x: u64) -> u64 {
    let lowest = x & x.wrapping_neg();
    let ripple = x + lowest;
    (((ripple ^ x) >> 2) / lowest) | ripple
}

/// All subset masks of `n` primes, by ascending popcount and, within a
/// popcount, by ascending value
fn subsets(n: usize) -> impl Iterator<Item = u64> {
    let limit = 1u64 << n;
    (1..=n).flat_map(move |k| {
        let first = (1u64 << k) - 1;
        std::iter::successors(Some(first), |&mask| Some(next_same_popcount(mask)))
            .take_while(move |&mask| mask < limit)
    })
}

/// Set up the cover problem, rejecting instances the search cannot handle
fn prepare(
    primes: &[TableRow],
    required: &BTreeSet<usize>,
) -> Result<Option<Coverage>, SelectError> {
    if primes.len() > MAX_BRUTE_FORCE_PRIMES {
        return Err(SelectError::TooManyPrimes {
            count: primes.len(),
            max: MAX_BRUTE_FORCE_PRIMES,
        });
    }
    if required.is_empty() {
        return Ok(None);
    }
    let coverage = Coverage::new(primes, required);
    coverage.check_coverable()?;
    Ok(Some(coverage))
}

/// Exact selector returning the first minimum cover
///
/// Tries every subset in order of increasing size, so the result has minimum
/// cardinality. Among subsets of that size the one with the lowest mask
/// value (preferring earlier primes) wins.
///
/// # Examples
///
/// ```
/// use qmc_logic::qmc::{BruteForce, PrimeSelector, TableRow};
/// use std::collections::BTreeSet;
///
/// let primes = vec![
///     TableRow::from_index(2, 0, false).unwrap(),
///     TableRow::from_index(2, 3, false).unwrap(),
/// ];
/// let required: BTreeSet<usize> = [0, 3].into_iter().collect();
/// assert_eq!(BruteForce::new().select(&primes, &required).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Create the selector
    pub fn new() -> Self {
        BruteForce
    }
}

impl PrimeSelector for BruteForce {
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        let coverage = match prepare(primes, required)? {
            Some(coverage) => coverage,
            None => return Ok(Vec::new()),
        };

        let mut scratch = vec![0u64; coverage.words()];
        for mask in subsets(coverage.prime_count()) {
            if coverage.covers_mask(mask, &mut scratch) {
                debug!("Exhaustive selection: {} of {} primes", mask.count_ones(), primes.len());
                return Ok(mask_to_indices(mask));
            }
        }
        // unreachable after check_coverable, kept as an error rather than a panic
        Err(SelectError::NoCover {
            uncovered: required.iter().copied().collect(),
        })
    }
}

/// Exact selector collecting every minimum cover
///
/// Uses the same enumeration order as [`BruteForce`] and stops as soon as the
/// subset size exceeds the first solution's. The first solution is returned
/// by [`PrimeSelector::select`]; all of them are available from
/// [`BruteForceGetAll::solutions`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct BruteForceGetAll {
    solutions: Vec<Vec<usize>>,
}

impl BruteForceGetAll {
    /// Create the selector
    pub fn new() -> Self {
        Self::default()
    }

    /// All minimum solutions found by the last call, in enumeration order
    pub fn solutions(&self) -> &[Vec<usize>] {
        &self.solutions
    }
}

impl PrimeSelector for BruteForceGetAll {
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        self.solutions.clear();
        let coverage = match prepare(primes, required)? {
            Some(coverage) => coverage,
            None => {
                self.solutions.push(Vec::new());
                return Ok(Vec::new());
            }
        };

        let mut scratch = vec![0u64; coverage.words()];
        let mut best: Option<u32> = None;
        for mask in subsets(coverage.prime_count()) {
            let size = mask.count_ones();
            if best.is_some_and(|best| size > best) {
                break;
            }
            if coverage.covers_mask(mask, &mut scratch) {
                best = Some(size);
                self.solutions.push(mask_to_indices(mask));
            }
        }

        debug!(
            "Exhaustive selection: {} minimum solutions with {} primes",
            self.solutions.len(),
            best.unwrap_or(0)
        );
        match self.solutions.first() {
            Some(first) => Ok(first.clone()),
            None => Err(SelectError::NoCover {
                uncovered: required.iter().copied().collect(),
            }),
        }
    }
}
