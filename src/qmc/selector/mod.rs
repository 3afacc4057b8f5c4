//! Prime implicant selection (minimum set cover)
//!
//! After reduction, a [`PrimeSelector`] picks a subset of the prime
//! implicants whose coverage contains every required ON-set index. The
//! exhaustive selectors return a minimum-cardinality subset; the greedy one
//! runs in polynomial time but may pick more primes than necessary.

mod brute_force;
mod largest_first;

pub use brute_force::{BruteForce, BruteForceGetAll, MAX_BRUTE_FORCE_PRIMES};
pub use largest_first::LargestFirst;

use super::error::SelectError;
use super::row::TableRow;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Prime count below which [`DefaultSelector`] searches exhaustively
pub const DEFAULT_EXACT_THRESHOLD: usize = 16;

/// Chooses a covering subset of prime implicants
///
/// `select` returns indices into `primes`. An empty `required` set yields an
/// empty selection; the exhaustive selectors still reject more than
/// [`MAX_BRUTE_FORCE_PRIMES`] primes first.
pub trait PrimeSelector {
    /// Select primes whose combined coverage contains `required`
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError>;
}

impl<S: PrimeSelector + ?Sized> PrimeSelector for Box<S> {
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        (**self).select(primes, required)
    }
}

/// The cover problem as bit sets over the required indices
pub(crate) struct Coverage {
    columns: Vec<usize>,
    sets: Vec<Vec<u64>>,
    words: usize,
    full: Vec<u64>,
}

impl Coverage {
    pub(crate) fn new(primes: &[TableRow], required: &BTreeSet<usize>) -> Self {
        let columns: Vec<usize> = required.iter().copied().collect();
        let words = columns.len().div_ceil(64);
        let sets = primes
            .iter()
            .map(|prime| {
                let mut set = vec![0u64; words];
                for (column, index) in columns.iter().enumerate() {
                    if prime.covers(*index) {
                        set[column / 64] |= 1u64 << (column % 64);
                    }
                }
                set
            })
            .collect();
        let mut full = vec![u64::MAX; words];
        let rest = columns.len() % 64;
        if rest != 0 {
            if let Some(last) = full.last_mut() {
                *last = (1u64 << rest) - 1;
            }
        }
        Coverage {
            columns,
            sets,
            words,
            full,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn prime_count(&self) -> usize {
        self.sets.len()
    }

    /// Bit set with every column
    pub(crate) fn full(&self) -> &[u64] {
        &self.full
    }

    pub(crate) fn words(&self) -> usize {
        self.words
    }

    pub(crate) fn set(&self, prime: usize) -> &[u64] {
        &self.sets[prime]
    }

    /// Fails with the uncovered indices if even all primes together miss some
    pub(crate) fn check_coverable(&self) -> Result<(), SelectError> {
        let mut union = vec![0u64; self.words];
        for set in &self.sets {
            or_into(&mut union, set);
        }
        let uncovered: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|&(column, _)| union[column / 64] & (1u64 << (column % 64)) == 0)
            .map(|(_, index)| *index)
            .collect();
        if uncovered.is_empty() {
            Ok(())
        } else {
            Err(SelectError::NoCover { uncovered })
        }
    }

    /// True if the primes in `mask` (bit `i` = prime `i`) cover every column
    pub(crate) fn covers_mask(&self, mask: u64, scratch: &mut [u64]) -> bool {
        scratch.iter_mut().for_each(|word| *word = 0);
        let mut rest = mask;
        while rest != 0 {
            let prime = rest.trailing_zeros() as usize;
            or_into(scratch, &self.sets[prime]);
            rest &= rest - 1;
        }
        scratch == self.full.as_slice()
    }
}

pub(crate) fn or_into(target: &mut [u64], source: &[u64]) {
    for (t, s) in target.iter_mut().zip(source) {
        *t |= s;
    }
}

/// Indices of the set bits of a subset mask, ascending
pub(crate) fn mask_to_indices(mask: u64) -> Vec<usize> {
    let mut indices = Vec::with_capacity(mask.count_ones() as usize);
    let mut rest = mask;
    while rest != 0 {
        indices.push(rest.trailing_zeros() as usize);
        rest &= rest - 1;
    }
    indices
}

/// The strategy the last [`DefaultSelector::select`] call used
#[derive(Debug, Clone)]
enum Strategy {
    Exact(BruteForceGetAll),
    Heuristic,
}

/// Exhaustive search for small instances, greedy selection otherwise
///
/// Uses [`BruteForceGetAll`] when there are fewer primes than the threshold
/// and [`LargestFirst`] otherwise. If the exhaustive search reports
/// [`SelectError::TooManyPrimes`] (a threshold above
/// [`MAX_BRUTE_FORCE_PRIMES`]), it falls back to the greedy selector.
///
/// The strategy of the last call is kept, so all minimum solutions of an
/// exact run can be inspected through [`DefaultSelector::solutions`]. This
/// makes the selector stateful; use one instance per job.
///
/// # Examples
///
/// ```
/// use qmc_logic::qmc::{DefaultSelector, QuineMcCluskey};
///
/// let mut qmc = QuineMcCluskey::new(vec!["A".into(), "B".into(), "C".into()]).unwrap();
/// for index in [1, 2, 5, 6, 7] {
///     qmc.add(index, false).unwrap();
/// }
/// qmc.reduce();
///
/// let mut selector = DefaultSelector::new();
/// qmc.select(&mut selector).unwrap();
/// assert_eq!(qmc.primes().len(), 3);
/// assert_eq!(selector.solutions().map(|s| s.len()), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSelector {
    threshold: usize,
    last: Option<Strategy>,
}

impl DefaultSelector {
    /// Create a selector with [`DEFAULT_EXACT_THRESHOLD`]
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_EXACT_THRESHOLD)
    }

    /// Create a selector that searches exhaustively below `threshold` primes
    pub fn with_threshold(threshold: usize) -> Self {
        DefaultSelector {
            threshold,
            last: None,
        }
    }

    /// The prime count threshold
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// All minimum solutions of the last call, if it ran the exact search
    pub fn solutions(&self) -> Option<&[Vec<usize>]> {
        match &self.last {
            Some(Strategy::Exact(exact)) => Some(exact.solutions()),
            _ => None,
        }
    }

    /// True if the last call ran the exact search
    pub fn used_exact(&self) -> bool {
        matches!(self.last, Some(Strategy::Exact(_)))
    }

    fn select_heuristic(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        let selection = LargestFirst::new().select(primes, required)?;
        self.last = Some(Strategy::Heuristic);
        Ok(selection)
    }
}

impl Default for DefaultSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimeSelector for DefaultSelector {
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        if primes.len() >= self.threshold {
            debug!(
                "{} primes, threshold {}: greedy selection",
                primes.len(),
                self.threshold
            );
            return self.select_heuristic(primes, required);
        }

        debug!("{} primes: exhaustive selection", primes.len());
        let mut exact = BruteForceGetAll::new();
        match exact.select(primes, required) {
            Ok(selection) => {
                self.last = Some(Strategy::Exact(exact));
                Ok(selection)
            }
            Err(SelectError::TooManyPrimes { count, max }) => {
                warn!(
                    "Exhaustive selection supports at most {} primes, got {}; using greedy selection",
                    max, count
                );
                self.select_heuristic(primes, required)
            }
            Err(e) => Err(e),
        }
    }
}

/// Selector choice for [`MinimizerConfig`](crate::MinimizerConfig)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectorKind {
    /// [`DefaultSelector`]
    #[default]
    Default,
    /// [`BruteForce`]
    BruteForce,
    /// [`BruteForceGetAll`]
    BruteForceGetAll,
    /// [`LargestFirst`]
    LargestFirst,
}

impl SelectorKind {
    /// Instantiate the selector; `threshold` only applies to `Default`
    pub fn build(self, threshold: usize) -> Box<dyn PrimeSelector> {
        match self {
            SelectorKind::Default => Box::new(DefaultSelector::with_threshold(threshold)),
            SelectorKind::BruteForce => Box::new(BruteForce::new()),
            SelectorKind::BruteForceGetAll => Box::new(BruteForceGetAll::new()),
            SelectorKind::LargestFirst => Box::new(LargestFirst::new()),
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorKind::Default => "default",
            SelectorKind::BruteForce => "brute-force",
            SelectorKind::BruteForceGetAll => "brute-force-all",
            SelectorKind::LargestFirst => "largest-first",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SelectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(SelectorKind::Default),
            "brute-force" | "exact" => Ok(SelectorKind::BruteForce),
            "brute-force-all" => Ok(SelectorKind::BruteForceGetAll),
            "largest-first" | "greedy" => Ok(SelectorKind::LargestFirst),
            other => Err(format!(
                "unknown selector '{}' (expected default, brute-force, brute-force-all or largest-first)",
                other
            )),
        }
    }
}
