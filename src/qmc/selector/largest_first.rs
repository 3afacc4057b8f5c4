//! Greedy cover selection

use super::{Coverage, PrimeSelector};
use crate::qmc::error::SelectError;
use crate::qmc::row::TableRow;
use log::debug;
use std::collections::BTreeSet;

/// Greedy selector: always take the prime covering the most open indices
///
/// Ties go to the prime that comes first. Runs in polynomial time but the
/// result is not guaranteed to be minimal.
#[derive(Debug, Clone, Default)]
pub struct LargestFirst;

impl LargestFirst {
    /// Create the selector
    pub fn new() -> Self {
        LargestFirst
    }
}

impl PrimeSelector for LargestFirst {
    fn select(
        &mut self,
        primes: &[TableRow],
        required: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, SelectError> {
        let coverage = Coverage::new(primes, required);
        if coverage.is_empty() {
            return Ok(Vec::new());
        }
        coverage.check_coverable()?;

        let mut open = coverage.full().to_vec();
        let mut taken = vec![false; primes.len()];
        let mut selection = Vec::new();

        while open.iter().any(|&word| word != 0) {
            let mut best: Option<(usize, u32)> = None;
            for (prime, used) in taken.iter().enumerate() {
                if *used {
                    continue;
                }
                let gain: u32 = coverage
                    .set(prime)
                    .iter()
                    .zip(&open)
                    .map(|(set, open)| (set & open).count_ones())
                    .sum();
                if gain > 0 && best.map_or(true, |(_, best_gain)| gain > best_gain) {
                    best = Some((prime, gain));
                }
            }

            let (prime, _) = match best {
                Some(best) => best,
                None => {
                    return Err(SelectError::NoCover {
                        uncovered: required.iter().copied().collect(),
                    })
                }
            };
            taken[prime] = true;
            selection.push(prime);
            for (word, set) in open.iter_mut().zip(coverage.set(prime)) {
                *word &= !set;
            }
        }

        debug!("Greedy selection: {} of {} primes", selection.len(), primes.len());
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qmc::selector::BruteForce;

    fn row(cols: usize, indices: &[usize]) -> TableRow {
        let mut iter = indices.iter();
        let first = TableRow::from_index(cols, *iter.next().unwrap(), false).unwrap();
        iter.fold(first, |acc, &index| {
            let mut next = TableRow::from_index(cols, index, false).unwrap();
            // coverage is what matters here, the pattern is irrelevant
            next.add_source(acc.source());
            next
        })
    }

    #[test]
    fn test_greedy_picks_largest_first() {
        let primes = vec![row(4, &[0, 1]), row(4, &[1, 2, 3]), row(4, &[3, 4])];
        let required: BTreeSet<usize> = (0..5).collect();
        let selection = LargestFirst::new().select(&primes, &required).unwrap();
        assert_eq!(selection, vec![1, 0, 2]);
    }

    #[test]
    fn test_greedy_can_be_worse_than_exact() {
        // classic counter example: the big middle set lures the greedy choice
        let primes = vec![
            row(4, &[0, 1, 2, 3, 4, 5, 6]),
            row(4, &[7, 8, 9, 10, 11, 12, 13]),
            row(4, &[0, 1, 2, 3, 7, 8, 9, 10]),
            row(4, &[4, 5, 11, 12]),
            row(4, &[6, 13]),
        ];
        let required: BTreeSet<usize> = (0..14).collect();
        let greedy = LargestFirst::new().select(&primes, &required).unwrap();
        let exact = BruteForce::new().select(&primes, &required).unwrap();
        assert_eq!(exact, vec![0, 1]);
        assert_eq!(greedy.len(), 3);
    }

    #[test]
    fn test_ties_go_to_the_first_prime() {
        let primes = vec![row(2, &[0, 1]), row(2, &[0, 1])];
        let required: BTreeSet<usize> = [0, 1].into_iter().collect();
        assert_eq!(LargestFirst::new().select(&primes, &required), Ok(vec![0]));
    }

    #[test]
    fn test_no_cover() {
        let primes = vec![row(2, &[0])];
        let required: BTreeSet<usize> = [0, 2].into_iter().collect();
        assert_eq!(
            LargestFirst::new().select(&primes, &required),
            Err(SelectError::NoCover { uncovered: vec![2] })
        );
    }
}
