//! The working set of one reduction level

use super::row::TableRow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Implicants of one level, grouped by don't-care mask and number of ones
///
/// Only rows with the same mask whose one-counts differ by exactly one can
/// merge, so [`TableRows::merge_candidates`] yields just those group pairs.
/// Adding a pattern that is already present unions its coverage instead of
/// storing a duplicate.
#[derive(Debug, Clone, Default)]
pub struct TableRows {
    groups: BTreeMap<(u64, u32), Vec<TableRow>>,
    index: HashMap<(u64, u64), ((u64, u32), usize)>,
    len: usize,
}

impl TableRows {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no rows remain
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a row, merging its coverage into an existing identical pattern
    pub fn add(&mut self, row: TableRow) {
        if let Some(&(group, position)) = self.index.get(&row.key()) {
            if let Some(existing) = self.groups.get_mut(&group).and_then(|g| g.get_mut(position)) {
                existing.add_source(row.source());
            }
            return;
        }
        let group = (row.dont_care_mask(), row.ones());
        let rows = self.groups.entry(group).or_default();
        self.index.insert(row.key(), (group, rows.len()));
        rows.push(row);
        self.len += 1;
    }

    /// True if an identical pattern is present
    pub fn contains(&self, row: &TableRow) -> bool {
        self.index.contains_key(&row.key())
    }

    /// Iterate over all rows, group by group
    pub fn iter(&self) -> impl Iterator<Item = &TableRow> {
        self.groups.values().flatten()
    }

    /// Pairs of groups whose rows may merge
    pub fn merge_candidates(&self) -> impl Iterator<Item = (&[TableRow], &[TableRow])> {
        self.groups.iter().filter_map(move |(&(mask, ones), lower)| {
            self.groups
                .get(&(mask, ones + 1))
                .map(|upper| (lower.as_slice(), upper.as_slice()))
        })
    }
}

impl<'a> IntoIterator for &'a TableRows {
    type Item = &'a TableRow;
    type IntoIter = Box<dyn Iterator<Item = &'a TableRow> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One row per line, sorted by pattern
impl fmt::Display for TableRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self.iter().map(|row| row.to_string()).collect();
        lines.sort();
        for line in lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_union_coverage() {
        let a = TableRow::from_index(3, 0b000, false).unwrap();
        let b = TableRow::from_index(3, 0b001, false).unwrap();
        let c = TableRow::from_index(3, 0b010, false).unwrap();
        let d = TableRow::from_index(3, 0b011, false).unwrap();

        // 0-- is reached from two merge paths
        let via_b = a.merge(&c).unwrap().merge(&b.merge(&d).unwrap()).unwrap();
        let via_c = a.merge(&b).unwrap().merge(&c.merge(&d).unwrap()).unwrap();

        let mut rows = TableRows::new();
        rows.add(via_b);
        rows.add(via_c);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.to_string(), "0--,0,1,2,3\n");
    }

    #[test]
    fn test_merge_candidates_are_adjacent() {
        let mut rows = TableRows::new();
        for index in [0b000, 0b001, 0b011, 0b111] {
            rows.add(TableRow::from_index(3, index, false).unwrap());
        }
        let pairs: Vec<(usize, usize)> = rows
            .merge_candidates()
            .map(|(lower, upper)| (lower[0].ones() as usize, upper[0].ones() as usize))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
    }
}
