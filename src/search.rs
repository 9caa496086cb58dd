//! Exact search of the smallest set of rows covering the remaining columns of a chart.
//!
//! This is a minimum set-cover problem (NP-hard). The charts built from a single truth table
//! are small enough for an exhaustive depth-first search with branch-and-bound pruning.

use crate::*;

use bit_set::BitSet;
use log::{debug, trace};

/// Depth-first search state: the stack of chosen rows and the best complete choice.
struct CoverSearch<'a> {
    chart: &'a CoverageChart,
    /// Columns to cover, in ascending order
    columns: Vec<usize>,
    /// Rows which can not be selected
    excluded: &'a BitSet,
    /// Number of chosen rows marking each column
    hits: Vec<usize>,
    chosen: Vec<usize>,
    best: Option<Vec<usize>>,
    /// Size bound used until a first cover is found
    limit: usize,
    visited: usize,
}

impl CoverSearch<'_> {
    fn best_len(&self) -> usize {
        self.best.as_ref().map(|b| b.len()).unwrap_or(self.limit)
    }

    fn allowed_marks(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.chart
            .column_marks(self.columns[col])
            .filter(move |row| !self.excluded.contains(*row))
    }

    fn choose(&mut self, row: usize) {
        for col in self.chart.row_marks(row) {
            self.hits[col] += 1;
        }
        self.chosen.push(row);
    }

    fn unchoose(&mut self) {
        if let Some(row) = self.chosen.pop() {
            for col in self.chart.row_marks(row) {
                self.hits[col] -= 1;
            }
        }
    }

    /// Number of rows still needed to cover the columns from the given position.
    ///
    /// The bound is the largest of the number of columns sharing no allowed row with each other
    /// and of the uncovered count divided by the largest number of uncovered columns of a row.
    /// It never exceeds the size of the smallest completion, or `usize::MAX` if an uncovered
    /// column has no allowed row.
    fn lower_bound(&self, position: usize) -> usize {
        let mut uncovered = 0;
        let mut independent = 0;
        let mut used = BitSet::with_capacity(self.chart.row_count());
        let mut row_gain = vec![0; self.chart.row_count()];

        for col in position..self.columns.len() {
            if self.hits[self.columns[col]] > 0 {
                continue;
            }
            uncovered += 1;
            let mut isolated = true;
            let mut marked = false;
            for row in self.allowed_marks(col) {
                marked = true;
                row_gain[row] += 1;
                if !used.insert(row) {
                    isolated = false;
                }
            }
            if !marked {
                return usize::MAX;
            }
            if isolated {
                independent += 1;
            }
        }

        match row_gain.into_iter().max() {
            Some(gain) if gain > 0 => independent.max((uncovered + gain - 1) / gain),
            _ => independent,
        }
    }

    /// Cover the columns starting at the given position in the list of columns to cover
    fn explore(&mut self, position: usize) {
        self.visited += 1;

        // A branch which can not become strictly smaller than the best cover is abandoned
        let bound = self.lower_bound(position);
        if self.chosen.len().saturating_add(bound) >= self.best_len() {
            return;
        }

        // Skip the columns already covered by a chosen row
        let next = self.columns[position..]
            .iter()
            .position(|col| self.hits[*col] == 0)
            .map(|offset| position + offset);

        let col = match next {
            None => {
                trace!("cover found: {:?}", self.chosen);
                self.best = Some(self.chosen.clone());
                return;
            }
            Some(p) => p,
        };

        let candidates: Vec<usize> = self.allowed_marks(col).collect();
        for row in candidates {
            self.choose(row);
            self.explore(col + 1);
            self.unchoose();
        }
    }
}

/// Size of a cover built by repeatedly taking the allowed row covering most uncovered columns.
///
/// Returns `None` if some column has no allowed row.
fn greedy_cover_size(
    chart: &CoverageChart,
    excluded: &BitSet,
    columns: &[usize],
) -> Option<usize> {
    let mut uncovered: BitSet = columns.iter().copied().collect();
    let mut size = 0;
    while !uncovered.is_empty() {
        let (row, gain) = (0..chart.row_count())
            .filter(|row| !excluded.contains(*row))
            .map(|row| {
                let gain = chart.row_marks(row).filter(|col| uncovered.contains(*col)).count();
                (row, gain)
            })
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))?;
        if gain == 0 {
            return None;
        }
        for col in chart.row_marks(row) {
            uncovered.remove(col);
        }
        size += 1;
    }
    Some(size)
}

/// Find a smallest set of rows covering all columns which are not yet covered.
///
/// Excluded rows (typically the essential prime implicants) are never selected. Among several
/// smallest covers, the first one found is returned: columns are processed in ascending order
/// and, for each column, the rows in ascending order.
///
/// Returns an empty list if all columns are already covered, and `None` if some column can
/// not be covered by the allowed rows.
pub fn minimal_cover(
    chart: &CoverageChart,
    excluded: &BitSet,
    covered: &BitSet,
) -> Option<Vec<usize>> {
    let columns: Vec<usize> = (0..chart.column_count())
        .filter(|col| !covered.contains(*col))
        .collect();
    if columns.is_empty() {
        return Some(Vec::new());
    }

    // The greedy cover only bounds the search: every cover of the same size is still visited
    let greedy = greedy_cover_size(chart, excluded, &columns)?;

    let mut search = CoverSearch {
        chart,
        columns,
        excluded,
        hits: vec![0; chart.column_count()],
        chosen: Vec::new(),
        best: None,
        limit: greedy + 1,
        visited: 0,
    };
    search.explore(0);

    debug!(
        "cover search: {} columns, greedy size {}, {} nodes visited, best size {:?}",
        search.columns.len(),
        greedy,
        search.visited,
        search.best.as_ref().map(|b| b.len())
    );
    search.best
}

#[cfg(test)]
mod tests {
    use crate::search::*;
    use test_log::test;

    fn chart_of(table: &str) -> Result<CoverageChart, QmError> {
        let table: TruthTable = table.parse()?;
        let primes = Primes::from_terms(table.initial_terms());
        Ok(CoverageChart::new(&primes, &table.required()))
    }

    #[test]
    fn cyclic_chart() -> Result<(), QmError> {
        // SoP(0,1,2,5,6,7): no essential prime, two covers of size 3
        let chart = chart_of("11100111")?;
        let rows = minimal_cover(&chart, &BitSet::new(), &BitSet::new()).unwrap();
        assert_eq!(rows.len(), 3);

        let mut covered = BitSet::new();
        for row in &rows {
            covered.extend(chart.row_marks(*row));
        }
        assert_eq!(covered.len(), chart.column_count());
        Ok(())
    }

    #[test]
    fn first_cover_is_kept() -> Result<(), QmError> {
        let chart = chart_of("11100111")?;
        let first = minimal_cover(&chart, &BitSet::new(), &BitSet::new()).unwrap();
        let second = minimal_cover(&chart, &BitSet::new(), &BitSet::new()).unwrap();
        assert_eq!(first, second);
        // column 0 is covered by its first row
        assert_eq!(first[0], chart.column_marks(0).next().unwrap());
        Ok(())
    }

    #[test]
    fn nothing_to_cover() -> Result<(), QmError> {
        let chart = chart_of("1010")?;
        let covered: BitSet = (0..chart.column_count()).collect();
        assert_eq!(
            minimal_cover(&chart, &BitSet::new(), &covered),
            Some(Vec::new())
        );
        Ok(())
    }

    #[test]
    fn excluded_rows() -> Result<(), QmError> {
        let chart = chart_of("1010")?;
        let excluded: BitSet = [0].into_iter().collect();
        assert_eq!(minimal_cover(&chart, &excluded, &BitSet::new()), None);
        Ok(())
    }

    #[test]
    fn excluded_rows_are_never_selected() -> Result<(), QmError> {
        let chart = chart_of("11100111")?;
        let excluded: BitSet = [0].into_iter().collect();
        let rows = minimal_cover(&chart, &excluded, &BitSet::new()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(!rows.contains(&0));
        Ok(())
    }

    /// Exhaustive search without bounds, visiting the covers in the same order
    fn reference_cover(chart: &CoverageChart) -> Option<Vec<usize>> {
        fn explore(
            chart: &CoverageChart,
            chosen: &mut Vec<usize>,
            best: &mut Option<Vec<usize>>,
        ) {
            if best.as_ref().map_or(false, |b| chosen.len() >= b.len()) {
                return;
            }
            let next = (0..chart.column_count()).find(|col| {
                !chosen.iter().any(|row| chart.is_marked(*row, *col))
            });
            let col = match next {
                None => {
                    *best = Some(chosen.clone());
                    return;
                }
                Some(col) => col,
            };
            for row in chart.column_marks(col) {
                chosen.push(row);
                explore(chart, chosen, best);
                chosen.pop();
            }
        }

        let mut best = None;
        explore(chart, &mut Vec::new(), &mut best);
        best
    }

    #[test]
    fn bounds_keep_the_first_cover() -> Result<(), QmError> {
        for table in ["11100111", "1101101110110111", "0111111011111101", "1x0111x0011011x1"] {
            let chart = chart_of(table)?;
            assert_eq!(
                minimal_cover(&chart, &BitSet::new(), &BitSet::new()),
                reference_cover(&chart),
                "{}",
                table
            );
        }
        Ok(())
    }

    #[test]
    fn large_cyclic_chart() -> Result<(), QmError> {
        // Two copies of the cyclic function SoP(0,1,2,5,6,7) on disjoint variables,
        // with the two remaining variables fixed at 1: 36 primes, none essential.
        let cyclic = [0u32, 1, 2, 5, 6, 7];
        let ones = cyclic
            .iter()
            .flat_map(|low| cyclic.iter().map(move |high| low | high << 3 | 0b11 << 6));
        let table = TruthTable::from_minterms(8, ones, [])?;
        let primes = Primes::from_terms(table.initial_terms());
        let chart = CoverageChart::new(&primes, &table.required());
        assert_eq!(chart.row_count(), 36);
        assert_eq!(chart.column_count(), 36);

        let start = std::time::Instant::now();
        let rows = minimal_cover(&chart, &BitSet::new(), &BitSet::new()).unwrap();
        assert!(start.elapsed().as_secs() < 20);

        // each prime covers 4 of the 36 minterms
        assert_eq!(rows.len(), 9);
        let mut covered = BitSet::new();
        for row in &rows {
            covered.extend(chart.row_marks(*row));
        }
        assert_eq!(covered.len(), 36);
        Ok(())
    }
}
