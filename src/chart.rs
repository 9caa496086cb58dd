//! Prime implicant chart: which prime implicant covers which required minterm.

use crate::*;

use bit_set::BitSet;
use log::debug;
use std::fmt;

/// Incidence matrix between prime implicants (rows) and required minterms (columns).
///
/// Columns are the minterms with output 1 in ascending order. Don't-care minterms have
/// no column, even when they are covered by some prime implicants.
///
/// ```
/// use qmkit::{CoverageChart, Primes, TruthTable};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let table: TruthTable = "1x10".parse()?;
/// let primes = Primes::from_terms(table.initial_terms());
/// let chart = CoverageChart::new(&primes, &table.required());
///
/// assert_eq!(chart.row_count(), 2);
/// assert_eq!(chart.column_count(), 2);
/// assert_eq!(chart.column_marks(0).count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CoverageChart {
    rows: Vec<Term>,
    columns: Vec<u32>,
    row_marks: Vec<BitSet>,
    column_marks: Vec<Vec<usize>>,
}

/// Display a chart where some rows were selected.
///
/// The selected rows are drawn with `-`, the other marks of their columns with `|`.
pub struct ChartProgress<'a> {
    chart: &'a CoverageChart,
    selected: &'a [usize],
}

impl CoverageChart {
    /// Build the chart of a list of prime implicants for a list of required minterms.
    ///
    /// The minterms are sorted and deduplicated.
    pub fn new<'a>(primes: impl IntoIterator<Item = &'a Term>, required: &[u32]) -> Self {
        let rows: Vec<Term> = primes.into_iter().cloned().collect();
        let mut columns = required.to_vec();
        columns.sort_unstable();
        columns.dedup();

        let mut row_marks = vec![BitSet::with_capacity(columns.len()); rows.len()];
        let mut column_marks = vec![Vec::new(); columns.len()];
        for (col, minterm) in columns.iter().enumerate() {
            for (row, term) in rows.iter().enumerate() {
                if term.covers(*minterm) {
                    row_marks[row].insert(col);
                    column_marks[col].push(row);
                }
            }
        }

        debug!("chart of {} primes and {} minterms", rows.len(), columns.len());
        Self {
            rows,
            columns,
            row_marks,
            column_marks,
        }
    }

    /// Number of rows (prime implicants)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (required minterms)
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The prime implicant of a row
    pub fn term(&self, row: usize) -> &Term {
        &self.rows[row]
    }

    pub fn terms(&self) -> &[Term] {
        &self.rows
    }

    /// The minterm of a column
    pub fn minterm(&self, col: usize) -> u32 {
        self.columns[col]
    }

    pub fn minterms(&self) -> &[u32] {
        &self.columns
    }

    /// Test if the prime implicant of a row covers the minterm of a column
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.row_marks[row].contains(col)
    }

    /// Rows marking a column, in ascending order
    pub fn column_marks(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.column_marks[col].iter().copied()
    }

    /// Columns marked by a row, in ascending order
    pub fn row_marks(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row_marks[row].iter()
    }

    /// Number of rows marking a column
    pub fn column_usage(&self, col: usize) -> usize {
        self.column_marks[col].len()
    }

    /// Display the chart after the selection of some rows
    pub fn progress<'a>(&'a self, selected: &'a [usize]) -> ChartProgress<'a> {
        ChartProgress {
            chart: self,
            selected,
        }
    }

    fn fmt_cells<F>(&self, f: &mut fmt::Formatter, cell: F) -> fmt::Result
    where
        F: Fn(usize, usize) -> char,
    {
        let label_width = self
            .rows
            .iter()
            .map(|t| t.width())
            .max()
            .unwrap_or(0)
            .max("uses:".len());
        let cell_width = self
            .columns
            .iter()
            .map(|m| m.to_string().len())
            .max()
            .unwrap_or(1);

        write!(f, "{:w$}", "", w = label_width)?;
        for m in &self.columns {
            write!(f, " {:^w$}", m, w = cell_width)?;
        }
        writeln!(f)?;

        for (row, term) in self.rows.iter().enumerate() {
            write!(f, "{:^w$}", term.to_string(), w = label_width)?;
            for col in 0..self.columns.len() {
                write!(f, " {:^w$}", cell(row, col), w = cell_width)?;
            }
            writeln!(f)?;
        }

        write!(f, "{:^w$}", "uses:", w = label_width)?;
        for col in 0..self.columns.len() {
            write!(f, " {:^w$}", self.column_usage(col), w = cell_width)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for CoverageChart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_cells(f, |row, col| match self.is_marked(row, col) {
            true => 'x',
            false => ' ',
        })
    }
}

impl fmt::Display for ChartProgress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chart = self.chart;
        let mut eliminated = BitSet::with_capacity(chart.column_count());
        for row in self.selected {
            eliminated.union_with(&chart.row_marks[*row]);
        }
        chart.fmt_cells(f, |row, col| {
            if self.selected.contains(&row) {
                '-'
            } else if eliminated.contains(col) {
                '|'
            } else if chart.is_marked(row, col) {
                'x'
            } else {
                ' '
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn chart_of(table: &str) -> Result<CoverageChart, QmError> {
        let table: TruthTable = table.parse()?;
        let primes = Primes::from_terms(table.initial_terms());
        Ok(CoverageChart::new(&primes, &table.required()))
    }

    #[test]
    fn marks() -> Result<(), QmError> {
        // SoP(0,1,2,5,6,7)
        let chart = chart_of("11100111")?;
        assert_eq!(chart.row_count(), 6);
        assert_eq!(chart.minterms(), &[0, 1, 2, 5, 6, 7]);

        for col in 0..chart.column_count() {
            assert_eq!(chart.column_usage(col), 2);
            for row in chart.column_marks(col) {
                assert!(chart.is_marked(row, col));
                assert!(chart.term(row).covers(chart.minterm(col)));
            }
        }
        for row in 0..chart.row_count() {
            assert_eq!(chart.row_marks(row).count(), 2);
        }
        Ok(())
    }

    #[test]
    fn dont_care_columns() -> Result<(), QmError> {
        let chart = chart_of("10x1")?;
        assert_eq!(chart.minterms(), &[0, 3]);
        assert_eq!(chart.row_count(), 2);
        assert!(chart.term(0).covers(2));
        assert_eq!(chart.row_marks(0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(chart.row_marks(1).collect::<Vec<_>>(), vec![1]);
        Ok(())
    }

    #[test]
    fn display() -> Result<(), QmError> {
        let chart = chart_of("1010")?;
        assert_eq!(format!("{}", chart), "      0 2\n -0   x x\nuses: 1 1\n");

        let chart = chart_of("1x10")?;
        assert_eq!(
            format!("{}", chart.progress(&[1])),
            "      0 2\n 0-   | |\n -0   - -\nuses: 2 1\n"
        );
        Ok(())
    }
}
