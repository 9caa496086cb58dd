//! Selection of prime implicants covering all required minterms.

use crate::efmt::FormatterConfig;
use crate::*;

use bit_set::BitSet;
use delegate::delegate;
use itertools::Itertools;
use log::debug;
use std::fmt;
use std::slice::Iter;

/// Prime implicants which are the only ones covering at least one required minterm.
#[derive(Clone, Debug, Default)]
pub struct Essentials {
    rows: Vec<usize>,
    covered: BitSet,
}

/// How a row of the chart was selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The row is the only one covering some column
    Essential,
    /// The row was selected by the minimal cover search
    Search,
}

/// A single step of the cover construction: a selected row and the columns it eliminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverStep {
    pub row: usize,
    pub selection: Selection,
    /// Minterms which were not covered by the previous steps
    pub eliminated: Vec<u32>,
}

/// Final list of prime implicants covering all required minterms
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cover {
    terms: Vec<Term>,
}

/// Count the terms of a cover by size (number of eliminated variables).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// (eliminated variables, number of terms), sorted by decreasing term size
    groups: Vec<(usize, usize)>,
}

impl Essentials {
    /// Find the essential rows of a chart.
    ///
    /// A column marked by a single row makes this row essential. Rows are listed in
    /// ascending order, without duplicates.
    pub fn extract(chart: &CoverageChart) -> Self {
        let rows: Vec<usize> = (0..chart.column_count())
            .filter(|col| chart.column_usage(*col) == 1)
            .filter_map(|col| chart.column_marks(col).next())
            .sorted()
            .dedup()
            .collect();

        let mut covered = BitSet::with_capacity(chart.column_count());
        for row in &rows {
            covered.extend(chart.row_marks(*row));
        }

        debug!(
            "{} essential primes covering {} of {} minterms",
            rows.len(),
            covered.len(),
            chart.column_count()
        );
        Self { rows, covered }
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Columns covered by at least one essential row
    pub fn covered(&self) -> &BitSet {
        &self.covered
    }

    /// Rows as a set, to exclude them from other selections
    pub fn row_set(&self) -> BitSet {
        self.rows.iter().copied().collect()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    delegate! {
        to self.rows {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }
}

impl CoverStep {
    /// Replay a sequence of selections on a chart and record the columns eliminated by each one.
    pub fn trace(
        chart: &CoverageChart,
        selections: impl IntoIterator<Item = (usize, Selection)>,
    ) -> Vec<Self> {
        let mut covered = BitSet::with_capacity(chart.column_count());
        selections
            .into_iter()
            .map(|(row, selection)| {
                let eliminated = chart
                    .row_marks(row)
                    .filter(|col| covered.insert(*col))
                    .map(|col| chart.minterm(col))
                    .collect();
                CoverStep {
                    row,
                    selection,
                    eliminated,
                }
            })
            .collect()
    }
}

impl fmt::Display for CoverStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.selection {
            Selection::Essential => "essential",
            Selection::Search => "selected",
        };
        write!(
            f,
            "row {} ({}): eliminates {{ {} }}",
            self.row,
            kind,
            self.eliminated.iter().join(", ")
        )
    }
}

impl Cover {
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// Render the cover as a sum-of-products expression.
    ///
    /// Fails if the cover is empty or if the names do not match the width of the terms.
    pub fn expression(&self, names: &VarNames, cfg: &FormatterConfig) -> Result<String, QmError> {
        let width = match self.terms.first() {
            None => return Err(QmError::EmptyCover),
            Some(t) => t.width(),
        };
        names.check_width(width)?;
        Ok(cfg.named(self, names).to_string())
    }

    /// Count the terms by number of eliminated variables
    pub fn statistics(&self) -> Statistics {
        let groups = self
            .terms
            .iter()
            .map(|t| t.eliminated())
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.0.cmp(&a.0))
            .collect();
        Statistics { groups }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    delegate! {
        to self.terms {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, Term>;
        }
    }
}

impl Rule for Cover {
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &VarNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result {
        cfg.write_sum(f, &self.terms, names)
    }

    fn eval(&self, minterm: u32) -> bool {
        self.terms.iter().any(|t| t.matches(minterm))
    }

    fn collect_support(&self, support: &mut BitSet) {
        for t in &self.terms {
            t.collect_support(support);
        }
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.terms.iter().join(" + "))
    }
}

impl Statistics {
    /// Pairs of (eliminated variables, number of terms), largest terms first
    pub fn groups(&self) -> &[(usize, usize)] {
        &self.groups
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (eliminated, count) in &self.groups {
            let plural_group = if *count > 1 { "s" } else { "" };
            let plural_element = if *eliminated > 0 { "s" } else { "" };
            writeln!(
                f,
                "{} group{} of 2^{} element{}",
                count, plural_group, eliminated, plural_element
            )?;
        }
        Ok(())
    }
}
