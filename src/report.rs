//! Detailed textual report of a minimization.

use crate::efmt::{FormatterConfig, DEFAULT_FMT_CFG};
use crate::*;

use std::fmt;

/// Human-readable account of all steps of the minimization of a truth table.
///
/// The report lists the minterms, the coverage chart, the prime implicants of the cover,
/// some statistics and the final expression. The verbose mode adds the merge generations
/// and the reduction of the chart step by step.
///
/// ```
/// use qmkit::{Report, TruthTable, VarNames};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let table: TruthTable = "1010".parse()?;
/// let names: VarNames = "a b".parse()?;
/// let report = Report::new(&table, &names)?;
/// assert!(report.to_string().ends_with("Final expression:\nb'\n"));
/// # Ok(())
/// # }
/// ```
pub struct Report<'a> {
    table: &'a TruthTable,
    names: &'a VarNames,
    cfg: &'a FormatterConfig<'a>,
    verbose: bool,
    minimization: Option<Minimization>,
}

impl<'a> Report<'a> {
    /// Minimize a table and prepare its report.
    ///
    /// A function without any required minterm is reported as the constant 0.
    pub fn new(table: &'a TruthTable, names: &'a VarNames) -> Result<Self, QmError> {
        names.check_width(table.width())?;
        let minimization = match minimize(table) {
            Ok(m) => Some(m),
            Err(QmError::EmptyFunction) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            table,
            names,
            cfg: &DEFAULT_FMT_CFG,
            verbose: false,
            minimization,
        })
    }

    /// Include the merge generations and the reduction steps
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Select the notation of the expressions
    pub fn notation(mut self, cfg: &'a FormatterConfig<'a>) -> Self {
        self.cfg = cfg;
        self
    }

    /// The underlying minimization, if the function is not constant 0
    pub fn minimization(&self) -> Option<&Minimization> {
        self.minimization.as_ref()
    }

    fn fmt_minterms(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Minterms: {}", self.table.sop())?;
        for m in self.table.minterms() {
            write!(f, "{{ {} }} {}", m.index, Term::from_minterm(m.index, self.table.width()))?;
            if m.is_dont_care {
                write!(f, " (don't care)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn fmt_rows(
        &self,
        f: &mut fmt::Formatter,
        title: &str,
        chart: &CoverageChart,
        rows: &[usize],
    ) -> fmt::Result {
        writeln!(f, "{}:", title)?;
        if rows.is_empty() {
            return writeln!(f, "none");
        }
        for row in rows {
            let term = chart.term(*row);
            writeln!(f, "{}  {}", term, self.cfg.named(term, self.names))?;
        }
        Ok(())
    }

    fn fmt_minimization(&self, f: &mut fmt::Formatter, m: &Minimization) -> fmt::Result {
        if self.verbose {
            // the first generation only repeats the minterms
            for generation in m.generations().iter().skip(1) {
                writeln!(f, "\nGroup {}:", generation.round())?;
                write!(f, "{}", generation)?;
            }
        }

        writeln!(f, "\nCoverage chart:")?;
        write!(f, "{}", m.chart())?;

        if self.verbose {
            let mut selected = Vec::with_capacity(m.steps().len());
            for (idx, step) in m.steps().iter().enumerate() {
                selected.push(step.row);
                writeln!(f, "\nStep {}: {}", idx + 1, step)?;
                write!(f, "{}", m.chart().progress(&selected))?;
            }
        }

        writeln!(f)?;
        self.fmt_rows(f, "Essential prime implicants", m.chart(), m.essential_rows())?;
        writeln!(f)?;
        self.fmt_rows(f, "Non-essential prime implicants", m.chart(), m.selected_rows())?;

        let cover = m.cover();
        writeln!(f, "\nStatistics:")?;
        write!(f, "{}", cover.statistics())?;

        writeln!(f, "\nFinal expression:")?;
        writeln!(f, "{}", self.cfg.named(&cover, self.names))
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_minterms(f)?;
        match &self.minimization {
            Some(m) => self.fmt_minimization(f, m),
            None => writeln!(f, "\nFinal expression:\n{}", self.cfg.constant(false)),
        }
    }
}
