//! The minimization pipeline: primes, chart, essentials and minimal cover in one call.

use crate::cover::Essentials;
use crate::efmt::DEFAULT_FMT_CFG;
use crate::*;

use bit_set::BitSet;
use log::info;

/// Result of the minimization of a truth table, with all intermediate steps.
#[derive(Clone, Debug)]
pub struct Minimization {
    generations: Vec<Generation>,
    primes: Primes,
    chart: CoverageChart,
    essentials: Essentials,
    selected: Vec<usize>,
    steps: Vec<CoverStep>,
}

impl Minimization {
    /// Merge generations, starting with the minterms
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    pub fn primes(&self) -> &Primes {
        &self.primes
    }

    pub fn chart(&self) -> &CoverageChart {
        &self.chart
    }

    /// Rows of the chart holding essential prime implicants
    pub fn essential_rows(&self) -> &[usize] {
        self.essentials.rows()
    }

    /// Rows of the chart selected by the minimal cover search
    pub fn selected_rows(&self) -> &[usize] {
        &self.selected
    }

    /// Rows of the chart which are not part of the cover
    pub fn unused_rows(&self) -> Vec<usize> {
        (0..self.chart.row_count())
            .filter(|row| !self.essentials.contains(*row) && !self.selected.contains(row))
            .collect()
    }

    /// Selection steps, essential rows first
    pub fn steps(&self) -> &[CoverStep] {
        &self.steps
    }

    /// The final cover: essential prime implicants followed by the selected ones
    pub fn cover(&self) -> Cover {
        Cover::new(
            self.essentials
                .rows()
                .iter()
                .chain(self.selected.iter())
                .map(|row| self.chart.term(*row).clone()),
        )
    }
}

/// Minimize a Boolean function given by its truth table.
///
/// Fails with [QmError::EmptyFunction] if no row of the table has output 1:
/// the function is then the constant 0 and has no sum-of-products cover.
pub fn minimize(table: &TruthTable) -> Result<Minimization, QmError> {
    let required = table.required();
    if required.is_empty() {
        return Err(QmError::EmptyFunction);
    }

    let (primes, generations) = Primes::generate(table.initial_terms());
    let chart = CoverageChart::new(&primes, &required);
    let essentials = Essentials::extract(&chart);

    let selected = crate::search::minimal_cover(&chart, &essentials.row_set(), essentials.covered())
        .ok_or_else(|| QmError::DegenerateCover(uncovered(&chart, essentials.covered())))?;

    let selections = essentials
        .rows()
        .iter()
        .map(|row| (*row, Selection::Essential))
        .chain(selected.iter().map(|row| (*row, Selection::Search)));
    let steps = CoverStep::trace(&chart, selections);

    // Every column must be eliminated by some step
    let mut covered = BitSet::with_capacity(chart.column_count());
    for step in &steps {
        covered.extend(chart.row_marks(step.row));
    }
    if covered.len() != chart.column_count() {
        return Err(QmError::DegenerateCover(uncovered(&chart, &covered)));
    }

    info!(
        "{} minterms ({} don't-care): {} primes, {} essential, {} selected",
        required.len(),
        table.dont_cares().len(),
        primes.len(),
        essentials.len(),
        selected.len()
    );

    Ok(Minimization {
        generations,
        primes,
        chart,
        essentials,
        selected,
        steps,
    })
}

fn uncovered(chart: &CoverageChart, covered: &BitSet) -> Vec<u32> {
    (0..chart.column_count())
        .filter(|col| !covered.contains(*col))
        .map(|col| chart.minterm(col))
        .collect()
}

/// Minimize a truth table and render the result with the given names.
///
/// ```
/// assert_eq!(qmkit::simplify("1010", "a b").unwrap(), "b'");
/// assert_eq!(qmkit::simplify("0000", "a b").unwrap(), "0");
/// ```
pub fn simplify(table: &str, names: &str) -> Result<String, QmError> {
    let table: TruthTable = table.parse()?;
    let names: VarNames = names.parse()?;
    names.check_width(table.width())?;

    match minimize(&table) {
        Ok(m) => m.cover().expression(&names, &DEFAULT_FMT_CFG),
        Err(QmError::EmptyFunction) => Ok(DEFAULT_FMT_CFG.constant(false).to_string()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    use itertools::Itertools;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("1010", "a b", "b'")]
    #[case("11111111", "a b c", "1")]
    #[case("0000001000000000", "a b c d", "a'.b.c.d'")]
    #[case("11111110", "a b c", "a' + b' + c'")]
    #[case("0x01", "a b", "b")]
    #[case("00000000", "a b c", "0")]
    #[case("0xx0", "a b", "0")]
    fn scenarios(#[case] table: &str, #[case] names: &str, #[case] expected: &str) {
        assert_eq!(simplify(table, names), Ok(expected.to_string()));
    }

    #[rstest]
    #[case("10101", "a b", QmError::InvalidTruthTable(5))]
    #[case("1010", "a b c", QmError::VariableCountMismatch { expected: 2, found: 3 })]
    #[case("1010", "a a", QmError::ConflictingName("a".to_string()))]
    #[case("10?0", "a b", QmError::InvalidCharacter('?', 2))]
    fn invalid_inputs(#[case] table: &str, #[case] names: &str, #[case] expected: QmError) {
        assert_eq!(simplify(table, names), Err(expected));
    }

    #[test]
    fn cyclic_function() -> Result<(), QmError> {
        let table = TruthTable::from_minterms(3, [0, 1, 2, 5, 6, 7], [])?;
        let m = minimize(&table)?;
        assert_eq!(m.primes().len(), 6);
        assert!(m.essential_rows().is_empty());
        assert_eq!(m.selected_rows().len(), 3);
        assert_eq!(m.unused_rows().len(), 3);
        assert_eq!(m.cover().len(), 3);
        assert!(m.steps().iter().all(|s| s.selection == Selection::Search));
        Ok(())
    }

    #[test]
    fn essential_steps_first() -> Result<(), QmError> {
        // 0--, -01 and -10 are all essential
        let table: TruthTable = "11110110".parse()?;
        let m = minimize(&table)?;
        assert!(!m.essential_rows().is_empty());
        let kinds: Vec<Selection> = m.steps().iter().map(|s| s.selection).collect();
        let first_search = kinds
            .iter()
            .position(|k| *k == Selection::Search)
            .unwrap_or(kinds.len());
        assert!(kinds[first_search..].iter().all(|k| *k == Selection::Search));

        // each required minterm is eliminated exactly once
        let eliminated: Vec<u32> = m
            .steps()
            .iter()
            .flat_map(|s| s.eliminated.iter().copied())
            .sorted()
            .collect();
        assert_eq!(eliminated, table.required());
        Ok(())
    }

    #[test]
    fn empty_function() -> Result<(), QmError> {
        let table: TruthTable = "0x00".parse()?;
        assert_eq!(minimize(&table).err(), Some(QmError::EmptyFunction));
        Ok(())
    }

    /// Size of the smallest subset of primes covering all required minterms
    fn brute_force_size(primes: &Primes, required: &[u32]) -> usize {
        let terms = primes.as_slice();
        (0u32..1 << terms.len())
            .filter(|mask| {
                required.iter().all(|m| {
                    terms
                        .iter()
                        .enumerate()
                        .any(|(i, t)| mask & (1 << i) != 0 && t.covers(*m))
                })
            })
            .map(|mask| mask.count_ones() as usize)
            .min()
            .unwrap_or(0)
    }

    fn table_strategy() -> impl Strategy<Value = String> {
        (1usize..=4).prop_flat_map(|width| {
            prop::collection::vec(prop::sample::select(vec!['0', '1', 'x']), 1 << width)
                .prop_map(|symbols| symbols.into_iter().collect::<String>())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn sound_complete_and_minimal(descr in table_strategy()) {
            let table: TruthTable = descr.parse().unwrap();
            let required = table.required();
            prop_assume!(!required.is_empty());

            let m = minimize(&table).unwrap();
            let cover = m.cover();

            for index in 0..table.len() as u32 {
                match table.output(index) {
                    // completeness
                    Some(true) => prop_assert!(cover.eval(index)),
                    // soundness
                    Some(false) => prop_assert!(!cover.eval(index)),
                    None => (),
                }
            }

            // every term of the cover is a prime implicant
            for t in cover.iter() {
                prop_assert!(m.primes().iter().any(|p| p == t));
            }

            if m.primes().len() <= 13 {
                prop_assert_eq!(cover.len(), brute_force_size(m.primes(), &required));
            }
        }

        #[test]
        fn distinct_prime_patterns(descr in table_strategy()) {
            let table: TruthTable = descr.parse().unwrap();
            let primes = Primes::from_terms(table.initial_terms());
            let patterns: Vec<String> = primes.iter().map(|p| p.to_string()).collect();
            prop_assert_eq!(patterns.iter().unique().count(), patterns.len());

            // the covered set of each prime is the set of minterms it matches
            for p in primes.iter() {
                for index in 0..table.len() as u32 {
                    let listed = table.output(index) != Some(false);
                    prop_assert_eq!(p.covers(index), listed && p.matches(index));
                }
            }
        }

        #[test]
        fn essential_rows_are_unique(descr in table_strategy()) {
            let table: TruthTable = descr.parse().unwrap();
            prop_assume!(!table.required().is_empty());
            let m = minimize(&table).unwrap();
            let rows = m.essential_rows();
            prop_assert_eq!(rows.iter().unique().count(), rows.len());
            for row in rows {
                let chart = m.chart();
                prop_assert!((0..chart.column_count())
                    .any(|col| chart.column_usage(col) == 1 && chart.is_marked(*row, col)));
            }

            // the search never picks an essential row again
            prop_assert!(m.selected_rows().iter().all(|r| !rows.contains(r)));
            prop_assert_eq!(m.cover().len(), rows.len() + m.selected_rows().len());
        }
    }
}
