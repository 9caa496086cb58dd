//! Generation of prime implicants by iterative merging of terms.

use crate::efmt::FormatterConfig;
use crate::*;

use bit_set::BitSet;
use delegate::delegate;
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use std::vec::IntoIter;

/// The set of terms produced by a round of merges.
///
/// Round 0 contains one term per minterm (don't-cares included). Each round merges all pairs
/// of terms at distance 1 into the next generation. Terms are deduplicated by pattern:
/// two merges producing the same pattern yield a single term covering both sets of minterms.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    round: usize,
    terms: Vec<Term>,
    /// Position of each pattern in the list of terms
    index: HashMap<Term, usize>,
}

impl Generation {
    /// Create the first generation from a list of terms
    pub fn initial(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut generation = Self::default();
        for t in terms {
            generation.push_new_term(t);
        }
        generation
    }

    /// Rank of this generation in the merge process
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    delegate! {
        to self.terms {
            /// Number of distinct patterns in this generation
            pub fn len(&self) -> usize;
            /// Return whether this generation has no term
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, Term>;
        }
    }

    /// Add a term, or extend the covered minterms of an existing term with the same pattern
    fn push_new_term(&mut self, term: Term) {
        match self.index.get(&term) {
            Some(&pos) => self.terms[pos].absorb(&term),
            None => {
                self.index.insert(term.clone(), self.terms.len());
                self.terms.push(term);
            }
        }
    }

    /// Pairs of positions `(i, j)` with `i < j` whose numbers of positive digits differ by one.
    ///
    /// Only these pairs can be merged. They are listed in the order of a scan over all pairs.
    fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, t) in self.terms.iter().enumerate() {
            groups.entry(t.one_count()).or_default().push(i);
        }

        let mut pairs = Vec::new();
        for (ones, lower) in &groups {
            if let Some(upper) = groups.get(&(ones + 1)) {
                for (i, j) in lower.iter().cartesian_product(upper) {
                    pairs.push((*i.min(j), *i.max(j)));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Merge all pairs of terms at distance 1.
    ///
    /// Returns the next generation and the terms which were not merged with any other term:
    /// these terms are prime implicants.
    pub fn advance(&self) -> (Generation, Vec<Term>) {
        let mut next = Generation {
            round: self.round + 1,
            ..Generation::default()
        };
        let mut merged = BitSet::with_capacity(self.terms.len());

        for (i, j) in self.candidate_pairs() {
            if let Some(t) = self.terms[i].merge(&self.terms[j]) {
                merged.insert(i);
                merged.insert(j);
                next.push_new_term(t);
            }
        }

        let promoted = self
            .terms
            .iter()
            .enumerate()
            .filter(|(i, _)| !merged.contains(*i))
            .map(|(_, t)| t.clone())
            .collect();
        (next, promoted)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for t in &self.terms {
            writeln!(f, "{{ {} }} {}", t.minterms().join(", "), t)?;
        }
        Ok(())
    }
}

/// The list of all prime implicants of a function.
///
/// A prime implicant is a term which can not be merged with any other term of its generation,
/// i.e. which is not contained in a larger implicant. Prime implicants are listed in the order
/// in which they were found: the most specific first.
///
/// ```
/// use qmkit::{Primes, TruthTable};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let table: TruthTable = "11111110".parse()?;
/// let primes = Primes::from_terms(table.initial_terms());
/// let patterns: Vec<String> = primes.iter().map(|p| p.to_string()).collect();
/// assert_eq!(patterns, vec!["0--", "-0-", "--0"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Primes {
    terms: Vec<Term>,
}

impl Primes {
    /// Extract the prime implicants from an initial list of terms
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        Self::generate(terms).0
    }

    /// Extract the prime implicants and keep the list of all intermediate generations.
    ///
    /// The merge rounds are repeated until a generation is empty: at this point each
    /// term has been either promoted as prime or subsumed by a merged term.
    pub fn generate(terms: impl IntoIterator<Item = Term>) -> (Self, Vec<Generation>) {
        let mut primes = Primes::default();
        let mut history = Vec::new();
        let mut current = Generation::initial(terms);

        while !current.is_empty() {
            let (next, promoted) = current.advance();
            debug!(
                "round {}: {} terms, {} merged terms, {} new primes",
                current.round(),
                current.len(),
                next.len(),
                promoted.len()
            );
            primes.terms.extend(promoted);
            history.push(current);
            current = next;
        }

        (primes, history)
    }

    delegate! {
        to self.terms {
            /// Get the number of prime implicants
            pub fn len(&self) -> usize;
            /// Return whether there are no prime implicant (the function is always false)
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, Term>;
            pub fn get(&self, index: usize) -> Option<&Term>;
        }
    }

    pub fn as_slice(&self) -> &[Term] {
        &self.terms
    }
}

/// Collecting terms runs the complete merge process on them:
/// the result holds the prime implicants covering the collected terms, not the terms themselves.
///
/// ```
/// use qmkit::{Primes, Term};
/// let primes: Primes = (0..4).map(|m| Term::from_minterm(m, 2)).collect();
/// assert_eq!(primes.len(), 1);
/// ```
impl FromIterator<Term> for Primes {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl<'a> IntoIterator for &'a Primes {
    type Item = &'a Term;
    type IntoIter = Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl IntoIterator for Primes {
    type Item = Term;
    type IntoIter = IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl Rule for Primes {
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

impl fmt::Display for Primes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.terms {
            writeln!(f, "{}", t)?;
        }
        Ok(())
    }
}
