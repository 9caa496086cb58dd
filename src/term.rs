use crate::efmt::FormatterConfig;
use crate::*;

use bit_set::BitSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// State of a single position in a [Term].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Digit {
    /// The variable is fixed at 0 (complemented literal)
    Zero,
    /// The variable is fixed at 1
    One,
    /// The variable was eliminated by a merge
    Free,
}

impl Digit {
    /// Character used in the textual form of patterns
    pub fn symbol(self) -> char {
        match self {
            Digit::Zero => '0',
            Digit::One => '1',
            Digit::Free => '-',
        }
    }
}

/// A product term over `width` variables, together with the minterms it was built from.
///
/// The pattern is represented as two bit-sets of positions fixed at 1 and fixed at 0;
/// positions in neither set are free. Bit 0 is the least significant bit of the minterm index.
///
/// Terms are compared and hashed by pattern only: the set of covered minterms is derived
/// information which does not take part in their identity. Two merge paths leading to the
/// same pattern thus produce equal terms.
///
/// The textual form lists the most significant bit first and uses `-` for free positions:
///
/// ```
/// use qmkit::Term;
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let t: Term = "1-0".parse()?;
/// assert_eq!(t.minterms().collect::<Vec<_>>(), vec![4, 6]);
/// assert_eq!(t.eliminated(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Term {
    pub(crate) width: usize,
    pub(crate) positive: BitSet,
    pub(crate) negative: BitSet,
    pub(crate) minterms: BitSet,
}

impl Term {
    /// Create the fully specified term of a single minterm
    pub fn from_minterm(index: u32, width: usize) -> Self {
        let mut positive = BitSet::with_capacity(width);
        let mut negative = BitSet::with_capacity(width);
        for bit in 0..width {
            if (index >> bit) & 1 == 1 {
                positive.insert(bit);
            } else {
                negative.insert(bit);
            }
        }
        let mut minterms = BitSet::new();
        minterms.insert(index as usize);
        Self {
            width,
            positive,
            negative,
            minterms,
        }
    }

    /// Number of variables of the pattern
    pub fn width(&self) -> usize {
        self.width
    }

    /// State of a single position
    pub fn digit(&self, bit: usize) -> Digit {
        if self.positive.contains(bit) {
            Digit::One
        } else if self.negative.contains(bit) {
            Digit::Zero
        } else {
            Digit::Free
        }
    }

    /// Iterate over the digits, starting with the least significant bit
    pub fn digits(&self) -> impl Iterator<Item = Digit> + '_ {
        (0..self.width).map(|bit| self.digit(bit))
    }

    /// Number of fixed positions, i.e. of literals in the product term
    pub fn literal_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Number of positions fixed at 1
    pub fn one_count(&self) -> usize {
        self.positive.len()
    }

    /// Number of positions eliminated by merges
    pub fn eliminated(&self) -> usize {
        self.width - self.literal_count()
    }

    /// Return whether all positions are free (the term is the constant 1)
    pub fn is_free(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Iterate over the covered minterms in ascending order
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        self.minterms.iter().map(|m| m as u32)
    }

    /// Number of covered minterms
    pub fn minterm_count(&self) -> usize {
        self.minterms.len()
    }

    /// Test if a minterm is part of the covered set
    pub fn covers(&self, minterm: u32) -> bool {
        self.minterms.contains(minterm as usize)
    }

    /// Test if the bits of a minterm agree with all fixed positions of the pattern
    pub fn matches(&self, minterm: u32) -> bool {
        self.positive.iter().all(|bit| (minterm >> bit) & 1 == 1)
            && self.negative.iter().all(|bit| (minterm >> bit) & 1 == 0)
    }

    /// Count the positions where the two patterns have different digits.
    ///
    /// A free position facing a fixed one counts as a difference.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        let width = self.width.max(other.width);
        (0..width)
            .filter(|bit| self.digit(*bit) != other.digit(*bit))
            .count()
    }

    /// Test if the two patterns have the same free positions
    pub fn same_free_positions(&self, other: &Self) -> bool {
        let mut fixed = self.positive.clone();
        fixed.union_with(&self.negative);
        let mut other_fixed = other.positive.clone();
        other_fixed.union_with(&other.negative);
        same_bits(&fixed, &other_fixed)
    }

    /// Merge two terms differing by a single fixed bit.
    ///
    /// The two patterns must have the same free positions and a single conflict
    /// (a position fixed at 1 in one and at 0 in the other). The conflicting position
    /// becomes free and the covered minterms of both terms are combined.
    /// Returns `None` for any other pair.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        if self.width != other.width || !self.same_free_positions(other) {
            return None;
        }

        let mut positive = self.positive.clone();
        positive.union_with(&other.positive);
        let mut negative = self.negative.clone();
        negative.union_with(&other.negative);

        let conflict = {
            let mut conflicts = positive.intersection(&negative);
            match (conflicts.next(), conflicts.next()) {
                (Some(bit), None) => bit,
                _ => return None,
            }
        };
        positive.remove(conflict);
        negative.remove(conflict);

        let mut minterms = self.minterms.clone();
        minterms.union_with(&other.minterms);

        Some(Self {
            width: self.width,
            positive,
            negative,
            minterms,
        })
    }

    /// Add the covered minterms of an equal pattern
    pub(crate) fn absorb(&mut self, other: &Self) {
        self.minterms.union_with(&other.minterms);
    }
}

fn same_bits(a: &BitSet, b: &BitSet) -> bool {
    a.iter().eq(b.iter())
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && same_bits(&self.positive, &other.positive)
            && same_bits(&self.negative, &other.negative)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        for bit in &self.positive {
            bit.hash(state);
        }
        // separate the two sets
        self.width.hash(state);
        for bit in &self.negative {
            bit.hash(state);
        }
    }
}

impl FromStr for Term {
    type Err = QmError;

    /// Parse a pattern written with the most significant bit first.
    ///
    /// Spaces and single quotes are ignored, `-` and `_` denote free positions.
    /// The covered set is the set of all minterms matched by the pattern.
    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = descr
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t' | '\''))
            .collect();
        let width = symbols.len();
        if width > MAX_VARIABLES {
            return Err(QmError::TooManyVariables(width));
        }

        let mut term = Term {
            width,
            positive: BitSet::with_capacity(width),
            negative: BitSet::with_capacity(width),
            minterms: BitSet::new(),
        };
        for (rank, c) in symbols.iter().enumerate() {
            let bit = width - 1 - rank;
            match c {
                '-' | '_' => (),
                '0' => {
                    term.negative.insert(bit);
                }
                '1' => {
                    term.positive.insert(bit);
                }
                _ => return Err(QmError::InvalidPattern(descr.to_string())),
            }
        }

        term.minterms = (0..1u32 << width)
            .filter(|m| term.matches(*m))
            .map(|m| m as usize)
            .collect();
        Ok(term)
    }
}

impl Rule for Term {
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &VarNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result {
        cfg.write_term(f, self, names)
    }

    fn eval(&self, minterm: u32) -> bool {
        self.matches(minterm)
    }

    fn collect_support(&self, support: &mut BitSet) {
        support.union_with(&self.positive);
        support.union_with(&self.negative);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in (0..self.width).rev() {
            write!(f, "{}", self.digit(bit).symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::term::*;

    #[test]
    fn construct_and_display() -> Result<(), QmError> {
        let t = Term::from_minterm(6, 4);
        assert_eq!(format!("{}", t), "0110");
        assert_eq!(t.digit(0), Digit::Zero);
        assert_eq!(t.digit(1), Digit::One);
        assert_eq!(t.literal_count(), 4);
        assert_eq!(t.minterms().collect::<Vec<_>>(), vec![6]);

        let p: Term = "1 -0'1".parse()?;
        assert_eq!(format!("{}", p), "1-01");
        assert_eq!(p.minterms().collect::<Vec<_>>(), vec![9, 13]);
        assert_eq!(p.eliminated(), 1);

        assert!("1-2".parse::<Term>().is_err());
        Ok(())
    }

    #[test]
    fn merge() -> Result<(), QmError> {
        let a = Term::from_minterm(0, 3);
        let b = Term::from_minterm(4, 3);
        assert_eq!(a.hamming_distance(&b), 1);

        let m = a.merge(&b).unwrap();
        assert_eq!(format!("{}", m), "-00");
        assert_eq!(m.minterms().collect::<Vec<_>>(), vec![0, 4]);

        // more than one differing bit
        let c = Term::from_minterm(3, 3);
        assert_eq!(a.hamming_distance(&c), 2);
        assert!(a.merge(&c).is_none());

        // identical patterns do not merge
        assert!(a.merge(&a).is_none());
        Ok(())
    }

    #[test]
    fn misaligned_free_positions() -> Result<(), QmError> {
        let a: Term = "-00".parse()?;
        let b: Term = "0-0".parse()?;
        let c: Term = "000".parse()?;

        assert_eq!(a.hamming_distance(&c), 1);
        assert!(a.merge(&c).is_none());
        assert!(a.merge(&b).is_none());

        let d: Term = "-10".parse()?;
        let e = a.merge(&d).unwrap();
        assert_eq!(format!("{}", e), "--0");
        assert_eq!(e.minterms().collect::<Vec<_>>(), vec![0, 2, 4, 6]);
        Ok(())
    }

    #[test]
    fn identity_ignores_minterms() {
        let m01 = Term::from_minterm(0, 2).merge(&Term::from_minterm(1, 2)).unwrap();
        let m23 = Term::from_minterm(2, 2).merge(&Term::from_minterm(3, 2)).unwrap();
        let m02 = Term::from_minterm(0, 2).merge(&Term::from_minterm(2, 2)).unwrap();
        let m13 = Term::from_minterm(1, 2).merge(&Term::from_minterm(3, 2)).unwrap();

        let first = m01.merge(&m23).unwrap();
        let second = m02.merge(&m13).unwrap();
        assert_eq!(first, second);
        assert!(first.is_free());
        assert_eq!(format!("{}", first), "--");

        let mut partial = Term::from_minterm(0, 2);
        partial.minterms.clear();
        assert_eq!(partial, Term::from_minterm(0, 2));
    }

    #[test]
    fn matching() -> Result<(), QmError> {
        let t: Term = "1--0".parse()?;
        assert!(t.matches(8));
        assert!(t.matches(14));
        assert!(!t.matches(9));
        assert!(!t.matches(6));
        assert!(t.covers(10));
        assert!(!t.covers(1));

        assert!(t.eval(12));
        assert_eq!(t.get_support().iter().collect::<Vec<_>>(), vec![0, 3]);
        Ok(())
    }
}
