//! Truth tables and the minterms extracted from them.

use crate::*;

use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// Largest number of variables accepted for a truth table.
pub const MAX_VARIABLES: usize = 20;

/// A row of the truth table for which the function is not 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Minterm {
    /// Index of the row, its bits give the values of the variables
    pub index: u32,
    /// The output of this row is unspecified
    pub is_dont_care: bool,
}

impl Minterm {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            is_dont_care: false,
        }
    }

    pub fn dont_care(index: u32) -> Self {
        Self {
            index,
            is_dont_care: true,
        }
    }
}

/// The truth table of a Boolean function over `width` variables.
///
/// Only the rows with output 1 or with an unspecified output (don't-care) are stored.
/// The table can be parsed from a string giving the output of each row in order,
/// with `x`, `X`, `-` or `*` for don't-cares. Whitespace is ignored.
///
/// ```
/// use qmkit::TruthTable;
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let table: TruthTable = "1x10 0001".parse()?;
/// assert_eq!(table.width(), 3);
/// assert_eq!(table.required(), vec![0, 2, 7]);
/// assert_eq!(table.dont_cares(), vec![1]);
/// assert_eq!(format!("{}", table.sop()), "SoP(0,2,7) + d(1)");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    width: usize,
    minterms: Vec<Minterm>,
}

/// Display a truth table in sum-of-products notation
pub struct SopNotation<'a>(&'a TruthTable);

impl TruthTable {
    /// Build a table from explicit lists of minterms.
    ///
    /// A minterm listed in both sets is required. Duplicates are ignored.
    pub fn from_minterms(
        width: usize,
        ones: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
    ) -> Result<Self, QmError> {
        if width > MAX_VARIABLES {
            return Err(QmError::TooManyVariables(width));
        }
        let size = 1usize << width;
        let mut outputs = vec!['0'; size];
        for (m, symbol) in dont_cares
            .into_iter()
            .map(|m| (m, 'x'))
            .chain(ones.into_iter().map(|m| (m, '1')))
        {
            let slot = outputs
                .get_mut(m as usize)
                .ok_or(QmError::MintermOutOfRange(m, width))?;
            *slot = symbol;
        }
        outputs.into_iter().collect::<String>().parse()
    }

    /// Number of variables of the function
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows of the table
    pub fn len(&self) -> usize {
        1 << self.width
    }

    /// Return whether no row has output 1 or don't-care
    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    /// All stored minterms, in row order
    pub fn minterms(&self) -> &[Minterm] {
        &self.minterms
    }

    /// Sorted indices of the rows with output 1
    pub fn required(&self) -> Vec<u32> {
        self.minterms
            .iter()
            .filter(|m| !m.is_dont_care)
            .map(|m| m.index)
            .sorted()
            .dedup()
            .collect()
    }

    /// Sorted indices of the don't-care rows
    pub fn dont_cares(&self) -> Vec<u32> {
        self.minterms
            .iter()
            .filter(|m| m.is_dont_care)
            .map(|m| m.index)
            .sorted()
            .dedup()
            .collect()
    }

    /// Output of a row: `Some(true)` for 1, `Some(false)` for 0 and `None` for don't-care
    pub fn output(&self, index: u32) -> Option<bool> {
        match self.minterms.iter().find(|m| m.index == index) {
            None => Some(false),
            Some(m) if m.is_dont_care => None,
            Some(_) => Some(true),
        }
    }

    /// One fully specified term per stored minterm, don't-cares included
    pub fn initial_terms(&self) -> Vec<Term> {
        self.minterms
            .iter()
            .map(|m| Term::from_minterm(m.index, self.width))
            .collect()
    }

    /// Display the table as `SoP(..) + d(..)`
    pub fn sop(&self) -> SopNotation<'_> {
        SopNotation(self)
    }
}

impl FromStr for TruthTable {
    type Err = QmError;

    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = descr.chars().filter(|c| !c.is_whitespace()).collect();
        let len = symbols.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(QmError::InvalidTruthTable(len));
        }
        let width = len.trailing_zeros() as usize;
        if width > MAX_VARIABLES {
            return Err(QmError::TooManyVariables(width));
        }

        let mut minterms = Vec::new();
        for (index, c) in symbols.into_iter().enumerate() {
            match c {
                '0' => (),
                '1' => minterms.push(Minterm::new(index as u32)),
                'x' | 'X' | '-' | '*' => minterms.push(Minterm::dont_care(index as u32)),
                _ => return Err(QmError::InvalidCharacter(c, index)),
            }
        }
        Ok(Self { width, minterms })
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut outputs = vec!['0'; self.len()];
        for m in &self.minterms {
            outputs[m.index as usize] = if m.is_dont_care { 'x' } else { '1' };
        }
        write!(f, "{}", outputs.into_iter().collect::<String>())
    }
}

impl fmt::Display for SopNotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SoP({})", self.0.required().iter().join(","))?;
        let dont_cares = self.0.dont_cares();
        if !dont_cares.is_empty() {
            write!(f, " + d({})", dont_cares.iter().join(","))?;
        }
        Ok(())
    }
}
