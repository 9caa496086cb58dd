//! Names of the variables, used to display expressions.

use crate::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

static RE_UID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(_[01-9_]*)?[a-zA-Z][a-zA-Z01-9_]*$").unwrap());

static NAME_SEPARATORS: [char; 2] = [',', ';'];

/// An ordered list of variable names.
///
/// Names are listed with the most significant variable first, as they are read in
/// an expression: in the list `a b c`, `a` is bit 2 of the minterm index and `c` is bit 0.
/// Each name must be a valid identifier and appear only once.
///
/// ```
/// use qmkit::VarNames;
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let names: VarNames = "a b, c".parse()?;
/// assert_eq!(names.len(), 3);
/// assert_eq!(names.name_of_bit(0), "c");
/// assert!("a 2b".parse::<VarNames>().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarNames {
    names: Vec<String>,
}

impl VarNames {
    /// Build a list of names, rejecting invalid and duplicated names
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self, QmError> {
        let mut seen = HashMap::new();
        let mut result = Vec::new();
        for (idx, name) in names.into_iter().enumerate() {
            let name = name.as_ref();
            if !RE_UID.is_match(name) {
                return Err(QmError::InvalidName(name.to_string()));
            }
            if seen.insert(name.to_string(), idx).is_some() {
                return Err(QmError::ConflictingName(name.to_string()));
            }
            result.push(name.to_string());
        }
        Ok(Self { names: result })
    }

    /// Default names for a given number of variables: `a`, `b`, ... or `x0`, `x1`, ...
    pub fn generic(width: usize) -> Self {
        let names = if width <= 26 {
            (0..width)
                .map(|i| ((b'a' + i as u8) as char).to_string())
                .collect()
        } else {
            (0..width).map(|i| format!("x{}", i)).collect()
        };
        Self { names }
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return whether the list has no name
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in display order (most significant first)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }

    /// Name of the variable associated to a bit of the minterm index.
    ///
    /// Panics if the bit is out of range, see [VarNames::get_bit].
    pub fn name_of_bit(&self, bit: usize) -> &str {
        &self.names[self.names.len() - 1 - bit]
    }

    /// Name of the variable associated to a bit, if there is one
    pub fn get_bit(&self, bit: usize) -> Option<&str> {
        if bit < self.names.len() {
            Some(self.name_of_bit(bit))
        } else {
            None
        }
    }

    /// Check that the list provides one name per variable of the function
    pub fn check_width(&self, width: usize) -> Result<(), QmError> {
        if self.names.len() != width {
            return Err(QmError::VariableCountMismatch {
                expected: width,
                found: self.names.len(),
            });
        }
        Ok(())
    }
}

impl FromStr for VarNames {
    type Err = QmError;

    /// Parse names separated by whitespace, commas or semicolons
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(
            s.split(|c: char| c.is_whitespace() || NAME_SEPARATORS.contains(&c))
                .filter(|n| !n.is_empty()),
        )
    }
}

impl fmt::Display for VarNames {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn parse_names() -> Result<(), QmError> {
        let names: VarNames = " A  B;C,d_1 ".parse()?;
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["A", "B", "C", "d_1"]);
        assert_eq!(names.name_of_bit(3), "A");
        assert_eq!(names.name_of_bit(0), "d_1");
        assert_eq!(format!("{}", names), "A B C d_1");

        assert_eq!(
            "a b a".parse::<VarNames>(),
            Err(QmError::ConflictingName("a".to_string()))
        );
        assert_eq!(
            "a te%t".parse::<VarNames>(),
            Err(QmError::InvalidName("te%t".to_string()))
        );
        assert!("".parse::<VarNames>()?.is_empty());
        Ok(())
    }

    #[test]
    fn width() -> Result<(), QmError> {
        let names: VarNames = "a b c".parse()?;
        assert!(names.check_width(3).is_ok());
        assert_eq!(
            names.check_width(2),
            Err(QmError::VariableCountMismatch {
                expected: 2,
                found: 3
            })
        );

        let generic = VarNames::generic(4);
        assert_eq!(format!("{}", generic), "a b c d");
        assert_eq!(VarNames::generic(30).name_of_bit(29), "x0");
        Ok(())
    }
}
