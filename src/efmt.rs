//! Formatting API for sum-of-products expressions

use crate::{Digit, Rule, Term, VarNames};

use std::fmt;

/// The two operators of a sum-of-products
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    And,
    Or,
}

/// Spelling of the operators and constants in rendered expressions.
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_not: &'a str,
    postfix_not: bool,
    s_true: &'a str,
    s_false: &'a str,
}

/// Textbook notation: `a.b' + c`
pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: ".",
    s_or: " + ",
    s_not: "'",
    postfix_not: true,
    s_true: "1",
    s_false: "0",
};

/// Programming notation: `a & !b | c`
pub static INFIX_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " & ",
    s_or: " | ",
    s_not: "!",
    postfix_not: false,
    s_true: "1",
    s_false: "0",
};

pub static LOWERCASE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " and ",
    s_or: " or ",
    s_not: "not ",
    postfix_not: false,
    s_true: "true",
    s_false: "false",
};

/// A rule displayed with named variables and a selected notation
pub struct Named<'a, R: Rule + ?Sized> {
    rule: &'a R,
    names: &'a VarNames,
    cfg: &'a FormatterConfig<'a>,
}

impl<'a> FormatterConfig<'a> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
        }
    }

    pub fn constant(&self, value: bool) -> &str {
        match value {
            true => self.s_true,
            false => self.s_false,
        }
    }

    /// Wrap a rule to display it with this notation
    pub fn named<R: Rule + ?Sized>(&'a self, rule: &'a R, names: &'a VarNames) -> Named<'a, R> {
        Named {
            rule,
            names,
            cfg: self,
        }
    }

    /// Write a single literal, complemented if the value is false
    pub fn write_literal(&self, f: &mut fmt::Formatter, name: &str, value: bool) -> fmt::Result {
        match (value, self.postfix_not) {
            (true, _) => write!(f, "{}", name),
            (false, true) => write!(f, "{}{}", name, self.s_not),
            (false, false) => write!(f, "{}{}", self.s_not, name),
        }
    }

    /// Write the product of the fixed positions of a term, most significant variable first.
    ///
    /// A term without fixed position is the constant 1.
    /// Positions without a name are displayed with their bit number.
    pub fn write_term(&self, f: &mut fmt::Formatter, term: &Term, names: &VarNames) -> fmt::Result {
        if term.is_free() {
            return write!(f, "{}", self.s_true);
        }
        let mut first = true;
        for bit in (0..term.width()).rev() {
            let value = match term.digit(bit) {
                Digit::Free => continue,
                Digit::One => true,
                Digit::Zero => false,
            };
            match first {
                true => first = false,
                false => write!(f, "{}", self.s_and)?,
            }
            match names.get_bit(bit) {
                Some(name) => self.write_literal(f, name, value)?,
                None => self.write_literal(f, &format!("_{}_", bit), value)?,
            }
        }
        Ok(())
    }

    /// Write a sum of terms. An empty sum is the constant 0.
    pub fn write_sum<'t>(
        &self,
        f: &mut fmt::Formatter,
        terms: impl IntoIterator<Item = &'t Term>,
        names: &VarNames,
    ) -> fmt::Result {
        let mut first = true;
        for term in terms {
            match first {
                true => first = false,
                false => write!(f, "{}", self.s_or)?,
            }
            self.write_term(f, term, names)?;
        }
        if first {
            write!(f, "{}", self.s_false)?;
        }
        Ok(())
    }
}

impl<R: Rule + ?Sized> fmt::Display for Named<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.rule.fmt_rule(f, self.names, self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use crate::efmt::*;
    use crate::QmError;

    #[test]
    fn notations() -> Result<(), QmError> {
        let names: VarNames = "a b c".parse()?;
        let t: Term = "1-0".parse()?;

        assert_eq!(format!("{}", DEFAULT_FMT_CFG.named(&t, &names)), "a.c'");
        assert_eq!(format!("{}", INFIX_FMT_CFG.named(&t, &names)), "a & !c");
        assert_eq!(
            format!("{}", LOWERCASE_FMT_CFG.named(&t, &names)),
            "a and not c"
        );

        let free: Term = "---".parse()?;
        assert_eq!(format!("{}", DEFAULT_FMT_CFG.named(&free, &names)), "1");
        assert_eq!(DEFAULT_FMT_CFG.operator(Operator::Or), " + ");
        assert_eq!(LOWERCASE_FMT_CFG.constant(false), "false");
        Ok(())
    }

    #[test]
    fn unnamed_positions() -> Result<(), QmError> {
        let names: VarNames = "b c".parse()?;
        let t: Term = "011".parse()?;
        assert_eq!(format!("{}", DEFAULT_FMT_CFG.named(&t, &names)), "_2_'.b.c");
        Ok(())
    }
}
