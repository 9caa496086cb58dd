use crate::efmt::FormatterConfig;
use crate::VarNames;
use bit_set::BitSet;
use std::fmt;

/// Common API for the sum-of-products structures.
///
/// This trait defines the API to evaluate and display terms, sets of prime implicants and covers.
pub trait Rule {
    /// Display the rule using the given names and notation
    fn fmt_rule(
        &self,
        f: &mut fmt::Formatter,
        names: &VarNames,
        cfg: &FormatterConfig,
    ) -> fmt::Result;

    /// Evaluate the rule on the minterm with the given index
    fn eval(&self, minterm: u32) -> bool;

    /// Add the bits fixed by the rule to the set
    fn collect_support(&self, support: &mut BitSet);

    /// Construct the set of bits on which the rule depends
    fn get_support(&self) -> BitSet {
        let mut support = BitSet::default();
        self.collect_support(&mut support);
        support
    }
}
