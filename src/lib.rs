//! Minimize Boolean functions given by their truth table with the Quine-McCluskey method.
//!
//! A [truth table](TruthTable) lists the output of a function for each combination of its
//! input variables: `0`, `1` or unspecified (don't-care). The rows with output 1 are the
//! *minterms* of the function. Each minterm is the [term](Term) of a single row: a product
//! in which every variable appears, complemented or not.
//!
//! ```
//! use qmkit::{Term, TruthTable};
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//!
//! // Rows 0 and 2 have output 1, row 1 is a don't-care
//! let table: TruthTable = "1x10".parse()?;
//! assert_eq!(table.width(), 2);
//! assert_eq!(table.required(), vec![0, 2]);
//!
//! // Terms are written with the most significant variable first
//! let t: Term = "-0".parse()?;
//! assert!(table.required().iter().all(|m| t.matches(*m)));
//! # Ok(())
//! # }
//! ```
//!
//! # Prime implicants
//!
//! Two terms which differ by a single variable can be merged into a larger term where this
//! variable is free. Repeating these merges until no pair can be merged gives the
//! [prime implicants](Primes) of the function: the terms which are not contained in any larger
//! term.
//! Don't-cares take part in the merges, but they do not need to be covered.
//!
//! ```
//! use qmkit::{Primes, TruthTable};
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//! let table: TruthTable = "11100111".parse()?;
//! let (primes, generations) = Primes::generate(table.initial_terms());
//! assert_eq!(primes.len(), 6);
//! assert_eq!(generations.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Minimal covers
//!
//! The [coverage chart](CoverageChart) tells which prime implicant covers which required minterm.
//! A prime implicant is *essential* if it is the only one covering some minterm: it belongs to
//! all covers. The remaining minterms are covered by the smallest set of other prime implicants,
//! found by an exhaustive search. The [minimize] function runs all these steps and keeps the
//! intermediate results, which can be displayed in a [Report].
//!
//! ```
//! use qmkit::{minimize, Rule, TruthTable, VarNames};
//! use qmkit::efmt::{DEFAULT_FMT_CFG, INFIX_FMT_CFG};
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//! let table: TruthTable = "11111110".parse()?;
//! let names: VarNames = "a b c".parse()?;
//!
//! let result = minimize(&table)?;
//! let cover = result.cover();
//! assert_eq!(result.essential_rows().len(), 3);
//! assert!(!cover.eval(7));
//!
//! assert_eq!(cover.expression(&names, &DEFAULT_FMT_CFG)?, "a' + b' + c'");
//! assert_eq!(cover.expression(&names, &INFIX_FMT_CFG)?, "!a | !b | !c");
//! # Ok(())
//! # }
//! ```

mod chart;
mod cover;
pub mod efmt;
mod error;
mod minimize;
mod names;
mod primes;
mod report;
mod rules;
mod search;
mod table;
mod term;

// Export public structures and API
pub use chart::{ChartProgress, CoverageChart};
pub use cover::{Cover, CoverStep, Essentials, Selection, Statistics};
pub use error::QmError;
pub use minimize::{minimize, simplify, Minimization};
pub use names::VarNames;
pub use primes::{Generation, Primes};
pub use report::Report;
pub use rules::Rule;
pub use search::minimal_cover;
pub use table::{Minterm, SopNotation, TruthTable, MAX_VARIABLES};
pub use term::{Digit, Term};
