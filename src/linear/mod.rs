//! Linear constraint system: variable indexing, equation construction,
//! row reduction, and certainty extraction

pub mod deduce;
pub mod equations;
pub mod index_map;
pub mod reduce;

pub use deduce::process_equations;
pub use equations::{build_equations, index_frontier, Equation};
pub use index_map::{IndexError, VariableIndex};
pub use reduce::{row_reduce, PIVOT_TOLERANCE};
