//! First-order logic data structures
//!
//! This module provides the symbol registry, terms, predicates, the
//! expression tree and the clause view of CNF formulas.

pub mod clause;
pub mod expr;
pub mod predicate;
pub mod registry;
pub mod term;

// Re-export commonly used types
pub use clause::{clauses_from_cnf, Clause, Literal};
pub use expr::{and_, equiv, exists, forall, implies, not_, or_, Bindings, Expression};
pub use predicate::{Atom, Predicate};
pub use registry::{Registry, SharedRegistry, Statement};
pub use term::{Constant, SkolemFunction, Term, Variable};
