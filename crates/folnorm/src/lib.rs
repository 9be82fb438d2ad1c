//! folnorm: first-order formulas and their normal forms
//!
//! Build formulas from symbols defined in a [`Registry`], then normalize
//! them to negation normal form or to a conjunction of clauses ready for a
//! resolution prover or a grounding engine.
//!
//! ```
//! use folnorm::{Expression, Registry};
//!
//! let mut registry = Registry::new();
//! let x = registry.define_variable("x", None).unwrap();
//! let smokes = registry.define_predicate("Smokes", 1).unwrap();
//! let cancer = registry.define_predicate("Cancer", 1).unwrap();
//!
//! let rule = Expression::forall(
//!     &x,
//!     smokes.apply([&x]).unwrap().implies(cancer.apply([&x]).unwrap()),
//! )
//! .unwrap();
//! let cnf = folnorm::to_cnf(&rule, &mut registry, 4096).unwrap();
//! assert_eq!(cnf.to_string(), "¬Smokes(x) ∨ Cancer(x)");
//! ```

pub mod config;
pub mod error;
pub mod json;
pub mod logic;
pub mod normal_form;

pub use config::NormalizeConfig;
pub use error::{FolError, Namespace, Result};

// Re-export commonly used types from logic
pub use logic::{
    and_, clauses_from_cnf, equiv, exists, forall, implies, not_, or_, Atom, Bindings, Clause,
    Constant, Expression, Literal, Predicate, Registry, SharedRegistry, SkolemFunction, Statement,
    Term, Variable,
};

pub use normal_form::{
    distribute, drop_universals, eliminate_implications, skolemize, standardize_apart, to_clauses,
    to_cnf, to_cnf_with_config, to_nnf, CnfConverter,
};
