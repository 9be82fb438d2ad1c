//! Normal form conversion
//!
//! The pipeline runs in a fixed order: implication elimination, negation
//! normal form, standardizing apart, skolemization, universal quantifier
//! removal and distribution. Each stage is also usable on its own.

pub mod cnf;
pub mod eliminate;
pub mod nnf;
pub mod skolem;
pub mod standardize;


pub use cnf::distribute;
pub use eliminate::eliminate_implications;
pub use nnf::to_nnf;
pub use skolem::{drop_universals, skolemize};
pub use standardize::standardize_apart;

use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::logic::{clauses_from_cnf, Clause, Expression, Registry};

/// Convert a formula to a quantifier-free conjunction of clauses
pub fn to_cnf(
    expr: &Expression,
    registry: &mut Registry,
    domain_expansion_limit: usize,
) -> Result<Expression> {
    let config = NormalizeConfig::with_expansion_limit(domain_expansion_limit);
    to_cnf_with_config(expr, registry, &config)
}

/// Convert a formula to CNF with an explicit configuration
pub fn to_cnf_with_config(
    expr: &Expression,
    registry: &mut Registry,
    config: &NormalizeConfig,
) -> Result<Expression> {
    CnfConverter::new(registry, config).convert(expr)
}

/// Convert a formula to CNF and split it into clauses
pub fn to_clauses(
    expr: &Expression,
    registry: &mut Registry,
    config: &NormalizeConfig,
) -> Result<Vec<Clause>> {
    let cnf = to_cnf_with_config(expr, registry, config)?;
    clauses_from_cnf(&cnf)
}

/// One run of the pipeline over a registry
///
/// The registry receives the fresh variables introduced by standardization
/// and the Skolem symbols minted by skolemization. A failed run leaves it
/// untouched.
pub struct CnfConverter<'a> {
    registry: &'a mut Registry,
    config: &'a NormalizeConfig,
}

impl<'a> CnfConverter<'a> {
    pub fn new(registry: &'a mut Registry, config: &'a NormalizeConfig) -> Self {
        CnfConverter { registry, config }
    }

    pub fn convert(&mut self, formula: &Expression) -> Result<Expression> {
        let mut scratch = self.registry.clone();
        let cnf = Self::run(formula, &mut scratch, self.config)?;
        *self.registry = scratch;
        Ok(cnf)
    }

    fn run(formula: &Expression, registry: &mut Registry, config: &NormalizeConfig) -> Result<Expression> {
        log::trace!("cnf input: {}", formula);

        // Step 1: Eliminate ⇒ and ⇔
        let eliminated = eliminate_implications(formula);
        log::trace!("eliminated: {}", eliminated);

        // Step 2: Push negations down to the atoms
        let nnf = to_nnf(&eliminated);
        log::trace!("nnf: {}", nnf);

        // Step 3: Standardize apart so skolemization cannot capture variables
        let standardized = standardize_apart(&nnf, registry);
        log::trace!("standardized: {}", standardized);

        // Step 4: Skolemize, then drop the universals (implicit in CNF)
        let skolemized = skolemize(&standardized, registry, config)?;
        log::trace!("skolemized: {}", skolemized);
        let matrix = drop_universals(&skolemized);

        // Step 5: Distribute ∨ over ∧
        let cnf = distribute(&matrix)?;
        log::trace!("cnf: {}", cnf);
        Ok(cnf)
    }
}
