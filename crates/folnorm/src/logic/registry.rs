//! Symbol registry and axiom store
//!
//! The registry owns three namespaces (constants, variables, predicates),
//! the Skolem functions minted during normalization, and the ordered list
//! of asserted axioms. Symbols are never removed; [`Registry::clear`] resets
//! the whole registry.
//!
//! Pass the registry explicitly to whatever builds or normalizes formulas.
//! Several registries can coexist, e.g. one per test. To share one between
//! threads, wrap it with [`Registry::into_shared`] so every mutation goes
//! through the same lock.

use super::clause::Clause;
use super::expr::Expression;
use super::predicate::Predicate;
use super::term::{Constant, Term, Variable};
use crate::config::NormalizeConfig;
use crate::error::{FolError, Namespace, Result};
use crate::normal_form;
use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, Mutex};

/// A registry shared between threads
pub type SharedRegistry = Arc<Mutex<Registry>>;

/// Something handed to [`Registry::assert`]
///
/// Only formulas are axioms; a bare term is rejected.
#[derive(Debug, Clone)]
pub enum Statement {
    Formula(Expression),
    Term(Term),
}

impl From<Expression> for Statement {
    fn from(expr: Expression) -> Self {
        Statement::Formula(expr)
    }
}

impl From<Term> for Statement {
    fn from(term: Term) -> Self {
        Statement::Term(term)
    }
}

impl From<Constant> for Statement {
    fn from(c: Constant) -> Self {
        Statement::Term(Term::Constant(c))
    }
}

impl From<Variable> for Statement {
    fn from(v: Variable) -> Self {
        Statement::Term(Term::Variable(v))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    constants: IndexMap<String, Constant>,
    variables: IndexMap<String, Variable>,
    predicates: IndexMap<String, Predicate>,
    /// Skolem function names with their arity
    skolem_functions: IndexMap<String, usize>,
    axioms: Vec<Expression>,
    fresh_counter: usize,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Drop every symbol and axiom
    pub fn clear(&mut self) {
        *self = Registry::default();
    }

    // === Constants ===

    /// Define a constant; the first character of the name is upper-cased
    pub fn define_constant(&mut self, name: &str) -> Result<Constant> {
        validate_name(Namespace::Constant, name)?;
        let name = canonical_constant_name(name);
        if self.constants.contains_key(&name) {
            return Err(FolError::DuplicateName {
                namespace: Namespace::Constant,
                name,
            });
        }
        let constant = Constant::new(&name);
        log::debug!("defined constant {}", constant);
        self.constants.insert(name, constant.clone());
        Ok(constant)
    }

    /// Look a constant up by its given or canonical name
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants
            .get(name)
            .or_else(|| self.constants.get(&canonical_constant_name(name)))
    }

    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.constants.values()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    // === Variables ===

    /// Define a variable, closed-world when `domain` is given
    pub fn define_variable(&mut self, name: &str, domain: Option<Vec<Constant>>) -> Result<Variable> {
        validate_name(Namespace::Variable, name)?;
        if self.variables.contains_key(name) {
            return Err(FolError::DuplicateName {
                namespace: Namespace::Variable,
                name: name.to_string(),
            });
        }
        let domain = match domain {
            Some(constants) if constants.is_empty() => {
                return Err(FolError::EmptyDomain {
                    variable: name.to_string(),
                })
            }
            Some(constants) => Some(
                constants
                    .into_iter()
                    .collect::<IndexSet<_>>()
                    .into_iter()
                    .collect(),
            ),
            None => None,
        };
        let variable = Variable::new(name, domain);
        log::debug!(
            "defined variable {} ({})",
            variable,
            if variable.is_closed_world() { "closed world" } else { "open world" }
        );
        self.variables.insert(name.to_string(), variable.clone());
        Ok(variable)
    }

    pub fn define_open_variable(&mut self, name: &str) -> Result<Variable> {
        self.define_variable(name, None)
    }

    pub fn define_closed_variable<I>(&mut self, name: &str, domain: I) -> Result<Variable>
    where
        I: IntoIterator<Item = Constant>,
    {
        self.define_variable(name, Some(domain.into_iter().collect()))
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Register a variable with a fresh name derived from `template`,
    /// keeping its domain
    pub fn fresh_variable(&mut self, template: &Variable) -> Variable {
        let name = loop {
            let candidate = format!("{}_{}", template.name(), self.fresh_counter);
            self.fresh_counter += 1;
            if !self.is_term_name_taken(&candidate) {
                break candidate;
            }
        };
        let variable = template.renamed(&name);
        log::debug!("renamed bound variable {} to {}", template, variable);
        self.variables.insert(name, variable.clone());
        variable
    }

    // === Predicates ===

    pub fn define_predicate(&mut self, name: &str, arity: usize) -> Result<Predicate> {
        validate_name(Namespace::Predicate, name)?;
        if self.predicates.contains_key(name) {
            return Err(FolError::DuplicateName {
                namespace: Namespace::Predicate,
                name: name.to_string(),
            });
        }
        if arity < 1 {
            return Err(FolError::InvalidArity {
                predicate: name.to_string(),
                arity,
            });
        }
        let predicate = Predicate::new(name, arity);
        log::debug!("defined predicate {}", predicate);
        self.predicates.insert(name.to_string(), predicate.clone());
        Ok(predicate)
    }

    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    // === Skolem symbols ===

    fn fresh_skolem_name(&mut self, prefix: &str) -> String {
        loop {
            let candidate = format!("{}{}", prefix, self.fresh_counter);
            self.fresh_counter += 1;
            if !self.is_term_name_taken(&candidate) {
                return candidate;
            }
        }
    }

    /// Terms render by name alone, so minted names avoid every term symbol
    fn is_term_name_taken(&self, name: &str) -> bool {
        self.constants.contains_key(name)
            || self.variables.contains_key(name)
            || self.skolem_functions.contains_key(name)
    }

    /// Mint a 0-ary Skolem symbol and register it as a constant
    pub fn mint_skolem_constant(&mut self, prefix: &str) -> Constant {
        let name = self.fresh_skolem_name(prefix);
        let constant = Constant::new(&name);
        log::debug!("minted skolem constant {}", constant);
        self.constants.insert(name, constant.clone());
        constant
    }

    /// Mint a Skolem function over `args` and register its name
    pub fn mint_skolem_function(&mut self, prefix: &str, args: Vec<Term>) -> Term {
        let name = self.fresh_skolem_name(prefix);
        log::debug!("minted skolem function {}/{}", name, args.len());
        self.skolem_functions.insert(name.clone(), args.len());
        Term::Skolem(super::term::SkolemFunction::new(&name, args))
    }

    /// Arity of a minted Skolem function
    pub fn skolem_function_arity(&self, name: &str) -> Option<usize> {
        self.skolem_functions.get(name).copied()
    }

    pub fn skolem_function_count(&self) -> usize {
        self.skolem_functions.len()
    }

    // === Axioms ===

    /// Append a formula to the axioms
    pub fn assert(&mut self, statement: impl Into<Statement>) -> Result<()> {
        match statement.into() {
            Statement::Formula(expr) => {
                log::debug!("asserted axiom #{}: {}", self.axioms.len(), expr);
                self.axioms.push(expr);
                Ok(())
            }
            Statement::Term(term) => Err(FolError::NotAFormula {
                term: term.to_string(),
            }),
        }
    }

    /// Asserted axioms in insertion order
    pub fn axioms(&self) -> &[Expression] {
        &self.axioms
    }

    /// Convert every asserted axiom to clauses, in assertion order
    ///
    /// Symbols minted along the way are kept only if every axiom converts.
    pub fn clausify_axioms(&mut self, config: &NormalizeConfig) -> Result<Vec<Clause>> {
        let mut scratch = self.clone();
        let mut clauses = Vec::new();
        for axiom in &self.axioms {
            clauses.extend(normal_form::to_clauses(axiom, &mut scratch, config)?);
        }
        *self = scratch;
        Ok(clauses)
    }
}

fn validate_name(namespace: Namespace, name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(FolError::InvalidName {
            namespace,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn canonical_constant_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_constant_leaves_namespace_unchanged() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        assert_eq!(a.name(), "A");

        let err = registry.define_constant("a").unwrap_err();
        assert_eq!(
            err,
            FolError::DuplicateName {
                namespace: Namespace::Constant,
                name: "A".to_string(),
            }
        );
        // "A" canonicalizes to the same name
        assert!(registry.define_constant("A").is_err());
        assert_eq!(registry.constant_count(), 1);
        assert_eq!(registry.constant("a"), Some(&a));
    }

    #[test]
    fn test_duplicate_variable_and_predicate() {
        let mut registry = Registry::new();
        registry.define_variable("x", None).unwrap();
        assert!(matches!(
            registry.define_variable("x", None),
            Err(FolError::DuplicateName { namespace: Namespace::Variable, .. })
        ));

        registry.define_predicate("P", 1).unwrap();
        assert!(matches!(
            registry.define_predicate("P", 2),
            Err(FolError::DuplicateName { namespace: Namespace::Predicate, .. })
        ));
        assert_eq!(registry.predicate("P").map(Predicate::arity), Some(1));
        assert_eq!(registry.variable_count(), 1);
    }

    #[test]
    fn test_invalid_arity_and_names() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.define_predicate("Nullary", 0),
            Err(FolError::InvalidArity {
                predicate: "Nullary".to_string(),
                arity: 0,
            })
        );
        assert!(matches!(
            registry.define_constant(""),
            Err(FolError::InvalidName { .. })
        ));
        assert!(matches!(
            registry.define_variable("two words", None),
            Err(FolError::InvalidName { .. })
        ));
        assert_eq!(registry.predicate_count(), 0);
        assert_eq!(registry.constant_count(), 0);
    }

    #[test]
    fn test_closed_world_domain() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let b = registry.define_constant("b").unwrap();

        let p = registry
            .define_closed_variable("p", vec![a.clone(), b.clone(), a.clone()])
            .unwrap();
        assert!(p.is_closed_world());
        assert_eq!(p.domain(), Some(&[a, b][..]));

        assert_eq!(
            registry.define_variable("q", Some(Vec::new())),
            Err(FolError::EmptyDomain {
                variable: "q".to_string()
            })
        );
        assert!(registry.variable("q").is_none());
    }

    #[test]
    fn test_assert_rejects_bare_terms() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let x = registry.define_variable("x", None).unwrap();
        let smokes = registry.define_predicate("Smokes", 1).unwrap();

        assert_eq!(
            registry.assert(a.clone()),
            Err(FolError::NotAFormula {
                term: "A".to_string()
            })
        );
        assert!(registry.assert(x).is_err());
        assert!(registry.axioms().is_empty());

        let first = smokes.apply([&a]).unwrap();
        let second = first.clone().negated();
        registry.assert(first.clone()).unwrap();
        registry.assert(second.clone()).unwrap();
        assert_eq!(registry.axioms(), &[first, second]);
    }

    #[test]
    fn test_fresh_symbols_never_collide() {
        let mut registry = Registry::new();
        let x = registry.define_variable("x", None).unwrap();
        registry.define_variable("x_0", None).unwrap();

        let fresh = registry.fresh_variable(&x);
        assert_eq!(fresh.name(), "x_1");
        assert!(registry.variable("x_1").is_some());

        let sk = registry.mint_skolem_constant("sk");
        let skf = registry.mint_skolem_function("sk", vec![Term::from(&x)]);
        assert_ne!(sk.to_string(), skf.to_string());
        assert!(registry.constant(sk.name()).is_some());
        assert_eq!(registry.skolem_function_count(), 1);
    }

    #[test]
    fn test_minted_names_avoid_every_term_symbol() {
        let mut registry = Registry::new();
        registry.define_variable("sk0", None).unwrap();
        let x = registry.define_variable("X", None).unwrap();
        registry.define_constant("X_2").unwrap();

        let sk = registry.mint_skolem_constant("sk");
        assert_eq!(sk.name(), "sk1");
        assert_ne!(Term::from(&sk).to_string(), "sk0");

        let fresh = registry.fresh_variable(&x);
        assert_eq!(fresh.name(), "X_3");
        assert!(registry.constant("X_3").is_none());
    }

    #[test]
    fn test_clausify_failure_keeps_registry() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let b = registry.define_constant("b").unwrap();
        let y = registry.define_variable("y", None).unwrap();
        let p = registry.define_closed_variable("p", vec![a, b]).unwrap();
        let smokes = registry.define_predicate("Smokes", 1).unwrap();

        // The first axiom mints sk0, the second one cannot be expanded
        registry
            .assert(Expression::exists(&y, smokes.apply([&y]).unwrap()).unwrap())
            .unwrap();
        registry
            .assert(Expression::exists(&p, smokes.apply([&p]).unwrap()).unwrap())
            .unwrap();

        let err = registry
            .clausify_axioms(&NormalizeConfig::with_expansion_limit(1))
            .unwrap_err();
        assert!(matches!(err, FolError::ClosedWorldExpansionTooLarge { .. }));
        assert_eq!(registry.constant_count(), 2);
        assert!(registry.constant("sk0").is_none());

        let clauses = registry.clausify_axioms(&NormalizeConfig::default()).unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].to_string(), "Smokes(sk0)");
        assert_eq!(registry.constant_count(), 3);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let p = registry.define_predicate("P", 1).unwrap();
        registry.assert(p.apply([&a]).unwrap()).unwrap();

        registry.clear();
        assert_eq!(registry.constant_count(), 0);
        assert_eq!(registry.predicate_count(), 0);
        assert!(registry.axioms().is_empty());
        assert!(registry.define_constant("a").is_ok());
    }

    #[test]
    fn test_shared_registry_serializes_definitions() {
        let shared = Registry::new().into_shared();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    let mut registry = shared.lock().unwrap();
                    registry.define_constant(&format!("c{}", i)).unwrap();
                    registry.define_constant("shared").is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(shared.lock().unwrap().constant_count(), 5);
    }
}
