//! Predicates and atomic formulas

use super::expr::Expression;
use super::term::{Term, Variable};
use crate::error::{FolError, Result};
use std::fmt;
use std::sync::Arc;

/// A predicate symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    name: Arc<str>,
    arity: usize,
}

impl Predicate {
    pub(crate) fn new(name: &str, arity: usize) -> Self {
        Predicate {
            name: name.into(),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Apply the predicate to exactly `arity` terms, producing an atomic formula
    pub fn apply<I, T>(&self, terms: I) -> Result<Expression>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let terms: Vec<Term> = terms.into_iter().map(Into::into).collect();
        if terms.len() != self.arity {
            return Err(FolError::ArityMismatch {
                predicate: self.name.to_string(),
                expected: self.arity,
                actual: terms.len(),
            });
        }
        Ok(Expression::Atom(Atom {
            predicate: self.clone(),
            terms,
        }))
    }
}

/// A predicate applied to a tuple of terms
///
/// Built only through [`Predicate::apply`], so the term count always
/// matches the arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    predicate: Predicate,
    terms: Vec<Term>,
}

impl Atom {
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.terms.iter().flat_map(Term::variables).collect()
    }

    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(Term::is_ground)
    }

    pub(crate) fn substitute(&self, var: &Variable, replacement: &Term) -> Atom {
        self.map_terms(|t| t.substitute(var, replacement))
    }

    pub(crate) fn map_terms(&self, f: impl FnMut(&Term) -> Term) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            terms: self.terms.iter().map(f).collect(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate.name)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")
    }
}
