//! Terms in first-order logic

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A constant symbol
///
/// Constants are only created through [`Registry::define_constant`](crate::Registry::define_constant)
/// or by skolemization, so two constants with the same name are the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constant {
    name: Arc<str>,
}

impl Constant {
    pub(crate) fn new(name: &str) -> Self {
        Constant { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A variable, optionally restricted to a finite domain of constants
///
/// Identity is the name: the registry never hands out two variables with
/// the same name.
#[derive(Debug, Clone)]
pub struct Variable {
    name: Arc<str>,
    domain: Option<Arc<[Constant]>>,
    /// Name the variable was defined with, set on renamed copies
    origin: Option<Arc<str>>,
}

impl Variable {
    pub(crate) fn new(name: &str, domain: Option<Vec<Constant>>) -> Self {
        Variable {
            name: name.into(),
            domain: domain.map(Arc::from),
            origin: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The finite domain of a closed-world variable, `None` for open-world ones
    pub fn domain(&self) -> Option<&[Constant]> {
        self.domain.as_deref()
    }

    pub fn is_closed_world(&self) -> bool {
        self.domain.is_some()
    }

    /// The name as written by the user, before any standardization renaming
    pub fn source_name(&self) -> &str {
        self.origin.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn renamed(&self, name: &str) -> Variable {
        Variable {
            name: name.into(),
            domain: self.domain.clone(),
            origin: Some(self.origin.clone().unwrap_or_else(|| self.name.clone())),
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A Skolem function applied to the universally quantified variables that
/// enclose the existential it replaces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkolemFunction {
    name: Arc<str>,
    args: Vec<Term>,
}

impl SkolemFunction {
    pub(crate) fn new(name: &str, args: Vec<Term>) -> Self {
        SkolemFunction {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Skolem(SkolemFunction),
}

impl Term {
    /// Get all variables in this term
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Constant(_) => vec![],
            Term::Variable(v) => vec![v.clone()],
            Term::Skolem(f) => f.args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Check whether the term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Constant(_) => true,
            Term::Variable(_) => false,
            Term::Skolem(f) => f.args.iter().all(Term::is_ground),
        }
    }

    /// Replace every occurrence of `var` by `replacement`
    pub fn substitute(&self, var: &Variable, replacement: &Term) -> Term {
        self.map_variables(&mut |v| {
            if v == var {
                replacement.clone()
            } else {
                Term::Variable(v.clone())
            }
        })
    }

    pub(crate) fn map_variables(&self, f: &mut dyn FnMut(&Variable) -> Term) -> Term {
        match self {
            Term::Constant(_) => self.clone(),
            Term::Variable(v) => f(v),
            Term::Skolem(sk) => Term::Skolem(SkolemFunction {
                name: sk.name.clone(),
                args: sk.args.iter().map(|arg| arg.map_variables(f)).collect(),
            }),
        }
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl From<&Constant> for Term {
    fn from(c: &Constant) -> Self {
        Term::Constant(c.clone())
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<&Variable> for Term {
    fn from(v: &Variable) -> Self {
        Term::Variable(v.clone())
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for SkolemFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Variable(v) => write!(f, "{}", v),
            Term::Skolem(s) => write!(f, "{}", s),
        }
    }
}
