//! First-order formula representation
//!
//! An [`Expression`] is an immutable tree over eight node kinds. Every
//! combinator returns a new tree; nothing is rewritten in place.
//!
//! Equality and hashing are syntactic: two expressions are equal exactly
//! when their canonical renderings are equal.

use super::predicate::Atom;
use super::term::{Term, Variable};
use crate::error::{FolError, Result};
use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// First-order formula
#[derive(Debug, Clone)]
pub enum Expression {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Expression>),
    /// Conjunction
    And(Box<Expression>, Box<Expression>),
    /// Disjunction
    Or(Box<Expression>, Box<Expression>),
    /// Implication
    Implies(Box<Expression>, Box<Expression>),
    /// Biconditional
    Equiv(Box<Expression>, Box<Expression>),
    /// Universal quantification over one or more variables
    ForAll(Vec<Variable>, Box<Expression>),
    /// Existential quantification over one or more variables
    Exists(Vec<Variable>, Box<Expression>),
}

/// Variables bound by a quantifier: a lone variable or an ordered sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings(Vec<Variable>);

impl Bindings {
    pub fn into_vec(self) -> Vec<Variable> {
        self.0
    }
}

impl From<Variable> for Bindings {
    fn from(v: Variable) -> Self {
        Bindings(vec![v])
    }
}

impl From<&Variable> for Bindings {
    fn from(v: &Variable) -> Self {
        Bindings(vec![v.clone()])
    }
}

impl From<Vec<Variable>> for Bindings {
    fn from(vars: Vec<Variable>) -> Self {
        Bindings(vars)
    }
}

impl From<&[Variable]> for Bindings {
    fn from(vars: &[Variable]) -> Self {
        Bindings(vars.to_vec())
    }
}

impl<const N: usize> From<[Variable; N]> for Bindings {
    fn from(vars: [Variable; N]) -> Self {
        Bindings(vars.to_vec())
    }
}

impl<const N: usize> From<[&Variable; N]> for Bindings {
    fn from(vars: [&Variable; N]) -> Self {
        Bindings(vars.into_iter().cloned().collect())
    }
}

impl Expression {
    pub fn negated(self) -> Expression {
        Expression::Not(Box::new(self))
    }

    pub fn and(self, other: Expression) -> Expression {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expression) -> Expression {
        Expression::Or(Box::new(self), Box::new(other))
    }

    pub fn implies(self, consequent: Expression) -> Expression {
        Expression::Implies(Box::new(self), Box::new(consequent))
    }

    pub fn equiv(self, other: Expression) -> Expression {
        Expression::Equiv(Box::new(self), Box::new(other))
    }

    /// Universally quantify `body` over one or more variables
    pub fn forall(vars: impl Into<Bindings>, body: Expression) -> Result<Expression> {
        let vars = vars.into().into_vec();
        if vars.is_empty() {
            return Err(FolError::EmptyBinding);
        }
        Ok(Expression::ForAll(vars, Box::new(body)))
    }

    /// Existentially quantify `body` over one or more variables
    pub fn exists(vars: impl Into<Bindings>, body: Expression) -> Result<Expression> {
        let vars = vars.into().into_vec();
        if vars.is_empty() {
            return Err(FolError::EmptyBinding);
        }
        Ok(Expression::Exists(vars, Box::new(body)))
    }

    /// Left-associated conjunction of a sequence, `None` when it is empty
    pub fn conjunction(items: impl IntoIterator<Item = Expression>) -> Option<Expression> {
        items.into_iter().reduce(Expression::and)
    }

    /// Left-associated disjunction of a sequence, `None` when it is empty
    pub fn disjunction(items: impl IntoIterator<Item = Expression>) -> Option<Expression> {
        items.into_iter().reduce(Expression::or)
    }

    /// The canonical rendering that defines equality and hashing
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Free variables in order of first occurrence
    pub fn free_variables(&self) -> Vec<Variable> {
        let mut free = IndexSet::new();
        self.collect_free(&mut Vec::new(), &mut free);
        free.into_iter().collect()
    }

    fn collect_free(&self, bound: &mut Vec<Variable>, free: &mut IndexSet<Variable>) {
        match self {
            Expression::Atom(atom) => {
                for v in atom.variables() {
                    if !bound.contains(&v) {
                        free.insert(v);
                    }
                }
            }
            Expression::Not(f) => f.collect_free(bound, free),
            Expression::And(f1, f2)
            | Expression::Or(f1, f2)
            | Expression::Implies(f1, f2)
            | Expression::Equiv(f1, f2) => {
                f1.collect_free(bound, free);
                f2.collect_free(bound, free);
            }
            Expression::ForAll(vars, body) | Expression::Exists(vars, body) => {
                let depth = bound.len();
                bound.extend(vars.iter().cloned());
                body.collect_free(bound, free);
                bound.truncate(depth);
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// An atom or the negation of an atom
    pub fn is_literal(&self) -> bool {
        match self {
            Expression::Atom(_) => true,
            Expression::Not(inner) => matches!(**inner, Expression::Atom(_)),
            _ => false,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Expression::ForAll(..) | Expression::Exists(..))
    }

    pub fn contains_quantifier(&self) -> bool {
        match self {
            Expression::Atom(_) => false,
            Expression::Not(f) => f.contains_quantifier(),
            Expression::And(f1, f2)
            | Expression::Or(f1, f2)
            | Expression::Implies(f1, f2)
            | Expression::Equiv(f1, f2) => f1.contains_quantifier() || f2.contains_quantifier(),
            Expression::ForAll(..) | Expression::Exists(..) => true,
        }
    }

    /// Negations only on atoms, no implications or equivalences
    pub fn is_nnf(&self) -> bool {
        match self {
            Expression::Atom(_) => true,
            Expression::Not(_) => self.is_literal(),
            Expression::And(f1, f2) | Expression::Or(f1, f2) => f1.is_nnf() && f2.is_nnf(),
            Expression::Implies(..) | Expression::Equiv(..) => false,
            Expression::ForAll(_, body) | Expression::Exists(_, body) => body.is_nnf(),
        }
    }

    /// Quantifier-free conjunction of disjunctions of literals
    pub fn is_cnf(&self) -> bool {
        match self {
            Expression::And(f1, f2) => f1.is_cnf() && f2.is_cnf(),
            _ => self.is_clause(),
        }
    }

    fn is_clause(&self) -> bool {
        match self {
            Expression::Or(f1, f2) => f1.is_clause() && f2.is_clause(),
            _ => self.is_literal(),
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Expression::Atom(_) => 1,
            Expression::Not(f) => 1 + f.size(),
            Expression::And(f1, f2)
            | Expression::Or(f1, f2)
            | Expression::Implies(f1, f2)
            | Expression::Equiv(f1, f2) => 1 + f1.size() + f2.size(),
            Expression::ForAll(_, body) | Expression::Exists(_, body) => 1 + body.size(),
        }
    }

    /// Replace free occurrences of `var` by `replacement`
    ///
    /// A quantifier that rebinds `var` shadows it, its body is left alone.
    pub fn substitute(&self, var: &Variable, replacement: &Term) -> Expression {
        match self {
            Expression::Atom(atom) => Expression::Atom(atom.substitute(var, replacement)),
            Expression::Not(f) => Expression::Not(Box::new(f.substitute(var, replacement))),
            Expression::And(f1, f2) => Expression::And(
                Box::new(f1.substitute(var, replacement)),
                Box::new(f2.substitute(var, replacement)),
            ),
            Expression::Or(f1, f2) => Expression::Or(
                Box::new(f1.substitute(var, replacement)),
                Box::new(f2.substitute(var, replacement)),
            ),
            Expression::Implies(f1, f2) => Expression::Implies(
                Box::new(f1.substitute(var, replacement)),
                Box::new(f2.substitute(var, replacement)),
            ),
            Expression::Equiv(f1, f2) => Expression::Equiv(
                Box::new(f1.substitute(var, replacement)),
                Box::new(f2.substitute(var, replacement)),
            ),
            Expression::ForAll(vars, _) | Expression::Exists(vars, _) if vars.contains(var) => {
                self.clone()
            }
            Expression::ForAll(vars, body) => {
                Expression::ForAll(vars.clone(), Box::new(body.substitute(var, replacement)))
            }
            Expression::Exists(vars, body) => {
                Expression::Exists(vars.clone(), Box::new(body.substitute(var, replacement)))
            }
        }
    }

    fn connective(&self) -> Option<&'static str> {
        match self {
            Expression::And(..) => Some("∧"),
            Expression::Or(..) => Some("∨"),
            Expression::Implies(..) => Some("⇒"),
            Expression::Equiv(..) => Some("⇔"),
            _ => None,
        }
    }

    /// Operand of a binary connective: chains of ∧ or ∨ associate to the left
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: &Expression, left: bool) -> fmt::Result {
        let bare = match (self, parent) {
            (Expression::Atom(_) | Expression::Not(_), _) => true,
            (Expression::And(..), Expression::And(..)) | (Expression::Or(..), Expression::Or(..)) => left,
            _ => false,
        };
        if bare {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }
}

pub fn not_(expr: Expression) -> Expression {
    expr.negated()
}

pub fn and_(left: Expression, right: Expression) -> Expression {
    left.and(right)
}

pub fn or_(left: Expression, right: Expression) -> Expression {
    left.or(right)
}

pub fn implies(antecedent: Expression, consequent: Expression) -> Expression {
    antecedent.implies(consequent)
}

pub fn equiv(left: Expression, right: Expression) -> Expression {
    left.equiv(right)
}

pub fn forall(vars: impl Into<Bindings>, body: Expression) -> Result<Expression> {
    Expression::forall(vars, body)
}

pub fn exists(vars: impl Into<Bindings>, body: Expression) -> Result<Expression> {
    Expression::exists(vars, body)
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Atom(atom) => write!(f, "{}", atom),
            Expression::Not(inner) => match **inner {
                Expression::Atom(_) | Expression::Not(_) => write!(f, "¬{}", inner),
                _ => write!(f, "¬({})", inner),
            },
            Expression::And(f1, f2)
            | Expression::Or(f1, f2)
            | Expression::Implies(f1, f2)
            | Expression::Equiv(f1, f2) => {
                f1.fmt_operand(f, self, true)?;
                write!(f, " {} ", self.connective().unwrap_or("?"))?;
                f2.fmt_operand(f, self, false)
            }
            Expression::ForAll(vars, body) | Expression::Exists(vars, body) => {
                let symbol = if matches!(self, Expression::ForAll(..)) { "∀" } else { "∃" };
                write!(f, "{} ", symbol)?;
                for (i, v) in vars.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ": {}", body)
            }
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;
    use std::collections::HashSet;

    struct TestContext {
        registry: Registry,
    }

    impl TestContext {
        fn new() -> Self {
            TestContext {
                registry: Registry::new(),
            }
        }

        fn prop(&mut self, name: &str) -> Expression {
            let a = match self.registry.constant("A").cloned() {
                Some(a) => a,
                None => self.registry.define_constant("a").unwrap(),
            };
            let p = self.registry.define_predicate(name, 1).unwrap();
            p.apply([a]).unwrap()
        }
    }

    #[test]
    fn test_render_connectives() {
        let mut ctx = TestContext::new();
        let p = ctx.prop("P");
        let q = ctx.prop("Q");

        assert_eq!(p.clone().negated().to_string(), "¬P(A)");
        assert_eq!(p.clone().and(q.clone()).to_string(), "P(A) ∧ Q(A)");
        assert_eq!(p.clone().or(q.clone()).to_string(), "P(A) ∨ Q(A)");
        assert_eq!(p.clone().implies(q.clone()).to_string(), "P(A) ⇒ Q(A)");
        assert_eq!(p.clone().equiv(q.clone()).to_string(), "P(A) ⇔ Q(A)");
        assert_eq!(p.clone().and(q.clone()).negated().to_string(), "¬(P(A) ∧ Q(A))");
    }

    #[test]
    fn test_render_left_association() {
        let mut ctx = TestContext::new();
        let p = ctx.prop("P");
        let q = ctx.prop("Q");
        let r = ctx.prop("R");

        let left = p.clone().and(q.clone()).and(r.clone());
        let right = p.clone().and(q.clone().and(r.clone()));
        assert_eq!(left.to_string(), "P(A) ∧ Q(A) ∧ R(A)");
        assert_eq!(right.to_string(), "P(A) ∧ (Q(A) ∧ R(A))");
        assert_ne!(left, right);

        let mixed = p.clone().or(q.clone()).and(r.clone());
        assert_eq!(mixed.to_string(), "(P(A) ∨ Q(A)) ∧ R(A)");
    }

    #[test]
    fn test_render_quantifiers() {
        let mut registry = Registry::new();
        let x = registry.define_variable("x", None).unwrap();
        let y = registry.define_variable("y", None).unwrap();
        let likes = registry.define_predicate("Likes", 2).unwrap();
        let body = likes.apply([&x, &y]).unwrap();

        let f = Expression::forall([&x, &y], body.clone()).unwrap();
        assert_eq!(f.to_string(), "∀ x,y: Likes(x, y)");

        let g = Expression::exists(&x, body.clone()).unwrap().and(body.clone());
        assert_eq!(g.to_string(), "(∃ x: Likes(x, y)) ∧ Likes(x, y)");

        let h = Expression::forall(&x, body).unwrap().negated();
        assert_eq!(h.to_string(), "¬(∀ x: Likes(x, y))");
    }

    #[test]
    fn test_empty_binding_is_rejected() {
        let mut ctx = TestContext::new();
        let p = ctx.prop("P");
        assert_eq!(
            Expression::forall(Vec::new(), p.clone()),
            Err(FolError::EmptyBinding)
        );
        assert_eq!(Expression::exists(Vec::new(), p), Err(FolError::EmptyBinding));
    }

    #[test]
    fn test_equality_and_hash_follow_rendering() {
        let mut ctx = TestContext::new();
        let p = ctx.prop("P");
        let q = ctx.prop("Q");

        let a = p.clone().and(q.clone());
        let b = and_(p.clone(), q.clone());
        let c = q.clone().and(p.clone());
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Expression> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_free_variables_and_substitution() {
        let mut registry = Registry::new();
        let x = registry.define_variable("x", None).unwrap();
        let y = registry.define_variable("y", None).unwrap();
        let b = registry.define_constant("b").unwrap();
        let likes = registry.define_predicate("Likes", 2).unwrap();

        let inner = Expression::forall(&x, likes.apply([&x, &y]).unwrap()).unwrap();
        let f = likes
            .apply([Term::from(&x), Term::from(&b)])
            .unwrap()
            .and(inner);

        assert_eq!(f.free_variables(), vec![x.clone(), y.clone()]);
        assert!(!f.is_closed());

        let replaced = f.substitute(&x, &Term::from(&b));
        assert_eq!(replaced.to_string(), "Likes(B, B) ∧ (∀ x: Likes(x, y))");
        assert_eq!(replaced.free_variables(), vec![y]);
    }

    #[test]
    fn test_shape_predicates() {
        let mut ctx = TestContext::new();
        let p = ctx.prop("P");
        let q = ctx.prop("Q");
        let r = ctx.prop("R");

        let cnf = p.clone().or(q.clone().negated()).and(r.clone());
        assert!(cnf.is_cnf());
        assert!(cnf.is_nnf());

        let not_cnf = p.clone().and(q.clone()).or(r.clone());
        assert!(!not_cnf.is_cnf());
        assert!(not_cnf.is_nnf());

        let not_nnf = p.clone().or(q.clone()).negated();
        assert!(!not_nnf.is_nnf());
        assert!(!p.clone().implies(q).is_nnf());
        assert_eq!(
            Expression::conjunction(vec![p.clone(), r.clone(), p.clone()]).map(|e| e.size()),
            Some(5)
        );
        assert_eq!(Expression::disjunction(Vec::new()), None);
    }
}
