//! Standardizing variables apart
//!
//! After this pass every quantifier of a formula binds names that no other
//! quantifier of the formula binds and that do not occur free in it. Fresh
//! names are registered in the registry, so they stay unique for the whole
//! session. Free variables are never renamed.

use crate::logic::{Expression, Registry, Term, Variable};
use std::collections::HashSet;

/// Rename bound variables so that quantifier scopes never share a name
pub fn standardize_apart(expr: &Expression, registry: &mut Registry) -> Expression {
    let mut seen: HashSet<Variable> = expr.free_variables().into_iter().collect();
    let mut scope = Vec::new();
    rename(expr, registry, &mut seen, &mut scope)
}

/// `scope` maps each bound variable of the enclosing quantifiers to its new
/// name; later entries shadow earlier ones.
fn rename(
    expr: &Expression,
    registry: &mut Registry,
    seen: &mut HashSet<Variable>,
    scope: &mut Vec<(Variable, Variable)>,
) -> Expression {
    match expr {
        Expression::Atom(atom) => Expression::Atom(atom.map_terms(|t| {
            t.map_variables(&mut |v| {
                let renamed = scope
                    .iter()
                    .rev()
                    .find(|(old, _)| old == v)
                    .map_or(v, |(_, new)| new);
                Term::Variable(renamed.clone())
            })
        })),
        Expression::Not(f) => rename(f, registry, seen, scope).negated(),
        Expression::And(f1, f2) => {
            let left = rename(f1, registry, seen, scope);
            left.and(rename(f2, registry, seen, scope))
        }
        Expression::Or(f1, f2) => {
            let left = rename(f1, registry, seen, scope);
            left.or(rename(f2, registry, seen, scope))
        }
        Expression::Implies(f1, f2) => {
            let left = rename(f1, registry, seen, scope);
            left.implies(rename(f2, registry, seen, scope))
        }
        Expression::Equiv(f1, f2) => {
            let left = rename(f1, registry, seen, scope);
            left.equiv(rename(f2, registry, seen, scope))
        }
        Expression::ForAll(vars, body) => {
            let (vars, body) = rename_binder(vars, body, registry, seen, scope);
            Expression::ForAll(vars, Box::new(body))
        }
        Expression::Exists(vars, body) => {
            let (vars, body) = rename_binder(vars, body, registry, seen, scope);
            Expression::Exists(vars, Box::new(body))
        }
    }
}

fn rename_binder(
    vars: &[Variable],
    body: &Expression,
    registry: &mut Registry,
    seen: &mut HashSet<Variable>,
    scope: &mut Vec<(Variable, Variable)>,
) -> (Vec<Variable>, Expression) {
    let depth = scope.len();
    let mut bound = Vec::with_capacity(vars.len());
    for var in vars {
        let new = if seen.contains(var) {
            registry.fresh_variable(var)
        } else {
            var.clone()
        };
        seen.insert(new.clone());
        scope.push((var.clone(), new.clone()));
        bound.push(new);
    }
    let body = rename(body, registry, seen, scope);
    scope.truncate(depth);
    (bound, body)
}
