//! Implication and equivalence elimination

use crate::logic::Expression;

/// Rewrite `A ⇒ B` to `¬A ∨ B` and `A ⇔ B` to `(¬A ∨ B) ∧ (¬B ∨ A)`
pub fn eliminate_implications(expr: &Expression) -> Expression {
    match expr {
        Expression::Atom(_) => expr.clone(),
        Expression::Not(f) => eliminate_implications(f).negated(),
        Expression::And(f1, f2) => eliminate_implications(f1).and(eliminate_implications(f2)),
        Expression::Or(f1, f2) => eliminate_implications(f1).or(eliminate_implications(f2)),
        Expression::Implies(f1, f2) => eliminate_implications(f1)
            .negated()
            .or(eliminate_implications(f2)),
        Expression::Equiv(f1, f2) => {
            let a = eliminate_implications(f1);
            let b = eliminate_implications(f2);
            a.clone()
                .negated()
                .or(b.clone())
                .and(b.negated().or(a))
        }
        Expression::ForAll(vars, body) => {
            Expression::ForAll(vars.clone(), Box::new(eliminate_implications(body)))
        }
        Expression::Exists(vars, body) => {
            Expression::Exists(vars.clone(), Box::new(eliminate_implications(body)))
        }
    }
}
