//! Distribution of disjunction over conjunction

use crate::error::{FolError, Result};
use crate::logic::Expression;

/// Distribute ∨ over ∧ until the formula is a conjunction of clauses
///
/// The input must be quantifier-free and in negation normal form.
pub fn distribute(expr: &Expression) -> Result<Expression> {
    enum WorkItem<'a> {
        Process(&'a Expression),
        CombineAnd,
        CombineOr,
    }

    let mut stack: Vec<WorkItem<'_>> = vec![WorkItem::Process(expr)];
    let mut results: Vec<Expression> = Vec::new();

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::Process(formula) => match formula {
                Expression::Atom(_) => results.push(formula.clone()),
                Expression::Not(_) if formula.is_literal() => results.push(formula.clone()),
                Expression::Not(_) => return Err(misplaced("a negated compound formula")),

                Expression::And(f1, f2) => {
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f2));
                    stack.push(WorkItem::Process(f1));
                }

                Expression::Or(f1, f2) => {
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f2));
                    stack.push(WorkItem::Process(f1));
                }

                Expression::Implies(..) => return Err(misplaced("an implication")),
                Expression::Equiv(..) => return Err(misplaced("an equivalence")),
                Expression::ForAll(..) | Expression::Exists(..) => {
                    return Err(misplaced("a quantifier"))
                }
            },

            WorkItem::CombineAnd => {
                let right = results.pop().expect("cnf: missing right conjunct");
                let left = results.pop().expect("cnf: missing left conjunct");
                results.push(left.and(right));
            }

            WorkItem::CombineOr => {
                let right = results.pop().expect("cnf: missing right disjunct");
                let left = results.pop().expect("cnf: missing left disjunct");
                results.push(distribute_or(left, right));
            }
        }
    }

    Ok(results.pop().expect("cnf: empty result stack"))
}

/// Combine two formulas already in CNF into the CNF of their disjunction
fn distribute_or(left: Expression, right: Expression) -> Expression {
    match (left, right) {
        // (A ∧ B) ∨ C = (A ∨ C) ∧ (B ∨ C)
        (Expression::And(a, b), c) => distribute_or(*a, c.clone()).and(distribute_or(*b, c)),
        // A ∨ (B ∧ C) = (A ∨ B) ∧ (A ∨ C)
        (a, Expression::And(b, c)) => distribute_or(a.clone(), *b).and(distribute_or(a, *c)),
        (a, b) => a.or(b),
    }
}

fn misplaced(connective: &'static str) -> FolError {
    FolError::UnsupportedConnectiveShape {
        connective,
        stage: "distribution",
    }
}
