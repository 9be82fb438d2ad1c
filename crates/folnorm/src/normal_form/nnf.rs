//! Negation normal form
//!
//! Negations are pushed down to the atoms with De Morgan's laws and the
//! quantifier dualities. Implications and equivalences met on the way are
//! eliminated exactly as [`eliminate_implications`](super::eliminate_implications)
//! would, so the conversion is total.

use crate::logic::{Expression, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    fn dual(self) -> Self {
        match self {
            Quantifier::ForAll => Quantifier::Exists,
            Quantifier::Exists => Quantifier::ForAll,
        }
    }
}

/// Convert to negation normal form using an explicit stack to avoid stack overflow
pub fn to_nnf(expr: &Expression) -> Expression {
    enum WorkItem<'a> {
        Process(&'a Expression, bool), // (formula, negate)
        CombineAnd,
        CombineOr,
        CombineQuantified(Quantifier, &'a [Variable]),
    }

    let mut stack: Vec<WorkItem<'_>> = vec![WorkItem::Process(expr, false)];
    let mut results: Vec<Expression> = Vec::new();

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::Process(formula, negate) => match (formula, negate) {
                (Expression::Atom(_), false) => results.push(formula.clone()),
                (Expression::Atom(_), true) => results.push(formula.clone().negated()),

                // Double negation: flip and continue
                (Expression::Not(f), neg) => stack.push(WorkItem::Process(f, !neg)),

                (Expression::And(f1, f2), false) => {
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f2, false));
                    stack.push(WorkItem::Process(f1, false));
                }
                (Expression::And(f1, f2), true) => {
                    // ¬(A ∧ B) = ¬A ∨ ¬B
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f2, true));
                    stack.push(WorkItem::Process(f1, true));
                }

                (Expression::Or(f1, f2), false) => {
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f2, false));
                    stack.push(WorkItem::Process(f1, false));
                }
                (Expression::Or(f1, f2), true) => {
                    // ¬(A ∨ B) = ¬A ∧ ¬B
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f2, true));
                    stack.push(WorkItem::Process(f1, true));
                }

                // A ⇒ B = ¬A ∨ B
                (Expression::Implies(f1, f2), false) => {
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f2, false));
                    stack.push(WorkItem::Process(f1, true));
                }
                (Expression::Implies(f1, f2), true) => {
                    // ¬(A ⇒ B) = A ∧ ¬B
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f2, true));
                    stack.push(WorkItem::Process(f1, false));
                }

                // A ⇔ B = (¬A ∨ B) ∧ (¬B ∨ A)
                (Expression::Equiv(f1, f2), false) => {
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f1, false));
                    stack.push(WorkItem::Process(f2, true));
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(f2, false));
                    stack.push(WorkItem::Process(f1, true));
                }
                (Expression::Equiv(f1, f2), true) => {
                    // ¬(A ⇔ B) = (A ∧ ¬B) ∨ (B ∧ ¬A)
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f1, true));
                    stack.push(WorkItem::Process(f2, false));
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(f2, true));
                    stack.push(WorkItem::Process(f1, false));
                }

                (Expression::ForAll(vars, body), neg) => {
                    // ¬∀x.φ = ∃x.¬φ
                    let q = if neg { Quantifier::ForAll.dual() } else { Quantifier::ForAll };
                    stack.push(WorkItem::CombineQuantified(q, vars));
                    stack.push(WorkItem::Process(body, neg));
                }
                (Expression::Exists(vars, body), neg) => {
                    // ¬∃x.φ = ∀x.¬φ
                    let q = if neg { Quantifier::Exists.dual() } else { Quantifier::Exists };
                    stack.push(WorkItem::CombineQuantified(q, vars));
                    stack.push(WorkItem::Process(body, neg));
                }
            },

            WorkItem::CombineAnd => {
                let right = results.pop().expect("nnf: missing right conjunct");
                let left = results.pop().expect("nnf: missing left conjunct");
                results.push(left.and(right));
            }

            WorkItem::CombineOr => {
                let right = results.pop().expect("nnf: missing right disjunct");
                let left = results.pop().expect("nnf: missing left disjunct");
                results.push(left.or(right));
            }

            WorkItem::CombineQuantified(q, vars) => {
                let body = Box::new(results.pop().expect("nnf: missing quantifier body"));
                results.push(match q {
                    Quantifier::ForAll => Expression::ForAll(vars.to_vec(), body),
                    Quantifier::Exists => Expression::Exists(vars.to_vec(), body),
                });
            }
        }
    }

    results.pop().expect("nnf: empty result stack")
}
