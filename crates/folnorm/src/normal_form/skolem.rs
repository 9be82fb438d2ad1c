//! Skolemization and universal quantifier removal
//!
//! Expects a standardized formula in negation normal form.

use crate::config::NormalizeConfig;
use crate::error::{FolError, Result};
use crate::logic::{Constant, Expression, Registry, Term, Variable};

/// Remove existential quantifiers, walking the formula outside-in
///
/// Closed-world variables are expanded into a disjunction over their
/// domain. Open-world variables become a fresh Skolem constant, or a Skolem
/// function of the enclosing universal variables when there are any.
/// Universal quantifiers are kept; see [`drop_universals`].
pub fn skolemize(
    expr: &Expression,
    registry: &mut Registry,
    config: &NormalizeConfig,
) -> Result<Expression> {
    // Symbols are minted into a copy, kept only when the whole pass succeeds
    let mut scratch = registry.clone();
    let skolemized = Skolemizer {
        registry: &mut scratch,
        config,
        universal_vars: Vec::new(),
    }
    .run(expr.clone())?;
    *registry = scratch;
    Ok(skolemized)
}

struct Skolemizer<'a> {
    registry: &'a mut Registry,
    config: &'a NormalizeConfig,
    universal_vars: Vec<Variable>,
}

impl<'a> Skolemizer<'a> {
    fn run(&mut self, formula: Expression) -> Result<Expression> {
        // Iterative skolemization using explicit stack; the expansion factor
        // is the number of copies already made of the formula being processed
        enum WorkItem {
            Process(Expression, usize),
            CombineAnd,
            CombineOr,
            CombineForall(Vec<Variable>), // After processing body, pop vars and wrap result
        }

        let mut stack: Vec<WorkItem> = vec![WorkItem::Process(formula, 1)];
        let mut results: Vec<Expression> = Vec::new();

        while let Some(item) = stack.pop() {
            match item {
                WorkItem::Process(f, expansion) => match f {
                    Expression::Atom(_) => results.push(f),

                    Expression::Not(_) if f.is_literal() => results.push(f),

                    Expression::Not(_) => return Err(misplaced("a negated compound formula")),

                    Expression::And(f1, f2) => {
                        stack.push(WorkItem::CombineAnd);
                        stack.push(WorkItem::Process(*f2, expansion));
                        stack.push(WorkItem::Process(*f1, expansion));
                    }

                    Expression::Or(f1, f2) => {
                        stack.push(WorkItem::CombineOr);
                        stack.push(WorkItem::Process(*f2, expansion));
                        stack.push(WorkItem::Process(*f1, expansion));
                    }

                    Expression::ForAll(vars, body) => {
                        self.universal_vars.extend(vars.iter().cloned());
                        stack.push(WorkItem::CombineForall(vars));
                        stack.push(WorkItem::Process(*body, expansion));
                    }

                    Expression::Exists(vars, body) => {
                        let (body, expansion) = self.eliminate(&vars, *body, expansion)?;
                        // The existential is gone; keep processing what replaced it
                        stack.push(WorkItem::Process(body, expansion));
                    }

                    Expression::Implies(..) => return Err(misplaced("an implication")),
                    Expression::Equiv(..) => return Err(misplaced("an equivalence")),
                },

                WorkItem::CombineAnd => {
                    let right = results.pop().expect("skolemize: missing right conjunct");
                    let left = results.pop().expect("skolemize: missing left conjunct");
                    results.push(left.and(right));
                }

                WorkItem::CombineOr => {
                    let right = results.pop().expect("skolemize: missing right disjunct");
                    let left = results.pop().expect("skolemize: missing left disjunct");
                    results.push(left.or(right));
                }

                WorkItem::CombineForall(vars) => {
                    debug_assert!(self.universal_vars.len() >= vars.len());
                    let depth = self.universal_vars.len().saturating_sub(vars.len());
                    self.universal_vars.truncate(depth);
                    let body = results.pop().expect("skolemize: missing quantifier body");
                    results.push(Expression::ForAll(vars, Box::new(body)));
                }
            }
        }

        Ok(results.pop().expect("skolemize: empty result stack"))
    }

    /// Replace the variables of one existential quantifier
    fn eliminate(
        &mut self,
        vars: &[Variable],
        body: Expression,
        expansion: usize,
    ) -> Result<(Expression, usize)> {
        let mut body = body;
        let mut closed = Vec::new();
        for var in vars {
            match var.domain() {
                Some(domain) => closed.push((var, domain)),
                None => {
                    let skolem = self.skolem_term(var)?;
                    body = body.substitute(var, &skolem);
                }
            }
        }
        if closed.is_empty() {
            return Ok((body, expansion));
        }

        let required = closed
            .iter()
            .try_fold(expansion, |acc, (_, domain)| acc.checked_mul(domain.len()))
            .unwrap_or(usize::MAX);
        if required > self.config.domain_expansion_limit {
            log::warn!(
                "refusing to expand ∃ {} into {} instances (limit {})",
                closed
                    .iter()
                    .map(|(v, _)| v.name())
                    .collect::<Vec<_>>()
                    .join(","),
                required,
                self.config.domain_expansion_limit
            );
            return Err(FolError::ClosedWorldExpansionTooLarge {
                required,
                limit: self.config.domain_expansion_limit,
            });
        }

        // Cartesian product of the domains, first variable varying slowest
        let mut assignments: Vec<Vec<&Constant>> = vec![Vec::new()];
        for (_, domain) in &closed {
            assignments = assignments
                .into_iter()
                .flat_map(|prefix| {
                    domain.iter().map(move |c| {
                        let mut next = prefix.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
        }

        let instances = assignments.into_iter().map(|assignment| {
            closed
                .iter()
                .zip(assignment)
                .fold(body.clone(), |acc, ((var, _), c)| {
                    acc.substitute(var, &Term::from(c))
                })
        });
        let expanded = Expression::disjunction(instances).unwrap_or(body.clone());
        Ok((expanded, required))
    }

    fn skolem_term(&mut self, var: &Variable) -> Result<Term> {
        let prefix = &self.config.skolem_prefix;
        if self.universal_vars.is_empty() {
            return Ok(Term::Constant(self.registry.mint_skolem_constant(prefix)));
        }
        if !self.config.skolem_functions {
            return Err(FolError::SkolemFunctionUnsupported {
                variable: var.source_name().to_string(),
            });
        }
        let args = self.universal_vars.iter().map(Term::from).collect();
        Ok(self.registry.mint_skolem_function(prefix, args))
    }
}

fn misplaced(connective: &'static str) -> FolError {
    FolError::UnsupportedConnectiveShape {
        connective,
        stage: "skolemization",
    }
}

/// Drop the universal quantifiers left after skolemization
///
/// Their variables are implicitly universally quantified over the result.
pub fn drop_universals(expr: &Expression) -> Expression {
    match expr {
        Expression::ForAll(_, body) => drop_universals(body),
        Expression::Atom(_) => expr.clone(),
        Expression::Not(f) => drop_universals(f).negated(),
        Expression::And(f1, f2) => drop_universals(f1).and(drop_universals(f2)),
        Expression::Or(f1, f2) => drop_universals(f1).or(drop_universals(f2)),
        Expression::Implies(f1, f2) => drop_universals(f1).implies(drop_universals(f2)),
        Expression::Equiv(f1, f2) => drop_universals(f1).equiv(drop_universals(f2)),
        Expression::Exists(vars, body) => Expression::Exists(vars.clone(), Box::new(drop_universals(body))),
    }
}
