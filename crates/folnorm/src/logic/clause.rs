//! Literals and clauses read off a CNF expression

use super::expr::Expression;
use super::predicate::Atom;
use crate::error::{FolError, Result};
use std::fmt;

/// A literal (positive or negative atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    pub fn positive(atom: Atom) -> Self {
        Literal { atom, polarity: true }
    }

    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }

    pub fn to_expression(&self) -> Expression {
        let atom = Expression::Atom(self.atom.clone());
        if self.polarity {
            atom
        } else {
            atom.negated()
        }
    }
}

/// A clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(|l| l.atom.is_ground())
    }

    /// Check for a pair of complementary literals
    pub fn is_tautology(&self) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].atom == self.literals[j].atom
                    && self.literals[i].polarity != self.literals[j].polarity
                {
                    return true;
                }
            }
        }
        false
    }

    /// The clause as a left-associated disjunction, `None` for the empty clause
    pub fn to_expression(&self) -> Option<Expression> {
        Expression::disjunction(self.literals.iter().map(Literal::to_expression))
    }
}

/// Read the clauses off an expression already in CNF
pub fn clauses_from_cnf(expr: &Expression) -> Result<Vec<Clause>> {
    let mut clauses = Vec::new();
    let mut stack = vec![expr];
    while let Some(f) = stack.pop() {
        match f {
            Expression::And(f1, f2) => {
                stack.push(f2.as_ref());
                stack.push(f1.as_ref());
            }
            _ => {
                let mut literals = Vec::new();
                collect_literals(f, &mut literals)?;
                clauses.push(Clause::new(literals));
            }
        }
    }
    Ok(clauses)
}

fn collect_literals(expr: &Expression, literals: &mut Vec<Literal>) -> Result<()> {
    match expr {
        Expression::Or(f1, f2) => {
            collect_literals(f1, literals)?;
            collect_literals(f2, literals)
        }
        Expression::Atom(atom) => {
            literals.push(Literal::positive(atom.clone()));
            Ok(())
        }
        Expression::Not(inner) => match &**inner {
            Expression::Atom(atom) => {
                literals.push(Literal::negative(atom.clone()));
                Ok(())
            }
            _ => Err(unexpected("a non-literal negation")),
        },
        Expression::And(..) => Err(unexpected("a conjunction under a disjunction")),
        Expression::Implies(..) => Err(unexpected("an implication")),
        Expression::Equiv(..) => Err(unexpected("an equivalence")),
        Expression::ForAll(..) | Expression::Exists(..) => Err(unexpected("a quantifier")),
    }
}

fn unexpected(connective: &'static str) -> FolError {
    FolError::UnsupportedConnectiveShape {
        connective,
        stage: "clause extraction",
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.atom)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    #[test]
    fn test_clauses_from_cnf() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let p = registry.define_predicate("P", 1).unwrap();
        let q = registry.define_predicate("Q", 1).unwrap();
        let r = registry.define_predicate("R", 1).unwrap();

        let pa = p.apply([&a]).unwrap();
        let qa = q.apply([&a]).unwrap();
        let ra = r.apply([&a]).unwrap();

        // (P(A) ∨ ¬Q(A)) ∧ R(A)
        let cnf = pa.clone().or(qa.clone().negated()).and(ra.clone());
        let clauses = clauses_from_cnf(&cnf).unwrap();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].to_string(), "P(A) ∨ ¬Q(A)");
        assert_eq!(clauses[1].to_string(), "R(A)");
        assert!(clauses[1].is_unit());
        assert!(clauses.iter().all(Clause::is_ground));
        assert_eq!(clauses[0].to_expression(), Some(pa.or(qa.negated())));
    }

    #[test]
    fn test_clauses_from_non_cnf_fails() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let p = registry.define_predicate("P", 1).unwrap();
        let pa = p.apply([&a]).unwrap();

        let bad = pa.clone().and(pa.clone()).or(pa.clone());
        assert!(matches!(
            clauses_from_cnf(&bad),
            Err(FolError::UnsupportedConnectiveShape { .. })
        ));
        assert!(clauses_from_cnf(&pa.clone().implies(pa)).is_err());
    }

    #[test]
    fn test_tautology() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let p = registry.define_predicate("P", 1).unwrap();
        let atom = match p.apply([&a]).unwrap() {
            Expression::Atom(atom) => atom,
            _ => unreachable!(),
        };

        let taut = Clause::new(vec![Literal::positive(atom.clone()), Literal::negative(atom.clone())]);
        assert!(taut.is_tautology());
        assert!(!Clause::new(vec![Literal::positive(atom.clone())]).is_tautology());
        assert_eq!(Literal::positive(atom).complement().to_string(), "¬P(A)");
        assert_eq!(Clause::default().to_string(), "⊥");
        assert!(Clause::default().to_expression().is_none());
    }
}
