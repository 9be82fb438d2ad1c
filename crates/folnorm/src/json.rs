//! JSON serialization types for clause sets

use crate::logic::{Atom, Clause, Literal, Term};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        domain: Option<Vec<String>>,
    },
    Constant {
        name: String,
    },
    Skolem {
        name: String,
        args: Vec<TermJson>,
    },
}

impl TermJson {
    pub fn from_term(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name().to_string(),
                domain: v
                    .domain()
                    .map(|d| d.iter().map(|c| c.name().to_string()).collect()),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name().to_string(),
            },
            Term::Skolem(f) => TermJson::Skolem {
                name: f.name().to_string(),
                args: f.args().iter().map(TermJson::from_term).collect(),
            },
        }
    }
}

/// JSON representation of an atom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomJson {
    pub predicate: String,
    pub args: Vec<TermJson>,
}

impl AtomJson {
    pub fn from_atom(atom: &Atom) -> Self {
        AtomJson {
            predicate: atom.predicate().name().to_string(),
            args: atom.terms().iter().map(TermJson::from_term).collect(),
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub atom: AtomJson,
}

impl LiteralJson {
    pub fn from_literal(lit: &Literal) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            atom: AtomJson::from_atom(&lit.atom),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub literals: Vec<LiteralJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause) -> Self {
        ClauseJson {
            literals: clause.literals.iter().map(LiteralJson::from_literal).collect(),
        }
    }
}

/// Export a clause set as a JSON array
pub fn clauses_to_json(clauses: &[Clause]) -> serde_json::Value {
    let clauses: Vec<ClauseJson> = clauses.iter().map(ClauseJson::from_clause).collect();
    // A Vec of plain derived structs always serializes
    serde_json::to_value(clauses).unwrap_or(serde_json::Value::Null)
}

pub fn clauses_to_json_string(clauses: &[Clause]) -> serde_json::Result<String> {
    let clauses: Vec<ClauseJson> = clauses.iter().map(ClauseJson::from_clause).collect();
    serde_json::to_string(&clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Expression, Registry};

    #[test]
    fn test_clause_json_shape() {
        let mut registry = Registry::new();
        let a = registry.define_constant("a").unwrap();
        let p = registry.define_closed_variable("p", vec![a.clone()]).unwrap();
        let friends = registry.define_predicate("Friends", 2).unwrap();

        let atom = match friends.apply([Term::from(&p), Term::from(&a)]).unwrap() {
            Expression::Atom(atom) => atom,
            _ => unreachable!(),
        };
        let clause = Clause::new(vec![Literal::negative(atom)]);

        let value = clauses_to_json(&[clause.clone()]);
        assert_eq!(value[0]["literals"][0]["polarity"], false);
        assert_eq!(value[0]["literals"][0]["atom"]["predicate"], "Friends");
        assert_eq!(value[0]["literals"][0]["atom"]["args"][0]["type"], "Variable");
        assert_eq!(value[0]["literals"][0]["atom"]["args"][0]["domain"][0], "A");
        assert_eq!(value[0]["literals"][0]["atom"]["args"][1]["name"], "A");

        let text = clauses_to_json_string(&[clause]).unwrap();
        let parsed: Vec<ClauseJson> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0].literals.len(), 1);
    }
}
