//! Error types for folnorm

use std::fmt;
use thiserror::Error;

/// Symbol namespace held by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Constant,
    Variable,
    Predicate,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Constant => write!(f, "constant"),
            Namespace::Variable => write!(f, "variable"),
            Namespace::Predicate => write!(f, "predicate"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolError {
    #[error("there is already a {namespace} named `{name}`")]
    DuplicateName { namespace: Namespace, name: String },

    #[error("invalid {namespace} name `{name}`: names must be non-empty and contain no whitespace")]
    InvalidName { namespace: Namespace, name: String },

    #[error("predicate `{predicate}` declared with arity {arity}, arity must be at least 1")]
    InvalidArity { predicate: String, arity: usize },

    #[error("predicate `{predicate}` expects {expected} term(s) but was applied to {actual}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        actual: usize,
    },

    #[error("closed-world variable `{variable}` declared with an empty domain")]
    EmptyDomain { variable: String },

    #[error("`{term}` is a term, not a formula, and cannot be asserted")]
    NotAFormula { term: String },

    #[error("a quantifier must bind at least one variable")]
    EmptyBinding,

    #[error("unsupported connective shape: {connective} reached the {stage} stage")]
    UnsupportedConnectiveShape {
        connective: &'static str,
        stage: &'static str,
    },

    #[error("closed-world expansion needs {required} instances, above the limit of {limit}")]
    ClosedWorldExpansionTooLarge { required: usize, limit: usize },

    #[error("existential variable `{variable}` lies under a universal quantifier and skolem functions are disabled")]
    SkolemFunctionUnsupported { variable: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FolError>;
