//! Query builder types

/// A bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

/// Positional parameters collected while building a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Append a value and return its 1-based position
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.values.push(value);
        self.values.len()
    }
}

/// A condition present in a built query's WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `column = ?`
    Equals(&'static str),
    /// `column BETWEEN ? AND ?`
    Between(&'static str),
}

/// SQL text plus its bound parameters
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: SqlParams,
    pub predicates: Vec<Predicate>,
}
