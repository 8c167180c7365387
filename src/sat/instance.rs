//! SAT instance model

use crate::error::EncodeError;

/// A SAT clause (disjunction of literals).
///
/// Literals are non-zero integers: positive for an asserted variable,
/// negative for its negation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>,
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// An empty clause is unsatisfiable and never a valid encoder output.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/// A CNF SAT instance: a variable count and an ordered clause sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatInstance {
    num_vars: usize,
    clauses: Vec<Clause>,
}

impl SatInstance {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Appends a clause, rejecting empty clauses and out-of-range literals.
    pub fn add_clause(&mut self, clause: Clause) -> Result<(), EncodeError> {
        if clause.is_empty() {
            return Err(EncodeError::malformed(
                "a clause must contain at least one literal",
            ));
        }
        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if literal == 0 || var > self.num_vars {
                return Err(EncodeError::malformed(format!(
                    "literal {} is outside the declared variable range 1..={}",
                    literal, self.num_vars
                )));
            }
        }
        self.clauses.push(clause);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_constructors() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert!(!clause.is_empty());

        assert_eq!(Clause::unit(5).literals, vec![5]);
        assert_eq!(Clause::binary(-1, 2).literals, vec![-1, 2]);
    }

    #[test]
    fn test_instance_accepts_valid_clauses() {
        let mut sat = SatInstance::new(3);
        sat.add_clause(Clause::new(vec![1, -2])).unwrap();
        sat.add_clause(Clause::unit(-3)).unwrap();
        assert_eq!(sat.num_clauses(), 2);
        assert_eq!(sat.num_vars(), 3);
    }

    #[test]
    fn test_instance_rejects_bad_clauses() {
        let mut sat = SatInstance::new(2);
        assert!(sat.add_clause(Clause::new(vec![])).is_err());
        assert!(sat.add_clause(Clause::unit(0)).is_err());
        assert!(sat.add_clause(Clause::unit(3)).is_err());
        assert!(sat.add_clause(Clause::unit(-3)).is_err());
        assert_eq!(sat.num_clauses(), 0);
    }
}
