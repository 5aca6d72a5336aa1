//! Operator table
//!
//! The core never hardcodes gates: the table is configuration data, built
//! once at startup through `QuantumOperator::new` and then shared read-only.

use anyhow::{bail, Result};
use qstate_core::{Complex64, QuantumOperator};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

/// One `[[operators]]` entry of qstate.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSpec {
    /// Operator name, also the suffix of generated state ids
    pub name: String,

    /// Matrix rows, each entry a `[re, im]` pair
    pub matrix: Vec<Vec<[f64; 2]>>,
}

impl OperatorSpec {
    pub fn new(name: &str, matrix: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            name: name.to_string(),
            matrix,
        }
    }

    /// Build the operator, failing on a non-square matrix
    pub fn build(&self) -> qstate_core::QuantumResult<QuantumOperator> {
        QuantumOperator::new(
            self.name.clone(),
            self.matrix
                .iter()
                .map(|row| row.iter().map(|&[re, im]| Complex64::new(re, im))),
        )
    }
}

/// The standard single-qubit gates: X, Y, Z, H, S, T
pub fn standard_gates() -> Vec<OperatorSpec> {
    let h = FRAC_1_SQRT_2;
    vec![
        OperatorSpec::new("X", vec![vec![[0.0, 0.0], [1.0, 0.0]], vec![[1.0, 0.0], [0.0, 0.0]]]),
        OperatorSpec::new("Y", vec![vec![[0.0, 0.0], [0.0, -1.0]], vec![[0.0, 1.0], [0.0, 0.0]]]),
        OperatorSpec::new("Z", vec![vec![[1.0, 0.0], [0.0, 0.0]], vec![[0.0, 0.0], [-1.0, 0.0]]]),
        OperatorSpec::new("H", vec![vec![[h, 0.0], [h, 0.0]], vec![[h, 0.0], [-h, 0.0]]]),
        OperatorSpec::new("S", vec![vec![[1.0, 0.0], [0.0, 0.0]], vec![[0.0, 0.0], [0.0, 1.0]]]),
        // e^(iπ/4)
        OperatorSpec::new("T", vec![vec![[1.0, 0.0], [0.0, 0.0]], vec![[0.0, 0.0], [h, h]]]),
    ]
}

/// Named operators available to `apply`
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: Vec<QuantumOperator>,
}

impl OperatorTable {
    /// Build every configured operator; names must be unique
    pub fn from_specs(specs: &[OperatorSpec]) -> Result<Self> {
        let mut operators: Vec<QuantumOperator> = Vec::with_capacity(specs.len());

        for spec in specs {
            if operators.iter().any(|op| op.name() == spec.name) {
                bail!("Operator '{}' is defined more than once", spec.name);
            }
            operators.push(spec.build()?);
        }

        Ok(Self { operators })
    }

    pub fn get(&self, name: &str) -> Option<&QuantumOperator> {
        self.operators.iter().find(|op| op.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.operators.iter().map(QuantumOperator::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuantumOperator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qstate_core::QuantumError;

    #[test]
    fn test_standard_gates_are_unitary() {
        let table = OperatorTable::from_specs(&standard_gates()).unwrap();
        assert_eq!(table.names(), vec!["X", "Y", "Z", "H", "S", "T"]);
        for op in table.iter() {
            assert!(op.is_unitary(1e-12), "{} should be unitary", op.name());
        }
    }

    #[test]
    fn test_lookup() {
        let table = OperatorTable::from_specs(&standard_gates()).unwrap();
        let x = table.get("X").unwrap();
        assert_eq!(x.entry(0, 1), Some(Complex64::new(1.0, 0.0)));
        assert!(table.get("CNOT").is_none());
    }

    #[test]
    fn test_non_square_spec_fails() {
        let spec = OperatorSpec::new("bad", vec![vec![[1.0, 0.0], [0.0, 0.0]]]);
        let err = spec.build().unwrap_err();
        assert!(matches!(err, QuantumError::NonSquareMatrix { rows: 1, cols: 2, .. }));
        assert!(OperatorTable::from_specs(&[spec]).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let x = standard_gates().remove(0);
        let err = OperatorTable::from_specs(&[x.clone(), x]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
