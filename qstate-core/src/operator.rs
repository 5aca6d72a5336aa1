//! # Operadores quânticos
//!
//! Um [`QuantumOperator`] é uma matriz complexa quadrada com nome. Aplicá-lo
//! a um estado produz um novo estado `<id>_<nome>` na mesma base; o estado
//! de origem nunca é alterado.
//!
//! Operadores são tratados como unitários mas isso não é verificado na
//! aplicação: uma matriz não unitária produz um estado não normalizado, que
//! passa pelo aviso normal do construtor. [`QuantumOperator::is_unitary`]
//! existe apenas para inspeção.

use num_complex::Complex64;
use std::fmt;

use crate::complex::format_complex;
use crate::error::{QuantumError, QuantumResult};
use crate::state::QuantumState;

/// Matriz complexa n×n com nome
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumOperator {
    name: String,
    dimension: usize,
    /// Elementos em ordem row-major
    matrix: Vec<Complex64>,
}

impl QuantumOperator {
    /// Cria operador a partir das linhas da matriz.
    ///
    /// Falha com [`QuantumError::NonSquareMatrix`] se alguma linha não tiver
    /// exatamente tantas colunas quanto há linhas.
    pub fn new<R, A>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> QuantumResult<Self>
    where
        R: IntoIterator<Item = A>,
        A: Into<Complex64>,
    {
        let name = name.into();
        let rows: Vec<Vec<Complex64>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let dimension = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != dimension) {
            return Err(QuantumError::NonSquareMatrix {
                name,
                rows: dimension,
                cols: row.len(),
            });
        }

        Ok(Self {
            name,
            dimension,
            matrix: rows.into_iter().flatten().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Número de linhas (= número de colunas)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Elemento (linha, coluna)
    pub fn entry(&self, row: usize, col: usize) -> Option<Complex64> {
        if row < self.dimension && col < self.dimension {
            Some(self.matrix[row * self.dimension + col])
        } else {
            None
        }
    }

    /// Linhas da matriz
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        self.matrix.chunks(self.dimension.max(1))
    }

    /// Verifica se `U·U† ≈ I` dentro da tolerância
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let n = self.dimension;
        let at = |i: usize, j: usize| self.matrix[i * n + j];

        (0..n).all(|i| {
            (0..n).all(|j| {
                let dot: Complex64 = (0..n).map(|k| at(i, k) * at(j, k).conj()).sum();
                let expected = if i == j { Complex64::new(1.0, 0.0) } else { Complex64::new(0.0, 0.0) };
                (dot - expected).norm() <= tolerance
            })
        })
    }

    /// Aplica o operador: `result[i] = Σ_j matrix[i][j] * vector[j]`
    pub fn apply(&self, state: &QuantumState) -> QuantumResult<QuantumState> {
        if state.dimension() != self.dimension {
            return Err(QuantumError::DimensionMismatch {
                operator: self.name.clone(),
                state: state.id().to_string(),
                expected: self.dimension,
                found: state.dimension(),
            });
        }

        let amplitudes = state.vector();
        let result: Vec<Complex64> = self
            .rows()
            .map(|row| row.iter().zip(amplitudes).map(|(m, a)| m * a).sum())
            .collect();

        QuantumState::new(format!("{}_{}", state.id(), self.name), result, state.basis())
    }
}

impl fmt::Display for QuantumOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator '{}':", self.name)?;
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|&z| format_complex(z)).collect();
            write!(f, "\n  [{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
