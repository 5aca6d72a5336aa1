//! Tipos de erro para qstate-core

use std::io;
use thiserror::Error;

/// Resultado customizado para operações quânticas
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros que abortam a operação que os disparou.
///
/// Condições "suaves" (id duplicado, estado inexistente, falha de I/O na
/// persistência) nunca viram `QuantumError`: o repositório as reporta como
/// [`Notice`](crate::Notice).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("State vector of '{id}' cannot be empty")]
    EmptyVector { id: String },

    #[error("Operator '{name}' must be square, got {rows}x{cols}")]
    NonSquareMatrix {
        name: String,
        rows: usize,
        cols: usize,
    },

    #[error("State '{id}' has zero norm and cannot be measured")]
    ZeroNorm { id: String },

    #[error("State '{id}' has a non-finite amplitude and cannot be measured")]
    NonFiniteNorm { id: String },

    #[error("Operator '{operator}' has dimension {expected} but state '{state}' has {found} amplitudes")]
    DimensionMismatch {
        operator: String,
        state: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid amplitude literal: '{text}'")]
    InvalidAmplitude { text: String },
}

impl QuantumError {
    /// Violação de contrato ou objeto matemático degenerado
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyVector { .. }
                | Self::NonSquareMatrix { .. }
                | Self::ZeroNorm { .. }
                | Self::NonFiniteNorm { .. }
                | Self::InvalidAmplitude { .. }
        )
    }

    /// Operador e estado com dimensões incompatíveis
    pub fn is_dimension(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

/// Falhas internas de persistência.
///
/// Nunca saem do repositório: `save_all`/`load_all` as convertem em
/// [`Notice`](crate::Notice) de nível `Error`.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    State(#[from] QuantumError),
}
