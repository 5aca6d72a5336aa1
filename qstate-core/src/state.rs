//! Estado quântico identificado
//!
//! Um [`QuantumState`] é um vetor de amplitudes complexas, com um id único
//! dentro do repositório e um rótulo de base livre.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::complex::{format_complex, parse_complex};
use crate::error::{QuantumError, QuantumResult};
use crate::notice::Notice;

/// Desvio máximo de `Σ|a_i|²` em relação a 1 aceito sem aviso
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Estado quântico: id, amplitudes e base
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    id: String,
    vector: Vec<Complex64>,
    basis: String,
}

/// Forma persistida de um estado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: String,
    pub basis: String,
    /// Amplitudes na forma canônica `(re+imj)`
    pub vector: Vec<String>,
}

impl QuantumState {
    /// Cria novo estado.
    ///
    /// Aceita amplitudes reais ou complexas. Falha apenas com vetor vazio;
    /// um vetor não normalizado gera um `tracing::warn!` e o estado é criado
    /// mesmo assim.
    pub fn new<I, A>(id: impl Into<String>, vector: I, basis: impl Into<String>) -> QuantumResult<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Complex64>,
    {
        let id = id.into();
        let vector: Vec<Complex64> = vector.into_iter().map(Into::into).collect();

        if vector.is_empty() {
            return Err(QuantumError::EmptyVector { id });
        }

        let state = Self {
            id,
            vector,
            basis: basis.into(),
        };

        if !state.is_normalized() {
            tracing::warn!(
                id = %state.id,
                norm_sqr = state.norm_sqr(),
                "state vector is not normalized"
            );
        }

        Ok(state)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vector(&self) -> &[Complex64] {
        &self.vector
    }

    pub fn basis(&self) -> &str {
        &self.basis
    }

    /// Número de amplitudes (sempre ≥ 1)
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Renomeia o estado (fluxo de aplicação de operador do repositório)
    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Soma dos módulos ao quadrado
    pub fn norm_sqr(&self) -> f64 {
        self.vector.iter().map(|a| a.norm_sqr()).sum()
    }

    /// `|Σ|a_i|² - 1| <= 1e-6`
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }

    /// Aviso de normalização, se houver
    pub fn normalization_warning(&self) -> Option<Notice> {
        if self.is_normalized() {
            None
        } else {
            Some(Notice::warning(format!(
                "State vector of '{}' is not normalized (norm² = {})",
                self.id,
                self.norm_sqr()
            )))
        }
    }

    /// Probabilidade de cada estado da base.
    ///
    /// `p_i = |a_i|² / Σ|a_j|²`, logo o resultado soma 1 mesmo quando o vetor
    /// armazenado está só aproximadamente normalizado. Não altera o estado.
    ///
    /// Os módulos são divididos pelo maior deles antes de elevar ao quadrado,
    /// então amplitudes finitas muito grandes ou muito pequenas não estouram.
    pub fn measure(&self) -> QuantumResult<Vec<f64>> {
        let magnitudes: Vec<f64> = self.vector.iter().map(|a| a.norm()).collect();

        if magnitudes.iter().any(|m| !m.is_finite()) {
            return Err(QuantumError::NonFiniteNorm {
                id: self.id.clone(),
            });
        }

        let scale = magnitudes.iter().copied().fold(0.0, f64::max);
        if scale == 0.0 {
            return Err(QuantumError::ZeroNorm {
                id: self.id.clone(),
            });
        }

        let scaled: Vec<f64> = magnitudes.iter().map(|m| (m / scale).powi(2)).collect();
        let total: f64 = scaled.iter().sum();

        Ok(scaled.into_iter().map(|p| p / total).collect())
    }

    /// Converte para a forma persistida
    pub fn to_record(&self) -> StateRecord {
        StateRecord {
            id: self.id.clone(),
            basis: self.basis.clone(),
            vector: self.vector.iter().map(|&a| format_complex(a)).collect(),
        }
    }

    /// Reconstrói a partir da forma persistida, pelo construtor normal
    pub fn from_record(record: &StateRecord) -> QuantumResult<Self> {
        let vector = record
            .vector
            .iter()
            .map(|text| parse_complex(text))
            .collect::<QuantumResult<Vec<_>>>()?;
        Self::new(record.id.clone(), vector, record.basis.clone())
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amplitudes: Vec<String> = self.vector.iter().map(|&a| format_complex(a)).collect();
        write!(
            f,
            "{}: vector=[{}] in basis {}",
            self.id,
            amplitudes.join(", "),
            self.basis
        )
    }
}
