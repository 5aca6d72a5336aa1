//! # ⚛️ qstate-core — Estados, operadores e repositório
//!
//! Modela uma pequena coleção de vetores de estado quântico e os operadores
//! unitários que os transformam, com persistência num arquivo único.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          StateRepository                        │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  id → QuantumState (ordem de inserção)    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Notices (avisos não fatais)              │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  save_all / load_all (JSON, "(re+imj)")   │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//!            ▲ apply
//!   QuantumOperator (matriz n×n)
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qstate_core::{QuantumOperator, StateRepository};
//!
//! let mut repo = StateRepository::new();
//! repo.add_state("q0", [1.0, 0.0], "computational").unwrap();
//!
//! let x = QuantumOperator::new("X", [[0.0, 1.0], [1.0, 0.0]]).unwrap();
//! assert!(repo.apply_operator("q0", &x, None).unwrap());
//!
//! let probabilities = repo.measure_state("q0_X").unwrap().unwrap();
//! assert_eq!(probabilities, vec![0.0, 1.0]);
//! ```

pub mod complex;
pub mod error;
pub mod notice;
pub mod operator;
pub mod repository;
pub mod state;

pub use complex::{format_complex, parse_complex};
pub use error::{QuantumError, QuantumResult};
pub use notice::{Notice, NoticeLevel};
pub use num_complex::Complex64;
pub use operator::QuantumOperator;
pub use repository::{LoadStatus, Measurement, StateRepository, EMPTY_LISTING};
pub use state::{QuantumState, StateRecord, NORMALIZATION_TOLERANCE};

#[cfg(test)]
mod tests;
