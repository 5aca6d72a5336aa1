//! Canal de diagnósticos não fatais
//!
//! O repositório nunca escreve no console: cada recusa suave, aviso de
//! normalização e relatório de carga/gravação/medição vira um [`Notice`]
//! que o consumidor drena quando quiser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severidade de um aviso
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Informativo (carga concluída, arquivo inexistente, relatório)
    Info,
    /// Operação concluída com ressalva (vetor não normalizado)
    Warning,
    /// Operação recusada sem alterar o repositório
    Error,
}

impl NoticeLevel {
    /// Nome descritivo
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mensagem destinada ao usuário
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
