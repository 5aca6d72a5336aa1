//! # Repositório de estados
//!
//! Dono exclusivo dos estados, indexados por id em ordem de inserção.
//!
//! ## Política de erros
//!
//! - **Duro** (`Err`): vetor vazio, norma zero na medição, dimensão
//!   incompatível. Vem do estado ou do operador e não é capturado aqui.
//! - **Suave** (`Ok(false)` / `Ok(None)` / [`LoadStatus`]): id duplicado,
//!   estado inexistente, falha de I/O. Gera um [`Notice`] e não altera o
//!   repositório.
//!
//! ## Persistência
//!
//! Um único arquivo JSON com um array de [`StateRecord`]. `save_all` grava
//! num arquivo temporário de nome único no mesmo diretório e renomeia; `load_all` monta o novo mapa por
//! inteiro antes de substituir o atual.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use num_complex::Complex64;
use tempfile::NamedTempFile;

use crate::error::{QuantumResult, StoreError};
use crate::notice::{Notice, NoticeLevel};
use crate::operator::QuantumOperator;
use crate::state::{QuantumState, StateRecord};

/// Linha única de `list_states` para repositório vazio
pub const EMPTY_LISTING: &str = "No states registered.";

/// Resultado de [`StateRepository::load_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Coleção substituída; número de estados carregados
    Loaded(usize),
    /// Arquivo inexistente; conteúdo atual mantido
    Missing,
    /// Falha de leitura ou parse; conteúdo atual mantido
    Failed,
}

/// Relatório de medição
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: String,
    pub basis: String,
    /// Probabilidades brutas, somam 1
    pub probabilities: Vec<f64>,
}

impl Measurement {
    /// Percentuais arredondados para 2 casas (apenas exibição)
    pub fn percentages(&self) -> Vec<f64> {
        self.probabilities
            .iter()
            .map(|p| (p * 10_000.0).round() / 100.0)
            .collect()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measurement of state '{}' in basis '{}':", self.id, self.basis)?;
        for (i, pct) in self.percentages().into_iter().enumerate() {
            write!(f, "\n - basis state {}: {}%", i, pct)?;
        }
        Ok(())
    }
}

/// Coleção de estados quânticos
#[derive(Debug, Default)]
pub struct StateRepository {
    states: Vec<QuantumState>,
    index: HashMap<String, usize>,
    notices: Vec<Notice>,
}

impl StateRepository {
    /// Cria repositório vazio
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Ids em ordem de inserção
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(QuantumState::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuantumState> {
        self.states.iter()
    }

    /// Avisos pendentes
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drena os avisos pendentes
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
        self.notices.push(notice);
    }

    /// Insere um estado cujo id já se sabe livre
    fn insert(&mut self, state: QuantumState) {
        if let Some(warning) = state.normalization_warning() {
            self.notices.push(warning);
        }
        tracing::debug!(id = state.id(), dimension = state.dimension(), "state inserted");
        self.index.insert(state.id().to_string(), self.states.len());
        self.states.push(state);
    }

    /// Cria e registra um novo estado.
    ///
    /// `Ok(false)` se o id já existe. Erros de construção (vetor vazio)
    /// propagam.
    pub fn add_state<I, A>(&mut self, id: impl Into<String>, vector: I, basis: impl Into<String>) -> QuantumResult<bool>
    where
        I: IntoIterator<Item = A>,
        A: Into<Complex64>,
    {
        let id = id.into();
        if self.contains(&id) {
            self.notify(Notice::error(format!("A state with id '{}' already exists.", id)));
            return Ok(false);
        }

        let state = QuantumState::new(id, vector, basis)?;
        self.insert(state);
        Ok(true)
    }

    /// Uma linha descritiva por estado, em ordem de inserção
    pub fn list_states(&self) -> Vec<String> {
        if self.states.is_empty() {
            return vec![EMPTY_LISTING.to_string()];
        }
        self.states.iter().map(ToString::to_string).collect()
    }

    pub fn get_state(&self, id: &str) -> Option<&QuantumState> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    /// Aplica `operator` ao estado `source_id` e registra o resultado.
    ///
    /// O id final é `new_id` quando informado e não vazio, senão
    /// `<source_id>_<operador>`. Nunca sobrescreve: id final existente
    /// retorna `Ok(false)`. Erro de dimensão propaga.
    pub fn apply_operator(
        &mut self,
        source_id: &str,
        operator: &QuantumOperator,
        new_id: Option<&str>,
    ) -> QuantumResult<bool> {
        let Some(source) = self.get_state(source_id) else {
            self.notify(Notice::error(format!("No state with id '{}' exists.", source_id)));
            return Ok(false);
        };

        let mut transformed = operator.apply(source)?;

        let final_id = match new_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => transformed.id().to_string(),
        };

        if self.contains(&final_id) {
            self.notify(Notice::error(format!(
                "A state with id '{}' already exists. It cannot be overwritten.",
                final_id
            )));
            return Ok(false);
        }

        transformed.set_id(final_id);
        self.insert(transformed);
        Ok(true)
    }

    /// Mede o estado `id`.
    ///
    /// `Ok(None)` se não existe. Norma zero propaga. Em caso de sucesso o
    /// relatório de [`Measurement`] vai para os avisos.
    pub fn measure_state(&mut self, id: &str) -> QuantumResult<Option<Vec<f64>>> {
        let Some(state) = self.get_state(id) else {
            self.notify(Notice::error(format!("No state with id '{}' exists to measure.", id)));
            return Ok(None);
        };

        let probabilities = state.measure()?;
        let report = Measurement {
            id: state.id().to_string(),
            basis: state.basis().to_string(),
            probabilities: probabilities.clone(),
        };

        self.notify(Notice::info(report.to_string()));
        Ok(Some(probabilities))
    }

    /// Grava toda a coleção em `path`.
    ///
    /// Nunca falha de forma dura: erros viram aviso e `false`.
    pub fn save_all(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let records: Vec<StateRecord> = self.states.iter().map(QuantumState::to_record).collect();

        match write_replacing(path, &records) {
            Ok(()) => {
                self.notify(Notice::info(format!(
                    "Saved {} states to '{}'.",
                    records.len(),
                    path.display()
                )));
                true
            }
            Err(e) => {
                self.notify(Notice::error(format!(
                    "Could not save to '{}': {}",
                    path.display(),
                    e
                )));
                false
            }
        }
    }

    /// Substitui a coleção pelo conteúdo de `path`.
    ///
    /// Arquivo inexistente é informativo. Qualquer outra falha deixa o
    /// conteúdo atual intacto.
    pub fn load_all(&mut self, path: impl AsRef<Path>) -> LoadStatus {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.notify(Notice::info(format!(
                    "File '{}' does not exist; nothing loaded.",
                    path.display()
                )));
                return LoadStatus::Missing;
            }
            Err(e) => {
                self.load_failed(path, &StoreError::from(e));
                return LoadStatus::Failed;
            }
        };

        let (states, duplicates) = match decode(&content) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.load_failed(path, &e);
                return LoadStatus::Failed;
            }
        };

        self.states.clear();
        self.index.clear();
        for state in states {
            self.insert(state);
        }
        for id in duplicates {
            self.notify(Notice::warning(format!(
                "File '{}' lists state '{}' more than once; the last entry was kept.",
                path.display(),
                id
            )));
        }

        let count = self.states.len();
        self.notify(Notice::info(format!(
            "Loaded {} states from '{}'.",
            count,
            path.display()
        )));
        LoadStatus::Loaded(count)
    }

    fn load_failed(&mut self, path: &Path, error: &StoreError) {
        self.notify(Notice::error(format!(
            "Could not load from '{}': {}",
            path.display(),
            error
        )));
    }
}

/// Decodifica o arquivo inteiro; ids repetidos mantêm o último registro
fn decode(content: &str) -> Result<(Vec<QuantumState>, Vec<String>), StoreError> {
    let records: Vec<StateRecord> = serde_json::from_str(content)?;

    let mut states: Vec<QuantumState> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut duplicates = Vec::new();

    for record in &records {
        let state = QuantumState::from_record(record)?;
        match positions.get(state.id()) {
            Some(&i) => {
                duplicates.push(state.id().to_string());
                states[i] = state;
            }
            None => {
                positions.insert(state.id().to_string(), states.len());
                states.push(state);
            }
        }
    }

    Ok((states, duplicates))
}

/// Escreve num arquivo temporário irmão, de nome único, e renomeia sobre `path`
fn write_replacing(path: &Path, records: &[StateRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Diretório de `path`; `.` para um nome de arquivo sem diretório
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
