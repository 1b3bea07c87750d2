//! Tipos de erro para maxima-core

use std::collections::TryReserveError;
use thiserror::Error;

/// Erro opaco vindo de uma relação de ordem fornecida pelo chamador
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resultado customizado para operações sobre a função
pub type MaximaResult<T> = Result<T, MaximaError>;

/// Erros que podem ocorrer em consultas e mutações
#[derive(Debug, Error)]
pub enum MaximaError {
    /// Argumento fora do domínio
    #[error("invalid argument value")]
    NoSuchArgument,

    /// Falha na comparação de argumentos ou valores
    #[error("Comparison failed: {0}")]
    ComparisonFailure(#[source] BoxError),

    /// Falha ao reservar memória para a transação
    #[error("Allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Limite de pontos configurado atingido
    #[error("Point limit reached: {0}")]
    LimitReached(usize),

    /// Invariante quebrado (apenas `check_invariants`)
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl MaximaError {
    /// Envolve a falha de uma comparação
    pub fn comparison<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        MaximaError::ComparisonFailure(err.into())
    }

    /// Verifica se é `NoSuchArgument`
    pub fn is_no_such_argument(&self) -> bool {
        matches!(self, MaximaError::NoSuchArgument)
    }
}
