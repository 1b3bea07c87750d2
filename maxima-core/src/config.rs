//! Configuração do container
//!
//! Pode ser montada em código, desserializada, ou carregada do ambiente
//! (`.env` ou variáveis de processo) com [`MaximaConfig::from_env`].

use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Variável com o limite de pontos
pub const ENV_MAX_POINTS: &str = "MAXIMA_MAX_POINTS";

/// Variável que liga a verificação pós-commit
pub const ENV_VERIFY_ON_COMMIT: &str = "MAXIMA_VERIFY_ON_COMMIT";

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Configuração de um `FunctionMaxima`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaximaConfig {
    /// Máximo de pontos no domínio (`None` = sem limite)
    pub max_points: Option<usize>,
    /// Recalcula os invariantes após cada commit (O(n), só para depuração)
    pub verify_on_commit: bool,
}

impl Default for MaximaConfig {
    fn default() -> Self {
        Self {
            max_points: None,
            verify_on_commit: false,
        }
    }
}

impl MaximaConfig {
    /// Cria configuração padrão
    pub fn new() -> Self {
        Self::default()
    }

    /// Define limite de pontos
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Liga ou desliga a verificação pós-commit
    pub fn with_verify_on_commit(mut self, verify: bool) -> Self {
        self.verify_on_commit = verify;
        self
    }

    /// Carrega do ambiente
    ///
    /// Valores ausentes ou inválidos ficam com o padrão.
    pub fn from_env() -> Self {
        ensure_loaded();
        let defaults = Self::default();

        let max_points = env::var(ENV_MAX_POINTS)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .or(defaults.max_points);

        let verify_on_commit = env::var(ENV_VERIFY_ON_COMMIT)
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.verify_on_commit);

        Self {
            max_points,
            verify_on_commit,
        }
    }

    /// Verifica se cabe mais um ponto num domínio com `len` pontos
    pub fn admits(&self, len: usize) -> bool {
        self.max_points.is_none_or(|max| len < max)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
