//! Ponto `(arg, value)` do gráfico da função

use serde::{Deserialize, Serialize};

/// Par imutável `(arg, value)`
///
/// Um ponto nunca é alterado depois de construído; sobrescrever o valor de
/// um argumento troca o ponto inteiro. A igualdade derivada é estrutural
/// (argumento e valor); os índices ordenam apenas pelas relações injetadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point<A, V> {
    arg: A,
    value: V,
}

impl<A, V> Point<A, V> {
    /// Cria novo ponto
    pub fn new(arg: A, value: V) -> Self {
        Self { arg, value }
    }

    /// Argumento
    #[inline]
    pub fn arg(&self) -> &A {
        &self.arg
    }

    /// Valor
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Par de referências
    pub fn as_pair(&self) -> (&A, &V) {
        (&self.arg, &self.value)
    }

    /// Desmonta o ponto
    pub fn into_pair(self) -> (A, V) {
        (self.arg, self.value)
    }
}

impl<A, V> From<(A, V)> for Point<A, V> {
    fn from((arg, value): (A, V)) -> Self {
        Self::new(arg, value)
    }
}
