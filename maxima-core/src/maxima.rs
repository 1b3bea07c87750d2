//! Container `FunctionMaxima`: gráfico da função e máximos locais
//!
//! Este módulo contém o estado e as consultas. As mutações transacionais
//! ficam em [`crate::updater`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classify::is_local_max;
use crate::config::MaximaConfig;
use crate::cursor::{Cursor, Points};
use crate::error::{MaximaError, MaximaResult};
use crate::order::{NaturalOrder, Order};
use crate::point::Point;
use crate::relation::PointIndex;

/// Função parcial `A -> V` com conjunto de máximos locais mantido
/// incrementalmente
///
/// - `CA` ordena os argumentos (chave do gráfico da função);
/// - `CV` ordena os valores (classificação e ordem dos máximos).
///
/// Ambas as ordens podem falhar; qualquer falha durante `set_value` ou
/// `erase` deixa o container exatamente como estava.
pub struct FunctionMaxima<A, V, CA = NaturalOrder, CV = NaturalOrder> {
    /// Pontos por argumento crescente
    pub(crate) function: PointIndex<A, V>,
    /// Máximos locais por valor decrescente, argumento crescente
    pub(crate) maxima: PointIndex<A, V>,
    pub(crate) arg_order: CA,
    pub(crate) value_order: CV,
    pub(crate) config: MaximaConfig,
}

impl<A, V> FunctionMaxima<A, V> {
    /// Cria função vazia com ordem natural
    pub fn new() -> Self {
        Self::with_orders(NaturalOrder, NaturalOrder)
    }
}

impl<A, V> Default for FunctionMaxima<A, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, V, CA, CV> FunctionMaxima<A, V, CA, CV> {
    /// Cria função vazia com ordens injetadas
    pub fn with_orders(arg_order: CA, value_order: CV) -> Self {
        Self {
            function: PointIndex::new(),
            maxima: PointIndex::new(),
            arg_order,
            value_order,
            config: MaximaConfig::default(),
        }
    }

    /// Substitui a configuração
    pub fn with_config(mut self, config: MaximaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MaximaConfig {
        &self.config
    }

    /// Número de pontos no domínio
    #[doc(alias = "len")]
    pub fn size(&self) -> usize {
        self.function.len()
    }

    pub fn is_empty(&self) -> bool {
        self.function.is_empty()
    }

    /// Pontos em ordem crescente de argumento
    #[doc(alias = "begin")]
    pub fn iter(&self) -> Points<'_, A, V> {
        Points::new(self.function.as_slice())
    }

    /// Máximos locais, do melhor para o pior
    ///
    /// Valor decrescente; empates por argumento crescente.
    #[doc(alias = "mx_begin")]
    pub fn maxima(&self) -> Points<'_, A, V> {
        Points::new(self.maxima.as_slice())
    }

    /// Número de máximos locais
    pub fn maxima_count(&self) -> usize {
        self.maxima.len()
    }
}

impl<A, V, CA, CV> FunctionMaxima<A, V, CA, CV>
where
    CA: Order<A>,
    CV: Order<V>,
{
    /// Constrói a partir de pares, na ordem dada
    ///
    /// Argumentos repetidos ficam com o último valor.
    pub fn from_points<I>(points: I, arg_order: CA, value_order: CV) -> MaximaResult<Self>
    where
        I: IntoIterator<Item = (A, V)>,
    {
        let mut function = Self::with_orders(arg_order, value_order);
        for (arg, value) in points {
            function.set_value(arg, value)?;
        }
        Ok(function)
    }

    /// Valor associado a `arg`
    pub fn value_at(&self, arg: &A) -> MaximaResult<&V> {
        match self.locate(arg)? {
            Ok(idx) => Ok(self.function.as_slice()[idx].value()),
            Err(_) => Err(MaximaError::NoSuchArgument),
        }
    }

    /// Verifica se `arg` está no domínio
    pub fn contains(&self, arg: &A) -> MaximaResult<bool> {
        Ok(self.locate(arg)?.is_ok())
    }

    /// Cursor para `arg`, ou `None`
    ///
    /// Nunca falha: se a comparação de argumentos falhar, o ponto é
    /// reportado como ausente.
    pub fn find(&self, arg: &A) -> Option<Cursor<'_, A, V>> {
        match self.locate(arg) {
            Ok(Ok(idx)) => Some(Cursor::new(self.function.as_slice(), idx)),
            Ok(Err(_)) => None,
            Err(err) => {
                tracing::debug!(error = %err, "find: comparison failed, reporting argument as absent");
                None
            }
        }
    }

    /// Recalcula os invariantes do zero (O(n))
    ///
    /// Verifica que os argumentos são únicos e crescentes, que os máximos
    /// estão ordenados, e que o conjunto de máximos é exatamente o conjunto
    /// de máximos locais do gráfico atual.
    pub fn check_invariants(&self) -> MaximaResult<()> {
        let points = self.function.as_slice();

        for (i, pair) in points.windows(2).enumerate() {
            if self.cmp_args(pair[0].arg(), pair[1].arg())? != Ordering::Less {
                return Err(MaximaError::InvariantViolation(format!(
                    "arguments at {} and {} are not strictly ascending",
                    i,
                    i + 1
                )));
            }
        }

        for (i, pair) in self.maxima.as_slice().windows(2).enumerate() {
            if self.cmp_maxima(&pair[0], &pair[1])? != Ordering::Less {
                return Err(MaximaError::InvariantViolation(format!(
                    "maxima at {} and {} are out of order",
                    i,
                    i + 1
                )));
            }
        }

        let mut expected = 0;
        for (i, point) in points.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| points[j].value());
            let next = points.get(i + 1).map(|p| p.value());
            let qualifies = is_local_max(&self.value_order, point.value(), prev, next)
                .map_err(MaximaError::comparison)?;

            let member = self.maxima_position(point)?.is_ok();
            if qualifies != member {
                return Err(MaximaError::InvariantViolation(format!(
                    "point at {} is {} but {} the maxima",
                    i,
                    if qualifies { "a local maximum" } else { "not a local maximum" },
                    if member { "is in" } else { "is missing from" }
                )));
            }
            if qualifies {
                expected += 1;
            }
        }

        if expected != self.maxima.len() {
            return Err(MaximaError::InvariantViolation(format!(
                "maxima hold {} points, expected {}",
                self.maxima.len(),
                expected
            )));
        }

        Ok(())
    }

    pub(crate) fn cmp_args(&self, a: &A, b: &A) -> MaximaResult<Ordering> {
        self.arg_order.compare(a, b).map_err(MaximaError::comparison)
    }

    /// Ordem dos máximos: valor decrescente, argumento crescente
    pub(crate) fn cmp_maxima(&self, p: &Point<A, V>, q: &Point<A, V>) -> MaximaResult<Ordering> {
        match self
            .value_order
            .compare(q.value(), p.value())
            .map_err(MaximaError::comparison)?
        {
            Ordering::Equal => self.cmp_args(p.arg(), q.arg()),
            other => Ok(other),
        }
    }

    /// Posição de `arg` no gráfico (`Ok`) ou posição de inserção (`Err`)
    pub(crate) fn locate(&self, arg: &A) -> MaximaResult<Result<usize, usize>> {
        self.function.search_by(|p| self.cmp_args(p.arg(), arg))
    }

    /// Posição de `point` nos máximos (`Ok`) ou posição de inserção (`Err`)
    pub(crate) fn maxima_position(&self, point: &Point<A, V>) -> MaximaResult<Result<usize, usize>> {
        self.maxima.search_by(|p| self.cmp_maxima(p, point))
    }
}

impl<A, V, CA: Clone, CV: Clone> Clone for FunctionMaxima<A, V, CA, CV> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            maxima: self.maxima.clone(),
            arg_order: self.arg_order.clone(),
            value_order: self.value_order.clone(),
            config: self.config.clone(),
        }
    }
}

impl<A: fmt::Debug, V: fmt::Debug, CA, CV> fmt::Debug for FunctionMaxima<A, V, CA, CV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionMaxima")
            .field("function", &self.iter())
            .field("maxima", &self.maxima())
            .field("config", &self.config)
            .finish()
    }
}

/// Igualdade observável: mesmo gráfico e mesmos máximos, na mesma ordem
impl<A: PartialEq, V: PartialEq, CA, CV> PartialEq for FunctionMaxima<A, V, CA, CV> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter()) && self.maxima().eq(other.maxima())
    }
}

impl<A: Eq, V: Eq, CA, CV> Eq for FunctionMaxima<A, V, CA, CV> {}

impl<'a, A, V, CA, CV> IntoIterator for &'a FunctionMaxima<A, V, CA, CV> {
    type Item = &'a Point<A, V>;
    type IntoIter = Points<'a, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializa só o gráfico; os máximos são derivados
impl<A: Serialize, V: Serialize, CA, CV> Serialize for FunctionMaxima<A, V, CA, CV> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, A, V> Deserialize<'de> for FunctionMaxima<A, V>
where
    A: Deserialize<'de> + Ord,
    V: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<Point<A, V>>::deserialize(deserializer)?;
        Self::from_points(points.into_iter().map(Point::into_pair), NaturalOrder, NaturalOrder)
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}
