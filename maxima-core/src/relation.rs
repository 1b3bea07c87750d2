//! Índices ordenados de pontos
//!
//! Cada relação é um vetor ordenado de `Arc<Point>`. A mesma instância de
//! ponto é partilhada pelo índice da função (por argumento) e pelo índice de
//! máximos (valor decrescente, argumento crescente); não há ponteiros entre
//! os índices, só buscas por chave.
//!
//! A ordem é sempre fornecida por quem chama, como uma closure falível que
//! compara o elemento do índice com o alvo. Buscas nunca alteram o índice;
//! as mutações (`insert`, `replace`, `remove`) são infalíveis desde que a
//! capacidade tenha sido reservada antes com [`PointIndex::try_reserve`].

use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::sync::Arc;

use crate::point::Point;

/// Ponto partilhado entre os dois índices
pub(crate) type SharedPoint<A, V> = Arc<Point<A, V>>;

/// Busca binária com comparador falível
///
/// Mesma semântica de `slice::binary_search_by`: `Ok(i)` se encontrou,
/// `Err(i)` com a posição de inserção caso contrário.
pub(crate) fn try_binary_search_by<T, E, F>(items: &[T], mut cmp: F) -> Result<Result<usize, usize>, E>
where
    F: FnMut(&T) -> Result<Ordering, E>,
{
    let mut lo = 0;
    let mut hi = items.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp(&items[mid])? {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return Ok(Ok(mid)),
        }
    }

    Ok(Err(lo))
}

/// Índice ordenado de pontos
#[derive(Debug)]
pub(crate) struct PointIndex<A, V> {
    points: Vec<SharedPoint<A, V>>,
}

impl<A, V> PointIndex<A, V> {
    /// Cria índice vazio
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Número de pontos
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ponto na posição `idx`
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&SharedPoint<A, V>> {
        self.points.get(idx)
    }

    /// Vizinho anterior de `idx` (ou da posição de inserção `idx`)
    #[inline]
    pub fn before(&self, idx: usize) -> Option<&SharedPoint<A, V>> {
        idx.checked_sub(1).and_then(|i| self.points.get(i))
    }

    pub fn as_slice(&self) -> &[SharedPoint<A, V>] {
        &self.points
    }

    /// Busca com comparador `elemento vs alvo`
    pub fn search_by<E, F>(&self, mut cmp: F) -> Result<Result<usize, usize>, E>
    where
        F: FnMut(&Point<A, V>) -> Result<Ordering, E>,
    {
        try_binary_search_by(&self.points, |p| cmp(&**p))
    }

    /// Reserva espaço para `additional` inserções
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.points.try_reserve(additional)
    }

    pub fn insert(&mut self, pos: usize, point: SharedPoint<A, V>) {
        self.points.insert(pos, point);
    }

    /// Troca o ponto em `idx`, devolvendo o anterior
    pub fn replace(&mut self, idx: usize, point: SharedPoint<A, V>) -> SharedPoint<A, V> {
        std::mem::replace(&mut self.points[idx], point)
    }

    pub fn remove(&mut self, idx: usize) -> SharedPoint<A, V> {
        self.points.remove(idx)
    }
}

impl<A, V> Clone for PointIndex<A, V> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
        }
    }
}

impl<A, V> Default for PointIndex<A, V> {
    fn default() -> Self {
        Self::new()
    }
}
