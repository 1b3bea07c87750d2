//! Iteração e cursores sobre os índices

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::point::Point;
use crate::relation::SharedPoint;

/// Sequência ordenada de pontos
///
/// Usada tanto para o gráfico da função (argumento crescente) quanto para
/// os máximos (valor decrescente, argumento crescente).
pub struct Points<'a, A, V> {
    inner: slice::Iter<'a, SharedPoint<A, V>>,
}

impl<'a, A, V> Points<'a, A, V> {
    pub(crate) fn new(points: &'a [SharedPoint<A, V>]) -> Self {
        Self { inner: points.iter() }
    }
}

impl<A, V> Clone for Points<'_, A, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: fmt::Debug, V: fmt::Debug> fmt::Debug for Points<'_, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, A, V> Iterator for Points<'a, A, V> {
    type Item = &'a Point<A, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| &**p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|p| &**p)
    }
}

impl<A, V> DoubleEndedIterator for Points<'_, A, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|p| &**p)
    }
}

impl<A, V> ExactSizeIterator for Points<'_, A, V> {}

impl<A, V> FusedIterator for Points<'_, A, V> {}

/// Posição no gráfico da função, devolvida por `find`
pub struct Cursor<'a, A, V> {
    points: &'a [SharedPoint<A, V>],
    index: usize,
}

impl<'a, A, V> Cursor<'a, A, V> {
    pub(crate) fn new(points: &'a [SharedPoint<A, V>], index: usize) -> Self {
        debug_assert!(index < points.len());
        Self { points, index }
    }

    /// Ponto sob o cursor
    pub fn point(&self) -> &'a Point<A, V> {
        &self.points[self.index]
    }

    pub fn arg(&self) -> &'a A {
        self.point().arg()
    }

    pub fn value(&self) -> &'a V {
        self.point().value()
    }

    /// Posição na ordem dos argumentos
    pub fn index(&self) -> usize {
        self.index
    }

    /// Argumento imediatamente anterior
    pub fn prev(&self) -> Option<Self> {
        self.index.checked_sub(1).map(|index| Self::new(self.points, index))
    }

    /// Argumento imediatamente seguinte
    pub fn next(&self) -> Option<Self> {
        let index = self.index + 1;
        (index < self.points.len()).then(|| Self::new(self.points, index))
    }

    /// Percorre a função a partir do cursor (inclusive)
    pub fn iter_from(&self) -> Points<'a, A, V> {
        Points::new(&self.points[self.index..])
    }
}

impl<A, V> Clone for Cursor<'_, A, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, V> Copy for Cursor<'_, A, V> {}

impl<A: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("point", self.point())
            .finish()
    }
}
