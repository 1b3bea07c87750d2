//! Relações de ordem injetáveis
//!
//! O container nunca assume que comparar dois argumentos ou dois valores é
//! infalível. A ordem é uma capacidade injetada: [`Order::compare`] devolve
//! `Result`, e qualquer erro aborta a transação em curso sem tocar no estado.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Ordem total estrita que pode falhar
pub trait Order<T: ?Sized> {
    /// Erro devolvido por uma comparação falha
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compara `a` com `b`
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, Self::Error>;

    /// `a < b`
    fn less(&self, a: &T, b: &T) -> Result<bool, Self::Error> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }
}

/// Ordem natural de tipos `Ord` (nunca falha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Order<T> for NaturalOrder {
    type Error = Infallible;

    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, Infallible> {
        Ok(a.cmp(b))
    }
}

/// Ordem definida por closure
///
/// ```
/// use maxima_core::{FnOrder, Order};
/// use std::convert::Infallible;
///
/// let reversed = FnOrder::new(|a: &i32, b: &i32| Ok::<_, Infallible>(b.cmp(a)));
/// assert!(reversed.less(&2, &1).unwrap());
/// ```
pub struct FnOrder<F, E> {
    compare: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> FnOrder<F, E> {
    /// Cria ordem a partir de uma função de comparação
    pub fn new(compare: F) -> Self {
        Self {
            compare,
            _error: PhantomData,
        }
    }
}

impl<F: Clone, E> Clone for FnOrder<F, E> {
    fn clone(&self) -> Self {
        Self::new(self.compare.clone())
    }
}

impl<F, E> fmt::Debug for FnOrder<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOrder").finish_non_exhaustive()
    }
}

impl<T, F, E> Order<T> for FnOrder<F, E>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Result<Ordering, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, E> {
        (self.compare)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("nan is unordered")]
    struct Unordered;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2).unwrap(), Ordering::Less);
        assert!(NaturalOrder.less("a", "b").unwrap());
        assert!(!NaturalOrder.less(&3, &3).unwrap());
    }

    #[test]
    fn test_fn_order_can_fail() {
        let order = FnOrder::new(|a: &f64, b: &f64| a.partial_cmp(b).ok_or(Unordered));
        assert!(order.less(&1.0, &2.0).unwrap());
        assert!(order.compare(&f64::NAN, &1.0).is_err());
    }
}
