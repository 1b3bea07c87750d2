//! Classificação de máximos locais
//!
//! Um ponto é máximo local se nenhum vizinho imediato (na ordem dos
//! argumentos) tiver valor estritamente maior. Pontos na fronteira do
//! domínio comparam só com o vizinho que existe; platôs inteiros qualificam.
//!
//! Alterar um único ponto só pode mudar a classificação dele próprio e dos
//! dois vizinhos, por isso cada mutação reclassifica no máximo três pontos.

use crate::order::Order;

/// Decide se `value` é máximo local entre `prev` e `next`
pub fn is_local_max<V, O>(order: &O, value: &V, prev: Option<&V>, next: Option<&V>) -> Result<bool, O::Error>
where
    V: ?Sized,
    O: Order<V> + ?Sized,
{
    if let Some(prev) = prev {
        if order.less(value, prev)? {
            return Ok(false);
        }
    }

    if let Some(next) = next {
        if order.less(value, next)? {
            return Ok(false);
        }
    }

    Ok(true)
}
