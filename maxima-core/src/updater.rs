//! Atualizações transacionais: `set_value` e `erase`
//!
//! Cada mutação prepara um [`Transaction`] lendo o estado atual (buscas e
//! reclassificação dos até três pontos afetados), ordena as edições, checa
//! o limite de pontos e reserva memória. Só então o delta é aplicado, com
//! operações que não falham. Uma falha em qualquer passo de preparação
//! descarta o delta: o estado observável nunca muda parcialmente.

use std::sync::Arc;

use crate::classify::is_local_max;
use crate::error::{MaximaError, MaximaResult};
use crate::maxima::FunctionMaxima;
use crate::order::Order;
use crate::point::Point;
use crate::relation::SharedPoint;
use crate::transaction::{FunctionEdit, MaximaEdit, Transaction};

impl<A, V, CA, CV> FunctionMaxima<A, V, CA, CV>
where
    CA: Order<A>,
    CV: Order<V>,
{
    /// Define `f(arg) = value`, inserindo ou sobrescrevendo
    ///
    /// Em caso de erro o container fica exatamente como antes da chamada.
    pub fn set_value(&mut self, arg: A, value: V) -> MaximaResult<()> {
        let staged = self.stage_set_value(arg, value).map(Some);
        self.run("set_value", staged)
    }

    /// Remove `arg` do domínio; no-op se ausente
    ///
    /// Em caso de erro o container fica exatamente como antes da chamada.
    pub fn erase(&mut self, arg: &A) -> MaximaResult<()> {
        let staged = self.stage_erase(arg);
        self.run("erase", staged)
    }

    fn stage_set_value(&self, arg: A, value: V) -> MaximaResult<Transaction<A, V>> {
        let located = self.locate(&arg)?;
        let point: SharedPoint<A, V> = Arc::new(Point::new(arg, value));

        // Vizinhos após a mutação, em posições do gráfico atual
        let (mut tx, old, prev_idx, next_idx) = match located {
            Ok(idx) => (
                Transaction::new(FunctionEdit::Replace(idx, Arc::clone(&point))),
                self.function.get(idx),
                idx.checked_sub(1),
                idx + 1,
            ),
            Err(pos) => (
                Transaction::new(FunctionEdit::Insert(pos, Arc::clone(&point))),
                None,
                pos.checked_sub(1),
                pos,
            ),
        };
        let prev = prev_idx.and_then(|i| self.function.get(i));
        let next = self.function.get(next_idx);

        if let Some(old) = old {
            if let Ok(idx) = self.maxima_position(old)? {
                tx.stage(MaximaEdit::Remove(idx));
            }
        }

        if self.classify(&point, prev, next)? {
            let (Ok(pos) | Err(pos)) = self.maxima_position(&point)?;
            tx.stage(MaximaEdit::Insert(pos, Arc::clone(&point)));
        }

        if let (Some(prev), Some(idx)) = (prev, prev_idx) {
            self.reclassify(&mut tx, prev, self.function.before(idx), Some(&point))?;
        }
        if let Some(next) = next {
            self.reclassify(&mut tx, next, Some(&point), self.function.get(next_idx + 1))?;
        }

        self.seal(tx)
    }

    fn stage_erase(&self, arg: &A) -> MaximaResult<Option<Transaction<A, V>>> {
        let idx = match self.locate(arg)? {
            Ok(idx) => idx,
            Err(_) => return Ok(None),
        };
        let points = self.function.as_slice();
        let mut tx = Transaction::new(FunctionEdit::Remove(idx));

        if let Ok(pos) = self.maxima_position(&points[idx])? {
            tx.stage(MaximaEdit::Remove(pos));
        }

        // prev e next passam a ser vizinhos um do outro
        let prev = self.function.before(idx);
        let next = self.function.get(idx + 1);
        if let Some(prev) = prev {
            self.reclassify(&mut tx, prev, self.function.before(idx - 1), next)?;
        }
        if let Some(next) = next {
            self.reclassify(&mut tx, next, prev, self.function.get(idx + 2))?;
        }

        self.seal(tx).map(Some)
    }

    fn classify(
        &self,
        point: &Point<A, V>,
        prev: Option<&SharedPoint<A, V>>,
        next: Option<&SharedPoint<A, V>>,
    ) -> MaximaResult<bool> {
        is_local_max(
            &self.value_order,
            point.value(),
            prev.map(|p| p.value()),
            next.map(|p| p.value()),
        )
        .map_err(MaximaError::comparison)
    }

    /// Reclassifica um vizinho e agenda a mudança de pertença, se houver
    fn reclassify(
        &self,
        tx: &mut Transaction<A, V>,
        point: &SharedPoint<A, V>,
        prev: Option<&SharedPoint<A, V>>,
        next: Option<&SharedPoint<A, V>>,
    ) -> MaximaResult<()> {
        let qualifies = self.classify(point, prev, next)?;
        match (self.maxima_position(point)?, qualifies) {
            (Ok(idx), false) => tx.stage(MaximaEdit::Remove(idx)),
            (Err(pos), true) => tx.stage(MaximaEdit::Insert(pos, Arc::clone(point))),
            _ => {}
        }
        Ok(())
    }

    /// Ordena as edições de máximos e checa o limite de pontos
    fn seal(&self, mut tx: Transaction<A, V>) -> MaximaResult<Transaction<A, V>> {
        tx.prepare(|p, q| self.cmp_maxima(p, q))?;

        let len = self.function.len();
        if tx.grows_domain() && !self.config.admits(len) {
            return Err(MaximaError::LimitReached(len));
        }

        Ok(tx)
    }

    fn run(&mut self, op: &'static str, staged: MaximaResult<Option<Transaction<A, V>>>) -> MaximaResult<()> {
        let reserved = staged.and_then(|tx| match tx {
            Some(tx) => tx.reserve(&mut self.function, &mut self.maxima).map(|()| Some(tx)),
            None => Ok(None),
        });

        let tx = match reserved {
            Ok(Some(tx)) => tx,
            Ok(None) => return Ok(()),
            Err(err) => {
                tracing::debug!(op, error = %err, "transaction aborted, state unchanged");
                return Err(err);
            }
        };

        let maxima_edits = tx.maxima_edits();
        tx.commit(&mut self.function, &mut self.maxima);
        tracing::trace!(
            op,
            maxima_edits,
            size = self.function.len(),
            maxima = self.maxima.len(),
            "transaction committed"
        );

        if self.config.verify_on_commit {
            if let Err(err) = self.check_invariants() {
                tracing::error!(op, error = %err, "invariant check failed after commit");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaximaConfig;

    fn maxima_of(function: &FunctionMaxima<i32, i32>) -> Vec<(i32, i32)> {
        function.maxima().map(|p| (*p.arg(), *p.value())).collect()
    }

    #[test]
    fn test_first_point_is_max() {
        let mut function = FunctionMaxima::new();
        function.set_value(1, 10).unwrap();
        assert_eq!(maxima_of(&function), vec![(1, 10)]);
    }

    #[test]
    fn test_overwrite_same_value() {
        let mut function = FunctionMaxima::new();
        function.set_value(1, 10).unwrap();
        function.set_value(2, 20).unwrap();
        function.set_value(2, 20).unwrap();
        assert_eq!(function.size(), 2);
        assert_eq!(maxima_of(&function), vec![(2, 20)]);
        function.check_invariants().unwrap();
    }

    #[test]
    fn test_lowering_peak_promotes_neighbours() {
        let mut function = FunctionMaxima::new();
        for (a, v) in [(1, 10), (2, 20), (3, 10)] {
            function.set_value(a, v).unwrap();
        }
        function.set_value(2, 0).unwrap();
        assert_eq!(maxima_of(&function), vec![(1, 10), (3, 10)]);
        function.check_invariants().unwrap();
    }

    #[test]
    fn test_erase_demotes_neighbour() {
        // 5 só era máximo porque o vizinho 1 era menor
        let mut function = FunctionMaxima::new();
        for (a, v) in [(1, 5), (2, 1), (3, 9)] {
            function.set_value(a, v).unwrap();
        }
        assert_eq!(maxima_of(&function), vec![(3, 9), (1, 5)]);

        function.erase(&2).unwrap();
        assert_eq!(maxima_of(&function), vec![(3, 9)]);
        function.check_invariants().unwrap();
    }

    #[test]
    fn test_erase_last_point() {
        let mut function = FunctionMaxima::new();
        function.set_value(1, 1).unwrap();
        function.erase(&1).unwrap();
        assert!(function.is_empty());
        assert_eq!(function.maxima_count(), 0);
    }

    #[test]
    fn test_limit_blocks_insert_not_overwrite() {
        let mut function = FunctionMaxima::new().with_config(MaximaConfig::new().with_max_points(2));
        function.set_value(1, 1).unwrap();
        function.set_value(2, 2).unwrap();

        let err = function.set_value(3, 3).unwrap_err();
        assert!(matches!(err, MaximaError::LimitReached(2)));
        assert_eq!(function.size(), 2);

        function.set_value(2, 7).unwrap();
        assert_eq!(*function.value_at(&2).unwrap(), 7);
    }

    #[test]
    fn test_verify_on_commit_keeps_working() {
        let mut function = FunctionMaxima::new().with_config(MaximaConfig::new().with_verify_on_commit(true));
        for a in 0..20 {
            function.set_value(a, (a * 7) % 5).unwrap();
        }
        for a in (0..20).step_by(3) {
            function.erase(&a).unwrap();
        }
        function.check_invariants().unwrap();
    }
}
