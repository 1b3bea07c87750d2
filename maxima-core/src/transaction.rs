//! Transação: delta preparado e aplicado de uma vez
//!
//! Toda mutação é feita em duas fases:
//!
//! 1. **Preparação** (falível): buscas, classificação, ordenação das
//!    edições, verificação de limite e reserva de memória. O estado não é
//!    tocado; um erro aqui descarta o delta.
//! 2. **Commit** (infalível): as edições são aplicadas aos dois índices.
//!
//! As posições das edições são sempre relativas ao índice *antes* do commit.
//! Aplicando-as da maior para a menor posição, nenhuma edição desloca a
//! posição de uma edição ainda pendente.

use std::cmp::Ordering;

use crate::error::MaximaResult;
use crate::point::Point;
use crate::relation::{PointIndex, SharedPoint};

/// Edição do índice da função
#[derive(Debug)]
pub(crate) enum FunctionEdit<A, V> {
    /// Novo argumento na posição de inserção
    Insert(usize, SharedPoint<A, V>),
    /// Novo valor para um argumento existente
    Replace(usize, SharedPoint<A, V>),
    /// Remove o argumento
    Remove(usize),
}

/// Edição do índice de máximos
#[derive(Debug)]
pub(crate) enum MaximaEdit<A, V> {
    Insert(usize, SharedPoint<A, V>),
    Remove(usize),
}

impl<A, V> MaximaEdit<A, V> {
    fn position(&self) -> usize {
        match self {
            MaximaEdit::Insert(pos, _) => *pos,
            MaximaEdit::Remove(idx) => *idx,
        }
    }
}

/// Delta de uma mutação
#[derive(Debug)]
pub(crate) struct Transaction<A, V> {
    function: Option<FunctionEdit<A, V>>,
    maxima: Vec<MaximaEdit<A, V>>,
}

impl<A, V> Transaction<A, V> {
    /// Cria transação com a edição da função
    pub fn new(function: FunctionEdit<A, V>) -> Self {
        Self {
            function: Some(function),
            maxima: Vec::with_capacity(4),
        }
    }

    /// Adiciona edição de máximos
    pub fn stage(&mut self, edit: MaximaEdit<A, V>) {
        self.maxima.push(edit);
    }

    /// Verifica se a transação insere um argumento novo
    pub fn grows_domain(&self) -> bool {
        matches!(self.function, Some(FunctionEdit::Insert(..)))
    }

    /// Número de edições de máximos
    pub fn maxima_edits(&self) -> usize {
        self.maxima.len()
    }

    fn maxima_insertions(&self) -> usize {
        self.maxima
            .iter()
            .filter(|e| matches!(e, MaximaEdit::Insert(..)))
            .count()
    }

    /// Ordena as edições de máximos para o commit
    ///
    /// Ordem crescente por posição; na mesma posição, inserções antes da
    /// remoção, e inserções entre si pela ordem dos máximos (`cmp`). Só
    /// inserções na mesma posição chegam a chamar `cmp`.
    pub fn prepare<F>(&mut self, mut cmp: F) -> MaximaResult<()>
    where
        F: FnMut(&Point<A, V>, &Point<A, V>) -> MaximaResult<Ordering>,
    {
        // No máximo cinco edições: insertion sort com comparador falível
        for i in 1..self.maxima.len() {
            let mut j = i;
            while j > 0 && edit_order(&self.maxima[j - 1], &self.maxima[j], &mut cmp)? == Ordering::Greater {
                self.maxima.swap(j - 1, j);
                j -= 1;
            }
        }
        Ok(())
    }

    /// Reserva a memória que o commit vai precisar
    pub fn reserve(&self, function: &mut PointIndex<A, V>, maxima: &mut PointIndex<A, V>) -> MaximaResult<()> {
        if self.grows_domain() {
            function.try_reserve(1)?;
        }
        maxima.try_reserve(self.maxima_insertions())?;
        Ok(())
    }

    /// Aplica o delta aos dois índices
    pub fn commit(self, function: &mut PointIndex<A, V>, maxima: &mut PointIndex<A, V>) {
        match self.function {
            Some(FunctionEdit::Insert(pos, point)) => function.insert(pos, point),
            Some(FunctionEdit::Replace(idx, point)) => {
                function.replace(idx, point);
            }
            Some(FunctionEdit::Remove(idx)) => {
                function.remove(idx);
            }
            None => {}
        }

        for edit in self.maxima.into_iter().rev() {
            match edit {
                MaximaEdit::Insert(pos, point) => maxima.insert(pos, point),
                MaximaEdit::Remove(idx) => {
                    maxima.remove(idx);
                }
            }
        }
    }
}

fn edit_order<A, V, F>(a: &MaximaEdit<A, V>, b: &MaximaEdit<A, V>, cmp: &mut F) -> MaximaResult<Ordering>
where
    F: FnMut(&Point<A, V>, &Point<A, V>) -> MaximaResult<Ordering>,
{
    match a.position().cmp(&b.position()) {
        Ordering::Equal => match (a, b) {
            (MaximaEdit::Insert(_, p), MaximaEdit::Insert(_, q)) => cmp(p, q),
            (MaximaEdit::Insert(..), MaximaEdit::Remove(_)) => Ok(Ordering::Less),
            (MaximaEdit::Remove(_), MaximaEdit::Insert(..)) => Ok(Ordering::Greater),
            (MaximaEdit::Remove(_), MaximaEdit::Remove(_)) => Ok(Ordering::Equal),
        },
        other => Ok(other),
    }
}
