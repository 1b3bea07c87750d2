//! Property-based tests for the maxima container.
//!
//! Every sequence of `set_value`/`erase` is replayed against a naive model
//! (a `BTreeMap` whose maxima are recomputed from scratch) and the two must
//! agree after each step.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;

use maxima_core::{FunctionMaxima, MaximaError, Order};

#[derive(Debug, Clone)]
enum Op {
    Set(i8, i8),
    Erase(i8),
}

fn op() -> impl Strategy<Value = Op> {
    // Few distinct values so plateaus are common
    prop_oneof![
        3 => (0i8..24, 0i8..4).prop_map(|(a, v)| Op::Set(a, v)),
        1 => (0i8..24).prop_map(Op::Erase),
    ]
}

fn model_maxima(model: &BTreeMap<i8, i8>) -> Vec<(i8, i8)> {
    let points: Vec<(i8, i8)> = model.iter().map(|(a, v)| (*a, *v)).collect();
    let mut maxima: Vec<(i8, i8)> = points
        .iter()
        .enumerate()
        .filter(|(i, (_, v))| {
            let prev_ok = i.checked_sub(1).is_none_or(|j| points[j].1 <= *v);
            let next_ok = points.get(i + 1).is_none_or(|p| p.1 <= *v);
            prev_ok && next_ok
        })
        .map(|(_, p)| *p)
        .collect();
    maxima.sort_by(|x, y| y.1.cmp(&x.1).then(x.0.cmp(&y.0)));
    maxima
}

fn graph<CA, CV>(function: &FunctionMaxima<i8, i8, CA, CV>) -> Vec<(i8, i8)> {
    function.iter().map(|p| (*p.arg(), *p.value())).collect()
}

fn maxima<CA, CV>(function: &FunctionMaxima<i8, i8, CA, CV>) -> Vec<(i8, i8)> {
    function.maxima().map(|p| (*p.arg(), *p.value())).collect()
}

#[derive(Debug, thiserror::Error)]
#[error("injected comparison failure")]
struct Injected;

#[derive(Clone, Default)]
struct Budget(Rc<Cell<Option<usize>>>);

impl Order<i8> for Budget {
    type Error = Injected;

    fn compare(&self, a: &i8, b: &i8) -> Result<Ordering, Injected> {
        match self.0.get() {
            Some(0) => Err(Injected),
            Some(n) => {
                self.0.set(Some(n - 1));
                Ok(a.cmp(b))
            }
            None => Ok(a.cmp(b)),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn matches_naive_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut function = FunctionMaxima::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(a, v) => {
                    function.set_value(a, v).unwrap();
                    model.insert(a, v);
                }
                Op::Erase(a) => {
                    function.erase(&a).unwrap();
                    model.remove(&a);
                }
            }

            let expected: Vec<(i8, i8)> = model.iter().map(|(a, v)| (*a, *v)).collect();
            prop_assert_eq!(graph(&function), expected);
            prop_assert_eq!(maxima(&function), model_maxima(&model));
            prop_assert_eq!(function.size(), model.len());
        }

        prop_assert!(function.check_invariants().is_ok());
    }

    #[test]
    fn maxima_enumerated_best_first(points in prop::collection::vec((0i8..32, 0i8..6), 0..48)) {
        let mut function = FunctionMaxima::new();
        for (a, v) in points {
            function.set_value(a, v).unwrap();
        }

        let best = maxima(&function);
        for pair in best.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
            if pair[0].1 == pair[1].1 {
                prop_assert!(pair[0].0 < pair[1].0);
            }
        }
    }

    #[test]
    fn erase_of_absent_changes_nothing(
        points in prop::collection::vec((0i8..16, 0i8..4), 0..24),
        absent in 16i8..32,
    ) {
        let mut function = FunctionMaxima::new();
        for (a, v) in points {
            function.set_value(a, v).unwrap();
        }
        let before = function.clone();

        prop_assert!(function.erase(&absent).is_ok());
        prop_assert_eq!(function, before);
    }

    #[test]
    fn failed_mutation_leaves_state_untouched(
        points in prop::collection::vec((0i8..16, 0i8..4), 0..24),
        op in op(),
        limit in 0usize..12,
    ) {
        let budget = Budget::default();
        let mut function = FunctionMaxima::with_orders(budget.clone(), budget.clone());
        for (a, v) in points {
            function.set_value(a, v).unwrap();
        }
        let before = (graph(&function), maxima(&function));

        budget.0.set(Some(limit));
        let result = match op {
            Op::Set(a, v) => function.set_value(a, v),
            Op::Erase(a) => function.erase(&a),
        };
        budget.0.set(None);

        match result {
            Ok(()) => prop_assert!(function.check_invariants().is_ok()),
            Err(MaximaError::ComparisonFailure(_)) => {
                prop_assert_eq!((graph(&function), maxima(&function)), before);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
