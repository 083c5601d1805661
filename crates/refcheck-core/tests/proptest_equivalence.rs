use proptest::prelude::*;
use refcheck_core::check;
use refcheck_core::{ConstraintEntry, ConstraintSet, Function, IdenticalFunctionSet};

fn square(x: &i64) -> i64 {
    x.pow(2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn identical_square_holds_for_all_inputs(x in -3_000_000_000_i64..3_000_000_000) {
        let candidates: Vec<Function<'_, i64, i64>> = vec![Box::new(|x: &i64| x * x)];
        let set = IdenticalFunctionSet::new(square, candidates);
        prop_assert!(set.assert_constraints(&x).is_ok());
        prop_assert_eq!(set.call(&x), Ok(square(&x)));
    }

    #[test]
    fn differing_candidate_is_always_caught(x in -1_000_i64..1_000, delta in 1_i64..100) {
        let set = ConstraintSet::new(
            square,
            vec![ConstraintEntry::new(move |x: &i64| x * x + delta, check::equal())],
        );
        let err = set.call(&x).expect_err("outputs differ by delta");
        prop_assert_eq!(err.index(), 0);
    }

    #[test]
    fn strict_ordering_tracks_sign_of_delta(x in -1_000_i64..1_000, delta in -50_i64..50) {
        let set = ConstraintSet::new(
            square,
            vec![ConstraintEntry::new(move |x: &i64| x * x + delta, check::less_than())],
        );
        prop_assert_eq!(set.assert_constraints(&x).is_ok(), delta > 0);
    }

    #[test]
    fn sorting_variants_agree(mut values in proptest::collection::vec(any::<i16>(), 0..64)) {
        let candidates: Vec<Function<'_, [i16], Vec<i16>>> = vec![
            Box::new(|v: &[i16]| {
                let heap: std::collections::BinaryHeap<i16> = v.iter().copied().collect();
                heap.into_sorted_vec()
            }),
            Box::new(|v: &[i16]| {
                let mut out: Vec<i16> = Vec::with_capacity(v.len());
                for &item in v {
                    let at = out.partition_point(|probe: &i16| *probe <= item);
                    out.insert(at, item);
                }
                out
            }),
        ];
        let set = IdenticalFunctionSet::new(
            |v: &[i16]| {
                let mut out = v.to_vec();
                out.sort_unstable();
                out
            },
            candidates,
        );
        let sorted = set.call(&values).expect("all sorts agree");
        values.sort_unstable();
        prop_assert_eq!(sorted, values);
    }
}
