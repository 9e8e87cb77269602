use algo_trace::problems::sorting::{is_sorted, SortKind, SortStepKind, Sorter};
use algo_trace::Executor;
use proptest::prelude::*;

fn sort_with(kind: SortKind, input: Vec<i64>) -> Vec<i64> {
    Executor::new(Sorter::new(kind, input).unwrap()).run().sorted
}

#[test]
fn every_kind_sorts_the_reference_array() {
    for kind in SortKind::ALL {
        assert_eq!(sort_with(kind, vec![5, 3, 8, 1]), vec![1, 3, 5, 8], "{}", kind.name());
    }
}

#[test]
fn empty_and_single_inputs() {
    for kind in SortKind::ALL {
        assert!(sort_with(kind, vec![]).is_empty());
        let (outcome, trace) = Executor::new(Sorter::new(kind, vec![42]).unwrap()).run_traced();
        assert_eq!(outcome.sorted, vec![42]);
        assert_eq!(outcome.comparisons, 0);
        assert!(trace.iter().all(|s| s.kind != SortStepKind::Compare), "{}", kind.name());
    }
}

#[test]
fn final_step_shows_sorted_array() {
    for kind in SortKind::ALL {
        let sorter = Sorter::new(kind, vec![9, -2, 7, 7, 0]).unwrap();
        let (outcome, trace) = Executor::new(sorter).run_traced();
        let last = trace.steps().last().unwrap();
        assert_eq!(last.kind, SortStepKind::Done);
        assert_eq!(last.array, outcome.sorted);
    }
}

#[test]
fn counts_match_between_silent_and_traced() {
    let input = vec![4, 1, 3, 9, 7, 1, 0];
    for kind in SortKind::ALL {
        let engine = Executor::new(Sorter::new(kind, input.clone()).unwrap());
        let (traced, _) = engine.run_traced();
        assert_eq!(engine.run(), traced);
    }
}

proptest! {
    #[test]
    fn sorts_are_sorted_permutations(input in prop::collection::vec(-500i64..500, 0..40)) {
        let mut expected = input.clone();
        expected.sort();
        for kind in SortKind::ALL {
            let sorted = sort_with(kind, input.clone());
            prop_assert!(is_sorted(&sorted));
            prop_assert_eq!(&sorted, &expected, "{}", kind.name());
        }
    }

    #[test]
    fn radix_handles_extreme_values(input in prop::collection::vec(any::<i64>(), 0..20)) {
        let mut expected = input.clone();
        expected.sort();
        prop_assert_eq!(sort_with(SortKind::Radix, input), expected);
    }
}
