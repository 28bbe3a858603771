use pagesort::prelude::*;
use pagesort::{Error, FnComparer, PaginatorState, Reverse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

#[test]
fn test_full_page() {
    let mut input = vec![5, 3, 1, 4, 2];
    let mut paginator = Paginator::direct(&mut input);
    assert_eq!(paginator.get_page(0, 5).unwrap(), &[1, 2, 3, 4, 5]);
}

#[test]
fn test_middle_page_fresh_instance() {
    let mut input = vec![5, 3, 1, 4, 2];
    let mut paginator = Paginator::direct(&mut input);
    assert_eq!(paginator.get_page(2, 2).unwrap(), &[3, 4]);
}

#[test]
fn test_sequential_pages() {
    let mut input = vec![5, 3, 1, 4, 2];
    let mut paginator = Paginator::direct(&mut input);
    assert_eq!(paginator.get_page(0, 2).unwrap(), &[1, 2]);
    assert_eq!(paginator.get_page(3, 2).unwrap(), &[4, 5]);
}

#[test]
fn test_stable_pairs() {
    let mut input = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
    let mut paginator = Paginator::stable_by(&mut input, |x: &(i32, char), y: &(i32, char)| {
        x.0.cmp(&y.0)
    });
    assert_eq!(
        paginator.get_page(0, 4).unwrap(),
        &[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]
    );
}

#[test]
fn test_stable_large_chunks() {
    // Two chunks of 50 with the larger key first: a stable sort swaps the chunks but keeps
    // each chunk's internal order.
    let chunk1 = (1..=50).map(|i| (1, i));
    let chunk2 = (1..=50).map(|i| (0, i));
    let input: Vec<(i32, i32)> = chunk1.clone().chain(chunk2.clone()).collect();
    let expected: Vec<(i32, i32)> = chunk2.chain(chunk1).collect();

    let mut paginator = Paginator::stable_by_key(input, |x: &(i32, i32)| x.0);
    assert_eq!(paginator.get_page(0, 100).unwrap(), expected.as_slice());

    // Page by page on a fresh instance gives the same answer as a stable std sort.
    let mut rng = StdRng::seed_from_u64(17);
    let input: Vec<(i32, i32)> = (0..100).map(|i| (rng.random_range(0..4), i)).collect();
    let mut reference = input.clone();
    reference.sort_by_key(|x| x.0);
    let mut paginator = Paginator::stable_by_key(input, |x: &(i32, i32)| x.0);
    for offset in (0..100).step_by(10) {
        assert_eq!(
            paginator.get_page(offset, 10).unwrap(),
            &reference[offset..offset + 10]
        );
    }
}

#[test]
fn test_stable_natural_order() {
    #[derive(Clone, Debug, PartialEq)]
    struct PartialKey {
        key: i32,
        tag: i32,
    }
    impl PartialOrd for PartialKey {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    let input: Vec<PartialKey> = (0..60)
        .map(|i| PartialKey {
            key: i % 3,
            tag: i,
        })
        .collect();
    let mut expected = input.clone();
    expected.sort_by(|a, b| a.key.cmp(&b.key));

    let mut paginator = Paginator::stable(input);
    assert_eq!(paginator.get_page(0, 60).unwrap(), expected.as_slice());
}

#[test]
fn test_random_windows_match_full_sort() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let input: Vec<u64> = (0..100).map(|_| rng.random()).collect();
        let mut expected = input.clone();
        expected.sort_unstable();

        let mut paginator = Paginator::direct(input);
        assert_eq!(paginator.get_page(25, 25).unwrap(), &expected[25..50]);
    }
}

#[test]
fn test_paired_lanes() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let keys: Vec<u32> = (0..100).map(|_| rng.random_range(0..1000)).collect();
        let values: Vec<String> = keys.iter().map(|k| format!("v{k}")).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        let expected: Vec<String> = expected.iter().map(|k| format!("v{k}")).collect();

        let mut paginator = Paginator::paired(keys, values).unwrap();
        assert_eq!(paginator.get_page(25, 25).unwrap(), &expected[25..50]);
    }
}

#[test]
fn test_nulls_first() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut input: Vec<Option<u32>> = vec![None; 100];
    for slot in input.iter_mut().skip(50) {
        *slot = Some(rng.random());
    }
    let mut expected = input.clone();
    expected.sort();

    let mut paginator = Paginator::nulls_first(input);
    assert_eq!(paginator.get_page(25, 50).unwrap(), &expected[25..75]);
    assert_eq!(paginator.get_page(0, 25).unwrap(), &[None; 25]);
}

#[test]
fn test_overlapping_pages_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    let input: Vec<i64> = (0..2_000).map(|_| rng.random_range(-500..500)).collect();
    let mut expected = input.clone();
    expected.sort_unstable();

    let mut paginator = Paginator::direct(input);
    let first = paginator.get_page(100, 300).unwrap().to_vec();
    let second = paginator.get_page(250, 300).unwrap().to_vec();
    assert_eq!(first[150..], second[..150]);
    assert_eq!(first, expected[100..400]);
    assert_eq!(second, expected[250..550]);

    // Revisiting the first window after the second one returns the same contents.
    assert_eq!(paginator.get_page(100, 300).unwrap(), first.as_slice());
}

#[test]
fn test_random_request_sequences() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..50 {
        let count = rng.random_range(0..800);
        let input: Vec<u16> = (0..count).map(|_| rng.random_range(0..200)).collect();
        let mut expected = input.clone();
        expected.sort_unstable();

        let mut paginator = Paginator::direct(input);
        for _ in 0..20 {
            let offset = rng.random_range(0..=count);
            let length = rng.random_range(0..=count - offset);
            assert_eq!(
                paginator.get_page(offset, length).unwrap(),
                &expected[offset..offset + length]
            );
        }
    }
}

#[test]
fn test_descending_and_custom_comparers() {
    let input: Vec<i32> = (-50..50).collect();

    let mut desc = Paginator::new(Direct::new(input.clone()), Reverse::new(NaturalOrder));
    let top: Vec<i32> = (40..50).rev().collect();
    assert_eq!(desc.get_page(0, 10).unwrap(), top.as_slice());

    let mut by_abs = Paginator::direct_by(input, |a: &i32, b: &i32| a.abs().cmp(&b.abs()));
    let page = by_abs.get_page(0, 3).unwrap();
    assert_eq!(page[0], 0);
    assert_eq!(page[1].abs(), 1);
    assert_eq!(page[2].abs(), 1);
}

#[test]
fn test_get_range_forms() {
    let input: Vec<u32> = (0..30).rev().collect();
    let mut paginator = Paginator::direct(input);

    assert_eq!(paginator.get_range(..3).unwrap(), &[0, 1, 2]);
    assert_eq!(paginator.get_range(27..).unwrap(), &[27, 28, 29]);
    assert_eq!(paginator.get_range(10..=11).unwrap(), &[10, 11]);
    assert_eq!(paginator.get_range(PageRange::last(2)).unwrap(), &[28, 29]);
    assert_eq!(
        paginator
            .get_range(PageRange::new(Position::FromEnd(5), Position::FromEnd(3)))
            .unwrap(),
        &[25, 26]
    );
    assert_eq!(paginator.get_range(..).unwrap().len(), 30);
}

#[test]
fn test_empty_pages() {
    let mut paginator = Paginator::direct(vec![3, 2, 1]);
    assert!(paginator.get_page(0, 0).unwrap().is_empty());
    assert!(paginator.get_page(3, 0).unwrap().is_empty());
    assert!(paginator.get_range(3..3).unwrap().is_empty());

    let mut empty = Paginator::direct(Vec::<i32>::new());
    assert_eq!(empty.count(), 0);
    assert!(empty.get_page(0, 0).unwrap().is_empty());
}

#[test]
fn test_range_checks() {
    let mut paginator = Paginator::direct(Vec::<i32>::new());
    assert!(matches!(
        paginator.get_page(0, 1),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        paginator.get_page(1, 1),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        paginator.get_page(usize::MAX, 2),
        Err(Error::OutOfRange { .. })
    ));
    assert!(paginator.get_range(1..).is_err());
    assert!(paginator.get_range(PageRange::last(1)).is_err());
    assert!(
        paginator
            .get_range(PageRange::new(Position::FromEnd(1), Position::FromEnd(1)))
            .is_err()
    );

    let mut paginator = Paginator::direct(vec![1, 2, 3]);
    assert!(paginator.get_page(2, 2).is_err());
    assert!(
        paginator
            .get_range(PageRange::new(Position::FromStart(2), Position::FromStart(1)))
            .is_err()
    );
    // Argument errors leave the instance usable.
    assert_eq!(paginator.get_page(0, 3).unwrap(), &[1, 2, 3]);
    assert_eq!(paginator.state(), &PaginatorState::Usable);
}

#[test]
fn test_construction_checks() {
    let err = Paginator::paired(vec![1], vec!["a", "b"]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    let err = Paginator::paired(vec![1, 2], vec!["a"]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    let err = Paginator::paired_by(vec![1], vec!["a", "b"], |a: &i32, b: &i32| a.cmp(b))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let empty: Vec<i32> = Vec::new();
    assert!(Paginator::with_range(Direct::new(empty.clone()), NaturalOrder, 1, 0).is_err());
    assert!(Paginator::with_range(Direct::new(empty), NaturalOrder, 0, 1).is_err());
}

#[test]
fn test_sub_range_leaves_outside_untouched() {
    let mut data: Vec<i32> = (0..100).rev().collect();
    {
        let mut paginator =
            Paginator::with_range(Direct::new(&mut data), NaturalOrder, 20, 50).unwrap();
        let expected: Vec<i32> = (30..80).collect();
        assert_eq!(paginator.get_page(0, 50).unwrap(), expected.as_slice());
    }
    let head: Vec<i32> = (80..100).rev().collect();
    let tail: Vec<i32> = (0..30).rev().collect();
    assert_eq!(&data[..20], head.as_slice());
    assert_eq!(&data[70..], tail.as_slice());
}

#[test]
fn test_fn_comparer_on_strings() {
    let words = vec!["pear", "fig", "banana", "kiwi", "apple"];
    let cmp = FnComparer::new(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
    let mut paginator = Paginator::new(Direct::new(words), cmp);
    assert_eq!(
        paginator.get_page(0, 5).unwrap(),
        &["fig", "kiwi", "pear", "apple", "banana"]
    );
}

#[test]
fn test_fuzz_edge_cases() {
    // All equal
    let mut paginator = Paginator::direct(vec![7u8; 500]);
    assert_eq!(paginator.get_page(100, 100).unwrap(), &[7u8; 100]);

    // Already sorted
    let input: Vec<u32> = (0..500).collect();
    let mut paginator = Paginator::direct(input.clone());
    assert_eq!(paginator.get_page(250, 50).unwrap(), &input[250..300]);

    // Reversed
    let mut paginator = Paginator::direct(input.iter().rev().copied().collect::<Vec<_>>());
    assert_eq!(paginator.get_page(250, 50).unwrap(), &input[250..300]);

    // Organ pipe
    let pipe: Vec<u32> = (0..250).chain((0..250).rev()).collect();
    let mut expected = pipe.clone();
    expected.sort_unstable();
    let mut paginator = Paginator::direct(pipe);
    assert_eq!(paginator.get_page(400, 100).unwrap(), &expected[400..500]);
}
