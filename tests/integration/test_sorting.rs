use fadesort::services::data_generator::InputGenerator;
use fadesort::{
    profile_runs, sort, sort_by, sort_by_key, sort_range, sort_with_buffer, sort_with_buffer_by,
    FadeSortError, FadeSorter, MINIMUM_BUFFER_SIZE,
};

/// End-to-end sorting through the public API

fn sorted_copy(v: &[u32]) -> Vec<u32> {
    let mut expected = v.to_vec();
    expected.sort_unstable();
    expected
}

#[test]
fn test_presorted_permutations_every_buffer() {
    for seed in 0..4 {
        let input = InputGenerator::new(seed).presorted_permutation(20_000, 500);
        let expected = sorted_copy(&input);

        for buffer_len in [1, 24, 100, 1_000, 20_000] {
            let mut v = input.clone();
            let mut buf = vec![0; buffer_len];
            sort_with_buffer(&mut v, &mut buf);
            assert_eq!(v, expected, "seed {seed}, buffer {buffer_len}");
        }
    }
}

#[test]
fn test_many_lengths_with_minimum_buffer() {
    let mut rng = fastrand::Rng::with_seed(42);

    for len in (0..600).step_by(7) {
        let input: Vec<i64> = (0..len).map(|_| rng.i64(-50..50)).collect();
        let mut expected = input.clone();
        expected.sort();

        let mut v = input;
        sort(&mut v);
        assert_eq!(v, expected, "length {len}");
    }
}

#[test]
fn test_stability_with_heavy_duplicates() {
    let mut rng = fastrand::Rng::with_seed(7);
    let input: Vec<(u8, usize)> = (0..10_000).map(|i| (rng.u8(..8), i)).collect();

    let mut expected = input.clone();
    expected.sort_by_key(|&(k, _)| k);

    for buffer_len in [1, 31, 512] {
        let mut v = input.clone();
        let mut buf = v[..buffer_len].to_vec();
        sort_with_buffer_by(&mut v, &mut buf, |a, b| a.0.cmp(&b.0));
        assert_eq!(v, expected, "buffer {buffer_len}");
    }
}

#[test]
fn test_descending_and_sawtooth_inputs() {
    let descending: Vec<u32> = (0..5_000).rev().collect();
    let sawtooth: Vec<u32> = (0..5_000).map(|i| i % 97).collect();
    let organ_pipe: Vec<u32> = (0..2_500).chain((0..2_500).rev()).collect();

    for input in [descending, sawtooth, organ_pipe] {
        let expected = sorted_copy(&input);
        let mut v = input;
        FadeSorter::with_buffer_len(MINIMUM_BUFFER_SIZE).sort(&mut v);
        assert_eq!(v, expected);
    }
}

#[test]
fn test_sort_by_and_sort_by_key() {
    let mut words = vec!["delta", "Alpha", "charlie", "bravo", "alpha"];
    sort_by_key(&mut words, |w| w.to_lowercase());
    assert_eq!(words, ["Alpha", "alpha", "bravo", "charlie", "delta"]);

    let mut numbers: Vec<u32> = (0..1_000).collect();
    sort_by(&mut numbers, |a, b| b.cmp(a));
    assert_eq!(numbers.first(), Some(&999));
    assert_eq!(numbers.last(), Some(&0));
}

#[test]
fn test_sort_range_contract() {
    let mut v = vec![9, 8, 7, 6, 5, 4, 3];
    let mut buf = vec![0; 4];

    sort_range(&mut v, &mut buf, 2, 6).unwrap();
    assert_eq!(v, [9, 8, 4, 5, 6, 7, 3]);

    assert!(matches!(
        sort_range(&mut v, &mut buf, 0, 8),
        Err(FadeSortError::IndexOutOfBounds { index: 8, len: 7 })
    ));
    assert!(matches!(
        sort_range(&mut v, &mut buf, 5, 4),
        Err(FadeSortError::InvalidRange { start: 5, end: 4 })
    ));
}

#[test]
fn test_profile_matches_sorted_input() {
    let v: Vec<u32> = (0..10_000).collect();
    let profile = profile_runs(&v, u32::cmp);

    assert_eq!(profile.total_runs(), 1);
    assert_eq!(profile.non_descending, 1);
    assert_eq!(profile.presorted_elements, 10_000);
}
