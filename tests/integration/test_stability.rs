use fadesort::services::data_generator::{stability_input, stability_key};
use fadesort::services::stability::run_stability_checks;
use fadesort::sort_with_buffer_by;

/// Stability across buffer sizes, end to end

#[test]
fn test_stability_report_for_odd_length() {
    let report = run_stability_checks(10_007);

    assert!(!report.checks.is_empty());
    assert!(report.all_stable(), "{:?}", report.checks);
    assert!(report.checks.iter().all(|c| c.buffer_size >= 24));
}

#[test]
fn test_stability_input_sorted_by_key() {
    let input = stability_input(900);
    let mut expected = input.clone();
    expected.sort_by_key(stability_key);

    let mut v = input;
    let mut buf = vec![0; 30];
    sort_with_buffer_by(&mut v, &mut buf, |a, b| stability_key(a).cmp(&stability_key(b)));

    assert_eq!(v, expected);
}
