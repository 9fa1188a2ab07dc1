use super::*;

#[test]
fn empty_history_normalizes_to_empty_profile() {
    assert!(normalize(&[]).is_empty());
}

#[test]
fn min_max_scaling_with_known_values() {
    assert_eq!(normalize(&[100.0, 150.0, 120.0]), vec![0.0, 1.0, 0.4]);
}

#[test]
fn equal_samples_normalize_to_zero() {
    assert_eq!(normalize(&[200.0, 200.0, 200.0]), vec![0.0, 0.0, 0.0]);
}

#[test]
fn narrow_span_is_floored_at_one() {
    assert_eq!(normalize(&[100.0, 100.5]), vec![0.0, 0.5]);
}

#[test]
fn only_the_last_window_contributes() {
    let mut samples = vec![900.0; 10];
    samples.extend((0..24).map(|i| 100.0 + f64::from(i)));
    let p = normalize(&samples);
    assert_eq!(p.len(), PROFILE_WINDOW);
    assert_eq!(p[0], 0.0);
    assert_eq!(p[23], 1.0);
}

#[test]
fn intervals_are_clamped_on_record() {
    let mut h = TimingHistory::new();
    h.record(1.0);
    h.record(5_000.0);
    h.record(f64::NAN);
    h.record(300.0);
    assert_eq!(h.samples(), &[12.0, 900.0, 300.0]);
}

#[test]
fn history_keeps_the_newest_120() {
    let mut h = TimingHistory::new();
    for i in 0..150 {
        h.record(100.0 + f64::from(i));
    }
    assert_eq!(h.len(), HISTORY_CAPACITY);
    assert_eq!(h.samples()[0], 130.0);
    assert_eq!(*h.samples().last().unwrap(), 249.0);
    assert_eq!(h.tail(48).len(), 48);
    assert_eq!(h.tail(48)[0], 202.0);
}

#[test]
fn from_samples_applies_capacity() {
    let h = TimingHistory::from_samples((0..200).map(f64::from).collect());
    assert_eq!(h.len(), HISTORY_CAPACITY);
    assert_eq!(h.samples()[0], 80.0);
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn profile_values_stay_in_unit_interval(
            samples in prop::collection::vec(MIN_INTERVAL_MS..=MAX_INTERVAL_MS, 1..200)
        ) {
            let p = normalize(&samples);
            prop_assert_eq!(p.len(), samples.len().min(PROFILE_WINDOW));
            for v in p {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }

        #[test]
        fn degenerate_histories_normalize_to_zero(v in MIN_INTERVAL_MS..=MAX_INTERVAL_MS, n in 1usize..60) {
            let p = normalize(&vec![v; n]);
            prop_assert!(p.iter().all(|&x| x == 0.0));
        }
    }
}
