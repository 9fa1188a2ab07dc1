use super::*;

#[test]
fn xorshift_sequence_for_seed_one() {
    let mut rng = WeaveRng::new(1);
    assert_eq!(rng.next_u32(), 270_369);
    assert_eq!(rng.next_u32(), 67_634_689);
    assert_eq!(rng.next_u32(), 2_647_435_461);
}

#[test]
fn unit_values_are_state_over_two_pow_32() {
    let mut rng = WeaveRng::new(1);
    assert_eq!(rng.next_f64(), 0.00006295018829405308);
    assert_eq!(rng.next_f64(), 0.015747428173199296);
    assert_eq!(rng.next_f64(), 0.6164041024167091);
}

#[test]
fn same_seed_restarts_identical_sequence() {
    let a = WeaveRng::new(0xDEAD_BEEF).take(64).collect::<Vec<_>>();
    let b = WeaveRng::new(0xDEAD_BEEF).take(64).collect::<Vec<_>>();
    assert_eq!(a, b);
}

#[test]
fn zero_seed_is_degenerate_but_valid() {
    let draws = WeaveRng::new(0).take(8).collect::<Vec<_>>();
    assert!(draws.iter().all(|&v| v == 0.0));
}

#[test]
fn draws_stay_in_unit_interval() {
    for seed in [1u32, 2, 0x8000_0000, u32::MAX, 1_065_419_235] {
        for v in WeaveRng::new(seed).take(10_000) {
            assert!((0.0..1.0).contains(&v), "seed {seed} produced {v}");
        }
    }
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_seed_yields_unit_interval_draws(seed in any::<u32>()) {
            for v in WeaveRng::new(seed).take(10_000) {
                prop_assert!((0.0..1.0).contains(&v));
            }
        }
    }
}
