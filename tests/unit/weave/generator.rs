use super::*;
use crate::weave::pattern::{WEAVE_HEIGHT, WEAVE_WIDTH};

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

const HELLO_ROWS: [&str; WEAVE_HEIGHT] = [
    "............................",
    "############################",
    ".....#.#.##.................",
    "............................",
    "############################",
    "..#....#.....#....#...#.....",
    "............................",
    "############################",
    ".....#......#....#.......#..",
    "............................",
    "############################",
    "#....#...#..###.#.#.....#...",
    "............................",
    "############################",
    "##.#.##..#.###.#####.##.#..#",
    "............................",
    "############################",
    "..#...###.....#...#.#.###..#",
];

#[test]
fn golden_hello_with_rhythm() {
    let p = build_weave(day("2024-01-01"), "hello", &[100.0, 150.0, 120.0]);
    assert_eq!(p.seed(), 1_065_419_235);
    assert_eq!(p.signature(), "3F8101E3");
    assert_eq!(p.stripe_row(), 14);
    assert_eq!(p.checksum(), 0xd7a9_e465_407e_4eb6);
    assert_eq!(p.on_cells(), 219);
    let rows = p.to_ascii();
    assert_eq!(rows.lines().collect::<Vec<_>>(), HELLO_ROWS.to_vec());
}

#[test]
fn golden_hello_without_rhythm_takes_density_from_rng() {
    let p = build_weave(day("2024-01-01"), "hello", &[]);
    assert_eq!(p.seed(), 2_905_634_844);
    assert_eq!(p.stripe_row(), 4);
    assert_eq!(p.checksum(), 0x1b8e_7b81_2c19_4d9e);
    assert_eq!(p.on_cells(), 157);
}

#[test]
fn flat_rhythm_leaves_only_the_stripe() {
    let p = build_weave(day("2024-03-05"), "loom", &[200.0, 200.0, 200.0]);
    assert_eq!(p.seed(), 2_981_054_097);
    assert_eq!(p.stripe_row(), 12);
    assert_eq!(p.checksum(), 0xc489_c787_436b_406f);
    assert_eq!(p.on_cells(), 10);
    assert_eq!(p.to_ascii().lines().nth(12), Some("#..#..#..#..#..#..#..#..#..#"));
}

#[test]
fn stripe_columns_divisible_by_three_are_on() {
    for (text, times) in [("a", vec![]), ("weave", vec![12.0, 900.0]), ("zz", vec![300.0])] {
        let p = build_weave(day("2025-06-30"), text, &times);
        for x in (0..WEAVE_WIDTH).step_by(3) {
            assert!(p.is_on(x, p.stripe_row()));
        }
    }
}

#[test]
fn day_key_changes_the_seed() {
    let a = build_weave(day("2024-01-01"), "hello", &[100.0]);
    let b = build_weave(day("2024-01-02"), "hello", &[100.0]);
    assert_ne!(a.seed(), b.seed());
}

#[test]
fn whitespace_text_has_no_pattern() {
    assert!(weave_text(day("2024-01-01"), "", &[]).is_none());
    assert!(weave_text(day("2024-01-01"), "  \t\n", &[100.0]).is_none());
}

#[test]
fn weave_text_trims_before_hashing() {
    let trimmed = weave_text(day("2024-01-01"), "  hello  ", &[100.0, 150.0, 120.0]).unwrap();
    assert_eq!(trimmed.seed(), 1_065_419_235);
}

#[test]
fn trimming_uses_the_web_whitespace_set() {
    assert_eq!(trim_web("\u{FEFF}hi\u{3000}"), "hi");
    assert_eq!(trim_web("\u{0085}hi\u{0085}"), "\u{0085}hi\u{0085}");
    assert_eq!(trim_web(" \t\n\u{00A0}\u{2028}"), "");

    let bom = weave_text(day("2024-01-01"), "\u{FEFF}hello", &[100.0, 150.0, 120.0]).unwrap();
    assert_eq!(bom.seed(), 1_065_419_235);
    assert!(weave_text(day("2024-01-01"), "\u{0085}", &[]).is_some());
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn same_inputs_weave_identical_cloth(
            text in "[a-zA-Z0-9 ]{1,64}",
            times in prop::collection::vec(12.0f64..=900.0, 0..60),
            offset in 0u64..3650,
        ) {
            let d = DayKey::from_ymd(2030, 1, 1).unwrap().days_before(offset);
            let a = build_weave(d, &text, &times);
            let b = build_weave(d, &text, &times);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.checksum(), b.checksum());
        }

        #[test]
        fn every_pattern_has_the_fixed_shape_and_stripe(
            text in "\\PC{1,64}",
            times in prop::collection::vec(12.0f64..=900.0, 0..130),
        ) {
            let p = build_weave(DayKey::from_ymd(2024, 2, 29).unwrap(), &text, &times);
            prop_assert_eq!(p.rows().len(), WEAVE_HEIGHT);
            prop_assert!(p.rows().iter().all(|r| r.len() == WEAVE_WIDTH));
            prop_assert!(p.stripe_row() < WEAVE_HEIGHT);
            for x in (0..WEAVE_WIDTH).step_by(3) {
                prop_assert!(p.is_on(x, p.stripe_row()));
            }
        }
    }
}
