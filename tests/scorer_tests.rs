use keytemper::geometry::Keyboard;
use keytemper::layout::KnownLayout;
use keytemper::scorer::{Scorer, FACTORS};
use rstest::rstest;

fn scorer() -> Scorer {
    Scorer::new(Keyboard::standard()).expect("standard board")
}

fn factor_index(name: &str) -> usize {
    FACTORS
        .iter()
        .position(|(n, _)| *n == name)
        .expect("known factor")
}

#[rstest]
#[case("fjf", "roll", 0.6)] // two hand alternations
#[case("qzq", "row_jump", 1.2)] // four rows jumped in total
#[case("fjd", "row_jump", 1.0)] // stays on the home row
#[case("fjd", "same_finger", 1.0)] // three distinct fingers
#[case("fjd", "position", 1.0)] // all three on home keys
#[case("fjd", "finger_strength", 0.63)] // 0.9 x 1.0 x 0.7
fn factor_multipliers(#[case] trigram: &str, #[case] name: &str, #[case] expected: f32) {
    let sc = scorer();
    let layout = KnownLayout::Qwerty.layout();
    let lookup = layout.lookup().unwrap();

    let values = sc.factor_values(trigram, &layout, &lookup).unwrap();
    let got = values[factor_index(name)];
    assert!(
        (got - expected).abs() < 1e-4,
        "{name}({trigram:?}) = {got}, expected {expected}"
    );
}

#[test]
fn score_is_the_product_of_the_factor_multipliers() {
    let sc = scorer();
    let layout = KnownLayout::Qwerty.layout();
    let lookup = layout.lookup().unwrap();

    for trigram in ["the", "fjd", "qzq", "lol"] {
        let score = sc.score_trigram_with(trigram, &layout, &lookup).unwrap();
        let product: f32 = sc
            .factor_values(trigram, &layout, &lookup)
            .unwrap()
            .iter()
            .product();
        assert!(
            (score - product).abs() < 1e-5,
            "score({trigram:?}) disagrees with its factor product"
        );
    }
}

#[test]
fn repeated_same_finger_keys_cost_more() {
    let sc = scorer();
    let layout = KnownLayout::Qwerty.layout();
    let lookup = layout.lookup().unwrap();

    // f and r share the left index finger.
    let values = sc.factor_values("frf", &layout, &lookup).unwrap();
    assert!(values[factor_index("same_finger")] > 1.0);
}

#[test]
fn inward_rolls_score_below_outward_rolls() {
    let sc = scorer();
    let layout = KnownLayout::Qwerty.layout();

    // Same three right-hand home keys in both directions, so every factor
    // except roll direction is identical.
    let inward = sc.score_trigram("lkj", &layout).unwrap();
    let outward = sc.score_trigram("jkl", &layout).unwrap();
    assert!(
        inward < outward,
        "inward {inward} should beat outward {outward}"
    );
}

#[test]
fn home_row_alternation_beats_a_scattered_weak_finger() {
    let sc = scorer();
    let qwerty = KnownLayout::Qwerty.layout();

    // Move f, j and d onto the left ring finger, spread over three rows.
    let mut scattered = qwerty.clone();
    scattered.swap(46, 16);
    scattered.swap(49, 57);
    scattered.swap(45, 30);
    scattered.name = "scattered".to_string();

    let home = sc.score_trigram("fjd", &qwerty).unwrap();
    let scattered_score = sc.score_trigram("fjd", &scattered).unwrap();
    assert!(
        home < scattered_score,
        "home-row alternation {home} should beat the scattered arrangement {scattered_score}"
    );
}

#[test]
fn mismatched_layout_and_board_is_a_validation_error() {
    // A legal custom board with fewer keys than the layout has slots.
    let mut board = Keyboard::standard();
    board.keys.truncate(30);
    board.fingers.truncate(30);
    board.mask.truncate(30);
    board.home_keys = [14, 15, 16, 17, 18, 19, 20, 21, 22, 23];
    board.validate().expect("small board must validate");

    let sc = Scorer::new(board).unwrap();
    let layout = KnownLayout::Qwerty.layout();

    let err = sc.score_trigram("aaa", &layout).unwrap_err();
    assert!(matches!(err, keytemper::KeytemperError::Validation(_)));

    // The aggregate path refuses the pairing even with nothing to score.
    assert!(sc.fitness(&layout, &[], 10).is_err());
}

#[test]
fn scores_are_comparable_across_layouts() {
    let sc = scorer();
    let qwerty = KnownLayout::Qwerty.layout();
    let colemak = KnownLayout::Colemak.layout();

    let sorted = vec![
        ("the".to_string(), 100u64),
        ("and".to_string(), 60u64),
        ("ent".to_string(), 40u64),
    ];
    let a = sc.fitness(&qwerty, &sorted, 3).unwrap();
    let b = sc.fitness(&colemak, &sorted, 3).unwrap();
    assert!(a.is_finite() && a > 0.0);
    assert!(b.is_finite() && b > 0.0);
}
