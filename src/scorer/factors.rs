use super::Scorer;
use crate::layout::KeyPress;

/// A single independent multiplier. Each factor starts from a neutral 1.0
/// and nudges the trigram's score up (worse) or down (better); the scorer
/// folds the whole table into one product.
pub type Factor = fn(&Scorer, &[KeyPress; 3]) -> f32;

pub const FACTORS: [(&str, Factor); 5] = [
    ("roll", roll_multiplier),
    ("row_jump", row_jump_multiplier),
    ("same_finger", same_finger_multiplier),
    ("position", position_multiplier),
    ("finger_strength", finger_strength_multiplier),
];

const ALTERNATION_BONUS: f32 = -0.2;
const OUTWARD_ROLL_PENALTY: f32 = 0.2;
const INWARD_ROLL_BONUS: f32 = -0.5;

/// Rewards inward rolls and penalizes outward rolls and hand alternation,
/// scaled by the tightness of the roll (closer keys roll better).
pub fn roll_multiplier(scorer: &Scorer, presses: &[KeyPress; 3]) -> f32 {
    let board = &scorer.board;
    let mut alternations = 0.0f32;
    let mut inward = 0.0f32;
    let mut outward = 0.0f32;

    for pair in presses.windows(2) {
        let a = pair[0].index;
        let b = pair[1].index;
        let finger_a = board.fingers[a];
        let finger_b = board.fingers[b];
        let col_a = board.keys[a].column;
        let col_b = board.keys[b].column;

        if finger_a == finger_b {
            continue;
        }
        if (finger_a <= 4 && finger_b >= 5) || (finger_a >= 5 && finger_b <= 4) {
            alternations += 1.0;
        } else if (col_a < col_b && finger_b <= 4) || (col_a > col_b && finger_a >= 5) {
            let tightness = 1.0 - board.distance(a, b) / scorer.metrics.max_span;
            inward += tightness;
        } else if (col_a > col_b && finger_b <= 4) || (col_a < col_b && finger_a >= 5) {
            let tightness = 1.0 - board.distance(a, b) / scorer.metrics.max_span;
            outward += tightness;
        }
    }

    1.0 + alternations * ALTERNATION_BONUS
        + outward * OUTWARD_ROLL_PENALTY
        + inward * INWARD_ROLL_BONUS
}

// Worst case is row 0 -> row 5 -> row 0.
const MAX_ROW_JUMP: f32 = 10.0;
// Kept weak so row jumps cannot drown out the roll factor.
const ROW_JUMP_DAMPING: f32 = 0.5;

/// Penalizes row changes between consecutive keys, in proportion to the
/// total number of rows jumped.
pub fn row_jump_multiplier(scorer: &Scorer, presses: &[KeyPress; 3]) -> f32 {
    let board = &scorer.board;
    let mut rows_jumped = 0.0f32;
    for pair in presses.windows(2) {
        let row_a = board.keys[pair[0].index].row as f32;
        let row_b = board.keys[pair[1].index].row as f32;
        rows_jumped += (row_b - row_a).abs();
    }
    1.0 + (rows_jumped / MAX_ROW_JUMP) * ROW_JUMP_DAMPING
}

/// Penalizes consecutive key-presses made by the same finger, scaled by
/// the distance the finger has to travel.
pub fn same_finger_multiplier(scorer: &Scorer, presses: &[KeyPress; 3]) -> f32 {
    let board = &scorer.board;
    let mut multiplier = 1.0f32;
    for pair in presses.windows(2) {
        let a = pair[0].index;
        let b = pair[1].index;
        if board.fingers[a] == board.fingers[b] {
            let travel = board.distance(a, b) / scorer.metrics.max_same_finger;
            multiplier *= 1.0 + travel;
        }
    }
    multiplier
}

/// Penalizes keys in proportion to their distance from the responsible
/// finger's home key. Deliberately weak: a distant key gets cheaper when
/// an earlier key in the trigram already floated the hand toward it, and
/// other factors account for that.
pub fn position_multiplier(scorer: &Scorer, presses: &[KeyPress; 3]) -> f32 {
    let board = &scorer.board;
    presses.iter().fold(1.0f32, |multiplier, press| {
        let reach = board.distance_from_home(press.index) / scorer.metrics.max_from_home;
        multiplier * (1.0 + reach)
    })
}

/// Scales by the strength of each finger involved. Strengths sit in (0,1],
/// so weak fingers pull the score DOWN: under this model's polarity that
/// is a reward for trigrams reachable without the strong fingers.
pub fn finger_strength_multiplier(scorer: &Scorer, presses: &[KeyPress; 3]) -> f32 {
    let board = &scorer.board;
    presses.iter().fold(1.0f32, |multiplier, press| {
        multiplier * board.strengths[board.fingers[press.index] as usize]
    })
}
