use crate::{KeytemperError, KtResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One physical key. Coordinates are the key's center in an arbitrary
/// pixel-based unit system taken from a photograph of the board.
///
/// `id` is NOT unique: row 5 groups ten half-height/modifier keys under a
/// single id. The engine always addresses keys by table index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: u8,
    pub row: u8,
    pub column: u8,
    pub label: String,
    pub x: f32,
    pub y: f32,
}

pub const FINGER_COUNT: usize = 10;

pub const FINGER_NAMES: [&str; FINGER_COUNT] = [
    "Left Pinkie",
    "Left Ring Finger",
    "Left Middle Finger",
    "Left Index Finger",
    "Left Thumb",
    "Right Thumb",
    "Right Index Finger",
    "Right Middle Finger",
    "Right Ring Finger",
    "Right Pinkie",
];

pub const ROW_NAMES: [&str; 6] = [
    "F-keys",
    "Number",
    "Top",
    "Middle",
    "Bottom",
    "Modifiers/Space",
];

/// Physical description of a keyboard: key positions, finger responsible
/// for each key, per-finger strength, resting key per finger, and which
/// keys are frozen (excluded from optimization moves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyboard {
    pub keys: Vec<Key>,
    /// Finger index in [0,9] per key table index. Thumbs are 4 and 5.
    pub fingers: Vec<u8>,
    /// Per-finger effort multiplier in (0,1]. Stronger fingers cost more
    /// under the scoring polarity (lower score is better).
    pub strengths: [f32; FINGER_COUNT],
    /// Key table index of each finger's home-row resting key.
    pub home_keys: [usize; FINGER_COUNT],
    /// `true` means the key's assignment is fixed; swaps never touch it.
    pub mask: Vec<bool>,
}

fn key(id: u8, row: u8, column: u8, label: &str, x: f32, y: f32) -> Key {
    Key {
        id,
        row,
        column,
        label: label.to_string(),
        x,
        y,
    }
}

impl Keyboard {
    /// The standard Apple-notebook board: 78 physical keys over rows 0-5.
    pub fn standard() -> Self {
        let keys = vec![
            // Row 0
            key(0, 0, 0, "\u{238b}", 126.0, 71.0),
            key(1, 0, 1, "F1", 352.0, 71.0),
            key(2, 0, 2, "F2", 590.0, 71.0),
            key(3, 0, 3, "F3", 816.0, 71.0),
            key(4, 0, 4, "F4", 1052.0, 71.0),
            key(5, 0, 5, "F5", 1286.0, 71.0),
            key(6, 0, 6, "F6", 1514.0, 71.0),
            key(7, 0, 7, "F7", 1750.0, 71.0),
            key(8, 0, 8, "F8", 1978.0, 71.0),
            key(9, 0, 9, "F9", 2216.0, 71.0),
            key(10, 0, 10, "F10", 2450.0, 71.0),
            key(11, 0, 11, "F11", 2678.0, 71.0),
            key(12, 0, 12, "F12", 2914.0, 71.0),
            key(13, 0, 13, "\u{233d}", 3136.0, 71.0),
            // Row 1
            key(14, 1, 0, "~", 115.0, 254.0),
            key(15, 1, 1, "1", 339.0, 254.0),
            key(16, 1, 2, "2", 573.0, 254.0),
            key(17, 1, 3, "3", 789.0, 254.0),
            key(18, 1, 4, "4", 1015.0, 254.0),
            key(19, 1, 5, "5", 1239.0, 254.0),
            key(20, 1, 6, "6", 1467.0, 254.0),
            key(21, 1, 7, "7", 1691.0, 254.0),
            key(22, 1, 8, "8", 1915.0, 254.0),
            key(23, 1, 9, "9", 2141.0, 254.0),
            key(24, 1, 10, "0", 2359.0, 254.0),
            key(25, 1, 11, "-", 2585.0, 254.0),
            key(26, 1, 12, "=", 2813.0, 254.0),
            key(27, 1, 13, "\u{232b}", 3092.0, 254.0),
            // Row 2
            key(28, 2, 0, "\u{21e5}", 177.0, 474.0),
            key(29, 2, 1, "q", 455.0, 474.0),
            key(30, 2, 2, "w", 679.0, 474.0),
            key(31, 2, 3, "e", 901.0, 474.0),
            key(32, 2, 4, "r", 1123.0, 474.0),
            key(33, 2, 5, "t", 1351.0, 474.0),
            key(34, 2, 6, "y", 1573.0, 474.0),
            key(35, 2, 7, "u", 1799.0, 474.0),
            key(36, 2, 8, "i", 2025.0, 474.0),
            key(37, 2, 9, "o", 2245.0, 474.0),
            key(38, 2, 10, "p", 2471.0, 474.0),
            key(39, 2, 11, "[", 2695.0, 474.0),
            key(40, 2, 12, "]", 2921.0, 474.0),
            key(41, 2, 13, "\\", 3148.0, 474.0),
            // Row 3 (home row)
            key(42, 3, 0, "\u{21ea}", 196.0, 692.0),
            key(43, 3, 1, "a", 510.0, 692.0),
            key(44, 3, 2, "s", 736.0, 692.0),
            key(45, 3, 3, "d", 958.0, 692.0),
            key(46, 3, 4, "f", 1180.0, 692.0),
            key(47, 3, 5, "g", 1406.0, 692.0),
            key(48, 3, 6, "h", 1631.0, 692.0),
            key(49, 3, 7, "j", 1857.0, 692.0),
            key(50, 3, 8, "k", 2079.0, 692.0),
            key(51, 3, 9, "l", 2301.0, 692.0),
            key(52, 3, 10, ";", 2531.0, 692.0),
            key(53, 3, 11, "'", 2749.0, 692.0),
            key(54, 3, 12, "\u{21a9}", 3057.0, 692.0),
            // Row 4
            key(55, 4, 0, "\u{21e7} (Left)", 259.0, 910.0),
            key(56, 4, 1, "z", 619.0, 910.0),
            key(57, 4, 2, "x", 843.0, 910.0),
            key(58, 4, 3, "c", 1071.0, 910.0),
            key(59, 4, 4, "v", 1293.0, 910.0),
            key(60, 4, 5, "b", 1519.0, 910.0),
            key(61, 4, 6, "n", 1743.0, 910.0),
            key(62, 4, 7, "m", 1965.0, 910.0),
            key(63, 4, 8, ",", 2191.0, 910.0),
            key(64, 4, 9, ".", 2421.0, 910.0),
            key(65, 4, 10, "/", 2643.0, 910.0),
            key(66, 4, 11, "\u{21e7} (Right)", 3007.0, 910.0),
            // Row 5. The arrow keys are half-height; the shared id 68
            // comes straight from the source measurements.
            key(67, 5, 0, "fn", 115.0, 1138.0),
            key(68, 5, 1, "\u{2303} (Left)", 333.0, 1138.0),
            key(68, 5, 1, "\u{2325} (Left)", 565.0, 1138.0),
            key(68, 5, 1, "\u{2318} (Left)", 817.0, 1138.0),
            key(68, 5, 1, "\u{2423}", 1517.0, 1138.0),
            key(68, 5, 1, "\u{2318} (Right)", 2221.0, 1138.0),
            key(68, 5, 1, "\u{2325} (Right)", 2469.0, 1138.0),
            key(68, 5, 1, "\u{2190}", 2697.0, 1200.0),
            key(68, 5, 1, "\u{2191}", 2919.0, 1082.0),
            key(68, 5, 1, "\u{2193}", 2919.0, 1200.0),
            key(68, 5, 1, "\u{2192}", 3148.0, 1200.0),
        ];

        #[rustfmt::skip]
        let fingers = vec![
            /* Row 0: */ 0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9, 9, 9,
            /* Row 1: */ 0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9, 9, 9,
            /* Row 2: */ 0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9, 9, 9,
            /* Row 3: */ 0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9, 9,
            /* Row 4: */ 0, 0, 1, 2, 3, 6, 6, 7, 8, 9, 9, 9,
            /* Row 5: */ 0, 0, 4, 4, 5, 5, 5, 6, 7, 7, 8,
        ];

        // Only the letter positions move; everything else stays put.
        #[rustfmt::skip]
        let mask = vec![
            /* Row 0: */ true, true, true, true, true, true, true, true, true, true, true, true, true, true,
            /* Row 1: */ true, true, true, true, true, true, true, true, true, true, true, true, true, true,
            /* Row 2: */ true, false, false, false, false, false, false, false, false, false, false, true, true, true,
            /* Row 3: */ true, false, false, false, false, false, false, false, false, false, true, true, true,
            /* Row 4: */ true, false, false, false, false, false, false, false, true, true, true, true,
            /* Row 5: */ true, true, true, true, true, true, true, true, true, true, true,
        ];

        Keyboard {
            keys,
            fingers,
            strengths: [0.1, 0.6, 0.7, 0.9, 0.4, 0.5, 1.0, 0.8, 0.7, 0.1],
            home_keys: [43, 44, 45, 46, 60, 60, 49, 50, 51, 52],
            mask,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KtResult<Self> {
        let content = fs::read_to_string(path)?;
        let board: Keyboard = serde_json::from_str(&content)?;
        board.validate()?;
        Ok(board)
    }

    pub fn validate(&self) -> KtResult<()> {
        let n = self.keys.len();
        if self.fingers.len() != n {
            return Err(KeytemperError::Validation(format!(
                "finger table has {} entries for {} keys",
                self.fingers.len(),
                n
            )));
        }
        if self.mask.len() != n {
            return Err(KeytemperError::Validation(format!(
                "mask has {} entries for {} keys",
                self.mask.len(),
                n
            )));
        }
        if let Some(&f) = self.fingers.iter().find(|&&f| f as usize >= FINGER_COUNT) {
            return Err(KeytemperError::Validation(format!(
                "finger index {f} out of range"
            )));
        }
        if let Some(&h) = self.home_keys.iter().find(|&&h| h >= n) {
            return Err(KeytemperError::Validation(format!(
                "home key index {h} out of range"
            )));
        }
        Ok(())
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Euclidean distance between the centers of keys `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        let ka = &self.keys[a];
        let kb = &self.keys[b];
        let dx = ka.x - kb.x;
        let dy = ka.y - kb.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from `index` to the home key of its assigned finger.
    pub fn distance_from_home(&self, index: usize) -> f32 {
        let finger = self.fingers[index] as usize;
        self.distance(index, self.home_keys[finger])
    }

    /// Derives the normalization ceilings. Invalidated together whenever
    /// the key table changes.
    pub fn metrics(&self) -> KtResult<Metrics> {
        let max_from_home = (0..self.key_count())
            .map(|i| self.distance_from_home(i))
            .fold(0.0f32, f32::max);

        // Quadratic scan; the key table is small and fixed.
        let mut max_same_finger = 0.0f32;
        for i in 0..self.key_count() {
            for j in 0..self.key_count() {
                if self.fingers[i] == self.fingers[j] {
                    max_same_finger = max_same_finger.max(self.distance(i, j));
                }
            }
        }

        // First-to-last key approximates the board's diagonal.
        let max_span = self.distance(0, self.key_count() - 1);

        for ceiling in [max_from_home, max_same_finger, max_span] {
            if ceiling == 0.0 {
                return Err(KeytemperError::DegenerateNormalization(0.0));
            }
        }

        Ok(Metrics {
            max_from_home,
            max_same_finger,
            max_span,
        })
    }
}

/// Normalization ceilings derived once from a [`Keyboard`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Largest distance of any key from its finger's home key.
    pub max_from_home: f32,
    /// Largest distance between two keys assigned to the same finger.
    pub max_same_finger: f32,
    /// Distance between the first and last key in the table.
    pub max_span: f32,
}

/// Linearly rescales `value` from `[min, max]` to `[0, 1]`.
///
/// The factor functions do not call this: their ceilings are validated
/// once in [`Keyboard::metrics`], so the hot path divides directly.
/// Kept for callers rescaling against ranges that are not pre-checked.
pub fn normalize(value: f32, min: f32, max: f32) -> KtResult<f32> {
    if min == max {
        return Err(KeytemperError::DegenerateNormalization(min));
    }
    Ok((value - min) / (max - min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_are_parallel() {
        let board = Keyboard::standard();
        assert_eq!(board.keys.len(), 78);
        board.validate().expect("standard board must validate");
        assert_eq!(board.fingers.len(), board.keys.len());
        assert_eq!(board.mask.len(), board.keys.len());
    }

    #[test]
    fn home_keys_sit_on_their_fingers() {
        let board = Keyboard::standard();
        // Non-thumb fingers rest on a key they are responsible for.
        for (finger, &home) in board.home_keys.iter().enumerate() {
            if finger == 4 || finger == 5 {
                continue;
            }
            assert_eq!(
                board.fingers[home] as usize, finger,
                "finger {finger} does not own its home key {home}"
            );
        }
    }

    #[test]
    fn metrics_ceilings_are_positive() {
        let board = Keyboard::standard();
        let m = board.metrics().unwrap();
        assert!(m.max_from_home > 0.0);
        assert!(m.max_same_finger > 0.0);
        assert!(m.max_span > 0.0);
        // The diagonal approximation spans most of the board.
        assert!(m.max_span > 3000.0);
    }

    #[test]
    fn normalize_rejects_degenerate_range() {
        assert!(normalize(1.0, 5.0, 5.0).is_err());
        assert_eq!(normalize(5.0, 0.0, 10.0).unwrap(), 0.5);
    }
}
