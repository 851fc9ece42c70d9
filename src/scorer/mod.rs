pub mod factors;

pub use self::factors::{Factor, FACTORS};
use crate::geometry::{Keyboard, Metrics};
use crate::layout::{KeyPress, Layout, LookupMap};
use crate::{KeytemperError, KtResult};

/// Evaluates trigrams and whole layouts against a physical keyboard.
///
/// The normalization ceilings are derived once at construction; a scorer
/// is only valid for the keyboard it was built from.
pub struct Scorer {
    pub board: Keyboard,
    pub metrics: Metrics,
}

impl Scorer {
    pub fn new(board: Keyboard) -> KtResult<Self> {
        let metrics = board.metrics()?;
        Ok(Scorer { board, metrics })
    }

    /// A layout is only meaningful against a board with exactly one key
    /// per slot; any other pairing would index past the board's tables.
    pub fn check_layout(&self, layout: &Layout) -> KtResult<()> {
        if layout.slots.len() != self.board.key_count() {
            return Err(KeytemperError::Validation(format!(
                "layout '{}' has {} slots for a {}-key board",
                layout.name,
                layout.slots.len(),
                self.board.key_count()
            )));
        }
        Ok(())
    }

    /// Resolves a trigram's characters to key-presses through `lookup`.
    /// A missing character is a corpus/layout mismatch and fails loudly;
    /// skipping it would silently corrupt every downstream fitness sum.
    pub fn resolve(
        &self,
        trigram: &str,
        layout: &Layout,
        lookup: &LookupMap,
    ) -> KtResult<[KeyPress; 3]> {
        self.check_layout(layout)?;
        let mut chars = trigram.chars();
        let mut presses = [KeyPress {
            index: 0,
            shift: false,
        }; 3];
        for press in presses.iter_mut() {
            let ch = chars.next().ok_or_else(|| KeytemperError::Validation(
                format!("trigram {trigram:?} is shorter than 3 characters"),
            ))?;
            *press = *lookup.get(&ch).ok_or(KeytemperError::Lookup {
                ch,
                layout: layout.name.clone(),
            })?;
        }
        if chars.next().is_some() {
            return Err(KeytemperError::Validation(format!(
                "trigram {trigram:?} is longer than 3 characters"
            )));
        }
        Ok(presses)
    }

    /// Effort score for one trigram under `layout`. Lower is better. The
    /// score is the product of the independent factor multipliers, so one
    /// severe factor dominates regardless of the others.
    pub fn score_trigram(&self, trigram: &str, layout: &Layout) -> KtResult<f32> {
        let lookup = layout.lookup()?;
        self.score_trigram_with(trigram, layout, &lookup)
    }

    /// As [`score_trigram`](Self::score_trigram) with a caller-supplied
    /// lookup, so aggregate scans build the map once per layout content.
    pub fn score_trigram_with(
        &self,
        trigram: &str,
        layout: &Layout,
        lookup: &LookupMap,
    ) -> KtResult<f32> {
        let presses = self.resolve(trigram, layout, lookup)?;
        Ok(FACTORS
            .iter()
            .fold(1.0, |score, (_, factor)| score * factor(self, &presses)))
    }

    /// Per-factor multiplier values for one trigram, in `FACTORS` order.
    /// Used by the layout report's factor summary.
    pub fn factor_values(
        &self,
        trigram: &str,
        layout: &Layout,
        lookup: &LookupMap,
    ) -> KtResult<[f32; FACTORS.len()]> {
        let presses = self.resolve(trigram, layout, lookup)?;
        let mut values = [0.0f32; FACTORS.len()];
        for (value, (_, factor)) in values.iter_mut().zip(FACTORS.iter()) {
            *value = factor(self, &presses);
        }
        Ok(values)
    }

    /// Weighted effort over the first `top_k` entries of an already-sorted
    /// trigram table: sum of score x count. Truncation is positional; the
    /// table must carry the analyzer's deterministic order.
    pub fn fitness(
        &self,
        layout: &Layout,
        sorted_trigrams: &[(String, u64)],
        top_k: usize,
    ) -> KtResult<f32> {
        self.check_layout(layout)?;
        let lookup = layout.lookup()?;
        let mut total_effort = 0.0f32;
        for (trigram, count) in sorted_trigrams.iter().take(top_k) {
            let score = self.score_trigram_with(trigram, layout, &lookup)?;
            total_effort += score * *count as f32;
        }
        Ok(total_effort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::KnownLayout;

    fn scorer() -> Scorer {
        Scorer::new(Keyboard::standard()).unwrap()
    }

    #[test]
    fn unknown_character_is_a_lookup_error() {
        let sc = scorer();
        let layout = KnownLayout::Qwerty.layout();
        let err = sc.score_trigram("ab\u{e9}", &layout).unwrap_err();
        assert!(matches!(
            err,
            KeytemperError::Lookup { ch: '\u{e9}', .. }
        ));
    }

    #[test]
    fn wrong_length_trigram_is_rejected() {
        let sc = scorer();
        let layout = KnownLayout::Qwerty.layout();
        assert!(sc.score_trigram("ab", &layout).is_err());
        assert!(sc.score_trigram("abcd", &layout).is_err());
    }

    #[test]
    fn fitness_truncates_by_position_not_count() {
        let sc = scorer();
        let layout = KnownLayout::Qwerty.layout();
        let sorted = vec![
            ("the".to_string(), 10u64),
            ("and".to_string(), 10u64),
            ("ing".to_string(), 10u64),
        ];
        let top2 = sc.fitness(&layout, &sorted, 2).unwrap();
        let the = sc.score_trigram("the", &layout).unwrap() * 10.0;
        let and = sc.score_trigram("and", &layout).unwrap() * 10.0;
        assert!((top2 - (the + and)).abs() < 1e-4);
    }

    #[test]
    fn empty_trigram_table_scores_zero() {
        let sc = scorer();
        let layout = KnownLayout::Qwerty.layout();
        assert_eq!(sc.fitness(&layout, &[], 100).unwrap(), 0.0);
    }
}
