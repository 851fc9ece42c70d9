use crate::{KeytemperError, KtResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};

/// What a physical key produces when pressed.
///
/// `Named` covers keys that never match a corpus character (F-keys,
/// modifiers, arrows); they participate in fingerprints and display but
/// not in the character lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Named(String),
    Char(char),
    /// Unshifted and shifted characters sharing one key.
    Pair(char, char),
}

impl Slot {
    /// Canonical fingerprint fragment. A pair renders both shift states
    /// with an explicit separator so structurally different layouts can
    /// never stringify to the same fingerprint.
    pub fn fingerprint_fragment(&self) -> String {
        match self {
            Slot::Named(name) => name.clone(),
            Slot::Char(c) => c.to_string(),
            Slot::Pair(unshifted, shifted) => format!("{unshifted}/{shifted}"),
        }
    }

    /// Short label for grid display.
    pub fn display_label(&self) -> String {
        match self {
            Slot::Named(name) => name.clone(),
            Slot::Char(c) => c.to_string(),
            Slot::Pair(unshifted, _) => unshifted.to_string(),
        }
    }
}

/// Resolution of a character to the key that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub index: usize,
    pub shift: bool,
}

pub type LookupMap = HashMap<char, KeyPress>;

/// A named assignment of slots to physical keys. Index `i` of the slot
/// sequence always refers to physical key `i`; value-like and cheap to
/// clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub slots: Vec<Slot>,
}

impl Layout {
    pub fn new(name: impl Into<String>, slots: Vec<Slot>) -> Self {
        Layout {
            name: name.into(),
            slots,
        }
    }

    /// Builds the character -> key lookup. Both members of a pair map to
    /// the same key index with differing shift flags.
    ///
    /// Rebuilt from content on every call: a name-keyed cache goes stale
    /// the moment a swap mutates the slots.
    pub fn lookup(&self) -> KtResult<LookupMap> {
        fn insert_unique(
            map: &mut LookupMap,
            layout_name: &str,
            ch: char,
            press: KeyPress,
        ) -> KtResult<()> {
            if map.insert(ch, press).is_some() {
                return Err(KeytemperError::Validation(format!(
                    "character {ch:?} appears in more than one slot of layout '{layout_name}'"
                )));
            }
            Ok(())
        }

        let mut map = LookupMap::with_capacity(self.slots.len() * 2);
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Named(_) => {}
                Slot::Char(c) => {
                    insert_unique(&mut map, &self.name, *c, KeyPress { index, shift: false })?;
                }
                Slot::Pair(unshifted, shifted) => {
                    insert_unique(
                        &mut map,
                        &self.name,
                        *unshifted,
                        KeyPress { index, shift: false },
                    )?;
                    insert_unique(
                        &mut map,
                        &self.name,
                        *shifted,
                        KeyPress { index, shift: true },
                    )?;
                }
            }
        }
        Ok(map)
    }

    /// Exchanges slots `i` and `j` in place. No bounds validation; the
    /// caller guarantees both indices are within the slot sequence.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
    }

    /// Canonical content fingerprint, used only as a set-membership key
    /// for duplicate detection, never for display.
    pub fn fingerprint(&self) -> String {
        let mut digest = String::with_capacity(self.slots.len() * 2);
        for slot in &self.slots {
            digest.push_str(&slot.fingerprint_fragment());
        }
        digest
    }
}

/// The built-in starting layouts.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Colemak,
}

fn named(label: &str) -> Slot {
    Slot::Named(label.to_string())
}

fn chars(letters: &str) -> Vec<Slot> {
    letters.chars().map(Slot::Char).collect()
}

/// Rows 0, 1 and 5 are identical across the built-in layouts.
fn frame_row0() -> Vec<Slot> {
    let mut row = vec![named("\u{238b}")];
    row.extend((1..=12).map(|i| named(&format!("F{i}"))));
    row.push(named("\u{233d}"));
    row
}

fn frame_row1() -> Vec<Slot> {
    vec![
        Slot::Pair('`', '~'),
        Slot::Pair('1', '!'),
        Slot::Pair('2', '@'),
        Slot::Pair('3', '#'),
        Slot::Pair('4', '$'),
        Slot::Pair('5', '%'),
        Slot::Pair('6', '^'),
        Slot::Pair('7', '&'),
        Slot::Pair('8', '*'),
        Slot::Pair('9', '('),
        Slot::Pair('0', ')'),
        Slot::Pair('-', '_'),
        Slot::Pair('=', '+'),
        named("\u{232b}"),
    ]
}

fn frame_row5() -> Vec<Slot> {
    vec![
        named("fn"),
        named("\u{2303} (Left)"),
        named("\u{2325} (Left)"),
        named("\u{2318} (Left)"),
        named("\u{2423}"),
        named("\u{2318} (Right)"),
        named("\u{2325} (Right)"),
        named("\u{2190}"),
        named("\u{2191}"),
        named("\u{2193}"),
        named("\u{2192}"),
    ]
}

impl KnownLayout {
    pub fn layout(&self) -> Layout {
        let mut slots = Vec::with_capacity(78);
        slots.extend(frame_row0());
        slots.extend(frame_row1());

        match self {
            KnownLayout::Qwerty => {
                slots.push(named("\u{21e5}"));
                slots.extend(chars("qwertyuiop"));
                slots.push(Slot::Pair('[', '{'));
                slots.push(Slot::Pair(']', '}'));
                slots.push(Slot::Pair('\\', '|'));

                slots.push(named("\u{21ea}"));
                slots.extend(chars("asdfghjkl"));
                slots.push(Slot::Pair(';', ':'));
                slots.push(Slot::Pair('\'', '"'));
                slots.push(named("\u{21a9}"));

                slots.push(named("\u{21e7} (Left)"));
                slots.extend(chars("zxcvbnm"));
                slots.push(Slot::Pair(',', '<'));
                slots.push(Slot::Pair('.', '>'));
                slots.push(Slot::Pair('/', '?'));
                slots.push(named("\u{21e7} (Right)"));
            }
            KnownLayout::Colemak => {
                slots.push(named("\u{21e5}"));
                slots.extend(chars("qwfpgjluy"));
                slots.push(Slot::Pair(';', ':'));
                slots.push(Slot::Pair('[', '{'));
                slots.push(Slot::Pair(']', '}'));
                slots.push(Slot::Pair('\\', '|'));

                slots.push(named("\u{21ea}"));
                slots.extend(chars("arstdhneio"));
                slots.push(Slot::Pair('\'', '"'));
                slots.push(named("\u{21a9}"));

                slots.push(named("\u{21e7} (Left)"));
                slots.extend(chars("zxcvbkm"));
                slots.push(Slot::Pair(',', '<'));
                slots.push(Slot::Pair('.', '>'));
                slots.push(Slot::Pair('/', '?'));
                slots.push(named("\u{21e7} (Right)"));
            }
        }

        slots.extend(frame_row5());
        Layout::new(self.to_string(), slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_layouts_cover_every_key() {
        for known in KnownLayout::iter() {
            let layout = known.layout();
            assert_eq!(layout.slots.len(), 78, "{known} has wrong slot count");
            layout.lookup().expect("builtin layout must have unique chars");
        }
    }

    #[test]
    fn lookup_maps_pairs_to_one_key() {
        let layout = KnownLayout::Qwerty.layout();
        let map = layout.lookup().unwrap();

        let semi = map[&';'];
        let colon = map[&':'];
        assert_eq!(semi.index, colon.index);
        assert!(!semi.shift);
        assert!(colon.shift);

        let q = map[&'q'];
        assert_eq!(q.index, 29);
        assert!(!q.shift);
    }

    #[test]
    fn lookup_rejects_duplicate_characters() {
        let layout = Layout::new("dup", vec![Slot::Char('a'), Slot::Pair('a', 'b')]);
        assert!(layout.lookup().is_err());
    }

    #[test]
    fn swap_is_self_inverse() {
        let mut layout = KnownLayout::Qwerty.layout();
        let original = layout.clone();
        layout.swap(29, 46);
        assert_ne!(layout.slots, original.slots);
        layout.swap(29, 46);
        assert_eq!(layout.slots, original.slots);
    }

    #[test]
    fn fingerprint_distinguishes_structurally_different_layouts() {
        let qwerty = KnownLayout::Qwerty.layout();
        let colemak = KnownLayout::Colemak.layout();
        assert_ne!(qwerty.fingerprint(), colemak.fingerprint());

        let mut swapped = qwerty.clone();
        swapped.swap(29, 30);
        assert_ne!(qwerty.fingerprint(), swapped.fingerprint());

        // Idempotent on identical content, regardless of name.
        let mut renamed = qwerty.clone();
        renamed.name = "something else".to_string();
        assert_eq!(qwerty.fingerprint(), renamed.fingerprint());
    }

    #[test]
    fn pair_fragments_cannot_collide_with_adjacent_chars() {
        let a = Layout::new("a", vec![Slot::Pair('x', 'y')]);
        let b = Layout::new("b", vec![Slot::Char('x'), Slot::Char('y')]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
