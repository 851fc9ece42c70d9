use crate::layout::Layout;
use fastrand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Attempts shared across a whole `evolve` call before it gives up.
pub const EVOLVE_ATTEMPT_BUDGET: usize = 1000;

/// Number of swaps applied by one mutation: usually 1, occasionally 2 or 3.
pub fn swap_count(rng: &mut Rng) -> usize {
    let draw = rng.f32();
    if draw < 0.90 {
        1
    } else if draw < 0.99 {
        2
    } else {
        3
    }
}

/// No-op and masked-key validators. A swap moves the contents of BOTH
/// slots, so both endpoints must be mutable; allowing one masked endpoint
/// would let a frozen key's assignment drift.
fn swap_is_allowed(mask: &[bool], source: usize, target: usize) -> bool {
    source != target && !mask[source] && !mask[target]
}

/// Produces a mutated copy of `layout` by applying 1-3 validated random
/// swaps. Every candidate must be a swap of two unmasked slots into an
/// arrangement not yet recorded in `seen`.
///
/// Returns `None` when the attempt budget runs out, which signals that no
/// valid unseen swap exists (a likely deadlock). Callers treat this as
/// "no mutation this iteration", never as a fatal error. On success the
/// new fingerprint is recorded in `seen` before returning.
pub fn evolve(
    layout: &Layout,
    seen: &mut HashSet<String>,
    mask: &[bool],
    rng: &mut Rng,
) -> Option<Layout> {
    let slot_count = layout.slots.len();
    let mut evolved = layout.clone();
    let mut remaining = swap_count(rng);
    let mut attempts = 0usize;

    while remaining > 0 {
        attempts += 1;
        if attempts > EVOLVE_ATTEMPT_BUDGET {
            debug!(budget = EVOLVE_ATTEMPT_BUDGET, "likely deadlock in evolve, bailing");
            return None;
        }

        let source = rng.usize(0..slot_count);
        let target = rng.usize(0..slot_count);
        if !swap_is_allowed(mask, source, target) {
            continue;
        }

        // The duplicate check needs the post-swap fingerprint.
        let mut candidate = evolved.clone();
        candidate.swap(source, target);
        if seen.contains(&candidate.fingerprint()) {
            continue;
        }

        evolved = candidate;
        remaining -= 1;
    }

    seen.insert(evolved.fingerprint());
    Some(evolved)
}

/// Scrambles `start` with up to `steps` accepted mutations, using a
/// private seen-set. Used to produce a randomized starting layout.
pub fn random_layout(start: &Layout, mask: &[bool], steps: usize, rng: &mut Rng) -> Layout {
    let mut seen = HashSet::from([start.fingerprint()]);
    let mut layout = start.clone();
    for _ in 0..steps {
        match evolve(&layout, &mut seen, mask, rng) {
            Some(next) => layout = next,
            None => break,
        }
    }
    layout.name = format!("{} (scrambled)", start.name);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::KnownLayout;

    #[test]
    fn evolve_records_the_new_fingerprint() {
        let layout = KnownLayout::Qwerty.layout();
        let mask = crate::geometry::Keyboard::standard().mask;
        let mut seen = HashSet::from([layout.fingerprint()]);
        let mut rng = Rng::with_seed(7);

        let evolved = evolve(&layout, &mut seen, &mask, &mut rng).expect("mutation");
        assert!(seen.contains(&evolved.fingerprint()));
        assert_ne!(evolved.fingerprint(), layout.fingerprint());
    }

    #[test]
    fn evolve_never_touches_masked_slots() {
        let layout = KnownLayout::Qwerty.layout();
        let mask = crate::geometry::Keyboard::standard().mask;
        let mut seen = HashSet::from([layout.fingerprint()]);
        let mut rng = Rng::with_seed(11);

        for _ in 0..50 {
            let Some(evolved) = evolve(&layout, &mut seen, &mask, &mut rng) else {
                break;
            };
            for (i, masked) in mask.iter().enumerate() {
                if *masked {
                    assert_eq!(
                        evolved.slots[i], layout.slots[i],
                        "masked slot {i} moved"
                    );
                }
            }
        }
    }

    #[test]
    fn fully_masked_board_exhausts_the_budget() {
        let layout = KnownLayout::Qwerty.layout();
        let mask = vec![true; layout.slots.len()];
        let mut seen = HashSet::new();
        let mut rng = Rng::with_seed(3);

        assert!(evolve(&layout, &mut seen, &mask, &mut rng).is_none());
        assert!(seen.is_empty());
    }
}
