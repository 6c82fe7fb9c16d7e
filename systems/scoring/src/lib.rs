#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tiered scoring rule mapping the pre-tap score to the next increment.

use dog_clicker_core::Score;

/// Inclusive lower bounds of each tier paired with the increment it awards.
///
/// Bounds must stay strictly ascending; the last tier is open-ended.
const TIERS: [(u64, u32); 5] = [(0, 1), (100, 2), (300, 3), (600, 4), (1_000, 5)];

/// Contiguous score range that awards a fixed increment per tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreTier {
    floor: Score,
    ceiling: Option<Score>,
    increment: u32,
}

impl ScoreTier {
    /// Lowest score, inclusive, covered by the tier.
    #[must_use]
    pub const fn floor(&self) -> Score {
        self.floor
    }

    /// Highest score, inclusive, covered by the tier. `None` for the last tier.
    #[must_use]
    pub const fn ceiling(&self) -> Option<Score> {
        self.ceiling
    }

    /// Amount added to the score by every tap taken within the tier.
    #[must_use]
    pub const fn increment(&self) -> u32 {
        self.increment
    }

    /// Reports whether `score` falls inside the tier.
    #[must_use]
    pub fn contains(&self, score: Score) -> bool {
        score >= self.floor && self.ceiling.map_or(true, |ceiling| score <= ceiling)
    }
}

/// Resolves the tier that covers the provided pre-tap score.
#[must_use]
pub fn tier_for(score: Score) -> ScoreTier {
    let value = score.get();
    let index = TIERS
        .iter()
        .rposition(|(floor, _)| value >= *floor)
        .unwrap_or(0);
    tier_at(index)
}

/// Computes the increment awarded by a tap taken at the provided score.
#[must_use]
pub fn increment_for(score: Score) -> u32 {
    tier_for(score).increment()
}

/// Formats the floating indicator label for an increment, e.g. `"+3"`.
#[must_use]
pub fn label_for(increment: u32) -> String {
    format!("+{increment}")
}

/// Every tier in ascending score order.
pub fn tiers() -> impl Iterator<Item = ScoreTier> {
    (0..TIERS.len()).map(tier_at)
}

fn tier_at(index: usize) -> ScoreTier {
    let (floor, increment) = TIERS[index];
    let ceiling = TIERS
        .get(index + 1)
        .map(|(next_floor, _)| Score::new(next_floor - 1));
    ScoreTier {
        floor: Score::new(floor),
        ceiling,
        increment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_is_strictly_ascending() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn tiers_cover_scores_without_gaps() {
        let tiers: Vec<_> = tiers().collect();
        assert_eq!(tiers[0].floor(), Score::ZERO);
        for pair in tiers.windows(2) {
            let ceiling = pair[0].ceiling().expect("only the last tier is open");
            assert_eq!(ceiling.get() + 1, pair[1].floor().get());
        }
        assert!(tiers[tiers.len() - 1].ceiling().is_none());
    }
}
