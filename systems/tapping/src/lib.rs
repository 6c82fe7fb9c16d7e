#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system converting accepted taps into atomic award commands.

use dog_clicker_core::{Command, Event, ReferencePoint, Score};
use dog_clicker_system_placement::PlacementSampler;
use dog_clicker_system_scoring::{increment_for, label_for};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Resolves the increment and indicator position for every accepted tap.
#[derive(Debug)]
pub struct Tapping<R = ChaCha8Rng> {
    sampler: PlacementSampler<R>,
}

impl<R: Rng> Tapping<R> {
    /// Creates a tapping system drawing indicator positions from `sampler`.
    #[must_use]
    pub fn new(sampler: PlacementSampler<R>) -> Self {
        Self { sampler }
    }

    /// Consumes events and immutable views to emit award commands.
    ///
    /// `score` is the score before any of the provided events were applied.
    /// Several accepted taps within one batch are scored in order, each one
    /// seeing the score left behind by the previous tap.
    pub fn handle(
        &mut self,
        events: &[Event],
        score: Score,
        reference: Option<ReferencePoint>,
        out: &mut Vec<Command>,
    ) {
        let mut running = score;
        for event in events {
            match event {
                Event::SessionStarted => running = Score::ZERO,
                Event::TapAccepted { .. } => {
                    let Some(reference) = reference else {
                        continue;
                    };

                    let increment = increment_for(running);
                    running = running.saturating_add(increment);
                    let position = self
                        .sampler
                        .sample_offset(reference.center(), reference.size());
                    out.push(Command::AwardTap {
                        increment,
                        label: label_for(increment),
                        position,
                    });
                }
                _ => {}
            }
        }
    }
}
