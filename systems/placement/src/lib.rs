#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized placement of floating indicators around the tap target.

use dog_clicker_core::{ScreenPoint, ScreenSize, PLACEMENT_AREA_FRACTION};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Axis-aligned rectangle that bounds sampled indicator positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementArea {
    min: ScreenPoint,
    max: ScreenPoint,
}

impl PlacementArea {
    /// Builds the sampling rectangle: the reference size scaled by
    /// [`PLACEMENT_AREA_FRACTION`] and centered on `center`.
    #[must_use]
    pub fn around(center: ScreenPoint, size: ScreenSize) -> Self {
        let area = size.scaled(PLACEMENT_AREA_FRACTION);
        let half_width = area.width / 2.0;
        let half_height = area.height / 2.0;
        Self {
            min: ScreenPoint::new(center.x - half_width, center.y - half_height),
            max: ScreenPoint::new(center.x + half_width, center.y + half_height),
        }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> ScreenPoint {
        self.min
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub const fn max(&self) -> ScreenPoint {
        self.max
    }

    /// Reports whether `point` lies inside the rectangle, bounds included.
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Maps two unit-interval samples onto the placement rectangle around `center`.
///
/// `u` and `v` are expected in `[0, 1)`; they are scaled by the rectangle's
/// width and height and shifted so that `0.5` lands on the center.
#[must_use]
pub fn offset_within(center: ScreenPoint, size: ScreenSize, u: f32, v: f32) -> ScreenPoint {
    let area = size.scaled(PLACEMENT_AREA_FRACTION);
    let half_width = area.width / 2.0;
    let half_height = area.height / 2.0;
    ScreenPoint::new(
        center.x + u * area.width - half_width,
        center.y + v * area.height - half_height,
    )
}

/// Samples indicator positions uniformly inside the placement rectangle.
#[derive(Debug)]
pub struct PlacementSampler<R = ChaCha8Rng> {
    rng: R,
}

impl PlacementSampler<ChaCha8Rng> {
    /// Creates a sampler seeded from operating-system entropy.
    ///
    /// Every process therefore observes a different placement sequence.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates a sampler that replays the same sequence for the same seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlacementSampler<R> {
    /// Creates a sampler drawing from the provided random number generator.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a point uniformly distributed inside the placement rectangle.
    pub fn sample_offset(&mut self, center: ScreenPoint, size: ScreenSize) -> ScreenPoint {
        let u: f32 = self.rng.gen();
        let v: f32 = self.rng.gen();
        offset_within(center, size, u, v)
    }
}
