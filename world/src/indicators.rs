//! Bounded registry of floating score indicators.
//!
//! Indicators never own timers. Each one records the session time it spawned
//! at, and its phase is derived from `now - created_at` whenever the registry
//! is queried or expired, so a late tick only delays the transition.

use std::{collections::VecDeque, num::NonZeroUsize, time::Duration};

use dog_clicker_core::{
    IndicatorId, IndicatorPhase, IndicatorSnapshot, ScreenPoint, DEFAULT_INDICATOR_CAPACITY,
    INDICATOR_VISIBLE_DURATION,
};

/// Outcome of inserting an indicator into the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
    /// Identifier allocated to the new indicator.
    pub id: IndicatorId,
    /// Oldest indicator dropped to make room, if the registry was full.
    pub evicted: Option<IndicatorId>,
}

/// Lifecycle transitions observed by a single [`IndicatorRegistry::expire`] pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expiry {
    /// Indicators that entered the fading phase since the previous pass.
    pub fading: Vec<IndicatorId>,
    /// Indicators removed because their lifetime elapsed.
    pub removed: Vec<IndicatorId>,
}

impl Expiry {
    /// Reports whether the pass observed no transitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fading.is_empty() && self.removed.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Indicator {
    id: IndicatorId,
    label: String,
    position: ScreenPoint,
    created_at: Duration,
    fading_reported: bool,
}

impl Indicator {
    fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }
}

/// Ordered collection of live indicators with a fixed capacity.
///
/// Insertion order is preserved. Because every indicator shares the same
/// lifetime, the front of the queue is always the oldest entry.
#[derive(Clone, Debug)]
pub struct IndicatorRegistry {
    live: VecDeque<Indicator>,
    next_id: u64,
    capacity: NonZeroUsize,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_INDICATOR_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(capacity)
    }
}

impl IndicatorRegistry {
    /// Creates an empty registry that holds at most `capacity` indicators.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            live: VecDeque::with_capacity(capacity.get()),
            next_id: 0,
            capacity,
        }
    }

    /// Maximum number of indicators alive at once.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Number of indicators currently stored, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Reports whether the registry stores no indicators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Appends a new indicator spawned at `now`.
    ///
    /// Identifiers increase monotonically and are never reused, even across
    /// [`clear`](Self::clear), so stale identifiers held by collaborators can
    /// never alias a newer indicator.
    pub fn insert(&mut self, label: String, position: ScreenPoint, now: Duration) -> Insertion {
        let evicted = if self.live.len() >= self.capacity.get() {
            self.live.pop_front().map(|indicator| indicator.id)
        } else {
            None
        };

        let id = IndicatorId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.live.push_back(Indicator {
            id,
            label,
            position,
            created_at: now,
            fading_reported: false,
        });

        Insertion { id, evicted }
    }

    /// Removes the indicator with the provided identifier.
    ///
    /// Returns `false` when the indicator is already gone.
    pub fn remove(&mut self, id: IndicatorId) -> bool {
        match self.live.iter().position(|indicator| indicator.id == id) {
            Some(index) => self.live.remove(index).is_some(),
            None => false,
        }
    }

    /// Applies every time-driven transition due at `now`.
    ///
    /// An indicator whose whole lifetime elapsed between two passes is still
    /// reported as fading before it is reported as removed.
    pub fn expire(&mut self, now: Duration) -> Expiry {
        let mut expiry = Expiry::default();

        for indicator in self.live.iter_mut() {
            if indicator.fading_reported {
                continue;
            }
            if indicator.age(now) >= INDICATOR_VISIBLE_DURATION {
                indicator.fading_reported = true;
                expiry.fading.push(indicator.id);
            }
        }

        let removed = &mut expiry.removed;
        self.live.retain(|indicator| {
            let alive = IndicatorPhase::for_age(indicator.age(now)).is_some();
            if !alive {
                removed.push(indicator.id);
            }
            alive
        });

        expiry
    }

    /// Captures the indicators alive at `now` in insertion order.
    ///
    /// Indicators whose lifetime elapsed are excluded even when no expiry pass
    /// has removed them yet.
    #[must_use]
    pub fn snapshot(&self, now: Duration) -> Vec<IndicatorSnapshot> {
        self.live
            .iter()
            .filter_map(|indicator| {
                let age = indicator.age(now);
                IndicatorPhase::for_age(age).map(|phase| IndicatorSnapshot {
                    id: indicator.id,
                    label: indicator.label.clone(),
                    position: indicator.position,
                    phase,
                    age,
                })
            })
            .collect()
    }

    /// Drops every stored indicator.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}
