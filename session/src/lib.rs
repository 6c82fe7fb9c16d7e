#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session controller wiring adapters to the world and pure systems.
//!
//! Adapters call into [`GameSession`] with taps, layout reports and frame
//! deltas. Each call becomes a [`Command`] that is applied to the world; the
//! resulting events are fed to the systems, whose commands are applied in
//! turn until no further work remains. Every call therefore finishes before
//! the next one starts, so a tap's score update and indicator insertion are
//! observed together.

use std::{collections::VecDeque, num::NonZeroUsize, time::Duration};

use dog_clicker_core::{
    Command, Event, IndicatorId, IndicatorView, ReferencePoint, RemovalReason, Score, Screen,
    ScreenPoint, ScreenSize, DEFAULT_INDICATOR_CAPACITY,
};
use dog_clicker_system_placement::PlacementSampler;
use dog_clicker_system_tapping::Tapping;
use dog_clicker_world::{self as world, query, World};
use log::{debug, info, trace, warn};
use thiserror::Error;

/// Errors raised while configuring a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The registry must be able to hold at least one indicator.
    #[error("indicator capacity must be at least 1 (received {0})")]
    InvalidIndicatorCapacity(usize),
}

/// Configuration parameters required to construct a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    indicator_capacity: NonZeroUsize,
    placement_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            indicator_capacity: NonZeroUsize::new(DEFAULT_INDICATOR_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            placement_seed: None,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration holding at most `indicator_capacity` indicators.
    pub fn new(indicator_capacity: usize) -> Result<Self, SessionError> {
        let indicator_capacity = NonZeroUsize::new(indicator_capacity)
            .ok_or(SessionError::InvalidIndicatorCapacity(indicator_capacity))?;
        Ok(Self {
            indicator_capacity,
            ..Self::default()
        })
    }

    /// Replays indicator placement from a fixed seed instead of OS entropy.
    #[must_use]
    pub fn with_placement_seed(mut self, seed: Option<u64>) -> Self {
        self.placement_seed = seed;
        self
    }

    /// Maximum number of indicators alive at once.
    #[must_use]
    pub const fn indicator_capacity(&self) -> NonZeroUsize {
        self.indicator_capacity
    }

    /// Seed used for indicator placement, if any.
    #[must_use]
    pub const fn placement_seed(&self) -> Option<u64> {
        self.placement_seed
    }
}

/// Owns the world and systems for a single running game.
///
/// All methods must be called from the thread driving the render loop. The
/// session holds no locks; concurrent access requires external
/// synchronisation.
#[derive(Debug)]
pub struct GameSession {
    world: World,
    tapping: Tapping,
    observed: Vec<Event>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// Creates a session showing the title screen.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let sampler = match config.placement_seed() {
            Some(seed) => PlacementSampler::from_seed(seed),
            None => PlacementSampler::from_entropy(),
        };
        Self {
            world: World::with_indicator_capacity(config.indicator_capacity()),
            tapping: Tapping::new(sampler),
            observed: Vec::new(),
        }
    }

    /// Leaves the title screen and starts scoring from zero.
    pub fn start(&mut self) {
        self.submit(Command::StartSession);
    }

    /// Restarts the running session, discarding the score and live indicators.
    pub fn restart(&mut self) {
        info!("restarting session at score {}", self.score().get());
        self.submit(Command::StartSession);
    }

    /// Records the character's current on-screen center and size.
    pub fn report_reference_point(&mut self, center: ScreenPoint, size: ScreenSize) {
        self.submit(Command::ReportReferencePoint {
            reference: ReferencePoint::new(center, size),
        });
    }

    /// Handles a tap anywhere on the interactive surface.
    ///
    /// Taps received before a reference point exists, or outside gameplay,
    /// are dropped without changing any state.
    pub fn on_tap(&mut self, tap_point: ScreenPoint) {
        let first_new = self.observed.len();
        self.submit(Command::RegisterTap { point: tap_point });
        if !tap_accepted(&self.observed[first_new..]) {
            debug!(
                "tap at ({:.1}, {:.1}) ignored",
                tap_point.x, tap_point.y
            );
        }
    }

    /// Advances the session clock, applying due fades, removals and
    /// press-feedback resets.
    pub fn advance(&mut self, dt: Duration) {
        self.submit(Command::Tick { dt });
    }

    /// Removes an indicator early. Unknown or expired identifiers are ignored.
    pub fn remove_indicator(&mut self, id: IndicatorId) {
        self.submit(Command::RemoveIndicator { id });
    }

    /// Screen currently presented.
    #[must_use]
    pub fn screen(&self) -> Screen {
        query::screen(&self.world)
    }

    /// Score accumulated during the running session.
    #[must_use]
    pub fn score(&self) -> Score {
        query::score(&self.world)
    }

    /// Live indicators in insertion order with their current phase.
    #[must_use]
    pub fn snapshot(&self) -> IndicatorView {
        query::indicator_view(&self.world)
    }

    /// Whether the character should currently render pressed.
    #[must_use]
    pub fn press_feedback(&self) -> bool {
        query::press_feedback_active(&self.world)
    }

    /// Latest defined reference point.
    #[must_use]
    pub fn reference_point(&self) -> Option<ReferencePoint> {
        query::reference_point(&self.world)
    }

    /// Prompt shown on the title screen.
    #[must_use]
    pub fn title_prompt(&self) -> &'static str {
        query::title_prompt(&self.world)
    }

    /// Session time accumulated through [`advance`](Self::advance).
    #[must_use]
    pub fn clock(&self) -> Duration {
        query::clock(&self.world)
    }

    /// Returns every event observed since the previous drain.
    ///
    /// Adapters drain once per frame to trigger sounds and other
    /// fire-and-forget effects.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.observed)
    }

    fn submit(&mut self, command: Command) {
        let mut pending = VecDeque::from([command]);
        while let Some(command) = pending.pop_front() {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);
            if events.is_empty() {
                continue;
            }

            let mut commands = Vec::new();
            self.tapping.handle(
                &events,
                query::score(&self.world),
                query::reference_point(&self.world),
                &mut commands,
            );
            pending.extend(commands);

            for event in &events {
                log_event(event);
            }
            self.observed.extend(events);
        }
    }
}

fn tap_accepted(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::TapAccepted { .. }))
}

fn log_event(event: &Event) {
    match event {
        Event::SessionStarted => info!("session started"),
        Event::ScreenChanged { screen } => info!("screen changed to {screen:?}"),
        Event::ScoreIncreased {
            current, increment, ..
        } => debug!("score +{increment} -> {}", current.get()),
        Event::IndicatorRemoved {
            id,
            reason: RemovalReason::Evicted,
        } => warn!(
            "indicator {} evicted early; registry at capacity",
            id.get()
        ),
        Event::IndicatorRemoved { id, reason } => {
            trace!("indicator {} removed ({reason:?})", id.get());
        }
        Event::IndicatorSpawned { id, label, position } => trace!(
            "indicator {} '{label}' spawned at ({:.1}, {:.1})",
            id.get(),
            position.x,
            position.y
        ),
        Event::ReferencePointChanged { reference } => trace!(
            "reference point at ({:.1}, {:.1})",
            reference.center().x,
            reference.center().y
        ),
        _ => {}
    }
}
