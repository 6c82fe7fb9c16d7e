#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Dog Clicker.

mod indicators;

use std::{num::NonZeroUsize, time::Duration};

use dog_clicker_core::{
    Command, Event, ReferencePoint, RemovalReason, Score, Screen, PRESS_FEEDBACK_DURATION,
};

pub use indicators::{Expiry, IndicatorRegistry, Insertion};

/// Represents the authoritative Dog Clicker world state.
///
/// The world is mutated exclusively through [`apply`] from a single thread of
/// control, so taps, ticks and removals are serialised. None of the fields
/// are guarded by synchronisation primitives; sharing a `World` across
/// threads requires an external lock.
#[derive(Debug)]
pub struct World {
    screen: Screen,
    score: Score,
    reference: Option<ReferencePoint>,
    indicators: IndicatorRegistry,
    clock: Duration,
    press_feedback_until: Option<Duration>,
}

impl World {
    /// Creates a new world showing the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(IndicatorRegistry::default())
    }

    /// Creates a new world whose registry holds at most `capacity` indicators.
    #[must_use]
    pub fn with_indicator_capacity(capacity: NonZeroUsize) -> Self {
        Self::with_registry(IndicatorRegistry::with_capacity(capacity))
    }

    fn with_registry(indicators: IndicatorRegistry) -> Self {
        Self {
            screen: Screen::Title,
            score: Score::ZERO,
            reference: None,
            indicators,
            clock: Duration::ZERO,
            press_feedback_until: None,
        }
    }

    fn press_feedback_active(&self) -> bool {
        self.press_feedback_until.is_some()
    }

    fn reset_session(&mut self, out_events: &mut Vec<Event>) {
        self.score = Score::ZERO;
        self.reference = None;
        self.indicators.clear();
        if self.press_feedback_until.take().is_some() {
            out_events.push(Event::PressFeedbackChanged { active: false });
        }
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let Expiry { fading, removed } = self.indicators.expire(self.clock);
        out_events.extend(fading.into_iter().map(|id| Event::IndicatorFading { id }));
        out_events.extend(removed.into_iter().map(|id| Event::IndicatorRemoved {
            id,
            reason: RemovalReason::Expired,
        }));

        if let Some(deadline) = self.press_feedback_until {
            if self.clock >= deadline {
                self.press_feedback_until = None;
                out_events.push(Event::PressFeedbackChanged { active: false });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession => {
            world.reset_session(out_events);
            if world.screen != Screen::Playing {
                world.screen = Screen::Playing;
                out_events.push(Event::ScreenChanged {
                    screen: Screen::Playing,
                });
            }
            out_events.push(Event::SessionStarted);
        }
        Command::ReportReferencePoint { reference } => {
            let next = if reference.is_sentinel() {
                None
            } else {
                Some(reference)
            };
            if next != world.reference {
                world.reference = next;
                if let Some(reference) = next {
                    out_events.push(Event::ReferencePointChanged { reference });
                }
            }
        }
        Command::RegisterTap { point } => {
            if world.screen == Screen::Playing && world.reference.is_some() {
                out_events.push(Event::TapAccepted { point });
            }
        }
        Command::AwardTap {
            increment,
            label,
            position,
        } => {
            if world.screen != Screen::Playing {
                return;
            }

            let previous = world.score;
            world.score = previous.saturating_add(increment);
            out_events.push(Event::ScoreIncreased {
                previous,
                current: world.score,
                increment,
            });

            let Insertion { id, evicted } =
                world
                    .indicators
                    .insert(label.clone(), position, world.clock);
            if let Some(evicted) = evicted {
                out_events.push(Event::IndicatorRemoved {
                    id: evicted,
                    reason: RemovalReason::Evicted,
                });
            }
            out_events.push(Event::IndicatorSpawned {
                id,
                label,
                position,
            });

            let was_pressed = world.press_feedback_active();
            world.press_feedback_until = Some(world.clock.saturating_add(PRESS_FEEDBACK_DURATION));
            if !was_pressed {
                out_events.push(Event::PressFeedbackChanged { active: true });
            }
        }
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::RemoveIndicator { id } => {
            if world.indicators.remove(id) {
                out_events.push(Event::IndicatorRemoved {
                    id,
                    reason: RemovalReason::Requested,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::{num::NonZeroUsize, time::Duration};

    use super::World;
    use dog_clicker_core::{IndicatorView, ReferencePoint, Score, Screen, TITLE_PROMPT};

    /// Retrieves the prompt that adapters display on the title screen.
    #[must_use]
    pub fn title_prompt(_world: &World) -> &'static str {
        TITLE_PROMPT
    }

    /// Screen currently presented to the player.
    #[must_use]
    pub fn screen(world: &World) -> Screen {
        world.screen
    }

    /// Score accumulated during the running session.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Latest defined reference point, if layout has completed.
    #[must_use]
    pub fn reference_point(world: &World) -> Option<ReferencePoint> {
        world.reference
    }

    /// Whether the character should currently render pressed.
    #[must_use]
    pub fn press_feedback_active(world: &World) -> bool {
        world.press_feedback_active()
    }

    /// Session time accumulated through ticks.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Maximum number of indicators alive at once.
    #[must_use]
    pub fn indicator_capacity(world: &World) -> NonZeroUsize {
        world.indicators.capacity()
    }

    /// Captures a read-only view of the indicators alive at the current time.
    #[must_use]
    pub fn indicator_view(world: &World) -> IndicatorView {
        IndicatorView::from_snapshots(world.indicators.snapshot(world.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dog_clicker_core::{IndicatorPhase, ScreenPoint, ScreenSize};

    fn playing_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);
        apply(
            &mut world,
            Command::ReportReferencePoint {
                reference: ReferencePoint::new(
                    ScreenPoint::new(100.0, 100.0),
                    ScreenSize::new(200.0, 200.0),
                ),
            },
            &mut events,
        );
        world
    }

    fn award(world: &mut World, increment: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::AwardTap {
                increment,
                label: format!("+{increment}"),
                position: ScreenPoint::new(90.0, 110.0),
            },
            &mut events,
        );
        events
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn world_boots_on_title_screen() {
        let world = World::new();
        assert_eq!(query::screen(&world), Screen::Title);
        assert_eq!(query::score(&world), Score::ZERO);
        assert!(query::reference_point(&world).is_none());
        assert_eq!(query::title_prompt(&world), "Tap to Start");
    }

    #[test]
    fn start_session_switches_to_playing() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);

        assert_eq!(query::screen(&world), Screen::Playing);
        assert_eq!(
            events,
            vec![
                Event::ScreenChanged {
                    screen: Screen::Playing
                },
                Event::SessionStarted
            ]
        );
    }

    #[test]
    fn taps_without_reference_point_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);
        events.clear();

        apply(
            &mut world,
            Command::RegisterTap {
                point: ScreenPoint::new(5.0, 5.0),
            },
            &mut events,
        );

        assert!(events.is_empty());
    }

    #[test]
    fn sentinel_report_leaves_reference_undefined() {
        let mut world = playing_world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ReportReferencePoint {
                reference: ReferencePoint::new(ScreenPoint::ZERO, ScreenSize::new(1.0, 1.0)),
            },
            &mut events,
        );

        assert!(query::reference_point(&world).is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn taps_on_title_screen_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ReportReferencePoint {
                reference: ReferencePoint::new(
                    ScreenPoint::new(10.0, 10.0),
                    ScreenSize::new(4.0, 4.0),
                ),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::RegisterTap {
                point: ScreenPoint::new(10.0, 10.0),
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn award_commits_score_indicator_and_feedback_together() {
        let mut world = playing_world();
        let events = award(&mut world, 1);

        assert_eq!(query::score(&world), Score::new(1));
        assert!(query::press_feedback_active(&world));
        let view = query::indicator_view(&world);
        assert_eq!(view.len(), 1);
        let indicator = view.iter().next().expect("indicator present");
        assert_eq!(indicator.label, "+1");
        assert_eq!(indicator.phase, IndicatorPhase::Visible);

        assert_eq!(
            events,
            vec![
                Event::ScoreIncreased {
                    previous: Score::ZERO,
                    current: Score::new(1),
                    increment: 1,
                },
                Event::IndicatorSpawned {
                    id: indicator.id,
                    label: "+1".to_owned(),
                    position: ScreenPoint::new(90.0, 110.0),
                },
                Event::PressFeedbackChanged { active: true },
            ]
        );
    }

    #[test]
    fn ticks_drive_fading_and_removal() {
        let mut world = playing_world();
        let _ = award(&mut world, 1);
        let id = query::indicator_view(&world)
            .iter()
            .next()
            .map(|indicator| indicator.id)
            .expect("indicator present");

        let events = tick(&mut world, 300);
        assert!(events.contains(&Event::IndicatorFading { id }));
        assert_eq!(query::indicator_view(&world).len(), 1);

        let events = tick(&mut world, 200);
        assert!(events.contains(&Event::IndicatorRemoved {
            id,
            reason: RemovalReason::Expired,
        }));
        assert!(query::indicator_view(&world).is_empty());
    }

    #[test]
    fn press_feedback_clears_after_last_tap() {
        let mut world = playing_world();
        let _ = award(&mut world, 1);
        let _ = tick(&mut world, 60);
        let events = award(&mut world, 1);
        assert!(!events.contains(&Event::PressFeedbackChanged { active: true }));

        let _ = tick(&mut world, 60);
        assert!(query::press_feedback_active(&world));

        let events = tick(&mut world, 40);
        assert!(!query::press_feedback_active(&world));
        assert!(events.contains(&Event::PressFeedbackChanged { active: false }));
    }

    #[test]
    fn restart_resets_score_and_indicators() {
        let mut world = playing_world();
        let _ = award(&mut world, 3);
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);

        assert_eq!(query::score(&world), Score::ZERO);
        assert!(query::indicator_view(&world).is_empty());
        assert!(query::reference_point(&world).is_none());
        assert!(!query::press_feedback_active(&world));
        assert_eq!(
            events,
            vec![
                Event::PressFeedbackChanged { active: false },
                Event::SessionStarted
            ]
        );
    }

    #[test]
    fn requested_removal_is_idempotent() {
        let mut world = playing_world();
        let _ = award(&mut world, 1);
        let id = query::indicator_view(&world)
            .iter()
            .next()
            .map(|indicator| indicator.id)
            .expect("indicator present");

        let mut events = Vec::new();
        apply(&mut world, Command::RemoveIndicator { id }, &mut events);
        apply(&mut world, Command::RemoveIndicator { id }, &mut events);

        assert_eq!(
            events,
            vec![Event::IndicatorRemoved {
                id,
                reason: RemovalReason::Requested,
            }]
        );
    }

    #[test]
    fn eviction_is_reported_before_spawn() {
        let capacity = NonZeroUsize::new(1).expect("non-zero");
        let mut world = World::with_indicator_capacity(capacity);
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);

        let first = award(&mut world, 1);
        let first_id = first
            .iter()
            .find_map(|event| match event {
                Event::IndicatorSpawned { id, .. } => Some(*id),
                _ => None,
            })
            .expect("spawn event");

        let second = award(&mut world, 1);
        assert!(matches!(
            second.get(1),
            Some(Event::IndicatorRemoved {
                id,
                reason: RemovalReason::Evicted,
            }) if *id == first_id
        ));
        assert_eq!(query::indicator_view(&world).len(), 1);
        assert_eq!(query::indicator_capacity(&world), capacity);
    }
}
