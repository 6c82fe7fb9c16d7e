#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dog Clicker engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Title used by windows that present the game.
pub const WINDOW_TITLE: &str = "Dog Clicker";

/// Prompt displayed on the title screen.
pub const TITLE_PROMPT: &str = "Tap to Start";

/// Time an indicator stays fully visible after it spawns.
pub const INDICATOR_VISIBLE_DURATION: Duration = Duration::from_millis(300);

/// Time an indicator spends fading before it is removed.
pub const INDICATOR_FADE_DURATION: Duration = Duration::from_millis(200);

/// Total lifetime of a floating indicator.
pub const INDICATOR_LIFETIME: Duration = Duration::from_millis(500);

/// Time the press feedback stays active after the most recent accepted tap.
pub const PRESS_FEEDBACK_DURATION: Duration = Duration::from_millis(100);

/// Fraction of the reference size that bounds indicator placement.
pub const PLACEMENT_AREA_FRACTION: f32 = 0.7;

/// Default number of indicators that may be alive at once.
pub const DEFAULT_INDICATOR_CAPACITY: usize = 64;

/// Screens the game can present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Start screen waiting for the first tap.
    Title,
    /// Gameplay screen with the tappable character.
    Playing,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Leaves the title screen and starts a fresh session.
    ///
    /// Issued while already playing, the session restarts: the score returns
    /// to zero and every live indicator is discarded.
    StartSession,
    /// Records the latest on-screen placement of the tappable character.
    ReportReferencePoint {
        /// Center and size of the character in screen space.
        reference: ReferencePoint,
    },
    /// Reports a tap on the interactive surface.
    RegisterTap {
        /// Screen-space location of the tap.
        point: ScreenPoint,
    },
    /// Commits the outcome of an accepted tap.
    ///
    /// The world adds the increment to the score, inserts the matching
    /// indicator, and raises the press feedback in a single step.
    AwardTap {
        /// Amount added to the score.
        increment: u32,
        /// Text displayed by the spawned indicator.
        label: String,
        /// Screen-space location of the spawned indicator.
        position: ScreenPoint,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests removal of an indicator ahead of its lifetime.
    ///
    /// Removing an indicator that is already gone has no effect.
    RemoveIndicator {
        /// Identifier of the indicator to remove.
        id: IndicatorId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a different screen became active.
    ScreenChanged {
        /// Screen that is now presented.
        screen: Screen,
    },
    /// Announces that a fresh session began with a zero score.
    SessionStarted,
    /// Confirms that the reference point was recorded.
    ReferencePointChanged {
        /// Reference point now used for placement.
        reference: ReferencePoint,
    },
    /// Confirms that a tap was accepted for scoring.
    TapAccepted {
        /// Screen-space location of the tap.
        point: ScreenPoint,
    },
    /// Reports that the score grew.
    ScoreIncreased {
        /// Score before the tap was applied.
        previous: Score,
        /// Score after the tap was applied.
        current: Score,
        /// Amount that was added.
        increment: u32,
    },
    /// Confirms that a floating indicator was created.
    IndicatorSpawned {
        /// Identifier assigned to the indicator.
        id: IndicatorId,
        /// Text displayed by the indicator.
        label: String,
        /// Screen-space location of the indicator.
        position: ScreenPoint,
    },
    /// Reports that an indicator finished its visible phase.
    IndicatorFading {
        /// Identifier of the fading indicator.
        id: IndicatorId,
    },
    /// Reports that an indicator left the live set.
    IndicatorRemoved {
        /// Identifier of the removed indicator.
        id: IndicatorId,
        /// Why the indicator was removed.
        reason: RemovalReason,
    },
    /// Reports that the press feedback flag flipped.
    PressFeedbackChanged {
        /// Whether the character should currently render pressed.
        active: bool,
    },
}

/// Reasons an indicator leaves the live set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// The indicator reached the end of its lifetime.
    Expired,
    /// The indicator was dropped early because the registry was full.
    Evicted,
    /// A collaborator explicitly asked for the removal.
    Requested,
}

/// Point expressed in screen-space units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl ScreenPoint {
    /// Origin of the screen, also used as the "undefined" sentinel.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new screen-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Extent expressed in screen-space units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl ScreenSize {
    /// Creates a new screen-space size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the size uniformly scaled by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// On-screen center and size of the tappable character.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    center: ScreenPoint,
    size: ScreenSize,
}

impl ReferencePoint {
    /// Creates a reference point from the character's center and size.
    #[must_use]
    pub const fn new(center: ScreenPoint, size: ScreenSize) -> Self {
        Self { center, size }
    }

    /// Center of the character in screen space.
    #[must_use]
    pub const fn center(&self) -> ScreenPoint {
        self.center
    }

    /// Size of the character in screen space.
    #[must_use]
    pub const fn size(&self) -> ScreenSize {
        self.size
    }

    /// Reports whether the reference is the "not yet laid out" sentinel.
    ///
    /// Layout passes that have not completed report the character centered on
    /// the screen origin; such reports carry no usable position.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.center == ScreenPoint::ZERO
    }
}

/// Running score accumulated during a session.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Score(u64);

impl Score {
    /// Score at the start of every session.
    pub const ZERO: Self = Self(0);

    /// Creates a score with the provided value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric value of the score.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the score grown by `increment`, saturating at the numeric limit.
    #[must_use]
    pub const fn saturating_add(self, increment: u32) -> Self {
        Self(self.0.saturating_add(increment as u64))
    }
}

/// Unique identifier assigned to a floating indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndicatorId(u64);

impl IndicatorId {
    /// Creates a new indicator identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Visual phase of a live floating indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorPhase {
    /// Displayed at full opacity.
    Visible,
    /// Rising and fading out before removal.
    Fading,
}

impl IndicatorPhase {
    /// Classifies an indicator by the time elapsed since it spawned.
    ///
    /// Returns `None` once the indicator outlived [`INDICATOR_LIFETIME`].
    #[must_use]
    pub fn for_age(age: Duration) -> Option<Self> {
        if age < INDICATOR_VISIBLE_DURATION {
            Some(Self::Visible)
        } else if age < INDICATOR_LIFETIME {
            Some(Self::Fading)
        } else {
            None
        }
    }
}

/// Immutable representation of a single live indicator used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorSnapshot {
    /// Unique identifier assigned to the indicator.
    pub id: IndicatorId,
    /// Text displayed by the indicator, e.g. `"+3"`.
    pub label: String,
    /// Screen-space location the indicator spawned at.
    pub position: ScreenPoint,
    /// Phase derived from the indicator's age.
    pub phase: IndicatorPhase,
    /// Time elapsed since the indicator spawned.
    pub age: Duration,
}

/// Read-only snapshot describing every live indicator.
#[derive(Clone, Debug, Default)]
pub struct IndicatorView {
    snapshots: Vec<IndicatorSnapshot>,
}

impl IndicatorView {
    /// Creates a new indicator view, keeping the provided insertion order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<IndicatorSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live indicators captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no indicators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Looks up the snapshot for the provided identifier.
    #[must_use]
    pub fn get(&self, id: IndicatorId) -> Option<&IndicatorSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<IndicatorSnapshot> {
        self.snapshots
    }
}
