#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Dog Clicker adapters.

pub mod visuals;

use anyhow::Result as AnyResult;
use dog_clicker_core::{IndicatorId, ScreenPoint, ScreenSize, Screen};
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, used for all game text.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the color with its alpha replaced, clamped into 0.0..=1.0.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Screen-space locations of taps detected on this frame, in arrival order.
    pub taps: Vec<Vec2>,
    /// Whether the adapter detected a restart request on this frame.
    pub restart: bool,
    /// Current drawable size of the window in screen units.
    pub viewport: Vec2,
}

/// Texture slots that backends may fill from a sprite manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Full-screen backdrop drawn behind both screens.
    Background,
    /// The tappable character.
    Character,
}

/// Looping music associated with a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    /// Music played on the title screen.
    Menu,
    /// Music played during gameplay.
    Game,
}

impl MusicTrack {
    /// Track that accompanies the provided screen.
    #[must_use]
    pub const fn for_screen(screen: Screen) -> Self {
        match screen {
            Screen::Title => Self::Menu,
            Screen::Playing => Self::Game,
        }
    }
}

/// One-shot sounds requested by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Click played for every accepted tap.
    Click,
}

/// Screen-space placement of the character and the score line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    /// Center of the character's unscaled bounding box.
    pub character_center: Vec2,
    /// Edge length of the character's square bounding box.
    pub character_edge: f32,
    /// Vertical position of the top of the score text.
    pub score_top: f32,
}

impl SceneLayout {
    /// Preferred edge length of the character.
    pub const CHARACTER_EDGE: f32 = 360.0;
    /// Horizontal padding kept free on each side of the column.
    pub const HORIZONTAL_PADDING: f32 = 24.0;
    /// Vertical padding kept free above and below the column.
    pub const VERTICAL_PADDING: f32 = 48.0;
    /// Gap between the character and the score text.
    pub const SCORE_GAP: f32 = 36.0;
    /// Font size of the score text.
    pub const SCORE_FONT_SIZE: f32 = 44.0;

    /// Lays out a vertically centered column holding the character and score.
    ///
    /// The character shrinks when the viewport cannot fit its preferred size.
    #[must_use]
    pub fn for_viewport(viewport: Vec2) -> Self {
        let available_width = (viewport.x - 2.0 * Self::HORIZONTAL_PADDING).max(0.0);
        let available_height = (viewport.y
            - 2.0 * Self::VERTICAL_PADDING
            - Self::SCORE_GAP
            - Self::SCORE_FONT_SIZE)
            .max(0.0);
        let character_edge = Self::CHARACTER_EDGE
            .min(available_width)
            .min(available_height);

        let content_height = character_edge + Self::SCORE_GAP + Self::SCORE_FONT_SIZE;
        let top = ((viewport.y - content_height) * 0.5).max(0.0);

        Self {
            character_center: Vec2::new(viewport.x * 0.5, top + character_edge * 0.5),
            character_edge,
            score_top: top + character_edge + Self::SCORE_GAP,
        }
    }

    /// Center of the character expressed as a simulation point.
    #[must_use]
    pub fn reference_center(&self) -> ScreenPoint {
        ScreenPoint::new(self.character_center.x, self.character_center.y)
    }

    /// Size of the character expressed as a simulation size.
    #[must_use]
    pub fn reference_size(&self) -> ScreenSize {
        ScreenSize::new(self.character_edge, self.character_edge)
    }
}

/// Character drawn on the gameplay screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPresentation {
    /// Center of the unscaled bounding box.
    pub center: Vec2,
    /// Edge length of the unscaled bounding box.
    pub edge: f32,
    /// Uniform scale applied around the center, above 1.0 while pressed.
    pub scale: f32,
}

impl CharacterPresentation {
    /// Creates a new character presentation descriptor.
    #[must_use]
    pub const fn new(center: Vec2, edge: f32, scale: f32) -> Self {
        Self {
            center,
            edge,
            scale,
        }
    }

    /// Edge length after applying the press scale.
    #[must_use]
    pub fn scaled_edge(&self) -> f32 {
        self.edge * self.scale
    }
}

/// Floating indicator ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorPresentation {
    /// Identifier allocated by the world.
    pub id: IndicatorId,
    /// Text to draw, e.g. `"+2"`.
    pub label: String,
    /// Top-left anchor of the text in screen space, including the rise.
    pub anchor: Vec2,
    /// Opacity in the range 0.0..=1.0.
    pub opacity: f32,
}

/// Scene description combining everything drawn during a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen currently presented.
    pub screen: Screen,
    /// Prompt drawn centered on the title screen.
    pub title_prompt: String,
    /// Score line drawn below the character.
    pub score_text: String,
    /// Top of the score line in screen space.
    pub score_top: f32,
    /// Character drawn on the gameplay screen.
    pub character: CharacterPresentation,
    /// Live indicators in insertion order.
    pub indicators: Vec<IndicatorPresentation>,
    /// Music that should currently loop.
    pub music: MusicTrack,
    /// Sounds requested since the previous frame.
    pub sound_cues: Vec<SoundCue>,
    /// Color used for every text element.
    pub text_color: Color,
    /// Optional diagnostic line drawn in the top-left corner.
    pub debug_overlay: Option<String>,
}

impl Scene {
    /// Creates a scene showing the title screen.
    #[must_use]
    pub fn title<T>(title_prompt: T, layout: SceneLayout) -> Self
    where
        T: Into<String>,
    {
        Self {
            screen: Screen::Title,
            title_prompt: title_prompt.into(),
            score_text: String::new(),
            score_top: layout.score_top,
            character: CharacterPresentation::new(
                layout.character_center,
                layout.character_edge,
                1.0,
            ),
            indicators: Vec::new(),
            music: MusicTrack::Menu,
            sound_cues: Vec::new(),
            text_color: Color::WHITE,
            debug_overlay: None,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame when no background sprite exists.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Dog Clicker scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Window dimensions must be positive.
    #[error("window size must be positive (received {width}x{height})")]
    InvalidWindowSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}

/// Validated window dimensions requested from the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    width: i32,
    height: i32,
}

impl WindowSize {
    /// Portrait window resembling a phone screen.
    pub const PORTRAIT: Self = Self {
        width: 540,
        height: 960,
    };

    /// Creates a window size, rejecting non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderingError> {
        if width <= 0 || height <= 0 {
            return Err(RenderingError::InvalidWindowSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Requested width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Requested height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }
}
