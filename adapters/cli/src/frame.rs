//! Per-frame glue between the session and the rendered scene.

use std::time::Duration;

use dog_clicker_core::{Screen, ScreenPoint};
use dog_clicker_rendering::{
    visuals::{self, PressScale},
    CharacterPresentation, FrameInput, MusicTrack, Scene, SceneLayout,
};
use dog_clicker_session::GameSession;

/// Drives a [`GameSession`] from backend frames and mirrors it into the scene.
#[derive(Debug)]
pub(crate) struct FrameDriver {
    session: GameSession,
    press_scale: PressScale,
    debug_overlay: bool,
}

impl FrameDriver {
    pub(crate) fn new(session: GameSession, debug_overlay: bool) -> Self {
        Self {
            session,
            press_scale: PressScale::default(),
            debug_overlay,
        }
    }

    /// Applies one frame of input and time, then rewrites `scene`.
    pub(crate) fn update(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        let layout = SceneLayout::for_viewport(input.viewport);
        let taps = input
            .taps
            .iter()
            .map(|position| ScreenPoint::new(position.x, position.y));

        match self.session.screen() {
            // The title consumes the whole frame's taps; scoring starts next frame.
            Screen::Title => {
                if !input.taps.is_empty() {
                    self.session.start();
                    self.report_layout(&layout);
                }
            }
            Screen::Playing => {
                if input.restart {
                    self.session.restart();
                }
                self.report_layout(&layout);
                for point in taps {
                    self.session.on_tap(point);
                }
            }
        }

        self.session.advance(dt);
        let events = self.session.drain_events();
        scene.sound_cues = visuals::sound_cues(&events);

        let screen = self.session.screen();
        scene.screen = screen;
        scene.music = MusicTrack::for_screen(screen);
        scene.title_prompt = self.session.title_prompt().to_owned();
        scene.score_text = visuals::score_text(self.session.score());
        scene.score_top = layout.score_top;
        scene.character = CharacterPresentation::new(
            layout.character_center,
            layout.character_edge,
            self.press_scale.update(self.session.press_feedback(), dt),
        );
        scene.indicators = self
            .session
            .snapshot()
            .iter()
            .map(visuals::indicator_presentation)
            .collect();
        scene.debug_overlay = (self.debug_overlay && screen == Screen::Playing)
            .then(|| visuals::reference_overlay(self.session.reference_point()));
    }

    fn report_layout(&mut self, layout: &SceneLayout) {
        self.session
            .report_reference_point(layout.reference_center(), layout.reference_size());
    }
}
