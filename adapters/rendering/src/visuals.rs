//! Backend-agnostic animation helpers.
//!
//! The simulation only reports an indicator's phase and age; opacity, rise
//! and press scaling are derived here so every backend animates identically.

use std::time::Duration;

use dog_clicker_core::{
    Event, IndicatorPhase, IndicatorSnapshot, ReferencePoint, Score, INDICATOR_FADE_DURATION,
    INDICATOR_VISIBLE_DURATION,
};
use glam::Vec2;

use crate::{IndicatorPresentation, SoundCue};

/// Scale applied to the character while the press feedback is active.
pub const PRESSED_SCALE: f32 = 1.1;

/// Scale applied to the character at rest.
pub const RELEASED_SCALE: f32 = 1.0;

/// Distance an indicator rises while fading.
pub const INDICATOR_RISE: f32 = 60.0;

/// Offset between an indicator's position and its text anchor on each axis.
pub const INDICATOR_TEXT_OFFSET: f32 = 40.0;

/// Font size of indicator labels.
pub const INDICATOR_FONT_SIZE: f32 = 28.0;

/// Rate, per second, at which the character scale converges on its target.
const PRESS_SCALE_RATE: f32 = 30.0;

/// Progress through the fading phase in the range 0.0..=1.0.
fn fade_progress(age: Duration) -> f32 {
    let into_fade = age.saturating_sub(INDICATOR_VISIBLE_DURATION);
    (into_fade.as_secs_f32() / INDICATOR_FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0)
}

/// Opacity of an indicator, always within 0.0..=1.0.
#[must_use]
pub fn indicator_opacity(phase: IndicatorPhase, age: Duration) -> f32 {
    match phase {
        IndicatorPhase::Visible => 1.0,
        IndicatorPhase::Fading => 1.0 - fade_progress(age),
    }
}

/// Upwards displacement of an indicator at the provided age.
#[must_use]
pub fn indicator_rise(age: Duration) -> f32 {
    INDICATOR_RISE * fade_progress(age)
}

/// Converts a simulation snapshot into a drawable indicator.
#[must_use]
pub fn indicator_presentation(snapshot: &IndicatorSnapshot) -> IndicatorPresentation {
    let anchor = Vec2::new(
        snapshot.position.x - INDICATOR_TEXT_OFFSET,
        snapshot.position.y - indicator_rise(snapshot.age) - INDICATOR_TEXT_OFFSET,
    );
    IndicatorPresentation {
        id: snapshot.id,
        label: snapshot.label.clone(),
        anchor,
        opacity: indicator_opacity(snapshot.phase, snapshot.age),
    }
}

/// One-shot sounds implied by a batch of simulation events.
#[must_use]
pub fn sound_cues(events: &[Event]) -> Vec<SoundCue> {
    events
        .iter()
        .filter(|event| matches!(event, Event::IndicatorSpawned { .. }))
        .map(|_| SoundCue::Click)
        .collect()
}

/// Score line drawn below the character.
#[must_use]
pub fn score_text(score: Score) -> String {
    format!("Taps: {}", score.get())
}

/// Diagnostic line reporting the character center in whole units.
#[must_use]
pub fn reference_overlay(reference: Option<ReferencePoint>) -> String {
    match reference {
        Some(reference) => format!(
            "Center X: {}, Y: {}",
            reference.center().x as i32,
            reference.center().y as i32
        ),
        None => "Center X: 0, Y: 0".to_owned(),
    }
}

/// Smoothly animates the character scale towards the pressed or released size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressScale {
    current: f32,
}

impl Default for PressScale {
    fn default() -> Self {
        Self {
            current: RELEASED_SCALE,
        }
    }
}

impl PressScale {
    /// Scale reached after the previous update.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Moves the scale towards its target over `dt` and returns the result.
    pub fn update(&mut self, pressed: bool, dt: Duration) -> f32 {
        let target = if pressed { PRESSED_SCALE } else { RELEASED_SCALE };
        let blend = 1.0 - (-PRESS_SCALE_RATE * dt.as_secs_f32()).exp();
        self.current += (target - self.current) * blend;
        if (target - self.current).abs() < 1e-3 {
            self.current = target;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dog_clicker_core::{IndicatorId, ScreenPoint, ScreenSize};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn opacity_stays_within_unit_range() {
        for age in (0..=500).step_by(25) {
            let age = ms(age);
            if let Some(phase) = IndicatorPhase::for_age(age) {
                let opacity = indicator_opacity(phase, age);
                assert!((0.0..=1.0).contains(&opacity), "opacity {opacity} at {age:?}");
            }
        }
    }

    #[test]
    fn opacity_fades_linearly_after_visible_phase() {
        assert_eq!(indicator_opacity(IndicatorPhase::Visible, ms(299)), 1.0);
        assert!((indicator_opacity(IndicatorPhase::Fading, ms(300)) - 1.0).abs() < 1e-4);
        assert!((indicator_opacity(IndicatorPhase::Fading, ms(400)) - 0.5).abs() < 1e-4);
        assert!(indicator_opacity(IndicatorPhase::Fading, ms(499)) < 0.01);
    }

    #[test]
    fn rise_starts_with_fade_and_reaches_full_height() {
        assert_eq!(indicator_rise(ms(0)), 0.0);
        assert_eq!(indicator_rise(ms(300)), 0.0);
        assert!((indicator_rise(ms(400)) - 30.0).abs() < 1e-3);
        assert!((indicator_rise(ms(500)) - INDICATOR_RISE).abs() < 1e-3);
    }

    #[test]
    fn presentation_offsets_anchor_from_position() {
        let snapshot = IndicatorSnapshot {
            id: IndicatorId::new(4),
            label: "+3".to_owned(),
            position: ScreenPoint::new(100.0, 200.0),
            phase: IndicatorPhase::Visible,
            age: ms(10),
        };

        let presentation = indicator_presentation(&snapshot);
        assert_eq!(presentation.anchor, Vec2::new(60.0, 160.0));
        assert_eq!(presentation.label, "+3");
        assert_eq!(presentation.opacity, 1.0);
    }

    #[test]
    fn spawned_indicators_request_clicks() {
        let events = vec![
            Event::SessionStarted,
            Event::IndicatorSpawned {
                id: IndicatorId::new(0),
                label: "+1".to_owned(),
                position: ScreenPoint::default(),
            },
            Event::PressFeedbackChanged { active: true },
        ];
        assert_eq!(sound_cues(&events), vec![SoundCue::Click]);
    }

    #[test]
    fn press_scale_converges_and_settles() {
        let mut scale = PressScale::default();
        for _ in 0..30 {
            let _ = scale.update(true, ms(16));
        }
        assert_eq!(scale.current(), PRESSED_SCALE);

        for _ in 0..30 {
            let _ = scale.update(false, ms(16));
        }
        assert_eq!(scale.current(), RELEASED_SCALE);
    }

    #[test]
    fn overlay_truncates_center_coordinates() {
        let reference =
            ReferencePoint::new(ScreenPoint::new(270.9, 401.2), ScreenSize::new(1.0, 1.0));
        assert_eq!(reference_overlay(Some(reference)), "Center X: 270, Y: 401");
        assert_eq!(reference_overlay(None), "Center X: 0, Y: 0");
    }

    #[test]
    fn score_text_matches_hud_format() {
        assert_eq!(score_text(Score::new(42)), "Taps: 42");
    }
}
