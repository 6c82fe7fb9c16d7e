#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Dog Clicker.
//!
//! Macroquad's audio stack depends on native ALSA development libraries, so
//! the crate depends on macroquad without its default `audio` feature. Enable
//! this crate's `audio` feature to play music and click sounds.

#[cfg(feature = "audio")]
mod audio;
mod sprites;

use anyhow::{Context, Result};
use dog_clicker_core::Screen;
use dog_clicker_rendering::{
    CharacterPresentation, Color, FrameInput, IndicatorPresentation, Presentation,
    RenderingBackend, Scene, SpriteKey, WindowSize,
};
use glam::Vec2;
use log::{info, warn};
use macroquad::{
    input::{
        is_key_pressed, is_mouse_button_pressed, mouse_position, touches, KeyCode, MouseButton,
        TouchPhase,
    },
    shapes::draw_circle,
    text::{draw_text, measure_text},
};
use std::{
    collections::VecDeque,
    sync::mpsc,
    time::{Duration, Instant},
};

use self::sprites::{DrawParams, SpriteAtlas};

/// Font size of the title prompt.
const TITLE_FONT_SIZE: f32 = 44.0;
/// Font size of the diagnostic overlay.
const OVERLAY_FONT_SIZE: f32 = 20.0;

/// Latches taps observed by the platform until the next scene update.
///
/// Several touches may start during a single frame; all of them are handed
/// to the scene on that frame in arrival order.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct TapInputState {
    pending_taps: VecDeque<Vec2>,
    restart_latched: bool,
}

impl TapInputState {
    /// Records a tap at the provided screen position.
    pub fn register_tap(&mut self, position: Vec2) {
        self.pending_taps.push_back(position);
    }

    /// Returns every pending tap, oldest first, and clears the latch.
    pub fn take_taps(&mut self) -> Vec<Vec2> {
        self.pending_taps.drain(..).collect()
    }

    /// Records that a restart was requested this frame.
    pub fn register_restart(&mut self) {
        self.restart_latched = true;
    }

    /// Returns whether a restart was requested and clears the latch.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_latched)
    }

    /// Number of taps waiting for delivery.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending_taps.len()
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `R` restarts the running session.
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            restart: is_key_pressed(KeyCode::R),
        }
    }
}

fn poll_taps(input: &mut TapInputState) {
    let started: Vec<Vec2> = touches()
        .into_iter()
        .filter(|touch| matches!(touch.phase, TouchPhase::Started))
        .map(|touch| Vec2::new(touch.position.x, touch.position.y))
        .collect();

    // Macroquad mirrors the first touch as a mouse press, so touches win.
    if started.is_empty() {
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            input.register_tap(Vec2::new(x, y));
        }
    } else {
        for position in started {
            input.register_tap(position);
        }
    }
}

fn frame_input(input: &mut TapInputState, viewport: Vec2) -> FrameInput {
    FrameInput {
        taps: input.take_taps(),
        restart: input.take_restart(),
        viewport,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    window_size: WindowSize,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            window_size: WindowSize::PORTRAIT,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Requests a window of the provided size.
    #[must_use]
    pub fn with_window_size(mut self, window_size: WindowSize) -> Self {
        self.window_size = window_size;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let update_accum = self.update_accum;
        let render_accum = self.render_accum;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;

        if seconds <= f32::EPSILON || frames == 0 {
            return None;
        }

        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: update_accum / frames,
            avg_render: render_accum / frames,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            window_size,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.width(),
            window_height: window_size.height(),
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(init_sender);
            let mut scene = scene;

            let manifest_path = sprites::default_manifest_path();
            let sprite_atlas = if load_sprites && !manifest_path.exists() {
                warn!(
                    "{} not found; drawing primitive shapes",
                    manifest_path.display()
                );
                None
            } else if load_sprites {
                match SpriteAtlas::from_manifest_path(&manifest_path)
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => {
                        debug_assert!(
                            atlas.contains(SpriteKey::Background)
                                && atlas.contains(SpriteKey::Character)
                        );
                        info!("loaded {} sprites", atlas.texture_count());
                        Some(atlas)
                    }
                    Err(error) => {
                        if let Some(sender) = init_sender.take() {
                            let _ = sender.send(Err(error));
                        }
                        return;
                    }
                }
            } else {
                None
            };

            #[cfg(feature = "audio")]
            let mut audio_bank = match audio::AudioBank::from_default_manifest().await {
                Ok(bank) => Some(bank),
                Err(error) => {
                    warn!("audio disabled: {error:#}");
                    None
                }
            };

            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut tap_input = TapInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }
                if keyboard.restart {
                    tap_input.register_restart();
                }
                poll_taps(&mut tap_input);

                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let update_start = Instant::now();
                update_scene(frame_dt, frame_input(&mut tap_input, viewport), &mut scene);
                let update_duration = update_start.elapsed();

                #[cfg(feature = "audio")]
                {
                    if let Some(bank) = audio_bank.as_mut() {
                        bank.sync_music(scene.music);
                        bank.play_cues(&scene.sound_cues);
                    }
                }

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                draw_background(viewport, sprite_atlas.as_ref());
                match scene.screen {
                    Screen::Title => draw_title(&scene, viewport),
                    Screen::Playing => {
                        draw_character(&scene.character, sprite_atlas.as_ref());
                        draw_score(&scene, viewport);
                        draw_indicators(&scene.indicators, scene.text_color);
                    }
                }
                if let Some(overlay) = &scene.debug_overlay {
                    draw_text(
                        overlay,
                        8.0,
                        OVERLAY_FONT_SIZE + 4.0,
                        OVERLAY_FONT_SIZE,
                        to_macroquad_color(scene.text_color),
                    );
                }
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn draw_background(viewport: Vec2, sprite_atlas: Option<&SpriteAtlas>) {
    if let Some(atlas) = sprite_atlas {
        if let Err(error) = atlas.draw(SpriteKey::Background, DrawParams::covering(viewport)) {
            warn!("background sprite unavailable: {error:#}");
        }
    }
}

fn centered_text_x(viewport_width: f32, text: &str, font_size: f32) -> f32 {
    let width = measure_text(text, None, font_size as u16, 1.0).width;
    (viewport_width - width) * 0.5
}

fn draw_title(scene: &Scene, viewport: Vec2) {
    let x = centered_text_x(viewport.x, &scene.title_prompt, TITLE_FONT_SIZE);
    draw_text(
        &scene.title_prompt,
        x,
        viewport.y * 0.5,
        TITLE_FONT_SIZE,
        to_macroquad_color(scene.text_color),
    );
}

fn draw_score(scene: &Scene, viewport: Vec2) {
    let font_size = dog_clicker_rendering::SceneLayout::SCORE_FONT_SIZE;
    let x = centered_text_x(viewport.x, &scene.score_text, font_size);
    draw_text(
        &scene.score_text,
        x,
        scene.score_top + font_size,
        font_size,
        to_macroquad_color(scene.text_color),
    );
}

fn draw_character(character: &CharacterPresentation, sprite_atlas: Option<&SpriteAtlas>) {
    let edge = character.scaled_edge();
    if edge <= f32::EPSILON {
        return;
    }
    if let Some(atlas) = sprite_atlas {
        let params = DrawParams::centered(character.center, Vec2::splat(edge));
        match atlas.draw(SpriteKey::Character, params) {
            Ok(()) => return,
            Err(error) => warn!("character sprite unavailable: {error:#}"),
        }
    }
    draw_primitive_character(character.center, edge);
}

fn draw_primitive_character(center: Vec2, edge: f32) {
    let fur = to_macroquad_color(Color::from_rgb_u8(176, 122, 68));
    let ears = to_macroquad_color(Color::from_rgb_u8(110, 70, 38));
    let dark = to_macroquad_color(Color::from_rgb_u8(30, 24, 20));

    let head = edge * 0.36;
    let ear = head * 0.45;
    draw_circle(center.x - head * 0.8, center.y - head * 0.7, ear, ears);
    draw_circle(center.x + head * 0.8, center.y - head * 0.7, ear, ears);
    draw_circle(center.x, center.y, head, fur);

    let eye = head * 0.1;
    draw_circle(center.x - head * 0.35, center.y - head * 0.2, eye, dark);
    draw_circle(center.x + head * 0.35, center.y - head * 0.2, eye, dark);
    draw_circle(center.x, center.y + head * 0.25, head * 0.16, dark);
}

fn draw_indicators(indicators: &[IndicatorPresentation], text_color: Color) {
    let font_size = dog_clicker_rendering::visuals::INDICATOR_FONT_SIZE;
    for indicator in indicators {
        draw_text(
            &indicator.label,
            indicator.anchor.x,
            indicator.anchor.y + font_size,
            font_size,
            to_macroquad_color(text_color.with_alpha(indicator.opacity)),
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
