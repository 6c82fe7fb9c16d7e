#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Dog Clicker experience.

mod frame;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dog_clicker_core::WINDOW_TITLE;
use dog_clicker_rendering::{Color, Presentation, RenderingBackend, Scene, SceneLayout, WindowSize};
use dog_clicker_rendering_macroquad::MacroquadBackend;
use dog_clicker_session::{GameSession, SessionConfig};
use glam::Vec2;
use log::{error, info, LevelFilter};

use self::frame::FrameDriver;

/// Backdrop used while no background sprite is drawn.
const CLEAR_COLOR: Color = Color::from_rgb_u8(58, 96, 138);

#[derive(Debug, Parser)]
#[command(name = "dog-clicker")]
#[command(about = "Tap the dog, watch the score climb")]
struct CliArgs {
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, conflicts_with = "no_vsync")]
    vsync: bool,

    /// Render as fast as possible.
    #[arg(long)]
    no_vsync: bool,

    /// Log frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Draw primitive shapes instead of loading `assets/manifest.toml`.
    #[arg(long)]
    no_sprites: bool,

    /// Seed for indicator placement; OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of floating indicators alive at once.
    #[arg(long, default_value_t = dog_clicker_core::DEFAULT_INDICATOR_CAPACITY)]
    indicator_capacity: usize,

    /// Show the character center in the top-left corner.
    #[arg(long)]
    debug_overlay: bool,

    /// Log verbosity (off, error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

impl CliArgs {
    fn swap_interval(&self) -> Option<i32> {
        if self.vsync {
            Some(1)
        } else if self.no_vsync {
            Some(0)
        } else {
            None
        }
    }
}

/// Entry point for the Dog Clicker command-line interface.
fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        let _ = builder.filter_level(LevelFilter::Info);
    }
    if let Some(level) = level {
        let _ = builder.filter_level(level);
    }
    builder.init();
}

fn run(args: CliArgs) -> Result<()> {
    let config = SessionConfig::new(args.indicator_capacity)
        .context("invalid --indicator-capacity")?
        .with_placement_seed(args.seed);
    info!(
        "starting with indicator capacity {} and {} placement",
        config.indicator_capacity(),
        if config.placement_seed().is_some() {
            "seeded"
        } else {
            "random"
        }
    );

    let session = GameSession::new(config);
    let window = WindowSize::PORTRAIT;
    let layout = SceneLayout::for_viewport(Vec2::new(window.width() as f32, window.height() as f32));
    let scene = Scene::title(session.title_prompt(), layout);
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);

    let backend = MacroquadBackend::new()
        .with_swap_interval(args.swap_interval())
        .with_show_fps(args.show_fps)
        .with_sprite_loading(!args.no_sprites)
        .with_window_size(window);

    let mut driver = FrameDriver::new(session, args.debug_overlay);
    backend
        .run(presentation, move |dt, input, scene| {
            driver.update(dt, input, scene)
        })
        .context("render loop failed")
}
