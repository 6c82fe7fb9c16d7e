//! Music and sound playback, compiled only with the `audio` feature.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use dog_clicker_rendering::{MusicTrack, SoundCue};
use log::debug;
use macroquad::audio::{
    load_sound_from_bytes, play_sound, play_sound_once, stop_sound, PlaySoundParams, Sound,
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const MUSIC_VOLUME: f32 = 0.6;

/// Sounds loaded from the audio manifest.
#[derive(Debug)]
pub(crate) struct AudioBank {
    tracks: HashMap<MusicTrack, Sound>,
    cues: HashMap<SoundCue, Sound>,
    playing: Option<MusicTrack>,
}

impl AudioBank {
    /// Loads every sound listed in `assets/audio.toml`.
    pub(crate) async fn from_default_manifest() -> Result<Self> {
        Self::from_manifest_path("assets/audio.toml").await
    }

    async fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read audio manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;

        let mut tracks = HashMap::with_capacity(entries.tracks.len());
        for (track, path) in entries.tracks {
            let _ = tracks.insert(track, load(&path).await?);
        }
        let mut cues = HashMap::with_capacity(entries.cues.len());
        for (cue, path) in entries.cues {
            let _ = cues.insert(cue, load(&path).await?);
        }

        Ok(Self {
            tracks,
            cues,
            playing: None,
        })
    }

    /// Switches the looping music to `track` if it is not already playing.
    pub(crate) fn sync_music(&mut self, track: MusicTrack) {
        if self.playing == Some(track) {
            return;
        }
        if let Some(previous) = self.playing.take() {
            if let Some(sound) = self.tracks.get(&previous) {
                stop_sound(*sound);
            }
        }
        if let Some(sound) = self.tracks.get(&track) {
            debug!("starting {track:?} music");
            play_sound(
                *sound,
                PlaySoundParams {
                    looped: true,
                    volume: MUSIC_VOLUME,
                },
            );
        }
        self.playing = Some(track);
    }

    /// Plays each cue once.
    pub(crate) fn play_cues(&self, cues: &[SoundCue]) {
        for cue in cues {
            if let Some(sound) = self.cues.get(cue) {
                play_sound_once(*sound);
            }
        }
    }
}

async fn load(path: &Path) -> Result<Sound> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read audio asset at {}", path.display()))?;
    load_sound_from_bytes(&bytes)
        .await
        .map_err(|error| anyhow!("failed to decode {}: {error:?}", path.display()))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    tracks: HashMap<String, String>,
    #[serde(default)]
    cues: HashMap<String, String>,
}

#[derive(Debug, Default, PartialEq)]
struct Entries {
    tracks: Vec<(MusicTrack, PathBuf)>,
    cues: Vec<(SoundCue, PathBuf)>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Entries> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse audio manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported audio manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut entries = Entries::default();
    for (name, relative_path) in manifest.tracks {
        let track = match name.as_str() {
            "Menu" => MusicTrack::Menu,
            "Game" => MusicTrack::Game,
            _ => bail!("unknown music track `{name}` in audio manifest"),
        };
        entries.tracks.push((track, base_path.join(relative_path)));
    }
    for (name, relative_path) in manifest.cues {
        let cue = match name.as_str() {
            "Click" => SoundCue::Click,
            _ => bail!("unknown sound cue `{name}` in audio manifest"),
        };
        entries.cues.push((cue, base_path.join(relative_path)));
    }
    entries.tracks.sort_by_key(|(track, _)| *track as u8);

    Ok(entries)
}
