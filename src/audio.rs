use color_eyre::{Result, eyre::WrapErr};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type Sound = Buffered<Decoder<BufReader<File>>>;

pub const FIRE_SOUND: &str = "sounds/fire.wav";
pub const GHOST_DEATH_SOUND: &str = "sounds/ghost_death.wav";

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output stream and handle; the stream must stay alive while playing
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered sounds (None if loading failed)
    fire_sound: Option<Sound>,
    ghost_death_sound: Option<Sound>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads sounds from `assets_dir`.
    /// Anything missing is logged and left silent.
    pub fn new(assets_dir: &Path) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("no audio output, continuing without sound: {err}");
                None
            }
        };

        let load = |name: &str| match load_sound(&assets_dir.join(name)) {
            Ok(sound) => Some(sound),
            Err(err) => {
                log::warn!("{err:#}");
                None
            }
        };

        Self {
            fire_sound: output.as_ref().and_then(|_| load(FIRE_SOUND)),
            ghost_death_sound: output.as_ref().and_then(|_| load(GHOST_DEATH_SOUND)),
            output,
        }
    }

    pub fn play_fire_sound(&self) {
        self.play(self.fire_sound.as_ref(), 0.05);
    }

    pub fn play_ghost_death_sound(&self) {
        self.play(self.ghost_death_sound.as_ref(), 0.1);
    }

    fn play(&self, sound: Option<&Sound>, volume: f32) {
        let (Some((_, handle)), Some(sound)) = (&self.output, sound) else {
            return;
        };
        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            // Clone the buffered source (fast - just clones references)
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn load_sound(path: &Path) -> Result<Sound> {
    let file =
        File::open(path).wrap_err_with(|| format!("failed to open sound {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file))
        .wrap_err_with(|| format!("failed to decode sound {}", path.display()))?;
    Ok(source.buffered())
}
