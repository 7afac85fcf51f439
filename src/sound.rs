use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Duration;

/// Audio cues requested by widgets
pub trait SoundPlayer {
    /// Selection moved to another option
    fn play_key_add(&self);

    /// Current option confirmed
    fn play_open_menu(&self);
}

/// Silent player; the default for every widget
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSound;

impl SoundPlayer for NoSound {
    fn play_key_add(&self) {}

    fn play_open_menu(&self) {}
}

/// Short synthesized tones on the default audio device
pub struct ToneSound {
    // Dropping the stream closes the device, so it lives as long as the player
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
}

impl ToneSound {
    /// Opens the default output device; fails when no device is available
    pub fn try_new(volume: f32) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    fn play_tone(&self, frequency: f32, millis: u64) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(
                    SineWave::new(frequency)
                        .take_duration(Duration::from_millis(millis))
                        .amplify(self.volume),
                );
                sink.detach();
            }
            Err(err) => tracing::warn!(error = %err, "Could not play sound cue"),
        }
    }
}

impl SoundPlayer for ToneSound {
    fn play_key_add(&self) {
        self.play_tone(660.0, 35);
    }

    fn play_open_menu(&self) {
        self.play_tone(880.0, 90);
    }
}
