//! Sound cues, music tempo, and the session-owned audio output.
//!
//! Synthesis lives behind [`AudioSink`]; the crate only decides *when* a cue
//! fires and how fast the music runs. [`LogAudio`] is the bundled sink and
//! records cues through the `log` facade.

use log::debug;

use crate::config::Volume;

/// One-shot sound effects raised by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The player left the ground.
    Jump,
    /// The player started ducking.
    Duck,
    /// A power-up was collected.
    PowerUp,
    /// A shield absorbed an impact.
    Explosion,
    /// The run ended.
    GameOver,
}

impl SoundCue {
    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Duck => "duck",
            Self::PowerUp => "powerup",
            Self::Explosion => "explosion",
            Self::GameOver => "gameover",
        }
    }
}

/// Playback backend.
///
/// All calls are fire-and-forget; a sink that cannot play simply drops the
/// request.
pub trait AudioSink {
    /// Plays a one-shot cue.
    fn play(&mut self, cue: SoundCue);
    /// Sets the music tempo scalar (1.0 is the base tempo).
    fn set_music_tempo(&mut self, tempo: f32);
    /// Sets the pitch scalar of the music voices (1.0 is unshifted).
    fn set_music_pitch(&mut self, pitch: f32);
    /// Sets the master level in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Silences or restores all output.
    fn set_muted(&mut self, muted: bool);
    /// Starts the background loop.
    fn start_music(&mut self);
    /// Stops the background loop.
    fn stop_music(&mut self);
}

/// Music tempo for the given world speed.
///
/// # Examples
///
/// ```
/// use neon_runner::audio::music_tempo;
/// assert!((music_tempo(7.0, 7.0) - 1.0).abs() < f32::EPSILON);
/// assert!((music_tempo(17.0, 7.0) - 1.5).abs() < f32::EPSILON);
/// ```
#[must_use]
pub const fn music_tempo(speed: f32, initial_speed: f32) -> f32 {
    1.0 + (speed - initial_speed) / 20.0
}

/// Pitch shift applied to music voices at `tempo`.
///
/// ```
/// use neon_runner::audio::pitch_modifier;
/// assert!((pitch_modifier(1.5) - 1.1).abs() < 1e-6);
/// ```
#[must_use]
pub const fn pitch_modifier(tempo: f32) -> f32 {
    1.0 + (tempo - 1.0) * 0.2
}

/// Sink that writes every request to the debug log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogAudio {
    muted: bool,
    music_playing: bool,
    tempo: f32,
    pitch: f32,
    volume: f32,
}

impl LogAudio {
    /// Whether the music loop is running.
    #[must_use]
    pub const fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Last tempo set.
    #[must_use]
    pub const fn tempo(&self) -> f32 {
        self.tempo
    }

    /// Last music pitch set.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Last master level set.
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether output is silenced.
    #[must_use]
    pub const fn muted(&self) -> bool {
        self.muted
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if !self.muted {
            debug!("cue {}", cue.name());
        }
    }

    fn set_music_tempo(&mut self, tempo: f32) {
        self.tempo = tempo;
    }

    fn set_music_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        debug!("audio volume={volume}");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        debug!("audio muted={muted}");
    }

    fn start_music(&mut self) {
        self.music_playing = true;
        debug!("music started");
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            debug!("music stopped");
        }
        self.music_playing = false;
    }
}

/// Audio for one session.
///
/// Opening starts the music; closing or dropping stops it exactly once.
pub struct AudioOutput {
    sink: Box<dyn AudioSink>,
    open: bool,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl AudioOutput {
    /// Takes ownership of `sink`, applies the level and mute flag, and starts
    /// music.
    ///
    /// A level below [`Volume::SILENT_BELOW`] mutes the sink as well.
    #[must_use]
    pub fn open(mut sink: Box<dyn AudioSink>, volume: Volume, muted: bool) -> Self {
        sink.set_volume(volume.get());
        sink.set_muted(muted || volume.is_silent());
        sink.start_music();
        Self { sink, open: true }
    }

    /// Forwards a cue while open.
    pub fn play(&mut self, cue: SoundCue) {
        if self.open {
            self.sink.play(cue);
        }
    }

    /// Forwards a tempo change, and the pitch derived from it, while open.
    pub fn set_tempo(&mut self, tempo: f32) {
        if self.open {
            self.sink.set_music_tempo(tempo);
            self.sink.set_music_pitch(pitch_modifier(tempo));
        }
    }

    /// Whether music is still owned by this output.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Stops the music. Later calls are no-ops.
    pub fn close(&mut self) {
        if std::mem::replace(&mut self.open, false) {
            self.sink.stop_music();
        }
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mockall::{mock, predicate::eq, Sequence};
    use rstest::rstest;

    mock! {
        Sink {}
        impl AudioSink for Sink {
            fn play(&mut self, cue: SoundCue);
            fn set_music_tempo(&mut self, tempo: f32);
            fn set_music_pitch(&mut self, pitch: f32);
            fn set_volume(&mut self, volume: f32);
            fn set_muted(&mut self, muted: bool);
            fn start_music(&mut self);
            fn stop_music(&mut self);
        }
    }

    #[rstest]
    #[case::at_start(4.0, 4.0, 1.0, 1.0)]
    #[case::doubled(24.0, 4.0, 2.0, 1.2)]
    #[case::hard_cap(20.0, 10.0, 1.5, 1.1)]
    fn tempo_and_pitch(
        #[case] speed: f32,
        #[case] initial: f32,
        #[case] tempo: f32,
        #[case] pitch: f32,
    ) {
        assert_relative_eq!(music_tempo(speed, initial), tempo);
        assert_relative_eq!(pitch_modifier(music_tempo(speed, initial)), pitch, epsilon = 1e-6);
    }

    #[test]
    fn output_brackets_music_and_forwards_cues() {
        let mut seq = Sequence::new();
        let mut sink = MockSink::new();
        sink.expect_set_volume()
            .with(eq(0.5))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_set_muted()
            .with(eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_start_music()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_play()
            .with(eq(SoundCue::Jump))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_stop_music()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut output = AudioOutput::open(Box::new(sink), Volume::default(), false);
        output.play(SoundCue::Jump);
        output.close();
        output.play(SoundCue::GameOver);
        assert!(!output.is_open());
    }

    #[test]
    fn dropping_output_stops_music() {
        let mut sink = MockSink::new();
        sink.expect_set_volume().return_const(());
        sink.expect_set_muted().return_const(());
        sink.expect_start_music().times(1).return_const(());
        sink.expect_stop_music().times(1).return_const(());
        drop(AudioOutput::open(Box::new(sink), Volume::default(), true));
    }

    #[rstest]
    #[case::silent(0.05, false, true)]
    #[case::threshold(0.1, false, false)]
    #[case::audible(0.8, false, false)]
    #[case::flag_wins(0.8, true, true)]
    fn low_volume_mutes_the_sink(#[case] level: f32, #[case] flag: bool, #[case] muted: bool) {
        let volume = Volume::new(level).unwrap_or_else(|e| panic!("{e}"));
        let mut sink = MockSink::new();
        sink.expect_set_volume()
            .with(eq(level))
            .times(1)
            .return_const(());
        sink.expect_set_muted()
            .with(eq(muted))
            .times(1)
            .return_const(());
        sink.expect_start_music().return_const(());
        sink.expect_stop_music().return_const(());
        drop(AudioOutput::open(Box::new(sink), volume, flag));
    }

    #[test]
    fn tempo_changes_carry_the_music_pitch() {
        let mut sink = MockSink::new();
        sink.expect_set_volume().return_const(());
        sink.expect_set_muted().return_const(());
        sink.expect_start_music().return_const(());
        sink.expect_stop_music().return_const(());
        sink.expect_set_music_tempo()
            .with(eq(1.5))
            .times(1)
            .return_const(());
        sink.expect_set_music_pitch()
            .withf(|pitch| (pitch - 1.1).abs() < 1e-6)
            .times(1)
            .return_const(());

        let mut output = AudioOutput::open(Box::new(sink), Volume::default(), false);
        output.set_tempo(1.5);
        output.close();
        output.set_tempo(2.0);
    }

    #[test]
    fn log_sink_tracks_music_state() {
        let mut sink = LogAudio::default();
        sink.start_music();
        sink.set_music_tempo(1.25);
        sink.set_volume(0.3);
        assert!(sink.music_playing());
        assert_relative_eq!(sink.tempo(), 1.25);
        assert_relative_eq!(sink.volume(), 0.3);
        sink.stop_music();
        assert!(!sink.music_playing());
    }
}
