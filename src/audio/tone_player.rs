use embassy_futures::yield_now;

use crate::config::PlayerConfig;
use crate::drivers::audio::PlayTone;
use crate::time::Clock;

use super::{
    melody::MelodySource,
    note::{ControlSection, NoteEvent},
    AudioError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    Uninitialized,
    Ready,
    SoundingNote,
    Silence,
    Done,
}

/// Non-blocking melody player. `begin` loads a melody, then `tick` is called
/// from the caller's loop with the current time and emits each note once its
/// predecessor's deadline has passed.
pub struct TonePlayer<D: PlayTone, S: MelodySource> {
    audio_driver: D,
    config: PlayerConfig,

    pin: Option<D::Pin>,
    song: Option<S>,
    control: ControlSection,
    whole_note_ms: u32,
    current: Option<NoteEvent>,
    next_deadline: u64,

    state: PlayerState,
    playing: bool,
}

impl<D: PlayTone, S: MelodySource> TonePlayer<D, S> {
    pub fn new(audio_driver: D) -> Self {
        Self::new_with_config(audio_driver, PlayerConfig::default())
    }

    pub fn new_with_config(audio_driver: D, config: PlayerConfig) -> Self {
        TonePlayer {
            audio_driver,
            config,
            pin: None,
            song: None,
            control: ControlSection::default(),
            whole_note_ms: 0,
            current: None,
            next_deadline: 0,
            state: PlayerState::Uninitialized,
            playing: false,
        }
    }

    fn reset(&mut self) {
        self.pin = None;
        self.song = None;
        self.control = ControlSection::default();
        self.whole_note_ms = 0;
        self.current = None;
        self.next_deadline = 0;
        self.state = PlayerState::Uninitialized;
        self.playing = false;
    }

    /// Loads `song` for playback on `pin`. Whatever was playing is dropped
    /// and the pin is silenced. The first note sounds on the next `tick`.
    pub fn begin(&mut self, mut song: S, pin: D::Pin) -> Result<(), AudioError> {
        self.reset();
        self.audio_driver.no_tone(pin);

        let control = song.read_control().inspect_err(|err| {
            warn!("melody rejected, no control section {}", err);
        })?;

        let Some(whole_note_ms) = control.whole_note_ms() else {
            warn!("melody rejected, bpm of 0");
            return Err(AudioError::InvalidBpm);
        };

        debug!(
            "melody loaded d={} o={} b={} whole={}ms",
            control.duration,
            control.octave,
            control.bpm,
            whole_note_ms
        );

        self.pin = Some(pin);
        self.song = Some(song);
        self.control = control;
        self.whole_note_ms = whole_note_ms;
        self.state = PlayerState::Ready;
        self.playing = true;

        Ok(())
    }

    /// Advances playback to `now_ms`. Does nothing until the current note's
    /// deadline has passed, never blocks and never fails.
    pub fn tick(&mut self, now_ms: u64) -> PlayerState {
        if !self.playing || now_ms < self.next_deadline {
            return self.state;
        }

        let (Some(song), Some(pin)) = (self.song.as_mut(), self.pin) else {
            return self.state;
        };

        let note = if song.is_exhausted() {
            None
        } else {
            song.next_note(&self.control)
        };

        let Some(note) = note else {
            debug!("melody finished");
            self.finish(pin);
            return self.state;
        };

        let event = note.to_event(self.whole_note_ms);
        match event.frequency() {
            Some(freq) => {
                trace!(
                    "note o={} offset={} freq={} dur={}ms",
                    event.octave,
                    event.semitone(),
                    freq,
                    event.duration_ms
                );
                self.audio_driver.play_tone(pin, freq, event.duration_ms);
                let hold_ms = event.duration_ms as u64 + self.config.note_gap_ms as u64;
                self.next_deadline = now_ms.saturating_add(hold_ms);
                self.state = PlayerState::SoundingNote;
            }
            None => {
                trace!("rest dur={}ms", event.duration_ms);
                self.audio_driver.no_tone(pin);
                self.next_deadline = now_ms.saturating_add(event.duration_ms.max(1) as u64);
                self.state = PlayerState::Silence;
            }
        }
        self.current = Some(event);

        self.state
    }

    fn finish(&mut self, pin: D::Pin) {
        self.audio_driver.no_tone(pin);
        self.current = None;
        self.playing = false;
        self.state = PlayerState::Done;
    }

    /// Silences the pin and drops the rest of the melody. There is no resume.
    pub fn stop(&mut self) {
        if let Some(song) = self.song.as_mut() {
            song.skip_to_end();
        }

        if self.playing {
            if let Some(pin) = self.pin {
                debug!("melody stopped");
                self.finish(pin);
            }
        }

        self.playing = false;
        self.state = PlayerState::Done;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_done(&self) -> bool {
        !self.playing
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn next_deadline(&self) -> u64 {
        self.next_deadline
    }

    pub fn control(&self) -> &ControlSection {
        &self.control
    }

    pub fn whole_note_ms(&self) -> u32 {
        self.whole_note_ms
    }

    pub fn current_note(&self) -> Option<&NoteEvent> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.audio_driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.audio_driver
    }

    /// Walks `song` and checks every sounding note against the driver.
    /// Notes outside the pitch table count as unplayable too.
    pub fn check_playable<M: MelodySource>(&self, song: &mut M) -> Result<(), AudioError> {
        let control = song.read_control()?;
        let whole_note_ms = control.whole_note_ms().ok_or(AudioError::InvalidBpm)?;

        while let Some(note) = song.next_note(&control) {
            if note.is_rest() {
                continue;
            }

            match note.to_event(whole_note_ms).frequency() {
                Some(freq) if self.audio_driver.can_play_tone(freq) => {}
                _ => return Err(AudioError::UnplayablePitch),
            }
        }

        Ok(())
    }

    /// Plays `song` to the end, polling `tick` and sleeping `yield_ms`
    /// between polls. Note lengths are never slept through.
    pub fn play_blocking<C: Clock>(
        &mut self,
        song: S,
        pin: D::Pin,
        clock: &mut C,
    ) -> Result<(), AudioError> {
        self.begin(song, pin)?;

        loop {
            self.tick(clock.now_ms());
            if self.is_done() {
                return Ok(());
            }

            clock.delay_ms(self.config.yield_ms);
        }
    }

    /// Plays `song` to the end, handing control back to the executor between
    /// ticks.
    pub async fn play_song<C: Clock>(
        &mut self,
        song: S,
        pin: D::Pin,
        clock: &C,
    ) -> Result<(), AudioError> {
        self.begin(song, pin)?;

        while !self.is_done() {
            self.tick(clock.now_ms());
            yield_now().await;
        }

        Ok(())
    }

    /// Like `play_song` but sleeps on an embassy timer until each deadline.
    #[cfg(feature = "embassy")]
    pub async fn play_song_timed(&mut self, song: S, pin: D::Pin) -> Result<(), AudioError> {
        use embassy_time::{Instant, Timer};

        self.begin(song, pin)?;

        loop {
            self.tick(Instant::now().as_millis());
            if self.is_done() {
                return Ok(());
            }

            Timer::at(Instant::from_millis(self.next_deadline)).await;
        }
    }
}
